use clap::{Parser, Subcommand};

use self::{rates::RatesArg, score::ScoreArg, summary::SummaryArg};

mod rates;
mod score;
mod summary;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Print survival rates by class, sex, age group and class x sex
    Rates(#[clap(flatten)] RatesArg),
    /// Rank passengers by survival advantage
    Score(#[clap(flatten)] ScoreArg),
    /// Summarize the manifest and its age distribution
    Summary(#[clap(flatten)] SummaryArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Rates(arg) => rates::run(&arg)?,
        Mode::Score(arg) => score::run(&arg)?,
        Mode::Summary(arg) => summary::run(&arg)?,
    }
    Ok(())
}
