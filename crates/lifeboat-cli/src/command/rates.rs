//! Survival rate tables
//!
//! Prints the survival rate of every passenger group in the manifest: by
//! class, by sex, by age group and by class and sex together. Passengers
//! without a recorded age are included and reported as the `unknown` age
//! group.

use std::{fmt::Display, path::PathBuf};

use chrono::{DateTime, Utc};
use clap::Args;
use lifeboat_analysis::rates::{SurvivalRate, SurvivalRateMap, SurvivalRateReport};
use serde::Serialize;

use crate::{
    manifest,
    util::{self, Output},
};

#[derive(Debug, Clone, Args)]
pub(crate) struct RatesArg {
    /// Path to the passenger manifest CSV file
    pub manifest: PathBuf,

    /// Also save the report as JSON to this path
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct RatesOutput<'a> {
    generated_at: DateTime<Utc>,
    manifest: String,
    #[serde(flatten)]
    report: &'a SurvivalRateReport,
}

pub(crate) fn run(arg: &RatesArg) -> anyhow::Result<()> {
    let passengers = manifest::read_manifest_file(&arg.manifest)?;
    let report = SurvivalRateReport::from_passengers(&passengers)?;

    println!("Survival Rates ({})", arg.manifest.display());
    println!("==========================================\n");

    match &report.overall {
        Some(overall) => println!(
            "Overall: {} of {} passengers survived ({})\n",
            overall.survivors,
            overall.passengers,
            util::percent(overall.rate)
        ),
        None => println!("Overall: manifest is empty\n"),
    }

    print_section("By Class", "Class", &report.by_class, String::clone);
    print_section("By Sex", "Sex", &report.by_sex, String::clone);
    print_section("By Age Group", "Age Group", &report.by_age_group, ToString::to_string);
    print_section(
        "By Class and Sex",
        "Class / Sex",
        &report.by_class_and_sex,
        |(class, sex)| format!("{class} / {sex}"),
    );

    if let Some(path) = &arg.output {
        let output = RatesOutput {
            generated_at: Utc::now(),
            manifest: arg.manifest.display().to_string(),
            report: &report,
        };
        Output::save_json(&output, path)?;
        println!("Report saved to: {}", path.display());
    }

    Ok(())
}

fn print_section<K, F, L>(title: &str, label_col: &str, rates: &SurvivalRateMap<K>, label: F)
where
    F: Fn(&K) -> L,
    L: Display,
{
    println!("{title}");
    print_rate_table_header(label_col);
    for (key, rate) in &rates.map {
        print_rate_table_row(&label(key).to_string(), rate);
    }
    println!();
}

fn print_rate_table_header(label_col: &str) {
    println!(
        "  {:<20} {:>10} {:>10} {:>10}",
        label_col, "Passengers", "Survivors", "Rate"
    );
    // label(20) + passengers(10) + survivors(10) + rate(10) + spaces(3)
    println!("  {}", "-".repeat(53));
}

fn print_rate_table_row(label: &str, rate: &SurvivalRate) {
    println!(
        "  {:<20} {:>10} {:>10} {:>10}",
        label,
        rate.passengers,
        rate.survivors,
        util::percent(rate.rate)
    );
}
