//! Survival advantage ranking command
//!
//! Scores every passenger with a recorded age against class, sex and age
//! group baselines, then prints the ranking narrowed by the requested
//! selection. The full selection can also be exported as JSON or CSV.

mod table;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Args;
use lifeboat_analysis::{
    age_group::AgeGroup,
    scorer::{AdvantageRanking, ScoredPassenger},
    selection::Selection,
};
use serde::Serialize;

use crate::{
    manifest,
    util::{self, Output},
};

#[derive(Debug, Clone, Args)]
pub(crate) struct ScoreArg {
    /// Path to the passenger manifest CSV file
    pub manifest: PathBuf,

    /// Keep passengers ranked at or above this rank (ties are kept whole)
    #[arg(long)]
    pub top: Option<usize>,

    /// Keep only this passenger class (e.g. "Third")
    #[arg(long = "class")]
    pub class_name: Option<String>,

    /// Keep only this sex (e.g. "male")
    #[arg(long)]
    pub sex: Option<String>,

    /// Keep only this age group: child, young, adult or senior
    #[arg(long)]
    pub age_group: Option<AgeGroup>,

    /// Save the selected passengers as a JSON report to this path
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Export the selected passengers as CSV to this path
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

impl ScoreArg {
    fn selection(&self) -> Selection {
        Selection {
            top_k: self.top,
            class_name: self.class_name.clone(),
            sex: self.sex.clone(),
            age_group: self.age_group,
        }
    }
}

#[derive(Debug, Serialize)]
struct ScoreReport<'a> {
    generated_at: DateTime<Utc>,
    manifest: String,
    selection: &'a Selection,
    /// Passengers that received a score
    scored: usize,
    /// Passengers dropped for missing age
    excluded_without_age: usize,
    passengers: &'a [&'a ScoredPassenger],
}

pub(crate) fn run(arg: &ScoreArg) -> anyhow::Result<()> {
    let passengers = manifest::read_manifest_file(&arg.manifest)?;
    let ranking = AdvantageRanking::from_passengers(&passengers)?;

    let selection = arg.selection();
    let selected = ranking.select(&selection);
    tracing::debug!(?selection, selected = selected.len(), "applied selection");

    println!("Survival Advantage Ranking ({})", arg.manifest.display());
    println!("==========================================\n");

    table::print_legend();
    println!();

    print_overview(&ranking, selected.len());
    println!();

    if selected.is_empty() {
        println!("No passengers match the selection");
    } else {
        table::print_score_table(&selected);
    }

    if let Some(path) = &arg.output {
        let report = ScoreReport {
            generated_at: Utc::now(),
            manifest: arg.manifest.display().to_string(),
            selection: &selection,
            scored: ranking.len(),
            excluded_without_age: ranking.excluded_without_age,
            passengers: &selected,
        };
        Output::save_json(&report, path)?;
        println!("\nReport saved to: {}", path.display());
    }

    if let Some(path) = &arg.csv {
        Output::save_csv(path, &ScoredPassenger::FIELD_NAMES, selected.iter().copied())?;
        println!("\nCSV saved to: {}", path.display());
    }

    Ok(())
}

fn print_overview(ranking: &AdvantageRanking, num_selected: usize) {
    println!("Overview:");
    println!(
        "  Scored: {} passengers ({} excluded for missing age)",
        ranking.len(),
        ranking.excluded_without_age
    );
    if let Some(first) = ranking.passengers.first() {
        println!(
            "  Baseline survival rate: {}",
            util::percent(first.overall_survival_rate)
        );
    }
    println!("  Selected: {num_selected} passengers");
}

#[cfg(test)]
mod tests {
    use lifeboat_analysis::passenger::PassengerRecord;

    use super::*;

    fn ranking() -> AdvantageRanking {
        let passengers = [
            (1, "Third", "male", Some(20.0), 1),
            (2, "Third", "male", Some(60.0), 0),
            (3, "First", "female", Some(35.0), 1),
            (4, "First", "female", None, 1),
        ]
        .into_iter()
        .map(|(id, class, sex, age, survived)| {
            PassengerRecord::new(id, class, sex, age, survived).unwrap()
        })
        .collect::<Vec<_>>();
        AdvantageRanking::from_passengers(&passengers).unwrap()
    }

    #[test]
    fn test_report_records_selection_and_counts() {
        let ranking = ranking();
        let selection = Selection::default().with_sex("male");
        let selected = ranking.select(&selection);
        let report = ScoreReport {
            generated_at: Utc::now(),
            manifest: "train.csv".to_owned(),
            selection: &selection,
            scored: ranking.len(),
            excluded_without_age: ranking.excluded_without_age,
            passengers: &selected,
        };

        let value = serde_json::to_value(&report).unwrap();
        assert!(value["generated_at"].is_string());
        assert_eq!(value["selection"]["sex"], "male");
        assert_eq!(value["scored"], 3);
        assert_eq!(value["excluded_without_age"], 1);
        let ids = value["passengers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["passenger_id"].as_u64().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&1) && ids.contains(&2));
    }
}
