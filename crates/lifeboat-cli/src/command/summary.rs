//! Manifest summary command
//!
//! Counts, survivors, missing ages and the distribution of recorded ages,
//! both as descriptive statistics and as a per-decade histogram with the
//! survival rate of each decade.

use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Args;
use lifeboat_analysis::{age_group::AgeGroup, passenger::PassengerRecord};
use lifeboat_stats::{binning::ThresholdBins, descriptive::DescriptiveStats, group::GroupMeans};
use serde::Serialize;

use crate::{
    manifest,
    util::{self, Output},
};

const HISTOGRAM_WIDTH: usize = 40;
const OLDEST_BIN_START: f64 = 80.0;

#[derive(Debug, Clone, Args)]
pub(crate) struct SummaryArg {
    /// Path to the passenger manifest CSV file
    pub manifest: PathBuf,

    /// Width of age histogram bins, in years (the last bin is always 80+)
    #[arg(long, default_value_t = 10)]
    pub bin_width: u32,

    /// Also save the summary as JSON to this path
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct AgeBin {
    label: String,
    passengers: usize,
    survivors: usize,
    survival_rate: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
struct ManifestSummary {
    generated_at: DateTime<Utc>,
    manifest: String,
    passengers: usize,
    survivors: usize,
    missing_age: usize,
    age: Option<DescriptiveStats>,
    age_groups: Vec<(AgeGroup, usize)>,
    age_distribution: Vec<AgeBin>,
}

pub(crate) fn run(arg: &SummaryArg) -> anyhow::Result<()> {
    let passengers = manifest::read_manifest_file(&arg.manifest)?;
    let bins = decade_bins(arg.bin_width)?;

    let summary = ManifestSummary {
        generated_at: Utc::now(),
        manifest: arg.manifest.display().to_string(),
        passengers: passengers.len(),
        survivors: passengers.iter().filter(|p| p.has_survived()).count(),
        missing_age: passengers.iter().filter(|p| p.age.is_none()).count(),
        age: DescriptiveStats::new(passengers.iter().filter_map(|p| p.age)),
        age_groups: count_age_groups(&passengers),
        age_distribution: age_distribution(&passengers, &bins),
    };

    print_summary(&summary);

    if let Some(path) = &arg.output {
        Output::save_json(&summary, path)?;
        println!("\nSummary saved to: {}", path.display());
    }

    Ok(())
}

/// Bins of `width` years starting at zero, closed by a final 80+ bin.
///
/// The bin just below 80 is narrower when `width` does not divide 80.
fn decade_bins(width: u32) -> anyhow::Result<ThresholdBins> {
    anyhow::ensure!(width > 0, "Bin width must be positive");
    let mut edges = (1..)
        .map(|i| f64::from(width * i))
        .take_while(|&edge| edge < OLDEST_BIN_START)
        .collect::<Vec<_>>();
    edges.push(OLDEST_BIN_START);
    ThresholdBins::new(edges).context("Failed to build age bins")
}

fn bin_label(bins: &ThresholdBins, index: usize) -> String {
    let edges = bins.edges();
    match (index.checked_sub(1).map(|i| edges[i]), edges.get(index)) {
        (None, Some(upper)) => format!("< {upper}"),
        (Some(lower), Some(upper)) => format!("{lower}-{upper}"),
        (Some(lower), None) => format!("{lower}+"),
        (None, None) => "all".to_owned(),
    }
}

fn count_age_groups(passengers: &[PassengerRecord]) -> Vec<(AgeGroup, usize)> {
    let groups = GroupMeans::from_pairs(passengers.iter().map(|p| (p.age_group(), 0.0)));
    groups.iter().map(|(group, acc)| (*group, acc.count)).collect()
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn age_distribution(passengers: &[PassengerRecord], bins: &ThresholdBins) -> Vec<AgeBin> {
    let by_bin = GroupMeans::from_pairs(
        passengers
            .iter()
            .filter_map(|p| p.age.map(|age| (bins.bin_index(age), f64::from(p.survived)))),
    );
    (0..bins.num_bins())
        .map(|index| {
            let acc = by_bin.group(&index).copied().unwrap_or_default();
            AgeBin {
                label: bin_label(bins, index),
                passengers: acc.count,
                survivors: acc.sum as usize,
                survival_rate: acc.mean(),
            }
        })
        .collect()
}

fn distribution_header() -> String {
    format!(
        "{:<8} {:>10} {:>10}  Histogram",
        "Age", "Passengers", "Rate"
    )
}

#[expect(clippy::cast_precision_loss)]
fn print_summary(summary: &ManifestSummary) {
    println!("Manifest Summary ({})", summary.manifest);
    println!("==========================================\n");

    println!("Passengers:");
    println!("  Total: {}", summary.passengers);
    if summary.passengers > 0 {
        println!(
            "  Survivors: {} ({})",
            summary.survivors,
            util::percent(summary.survivors as f64 / summary.passengers as f64)
        );
    }
    println!("  Missing age: {}", summary.missing_age);
    println!();

    println!("Age:");
    match &summary.age {
        Some(age) => {
            println!("  Min / Max: {:.2} / {:.2}", age.min, age.max);
            println!("  Mean: {:.2}", age.mean);
            println!("  Median: {:.2}", age.median);
            println!("  Std Dev: {:.2}", age.std_dev);
        }
        None => println!("  No recorded ages"),
    }
    println!();

    println!("Age Groups:");
    for (group, count) in &summary.age_groups {
        println!("  {:<10} {count:>6}", group.to_string());
    }
    println!();

    let max_count = summary
        .age_distribution
        .iter()
        .map(|bin| bin.passengers)
        .max()
        .unwrap_or(0);
    println!("Age Distribution:");
    let header = distribution_header();
    println!("  {header}");
    println!("  {}", "-".repeat(header.len()));
    for bin in &summary.age_distribution {
        let bar_len = (bin.passengers * HISTOGRAM_WIDTH)
            .checked_div(max_count)
            .unwrap_or(0);
        println!(
            "  {:<8} {:>10} {:>10}  {}",
            bin.label,
            bin.passengers,
            bin.survival_rate.map_or("N/A".to_owned(), util::percent),
            "#".repeat(bar_len)
        );
    }
}
