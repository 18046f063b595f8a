//! Statistical primitives for the Lifeboat project.
//!
//! This crate provides the small set of reductions the manifest analysis is
//! built from:
//!
//! - **Descriptive statistics**: Calculate mean, median, variance, standard deviation, etc.
//! - **Threshold binning**: Assign continuous values to fixed, half-open bins
//! - **Group means**: Group-by-then-broadcast averaging keyed by any ordered label
//! - **Competition ranking**: Rank scores with ties sharing a rank (SQL `RANK()`)
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`binning`]: Fixed-edge binning of continuous values
//! - [`group`]: Per-group means with broadcast lookup
//! - [`rank`]: Sort-and-scan ranking with gaps after ties
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use lifeboat_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```
//!
//! ## Binning values by fixed thresholds
//!
//! ```
//! use lifeboat_stats::binning::ThresholdBins;
//!
//! let bins = ThresholdBins::new(vec![12.0, 30.0, 55.0]).unwrap();
//! assert_eq!(bins.bin_index(11.9), 0);
//! assert_eq!(bins.bin_index(12.0), 1);
//! assert_eq!(bins.bin_index(80.0), 3);
//! ```
//!
//! ## Computing group means
//!
//! ```
//! use lifeboat_stats::group::GroupMeans;
//!
//! let means = GroupMeans::from_pairs([("a", 1.0), ("a", 0.0), ("b", 1.0)]);
//! assert_eq!(means.mean_of(&"a"), Some(0.5));
//! assert_eq!(means.mean_of(&"c"), None);
//! ```
//!
//! ## Ranking scores
//!
//! ```
//! use lifeboat_stats::rank::competition_rank;
//!
//! let ranking = competition_rank(&[0.5, 2.0, 2.0, -1.0]);
//! assert_eq!(ranking.ranks, vec![3, 1, 1, 4]);
//! ```

pub mod binning;
pub mod descriptive;
pub mod group;
pub mod rank;
