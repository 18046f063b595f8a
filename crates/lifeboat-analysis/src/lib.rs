//! Survival analysis of a passenger manifest
//!
//! This crate turns validated passenger records into survival statistics and
//! a per-passenger "survival advantage" ranking.
//!
//! # Overview
//!
//! ## Survival Rate Workflow
//!
//! Describe who survived:
//!
//! 1. **Validate Records** ([`passenger::PassengerRecord`]): One row per passenger
//! 2. **Aggregate** ([`rates::SurvivalRateReport`]): Survival rates by class, sex,
//!    age group, and class × sex
//!
//! ## Survival Advantage Workflow
//!
//! Find whose outcome was least expected:
//!
//! 1. **Validate Records** ([`passenger::PassengerRecord`])
//! 2. **Score and Rank** ([`scorer::AdvantageRanking`]): Compare each passenger's
//!    outcome against class, sex and age-group baselines
//! 3. **Select** ([`selection::Selection`]): Top-K or demographic subsets of the
//!    ranking
//!
//! # Examples
//!
//! ```
//! use lifeboat_analysis::{
//!     age_group::AgeGroup, passenger::PassengerRecord, rates::SurvivalRateReport,
//!     scorer::AdvantageRanking, selection::Selection,
//! };
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let passengers = vec![
//!     PassengerRecord::new(1, "Third", "male", Some(22.0), 0)?,
//!     PassengerRecord::new(2, "First", "female", Some(38.0), 1)?,
//!     PassengerRecord::new(3, "Third", "female", Some(26.0), 1)?,
//!     PassengerRecord::new(4, "Third", "male", Some(62.0), 0)?,
//!     PassengerRecord::new(5, "Third", "male", None, 0)?,
//! ];
//!
//! let report = SurvivalRateReport::from_passengers(&passengers)?;
//! println!("Overall survival: {:?}", report.overall);
//!
//! let ranking = AdvantageRanking::from_passengers(&passengers)?;
//! for p in ranking.select(&Selection::top(3)) {
//!     println!("#{} passenger {} ({:+.3})", p.advantage_rank, p.passenger_id, p.survival_advantage);
//! }
//!
//! let seniors = ranking.select(&Selection::default().with_age_group(AgeGroup::Senior));
//! assert_eq!(seniors.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod age_group;
pub mod passenger;
pub mod rates;
pub mod scorer;
pub mod selection;
