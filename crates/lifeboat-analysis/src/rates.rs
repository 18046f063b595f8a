//! Survival rate aggregation by demographic group
//!
//! This module answers the manifest's basic descriptive questions: what
//! fraction of passengers survived, broken down by class, by sex, by age
//! group, and by class and sex together.
//!
//! Unlike the scorer, these aggregations cover every passenger, including
//! those without a recorded age (reported under [`AgeGroup::Unknown`]).
//!
//! # Examples
//!
//! ## Group by an arbitrary key
//!
//! ```
//! use lifeboat_analysis::{passenger::PassengerRecord, rates::SurvivalRateMap};
//!
//! let passengers = vec![
//!     PassengerRecord::new(1, "Third", "male", Some(22.0), 0).unwrap(),
//!     PassengerRecord::new(2, "First", "female", Some(38.0), 1).unwrap(),
//!     PassengerRecord::new(3, "Third", "female", Some(26.0), 1).unwrap(),
//! ];
//!
//! let by_sex = SurvivalRateMap::collect_by_group(&passengers, |p| p.sex.clone());
//! assert_eq!(by_sex.map["female"].rate, 1.0);
//! assert_eq!(by_sex.map["male"].survivors, 0);
//! ```
//!
//! ## Full report
//!
//! ```
//! use lifeboat_analysis::{passenger::PassengerRecord, rates::SurvivalRateReport};
//!
//! let passengers = vec![
//!     PassengerRecord::new(1, "Third", "male", None, 0).unwrap(),
//!     PassengerRecord::new(2, "First", "female", Some(38.0), 1).unwrap(),
//! ];
//! let report = SurvivalRateReport::from_passengers(&passengers).unwrap();
//! assert_eq!(report.overall.unwrap().rate, 0.5);
//! assert_eq!(report.by_class_and_sex.map.len(), 2);
//! ```

use std::collections::BTreeMap;

use lifeboat_stats::group::{GroupAccumulator, GroupMeans};
use serde::{Serialize, Serializer};

use crate::{
    age_group::AgeGroup,
    passenger::{self, PassengerRecord, ValidationError},
};

/// Survival counts and rate for one group of passengers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SurvivalRate {
    /// Number of passengers in the group
    pub passengers: usize,
    /// Number of survivors in the group
    pub survivors: usize,
    /// `survivors / passengers`
    pub rate: f64,
}

impl SurvivalRate {
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn from_accumulator(acc: &GroupAccumulator) -> Option<Self> {
        Some(Self {
            passengers: acc.count,
            // sum of 0/1 indicators is an exact small integer
            survivors: acc.sum as usize,
            rate: acc.mean()?,
        })
    }
}

/// Survival rates keyed by group, in key order.
#[derive(Debug, Clone)]
pub struct SurvivalRateMap<K> {
    pub map: BTreeMap<K, SurvivalRate>,
}

impl<K> SurvivalRateMap<K> {
    /// Collect survival rates grouped by a custom key
    ///
    /// Only keys produced for at least one passenger appear in the result.
    pub fn collect_by_group<F>(passengers: &[PassengerRecord], mut group: F) -> Self
    where
        F: FnMut(&PassengerRecord) -> K,
        K: Ord,
    {
        let means = GroupMeans::from_pairs(
            passengers
                .iter()
                .map(|p| (group(p), f64::from(p.survived))),
        );
        Self {
            map: means
                .into_groups()
                .filter_map(|(key, acc)| SurvivalRate::from_accumulator(&acc).map(|r| (key, r)))
                .collect(),
        }
    }
}

impl<K> Serialize for SurvivalRateMap<K>
where
    K: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(Serialize)]
        struct Entry<'a, K> {
            group: &'a K,
            #[serde(flatten)]
            rate: &'a SurvivalRate,
        }

        serializer.collect_seq(self.map.iter().map(|(group, rate)| Entry { group, rate }))
    }
}

/// Survival rates over the whole manifest and its standard breakdowns.
#[derive(Debug, Clone, Serialize)]
pub struct SurvivalRateReport {
    /// Rate over every passenger (`None` for an empty manifest)
    pub overall: Option<SurvivalRate>,
    pub by_class: SurvivalRateMap<String>,
    pub by_sex: SurvivalRateMap<String>,
    pub by_age_group: SurvivalRateMap<AgeGroup>,
    pub by_class_and_sex: SurvivalRateMap<(String, String)>,
}

impl SurvivalRateReport {
    /// Validates the manifest and computes every breakdown.
    pub fn from_passengers(passengers: &[PassengerRecord]) -> Result<Self, ValidationError> {
        passenger::validate_manifest(passengers)?;

        let overall = SurvivalRateMap::collect_by_group(passengers, |_| ())
            .map
            .remove(&());

        let report = Self {
            overall,
            by_class: SurvivalRateMap::collect_by_group(passengers, |p| p.class_name.clone()),
            by_sex: SurvivalRateMap::collect_by_group(passengers, |p| p.sex.clone()),
            by_age_group: SurvivalRateMap::collect_by_group(passengers, PassengerRecord::age_group),
            by_class_and_sex: SurvivalRateMap::collect_by_group(passengers, |p| {
                (p.class_name.clone(), p.sex.clone())
            }),
        };

        tracing::debug!(
            passengers = passengers.len(),
            classes = report.by_class.map.len(),
            sexes = report.by_sex.map.len(),
            "computed survival rate report"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> Vec<PassengerRecord> {
        [
            (1, "Third", "male", Some(22.0), 0),
            (2, "First", "female", Some(38.0), 1),
            (3, "Third", "female", Some(26.0), 1),
            (4, "First", "female", Some(35.0), 1),
            (5, "Third", "male", Some(35.0), 0),
            (6, "Third", "male", None, 0),
            (7, "First", "male", Some(54.0), 0),
            (8, "Third", "male", Some(2.0), 0),
            (9, "Third", "female", Some(27.0), 1),
            (10, "Second", "female", Some(14.0), 1),
        ]
        .into_iter()
        .map(|(id, class, sex, age, survived)| {
            PassengerRecord::new(id, class, sex, age, survived).unwrap()
        })
        .collect()
    }

    #[test]
    fn test_overall_rate() {
        let report = SurvivalRateReport::from_passengers(&manifest()).unwrap();
        let overall = report.overall.unwrap();
        assert_eq!(overall.passengers, 10);
        assert_eq!(overall.survivors, 5);
        assert_eq!(overall.rate, 0.5);
    }

    #[test]
    fn test_rates_by_class() {
        let report = SurvivalRateReport::from_passengers(&manifest()).unwrap();
        let classes = report.by_class.map.keys().cloned().collect::<Vec<_>>();
        assert_eq!(classes, vec!["First", "Second", "Third"]);

        let third = report.by_class.map["Third"];
        assert_eq!(third.passengers, 6);
        assert_eq!(third.survivors, 2);
        assert!((third.rate - 2.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_age_is_reported() {
        let report = SurvivalRateReport::from_passengers(&manifest()).unwrap();
        let unknown = report.by_age_group.map[&AgeGroup::Unknown];
        assert_eq!(unknown.passengers, 1);
        assert_eq!(unknown.rate, 0.0);
        assert_eq!(
            report.by_age_group.map.keys().copied().collect::<Vec<_>>(),
            vec![
                AgeGroup::Child,
                AgeGroup::Young,
                AgeGroup::Adult,
                AgeGroup::Unknown
            ]
        );
    }

    #[test]
    fn test_class_and_sex_breakdown() {
        let report = SurvivalRateReport::from_passengers(&manifest()).unwrap();
        let key = ("Third".to_owned(), "female".to_owned());
        assert_eq!(report.by_class_and_sex.map[&key].rate, 1.0);
        let key = ("Third".to_owned(), "male".to_owned());
        assert_eq!(report.by_class_and_sex.map[&key].survivors, 0);
    }

    #[test]
    fn test_empty_manifest() {
        let report = SurvivalRateReport::from_passengers(&[]).unwrap();
        assert!(report.overall.is_none());
        assert!(report.by_class.map.is_empty());
    }

    #[test]
    fn test_invalid_manifest_is_rejected() {
        let mut passengers = manifest();
        passengers[3].passenger_id = 1;
        assert_eq!(
            SurvivalRateReport::from_passengers(&passengers).unwrap_err(),
            ValidationError::DuplicatePassengerId { passenger_id: 1 }
        );
    }

    #[test]
    fn test_serializes_as_rows() {
        let passengers = manifest();
        let by_sex = SurvivalRateMap::collect_by_group(&passengers, |p| p.sex.clone());
        let json = serde_json::to_value(&by_sex).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "group": "female", "passengers": 5, "survivors": 5, "rate": 1.0 },
                { "group": "male", "passengers": 5, "survivors": 0, "rate": 0.0 },
            ])
        );
    }
}
