//! Survival-advantage scoring
//!
//! Scores each passenger by how surprising their outcome was given three
//! independent demographic baselines, then ranks passengers by that score.
//!
//! # Algorithm
//!
//! 1. **Filter**: drop passengers without a recorded age
//! 2. **Bin**: assign each remaining passenger an [`AgeGroup`]
//! 3. **Baselines**: mean of `survived` per class, per sex and per age group,
//!    broadcast back onto every member of the group; plus the overall mean
//!    (informational only). All baselines are computed over the same
//!    filtered set.
//! 4. **Score**:
//!
//!    ```text
//!    survival_advantage = (survived - class_rate)
//!                       + (survived - sex_rate)
//!                       + (survived - age_rate)
//!    ```
//!
//! 5. **Rank**: descending by score; ties share a rank and the next distinct
//!    score skips ahead by the size of the tie (SQL `RANK()`)
//!
//! For a survivor, a higher score means survival was *less* expected. For a
//! non-survivor, a more negative score means death was less expected. Every
//! term is `actual - expected`, so the score lies in `[-3, 3]`.
//!
//! The order of passengers with exactly equal scores is not specified.
//!
//! # Examples
//!
//! ```
//! use lifeboat_analysis::{passenger::PassengerRecord, scorer::AdvantageRanking};
//!
//! let passengers = vec![
//!     PassengerRecord::new(1, "Third", "male", Some(20.0), 1).unwrap(),
//!     PassengerRecord::new(2, "Third", "male", Some(60.0), 0).unwrap(),
//!     PassengerRecord::new(3, "First", "female", None, 1).unwrap(),
//! ];
//!
//! let ranking = AdvantageRanking::from_passengers(&passengers).unwrap();
//! assert_eq!(ranking.excluded_without_age, 1);
//! assert_eq!(ranking.passengers[0].passenger_id, 1);
//! assert_eq!(ranking.passengers[0].advantage_rank, 1);
//! assert_eq!(ranking.passengers[1].advantage_rank, 2);
//! ```

use lifeboat_stats::{group::GroupMeans, rank::competition_rank};
use serde::{Deserialize, Serialize};

use crate::{
    age_group::AgeGroup,
    passenger::{self, PassengerRecord, ValidationError},
    selection::Selection,
};

/// A passenger annotated with baselines, advantage score and rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPassenger {
    pub passenger_id: u32,
    pub class_name: String,
    pub sex: String,
    pub age: f64,
    pub survived: u8,
    pub age_group: AgeGroup,
    /// Survival rate of passengers sharing this class
    pub class_survival_rate: f64,
    /// Survival rate of passengers sharing this sex
    pub sex_survival_rate: f64,
    /// Survival rate of passengers sharing this age group
    pub age_survival_rate: f64,
    /// Survival rate of all scored passengers
    pub overall_survival_rate: f64,
    pub survival_advantage: f64,
    /// 1-based rank by descending `survival_advantage`, ties sharing a rank
    pub advantage_rank: usize,
}

impl ScoredPassenger {
    /// Serialized field names in declaration order, used as the CSV header.
    pub const FIELD_NAMES: [&'static str; 12] = [
        "passenger_id",
        "class_name",
        "sex",
        "age",
        "survived",
        "age_group",
        "class_survival_rate",
        "sex_survival_rate",
        "age_survival_rate",
        "overall_survival_rate",
        "survival_advantage",
        "advantage_rank",
    ];
}

/// Scored passengers in rank order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdvantageRanking {
    /// Scored passengers sorted by ascending `advantage_rank`
    pub passengers: Vec<ScoredPassenger>,
    /// Number of input passengers dropped because their age is missing
    pub excluded_without_age: usize,
}

struct Eligible<'a> {
    record: &'a PassengerRecord,
    age: f64,
    age_group: AgeGroup,
}

impl Eligible<'_> {
    fn survived(&self) -> f64 {
        f64::from(self.record.survived)
    }
}

impl AdvantageRanking {
    /// Validates the manifest, then scores and ranks every passenger with a
    /// recorded age.
    ///
    /// An input with no aged passengers yields an empty ranking.
    pub fn from_passengers(passengers: &[PassengerRecord]) -> Result<Self, ValidationError> {
        passenger::validate_manifest(passengers)?;

        let eligible = passengers
            .iter()
            .filter_map(|record| {
                record.age.map(|age| Eligible {
                    record,
                    age,
                    age_group: AgeGroup::from_age(age),
                })
            })
            .collect::<Vec<_>>();
        let excluded_without_age = passengers.len() - eligible.len();

        let (class_means, class_rates) = GroupMeans::broadcast(
            eligible
                .iter()
                .map(|e| (e.record.class_name.as_str(), e.survived())),
        );
        let (sex_means, sex_rates) =
            GroupMeans::broadcast(eligible.iter().map(|e| (e.record.sex.as_str(), e.survived())));
        let (age_means, age_rates) =
            GroupMeans::broadcast(eligible.iter().map(|e| (e.age_group, e.survived())));

        let Some(overall_rate) = class_means.overall_mean() else {
            tracing::info!(excluded_without_age, "no passengers with a recorded age to score");
            return Ok(Self {
                passengers: vec![],
                excluded_without_age,
            });
        };

        log_baselines("class", &class_means);
        log_baselines("sex", &sex_means);
        log_baselines("age_group", &age_means);

        let scores = eligible
            .iter()
            .zip(&class_rates)
            .zip(&sex_rates)
            .zip(&age_rates)
            .map(|(((e, class_rate), sex_rate), age_rate)| {
                let survived = e.survived();
                (survived - class_rate) + (survived - sex_rate) + (survived - age_rate)
            })
            .collect::<Vec<_>>();

        let ranking = competition_rank(&scores);
        let passengers = ranking
            .order
            .iter()
            .map(|&i| {
                let e = &eligible[i];
                ScoredPassenger {
                    passenger_id: e.record.passenger_id,
                    class_name: e.record.class_name.clone(),
                    sex: e.record.sex.clone(),
                    age: e.age,
                    survived: e.record.survived,
                    age_group: e.age_group,
                    class_survival_rate: class_rates[i],
                    sex_survival_rate: sex_rates[i],
                    age_survival_rate: age_rates[i],
                    overall_survival_rate: overall_rate,
                    survival_advantage: scores[i],
                    advantage_rank: ranking.ranks[i],
                }
            })
            .collect::<Vec<_>>();

        tracing::info!(
            scored = passengers.len(),
            excluded_without_age,
            overall_rate,
            "ranked passengers by survival advantage"
        );

        Ok(Self {
            passengers,
            excluded_without_age,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.passengers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.passengers.is_empty()
    }

    /// Scored passengers matching `selection`, in rank order.
    #[must_use]
    pub fn select(&self, selection: &Selection) -> Vec<&ScoredPassenger> {
        selection.apply(&self.passengers)
    }
}

fn log_baselines<K>(partition: &str, means: &GroupMeans<K>)
where
    K: Ord + std::fmt::Display,
{
    for (key, acc) in means {
        tracing::debug!(
            partition,
            group = %key,
            passengers = acc.count,
            rate = ?acc.mean(),
            "survival baseline"
        );
    }
}
