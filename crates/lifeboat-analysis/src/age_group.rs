//! Fixed age groups
//!
//! Ages are discretized into four groups with constant thresholds:
//!
//! ```text
//! child   age < 12
//! young   12 <= age < 30
//! adult   30 <= age < 55
//! senior  age >= 55
//! ```
//!
//! A fifth value, [`AgeGroup::Unknown`], stands for a missing age. It shows up
//! in descriptive reports but never in scored output, because the scorer drops
//! passengers without an age before binning.

use lifeboat_stats::binning;
use serde::{Deserialize, Serialize};

/// Lower edges of `young`, `adult` and `senior`.
pub const AGE_GROUP_EDGES: [f64; 3] = [12.0, 30.0, 55.0];

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(rename_all = "lowercase")]
pub enum AgeGroup {
    #[display("child")]
    Child,
    #[display("young")]
    Young,
    #[display("adult")]
    Adult,
    #[display("senior")]
    Senior,
    #[display("unknown")]
    Unknown,
}

impl AgeGroup {
    /// Groups a known age can fall into, in bin order.
    pub const BINNED: [Self; 4] = [Self::Child, Self::Young, Self::Adult, Self::Senior];

    /// Returns the group for a known age.
    ///
    /// # Examples
    ///
    /// ```
    /// use lifeboat_analysis::age_group::AgeGroup;
    ///
    /// assert_eq!(AgeGroup::from_age(11.5), AgeGroup::Child);
    /// assert_eq!(AgeGroup::from_age(12.0), AgeGroup::Young);
    /// assert_eq!(AgeGroup::from_age(30.0), AgeGroup::Adult);
    /// assert_eq!(AgeGroup::from_age(55.0), AgeGroup::Senior);
    /// ```
    #[must_use]
    pub fn from_age(age: f64) -> Self {
        Self::BINNED[binning::bin_index(&AGE_GROUP_EDGES, age)]
    }

    /// Returns the group for an optional age, [`AgeGroup::Unknown`] if absent.
    #[must_use]
    pub fn from_optional_age(age: Option<f64>) -> Self {
        age.map_or(Self::Unknown, Self::from_age)
    }

    #[must_use]
    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }
}
