//! Filtering ranked output
//!
//! A [`Selection`] is a conjunction of optional predicates over scored
//! passengers: a rank cutoff and exact matches on class, sex and age group.
//! An empty selection matches everything.
//!
//! The rank cutoff follows `advantage_rank <= k`, so a tie straddling the
//! cutoff is returned in full and the result can hold more than `k` rows.
//!
//! # Examples
//!
//! ```
//! use lifeboat_analysis::{age_group::AgeGroup, selection::Selection};
//!
//! // The "senior, Third class, male" diagnostic subset
//! let selection = Selection::default()
//!     .with_class("Third")
//!     .with_sex("male")
//!     .with_age_group(AgeGroup::Senior);
//! assert!(selection.top_k.is_none());
//!
//! let top_ten = Selection::top(10);
//! assert_eq!(top_ten.top_k, Some(10));
//! ```

use serde::{Deserialize, Serialize};

use crate::{age_group::AgeGroup, scorer::ScoredPassenger};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Keep passengers with `advantage_rank <= top_k`
    pub top_k: Option<usize>,
    pub class_name: Option<String>,
    pub sex: Option<String>,
    pub age_group: Option<AgeGroup>,
}

impl Selection {
    /// Selection keeping ranks `1..=k`.
    #[must_use]
    pub fn top(k: usize) -> Self {
        Self {
            top_k: Some(k),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k = Some(k);
        self
    }

    #[must_use]
    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    #[must_use]
    pub fn with_sex(mut self, sex: impl Into<String>) -> Self {
        self.sex = Some(sex.into());
        self
    }

    #[must_use]
    pub fn with_age_group(mut self, age_group: AgeGroup) -> Self {
        self.age_group = Some(age_group);
        self
    }

    #[must_use]
    pub fn matches(&self, passenger: &ScoredPassenger) -> bool {
        self.top_k.is_none_or(|k| passenger.advantage_rank <= k)
            && self
                .class_name
                .as_ref()
                .is_none_or(|class| *class == passenger.class_name)
            && self.sex.as_ref().is_none_or(|sex| *sex == passenger.sex)
            && self
                .age_group
                .is_none_or(|group| group == passenger.age_group)
    }

    /// Matching passengers sorted by ascending rank.
    ///
    /// Passengers sharing a rank keep their relative input order.
    #[must_use]
    pub fn apply<'a>(&self, passengers: &'a [ScoredPassenger]) -> Vec<&'a ScoredPassenger> {
        let mut selected = passengers
            .iter()
            .filter(|p| self.matches(p))
            .collect::<Vec<_>>();
        selected.sort_by_key(|p| p.advantage_rank);
        selected
    }
}
