//! Competition ranking ("1224" ranking)
//!
//! Ranks scores in descending order. Equal scores share a rank, and the next
//! distinct score skips ahead by the size of the tie group, matching SQL's
//! `RANK() OVER (ORDER BY score DESC)`:
//!
//! ```text
//! score:  2.0  2.0  2.0  0.5  0.5  -1.0
//! rank:     1    1    1    4    4     6
//! ```
//!
//! The ranking is computed by sort-and-scan: sort indices by descending
//! score, walk the sorted sequence, and only advance the rank when the score
//! changes.

/// Result of ranking a slice of scores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranking {
    /// Input indices sorted by descending score.
    ///
    /// The relative order of tied scores is not part of the contract.
    pub order: Vec<usize>,
    /// Rank of each input position (`ranks[i]` is the rank of `scores[i]`).
    /// Ranks start at 1.
    pub ranks: Vec<usize>,
}

/// Ranks `scores` in descending order with ties sharing a rank.
///
/// Scores are compared with [`f64::total_cmp`] for ordering and `==` for
/// tie detection; NaN scores are never tied with anything.
///
/// # Examples
///
/// ```
/// use lifeboat_stats::rank::competition_rank;
///
/// let ranking = competition_rank(&[0.5, 2.0, 2.0, 2.0, 0.5, -1.0]);
/// assert_eq!(ranking.ranks, vec![4, 1, 1, 1, 4, 6]);
/// assert_eq!(ranking.order.last(), Some(&5));
/// ```
#[must_use]
pub fn competition_rank(scores: &[f64]) -> Ranking {
    let mut order = (0..scores.len()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    let mut ranks = vec![0; scores.len()];
    let mut current_rank = 0;
    let mut previous: Option<f64> = None;

    for (position, &index) in order.iter().enumerate() {
        let score = scores[index];
        if previous != Some(score) {
            current_rank = position + 1;
            previous = Some(score);
        }
        ranks[index] = current_rank;
    }

    Ranking { order, ranks }
}
