//! Fixed-threshold binning for continuous values
//!
//! This module assigns continuous values (such as ages) to a fixed set of
//! bins described by their interior edges. Unlike data-driven binning, the
//! edges are constants chosen up front, so the same value always lands in
//! the same bin regardless of the rest of the dataset.
//!
//! # Bin Layout
//!
//! `n` strictly increasing edges describe `n + 1` half-open bins:
//!
//! ```text
//! bin 0:   (-inf,      edges[0])
//! bin i:   [edges[i-1], edges[i])
//! bin n:   [edges[n-1], +inf)
//! ```
//!
//! Each bin includes its lower edge and excludes its upper edge.
//!
//! # Examples
//!
//! ```
//! use lifeboat_stats::binning::ThresholdBins;
//!
//! let bins = ThresholdBins::new(vec![12.0, 30.0, 55.0]).unwrap();
//! assert_eq!(bins.num_bins(), 4);
//!
//! // Values exactly on an edge belong to the upper bin
//! assert_eq!(bins.bin_index(30.0), 2);
//! assert_eq!(bins.bin_index(29.99), 1);
//! ```

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum BinningError {
    #[display("bin edge #{index} is not finite: {value}")]
    NonFiniteEdge { index: usize, value: f64 },
    #[display("bin edges must be strictly increasing, but #{index} ({value}) <= {previous}")]
    NotIncreasing {
        index: usize,
        value: f64,
        previous: f64,
    },
}

/// Half-open bins described by strictly increasing interior edges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdBins {
    edges: Vec<f64>,
}

impl ThresholdBins {
    /// Creates bins from interior edges.
    ///
    /// An empty edge list is allowed and describes a single bin covering
    /// every value.
    ///
    /// # Errors
    ///
    /// Returns [`BinningError`] if an edge is NaN or infinite, or if the
    /// edges are not strictly increasing.
    ///
    /// # Examples
    ///
    /// ```
    /// use lifeboat_stats::binning::{BinningError, ThresholdBins};
    ///
    /// assert!(ThresholdBins::new(vec![1.0, 2.0]).is_ok());
    /// assert!(matches!(
    ///     ThresholdBins::new(vec![2.0, 1.0]),
    ///     Err(BinningError::NotIncreasing { index: 1, .. })
    /// ));
    /// ```
    pub fn new(edges: Vec<f64>) -> Result<Self, BinningError> {
        for (index, &value) in edges.iter().enumerate() {
            if !value.is_finite() {
                return Err(BinningError::NonFiniteEdge { index, value });
            }
            if index > 0 && value <= edges[index - 1] {
                return Err(BinningError::NotIncreasing {
                    index,
                    value,
                    previous: edges[index - 1],
                });
            }
        }
        Ok(Self { edges })
    }

    /// Interior edges in ascending order.
    #[must_use]
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Number of bins (`edges.len() + 1`).
    #[must_use]
    pub fn num_bins(&self) -> usize {
        self.edges.len() + 1
    }

    /// Returns the index of the bin containing `value`.
    ///
    /// NaN compares as greater than every edge and therefore lands in the
    /// last bin; callers that can see NaN should reject it beforehand.
    #[must_use]
    pub fn bin_index(&self, value: f64) -> usize {
        bin_index(&self.edges, value)
    }
}

/// Returns the index of the half-open bin containing `value` for edges that
/// are already known to be finite and strictly increasing.
///
/// This is the borrowing counterpart of [`ThresholdBins::bin_index`] for
/// edges kept in a constant.
///
/// # Examples
///
/// ```
/// use lifeboat_stats::binning::bin_index;
///
/// const EDGES: [f64; 2] = [0.0, 10.0];
/// assert_eq!(bin_index(&EDGES, -1.0), 0);
/// assert_eq!(bin_index(&EDGES, 0.0), 1);
/// assert_eq!(bin_index(&EDGES, 10.0), 2);
/// ```
#[must_use]
pub fn bin_index(edges: &[f64], value: f64) -> usize {
    debug_assert!(edges.is_sorted_by(|a, b| a < b), "edges must be strictly increasing");
    if value.is_nan() {
        return edges.len();
    }
    edges.partition_point(|&edge| edge <= value)
}
