//! Per-component view of a relevance score.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The raw signals behind a score and their weighted total.
///
/// Components are unweighted; `total` applies the request's coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScoreBreakdown {
    /// Interest match in `0.0..=1.0`.
    pub interest_match: f64,
    /// Catalog popularity in `0.0..=1.0`.
    pub popularity: f64,
    /// Novelty in `0.0..=1.0`; `0.0` without a novelty table.
    pub novelty: f64,
    /// Distance from the scoring location, in kilometres.
    pub distance_km: f64,
    /// Weighted score.
    pub total: f64,
}

impl fmt::Display for ScoreBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "score {:.3} (interest {:.2}, popularity {:.2}, novelty {:.2}, {:.2} km)",
            self.total, self.interest_match, self.popularity, self.novelty, self.distance_km
        )
    }
}
