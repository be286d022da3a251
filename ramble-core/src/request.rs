//! Planning requests and their validation.

use geo::Coord;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{DEFAULT_WALKING_SPEED_KMH, NoveltyTable, Poi};

/// Coefficients of the relevance score.
///
/// `score = interest * match + popularity * popularity + novelty * novelty
/// - distance * km`.
///
/// # Examples
/// ```
/// use ramble_core::ScoringWeights;
///
/// let weights = ScoringWeights::default().with_distance(0.25);
/// assert_eq!(weights.interest, 0.5);
/// assert_eq!(weights.distance, 0.25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ScoringWeights {
    /// Weight of the interest match (α).
    pub interest: f64,
    /// Weight of POI popularity (β).
    pub popularity: f64,
    /// Weight of novelty (γ).
    pub novelty: f64,
    /// Penalty per kilometre from the current location (δ).
    pub distance: f64,
}

impl ScoringWeights {
    /// Default interest weight.
    pub const DEFAULT_INTEREST: f64 = 0.5;
    /// Default popularity weight.
    pub const DEFAULT_POPULARITY: f64 = 0.2;
    /// Default novelty weight.
    pub const DEFAULT_NOVELTY: f64 = 0.1;
    /// Default distance penalty per kilometre.
    pub const DEFAULT_DISTANCE: f64 = 0.1;

    /// Override the interest weight.
    #[must_use]
    pub const fn with_interest(mut self, weight: f64) -> Self {
        self.interest = weight;
        self
    }

    /// Override the popularity weight.
    #[must_use]
    pub const fn with_popularity(mut self, weight: f64) -> Self {
        self.popularity = weight;
        self
    }

    /// Override the novelty weight.
    #[must_use]
    pub const fn with_novelty(mut self, weight: f64) -> Self {
        self.novelty = weight;
        self
    }

    /// Override the distance penalty.
    #[must_use]
    pub const fn with_distance(mut self, weight: f64) -> Self {
        self.distance = weight;
        self
    }

    fn all_finite(&self) -> bool {
        [self.interest, self.popularity, self.novelty, self.distance]
            .iter()
            .all(|w| w.is_finite())
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            interest: Self::DEFAULT_INTEREST,
            popularity: Self::DEFAULT_POPULARITY,
            novelty: Self::DEFAULT_NOVELTY,
            distance: Self::DEFAULT_DISTANCE,
        }
    }
}

/// How a circular route budgets its walk back to the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ClosingLegPolicy {
    /// Select stops ignoring the walk home, then always append it. The
    /// finished route may exceed the budget by at most the closing leg.
    #[default]
    Lenient,
    /// Only select a stop if the walk home from it still fits, so the
    /// closing leg never exceeds the budget.
    Strict,
}

/// Errors returned by [`PlanningRequest::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInputError {
    /// Latitude or longitude is NaN or infinite.
    #[error("start coordinate must be finite, got lat {lat}, lng {lng}")]
    NonFiniteStart {
        /// Supplied latitude.
        lat: f64,
        /// Supplied longitude.
        lng: f64,
    },
    /// Latitude outside `[-90, 90]` or longitude outside `[-180, 180]`.
    #[error("start coordinate out of range: lat {lat}, lng {lng}")]
    StartOutOfRange {
        /// Supplied latitude.
        lat: f64,
        /// Supplied longitude.
        lng: f64,
    },
    /// Walking speed was zero, negative or non-finite.
    #[error("walking speed must be a positive finite km/h value, got {speed}")]
    InvalidWalkingSpeed {
        /// Supplied speed in km/h.
        speed: f64,
    },
    /// Duration budget was NaN.
    #[error("duration budget must be a number")]
    NonFiniteDuration,
    /// Visit override was negative or non-finite.
    #[error("visit duration override must be a non-negative finite value, got {minutes}")]
    InvalidVisitOverride {
        /// Supplied override in minutes.
        minutes: f64,
    },
    /// A scoring weight was NaN or infinite.
    #[error("scoring weights must be finite, got {weights:?}")]
    InvalidWeights {
        /// Supplied weights.
        weights: ScoringWeights,
    },
}

/// Parameters for a single planning call.
///
/// # Examples
/// ```
/// use ramble_core::{ClosingLegPolicy, PlanningRequest, lat_lng};
///
/// let request = PlanningRequest::new(lat_lng(54.4025, -1.7367), 90.0)
///     .with_walking_speed(4.5)
///     .with_circular(true);
/// assert!(request.validate().is_ok());
/// assert_eq!(request.closing_leg, ClosingLegPolicy::Lenient);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanningRequest {
    /// Where the walk begins.
    pub start: Coord<f64>,
    /// Total time budget in minutes.
    pub duration_minutes: f64,
    /// Visit duration applied to every POI instead of its own, if set.
    #[cfg_attr(feature = "serde", serde(default))]
    pub visit_minutes: Option<f64>,
    /// Walking speed in km/h.
    #[cfg_attr(feature = "serde", serde(default = "default_walking_speed"))]
    pub walking_speed_kmh: f64,
    /// Whether the walk returns to `start`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub circular: bool,
    /// How the return leg is budgeted when `circular` is set.
    #[cfg_attr(feature = "serde", serde(default))]
    pub closing_leg: ClosingLegPolicy,
    /// Score coefficients.
    #[cfg_attr(feature = "serde", serde(default))]
    pub weights: ScoringWeights,
    /// Prior usage counts; `None` disables the novelty term.
    #[cfg_attr(feature = "serde", serde(default))]
    pub novelty: Option<NoveltyTable>,
}

#[cfg(feature = "serde")]
const fn default_walking_speed() -> f64 {
    DEFAULT_WALKING_SPEED_KMH
}

impl PlanningRequest {
    /// Build a one-way request with default speed, weights and policy.
    #[must_use]
    pub fn new(start: Coord<f64>, duration_minutes: f64) -> Self {
        Self {
            start,
            duration_minutes,
            visit_minutes: None,
            walking_speed_kmh: DEFAULT_WALKING_SPEED_KMH,
            circular: false,
            closing_leg: ClosingLegPolicy::default(),
            weights: ScoringWeights::default(),
            novelty: None,
        }
    }

    /// Use `minutes` as the visit duration for every POI.
    #[must_use]
    pub const fn with_visit_minutes(mut self, minutes: f64) -> Self {
        self.visit_minutes = Some(minutes);
        self
    }

    /// Set the walking speed in km/h.
    #[must_use]
    pub const fn with_walking_speed(mut self, speed_kmh: f64) -> Self {
        self.walking_speed_kmh = speed_kmh;
        self
    }

    /// Request a walk that returns to the start.
    #[must_use]
    pub const fn with_circular(mut self, circular: bool) -> Self {
        self.circular = circular;
        self
    }

    /// Choose how the closing leg is budgeted.
    #[must_use]
    pub const fn with_closing_leg(mut self, policy: ClosingLegPolicy) -> Self {
        self.closing_leg = policy;
        self
    }

    /// Replace the score coefficients.
    #[must_use]
    pub const fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Supply prior usage counts for the novelty term.
    #[must_use]
    pub fn with_novelty(mut self, table: NoveltyTable) -> Self {
        self.novelty = Some(table);
        self
    }

    /// Visit duration that applies to `poi` under this request.
    #[must_use]
    pub fn visit_minutes_for(&self, poi: &Poi) -> f64 {
        self.visit_minutes.unwrap_or(poi.visit_minutes)
    }

    /// Check the request for values the planner cannot work with.
    ///
    /// A non-positive or infinite duration is valid: the former yields an
    /// empty route and the latter a route bounded only by the catalog.
    ///
    /// # Errors
    /// Returns the first [`InvalidInputError`] found.
    ///
    /// # Examples
    /// ```
    /// use ramble_core::{InvalidInputError, PlanningRequest, lat_lng};
    ///
    /// let request = PlanningRequest::new(lat_lng(f64::NAN, 0.0), 30.0);
    /// assert!(matches!(
    ///     request.validate(),
    ///     Err(InvalidInputError::NonFiniteStart { .. })
    /// ));
    /// ```
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        let (lat, lng) = (self.start.y, self.start.x);
        if !lat.is_finite() || !lng.is_finite() {
            return Err(InvalidInputError::NonFiniteStart { lat, lng });
        }
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(InvalidInputError::StartOutOfRange { lat, lng });
        }
        let speed = self.walking_speed_kmh;
        if !speed.is_finite() || speed <= 0.0 {
            return Err(InvalidInputError::InvalidWalkingSpeed { speed });
        }
        if self.duration_minutes.is_nan() {
            return Err(InvalidInputError::NonFiniteDuration);
        }
        if let Some(minutes) = self.visit_minutes
            && (!minutes.is_finite() || minutes < 0.0)
        {
            return Err(InvalidInputError::InvalidVisitOverride { minutes });
        }
        if !self.weights.all_finite() {
            return Err(InvalidInputError::InvalidWeights {
                weights: self.weights,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lat_lng;
    use rstest::{fixture, rstest};

    #[fixture]
    fn request() -> PlanningRequest {
        PlanningRequest::new(lat_lng(54.4025, -1.7367), 60.0)
    }

    #[rstest]
    fn defaults_validate(request: PlanningRequest) {
        assert_eq!(request.validate(), Ok(()));
    }

    #[rstest]
    #[case(-5.0)]
    #[case(0.0)]
    #[case(f64::INFINITY)]
    fn unusual_durations_are_accepted(request: PlanningRequest, #[case] duration: f64) {
        let request = PlanningRequest {
            duration_minutes: duration,
            ..request
        };
        assert_eq!(request.validate(), Ok(()));
    }

    #[rstest]
    fn nan_duration_is_rejected(request: PlanningRequest) {
        let request = PlanningRequest {
            duration_minutes: f64::NAN,
            ..request
        };
        assert_eq!(request.validate(), Err(InvalidInputError::NonFiniteDuration));
    }

    #[rstest]
    #[case(lat_lng(f64::INFINITY, 0.0))]
    #[case(lat_lng(0.0, f64::NAN))]
    fn non_finite_start_is_rejected(request: PlanningRequest, #[case] start: Coord<f64>) {
        let request = PlanningRequest { start, ..request };
        assert!(matches!(
            request.validate(),
            Err(InvalidInputError::NonFiniteStart { .. })
        ));
    }

    #[rstest]
    #[case(lat_lng(90.5, 0.0))]
    #[case(lat_lng(0.0, -180.5))]
    fn out_of_range_start_is_rejected(request: PlanningRequest, #[case] start: Coord<f64>) {
        let request = PlanningRequest { start, ..request };
        assert!(matches!(
            request.validate(),
            Err(InvalidInputError::StartOutOfRange { .. })
        ));
    }

    #[rstest]
    #[case(0.0)]
    #[case(-4.0)]
    #[case(f64::NAN)]
    fn bad_walking_speed_is_rejected(request: PlanningRequest, #[case] speed: f64) {
        let request = request.with_walking_speed(speed);
        assert!(matches!(
            request.validate(),
            Err(InvalidInputError::InvalidWalkingSpeed { .. })
        ));
    }

    #[rstest]
    #[case(-1.0)]
    #[case(f64::INFINITY)]
    fn bad_visit_override_is_rejected(request: PlanningRequest, #[case] minutes: f64) {
        let request = request.with_visit_minutes(minutes);
        assert!(matches!(
            request.validate(),
            Err(InvalidInputError::InvalidVisitOverride { .. })
        ));
    }

    #[rstest]
    fn non_finite_weights_are_rejected(request: PlanningRequest) {
        let request = request.with_weights(ScoringWeights::default().with_novelty(f64::NAN));
        assert!(matches!(
            request.validate(),
            Err(InvalidInputError::InvalidWeights { .. })
        ));
    }

    #[rstest]
    fn visit_override_replaces_poi_duration(request: PlanningRequest) {
        let poi = crate::Poi::new("a", "A", lat_lng(0.0, 0.0)).with_visit_minutes(20.0);
        assert_eq!(request.visit_minutes_for(&poi), 20.0);
        assert_eq!(request.with_visit_minutes(7.0).visit_minutes_for(&poi), 7.0);
    }
}
