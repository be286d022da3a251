//! Routes through points of interest.
//!
//! A [`Route`] is built once per planning call and never mutated afterwards.
//! It keeps the originating [`PlanningRequest`] so summaries can be derived
//! without re-running the planner.

use std::collections::BTreeSet;

use geo::Coord;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{PlanningRequest, Poi, PoiId};

/// A visited POI and the walk that led to it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RouteStep {
    /// The stop.
    pub poi: Poi,
    /// Great-circle distance from the previous stop (or the start).
    pub distance_km: f64,
    /// Walking time from the previous stop (or the start).
    pub walking_minutes: f64,
    /// Time spent at the stop.
    pub visit_minutes: f64,
    /// Relevance score that won the stop its place.
    pub score: f64,
}

/// The walk from the last stop back to the start of a circular route.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClosingLeg {
    /// Great-circle distance back to the start.
    pub distance_km: f64,
    /// Walking time back to the start.
    pub walking_minutes: f64,
}

/// Errors returned by [`Route::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The same POI appears twice.
    #[error("route visits POI {id} more than once")]
    DuplicatePoi {
        /// Repeated identifier.
        id: PoiId,
    },
    /// A closing leg was supplied for a one-way request.
    #[error("closing leg supplied for a route that is not circular")]
    UnexpectedClosingLeg,
}

/// An ordered walk through points of interest.
///
/// Stop order is selection order. No POI appears twice.
///
/// # Examples
/// ```
/// use ramble_core::{PlanningRequest, Poi, Route, RouteStep, lat_lng};
///
/// let request = PlanningRequest::new(lat_lng(54.40, -1.74), 30.0);
/// let step = RouteStep {
///     poi: Poi::new("castle", "Castle", lat_lng(54.40, -1.74)),
///     distance_km: 0.0,
///     walking_minutes: 0.0,
///     visit_minutes: 5.0,
///     score: 0.35,
/// };
/// let route = Route::new(request, vec![step], None)?;
/// assert_eq!(route.len(), 1);
/// assert_eq!(route.elapsed_minutes(), 5.0);
/// # Ok::<(), ramble_core::RouteError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "RouteParts")
)]
pub struct Route {
    request: PlanningRequest,
    steps: Vec<RouteStep>,
    closing_leg: Option<ClosingLeg>,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RouteParts {
    request: PlanningRequest,
    steps: Vec<RouteStep>,
    closing_leg: Option<ClosingLeg>,
}

#[cfg(feature = "serde")]
impl TryFrom<RouteParts> for Route {
    type Error = RouteError;

    fn try_from(parts: RouteParts) -> Result<Self, Self::Error> {
        Self::new(parts.request, parts.steps, parts.closing_leg)
    }
}

impl Route {
    /// Validate and assemble a route.
    ///
    /// # Errors
    /// [`RouteError::DuplicatePoi`] when a POI repeats, and
    /// [`RouteError::UnexpectedClosingLeg`] when `closing_leg` is set on a
    /// one-way request.
    pub fn new(
        request: PlanningRequest,
        steps: Vec<RouteStep>,
        closing_leg: Option<ClosingLeg>,
    ) -> Result<Self, RouteError> {
        let mut seen = BTreeSet::new();
        if let Some(step) = steps.iter().find(|step| !seen.insert(&step.poi.id)) {
            return Err(RouteError::DuplicatePoi {
                id: step.poi.id.clone(),
            });
        }
        if closing_leg.is_some() && !request.circular {
            return Err(RouteError::UnexpectedClosingLeg);
        }
        Ok(Self {
            request,
            steps,
            closing_leg,
        })
    }

    /// A route with no stops.
    #[must_use]
    pub const fn empty(request: PlanningRequest) -> Self {
        Self {
            request,
            steps: Vec::new(),
            closing_leg: None,
        }
    }

    /// The request that produced this route.
    #[must_use]
    pub const fn request(&self) -> &PlanningRequest {
        &self.request
    }

    /// Stops in visiting order.
    #[must_use]
    pub fn steps(&self) -> &[RouteStep] {
        &self.steps
    }

    /// Walk back to the start, present on non-empty circular routes.
    #[must_use]
    pub const fn closing_leg(&self) -> Option<&ClosingLeg> {
        self.closing_leg.as_ref()
    }

    /// Starting coordinate.
    #[must_use]
    pub const fn start(&self) -> Coord<f64> {
        self.request.start
    }

    /// Whether the walk returns to the start.
    #[must_use]
    pub const fn is_circular(&self) -> bool {
        self.request.circular
    }

    /// Identifiers of the stops in visiting order.
    pub fn poi_ids(&self) -> impl Iterator<Item = &PoiId> {
        self.steps.iter().map(|step| &step.poi.id)
    }

    /// Number of stops.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the route has no stops.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Distance walked, closing leg included, in kilometres.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "distance is a sum of legs")]
    pub fn distance_km(&self) -> f64 {
        let legs: f64 = self.steps.iter().map(|step| step.distance_km).sum();
        legs + self.closing_leg.map_or(0.0, |leg| leg.distance_km)
    }

    /// Time spent walking, closing leg included, in minutes.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "walking time is a sum of legs")]
    pub fn walking_minutes(&self) -> f64 {
        let legs: f64 = self.steps.iter().map(|step| step.walking_minutes).sum();
        legs + self.closing_leg.map_or(0.0, |leg| leg.walking_minutes)
    }

    /// Time spent at stops, in minutes.
    #[must_use]
    pub fn visiting_minutes(&self) -> f64 {
        self.steps.iter().map(|step| step.visit_minutes).sum()
    }

    /// Walking plus visiting time, in minutes.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "elapsed time is a sum of minutes")]
    pub fn elapsed_minutes(&self) -> f64 {
        self.walking_minutes() + self.visiting_minutes()
    }

    /// Sum of the scores that selected each stop.
    #[must_use]
    pub fn total_score(&self) -> f64 {
        self.steps.iter().map(|step| step.score).sum()
    }
}
