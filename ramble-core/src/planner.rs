use std::fmt;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{InterestProfile, InvalidInputError, PlanningRequest, Poi, Route, RouteError};

/// Why the route builder stopped adding stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Termination {
    /// The budget was non-positive or the catalog empty.
    EmptyRequest,
    /// Every candidate was visited.
    CandidatesExhausted,
    /// Candidates remain but none fits the remaining budget.
    NoFeasibleCandidate,
    /// The remaining budget is smaller than the shortest remaining visit.
    BudgetBelowMinimumVisit,
    /// The iteration guard fired.
    IterationCap,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::EmptyRequest => "nothing to plan",
            Self::CandidatesExhausted => "every candidate visited",
            Self::NoFeasibleCandidate => "no stop fits in the time available",
            Self::BudgetBelowMinimumVisit => "remaining time is shorter than any visit",
            Self::IterationCap => "iteration limit reached",
        };
        f.write_str(reason)
    }
}

/// Solver statistics reported alongside a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Diagnostics {
    /// Why planning stopped.
    pub termination: Termination,
    /// Selection rounds executed.
    pub iterations: usize,
    /// Candidate scores computed.
    pub evaluations: usize,
    /// Wall-clock planning time.
    pub solve_time: Duration,
}

/// Response from a successful planning call.
///
/// Contains the chosen [`Route`] and its aggregate score.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanResponse {
    /// The ordered route for the visitor.
    pub route: Route,
    /// Sum of the scores that selected each stop.
    pub score: f64,
    /// How the planner arrived at the route.
    pub diagnostics: Diagnostics,
}

/// Errors returned by [`Planner::plan`].
///
/// Infeasibility is not an error: a request nothing fits into yields an
/// empty route.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// Request parameters were invalid.
    #[error("invalid request: {0}")]
    InvalidInput(#[from] InvalidInputError),
    /// The planner assembled a route that violates a route invariant.
    #[error("planner produced an invalid route: {0}")]
    InvalidRoute(#[from] RouteError),
}

/// Choose and order stops satisfying a request.
///
/// Implementations should return [`PlanError::InvalidInput`] for invalid
/// parameters rather than panicking. Planners must be `Send + Sync` so one
/// instance can serve concurrent callers; each call owns its working state
/// and treats `pois` as read-only.
///
/// # Examples
/// ```rust
/// use std::time::Duration;
/// use ramble_core::{
///     Diagnostics, InterestProfile, PlanError, PlanResponse, Planner, PlanningRequest, Poi,
///     Route, Termination, lat_lng,
/// };
///
/// struct NoStops;
///
/// impl Planner for NoStops {
///     fn plan(
///         &self,
///         _pois: &[Poi],
///         request: &PlanningRequest,
///         _profile: Option<&InterestProfile>,
///     ) -> Result<PlanResponse, PlanError> {
///         request.validate()?;
///         Ok(PlanResponse {
///             route: Route::empty(request.clone()),
///             score: 0.0,
///             diagnostics: Diagnostics {
///                 termination: Termination::EmptyRequest,
///                 iterations: 0,
///                 evaluations: 0,
///                 solve_time: Duration::ZERO,
///             },
///         })
///     }
/// }
///
/// let request = PlanningRequest::new(lat_lng(54.40, -1.74), 30.0);
/// let response = NoStops.plan(&[], &request, None)?;
/// assert!(response.route.is_empty());
/// # Ok::<(), PlanError>(())
/// ```
pub trait Planner: Send + Sync {
    /// Plan a route through `pois`.
    ///
    /// # Errors
    /// Returns [`PlanError::InvalidInput`] when `request` fails validation.
    fn plan(
        &self,
        pois: &[Poi],
        request: &PlanningRequest,
        profile: Option<&InterestProfile>,
    ) -> Result<PlanResponse, PlanError>;
}
