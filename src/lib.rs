//! Facade crate for the Ramble walking-tour engine.
//!
//! This crate re-exports the core domain types and relevance scoring, and
//! exposes the greedy planner behind the `solver-greedy` feature.
//!
//! ```
//! # #[cfg(feature = "solver-greedy")]
//! # {
//! use ramble_engine::{InterestProfile, PlanningRequest, Poi, Tag, lat_lng, plan_route};
//!
//! let start = lat_lng(54.4025, -1.7367);
//! let castle = Poi::new("castle", "Richmond Castle", lat_lng(54.4021, -1.7378))
//!     .with_tag(Tag::new("history")?);
//! let profile = InterestProfile::new().with_weight(Tag::new("history")?, 1.0);
//! let request = PlanningRequest::new(start, 45.0).with_circular(true);
//!
//! let response = plan_route(&[castle], &request, Some(&profile))?;
//! assert_eq!(response.route.len(), 1);
//! # }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]

pub use ramble_core::{
    ClosingLeg, ClosingLegPolicy, DEFAULT_VISIT_MINUTES, DEFAULT_WALKING_SPEED_KMH, Diagnostics,
    EARTH_RADIUS_KM, InterestProfile, InvalidInputError, NoveltyTable, PlanError, PlanResponse,
    Planner, PlanningRequest, Poi, PoiId, Route, RouteError, RouteStep, RouteSummary, Scorer,
    ScoringContext, ScoringWeights, Tag, TagError, Tags, Termination, haversine_km, lat_lng,
    offset_north, travel_minutes, walking_minutes,
};
pub use ramble_scorer::{
    NEUTRAL_INTEREST, RankedPoi, ScoreBreakdown, WeightedScorer, interest_match, rank_pois,
    score_breakdown, score_poi,
};

#[cfg(feature = "solver-greedy")]
pub use ramble_solver_greedy::{GreedyPlanner, GreedyPlannerConfig};

/// Plan a route with the default greedy planner and weighted scorer.
///
/// # Errors
/// Returns [`PlanError::InvalidInput`] when `request` fails validation.
#[cfg(feature = "solver-greedy")]
pub fn plan_route(
    pois: &[Poi],
    request: &PlanningRequest,
    profile: Option<&InterestProfile>,
) -> Result<PlanResponse, PlanError> {
    GreedyPlanner::new(WeightedScorer).plan(pois, request, profile)
}
