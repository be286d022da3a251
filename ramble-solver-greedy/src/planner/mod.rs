//! `GreedyPlanner` implementation of the [`Planner`] trait.

use std::time::Instant;

use log::debug;
use ramble_core::{
    Diagnostics, InterestProfile, PlanError, PlanResponse, Planner, PlanningRequest, Poi, Route,
    Scorer,
};

use crate::builder::RouteBuilder;

/// Configuration for [`GreedyPlanner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreedyPlannerConfig {
    /// Selection rounds allowed per initial candidate.
    pub iteration_cap_factor: usize,
    /// Absolute ceiling on selection rounds, applied on top of the factor.
    pub max_iterations: Option<usize>,
}

impl GreedyPlannerConfig {
    /// Rounds allowed for a catalog of `candidates` POIs.
    #[must_use]
    pub fn iteration_cap(&self, candidates: usize) -> usize {
        let scaled = self.iteration_cap_factor.saturating_mul(candidates);
        self.max_iterations.map_or(scaled, |max| scaled.min(max))
    }
}

impl Default for GreedyPlannerConfig {
    fn default() -> Self {
        Self {
            iteration_cap_factor: 2,
            max_iterations: None,
        }
    }
}

/// Greedy nearest-best route planner.
///
/// Each round picks the highest-scoring unvisited POI whose walk and visit
/// still fit the remaining budget, then moves there. The result is a fast
/// approximation, not an optimal tour.
///
/// # Examples
/// ```
/// use ramble_core::test_support::{ProximityScorer, pois_along_meridian};
/// use ramble_core::{Planner, PlanningRequest, lat_lng};
/// use ramble_solver_greedy::GreedyPlanner;
///
/// let start = lat_lng(54.4025, -1.7367);
/// let pois = pois_along_meridian(start, 3, 0.2);
/// let request = PlanningRequest::new(start, 60.0);
///
/// let response = GreedyPlanner::new(ProximityScorer).plan(&pois, &request, None)?;
/// let ids: Vec<&str> = response.route.poi_ids().map(|id| id.as_str()).collect();
/// assert_eq!(ids, ["poi-0", "poi-1", "poi-2"]);
/// # Ok::<(), ramble_core::PlanError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GreedyPlanner<C>
where
    C: Scorer,
{
    scorer: C,
    config: GreedyPlannerConfig,
}

impl<C> GreedyPlanner<C>
where
    C: Scorer,
{
    /// Construct a planner using default configuration.
    pub fn new(scorer: C) -> Self {
        Self::with_config(scorer, GreedyPlannerConfig::default())
    }

    /// Construct a planner with explicit configuration.
    pub const fn with_config(scorer: C, config: GreedyPlannerConfig) -> Self {
        Self { scorer, config }
    }

    /// The active configuration.
    pub const fn config(&self) -> &GreedyPlannerConfig {
        &self.config
    }

    /// The scorer ranking candidates.
    pub const fn scorer(&self) -> &C {
        &self.scorer
    }
}

impl<C> Planner for GreedyPlanner<C>
where
    C: Scorer,
{
    fn plan(
        &self,
        pois: &[Poi],
        request: &PlanningRequest,
        profile: Option<&InterestProfile>,
    ) -> Result<PlanResponse, PlanError> {
        request.validate()?;
        let started_at = Instant::now();

        let cap = self.config.iteration_cap(pois.len());
        let outcome = RouteBuilder::new(&self.scorer, request, profile, pois, cap).build();
        let route = Route::new(request.clone(), outcome.steps, outcome.closing_leg)?;
        let diagnostics = Diagnostics {
            termination: outcome.termination,
            iterations: outcome.iterations,
            evaluations: outcome.evaluations,
            solve_time: started_at.elapsed(),
        };
        debug!(
            "planned {} of {} POIs ({})",
            route.len(),
            pois.len(),
            diagnostics.termination
        );

        Ok(PlanResponse {
            score: route.total_score(),
            route,
            diagnostics,
        })
    }
}

#[cfg(test)]
mod tests;
