//! Tests for the `GreedyPlanner`.

use super::*;
use geo::Coord;
use ramble_core::test_support::{ConstantScorer, ProximityScorer, poi_at, pois_along_meridian};
use ramble_core::{
    ClosingLegPolicy, InvalidInputError, RouteSummary, Termination, haversine_km, lat_lng,
    offset_north,
};
use rstest::{fixture, rstest};

#[fixture]
fn start() -> Coord<f64> {
    lat_lng(54.4025, -1.7367)
}

fn ids(route: &Route) -> Vec<&str> {
    route.poi_ids().map(|id| id.as_str()).collect()
}

#[rstest]
fn ties_go_to_the_smaller_id(start: Coord<f64>) {
    let pois = vec![
        Poi::new("c", "C", start),
        Poi::new("a", "A", start),
        Poi::new("b", "B", start),
    ];
    let request = PlanningRequest::new(start, 10.0);
    let response = GreedyPlanner::new(ConstantScorer(0.3))
        .plan(&pois, &request, None)
        .expect("valid request");
    assert_eq!(ids(&response.route), ["a", "b"]);
}

#[rstest]
#[case(0.0)]
#[case(-15.0)]
fn non_positive_budget_plans_nothing(start: Coord<f64>, #[case] duration: f64) {
    let pois = pois_along_meridian(start, 3, 0.1);
    let request = PlanningRequest::new(start, duration).with_circular(true);
    let response = GreedyPlanner::new(ProximityScorer)
        .plan(&pois, &request, None)
        .expect("valid request");
    assert!(response.route.is_empty());
    assert!(response.route.closing_leg().is_none());
    assert_eq!(response.diagnostics.termination, Termination::EmptyRequest);
    assert_eq!(response.diagnostics.iterations, 0);
}

#[rstest]
fn empty_catalog_plans_nothing(start: Coord<f64>) {
    let request = PlanningRequest::new(start, 60.0);
    let response = GreedyPlanner::new(ProximityScorer)
        .plan(&[], &request, None)
        .expect("valid request");
    assert!(response.route.is_empty());
    assert_eq!(response.diagnostics.termination, Termination::EmptyRequest);
}

#[rstest]
fn unreachable_pois_yield_an_empty_route(start: Coord<f64>) {
    // 2 km is a 24 minute walk before the 5 minute visit.
    let pois = vec![Poi::new("far", "Far", offset_north(start, 2.0))];
    let request = PlanningRequest::new(start, 20.0);
    let response = GreedyPlanner::new(ProximityScorer)
        .plan(&pois, &request, None)
        .expect("valid request");
    assert!(response.route.is_empty());
    assert_eq!(
        response.diagnostics.termination,
        Termination::NoFeasibleCandidate
    );
}

#[rstest]
fn invalid_requests_are_rejected(start: Coord<f64>) {
    let request = PlanningRequest::new(start, 30.0).with_walking_speed(0.0);
    let err = GreedyPlanner::new(ProximityScorer)
        .plan(&[], &request, None)
        .expect_err("zero speed");
    assert!(matches!(
        err,
        PlanError::InvalidInput(InvalidInputError::InvalidWalkingSpeed { .. })
    ));
}

#[rstest]
#[expect(clippy::float_arithmetic, reason = "comparing minute totals")]
fn lenient_overshoot_is_confined_to_the_closing_leg(start: Coord<f64>) {
    // 12 min out + 5 min visit fits 20 minutes; the 12 min walk home does not.
    let pois = vec![Poi::new("tower", "Tower", offset_north(start, 1.0))];
    let request = PlanningRequest::new(start, 20.0).with_circular(true);
    let response = GreedyPlanner::new(ProximityScorer)
        .plan(&pois, &request, None)
        .expect("valid request");

    let route = &response.route;
    let leg = route.closing_leg().expect("circular route closes");
    assert_eq!(route.len(), 1);
    assert!(route.elapsed_minutes() > request.duration_minutes);
    assert!(route.elapsed_minutes() - leg.walking_minutes <= request.duration_minutes);
    let summary = RouteSummary::from_route(route);
    assert!(summary.remaining_minutes < 0.0);
    assert!(-summary.remaining_minutes <= leg.walking_minutes);
}

#[rstest]
fn strict_policy_keeps_the_closing_leg_in_budget(start: Coord<f64>) {
    let pois = vec![Poi::new("tower", "Tower", offset_north(start, 1.0))];
    let request = PlanningRequest::new(start, 20.0)
        .with_circular(true)
        .with_closing_leg(ClosingLegPolicy::Strict);
    let response = GreedyPlanner::new(ProximityScorer)
        .plan(&pois, &request, None)
        .expect("valid request");
    assert!(response.route.is_empty());
    assert!(response.route.closing_leg().is_none());
}

#[rstest]
#[expect(clippy::float_arithmetic, reason = "summing leg distances")]
fn circular_summary_adds_the_closing_leg(start: Coord<f64>) {
    let pois = pois_along_meridian(start, 3, 0.25);
    let request = PlanningRequest::new(start, 60.0).with_circular(true);
    let response = GreedyPlanner::new(ProximityScorer)
        .plan(&pois, &request, None)
        .expect("valid request");

    let route = &response.route;
    assert_eq!(route.len(), 3);
    let legs: f64 = route.steps().iter().map(|step| step.distance_km).sum();
    let last = route.steps().last().expect("three stops");
    let closing = haversine_km(last.poi.location, start);
    let summary = RouteSummary::from_route(route);
    assert!((summary.total_distance_km - (legs + closing)).abs() < 1e-12);
    assert_eq!(summary.closing_leg_km, Some(closing));
}

#[rstest]
fn visit_override_applies_to_every_stop(start: Coord<f64>) {
    let pois = vec![
        poi_at("a", start.y, start.x).with_visit_minutes(40.0),
        poi_at("b", start.y, start.x).with_visit_minutes(40.0),
    ];
    let request = PlanningRequest::new(start, 25.0).with_visit_minutes(10.0);
    let response = GreedyPlanner::new(ProximityScorer)
        .plan(&pois, &request, None)
        .expect("valid request");
    assert_eq!(ids(&response.route), ["a", "b"]);
    assert!(
        response
            .route
            .steps()
            .iter()
            .all(|step| step.visit_minutes == 10.0)
    );
}

#[rstest]
fn iteration_cap_stops_the_builder(start: Coord<f64>) {
    let pois = pois_along_meridian(start, 5, 0.05);
    let request = PlanningRequest::new(start, 120.0);
    let config = GreedyPlannerConfig {
        max_iterations: Some(2),
        ..GreedyPlannerConfig::default()
    };
    let response = GreedyPlanner::with_config(ProximityScorer, config)
        .plan(&pois, &request, None)
        .expect("valid request");
    assert_eq!(response.route.len(), 2);
    assert_eq!(response.diagnostics.termination, Termination::IterationCap);
}

#[rstest]
#[case(2, None, 10, 20)]
#[case(2, Some(5), 10, 5)]
#[case(0, None, 10, 0)]
fn iteration_cap_scales_with_catalog(
    #[case] factor: usize,
    #[case] max_iterations: Option<usize>,
    #[case] candidates: usize,
    #[case] expected: usize,
) {
    let config = GreedyPlannerConfig {
        iteration_cap_factor: factor,
        max_iterations,
    };
    assert_eq!(config.iteration_cap(candidates), expected);
}

#[rstest]
fn response_score_sums_step_scores(start: Coord<f64>) {
    let pois = pois_along_meridian(start, 3, 0.1);
    let request = PlanningRequest::new(start, 60.0);
    let response = GreedyPlanner::new(ConstantScorer(0.25))
        .plan(&pois, &request, None)
        .expect("valid request");
    assert_eq!(response.route.len(), 3);
    assert_eq!(response.score, 0.75);
    assert_eq!(
        response.diagnostics.termination,
        Termination::CandidatesExhausted
    );
}
