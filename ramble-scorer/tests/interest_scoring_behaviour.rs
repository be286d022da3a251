#![expect(
    clippy::expect_used,
    reason = "tests should fail fast when setup breaks"
)]

//! Behavioural coverage for interest-weighted scoring.

use std::cell::RefCell;

use geo::Coord;
use ramble_core::{InterestProfile, PlanningRequest, Poi, PoiId, Tag, lat_lng, offset_north};
use ramble_scorer::{ScoreBreakdown, rank_pois};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

/// Aggregate fixtures shared across the BDD scenarios.
pub struct TestContext {
    start: Coord<f64>,
    pois: RefCell<Vec<Poi>>,
    profile: RefCell<Option<InterestProfile>>,
    ranking: RefCell<Vec<(PoiId, ScoreBreakdown)>>,
}

#[fixture]
/// Build a fresh `TestContext` for each scenario run.
pub fn context() -> TestContext {
    TestContext {
        start: lat_lng(54.4025, -1.7367),
        pois: RefCell::new(Vec::new()),
        profile: RefCell::new(None),
        ranking: RefCell::new(Vec::new()),
    }
}

fn tag(raw: &str) -> Tag {
    Tag::new(raw).expect("valid tag")
}

#[given("two POIs equidistant from the start")]
fn equidistant_pois(context: &TestContext) {
    let north = offset_north(context.start, 0.3);
    let south = offset_north(context.start, -0.3);
    // "y" sorts after "x", so only interest can put "x" first.
    *context.pois.borrow_mut() = vec![
        Poi::new("y", "Market Cross", south).with_tag(tag("shopping")),
        Poi::new("x", "Green Howards Museum", north).with_tag(tag("military-history")),
    ];
}

#[given("a profile that weights the first POI's tag at 1.0")]
fn matching_profile(context: &TestContext) {
    let profile = InterestProfile::new().with_weight(tag("military history"), 1.0);
    *context.profile.borrow_mut() = Some(profile);
}

#[given("an empty profile")]
fn empty_profile(context: &TestContext) {
    *context.profile.borrow_mut() = Some(InterestProfile::new());
}

#[given("no profile")]
fn no_profile(context: &TestContext) {
    *context.profile.borrow_mut() = None;
}

#[when("I rank the POIs from the start")]
fn rank(context: &TestContext) {
    let pois = context.pois.borrow();
    let profile = context.profile.borrow();
    let request = PlanningRequest::new(context.start, 60.0);
    let ranking = rank_pois(&pois, profile.as_ref(), context.start, &request, None)
        .into_iter()
        .map(|ranked| (ranked.poi.id.clone(), ranked.breakdown))
        .collect();
    *context.ranking.borrow_mut() = ranking;
}

#[then("the matching POI ranks first")]
fn matching_first(context: &TestContext) {
    let ranking = context.ranking.borrow();
    let (first, breakdown) = ranking.first().expect("ranking should not be empty");
    assert_eq!(first.as_str(), "x");
    assert_eq!(breakdown.interest_match, 1.0);
}

#[then("both POIs have an interest match of one half")]
fn neutral_interest(context: &TestContext) {
    let ranking = context.ranking.borrow();
    assert_eq!(ranking.len(), 2);
    assert!(ranking.iter().all(|(_, b)| b.interest_match == 0.5));
}

#[then("both POIs have an interest match of zero")]
fn zero_interest(context: &TestContext) {
    let ranking = context.ranking.borrow();
    assert_eq!(ranking.len(), 2);
    assert!(ranking.iter().all(|(_, b)| b.interest_match == 0.0));
}

#[scenario(path = "tests/features/interest_scoring.feature", index = 0)]
fn matching_tag_wins(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/interest_scoring.feature", index = 1)]
fn empty_profile_is_neutral(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/interest_scoring.feature", index = 2)]
fn absent_profile_ignores_interest(context: TestContext) {
    let _ = context;
}
