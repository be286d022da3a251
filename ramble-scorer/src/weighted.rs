//! The weighted relevance formula and its [`Scorer`] adapter.

use geo::Coord;
use ramble_core::{InterestProfile, PlanningRequest, Poi, Scorer, ScoringContext, haversine_km};

use crate::ScoreBreakdown;

/// Interest match used when a profile expresses no preference.
pub const NEUTRAL_INTEREST: f64 = 0.5;

/// Share of the profile's weight carried by the POI's tags.
///
/// - `None` profile: `0.0`.
/// - Empty profile or zero total weight: [`NEUTRAL_INTEREST`].
/// - Otherwise: matched weight divided by total weight. A POI with no tags
///   therefore scores `0.0`.
///
/// # Examples
/// ```
/// use ramble_core::{InterestProfile, Poi, Tag, lat_lng};
/// use ramble_scorer::interest_match;
///
/// let profile = InterestProfile::new()
///     .with_weight(Tag::new("history")?, 3.0)
///     .with_weight(Tag::new("ghosts")?, 1.0);
/// let poi = Poi::new("abbey", "Easby Abbey", lat_lng(54.39, -1.72))
///     .with_tag(Tag::new("history")?);
/// assert_eq!(interest_match(&poi, Some(&profile)), 0.75);
/// assert_eq!(interest_match(&poi, Some(&InterestProfile::new())), 0.5);
/// assert_eq!(interest_match(&poi, None), 0.0);
/// # Ok::<(), ramble_core::TagError>(())
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "interest match is a ratio of profile weights"
)]
pub fn interest_match(poi: &Poi, profile: Option<&InterestProfile>) -> f64 {
    let Some(profile) = profile else {
        return 0.0;
    };
    let total = profile.total_weight();
    if profile.is_empty() || total <= 0.0 {
        return NEUTRAL_INTEREST;
    }
    (profile.matched_weight(&poi.tags) / total).clamp(0.0, 1.0)
}

/// Score `poi` from `location` and report every component.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the relevance score is a weighted sum"
)]
pub fn score_breakdown(
    poi: &Poi,
    profile: Option<&InterestProfile>,
    location: Coord<f64>,
    request: &PlanningRequest,
) -> ScoreBreakdown {
    let weights = request.weights;
    let interest = interest_match(poi, profile);
    let novelty = request
        .novelty
        .as_ref()
        .map_or(0.0, |table| table.novelty(&poi.id));
    let distance_km = haversine_km(location, poi.location);
    let total = weights.interest * interest + weights.popularity * poi.popularity
        + weights.novelty * novelty
        - weights.distance * distance_km;
    ScoreBreakdown {
        interest_match: interest,
        popularity: poi.popularity,
        novelty,
        distance_km,
        total: WeightedScorer::sanitise(total),
    }
}

/// Weighted relevance of `poi` seen from `location`.
///
/// Pure and deterministic. NaN collapses to negative infinity so it ranks
/// last.
#[must_use]
pub fn score_poi(
    poi: &Poi,
    profile: Option<&InterestProfile>,
    location: Coord<f64>,
    request: &PlanningRequest,
) -> f64 {
    score_breakdown(poi, profile, location, request).total
}

/// [`Scorer`] implementing the weighted relevance formula.
///
/// # Examples
/// ```
/// use ramble_core::{PlanningRequest, Poi, Scorer, ScoringContext, lat_lng};
/// use ramble_scorer::WeightedScorer;
///
/// let start = lat_lng(54.4025, -1.7367);
/// let request = PlanningRequest::new(start, 30.0);
/// let ctx = ScoringContext::new(start, None, &request);
/// let poi = Poi::new("green", "The Green", start).with_popularity(0.5);
/// assert!((WeightedScorer.score(&poi, &ctx) - 0.1).abs() < 1e-12);
/// ```
#[derive(Debug, Copy, Clone, Default)]
pub struct WeightedScorer;

impl Scorer for WeightedScorer {
    fn score(&self, poi: &Poi, ctx: &ScoringContext<'_>) -> f64 {
        score_poi(poi, ctx.profile, ctx.location, ctx.request)
    }
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare floating point values"
)]
mod tests {
    use super::*;
    use ramble_core::{NoveltyTable, PoiId, ScoringWeights, Tag, lat_lng, offset_north};
    use rstest::{fixture, rstest};

    fn tag(raw: &str) -> Tag {
        Tag::new(raw).expect("valid tag")
    }

    #[fixture]
    fn start() -> Coord<f64> {
        lat_lng(54.4025, -1.7367)
    }

    #[fixture]
    fn request(start: Coord<f64>) -> PlanningRequest {
        PlanningRequest::new(start, 60.0)
    }

    #[rstest]
    fn untagged_poi_scores_zero_interest_against_a_profile(start: Coord<f64>) {
        let profile = InterestProfile::new().with_weight(tag("history"), 1.0);
        let poi = Poi::new("a", "A", start);
        assert_eq!(interest_match(&poi, Some(&profile)), 0.0);
    }

    #[rstest]
    fn zero_weight_profile_is_neutral(start: Coord<f64>) {
        let profile = InterestProfile::new().with_weight(tag("history"), 0.0);
        let poi = Poi::new("a", "A", start).with_tag(tag("history"));
        assert_eq!(interest_match(&poi, Some(&profile)), NEUTRAL_INTEREST);
    }

    #[rstest]
    fn breakdown_applies_every_coefficient(start: Coord<f64>, request: PlanningRequest) {
        let id = PoiId::new("bridge");
        let table = NoveltyTable::new().with_tours(4).with_visits(id.clone(), 1);
        let request = request.with_novelty(table).with_weights(
            ScoringWeights::default()
                .with_interest(1.0)
                .with_popularity(2.0)
                .with_novelty(4.0)
                .with_distance(0.5),
        );
        let profile = InterestProfile::new()
            .with_weight(tag("bridges"), 1.0)
            .with_weight(tag("pubs"), 1.0);
        let poi = Poi::new(id, "Green Bridge", offset_north(start, 2.0))
            .with_popularity(0.25)
            .with_tag(tag("bridges"));

        let breakdown = score_breakdown(&poi, Some(&profile), start, &request);

        assert_eq!(breakdown.interest_match, 0.5);
        assert_eq!(breakdown.novelty, 0.75);
        assert!((breakdown.distance_km - 2.0).abs() < 1e-9);
        // 0.5 + 0.5 + 3.0 - 1.0
        assert!((breakdown.total - 3.0).abs() < 1e-9);
    }

    #[rstest]
    fn missing_novelty_table_contributes_nothing(start: Coord<f64>, request: PlanningRequest) {
        let poi = Poi::new("a", "A", start);
        let breakdown = score_breakdown(&poi, None, start, &request);
        assert_eq!(breakdown.novelty, 0.0);
        assert_eq!(breakdown.total, 0.0);
    }

    #[rstest]
    fn far_pois_may_score_negative(start: Coord<f64>, request: PlanningRequest) {
        let poi = Poi::new("far", "Far", offset_north(start, 10.0));
        let score = score_poi(&poi, None, start, &request);
        assert!((score - -1.0).abs() < 1e-9, "score was {score}");
    }

    #[rstest]
    fn scorer_matches_free_function(start: Coord<f64>, request: PlanningRequest) {
        let profile = InterestProfile::new().with_weight(tag("art"), 1.0);
        let poi = Poi::new("gallery", "Gallery", offset_north(start, 0.3))
            .with_popularity(0.6)
            .with_tag(tag("art"));
        let ctx = ScoringContext::new(start, Some(&profile), &request);
        assert_eq!(
            WeightedScorer.score(&poi, &ctx),
            score_poi(&poi, Some(&profile), start, &request)
        );
    }
}
