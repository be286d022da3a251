//! Fixtures shared by unit, behaviour and property tests across the
//! workspace.

use geo::Coord;

use crate::{Poi, Scorer, ScoringContext, haversine_km, offset_north};

/// Build a POI with default visit time at `lat`/`lng`.
#[must_use]
pub fn poi_at(id: &str, lat: f64, lng: f64) -> Poi {
    Poi::new(id, id, crate::lat_lng(lat, lng))
}

/// Lay `count` POIs out due north of `origin`, the first at `origin` and
/// each subsequent one `spacing_km` further along the meridian.
///
/// Identifiers are `poi-0`, `poi-1`, ... so they sort in placement order for
/// `count <= 10`.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "fixture offsets scale the spacing by a small index"
)]
pub fn pois_along_meridian(origin: Coord<f64>, count: usize, spacing_km: f64) -> Vec<Poi> {
    (0..count)
        .map(|index| {
            let location = offset_north(origin, spacing_km * index as f64);
            Poi::new(format!("poi-{index}"), format!("Stop {index}"), location)
        })
        .collect()
}

/// Scorer that prefers the nearest POI and ignores everything else.
#[derive(Debug, Copy, Clone, Default)]
pub struct ProximityScorer;

impl Scorer for ProximityScorer {
    fn score(&self, poi: &Poi, ctx: &ScoringContext<'_>) -> f64 {
        -haversine_km(ctx.location, poi.location)
    }
}

/// Scorer that gives every POI the same score, leaving order to tie-breaks.
#[derive(Debug, Copy, Clone, Default)]
pub struct ConstantScorer(pub f64);

impl Scorer for ConstantScorer {
    fn score(&self, _poi: &Poi, _ctx: &ScoringContext<'_>) -> f64 {
        self.0
    }
}
