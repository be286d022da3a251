//! Rank a catalog from a fixed location.

use std::cmp::Ordering;

use geo::Coord;
use log::debug;
use ramble_core::{InterestProfile, PlanningRequest, Poi};
#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{ScoreBreakdown, score_breakdown};

/// A POI paired with its score breakdown.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RankedPoi<'a> {
    /// The ranked POI.
    pub poi: &'a Poi,
    /// Why it ranked where it did.
    pub breakdown: ScoreBreakdown,
}

/// Score every POI from `location` and sort best first.
///
/// Equal scores are ordered by ascending id. `limit` truncates the result to
/// the top entries.
///
/// # Examples
/// ```
/// use ramble_core::{PlanningRequest, Poi, lat_lng};
/// use ramble_scorer::rank_pois;
///
/// let here = lat_lng(54.4025, -1.7367);
/// let request = PlanningRequest::new(here, 60.0);
/// let pois = vec![
///     Poi::new("b", "Quiet Lane", here).with_popularity(0.1),
///     Poi::new("a", "Market Cross", here).with_popularity(0.9),
/// ];
/// let ranked = rank_pois(&pois, None, here, &request, Some(1));
/// assert_eq!(ranked.len(), 1);
/// assert_eq!(ranked[0].poi.id.as_str(), "a");
/// ```
#[must_use]
pub fn rank_pois<'a>(
    pois: &'a [Poi],
    profile: Option<&InterestProfile>,
    location: Coord<f64>,
    request: &PlanningRequest,
    limit: Option<usize>,
) -> Vec<RankedPoi<'a>> {
    let mut ranked: Vec<RankedPoi<'a>> = pois
        .iter()
        .map(|poi| RankedPoi {
            poi,
            breakdown: score_breakdown(poi, profile, location, request),
        })
        .collect();
    ranked.sort_by(best_first);
    if let Some(limit) = limit {
        ranked.truncate(limit);
    }
    debug!(
        "ranked {} of {} POIs from ({}, {})",
        ranked.len(),
        pois.len(),
        location.y,
        location.x
    );
    ranked
}

/// Higher totals first, then ascending id.
///
/// Totals are already NaN-free, and `-0.0` ties with `0.0` exactly as it
/// does in the route builder's `>` comparison.
fn best_first(a: &RankedPoi<'_>, b: &RankedPoi<'_>) -> Ordering {
    b.breakdown
        .total
        .partial_cmp(&a.breakdown.total)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.poi.id.cmp(&b.poi.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ramble_core::{Tag, lat_lng, offset_north};
    use rstest::rstest;

    #[rstest]
    fn ties_order_by_id() {
        let here = lat_lng(0.0, 0.0);
        let request = PlanningRequest::new(here, 60.0);
        let pois = vec![
            Poi::new("c", "C", here),
            Poi::new("a", "A", here),
            Poi::new("b", "B", here),
        ];
        let ids: Vec<&str> = rank_pois(&pois, None, here, &request, None)
            .iter()
            .map(|ranked| ranked.poi.id.as_str())
            .collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[rstest]
    fn signed_zero_totals_fall_back_to_id() {
        let here = lat_lng(0.0, 0.0);
        let (b, a) = (Poi::new("b", "B", here), Poi::new("a", "A", here));
        let breakdown = |total| ScoreBreakdown {
            interest_match: 0.0,
            popularity: 0.0,
            novelty: 0.0,
            distance_km: 0.0,
            total,
        };
        let positive = RankedPoi {
            poi: &b,
            breakdown: breakdown(0.0),
        };
        let negative = RankedPoi {
            poi: &a,
            breakdown: breakdown(-0.0),
        };
        assert_eq!(best_first(&negative, &positive), Ordering::Less);
        assert_eq!(best_first(&positive, &negative), Ordering::Greater);
    }

    #[rstest]
    fn interests_outrank_proximity() {
        let here = lat_lng(54.4025, -1.7367);
        let request = PlanningRequest::new(here, 60.0);
        let history = Tag::new("history").expect("valid tag");
        let profile = InterestProfile::new().with_weight(history.clone(), 1.0);
        let pois = vec![
            Poi::new("near", "Chip Shop", offset_north(here, 0.1)),
            Poi::new("castle", "Castle", offset_north(here, 0.8)).with_tag(history),
        ];
        let ranked = rank_pois(&pois, Some(&profile), here, &request, None);
        let first = ranked.first().expect("two POIs ranked");
        assert_eq!(first.poi.id.as_str(), "castle");
    }

    #[rstest]
    fn limit_larger_than_catalog_keeps_everything() {
        let here = lat_lng(0.0, 0.0);
        let request = PlanningRequest::new(here, 60.0);
        let pois = vec![Poi::new("a", "A", here)];
        assert_eq!(rank_pois(&pois, None, here, &request, Some(5)).len(), 1);
    }
}
