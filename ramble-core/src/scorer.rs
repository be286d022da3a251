//! Score points of interest relative to where the walker currently is.
//!
//! The [`Scorer`] trait is the seam between the route builder and the
//! relevance model. Planners call it once per feasible candidate per step.

use geo::Coord;

use crate::{InterestProfile, PlanningRequest, Poi};

/// Everything a scorer may consult besides the POI itself.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    /// Where the walker is standing.
    pub location: Coord<f64>,
    /// Caller interests; `None` disables the interest term.
    pub profile: Option<&'a InterestProfile>,
    /// The request being planned, carrying weights and novelty counts.
    pub request: &'a PlanningRequest,
}

impl<'a> ScoringContext<'a> {
    /// Bundle the scoring inputs for one evaluation.
    #[must_use]
    pub const fn new(
        location: Coord<f64>,
        profile: Option<&'a InterestProfile>,
        request: &'a PlanningRequest,
    ) -> Self {
        Self {
            location,
            profile,
            request,
        }
    }
}

/// Calculate a relevance score for a point of interest.
///
/// Higher scores indicate a better candidate. Scores are relative: negative
/// values are valid and compare like any other. Implementations must be
/// pure and deterministic, and thread-safe (`Send` + `Sync`) so a single
/// scorer can serve concurrent planning calls.
///
/// # Examples
///
/// ```rust
/// use ramble_core::{PlanningRequest, Poi, Scorer, ScoringContext, lat_lng};
///
/// struct PopularityOnly;
///
/// impl Scorer for PopularityOnly {
///     fn score(&self, poi: &Poi, _ctx: &ScoringContext<'_>) -> f64 {
///         poi.popularity
///     }
/// }
///
/// let request = PlanningRequest::new(lat_lng(54.40, -1.74), 30.0);
/// let ctx = ScoringContext::new(request.start, None, &request);
/// let poi = Poi::new("market", "Market Place", lat_lng(54.40, -1.74)).with_popularity(0.7);
/// assert_eq!(PopularityOnly.score(&poi, &ctx), 0.7);
/// ```
pub trait Scorer: Send + Sync {
    /// Return a score for `poi` in `ctx`.
    fn score(&self, poi: &Poi, ctx: &ScoringContext<'_>) -> f64;

    /// Map NaN to negative infinity so it ranks below every real score.
    fn sanitise(score: f64) -> f64
    where
        Self: Sized,
    {
        if score.is_nan() {
            f64::NEG_INFINITY
        } else {
            score
        }
    }
}

impl<S: Scorer + ?Sized> Scorer for &S {
    fn score(&self, poi: &Poi, ctx: &ScoringContext<'_>) -> f64 {
        (**self).score(poi, ctx)
    }
}
