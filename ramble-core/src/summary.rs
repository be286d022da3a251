//! Aggregate statistics derived from a finished [`Route`].

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Route;

/// Read-only totals for a route.
///
/// Summaries can be recomputed from a [`Route`] at any time. Building one
/// never mutates the route.
///
/// # Examples
/// ```
/// use ramble_core::{PlanningRequest, Route, RouteSummary, lat_lng};
///
/// let route = Route::empty(PlanningRequest::new(lat_lng(54.40, -1.74), 0.0));
/// let summary = RouteSummary::from_route(&route);
/// assert_eq!(summary.poi_count, 0);
/// assert_eq!(summary.total_distance_km, 0.0);
/// assert_eq!(summary.utilisation, 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RouteSummary {
    /// Number of stops visited.
    pub poi_count: usize,
    /// Distance walked including any closing leg, in kilometres.
    pub total_distance_km: f64,
    /// Time walking including any closing leg, in minutes.
    pub walking_minutes: f64,
    /// Time spent at stops, in minutes.
    pub visiting_minutes: f64,
    /// Budget the route was planned against, in minutes.
    pub requested_minutes: f64,
    /// `(walking + visiting) / requested`, or `0.0` for a non-positive
    /// budget.
    pub utilisation: f64,
    /// Unused budget in minutes. Negative when a lenient closing leg
    /// overshoots.
    pub remaining_minutes: f64,
    /// Length of the walk back to the start, for circular routes.
    pub closing_leg_km: Option<f64>,
}

impl RouteSummary {
    /// Compute totals for `route`.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "utilisation and remaining budget are ratios and differences of minutes"
    )]
    pub fn from_route(route: &Route) -> Self {
        let walking_minutes = route.walking_minutes();
        let visiting_minutes = route.visiting_minutes();
        let elapsed = walking_minutes + visiting_minutes;
        let requested_minutes = route.request().duration_minutes;
        let utilisation = if requested_minutes > 0.0 {
            elapsed / requested_minutes
        } else {
            0.0
        };
        Self {
            poi_count: route.len(),
            total_distance_km: route.distance_km(),
            walking_minutes,
            visiting_minutes,
            requested_minutes,
            utilisation,
            remaining_minutes: requested_minutes.max(0.0) - elapsed,
            closing_leg_km: route.closing_leg().map(|leg| leg.distance_km),
        }
    }

    /// Walking plus visiting time, in minutes.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "elapsed time is a sum of minutes")]
    pub fn elapsed_minutes(&self) -> f64 {
        self.walking_minutes + self.visiting_minutes
    }
}

impl From<&Route> for RouteSummary {
    fn from(route: &Route) -> Self {
        Self::from_route(route)
    }
}

impl fmt::Display for RouteSummary {
    #[expect(
        clippy::float_arithmetic,
        reason = "utilisation is rendered as a percentage"
    )]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stops = if self.poi_count == 1 { "stop" } else { "stops" };
        writeln!(
            f,
            "{} {stops}, {:.2} km walked",
            self.poi_count, self.total_distance_km
        )?;
        writeln!(
            f,
            "walking {:.1} min, visiting {:.1} min",
            self.walking_minutes, self.visiting_minutes
        )?;
        write!(
            f,
            "used {:.1} of {:.1} min ({:.0}%), {:.1} min remaining",
            self.elapsed_minutes(),
            self.requested_minutes,
            self.utilisation * 100.0,
            self.remaining_minutes
        )?;
        if let Some(km) = self.closing_leg_km {
            write!(f, "\nclosing leg back to start {km:.2} km")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[expect(clippy::float_arithmetic, reason = "assertions compare minute totals")]
mod tests {
    use super::*;
    use crate::{ClosingLeg, PlanningRequest, Poi, RouteStep, lat_lng};
    use rstest::rstest;

    fn stop(id: &str) -> RouteStep {
        RouteStep {
            poi: Poi::new(id, id, lat_lng(0.0, 0.0)),
            distance_km: 0.5,
            walking_minutes: 6.0,
            visit_minutes: 10.0,
            score: 0.4,
        }
    }

    #[rstest]
    fn lenient_overshoot_reports_negative_remaining() {
        let request = PlanningRequest::new(lat_lng(0.0, 0.0), 24.0).with_circular(true);
        let leg = ClosingLeg {
            distance_km: 1.0,
            walking_minutes: 12.0,
        };
        let route = Route::new(request, vec![stop("a")], Some(leg)).expect("valid route");
        let summary = RouteSummary::from_route(&route);
        assert!((summary.remaining_minutes - -4.0).abs() < 1e-12);
        assert!((summary.utilisation - 28.0 / 24.0).abs() < 1e-12);
        assert_eq!(summary.closing_leg_km, Some(1.0));
    }

    #[rstest]
    #[case(0.0)]
    #[case(-10.0)]
    fn non_positive_budget_has_zero_utilisation(#[case] duration: f64) {
        let route = Route::empty(PlanningRequest::new(lat_lng(0.0, 0.0), duration));
        let summary = RouteSummary::from(&route);
        assert_eq!(summary.utilisation, 0.0);
        assert_eq!(summary.remaining_minutes, 0.0);
    }

    #[rstest]
    fn display_lists_totals() {
        let request = PlanningRequest::new(lat_lng(0.0, 0.0), 40.0);
        let route = Route::new(request, vec![stop("a"), stop("b")], None).expect("valid route");
        let text = RouteSummary::from_route(&route).to_string();
        assert_eq!(
            text,
            "2 stops, 1.00 km walked\n\
             walking 12.0 min, visiting 20.0 min\n\
             used 32.0 of 40.0 min (80%), 8.0 min remaining"
        );
    }
}
