//! Core domain types for the ramble walking-tour engine.
//!
//! The crate defines points of interest, interest profiles, planning
//! requests and routes, along with the [`Scorer`] and [`Planner`] traits
//! implemented by the scoring and solver crates. Great-circle distance and
//! walking-time helpers live here so every crate measures the world the same
//! way.
//!
//! Nothing in this crate performs I/O. Catalogs arrive already loaded and
//! routes leave as plain values; persistence is the caller's business.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod distance;
mod novelty;
mod planner;
mod poi;
mod profile;
mod request;
mod route;
mod scorer;
mod summary;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use distance::{
    DEFAULT_WALKING_SPEED_KMH, EARTH_RADIUS_KM, haversine_km, lat_lng, offset_north,
    travel_minutes, walking_minutes,
};
pub use novelty::NoveltyTable;
pub use planner::{Diagnostics, PlanError, PlanResponse, Planner, Termination};
pub use poi::{DEFAULT_VISIT_MINUTES, Poi, PoiId, Tag, TagError, Tags};
pub use profile::InterestProfile;
pub use request::{ClosingLegPolicy, InvalidInputError, PlanningRequest, ScoringWeights};
pub use route::{ClosingLeg, Route, RouteError, RouteStep};
pub use scorer::{Scorer, ScoringContext};
pub use summary::RouteSummary;
