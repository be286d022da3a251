//! Relevance scoring for ramble points of interest.
//!
//! A POI's score blends four signals, each scaled by a coefficient from the
//! request's [`ScoringWeights`](ramble_core::ScoringWeights):
//!
//! ```text
//! score = α·interest + β·popularity + γ·novelty − δ·distance_km
//! ```
//!
//! - **interest** is the share of the visitor's profile weight carried by the
//!   POI's tags. An empty profile is a neutral `0.5`; no profile at all
//!   contributes nothing.
//! - **popularity** comes straight from the catalog.
//! - **novelty** is `1 − frequency` from the request's
//!   [`NoveltyTable`](ramble_core::NoveltyTable), or `0` without one.
//! - **distance** is the raw great-circle distance from the current location.
//!
//! Scores are relative. Negative values are valid and are never clamped.
//!
//! [`WeightedScorer`] exposes the formula through the
//! [`Scorer`](ramble_core::Scorer) trait so planners can use it, and
//! [`rank_pois`] orders a catalog from a fixed location.
//!
//! # Examples
//!
//! ```
//! use ramble_core::{InterestProfile, PlanningRequest, Poi, Tag, lat_lng};
//! use ramble_scorer::score_poi;
//!
//! let here = lat_lng(54.4025, -1.7367);
//! let request = PlanningRequest::new(here, 60.0);
//! let profile = InterestProfile::new().with_weight(Tag::new("history")?, 1.0);
//! let castle = Poi::new("castle", "Richmond Castle", here)
//!     .with_popularity(0.9)
//!     .with_tag(Tag::new("history")?);
//!
//! let score = score_poi(&castle, Some(&profile), here, &request);
//! assert!((score - 0.68).abs() < 1e-12);
//! # Ok::<(), ramble_core::TagError>(())
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod breakdown;
mod rank;
mod weighted;

pub use breakdown::ScoreBreakdown;
pub use rank::{RankedPoi, rank_pois};
pub use weighted::{NEUTRAL_INTEREST, WeightedScorer, interest_match, score_breakdown, score_poi};
