//! Greedy route planner for ramble.
//!
//! This crate provides [`GreedyPlanner`], the default implementation of the
//! [`Planner`](ramble_core::Planner) trait. Starting from the request's start
//! point, it repeatedly moves to the best-scoring point of interest whose walk
//! and visit still fit the remaining time budget, and stops when nothing else
//! fits.
//!
//! The planner is generic over a [`Scorer`](ramble_core::Scorer), so callers
//! can swap the relevance model without touching route construction. Every
//! call works on its own state and reads the catalog without mutating it, so
//! a single planner can serve concurrent requests.
//!
//! Routes are deterministic: the same request over the same catalog yields an
//! identical route regardless of catalog order. Score ties go to the smaller
//! POI id.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod planner;

pub use planner::{GreedyPlanner, GreedyPlannerConfig};
