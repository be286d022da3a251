//! Shared test harness modules for the Ramble CLI.

use super::*;

mod helpers;
mod rank_unit;
