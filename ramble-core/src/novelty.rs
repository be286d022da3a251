//! Prior-usage counts that let planners favour rarely visited POIs.
//!
//! A [`NoveltyTable`] records how many tours have been planned and how often
//! each POI appeared in them. Planning reads the table; it never writes it.
//! Callers that want novelty to evolve across calls feed finished routes
//! back through [`NoveltyTable::record_route`] and persist the table
//! themselves.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{PoiId, Route};

/// Visit counts across previously planned tours.
///
/// # Examples
/// ```
/// use ramble_core::{NoveltyTable, PoiId};
///
/// let castle = PoiId::new("castle");
/// let table = NoveltyTable::new()
///     .with_tours(4)
///     .with_visits(castle.clone(), 1);
/// assert_eq!(table.frequency(&castle), 0.25);
/// assert_eq!(table.novelty(&castle), 0.75);
/// assert_eq!(table.novelty(&PoiId::new("abbey")), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NoveltyTable {
    /// Number of tours the counts were gathered from.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tours_recorded: u32,
    /// Appearances of each POI across those tours.
    #[cfg_attr(feature = "serde", serde(default))]
    pub visits: BTreeMap<PoiId, u32>,
}

impl NoveltyTable {
    /// Construct an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of recorded tours.
    #[must_use]
    pub const fn with_tours(mut self, tours: u32) -> Self {
        self.tours_recorded = tours;
        self
    }

    /// Set the visit count for `id`.
    #[must_use]
    pub fn with_visits(mut self, id: PoiId, visits: u32) -> Self {
        self.visits.insert(id, visits);
        self
    }

    /// Number of recorded appearances of `id`.
    #[must_use]
    pub fn visits(&self, id: &PoiId) -> u32 {
        self.visits.get(id).copied().unwrap_or_default()
    }

    /// Fraction of recorded tours that included `id`, capped at `1.0`.
    ///
    /// Returns `0.0` when no tours have been recorded.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "frequency is a ratio of visit and tour counts"
    )]
    pub fn frequency(&self, id: &PoiId) -> f64 {
        if self.tours_recorded == 0 {
            return 0.0;
        }
        let ratio = f64::from(self.visits(id)) / f64::from(self.tours_recorded);
        ratio.min(1.0)
    }

    /// `1 - frequency(id)`, in `0.0..=1.0`.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "novelty is the complement of frequency")]
    pub fn novelty(&self, id: &PoiId) -> f64 {
        1.0 - self.frequency(id)
    }

    /// Count `route` as one more tour and bump every POI it visits.
    ///
    /// Empty routes still count as a tour.
    ///
    /// # Examples
    /// ```
    /// use ramble_core::{NoveltyTable, Route, PlanningRequest, lat_lng};
    ///
    /// let request = PlanningRequest::new(lat_lng(54.40, -1.74), 0.0);
    /// let mut table = NoveltyTable::new();
    /// table.record_route(&Route::empty(request));
    /// assert_eq!(table.tours_recorded, 1);
    /// ```
    pub fn record_route(&mut self, route: &Route) {
        self.tours_recorded = self.tours_recorded.saturating_add(1);
        for id in route.poi_ids() {
            let count = self.visits.entry(id.clone()).or_default();
            *count = count.saturating_add(1);
        }
    }
}
