//! Interest profiles: per-tag user preference weights.
//!
//! Weights are non-negative reals expressing relative interest. An empty
//! profile means "no particular preference" and scores every POI as a
//! neutral match; the absence of a profile is modelled by callers as
//! `Option<&InterestProfile>`.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Tag, Tags};

/// User interest weighting across tags.
///
/// # Examples
/// ```
/// use ramble_core::{InterestProfile, Tag};
///
/// let history = Tag::new("history")?;
/// let profile = InterestProfile::new()
///     .with_weight(history.clone(), 0.8)
///     .with_weight(Tag::new("ghosts")?, 0.2);
/// assert_eq!(profile.weight(&history), Some(0.8));
/// assert!((profile.total_weight() - 1.0).abs() < 1e-12);
/// # Ok::<(), ramble_core::TagError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "BTreeMap<Tag, f64>", into = "BTreeMap<Tag, f64>")
)]
pub struct InterestProfile {
    weights: BTreeMap<Tag, f64>,
}

impl InterestProfile {
    /// Construct an empty profile.
    ///
    /// # Examples
    /// ```
    /// use ramble_core::InterestProfile;
    ///
    /// let profile = InterestProfile::new();
    /// assert!(profile.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a profile from `(tag, weight)` pairs. Later pairs overwrite
    /// earlier ones for the same tag.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Tag, f64)>,
    {
        let mut profile = Self::new();
        for (tag, weight) in pairs {
            profile.set_weight(tag, weight);
        }
        profile
    }

    /// Return the weight for a tag, if present.
    #[must_use]
    pub fn weight(&self, tag: &Tag) -> Option<f64> {
        self.weights.get(tag).copied()
    }

    /// Insert or update a tag weight.
    ///
    /// Negative and non-finite weights are stored as `0.0`.
    ///
    /// # Examples
    /// ```
    /// use ramble_core::{InterestProfile, Tag};
    ///
    /// let mut profile = InterestProfile::new();
    /// profile.set_weight(Tag::new("bridges")?, -2.0);
    /// assert_eq!(profile.weight(&Tag::new("bridges")?), Some(0.0));
    /// # Ok::<(), ramble_core::TagError>(())
    /// ```
    pub fn set_weight(&mut self, tag: Tag, weight: f64) {
        let clamped = if weight.is_finite() {
            weight.max(0.0)
        } else {
            0.0
        };
        self.weights.insert(tag, clamped);
    }

    /// Add a tag weight while returning `self` for chaining.
    #[must_use]
    pub fn with_weight(mut self, tag: Tag, weight: f64) -> Self {
        self.set_weight(tag, weight);
        self
    }

    /// Report whether the profile has no tags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Number of weighted tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Sum of every weight in the profile.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.weights.values().sum()
    }

    /// Sum of the weights of profile tags present in `tags`.
    ///
    /// # Examples
    /// ```
    /// use ramble_core::{InterestProfile, Tag, Tags};
    ///
    /// let profile = InterestProfile::new()
    ///     .with_weight(Tag::new("history")?, 0.6)
    ///     .with_weight(Tag::new("art")?, 0.4);
    /// let tags: Tags = [Tag::new("History")?, Tag::new("pubs")?].into_iter().collect();
    /// assert!((profile.matched_weight(&tags) - 0.6).abs() < 1e-12);
    /// # Ok::<(), ramble_core::TagError>(())
    /// ```
    #[must_use]
    pub fn matched_weight(&self, tags: &Tags) -> f64 {
        self.weights
            .iter()
            .filter(|(tag, _)| tags.contains(*tag))
            .map(|(_, weight)| *weight)
            .sum()
    }

    /// Iterate over `(tag, weight)` pairs in tag order.
    pub fn weights(&self) -> impl Iterator<Item = (&Tag, f64)> {
        self.weights.iter().map(|(tag, weight)| (tag, *weight))
    }
}

impl From<BTreeMap<Tag, f64>> for InterestProfile {
    fn from(weights: BTreeMap<Tag, f64>) -> Self {
        Self::from_pairs(weights)
    }
}

impl From<InterestProfile> for BTreeMap<Tag, f64> {
    fn from(profile: InterestProfile) -> Self {
        profile.weights
    }
}

impl FromIterator<(Tag, f64)> for InterestProfile {
    fn from_iter<I: IntoIterator<Item = (Tag, f64)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}
