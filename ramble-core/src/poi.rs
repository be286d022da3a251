//! Points of interest and the tags that describe them.
//!
//! Tags are normalised on construction so that `"Medieval"`, `" medieval "`
//! and `"medieval"` compare equal. A POI's tags form an ordered set, which
//! keeps interest matching independent of the order a catalog lists them in.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use geo::Coord;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minutes spent at a stop when the catalog does not specify a duration.
pub const DEFAULT_VISIT_MINUTES: f64 = 5.0;

/// Stable identifier of a point of interest.
///
/// Identifiers order lexicographically. The route builder relies on this
/// ordering to break score ties deterministically.
///
/// # Examples
/// ```
/// use ramble_core::PoiId;
///
/// let castle = PoiId::new("richmond_001");
/// let abbey = PoiId::new("richmond_002");
/// assert!(castle < abbey);
/// assert_eq!(castle.as_str(), "richmond_001");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct PoiId(String);

impl PoiId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PoiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PoiId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PoiId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Errors returned by [`Tag::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    /// The tag contained nothing but separators or whitespace.
    #[error("tag must contain at least one non-separator character")]
    Empty,
}

/// A normalised descriptive tag such as `history` or `haunted`.
///
/// Normalisation lower-cases the input, trims it, and folds runs of
/// whitespace, underscores and hyphens into a single `-`.
///
/// # Examples
/// ```
/// use ramble_core::Tag;
///
/// let tag = Tag::new("  Stately_Home ")?;
/// assert_eq!(tag.as_str(), "stately-home");
/// assert_eq!(tag, Tag::new("stately home")?);
/// # Ok::<(), ramble_core::TagError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Tag(String);

impl Tag {
    /// Normalise and validate a raw tag.
    ///
    /// # Errors
    /// Returns [`TagError::Empty`] when nothing remains after normalisation.
    pub fn new(raw: &str) -> Result<Self, TagError> {
        let normalised = raw
            .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
            .filter(|part| !part.is_empty())
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("-");
        if normalised.is_empty() {
            return Err(TagError::Empty);
        }
        Ok(Self(normalised))
    }

    /// Borrow the normalised tag text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Tag {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Tag {
    type Error = TagError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Tag> for String {
    fn from(value: Tag) -> Self {
        value.0
    }
}

/// Ordered set of tags attached to a point of interest.
pub type Tags = BTreeSet<Tag>;

/// A location worth visiting on a walk.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. POIs are
/// treated as immutable for the duration of a planning call.
///
/// # Examples
/// ```
/// use ramble_core::{Poi, Tag, lat_lng};
///
/// let poi = Poi::new("castle", "Richmond Castle", lat_lng(54.4021, -1.7378))
///     .with_visit_minutes(15.0)
///     .with_popularity(0.9)
///     .with_tag(Tag::new("medieval")?);
///
/// assert_eq!(poi.id.as_str(), "castle");
/// assert!(poi.has_tag(&Tag::new("Medieval")?));
/// # Ok::<(), ramble_core::TagError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "PoiParts")
)]
pub struct Poi {
    /// Unique identifier.
    pub id: PoiId,
    /// Display name.
    pub name: String,
    /// Geospatial position.
    pub location: Coord<f64>,
    /// Expected time spent at the stop, in minutes.
    pub visit_minutes: f64,
    /// Normalised popularity in `0.0..=1.0`.
    pub popularity: f64,
    /// Descriptive tags used for interest matching.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Tags,
    /// Optional precomputed content vector. Carried for downstream
    /// collaborators; planning never reads it.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub embedding: Option<Vec<f32>>,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct PoiParts {
    id: PoiId,
    name: String,
    location: Coord<f64>,
    visit_minutes: f64,
    popularity: f64,
    #[serde(default)]
    tags: Tags,
    #[serde(default)]
    embedding: Option<Vec<f32>>,
}

#[cfg(feature = "serde")]
impl From<PoiParts> for Poi {
    fn from(parts: PoiParts) -> Self {
        Self {
            id: parts.id,
            name: parts.name,
            location: parts.location,
            visit_minutes: sanitise_minutes(parts.visit_minutes),
            popularity: sanitise_unit(parts.popularity),
            tags: parts.tags,
            embedding: parts.embedding,
        }
    }
}

impl Poi {
    /// Construct a POI with default visit duration, zero popularity and no
    /// tags.
    pub fn new(id: impl Into<PoiId>, name: impl Into<String>, location: Coord<f64>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location,
            visit_minutes: DEFAULT_VISIT_MINUTES,
            popularity: 0.0,
            tags: Tags::new(),
            embedding: None,
        }
    }

    /// Set the visit duration. Negative or non-finite values become `0.0`.
    #[must_use]
    pub fn with_visit_minutes(mut self, minutes: f64) -> Self {
        self.visit_minutes = sanitise_minutes(minutes);
        self
    }

    /// Set the popularity, clamped into `0.0..=1.0`. Non-finite values
    /// become `0.0`.
    #[must_use]
    pub fn with_popularity(mut self, popularity: f64) -> Self {
        self.popularity = sanitise_unit(popularity);
        self
    }

    /// Add a single tag.
    #[must_use]
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.insert(tag);
        self
    }

    /// Add every tag from `tags`.
    #[must_use]
    pub fn with_tags<I>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = Tag>,
    {
        self.tags.extend(tags);
        self
    }

    /// Attach an opaque content vector.
    #[must_use]
    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    /// Report whether the POI carries `tag`.
    #[must_use]
    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }
}

pub(crate) fn sanitise_minutes(minutes: f64) -> f64 {
    if minutes.is_finite() && minutes > 0.0 {
        minutes
    } else {
        0.0
    }
}

pub(crate) fn sanitise_unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare floats within a tolerance"
)]
mod tests {
    use super::*;
    use crate::lat_lng;
    use rstest::rstest;

    #[rstest]
    #[case("history", "history")]
    #[case("  History ", "history")]
    #[case("stately_home", "stately-home")]
    #[case("Stately   Home", "stately-home")]
    #[case("--bridge--", "bridge")]
    fn tags_normalise(#[case] raw: &str, #[case] expected: &str) {
        let tag = Tag::new(raw).expect("tag should be valid");
        assert_eq!(tag.as_str(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("_-_")]
    fn blank_tags_are_rejected(#[case] raw: &str) {
        assert_eq!(Tag::new(raw), Err(TagError::Empty));
    }

    #[rstest]
    #[case(-3.0, 0.0)]
    #[case(f64::NAN, 0.0)]
    #[case(f64::INFINITY, 0.0)]
    #[case(12.5, 12.5)]
    fn visit_minutes_are_sanitised(#[case] input: f64, #[case] expected: f64) {
        let poi = Poi::new("a", "A", lat_lng(0.0, 0.0)).with_visit_minutes(input);
        assert!((poi.visit_minutes - expected).abs() < f64::EPSILON);
    }

    #[rstest]
    #[case(1.4, 1.0)]
    #[case(-0.2, 0.0)]
    #[case(f64::NAN, 0.0)]
    #[case(0.35, 0.35)]
    fn popularity_is_clamped(#[case] input: f64, #[case] expected: f64) {
        let poi = Poi::new("a", "A", lat_lng(0.0, 0.0)).with_popularity(input);
        assert!((poi.popularity - expected).abs() < f64::EPSILON);
    }

    #[rstest]
    fn duplicate_tags_collapse() {
        let poi = Poi::new("a", "A", lat_lng(0.0, 0.0)).with_tags([
            Tag::new("Ruins").expect("valid tag"),
            Tag::new("ruins").expect("valid tag"),
        ]);
        assert_eq!(poi.tags.len(), 1);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn decoding_sanitises_visit_minutes_and_popularity() {
        let json = r#"{
            "id": "far",
            "name": "Far",
            "location": {"x": -1.74, "y": 54.43},
            "visit_minutes": -100.0,
            "popularity": 3.5,
            "tags": ["History"]
        }"#;
        let poi: Poi = serde_json::from_str(json).expect("poi should decode");
        assert_eq!(poi.visit_minutes, 0.0);
        assert_eq!(poi.popularity, 1.0);
        assert!(poi.has_tag(&Tag::new("history").expect("valid tag")));

        let encoded = serde_json::to_string(&poi).expect("poi should encode");
        let decoded: Poi = serde_json::from_str(&encoded).expect("poi should decode");
        assert_eq!(decoded, poi);
    }

    #[rstest]
    fn ids_order_lexicographically() {
        let mut ids = vec![PoiId::new("b"), PoiId::new("a10"), PoiId::new("a2")];
        ids.sort();
        let ordered: Vec<&str> = ids.iter().map(PoiId::as_str).collect();
        assert_eq!(ordered, ["a10", "a2", "b"]);
    }
}
