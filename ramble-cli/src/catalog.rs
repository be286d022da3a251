//! Loading POI catalogs, interest profiles and novelty tables from JSON.
//!
//! Catalog files hold a `pois` array of records shaped like:
//!
//! ```json
//! {
//!   "id": "richmond_003",
//!   "name": "Richmond Castle",
//!   "geo": { "lat": 54.4021, "lng": -1.7378 },
//!   "vibe_tags": ["history", "medieval"],
//!   "facts": ["Built in 1071"],
//!   "source_reliability": 0.9
//! }
//! ```
//!
//! Tags come from `vibe_tags`, or from `tags` when that field is a list.
//! Object-valued `tags` (raw map metadata) are ignored.

use std::collections::BTreeMap;
use std::io::BufReader;

use camino::Utf8Path;
use log::{debug, warn};
use ramble_core::{InterestProfile, NoveltyTable, Poi, Tag, TagError, lat_lng};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::CliError;
use crate::fs::open_utf8_file;

/// Popularity assumed for a record with no enrichment.
pub(crate) const BASE_POPULARITY: f64 = 0.5;
/// Popularity bonus for records carrying facts.
pub(crate) const FACTS_BONUS: f64 = 0.3;
/// Popularity bonus for records carrying visual cues.
pub(crate) const VISUAL_CUES_BONUS: f64 = 0.1;

/// Why a single catalog record was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogRecordError {
    /// The record's coordinates are outside WGS84 bounds.
    #[error("coordinates ({lat}, {lng}) are out of range")]
    CoordinateOutOfRange {
        /// Latitude in degrees.
        lat: f64,
        /// Longitude in degrees.
        lng: f64,
    },
    /// A tag was empty after normalisation.
    #[error("invalid tag: {0}")]
    Tag(#[from] TagError),
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    pois: Vec<CatalogRecord>,
}

#[derive(Debug, Deserialize)]
struct GeoRecord {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct CatalogRecord {
    id: String,
    name: String,
    geo: GeoRecord,
    #[serde(default)]
    visit_minutes: Option<f64>,
    #[serde(default)]
    popularity: Option<f64>,
    #[serde(default)]
    vibe_tags: Option<Vec<String>>,
    #[serde(default)]
    tags: Option<serde_json::Value>,
    #[serde(default)]
    facts: Vec<serde_json::Value>,
    #[serde(default)]
    visual_cues: Vec<serde_json::Value>,
    #[serde(default)]
    source_reliability: Option<f64>,
    #[serde(default)]
    embedding: Option<Vec<f32>>,
}

impl CatalogRecord {
    /// Popularity from enrichment signals when the record carries none.
    #[expect(clippy::float_arithmetic, reason = "popularity bonuses accumulate")]
    fn derived_popularity(&self) -> f64 {
        let mut score = BASE_POPULARITY;
        if !self.facts.is_empty() {
            score += FACTS_BONUS;
        }
        if !self.visual_cues.is_empty() {
            score += VISUAL_CUES_BONUS;
        }
        if let Some(reliability) = self.source_reliability {
            score = score.max(reliability);
        }
        score.min(1.0)
    }

    fn raw_tags(&self) -> Vec<&str> {
        if let Some(tags) = &self.vibe_tags {
            return tags.iter().map(String::as_str).collect();
        }
        match &self.tags {
            Some(serde_json::Value::Array(items)) => {
                items.iter().filter_map(serde_json::Value::as_str).collect()
            }
            _ => Vec::new(),
        }
    }

    fn into_poi(self) -> Result<Poi, CatalogRecordError> {
        let (lat, lng) = (self.geo.lat, self.geo.lng);
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(CatalogRecordError::CoordinateOutOfRange { lat, lng });
        }
        let tags = self
            .raw_tags()
            .into_iter()
            .map(Tag::new)
            .collect::<Result<Vec<_>, _>>()?;
        let popularity = self
            .popularity
            .unwrap_or_else(|| self.derived_popularity());

        let mut poi = Poi::new(self.id, self.name, lat_lng(lat, lng))
            .with_popularity(popularity)
            .with_tags(tags);
        if let Some(minutes) = self.visit_minutes {
            poi = poi.with_visit_minutes(minutes);
        }
        if let Some(embedding) = self.embedding {
            poi = poi.with_embedding(embedding);
        }
        Ok(poi)
    }
}

fn read_json<T: DeserializeOwned>(path: &Utf8Path, field: &'static str) -> Result<T, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenInput {
        field,
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ParseInput {
        field,
        path: path.to_path_buf(),
        source,
    })
}

/// Load every POI in a catalog file.
pub(crate) fn load_catalog(path: &Utf8Path) -> Result<Vec<Poi>, CliError> {
    let file: CatalogFile = read_json(path, crate::ARG_CATALOG)?;
    if file.pois.is_empty() {
        warn!("catalog {path} contains no POIs");
    }
    let pois = file
        .pois
        .into_iter()
        .map(|record| {
            let id = record.id.clone();
            record
                .into_poi()
                .map_err(|source| CliError::InvalidCatalogRecord {
                    path: path.to_path_buf(),
                    id,
                    source,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    debug!("loaded {} POIs from {path}", pois.len());
    Ok(pois)
}

/// Load an interest profile stored as a `{tag: weight}` object.
pub(crate) fn load_profile(path: &Utf8Path) -> Result<InterestProfile, CliError> {
    let raw: BTreeMap<String, f64> = read_json(path, crate::ARG_PROFILE)?;
    raw.into_iter()
        .map(|(key, weight)| match Tag::new(&key) {
            Ok(tag) => Ok((tag, weight)),
            Err(source) => Err(CliError::InvalidProfileTag {
                path: path.to_path_buf(),
                tag: key,
                source,
            }),
        })
        .collect()
}

/// Load a serialised novelty table.
pub(crate) fn load_novelty(path: &Utf8Path) -> Result<NoveltyTable, CliError> {
    read_json(path, crate::ARG_NOVELTY)
}
