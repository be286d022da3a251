//! `rank` command: score every catalog POI from one location.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use geo::Coord;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use ramble_core::{PlanningRequest, lat_lng};
use ramble_scorer::rank_pois;
use serde::{Deserialize, Serialize};

use crate::catalog::{load_catalog, load_novelty, load_profile};
use crate::fs::require_file;
use crate::output::{OutputFormat, write_ranking};
use crate::{
    ARG_CATALOG, ARG_LAT, ARG_LNG, ARG_NOVELTY, ARG_PROFILE, CliError, ENV_RANK_CATALOG,
    ENV_RANK_LAT, ENV_RANK_LNG,
};

/// CLI arguments for the `rank` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "rank",
    long_about = "Score every POI in a JSON catalog as seen from a single \
                 location and list them best first, with the interest, \
                 popularity, novelty and distance behind each score.",
    about = "Rank catalog POIs from a location"
)]
#[ortho_config(prefix = "RAMBLE")]
pub(crate) struct RankArgs {
    /// Path to the POI catalog JSON file.
    #[arg(value_name = "catalog")]
    #[serde(default)]
    pub(crate) catalog: Option<Utf8PathBuf>,
    /// Latitude to rank from, in degrees.
    #[arg(long = ARG_LAT, value_name = "deg", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lat: Option<f64>,
    /// Longitude to rank from, in degrees.
    #[arg(long = ARG_LNG, value_name = "deg", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lng: Option<f64>,
    /// Path to an interest profile JSON file (`{"tag": weight}`).
    #[arg(long = ARG_PROFILE, value_name = "path")]
    #[serde(default)]
    pub(crate) profile: Option<Utf8PathBuf>,
    /// Path to a novelty table JSON file from earlier tours.
    #[arg(long = ARG_NOVELTY, value_name = "path")]
    #[serde(default)]
    pub(crate) novelty: Option<Utf8PathBuf>,
    /// Show only the best `n` POIs.
    #[arg(long, value_name = "n")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    /// Output format.
    #[arg(long, value_enum)]
    #[serde(default)]
    pub(crate) format: Option<OutputFormat>,
}

impl RankArgs {
    pub(crate) fn into_config(self) -> Result<RankConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RankConfig::try_from(merged)
    }
}

/// Resolved `rank` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RankConfig {
    pub(crate) catalog: Utf8PathBuf,
    pub(crate) profile: Option<Utf8PathBuf>,
    pub(crate) novelty: Option<Utf8PathBuf>,
    pub(crate) location: Coord<f64>,
    pub(crate) limit: Option<usize>,
    pub(crate) format: OutputFormat,
}

impl RankConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_file(&self.catalog, ARG_CATALOG)?;
        if let Some(profile) = &self.profile {
            require_file(profile, ARG_PROFILE)?;
        }
        if let Some(novelty) = &self.novelty {
            require_file(novelty, ARG_NOVELTY)?;
        }
        Ok(())
    }
}

impl TryFrom<RankArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RankArgs) -> Result<Self, Self::Error> {
        let catalog = args.catalog.ok_or(CliError::MissingArgument {
            field: ARG_CATALOG,
            env: ENV_RANK_CATALOG,
        })?;
        let lat = args.lat.ok_or(CliError::MissingArgument {
            field: ARG_LAT,
            env: ENV_RANK_LAT,
        })?;
        let lng = args.lng.ok_or(CliError::MissingArgument {
            field: ARG_LNG,
            env: ENV_RANK_LNG,
        })?;
        Ok(Self {
            catalog,
            profile: args.profile,
            novelty: args.novelty,
            location: lat_lng(lat, lng),
            limit: args.limit,
            format: args.format.unwrap_or_default(),
        })
    }
}

pub(crate) fn run_rank(args: RankArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    run_rank_config(&config, writer)
}

/// Rank with an already resolved configuration.
pub(crate) fn run_rank_config(config: &RankConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let pois = load_catalog(&config.catalog)?;
    let profile = config.profile.as_deref().map(load_profile).transpose()?;
    let novelty = config.novelty.as_deref().map(load_novelty).transpose()?;

    // Ranking has no budget; the request only carries weights and novelty.
    let mut request = PlanningRequest::new(config.location, 0.0);
    if let Some(table) = novelty {
        request = request.with_novelty(table);
    }
    request.validate()?;

    let ranking = rank_pois(
        &pois,
        profile.as_ref(),
        config.location,
        &request,
        config.limit,
    );
    write_ranking(writer, config.format, &ranking)
}
