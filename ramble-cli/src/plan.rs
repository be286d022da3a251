//! `plan` command: build a walking route from a catalog.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use geo::Coord;
use log::debug;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use ramble_core::{
    ClosingLegPolicy, DEFAULT_WALKING_SPEED_KMH, NoveltyTable, PlanResponse, Planner,
    PlanningRequest, ScoringWeights, lat_lng,
};
use ramble_scorer::WeightedScorer;
use ramble_solver_greedy::GreedyPlanner;
use serde::{Deserialize, Serialize};

use crate::catalog::{load_catalog, load_novelty, load_profile};
use crate::fs::require_file;
use crate::output::{OutputFormat, write_plan};
use crate::{
    ARG_CATALOG, ARG_DURATION, ARG_NOVELTY, ARG_PROFILE, ARG_START_LAT, ARG_START_LNG, CliError,
    ENV_PLAN_CATALOG, ENV_PLAN_DURATION, ENV_PLAN_START_LAT, ENV_PLAN_START_LNG,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "plan",
    long_about = "Plan a walking tour through the POIs in a JSON catalog. \
                 Stops are chosen greedily by relevance until the time \
                 budget runs out. Options can come from CLI flags, \
                 configuration files, or environment variables.",
    about = "Plan a time-boxed walking route"
)]
#[ortho_config(prefix = "RAMBLE")]
pub(crate) struct PlanArgs {
    /// Path to the POI catalog JSON file.
    #[arg(value_name = "catalog")]
    #[serde(default)]
    pub(crate) catalog: Option<Utf8PathBuf>,
    /// Start latitude in degrees.
    #[arg(long = ARG_START_LAT, value_name = "deg", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) start_lat: Option<f64>,
    /// Start longitude in degrees.
    #[arg(long = ARG_START_LNG, value_name = "deg", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) start_lng: Option<f64>,
    /// Time budget in minutes.
    #[arg(long = ARG_DURATION, value_name = "minutes", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) duration: Option<f64>,
    /// Walking speed in km/h (default 5).
    #[arg(long, value_name = "kmh")]
    #[serde(default)]
    pub(crate) walking_speed: Option<f64>,
    /// Visit time applied to every stop, overriding catalog values.
    #[arg(long, value_name = "minutes")]
    #[serde(default)]
    pub(crate) visit_minutes: Option<f64>,
    /// Return to the start when the route ends.
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    #[serde(default)]
    pub(crate) circular: Option<bool>,
    /// Only choose stops that leave time for the walk back to the start.
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    #[serde(default)]
    pub(crate) strict_closing_leg: Option<bool>,
    /// Path to an interest profile JSON file (`{"tag": weight}`).
    #[arg(long = ARG_PROFILE, value_name = "path")]
    #[serde(default)]
    pub(crate) profile: Option<Utf8PathBuf>,
    /// Path to a novelty table JSON file from earlier tours.
    #[arg(long = ARG_NOVELTY, value_name = "path")]
    #[serde(default)]
    pub(crate) novelty: Option<Utf8PathBuf>,
    /// Output format.
    #[arg(long, value_enum)]
    #[serde(default)]
    pub(crate) format: Option<OutputFormat>,
    /// Interest weight (α).
    #[arg(long, value_name = "weight", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) alpha: Option<f64>,
    /// Popularity weight (β).
    #[arg(long, value_name = "weight", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) beta: Option<f64>,
    /// Novelty weight (γ).
    #[arg(long, value_name = "weight", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) gamma: Option<f64>,
    /// Distance penalty per kilometre (δ).
    #[arg(long, value_name = "weight", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) delta: Option<f64>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlanConfig {
    /// Path to the POI catalog.
    pub(crate) catalog: Utf8PathBuf,
    /// Optional interest profile path.
    pub(crate) profile: Option<Utf8PathBuf>,
    /// Optional novelty table path.
    pub(crate) novelty: Option<Utf8PathBuf>,
    pub(crate) start: Coord<f64>,
    pub(crate) duration_minutes: f64,
    pub(crate) walking_speed_kmh: f64,
    pub(crate) visit_minutes: Option<f64>,
    pub(crate) circular: bool,
    pub(crate) closing_leg: ClosingLegPolicy,
    pub(crate) weights: ScoringWeights,
    pub(crate) format: OutputFormat,
}

impl PlanConfig {
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

    /// Build the planning request, attaching `novelty` when present.
    pub(crate) fn request(&self, novelty: Option<NoveltyTable>) -> PlanningRequest {
        let mut request = PlanningRequest::new(self.start, self.duration_minutes)
            .with_walking_speed(self.walking_speed_kmh)
            .with_circular(self.circular)
            .with_closing_leg(self.closing_leg)
            .with_weights(self.weights);
        if let Some(minutes) = self.visit_minutes {
            request = request.with_visit_minutes(minutes);
        }
        if let Some(table) = novelty {
            request = request.with_novelty(table);
        }
        request
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let catalog = args.catalog.ok_or(CliError::MissingArgument {
            field: ARG_CATALOG,
            env: ENV_PLAN_CATALOG,
        })?;
        let lat = args.start_lat.ok_or(CliError::MissingArgument {
            field: ARG_START_LAT,
            env: ENV_PLAN_START_LAT,
        })?;
        let lng = args.start_lng.ok_or(CliError::MissingArgument {
            field: ARG_START_LNG,
            env: ENV_PLAN_START_LNG,
        })?;
        let duration_minutes = args.duration.ok_or(CliError::MissingArgument {
            field: ARG_DURATION,
            env: ENV_PLAN_DURATION,
        })?;

        let defaults = ScoringWeights::default();
        let weights = ScoringWeights {
            interest: args.alpha.unwrap_or(defaults.interest),
            popularity: args.beta.unwrap_or(defaults.popularity),
            novelty: args.gamma.unwrap_or(defaults.novelty),
            distance: args.delta.unwrap_or(defaults.distance),
        };
        let closing_leg = if args.strict_closing_leg.unwrap_or(false) {
            ClosingLegPolicy::Strict
        } else {
            ClosingLegPolicy::Lenient
        };

        Ok(Self {
            catalog,
            profile: args.profile,
            novelty: args.novelty,
            start: lat_lng(lat, lng),
            duration_minutes,
            walking_speed_kmh: args.walking_speed.unwrap_or(DEFAULT_WALKING_SPEED_KMH),
            visit_minutes: args.visit_minutes,
            circular: args.circular.unwrap_or(false),
            closing_leg,
            weights,
            format: args.format.unwrap_or_default(),
        })
    }
}

pub(crate) fn run_plan(args: PlanArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    run_plan_config(&config, writer)
}

/// Plan with an already resolved configuration.
pub(crate) fn run_plan_config(config: &PlanConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let response = execute_plan(config)?;
    write_plan(writer, config.format, &response)
}

pub(crate) fn execute_plan(config: &PlanConfig) -> Result<PlanResponse, CliError> {
    let pois = load_catalog(&config.catalog)?;
    let profile = config.profile.as_deref().map(load_profile).transpose()?;
    let novelty = config.novelty.as_deref().map(load_novelty).transpose()?;
    let request = config.request(novelty);

    let response = GreedyPlanner::new(WeightedScorer).plan(&pois, &request, profile.as_ref())?;
    debug!(
        "planned {} stops in {:?}",
        response.route.len(),
        response.diagnostics.solve_time
    );
    Ok(response)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
