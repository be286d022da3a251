//! Rendering command results as text or JSON.

use std::io::Write;

use clap::ValueEnum;
use ramble_core::{PlanResponse, Route, RouteSummary, Termination};
use ramble_scorer::RankedPoi;
use serde::{Deserialize, Serialize};

use crate::CliError;

/// Output encoding for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable report.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

#[derive(Debug, Serialize)]
struct PlanReport<'a> {
    route: &'a Route,
    summary: RouteSummary,
    score: f64,
    termination: Termination,
}

pub(crate) fn write_plan(
    writer: &mut dyn Write,
    format: OutputFormat,
    response: &PlanResponse,
) -> Result<(), CliError> {
    let summary = RouteSummary::from_route(&response.route);
    match format {
        OutputFormat::Json => write_json(
            writer,
            &PlanReport {
                route: &response.route,
                summary,
                score: response.score,
                termination: response.diagnostics.termination,
            },
        ),
        OutputFormat::Text => {
            let mut text = String::new();
            for (position, step) in (1_usize..).zip(response.route.steps()) {
                text.push_str(&format!(
                    "{position:>2}. {} [{}] {:.2} km, {:.1} min walk, {:.1} min visit, score {:.3}\n",
                    step.poi.name,
                    step.poi.id,
                    step.distance_km,
                    step.walking_minutes,
                    step.visit_minutes,
                    step.score
                ));
            }
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(&format!(
                "{summary}\nstopped: {}\n",
                response.diagnostics.termination
            ));
            write_text(writer, &text)
        }
    }
}

pub(crate) fn write_ranking(
    writer: &mut dyn Write,
    format: OutputFormat,
    ranking: &[RankedPoi<'_>],
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => write_json(writer, &ranking),
        OutputFormat::Text => {
            let text: String = (1_usize..)
                .zip(ranking)
                .map(|(position, ranked)| {
                    format!(
                        "{position:>2}. {} [{}] {}\n",
                        ranked.poi.name, ranked.poi.id, ranked.breakdown
                    )
                })
                .collect();
            write_text(writer, &text)
        }
    }
}

fn write_json<T: Serialize + ?Sized>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)
}

fn write_text(writer: &mut dyn Write, text: &str) -> Result<(), CliError> {
    writer
        .write_all(text.as_bytes())
        .map_err(CliError::WriteOutput)
}
