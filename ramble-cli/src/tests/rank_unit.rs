//! Focused unit tests covering the rank command.

use super::helpers::{START_LAT, START_LNG, Workspace, output_string};
use super::rank::{RankArgs, RankConfig, run_rank_config};
use super::*;
use ramble_core::lat_lng;
use rstest::{fixture, rstest};

#[fixture]
fn workspace() -> Workspace {
    Workspace::new()
}

fn config_for(workspace: &Workspace) -> RankConfig {
    RankConfig {
        catalog: workspace.catalog(),
        profile: Some(workspace.write("profile.json", r#"{"history": 1.0}"#)),
        novelty: None,
        location: lat_lng(START_LAT, START_LNG),
        limit: None,
        format: OutputFormat::Text,
    }
}

fn run_to_string(config: &RankConfig) -> String {
    let mut buffer = Vec::new();
    run_rank_config(config, &mut buffer).expect("rank should succeed");
    output_string(buffer)
}

#[rstest]
fn converting_rank_without_location_errors() {
    let args = RankArgs {
        catalog: Some("catalog.json".into()),
        lat: Some(START_LAT),
        ..RankArgs::default()
    };
    match RankConfig::try_from(args).expect_err("missing longitude") {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_LNG);
            assert_eq!(env, ENV_RANK_LNG);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn text_ranking_puts_interests_first(workspace: Workspace) {
    let output = run_to_string(&config_for(&workspace));
    let first = output.lines().next().expect("at least one line");
    assert!(first.starts_with(" 1. Richmond Castle [richmond_003]"), "{output}");
    assert!(first.contains("interest 1.00"), "{output}");
    assert_eq!(output.lines().count(), 3);
}

#[rstest]
fn json_ranking_honours_limit(workspace: Workspace) {
    let config = RankConfig {
        limit: Some(2),
        format: OutputFormat::Json,
        ..config_for(&workspace)
    };
    let output = run_to_string(&config);
    let ranking: serde_json::Value = serde_json::from_str(&output).expect("json ranking");
    let ids: Vec<&str> = ranking
        .as_array()
        .expect("ranking array")
        .iter()
        .filter_map(|entry| entry["poi"]["id"].as_str())
        .collect();
    assert_eq!(ids, ["richmond_003", "richmond_002"]);
}

#[rstest]
fn novelty_table_lowers_seen_pois(workspace: Workspace) {
    let config = RankConfig {
        novelty: Some(workspace.write(
            "novelty.json",
            r#"{"tours_recorded": 2, "visits": {"richmond_002": 2}}"#,
        )),
        format: OutputFormat::Json,
        ..config_for(&workspace)
    };
    let output = run_to_string(&config);
    let ranking: serde_json::Value = serde_json::from_str(&output).expect("json ranking");
    let novelty_of = |id: &str| {
        ranking
            .as_array()
            .expect("ranking array")
            .iter()
            .find(|entry| entry["poi"]["id"] == id)
            .and_then(|entry| entry["breakdown"]["novelty"].as_f64())
            .expect("POI ranked with novelty")
    };
    assert_eq!(novelty_of("richmond_002"), 0.0);
    assert_eq!(novelty_of("richmond_001"), 1.0);
}

#[rstest]
fn out_of_range_location_is_rejected(workspace: Workspace) {
    let config = RankConfig {
        location: lat_lng(91.0, 0.0),
        ..config_for(&workspace)
    };
    let mut buffer = Vec::new();
    let err = run_rank_config(&config, &mut buffer).expect_err("latitude out of range");
    assert!(matches!(err, CliError::InvalidRequest(_)), "{err:?}");
}
