//! `rank` command: rank inbound requests against a route.

use std::io::Write;

use camino::Utf8PathBuf;
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use ridepool_core::{DriverProfile, PlanarDistance, Request, Route};
use ridepool_planner::{
    MatchMode, MatchThresholds, find_compatible_passengers, find_matching_requests,
};
use serde::{Deserialize, Serialize};

use crate::io::{load_json, write_json};
use crate::{ARG_DATE, ARG_SNAPSHOT, CliError, ENV_RANK_DATE, ENV_RANK_SNAPSHOT};

/// Which matching limits to rank with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ModeArg {
    /// The trip has not started; tight detour limits.
    #[default]
    Planning,
    /// The driver is on the road; report deviation and heading per match.
    Live,
}

impl From<ModeArg> for MatchMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Planning => Self::Planning,
            ModeArg::Live => Self::Live,
        }
    }
}

/// CLI arguments for the `rank` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank the requests in a snapshot against its route and \
                 driver profile. The snapshot is a JSON object with `route`, \
                 `requests` and `profile` fields. Planning mode prints the \
                 surviving requests best first; live mode also prints each \
                 request's detour and heading agreement.",
    about = "Rank requests against a route"
)]
#[ortho_config(prefix = "RIDEPOOL")]
pub(crate) struct RankArgs {
    /// Path to a JSON snapshot of route, requests and driver profile.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) snapshot: Option<Utf8PathBuf>,
    /// Travel date to rank for, as `YYYY-MM-DD`.
    #[arg(long = ARG_DATE, value_name = "date")]
    #[serde(default)]
    pub(crate) date: Option<String>,
    /// Matching mode.
    #[arg(long, value_enum)]
    #[serde(default)]
    pub(crate) mode: Option<ModeArg>,
    /// Override the largest acceptable detour, in kilometres.
    #[arg(long, value_name = "km")]
    #[serde(default)]
    pub(crate) max_distance_km: Option<f64>,
    /// Override the largest acceptable detour, in minutes.
    #[arg(long, value_name = "minutes")]
    #[serde(default)]
    pub(crate) max_time_minutes: Option<u32>,
    /// Override the smallest acceptable heading agreement in `0..=1`.
    #[arg(long, value_name = "ratio")]
    #[serde(default)]
    pub(crate) min_direction_match: Option<f64>,
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
    /// Path to the JSON snapshot.
    pub(crate) snapshot: Utf8PathBuf,
    /// Requests for other dates are ignored.
    pub(crate) date: NaiveDate,
    /// Matching mode.
    pub(crate) mode: MatchMode,
    /// Mode defaults with any overrides applied.
    pub(crate) thresholds: MatchThresholds,
}

impl TryFrom<RankArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RankArgs) -> Result<Self, Self::Error> {
        let snapshot = args.snapshot.ok_or(CliError::MissingArgument {
            field: ARG_SNAPSHOT,
            env: ENV_RANK_SNAPSHOT,
        })?;
        let raw_date = args.date.ok_or(CliError::MissingArgument {
            field: ARG_DATE,
            env: ENV_RANK_DATE,
        })?;
        let date = NaiveDate::parse_from_str(raw_date.trim(), "%Y-%m-%d").map_err(|source| {
            CliError::InvalidDate {
                value: raw_date.clone(),
                source,
            }
        })?;

        let mode = MatchMode::from(args.mode.unwrap_or_default());
        let defaults = mode.thresholds();
        let min_direction_match = args
            .min_direction_match
            .unwrap_or(defaults.min_direction_match);
        if !(0.0..=1.0).contains(&min_direction_match) {
            return Err(CliError::InvalidDirectionMatch {
                value: min_direction_match,
            });
        }
        let thresholds = MatchThresholds {
            max_distance_km: args.max_distance_km.unwrap_or(defaults.max_distance_km),
            max_time_minutes: args.max_time_minutes.unwrap_or(defaults.max_time_minutes),
            min_direction_match,
        };

        Ok(Self {
            snapshot,
            date,
            mode,
            thresholds,
        })
    }
}

/// Everything the matcher looks at, as stored on disk.
#[derive(Debug, Deserialize)]
pub(crate) struct RankSnapshot {
    pub(crate) route: Route,
    #[serde(default)]
    pub(crate) requests: Vec<Request>,
    pub(crate) profile: DriverProfile,
}

pub(crate) fn run_rank(args: RankArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_rank(&config, writer)
}

pub(crate) fn execute_rank(config: &RankConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let snapshot: RankSnapshot = load_json(&config.snapshot, "request snapshot")?;
    let distance = PlanarDistance::default();
    match config.mode {
        MatchMode::Planning => {
            let ranked = find_matching_requests(
                &snapshot.route,
                &snapshot.requests,
                &snapshot.profile,
                config.date,
                &config.thresholds,
                &distance,
            );
            write_json(writer, &ranked)
        }
        MatchMode::Live => {
            let ranked = find_compatible_passengers(
                &snapshot.route,
                &snapshot.requests,
                &snapshot.profile,
                config.date,
                &config.thresholds,
                &distance,
            );
            write_json(writer, &ranked)
        }
    }
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RankConfig, CliError> {
    let merged = RankArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RankConfig::try_from(merged)
}
