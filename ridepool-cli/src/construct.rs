//! `construct` command: build a route from a JSON construction request.

use std::io::Write;
use std::time::Duration;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use ridepool_core::PlanarDistance;
use ridepool_planner::{ConstructionRequest, ConstructorConfig, RouteConstructor};
use serde::{Deserialize, Serialize};

use crate::io::{load_json, write_json};
use crate::{ARG_INPUT, CliError, ENV_CONSTRUCT_INPUT};

/// CLI arguments for the `construct` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Build a route from an origin, a destination and queued \
                 passengers or parcels. The input is a JSON-encoded \
                 ConstructionRequest. Entries are ordered with a nearest \
                 neighbour pass refined by 2-opt, unless --listed asks for \
                 the order given in the file.",
    about = "Build a route from queued entries"
)]
#[ortho_config(prefix = "RIDEPOOL")]
pub(crate) struct ConstructArgs {
    /// Path to a JSON file containing a ConstructionRequest.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) input: Option<Utf8PathBuf>,
    /// Upper bound on 2-opt sweeps.
    #[arg(long, value_name = "count")]
    #[serde(default)]
    pub(crate) max_sweeps: Option<usize>,
    /// Wall-clock budget for the 2-opt phase, in milliseconds.
    #[arg(long, value_name = "ms")]
    #[serde(default)]
    pub(crate) time_limit_ms: Option<u64>,
    /// Visit entries in the order they are listed instead of optimising.
    #[arg(
        long,
        value_name = "bool",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    #[serde(default)]
    pub(crate) listed: Option<bool>,
}

impl ConstructArgs {
    pub(crate) fn into_config(self) -> Result<ConstructConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ConstructConfig::try_from(merged)
    }
}

/// Resolved `construct` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ConstructConfig {
    /// Path to the JSON request file.
    pub(crate) input: Utf8PathBuf,
    /// Search limits handed to the constructor.
    pub(crate) constructor: ConstructorConfig,
    /// Whether to keep the listed entry order.
    pub(crate) listed: bool,
}

impl TryFrom<ConstructArgs> for ConstructConfig {
    type Error = CliError;

    fn try_from(args: ConstructArgs) -> Result<Self, Self::Error> {
        let input = args.input.ok_or(CliError::MissingArgument {
            field: ARG_INPUT,
            env: ENV_CONSTRUCT_INPUT,
        })?;
        let defaults = ConstructorConfig::default();
        let constructor = ConstructorConfig {
            max_sweeps: args.max_sweeps.unwrap_or(defaults.max_sweeps),
            time_limit: args.time_limit_ms.map(Duration::from_millis),
        };
        Ok(Self {
            input,
            constructor,
            listed: args.listed.unwrap_or(false),
        })
    }
}

pub(crate) fn run_construct(args: ConstructArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_construct(&config, writer)
}

pub(crate) fn execute_construct(
    config: &ConstructConfig,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let request: ConstructionRequest = load_json(&config.input, "construction request")?;
    let constructor =
        RouteConstructor::with_config(PlanarDistance::default(), config.constructor.clone());
    if config.listed {
        let route = constructor.construct_sequential(&request)?;
        return write_json(writer, &route);
    }
    let construction = constructor.construct(&request)?;
    write_json(writer, &construction)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ConstructConfig, CliError> {
    let merged = ConstructArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ConstructConfig::try_from(merged)
}
