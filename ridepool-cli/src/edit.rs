//! Commands that edit or project an existing route: `insert`, `reorder` and
//! `timeline`.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use ridepool_core::{PlanarDistance, Request, Route};
use ridepool_planner::{
    CostModel, DeliveredFirst, OrderPolicy, Permissive, ReorderDelta, RouteStats, ServiceTimes,
    TimelinePoint, apply_reorder, deviation_of_reorder, insert_request, preview_reorder,
    route_stats, stops_to_points,
};
use serde::{Deserialize, Serialize};

use crate::CliError;
use crate::io::{load_json, write_json};

/// CLI arguments for the `insert` subcommand.
#[derive(Debug, Clone, Parser)]
#[command(
    long_about = "Splice an accepted request into a committed route. The input \
                 is a JSON object holding the current route and the request; \
                 the splice is checked against --policy and the updated \
                 route is printed.",
    about = "Insert a request into a route"
)]
pub(crate) struct InsertArgs {
    /// Path to a JSON file with `route` and `request` fields.
    #[arg(value_name = "path")]
    pub(crate) input: Utf8PathBuf,
    /// Order rule enforced on the updated route.
    #[arg(long, value_enum, default_value_t)]
    pub(crate) policy: PolicyArg,
}

#[derive(Debug, Deserialize)]
struct InsertInput {
    route: Route,
    request: Request,
}

pub(crate) fn run_insert(args: &InsertArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let input: InsertInput = load_json(&args.input, "insertion input")?;
    let route = insert_request(
        &input.route,
        &input.request,
        args.policy.policy(),
        &PlanarDistance::default(),
    )?;
    write_json(writer, &route)
}

/// Structural rule checked when an edit is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum PolicyArg {
    /// Accept any order.
    #[default]
    Permissive,
    /// Keep delivered stops ahead of outstanding ones.
    DeliveredFirst,
}

impl PolicyArg {
    fn policy(self) -> &'static dyn OrderPolicy {
        match self {
            Self::Permissive => &Permissive,
            Self::DeliveredFirst => &DeliveredFirst,
        }
    }
}

/// CLI arguments for the `reorder` subcommand.
#[derive(Debug, Clone, Parser)]
#[command(
    long_about = "Move the stop at --from to --to. With --preview the route \
                 is printed in its new order, ETAs untouched, alongside the \
                 change in length and drive time. Without it the move is \
                 checked against --policy and committed with fresh ETAs.",
    about = "Move a stop within a route"
)]
pub(crate) struct ReorderArgs {
    /// Path to a JSON file containing the route.
    #[arg(value_name = "path")]
    pub(crate) route: Utf8PathBuf,
    /// Index of the stop to move.
    #[arg(long)]
    pub(crate) from: usize,
    /// Index the stop should end up at.
    #[arg(long)]
    pub(crate) to: usize,
    /// Print the preview and its cost instead of committing.
    #[arg(long)]
    pub(crate) preview: bool,
    /// Order rule enforced when committing.
    #[arg(long, value_enum, default_value_t)]
    pub(crate) policy: PolicyArg,
}

#[derive(Debug, Serialize)]
struct ReorderPreview {
    route: Route,
    delta: ReorderDelta,
}

pub(crate) fn run_reorder(args: &ReorderArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let route: Route = load_json(&args.route, "route")?;
    let distance = PlanarDistance::default();
    if args.preview {
        let preview = ReorderPreview {
            route: preview_reorder(&route, args.from, args.to)?,
            delta: deviation_of_reorder(&route, args.from, args.to, &distance)?,
        };
        return write_json(writer, &preview);
    }
    let moved = apply_reorder(&route, args.from, args.to, args.policy.policy(), &distance)?;
    write_json(writer, &moved)
}

/// CLI arguments for the `timeline` subcommand.
#[derive(Debug, Clone, Parser)]
#[command(
    long_about = "Expand a route into its pickup and drop-off points with \
                 running ETAs and distances, and summarise its length, load, \
                 cost and earnings.",
    about = "Show a route as a point timeline"
)]
pub(crate) struct TimelineArgs {
    /// Path to a JSON file containing the route.
    #[arg(value_name = "path")]
    pub(crate) route: Utf8PathBuf,
    /// Minutes spent at each pickup.
    #[arg(long, value_name = "minutes")]
    pub(crate) pickup_minutes: Option<f64>,
    /// Minutes spent at each drop-off.
    #[arg(long, value_name = "minutes")]
    pub(crate) dropoff_minutes: Option<f64>,
    /// Length of the route to compare efficiency against.
    #[arg(long, value_name = "km")]
    pub(crate) base_distance_km: Option<f64>,
}

impl TimelineArgs {
    fn service_times(&self) -> ServiceTimes {
        let defaults = ServiceTimes::default();
        ServiceTimes {
            pickup_minutes: self.pickup_minutes.unwrap_or(defaults.pickup_minutes),
            dropoff_minutes: self.dropoff_minutes.unwrap_or(defaults.dropoff_minutes),
        }
    }
}

#[derive(Debug, Serialize)]
struct TimelineOutput {
    points: Vec<TimelinePoint>,
    stats: RouteStats,
}

pub(crate) fn run_timeline(args: &TimelineArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let route: Route = load_json(&args.route, "route")?;
    let distance = PlanarDistance::default();
    let output = TimelineOutput {
        points: stops_to_points(&route, &args.service_times(), &distance),
        stats: route_stats(
            &route,
            args.base_distance_km,
            &CostModel::default(),
            &distance,
        ),
    };
    write_json(writer, &output)
}
