//! Route Planner - Command Line Interface
//!
//! Reads customer waypoints from CSV and prints a short visiting order.

use clap::{Parser, Subcommand, ValueEnum};
use route_planner::input::{load_waypoints, random_waypoints, resolve_start, write_waypoints, GeoBounds};
use route_planner::{DistanceGraph, PlannerConfig, RoutePlanner};

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "route-planner")]
#[command(version = "1.0")]
#[command(about = "Plans a short visiting order over customer waypoints")]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a route over the waypoints in a CSV file
    Solve {
        #[arg(short, long)]
        input: PathBuf,

        /// Start waypoint: row index (0-based) or place name
        #[arg(short, long, default_value = "0")]
        start: String,

        /// JSON configuration file; flags below override it
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Average speed in km/h
        #[arg(long)]
        speed: Option<f64>,

        /// Distance model
        #[arg(short, long, value_enum)]
        model: Option<Model>,

        /// Construction heuristic
        #[arg(long, value_enum)]
        construction: Option<ConstructionArg>,

        /// Return to the start at the end of the route
        #[arg(long)]
        closed: bool,

        /// Skip 2-opt / Or-opt improvement
        #[arg(long)]
        no_local_search: bool,

        /// Write the summary as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print distance statistics for a CSV file
    Analyze {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long, value_enum, default_value = "haversine")]
        model: Model,
    },

    /// Write random waypoints to a CSV file
    Generate {
        /// Number of waypoints
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,

        /// Random seed
        #[arg(short, long, default_value = "42")]
        seed: u64,

        #[arg(short, long)]
        output: PathBuf,

        #[arg(long, default_value = "12.75")]
        min_lat: f64,
        #[arg(long, default_value = "13.20")]
        max_lat: f64,
        #[arg(long, default_value = "77.35")]
        min_lon: f64,
        #[arg(long, default_value = "77.80")]
        max_lon: f64,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum Model {
    /// Great circle on the mean Earth sphere
    Haversine,
    /// Karney geodesic on the WGS-84 ellipsoid
    Geodesic,
}

impl From<Model> for route_planner::DistanceModel {
    fn from(model: Model) -> Self {
        match model {
            Model::Haversine => route_planner::DistanceModel::Haversine,
            Model::Geodesic => route_planner::DistanceModel::Geodesic,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum ConstructionArg {
    /// Nearest Neighbor
    Nn,
    /// Cheapest Insertion
    Insertion,
    /// Best of all constructions
    Best,
}

impl From<ConstructionArg> for route_planner::Construction {
    fn from(arg: ConstructionArg) -> Self {
        match arg {
            ConstructionArg::Nn => route_planner::Construction::NearestNeighbor,
            ConstructionArg::Insertion => route_planner::Construction::CheapestInsertion,
            ConstructionArg::Best => route_planner::Construction::Best,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let result = match cli.command {
        Commands::Solve {
            input,
            start,
            config,
            speed,
            model,
            construction,
            closed,
            no_local_search,
            output,
        } => solve(
            &input,
            &start,
            config,
            speed,
            model,
            construction,
            closed,
            no_local_search,
            output,
        ),

        Commands::Analyze { input, model } => analyze(&input, model),

        Commands::Generate {
            count,
            seed,
            output,
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        } => {
            let bounds = GeoBounds {
                min_latitude: min_lat,
                max_latitude: max_lat,
                min_longitude: min_lon,
                max_longitude: max_lon,
            };
            generate(count, seed, &bounds, &output)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[allow(clippy::too_many_arguments)]
fn solve(
    path: &PathBuf,
    start: &str,
    config_path: Option<PathBuf>,
    speed: Option<f64>,
    model: Option<Model>,
    construction: Option<ConstructionArg>,
    closed: bool,
    no_local_search: bool,
    output: Option<PathBuf>,
) -> route_planner::Result<()> {
    let mut config = match config_path {
        Some(p) => PlannerConfig::from_json_file(p)?,
        None => PlannerConfig::default(),
    };
    if let Some(speed) = speed {
        config.average_speed_kmh = speed;
    }
    if let Some(model) = model {
        config.distance_model = model.into();
    }
    if let Some(construction) = construction {
        config.solver.construction = construction.into();
    }
    if closed {
        config.solver.shape = route_planner::RouteShape::Closed;
    }
    if no_local_search {
        config.solver.local_search = false;
    }

    let waypoints = load_waypoints(path)?;
    let start_id = resolve_start(&waypoints, start)?;
    let planner = RoutePlanner::new(config)?;

    let timer = Instant::now();
    let summary = planner.plan(&waypoints, start_id)?;
    log::info!("Planning took {:.3}s", timer.elapsed().as_secs_f64());

    println!("{}", summary);

    if let Some(out_path) = output {
        let writer = BufWriter::new(File::create(&out_path)?);
        serde_json::to_writer_pretty(writer, &summary)?;
        println!("Summary saved to {:?}", out_path);
    }

    Ok(())
}

fn analyze(path: &PathBuf, model: Model) -> route_planner::Result<()> {
    let waypoints = load_waypoints(path)?;
    let graph = DistanceGraph::build(&waypoints, model.into())?;
    println!("{}", graph.statistics());
    Ok(())
}

fn generate(count: usize, seed: u64, bounds: &GeoBounds, output: &PathBuf) -> route_planner::Result<()> {
    bounds.validate()?;
    let waypoints = random_waypoints(count, seed, bounds);
    write_waypoints(BufWriter::new(File::create(output)?), &waypoints)?;
    println!("Wrote {} waypoints to {:?}", waypoints.len(), output);
    Ok(())
}
