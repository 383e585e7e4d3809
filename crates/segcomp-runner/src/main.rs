use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};
use segcomp_common::{Route, RouteSet};
use segcomp_dem::TileStore;
use segcomp_routes::{RouteIdentifier, RouteLoader};
use segcomp_runner::{pipeline, prompt, PipelineSettings, SegcompConfig};
use std::io;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Segment elevation comparisons and contour maps", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct GlobalArgs {
    /// YAML configuration file
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Directory of SRTM tiles (overrides the config file)
    #[arg(long, global = true, value_hint = ValueHint::DirPath)]
    tiles: Option<PathBuf>,

    /// Access token for the segment API
    #[arg(long, global = true, env = "STRAVA_ACCESS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Verbose logging
    #[arg(short, long, global = true, action = ArgAction::SetTrue)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Elevation profiles of several routes on one chart
    Compare(CompareArgs),
    /// Contour map around a single route
    Map(MapArgs),
    /// Comparison chart plus one contour map per route
    Dashboard(DashboardArgs),
}

#[derive(Parser, Debug)]
struct CompareArgs {
    /// Segment IDs or GPX files (asked for when omitted)
    ids: Vec<String>,

    /// Output SVG path
    #[arg(short, long, default_value = "comparison.svg", value_hint = ValueHint::FilePath)]
    output: PathBuf,
}

#[derive(Parser, Debug)]
struct MapArgs {
    /// Segment ID or GPX file (asked for when omitted)
    id: Option<String>,

    /// Output SVG path
    #[arg(short, long, default_value = "map.svg", value_hint = ValueHint::FilePath)]
    output: PathBuf,
}

#[derive(Parser, Debug)]
struct DashboardArgs {
    /// Segment IDs or GPX files (asked for when omitted)
    ids: Vec<String>,

    /// Output SVG path
    #[arg(short, long, default_value = "dashboard.svg", value_hint = ValueHint::FilePath)]
    output: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.global.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let mut config = match &cli.global.config {
        Some(path) => SegcompConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SegcompConfig::default(),
    };
    if let Some(tiles) = &cli.global.tiles {
        config.tiles_dir = tiles.clone();
    }

    match cli.command {
        Command::Compare(args) => handle_compare(args, cli.global, &config),
        Command::Map(args) => handle_map(args, cli.global, &config),
        Command::Dashboard(args) => handle_dashboard(args, cli.global, &config),
    }
}

fn handle_compare(args: CompareArgs, global: GlobalArgs, config: &SegcompConfig) -> Result<()> {
    let ids = ask_identifiers(&args.ids)?;
    let routes = load_routes(&ids, global.token, config)?;
    let store = open_store(config)?;

    pipeline::run_compare(
        &store,
        &routes,
        &PipelineSettings::from(config),
        &args.output,
        config.chart_size,
    )?;
    log_store_stats(&store);
    Ok(())
}

fn handle_map(args: MapArgs, global: GlobalArgs, config: &SegcompConfig) -> Result<()> {
    let stdin = io::stdin();
    let id = prompt::collect_identifier(args.id.as_deref(), &mut stdin.lock(), &mut io::stdout())?;
    let Some(id) = id else {
        bail!("No segment ID or GPX file given");
    };
    let routes = load_routes(std::slice::from_ref(&id), global.token, config)?;
    let route: Route = routes
        .into_routes()
        .into_iter()
        .next()
        .context("No route loaded")?;
    let store = open_store(config)?;

    pipeline::run_map(
        &store,
        &route,
        &PipelineSettings::from(config),
        &args.output,
        config.map_size,
    )?;
    log_store_stats(&store);
    Ok(())
}

fn handle_dashboard(args: DashboardArgs, global: GlobalArgs, config: &SegcompConfig) -> Result<()> {
    let ids = ask_identifiers(&args.ids)?;
    let routes = load_routes(&ids, global.token, config)?;
    let store = open_store(config)?;

    pipeline::run_dashboard(
        &store,
        &routes,
        &PipelineSettings::from(config),
        &args.output,
        config.dashboard_cell_size,
    )?;
    log_store_stats(&store);
    Ok(())
}

fn ask_identifiers(args: &[String]) -> Result<Vec<RouteIdentifier>> {
    let stdin = io::stdin();
    let ids = prompt::collect_identifiers(args, &mut stdin.lock(), &mut io::stdout())?;
    if ids.is_empty() {
        bail!("No segment IDs or GPX files given");
    }
    Ok(ids)
}

/// Load every identifier, asking for a token first when one is needed.
fn load_routes(
    ids: &[RouteIdentifier],
    token: Option<String>,
    config: &SegcompConfig,
) -> Result<RouteSet> {
    let stdin = io::stdin();
    let token = prompt::resolve_token(ids, token, &mut stdin.lock(), &mut io::stdout())?;
    let loader = RouteLoader::connect(&config.api_base_url, token.as_deref())
        .context("Failed to create segment API client")?;

    let report = loader.load(ids);
    if report.routes.is_empty() {
        bail!("None of the {} routes could be loaded", ids.len());
    }
    info!(
        "Loaded {} of {} routes",
        report.routes.len(),
        ids.len()
    );
    Ok(report.routes)
}

fn open_store(config: &SegcompConfig) -> Result<TileStore> {
    let store = TileStore::open(&config.tiles_dir)
        .with_context(|| format!("Failed to open tile directory {}", config.tiles_dir.display()))?
        .with_sampling(config.sampling.into());
    debug!(
        "Indexed {} tiles in {}, {:?} sampling",
        store.stats().indexed,
        store.tiles_dir().display(),
        store.sampling()
    );
    Ok(store)
}

fn log_store_stats(store: &TileStore) {
    let stats = store.stats();
    debug!(
        "Tile store: {} indexed, {} loaded, {} lookups",
        stats.indexed, stats.loaded, stats.lookups
    );
}
