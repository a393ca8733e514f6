use anyhow::Context;
use clap::{Parser, Subcommand};
use log::{debug, info};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;

use jyotish::chart::{ChartTextProvider, EphemerisChartText};
use jyotish::ephemeris::NodeConvention;
use jyotish::place::{CountryTable, NearestPlaceZones, PlaceDatabase, PlaceResolution, PlaceResolver};
use jyotish::{local_offset, ChartOrchestrator, ChartRequest, SwissEphemerisAdapter};
use jyotish_config::{load_settings, JyotishSettings};

/// Exit status when the place could not be pinned down.
const EXIT_UNRESOLVED: u8 = 2;

#[derive(Parser, Debug)]
#[command(author, version, about = "Sidereal chart calculator")]
struct Args {
    /// Config file (default: configs/jyotish.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a place, work out its UTC offset and compute the chart.
    Chart {
        #[arg(long)]
        name: String,
        /// Local date, YYYY-MM-DD.
        #[arg(long)]
        date: String,
        /// Local time, 24-hour HH:MM.
        #[arg(long)]
        time: String,
        /// "City, Country".
        #[arg(long)]
        place: String,
        /// Lunar node for Rahu: true or mean (overrides config).
        #[arg(long)]
        node: Option<NodeConvention>,
    },
    /// Resolve a place name to coordinates and a time zone.
    Resolve {
        place: String,
    },
    /// UTC offset in hours for a local date and time in an IANA zone.
    Offset {
        #[arg(long)]
        date: String,
        #[arg(long)]
        time: String,
        #[arg(long)]
        zone: String,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let args = Args::parse();
    let settings = load_settings(args.config.as_deref())?;
    debug!("Settings: {:?}", settings);

    match args.command {
        Command::Chart {
            name,
            date,
            time,
            place,
            node,
        } => run_chart(&settings, name, date, time, &place, node),
        Command::Resolve { place } => {
            let db = load_places(&settings)?;
            let resolution = resolver(&settings, db).resolve(&place);
            print_json(&resolution)?;
            Ok(exit_for(&resolution))
        }
        Command::Offset { date, time, zone } => {
            let offset = local_offset(&date, &time, &zone)?;
            print_json(&json!({ "zone": zone, "offset_hours": offset }))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// True when there is non-blank text after the last comma.
fn has_country(place: &str) -> bool {
    place
        .rsplit_once(',')
        .map_or(false, |(_, qualifier)| !qualifier.trim().is_empty())
}

fn run_chart(
    settings: &JyotishSettings,
    name: String,
    date: String,
    time: String,
    place: &str,
    node: Option<NodeConvention>,
) -> anyhow::Result<ExitCode> {
    if settings.chart.require_country && !has_country(place) {
        let bare = place.trim().trim_end_matches(',').trim_end();
        anyhow::bail!("Place must include a country, e.g. \"{}, Slovenia\"", bare);
    }

    let db = load_places(settings)?;
    let resolution = resolver(settings, db).resolve(place);
    let location = match resolution {
        PlaceResolution::Resolved(location) => location,
        unresolved => {
            print_json(&unresolved)?;
            return Ok(exit_for(&unresolved));
        }
    };

    let offset_hours = local_offset(&date, &time, &location.timezone)?;
    info!("{} is {} (UTC{:+}) on {}", location.name, location.timezone, offset_hours, date);

    let ephemeris = SwissEphemerisAdapter::new(settings.ephemeris.resolved_path())
        .context("Swiss Ephemeris is not available")?;
    let text = EphemerisChartText::new(&ephemeris);

    let mut orchestrator = ChartOrchestrator::new(&ephemeris).with_node(node.unwrap_or(settings.ephemeris.node));
    if settings.chart.text_provider {
        orchestrator = orchestrator.with_text_provider(&text as &dyn ChartTextProvider);
    }

    let request = ChartRequest {
        name,
        date,
        time,
        place: location.name.clone(),
        latitude: location.latitude,
        longitude: location.longitude,
        offset_hours,
    };
    let outcome = orchestrator.run_cascade(&request)?;
    print_json(&outcome)?;
    Ok(ExitCode::SUCCESS)
}

fn load_places(settings: &JyotishSettings) -> anyhow::Result<&'static PlaceDatabase> {
    match &settings.places.database {
        Some(path) => PlaceDatabase::load_shared(path, settings.places.format)
            .with_context(|| format!("Failed to load place database {}", path.display())),
        None => Ok(PlaceDatabase::bundled()),
    }
}

fn resolver<'a>(settings: &JyotishSettings, db: &'a PlaceDatabase) -> PlaceResolver<'a> {
    let zones = NearestPlaceZones::new(db).with_max_distance(settings.places.zone_radius_km);
    PlaceResolver::with_parts(db, CountryTable::shared(), zones)
}

fn exit_for(resolution: &PlaceResolution) -> ExitCode {
    if resolution.is_resolved() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_UNRESOLVED)
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
