// Grid Replay
// Drives the time-grid engine from JSON scenario files

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Duration;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use time_grid::services::settings::SettingsService;
use time_grid::{
    apply_patches, merge_range_sets, CalendarEngine, Commit, DayWindow, EngineOutput, GridSettings,
    Hit, PointerEvent, PointerEventKind, PointerSample, PositionedItem, RangeSet, TimeInterval,
};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Replay pointer gestures against the time-grid engine",
    long_about = None
)]
struct Cli {
    /// Grid settings file (defaults to the platform config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print positioned items for every day of a scenario's window
    Layout {
        scenario: PathBuf,
    },
    /// Feed a scenario's pointer events through the engine
    Replay {
        scenario: PathBuf,
    },
    /// Merge two range sets with a gap tolerance
    Merge {
        base: PathBuf,
        incoming: PathBuf,
        /// Gap in minutes below which ranges fuse (defaults to settings)
        #[arg(short, long)]
        tolerance: Option<i64>,
    },
    /// Write the default grid settings file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Deserialize)]
struct Scenario {
    window: DayWindow,
    #[serde(default)]
    items: Vec<TimeInterval>,
    #[serde(default)]
    ranges: RangeSet,
    #[serde(default)]
    events: Vec<ScenarioEvent>,
}

#[derive(Debug, Deserialize)]
struct ScenarioEvent {
    kind: PointerEventKind,
    #[serde(default)]
    sample: PointerSample,
    /// Item under the pointer on `down`. Resolved by hit testing when absent.
    #[serde(default)]
    hit: Option<Hit>,
    /// Pointer position across the day column, for hit testing.
    #[serde(default = "default_cross_pct")]
    cross_pct: f64,
}

fn default_cross_pct() -> f64 {
    50.0
}

#[derive(Debug, Serialize)]
struct LayoutReport {
    grid_lines: Vec<f64>,
    items: Vec<PositionedItem>,
}

#[derive(Debug, Serialize)]
struct ReplayReport {
    steps: Vec<EngineOutput>,
    items: Vec<TimeInterval>,
    ranges: RangeSet,
    selection: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;

    match &cli.command {
        Commands::Layout { scenario } => {
            let scenario = read_scenario(scenario)?;
            let engine = CalendarEngine::new(&settings, scenario.window)?;
            let report = LayoutReport {
                grid_lines: engine.grid_lines(),
                items: engine.positioned(&scenario.items),
            };
            print_json(&report, cli.pretty)
        }
        Commands::Replay { scenario } => {
            let scenario = read_scenario(scenario)?;
            let report = replay(&settings, scenario)?;
            print_json(&report, cli.pretty)
        }
        Commands::Merge {
            base,
            incoming,
            tolerance,
        } => {
            let base: RangeSet = read_json(base)?;
            let incoming: RangeSet = read_json(incoming)?;
            let tolerance = tolerance.unwrap_or(settings.merge_tolerance_minutes).max(0);
            let merged = merge_range_sets(&base, &incoming, Duration::minutes(tolerance));
            print_json(&merged, cli.pretty)
        }
        Commands::InitConfig { force } => {
            let path = settings_path(cli.config.as_deref())?;
            if path.exists() && !force {
                anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
            }
            SettingsService::save(&path, &GridSettings::default())?;
            println!("Wrote {}", path.display());
            Ok(())
        }
    }
}

fn replay(settings: &GridSettings, scenario: Scenario) -> Result<ReplayReport> {
    let mut engine = CalendarEngine::new(settings, scenario.window)?;
    engine.set_ranges(scenario.ranges);
    let mut items = scenario.items;
    let mut steps = Vec::with_capacity(scenario.events.len());

    for step in &scenario.events {
        let event = PointerEvent {
            kind: step.kind,
            sample: step.sample,
        };
        let hit = match &step.hit {
            Some(hit) => Some(hit.clone()),
            None => {
                let positioned = engine.positioned(&items);
                engine.hit_test(&positioned, &event.sample, step.cross_pct)
            }
        };

        let output = engine.handle(&event, hit.as_ref(), &items);
        if let EngineOutput::Committed(Commit::Items(patches)) = &output {
            items = apply_patches(&items, patches);
        }
        log::debug!("{:?} -> {:?}", event.kind, output);
        steps.push(output);
    }

    Ok(ReplayReport {
        steps,
        items,
        ranges: engine.ranges().clone(),
        selection: engine.selection().iter().map(str::to_string).collect(),
    })
}

fn settings_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => SettingsService::default_path()
            .context("could not determine a config directory; pass --config"),
    }
}

fn load_settings(explicit: Option<&Path>) -> Result<GridSettings> {
    match settings_path(explicit) {
        Ok(path) => SettingsService::load_or_default(&path),
        Err(_) if explicit.is_none() => Ok(GridSettings::default()),
        Err(err) => Err(err),
    }
}

fn read_scenario(path: &Path) -> Result<Scenario> {
    read_json(path)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("failed to parse {}", path.display()))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}
