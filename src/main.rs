mod script;

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use mask_canvas::codec::{self, CodecError};
use mask_canvas::config::{ConfigError, EditorConfig};
use mask_canvas::doc::{RegionMode, RegionSet};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;


#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("invalid polygon data: {0}")]
    Codec(#[from] CodecError),
    #[error("invalid editor config: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to read config {path}: {source}")]
    ConfigFile { path: String, source: io::Error },
    #[error("script line {line}: {source}")]
    Script { line: usize, source: serde_json::Error },
}

#[derive(Parser, Debug)]
#[command(name = "polymask", about = "Polygon mask editor driver")]
struct Cli {
    #[command(flatten)]
    editor: EditorArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct EditorArgs {
    /// JSON file of editor settings; omitted keys keep their defaults.
    #[arg(long, global = true, env = "POLYMASK_CONFIG")]
    config: Option<PathBuf>,

    /// Region slots; 1 selects the single-region editor.
    #[arg(long, global = true, env = "POLYMASK_REGIONS")]
    regions: Option<usize>,

    #[arg(long, global = true, env = "POLYMASK_VERTEX_HIT_RADIUS")]
    vertex_hit_radius: Option<f64>,

    #[arg(long, global = true, env = "POLYMASK_EDGE_HIT_DISTANCE")]
    edge_hit_distance: Option<f64>,
}

impl EditorArgs {
    /// Config file (or the multi-region preset), then flag overrides.
    fn resolve(&self) -> Result<EditorConfig, CliError> {
        let base = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .map_err(|source| CliError::ConfigFile { path: path.display().to_string(), source })?;
                serde_json::from_str(&text)?
            }
            None => EditorConfig::multi(),
        };
        Ok(self.apply(base)?)
    }

    fn apply(&self, base: EditorConfig) -> Result<EditorConfig, ConfigError> {
        let config = EditorConfig {
            region_count: self.regions.unwrap_or(base.region_count),
            vertex_hit_radius: self.vertex_hit_radius.unwrap_or(base.vertex_hit_radius),
            edge_hit_distance: self.edge_hit_distance.unwrap_or(base.edge_hit_distance),
            ..base
        };
        config.validate()?;
        Ok(config)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a JSON-lines event script and print the final persisted state.
    Replay {
        #[arg(long, default_value = "-", help = "Script file path, or - for stdin")]
        input: String,
    },
    /// Print vertex count, mode and fill eligibility of each region.
    Inspect { polygon_data: String },
    /// Print the canonical encoding of the given polygon data.
    Normalize { polygon_data: String },
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.editor.resolve()?;

    match cli.command {
        Command::Replay { input } => run_replay(&input, config),
        Command::Inspect { polygon_data } => run_inspect(&polygon_data, config),
        Command::Normalize { polygon_data } => {
            println!("{}", normalize(&polygon_data, config));
            Ok(())
        }
    }
}

fn run_replay(input: &str, config: EditorConfig) -> Result<(), CliError> {
    let reader: Box<dyn BufRead> = if input == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        Box::new(BufReader::new(File::open(input)?))
    };
    let replay = script::replay(reader, config)?;
    print_json(&serde_json::to_value(replay.persisted_state())?)
}

fn run_inspect(polygon_data: &str, config: EditorConfig) -> Result<(), CliError> {
    let mut set = RegionSet::new(config.region_count);
    codec::try_decode_into(polygon_data, &mut set)?;
    print_json(&inspect(&set))
}

/// One summary row per region slot.
fn inspect(set: &RegionSet) -> Value {
    let rows: Vec<Value> = set
        .regions()
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let mode = match r.mode {
                RegionMode::Add => "add",
                RegionMode::Subtract => "subtract",
            };
            json!({
                "region": i,
                "vertices": r.len(),
                "mode": mode,
                "fill_eligible": r.is_fill_eligible(),
            })
        })
        .collect();
    Value::Array(rows)
}

/// Decode leniently, then re-encode.
fn normalize(polygon_data: &str, config: EditorConfig) -> String {
    codec::encode(&codec::decode(polygon_data, config.region_count))
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
