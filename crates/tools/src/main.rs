use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use formats::FeatureBatch;
use foundation::math::{ViewState, Viewport, WebMercatorViewport};
use layers::Layer;
use layers::boundaries::BoundariesLayer;
use layers::labels::{PlacementConfig, PlacementMode};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Boundary label placement from GeoJSON")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Place labels for every polygon of a FeatureCollection and print them as JSON
    Labels {
        /// GeoJSON FeatureCollection
        input: PathBuf,

        #[command(flatten)]
        view: ViewArgs,

        /// Placement config JSON; missing fields keep their defaults
        #[arg(long)]
        config: Option<PathBuf>,

        /// Overrides the config's placement mode
        #[arg(long, value_enum)]
        mode: Option<Mode>,

        /// Overrides the property holding the display name
        #[arg(long)]
        name_key: Option<String>,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },

    /// Print the geographic bounds visible from a view
    Bounds {
        #[command(flatten)]
        view: ViewArgs,
    },
}

#[derive(ClapArgs, Debug)]
struct ViewArgs {
    /// View center longitude (degrees)
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,

    /// View center latitude (degrees)
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    #[arg(long)]
    zoom: f64,

    /// Canvas width in pixels
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 720.0)]
    height: f64,
}

impl ViewArgs {
    fn view_state(&self) -> Result<ViewState> {
        if !(self.width > 0.0 && self.height > 0.0) {
            bail!("canvas size must be positive (got {}x{})", self.width, self.height);
        }
        Ok(ViewState::new(self.lon, self.lat, self.zoom).with_size(self.width, self.height))
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Mode {
    Greedy,
    LongestEdge,
}

impl From<Mode> for PlacementMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Greedy => PlacementMode::Greedy,
            Mode::LongestEdge => PlacementMode::LongestEdge,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Labels {
            input,
            view,
            config,
            mode,
            name_key,
            pretty,
        } => cmd_labels(&input, &view, config.as_deref(), mode, name_key, pretty),
        Command::Bounds { view } => cmd_bounds(&view),
    }
}

fn cmd_labels(
    input: &Path,
    view: &ViewArgs,
    config_path: Option<&Path>,
    mode: Option<Mode>,
    name_key: Option<String>,
    pretty: bool,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => {
            let payload =
                fs::read_to_string(path).with_context(|| format!("read config {path:?}"))?;
            PlacementConfig::from_json_str(&payload)
                .with_context(|| format!("parse config {path:?}"))?
        }
        None => PlacementConfig::default(),
    };
    if let Some(mode) = mode {
        config.mode = mode.into();
    }
    if let Some(key) = name_key {
        config.name_key = key;
    }

    let name = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "boundaries".to_string());
    let mut layer = BoundariesLayer::new(1, config).with_name(name);

    layer.begin_fetch();
    let batch = FeatureBatch::read(input).with_context(|| format!("load {input:?}"))?;
    layer.features_loaded(batch.features);
    layer.set_view_state(view.view_state()?);

    let labels = layer.labels();
    info!(
        layer = layer.name(),
        features = layer.features().len(),
        labels = labels.len(),
        "placed labels"
    );

    let out = if pretty {
        serde_json::to_string_pretty(&*labels)?
    } else {
        serde_json::to_string(&*labels)?
    };
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{out}").context("write labels")?;
    Ok(())
}

fn cmd_bounds(view: &ViewArgs) -> Result<()> {
    let viewport = WebMercatorViewport::new(view.view_state()?);
    let bounds = viewport.bounds();
    let out = json!({
        "west": bounds.min[0],
        "south": bounds.min[1],
        "east": bounds.max[0],
        "north": bounds.max[1],
    });
    println!("{out}");
    Ok(())
}
