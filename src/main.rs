mod app;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use holo_graph::GraphConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON file with graph settings; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    peers: Option<usize>,
    #[arg(long)]
    validators: Option<usize>,
    #[arg(long)]
    connection_distance: Option<f32>,
    #[arg(long)]
    depth: Option<f32>,
    #[arg(long)]
    max_packets: Option<usize>,
    /// Remove the in-flight packet ceiling.
    #[arg(long, conflicts_with = "max_packets")]
    unbounded_packets: bool,
    /// Seed for a reproducible layout.
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn graph_config(&self) -> Result<GraphConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                serde_json::from_str::<GraphConfig>(&raw)
                    .with_context(|| format!("invalid config JSON in {}", path.display()))?
            }
            None => GraphConfig::default(),
        };

        if let Some(peers) = self.peers {
            config.peer_count = peers;
        }
        if let Some(validators) = self.validators {
            config.validator_count = validators;
        }
        if let Some(distance) = self.connection_distance {
            config.connection_distance = distance;
        }
        if let Some(depth) = self.depth {
            config.depth = depth;
        }
        if let Some(ceiling) = self.max_packets {
            config.max_packets = Some(ceiling);
        }
        if self.unbounded_packets {
            config.max_packets = None;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate().context("invalid graph settings")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let config = args.graph_config()?;
    info!(?config, "starting holo-graph");

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "holo-graph",
        options,
        Box::new(move |cc| Ok(Box::new(app::HolographicApp::new(cc, config)))),
    )
    .map_err(|err| anyhow!("window failed: {err}"))
}
