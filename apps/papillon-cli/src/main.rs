use std::path::PathBuf;

use clap::{Parser, Subcommand};
use papillon_assets::{DeferredLoader, JsonModelLoader, SlotState};
use papillon_common::SceneConfig;
use papillon_render::{DebugTextRenderer, RenderView, SceneRunner, StageConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "papillon-cli", about = "Headless driver for the butterfly scene")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Scene configuration file (JSON); missing fields use defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the number of instances
    #[arg(long, global = true)]
    count: Option<usize>,

    /// Seed placement and phases for a reproducible scene
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Override the model path
    #[arg(long, global = true)]
    model: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and the effective scene parameters
    Info,
    /// Run the scene headless through the debug text renderer
    Run {
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "60")]
        ticks: u64,
        /// Seconds per tick
        #[arg(long, default_value = "0.016")]
        dt: f64,
        /// Ticks the model load stays pending
        #[arg(long, default_value = "0")]
        load_delay: u32,
        /// Print every Nth frame (0 prints only the last)
        #[arg(long, default_value = "0")]
        every: u64,
        /// Device pixel ratio of the simulated display
        #[arg(long, default_value = "1.0")]
        dpr: f32,
    },
    /// Print the effective configuration as JSON
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = effective_config(&cli)?;

    match cli.command {
        Commands::Info => {
            println!("papillon-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("instances: {}", config.instance_count);
            println!(
                "flap: amplitude={:.3} rad, half-period={}s, phases={:?}",
                config.flap.amplitude(),
                config.flap.period,
                config.flap.phase_candidates
            );
            println!(
                "volume: min={:?} max={:?}",
                config.placement.min.to_array(),
                config.placement.max.to_array()
            );
            println!("model: {}", config.asset.model_path.display());
            match config.seed {
                Some(seed) => println!("seed: {seed}"),
                None => println!("seed: entropy"),
            }
        }
        Commands::Run {
            ticks,
            dt,
            load_delay,
            every,
            dpr,
        } => {
            let loader = DeferredLoader::new(JsonModelLoader::new(config.asset.wing_mesh.clone()), load_delay);
            let mut runner = SceneRunner::new(
                &config,
                StageConfig::default(),
                RenderView::default(),
                loader,
                DebugTextRenderer::new().with_device_ratio(dpr),
            )?;
            tracing::info!(ticks, dt, "running scene");

            let mut last = String::new();
            for tick in 1..=ticks {
                last = runner.tick(dt)?;
                if every > 0 && tick % every == 0 {
                    print!("{last}");
                }
            }
            if every == 0 || ticks % every != 0 {
                print!("{last}");
            }
            println!(
                "Finished: ticks={} t={:.3}s animators: {}",
                runner.clock().ticks(),
                runner.clock().elapsed(),
                runner.status()
            );
            let model = runner.slot().path().display();
            match runner.slot().state() {
                SlotState::Pending => println!("Model {model}: still loading"),
                SlotState::Ready(asset) => println!(
                    "Model {model}: {} ({} vertices)",
                    asset.geometry.name, asset.geometry.vertex_count
                ),
                SlotState::Failed(err) => println!("Model {model}: failed ({err})"),
            }
            let cancelled = runner.shutdown();
            println!("Torn down {cancelled} instances");
        }
        Commands::Config => {
            let out = serde_json::json!({
                "scene": config,
                "stage": StageConfig::default(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }

    Ok(())
}

fn effective_config(cli: &Cli) -> anyhow::Result<SceneConfig> {
    let mut config = match &cli.config {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };
    if let Some(count) = cli.count {
        config.instance_count = count;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if let Some(model) = &cli.model {
        config.asset.model_path = model.clone();
    }
    config.validate()?;
    Ok(config)
}
