use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::bounded;
use log::info;

use cadence_engine::config::{
    EngineConfig, WindowConfig, DEFAULT_CHANNEL_CAPACITY, DEFAULT_FRAME_CAP, DEFAULT_HEIGHT,
    DEFAULT_IDLE_SLEEP, DEFAULT_TITLE, DEFAULT_WIDTH,
};
use cadence_engine::demo::OrbitScene;
use cadence_engine::logging::{init_logging, LoggingConfig};
use cadence_engine::platform::WindowSurface;
use cadence_engine::EngineBuilder;

#[derive(Parser)]
#[command(name = "cadence", about = "Fixed-timestep demo: a swinging tetrahedron")]
struct Cli {
    /// Window width in logical pixels
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: u32,

    /// Window height in logical pixels
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: u32,

    /// Window title
    #[arg(long, default_value = DEFAULT_TITLE)]
    title: String,

    /// Logical updates per second
    #[arg(long, default_value_t = DEFAULT_FRAME_CAP)]
    frame_cap: f64,

    /// Log filter, e.g. "debug" or "loop::fps=info" (overrides RUST_LOG)
    #[arg(long)]
    log: Option<String>,
}

impl Cli {
    fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            window: WindowConfig {
                width: self.width,
                height: self.height,
                title: self.title.clone(),
            },
            frame_cap: self.frame_cap,
            idle_sleep: DEFAULT_IDLE_SLEEP,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(LoggingConfig {
        filter: cli.log.clone(),
        ..LoggingConfig::default()
    });

    if !(cli.frame_cap > 0.0) {
        anyhow::bail!("--frame-cap must be positive, got {}", cli.frame_cap);
    }

    let config = cli.engine_config();
    info!(
        "Opening {}x{} window \"{}\"",
        config.window.width, config.window.height, config.window.title
    );

    let (tx, rx) = bounded(config.channel_capacity);
    let surface =
        WindowSurface::create(&config.window, tx).context("failed to open the game window")?;
    let scene = OrbitScene::new(&config.window, rx);

    let mut engine = EngineBuilder::new()
        .with_config(&config)
        .build(scene, surface)
        .context("invalid engine configuration")?;

    engine.run().context("game loop failed")?;

    Ok(())
}
