use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fluent_scroll_core::{AppConfig, EasingMode};

mod commands;

#[derive(Parser)]
#[command(name = "fluent-scroll")]
#[command(author, version, about = "Smooth wheel scrolling and wrap-around pickers in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive demo
    Run,
    /// Replay synthetic wheel events through the step engine
    Simulate {
        /// Wheel angle deltas, comma separated (120 per notch, negative scrolls down)
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, default_value = "120")]
        deltas: Vec<f64>,
        /// Time between consecutive events
        #[arg(long, default_value_t = 16)]
        interval_ms: u64,
        /// Easing kernel (none, constant, linear, quadratic, cosine)
        #[arg(long)]
        mode: Option<EasingMode>,
        /// Override the engine timer rate
        #[arg(long)]
        fps: Option<u32>,
        /// Override how long one notch keeps contributing motion
        #[arg(long)]
        duration_ms: Option<u64>,
        /// Print one JSON object per line
        #[arg(long)]
        json: bool,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print the configuration file path
    Path,
    /// Write the default configuration
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config).await,
        Some(Commands::Simulate {
            deltas,
            interval_ms,
            mode,
            fps,
            duration_ms,
            json,
        }) => {
            let mut scroll = config.scroll.clone();
            if let Some(mode) = mode {
                scroll.easing = mode;
            }
            if let Some(fps) = fps {
                scroll.fps = fps;
            }
            if let Some(duration_ms) = duration_ms {
                scroll.duration_ms = duration_ms;
            }
            commands::simulate::run(&scroll, &deltas, interval_ms, json)
        }
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Path => commands::config::path(),
            ConfigAction::Init { force } => commands::config::init(force),
        },
    }
}
