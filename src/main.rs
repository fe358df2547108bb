use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use weatherboard::config::DashboardConfig;
use weatherboard::dashboard::Dashboard;
use weatherboard::report::build_report;
use weatherboard::{OpenWeatherMapClient, logging, web};

/// Weatherboard CLI
#[derive(Parser)]
#[command(name = "weatherboard")]
#[command(author, version, about = "Multi-city weather dashboard", long_about = None)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the dashboard HTTP API
    Serve {
        /// Port to listen on (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print current conditions and the short-term forecast for some cities
    Report {
        /// City names
        #[arg(required = true)]
        cities: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = DashboardConfig::load_from_path(cli.config.clone())
        .context("Failed to load configuration")?;
    logging::init(&config.logging, cli.verbose)?;

    let client = OpenWeatherMapClient::new(&config.weather).map_err(|e| {
        tracing::error!("{}", e);
        anyhow::anyhow!(e.user_message())
    })?;

    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            let (dashboard, _event_loop) =
                Dashboard::spawn(Arc::new(client), config.dashboard.forecast_window);
            web::run(&config.server, dashboard).await
        }
        Commands::Report { cities } => {
            let (state, rejections) =
                build_report(&client, &cities, config.dashboard.forecast_window).await;

            let unit = config.temperature_unit();
            for city in state.cities() {
                println!("{}", city.card(unit));
            }
            for rejection in &rejections {
                eprintln!("{}: {}", rejection.input.trim(), rejection.message);
            }

            if state.cities().is_empty() {
                anyhow::bail!("No weather data could be retrieved");
            }
            Ok(())
        }
    }
}
