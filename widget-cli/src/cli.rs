use std::{sync::Arc, time::Duration};

use anyhow::Context;
use clap::{Parser, Subcommand};
use widget_core::{Config, Coordinates, IpLocator, Notifier, WeatherProvider, Widget};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-widget", version, about = "Terminal weather widget")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key.
    Configure,

    /// Run the widget.
    Run {
        /// Latitude override; skips location detection when set with --lon.
        #[arg(long, requires = "lon")]
        lat: Option<f64>,

        /// Longitude override.
        #[arg(long, requires = "lat")]
        lon: Option<f64>,

        /// Refresh period in seconds; defaults to the configured value.
        #[arg(long)]
        interval_secs: Option<u64>,

        /// Print the first snapshot and exit instead of rendering live.
        #[arg(long)]
        once: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Run { lat, lon, interval_secs, once } => {
                run_widget(lat, lon, interval_secs, once).await
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("OpenWeatherMap API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.api_key = Some(api_key);
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

/// Prints notices to stderr, the terminal stand-in for a blocking alert.
#[derive(Debug)]
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, message: &str) {
        eprintln!("*** {message}");
    }
}

async fn run_widget(
    lat: Option<f64>,
    lon: Option<f64>,
    interval_secs: Option<u64>,
    once: bool,
) -> anyhow::Result<()> {
    let config = Config::load()?;

    let provider: Arc<dyn WeatherProvider> =
        Arc::from(widget_core::provider_from_config(&config)?);
    let poll_interval = interval_secs
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.poll_interval());

    let handle = match (lat, lon) {
        (Some(latitude), Some(longitude)) => {
            Widget::mount_at(provider, Coordinates { latitude, longitude }, poll_interval)
        }
        _ => Widget::mount(
            provider,
            Arc::new(IpLocator::new()?),
            Arc::new(StderrNotifier),
            config.fallback,
            poll_interval,
        ),
    };

    render::render_loop(handle, once).await
}
