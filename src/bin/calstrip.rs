use std::io;
use std::path::PathBuf;

use calendar_light_strip::config::{
    DEFAULT_BACKGROUND_ANGLE, DEFAULT_BACKGROUND_DIM, DEFAULT_EVENING_COLOR, DEFAULT_HOURS,
    DEFAULT_LENGTH, DEFAULT_MORNING_COLOR, DEFAULT_SECONDARY_ANGLE,
};
use calendar_light_strip::event::DEFAULT_MAX_RESULTS;
use calendar_light_strip::render::DEFAULT_PREVIEW_FILE;
use calendar_light_strip::*;
use chrono::{DateTime, Local, TimeDelta};
use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result};
use tracing::{debug, error, info, instrument};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON calendar feed to read events from
    #[arg(short, long)]
    events: PathBuf,

    /// Color of events around 19:00
    #[arg(long, default_value = DEFAULT_MORNING_COLOR)]
    morning_color: String,

    /// Color of events around 07:00
    #[arg(long, default_value = DEFAULT_EVENING_COLOR)]
    evening_color: String,

    /// Hue shift for an event right after another one, in degrees
    #[arg(long, default_value_t = DEFAULT_SECONDARY_ANGLE, allow_negative_numbers = true)]
    secondary_angle: f32,

    /// Hue shift for free time, in degrees
    #[arg(long, default_value_t = DEFAULT_BACKGROUND_ANGLE, allow_negative_numbers = true)]
    background_angle: f32,

    /// Saturation dim for free time, in percentage points
    #[arg(long, default_value_t = DEFAULT_BACKGROUND_DIM)]
    background_dim: f32,

    /// Time of the first light (RFC 3339), defaults to now
    #[arg(short, long)]
    start: Option<DateTime<chrono::FixedOffset>>,

    /// Hours covered by the strip
    #[arg(long, default_value_t = DEFAULT_HOURS)]
    hours: i64,

    /// Number of lights on the strip
    #[arg(short, long, default_value_t = DEFAULT_LENGTH)]
    length: usize,

    /// Events taken from each calendar at most
    #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
    max_results: usize,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the strip as colored dots
    Terminal,
    /// Print one hex code per light
    Hex,
    /// Write an HTML preview page
    Html {
        /// File to write the page to
        #[arg(short, long, default_value = DEFAULT_PREVIEW_FILE)]
        output: PathBuf,
    },
}

impl Cli {
    /// Builds the strip configuration from the color flags
    fn config(&self) -> calendar_light_strip::Result<StripConfig> {
        Ok(StripConfig::from_hex(&self.morning_color, &self.evening_color)?
            .with_secondary_angle(self.secondary_angle)
            .with_background_angle(self.background_angle)
            .with_background_dim(self.background_dim))
    }

    /// Builds the time window from the window flags
    fn window(&self) -> Result<StripWindow> {
        let duration = TimeDelta::try_hours(self.hours)
            .ok_or_else(|| eyre!("{} hours is too long for a strip", self.hours))?;
        let start = self.start.unwrap_or_else(|| Local::now().fixed_offset());
        Ok(StripWindow::new(start, duration, self.length))
    }
}

#[tokio::main]
#[instrument]
async fn main() -> Result<()> {
    // Initialize tracing with pretty colors
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| EnvFilter::new("calendar_light_strip=info")),
        )
        .compact()
        .with_writer(io::stderr)
        .init();

    // Initialize color-eyre for pretty error reporting
    color_eyre::install()?;

    let cli = Cli::parse();
    debug!("Parsed command line arguments");

    let config = cli.config()?;
    let window = cli.window()?;
    let source = JsonFileSource::new(&cli.events).with_max_results(cli.max_results);

    let strip = match strip_from_source(&source, &config, &window).await {
        Ok(strip) => strip,
        Err(e) => {
            error!("Failed to compute strip: {}", e);
            return Err(e.into());
        }
    };
    info!(
        "Computed {} lights from {} over {}",
        strip.len(),
        window.start,
        window.duration
    );

    match cli.command.unwrap_or(Commands::Terminal) {
        Commands::Terminal => {
            TerminalPreview::new(io::stdout().lock()).render(&strip)?;
        }
        Commands::Hex => {
            HexList::new(io::stdout().lock()).render(&strip)?;
        }
        Commands::Html { output } => {
            HtmlPreview::new(output).render(&strip)?;
        }
    }

    Ok(())
}
