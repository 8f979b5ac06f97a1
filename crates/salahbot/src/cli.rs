use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "salahbot")]
#[command(author, version, about = "Telegram bot that replies to a shared location with today's prayer times", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Place and day to compute a schedule for
#[derive(Args, Debug, Clone)]
pub struct Place {
    /// Latitude in degrees, north positive
    #[arg(long, allow_negative_numbers = true)]
    pub latitude: f64,

    /// Longitude in degrees, east positive
    #[arg(long, allow_negative_numbers = true)]
    pub longitude: f64,

    /// Day as YYYY-MM-DD (defaults to today at the location)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Use the offline calculator instead of PRAYER_SOURCE
    #[arg(long)]
    pub offline: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the bot with long polling
    Run,

    /// Print the prayer times for a place
    Times {
        #[command(flatten)]
        place: Place,
    },

    /// Render the prayer-time card for a place to a PNG file
    Render {
        #[command(flatten)]
        place: Place,

        /// Where to write the PNG
        #[arg(short, long, default_value = "prayer_times.png")]
        output: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
