use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use nongli::Date;

/// Chinese lunisolar calendar.
#[derive(Parser)]
#[command(
    name = "nongli",
    version,
    about = "Chinese lunisolar calendar with solar terms and traditional holidays"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to TOML configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print names in traditional characters, overriding the config.
    #[arg(long, global = true)]
    pub traditional: bool,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Print every day of a Gregorian year.
    Year(YearArgs),
    /// Print a single day.
    Date(DateArgs),
}

/// Arguments for the `year` subcommand.
#[derive(clap::Args)]
pub struct YearArgs {
    /// Gregorian year, astronomical numbering (0 is 1 BC).
    #[arg(allow_hyphen_values = true)]
    pub year: i32,
}

/// Arguments for the `date` subcommand.
#[derive(clap::Args)]
pub struct DateArgs {
    /// Gregorian date as YYYY-MM-DD.
    pub date: Date,
}

/// How days are written to stdout.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// One line per day: date, label, solar term, holiday.
    Text,
    /// A JSON array of day objects.
    Json,
}
