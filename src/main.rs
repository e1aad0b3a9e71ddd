mod cli;
mod logging;
mod output;

use std::fs;
use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use nongli::chinese::fmt::Script;
use nongli::{Calendar, CalendarConfig};

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = load_config(cli.config.as_deref())?;
    if cli.traditional {
        config.script = Script::Traditional;
    }
    let script = config.script;
    let mut calendar = Calendar::new(config);

    match cli.command {
        Command::Year(args) => {
            info!(year = args.year, "computing calendar");
            let days = calendar
                .year(args.year)
                .with_context(|| format!("failed to compute year {}", args.year))?;
            output::write(&days, script, cli.format)
        }
        Command::Date(args) => {
            let day = calendar
                .day(args.date)
                .with_context(|| format!("failed to compute {}", args.date))?;
            output::write(&[day], script, cli.format)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<CalendarConfig> {
    let Some(path) = path else {
        return Ok(CalendarConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let config = CalendarConfig::from_toml(&text)
        .with_context(|| format!("invalid config: {}", path.display()))?;
    info!(path = %path.display(), "config loaded");
    Ok(config)
}
