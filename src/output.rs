use std::io::{self, Write};

use anyhow::Result;
use serde::Serialize;

use nongli::CalendarError;
use nongli::chinese::LunisolarDay;
use nongli::chinese::fmt::Script;

use crate::cli::Format;

/// One day as written to stdout.
#[derive(Debug, Serialize)]
struct Row {
    date: String,
    year: i32,
    month: u32,
    leap: bool,
    day: u32,
    month_name: &'static str,
    label: &'static str,
    solar_term: Option<&'static str>,
    holiday: Option<&'static str>,
}

impl Row {
    fn new(day: &LunisolarDay, script: Script) -> Result<Self, CalendarError> {
        let month_name = day
            .month
            .name(script)
            .ok_or(CalendarError::MissingMonthName { month: day.month })?;
        Ok(Row {
            date: day.date.iso_gregorian(),
            year: day.year,
            month: day.month.num(),
            leap: day.month.is_leap(),
            day: day.day,
            month_name,
            label: day.label,
            solar_term: day.solar_term.map(|t| t.name(script)),
            holiday: day.holiday.map(|h| h.name(script)),
        })
    }
}

/// Write `days` to stdout in the requested format.
pub fn write(days: &[LunisolarDay], script: Script, format: Format) -> Result<()> {
    let rows = days
        .iter()
        .map(|day| Row::new(day, script))
        .collect::<Result<Vec<_>, _>>()?;
    let mut out = io::stdout().lock();
    match format {
        Format::Text => {
            for row in &rows {
                let mut line = format!("{} {}", row.date, row.label);
                for extra in [row.solar_term, row.holiday].into_iter().flatten() {
                    line.push(' ');
                    line.push_str(extra);
                }
                writeln!(out, "{line}")?;
            }
        }
        Format::Json => {
            serde_json::to_writer_pretty(&mut out, &rows)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
