//! Error types for calendar computation and configuration.

use crate::chinese::Month;
use crate::chinese::ephemeris::EphemerisError;
use crate::date::Date;

/// Error type for all fallible calendar operations.
///
/// Every variant except [`CalendarError::Ephemeris`] and
/// [`CalendarError::UnsupportedYear`] means the astronomical data is
/// inconsistent with the calendar rules; none of them are retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// The ephemeris could not supply an instant.
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),

    /// A solar term needed to delimit the annus was not among the events.
    #[error("annus {annus}: solar term at {angle} degrees is missing")]
    MissingSolarTerm { annus: i32, angle: i32 },

    /// No new moon falls on or before the previous winter solstice.
    #[error("annus {annus}: no new moon on or before the winter solstice")]
    NoNewMoonBeforeSolstice { annus: i32 },

    /// An event could not be assigned to a month closed by a later new moon.
    #[error("annus {annus}: event on {date} does not belong to any month")]
    UntaggedEvent { annus: i32, date: Date },

    /// The annus has thirteen new moons but every month has a principal term.
    #[error("annus {annus}: thirteen new moons but no month without a principal term")]
    NoLeapMonth { annus: i32 },

    /// Resolved month names do not follow each other.
    #[error("annus {annus}: month {prev:?} is followed by {next:?}")]
    IrregularMonths { annus: i32, prev: Month, next: Month },

    /// The new-moon search did not reach the closing winter solstice.
    #[error("annus {annus}: {count} new moons do not cover the winter solstice")]
    TooManyNewMoons { annus: i32, count: usize },

    /// The stitched calendar has no entry for a date it should cover.
    #[error("no lunisolar day for {date}")]
    MissingDate { date: Date },

    /// The Gregorian year cannot be represented.
    #[error("year {year} is not supported")]
    UnsupportedYear { year: i32 },

    /// No display name for a day of month.
    #[error("no name for day {day} of a lunar month")]
    MissingDayName { day: u32 },

    /// No display name for a month.
    #[error("no name for month {month:?}")]
    MissingMonthName { month: Month },
}

/// Invalid calendar configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The year cache must hold at least two anni to stitch a year.
    #[error("cache_capacity must be >= 2, got {capacity}")]
    CacheCapacity { capacity: usize },

    /// The UTC offset is beyond any civil time zone.
    #[error("utc_offset_minutes must be within -720..=840, got {minutes}")]
    UtcOffset { minutes: i32 },

    /// The TOML text could not be parsed.
    #[error("failed to parse config: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_missing_solar_term() {
        let e = CalendarError::MissingSolarTerm {
            annus: 2024,
            angle: 270,
        };
        assert_eq!(
            e.to_string(),
            "annus 2024: solar term at 270 degrees is missing"
        );
    }

    #[test]
    fn error_irregular_months() {
        let e = CalendarError::IrregularMonths {
            annus: 2000,
            prev: Month::Common(11),
            next: Month::Common(1),
        };
        assert_eq!(
            e.to_string(),
            "annus 2000: month Common(11) is followed by Common(1)"
        );
    }

    #[test]
    fn error_missing_date() {
        let date = Date::from_gregorian(2024, 2, 29).unwrap();
        let e = CalendarError::MissingDate { date };
        assert_eq!(e.to_string(), "no lunisolar day for 2024-02-29");
    }

    #[test]
    fn error_ephemeris_is_transparent() {
        let inner = EphemerisError::AngleOutOfRange { angle: 7 };
        let e = CalendarError::from(inner.clone());
        assert_eq!(e.to_string(), inner.to_string());
    }

    #[test]
    fn error_config() {
        let e = ConfigError::CacheCapacity { capacity: 1 };
        assert_eq!(e.to_string(), "cache_capacity must be >= 2, got 1");
        let e = ConfigError::UtcOffset { minutes: 900 };
        assert_eq!(
            e.to_string(),
            "utc_offset_minutes must be within -720..=840, got 900"
        );
    }
}
