//! Chinese lunisolar calendar computed from solar terms and new moons.
//!
//! Each lunisolar year (an *annus*, winter solstice to winter solstice) is
//! built from the instants of the 24 solar terms and of the new moons
//! between them, supplied by an [`Ephemeris`](chinese::ephemeris::Ephemeris).
//! The crate ships an analytic one, [`Meeus`](chinese::ephemeris::Meeus).
//!
//! # Examples
//!
//! Basic usage with [`Date`]:
//!
//! ```
//! use nongli::Date;
//!
//! let date = Date::from_gregorian(2000, 1, 1).unwrap();
//!
//! assert_eq!(2451545, date.jdn());
//! assert_eq!("2000-01-01", date.to_string());
//! ```
//!
//! A whole Gregorian year:
//!
//! ```
//! use nongli::Calendar;
//! use nongli::chinese::Month::*;
//!
//! let mut calendar = Calendar::default();
//! let days = calendar.year(2033).unwrap();
//! let last = days.last().unwrap();
//!
//! assert_eq!("2033-12-31", last.date.to_string());
//! assert_eq!((Leap(11), 10, "初十"), (last.month, last.day, last.label));
//! ```

pub mod chinese;
pub mod config;
pub mod date;
pub mod error;
pub mod time_scales;

pub use chinese::Calendar;
pub use config::CalendarConfig;
pub use date::{Date, YearType};
pub use error::{CalendarError, ConfigError};
