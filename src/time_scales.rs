//! Deals with different time scales, specifically, conversion from TT into
//! UT and then into civil dates.
//!
//! Only conversions necessary for other computations in this crate are
//! included.

use crate::date::Date;

/// [Terristrial time](https://en.wikipedia.org/wiki/Terrestrial_Time),
/// represented in Julian ephemeris day (JDE).
///
/// Ephemeris results are expressed in this time scale, and should be
/// converted to UT when calculating dates. TDB differs no more than
/// milliseconds from TT, so the two are treated numerically the same.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Tt(pub f64);

impl Tt {
    /// Julian centuries since J2000.0.
    pub fn centuries(&self) -> f64 {
        (self.0 - J2000) / 36525.0
    }
    /// Adds a (possibly fractional, possibly negative) number of days.
    pub fn add_days(self, days: f64) -> Self {
        Tt(self.0 + days)
    }
}

/// [Universal time](https://en.wikipedia.org/wiki/Universal_Time), the actual
/// civil time used for determining the actual date at a given time point.
///
/// Conversion from TT relies on the polynomial expressions of ΔT by Espenak
/// and Meeus, so the result is UT1 rather than UTC, which is all that
/// matters at day granularity.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Ut(pub f64);

pub(crate) const J2000: f64 = 2451545.0;

impl Ut {
    /// Converts a TT instant into UT.
    ///
    /// # Example
    ///
    /// ```
    /// use nongli::time_scales::{Tt, Ut};
    /// let ut = Ut::convert(Tt(2451545.0));
    /// assert!((Tt(2451545.0).0 - ut.0) * 86400.0 > 63.0);
    /// ```
    pub fn convert(tt: Tt) -> Self {
        Ut(tt.0 - delta_t(tt) / 86400.0)
    }
    /// Returns the date at the time point in timezone ahead (east) of UTC by
    /// `tz_offset_minutes` minutes, i.e. the instant truncated to local
    /// midnight.
    ///
    /// For Beijing time (UTC+8), `tz_offset_minutes` should be +480.
    ///
    /// # Example
    ///
    /// ```
    /// use nongli::time_scales::Ut;
    /// // 2000-01-01T20:00Z
    /// let ut = Ut(2451545.0 + 8.0 / 24.0);
    /// assert_eq!((2000, 1, 1), ut.date_in_timezone(0).gregorian());
    /// assert_eq!((2000, 1, 2), ut.date_in_timezone(480).gregorian());
    /// ```
    pub fn date_in_timezone(&self, tz_offset_minutes: i32) -> Date {
        let jdn = (self.0 + tz_offset_minutes as f64 / 1440.0 + 0.5).floor() as i32;
        Date::from_jdn(jdn)
    }
}

/// The local civil date of a TT instant.
pub fn date_of(tt: Tt, tz_offset_minutes: i32) -> Date {
    Ut::convert(tt).date_in_timezone(tz_offset_minutes)
}

/// ΔT = TT − UT in seconds, after Espenak & Meeus (NASA, 2006).
pub fn delta_t(tt: Tt) -> f64 {
    let y = 2000.0 + (tt.0 - 2451544.5) / 365.2425;
    let long_term = |y: f64| {
        let u = (y - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u
    };
    match y {
        y if y < 1860.0 => long_term(y),
        y if y < 1900.0 => {
            let t = y - 1860.0;
            7.62 + 0.5737 * t - 0.251754 * t.powi(2) + 0.01680668 * t.powi(3)
                - 0.0004473624 * t.powi(4)
                + t.powi(5) / 233174.0
        }
        y if y < 1920.0 => {
            let t = y - 1900.0;
            -2.79 + 1.494119 * t - 0.0598939 * t.powi(2) + 0.0061966 * t.powi(3)
                - 0.000197 * t.powi(4)
        }
        y if y < 1941.0 => {
            let t = y - 1920.0;
            21.20 + 0.84493 * t - 0.076100 * t.powi(2) + 0.0020936 * t.powi(3)
        }
        y if y < 1961.0 => {
            let t = y - 1950.0;
            29.07 + 0.407 * t - t.powi(2) / 233.0 + t.powi(3) / 2547.0
        }
        y if y < 1986.0 => {
            let t = y - 1975.0;
            45.45 + 1.067 * t - t.powi(2) / 260.0 - t.powi(3) / 718.0
        }
        y if y < 2005.0 => {
            let t = y - 2000.0;
            63.86 + 0.3345 * t - 0.060374 * t.powi(2)
                + 0.0017275 * t.powi(3)
                + 0.000651814 * t.powi(4)
                + 0.00002373599 * t.powi(5)
        }
        y if y < 2050.0 => {
            let t = y - 2000.0;
            62.92 + 0.32217 * t + 0.005589 * t.powi(2)
        }
        y if y < 2150.0 => long_term(y) - 0.5628 * (2150.0 - y),
        y => long_term(y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn delta_t_samples() {
        assert_abs_diff_eq!(63.83, delta_t(Tt(2451545.0)), epsilon = 0.1);
        // 1977-02-18, ΔT was about 48 s
        assert_abs_diff_eq!(47.7, delta_t(Tt(2443192.65)), epsilon = 1.0);
        // continuous across the 2050 boundary
        let before = delta_t(Tt(2469807.5 - 0.01));
        let after = delta_t(Tt(2469807.5 + 0.01));
        assert_abs_diff_eq!(before, after, epsilon = 1.0);
    }

    #[test]
    fn tt_to_date() {
        // 1999-12-30T16:00 TT: the UTC+8 day boundary lies ~64 s later in TT
        let tt = Tt(2451543.166666667);
        assert_eq!((1999, 12, 30), date_of(tt, 0).gregorian());
        assert_eq!((1999, 12, 30), date_of(tt, 480).gregorian());
        let midnight = tt.add_days(64.0 / 86400.0);
        assert_eq!((1999, 12, 31), date_of(midnight, 480).gregorian());
        assert_eq!(
            (1999, 12, 30),
            date_of(midnight.add_days(-2.0 / 86400.0), 480).gregorian()
        );
    }

    #[test]
    fn centuries() {
        assert_abs_diff_eq!(0.0, Tt(J2000).centuries());
        assert_abs_diff_eq!(1.0, Tt(J2000 + 36525.0).centuries());
    }
}
