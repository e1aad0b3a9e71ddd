//! 節氣、合朔時刻
//!
//! 曆法編算只需兩項天文數據：某年某節氣的時刻，以及某時刻之後的下一次合朔。[`Ephemeris`] 即此二者的接口，
//! 編算本身不關心其精度與算法，可自行替換。
//!
//! 本模塊附帶的 [`Meeus`] 以解析方法計算：太陽視黃經取 VSOP87 地球級數截斷表，並計章動、光行差；
//! 合朔取 Meeus《天文算法》第 49 章的周期項。兩者誤差均在一分鐘量級，對以日為單位的曆法足夠。

use std::ops::RangeInclusive;

use crate::time_scales::Tt;

mod moon;
mod sun;

/// 節氣角度範圍：自春分起算，-120° 為上一年小雪，270° 為本年冬至。
pub const SOLAR_TERM_ANGLES: RangeInclusive<i32> = -120..=270;

/// 天文數據來源
pub trait Ephemeris {
    /// 公元 `year` 年中，太陽視黃經距春分 `angle` 度的時刻。
    ///
    /// `angle` 須為 15 的倍數且在 [`SOLAR_TERM_ANGLES`] 內，負值表示自該年春分向前推。
    fn solar_term(&self, year: i32, angle: i32) -> Result<Tt, EphemerisError>;

    /// 嚴格晚於 `after` 的首次合朔時刻。
    fn next_new_moon(&self, after: Tt) -> Result<Tt, EphemerisError>;
}

impl<E: Ephemeris + ?Sized> Ephemeris for &E {
    fn solar_term(&self, year: i32, angle: i32) -> Result<Tt, EphemerisError> {
        (**self).solar_term(year, angle)
    }
    fn next_new_moon(&self, after: Tt) -> Result<Tt, EphemerisError> {
        (**self).next_new_moon(after)
    }
}

/// 曆表無法給出所求時刻
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EphemerisError {
    #[error("solar term angle {angle} is not a multiple of 15 in -120..=270")]
    AngleOutOfRange { angle: i32 },

    #[error("year {year} is outside the supported range {min}..={max}")]
    YearOutOfRange { year: i32, min: i32, max: i32 },

    #[error("solar longitude search did not converge for year {year}, angle {angle}")]
    NoConvergence { year: i32, angle: i32 },

    #[error("new moon at JDE {got} is not after JDE {after}")]
    NotMonotonic { after: f64, got: f64 },
}

/// 解析曆表，見模塊文檔。
///
/// # 用例
///
/// ```
/// use nongli::chinese::ephemeris::{Ephemeris, Meeus};
/// use nongli::time_scales::date_of;
///
/// let winter_solstice = Meeus.solar_term(2024, 270).unwrap();
/// assert_eq!("2024-12-21", date_of(winter_solstice, 480).iso_gregorian());
/// ```
#[derive(Debug, Copy, Clone, Default)]
pub struct Meeus;

impl Meeus {
    /// 支持的年份。級數本身可用於更長的時段，但 ΔT 的外推在此之外已無意義。
    pub const YEARS: RangeInclusive<i32> = -1000..=3000;

    fn check_year(year: i32) -> Result<(), EphemerisError> {
        if Self::YEARS.contains(&year) {
            Ok(())
        } else {
            Err(EphemerisError::YearOutOfRange {
                year,
                min: *Self::YEARS.start(),
                max: *Self::YEARS.end(),
            })
        }
    }
}

impl Ephemeris for Meeus {
    fn solar_term(&self, year: i32, angle: i32) -> Result<Tt, EphemerisError> {
        if !SOLAR_TERM_ANGLES.contains(&angle) || angle % 15 != 0 {
            return Err(EphemerisError::AngleOutOfRange { angle });
        }
        Self::check_year(year)?;
        let guess = sun::mean_vernal_equinox(year).add_days(angle as f64 * sun::DAYS_PER_DEGREE);
        sun::time_of_longitude(angle as f64, guess)
            .ok_or(EphemerisError::NoConvergence { year, angle })
    }

    fn next_new_moon(&self, after: Tt) -> Result<Tt, EphemerisError> {
        let year = (2000.0 + (after.0 - 2451544.5) / 365.2425).floor() as i32;
        Self::check_year(year)?;
        let mut k = ((after.0 - moon::EPOCH) / moon::SYNODIC_MONTH).floor() - 1.0;
        let mut tt = moon::new_moon(k);
        while tt <= after {
            k += 1.0;
            tt = moon::new_moon(k);
        }
        Ok(tt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_scales::date_of;

    fn date(tt: Tt) -> String {
        date_of(tt, 480).iso_gregorian()
    }

    #[test]
    fn solar_terms() {
        for (year, angle, std) in [
            (2000, -90, "1999-12-22"),
            (2000, 270, "2000-12-21"),
            (2024, -45, "2024-02-04"),
            (2024, 0, "2024-03-20"),
            (2024, 15, "2024-04-04"),
            (2033, 270, "2033-12-21"),
            (2034, -60, "2034-01-20"),
        ] {
            assert_eq!(std, date(Meeus.solar_term(year, angle).unwrap()), "{year} {angle}");
        }
    }

    #[test]
    fn new_moons() {
        let ws = Meeus.solar_term(2000, -90).unwrap();
        assert_eq!("1999-12-08", date(Meeus.next_new_moon(ws.add_days(-30.0)).unwrap()));
        let ws = Meeus.solar_term(2033, 270).unwrap();
        assert_eq!("2033-12-22", date(Meeus.next_new_moon(ws).unwrap()));
    }

    #[test]
    fn next_new_moon_is_strictly_later() {
        let nm = Meeus.next_new_moon(Tt(2460000.0)).unwrap();
        assert!(nm.0 > 2460000.0);
        let again = Meeus.next_new_moon(nm).unwrap();
        assert!(again.0 - nm.0 > 29.0 && again.0 - nm.0 < 30.0);
        // just before an instant still yields that instant
        let same = Meeus.next_new_moon(nm.add_days(-1e-3)).unwrap();
        assert_eq!(nm, same);
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            Err(EphemerisError::AngleOutOfRange { angle: 7 }),
            Meeus.solar_term(2024, 7)
        );
        assert_eq!(
            Err(EphemerisError::AngleOutOfRange { angle: 285 }),
            Meeus.solar_term(2024, 285)
        );
        assert!(matches!(
            Meeus.solar_term(5000, 0),
            Err(EphemerisError::YearOutOfRange { year: 5000, .. })
        ));
        assert_eq!(
            "year 5000 is outside the supported range -1000..=3000",
            Meeus.solar_term(5000, 0).unwrap_err().to_string()
        );
    }
}
