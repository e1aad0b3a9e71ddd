//! 一歲所需的天象：節氣與合朔

use crate::date::Date;
use crate::error::CalendarError;
use crate::time_scales::{Tt, date_of};

use super::SolarTerm;
use super::ephemeris::{Ephemeris, EphemerisError, SOLAR_TERM_ANGLES};

/// 合朔搜索自上一冬至前若干日開始，以確保取到含冬至之朔。
const LEAD_DAYS: f64 = 30.0;
/// 兩冬至間約十五朔；逾此仍未覆蓋，說明曆表有誤。
const MAX_NEW_MOONS: usize = 20;

/// 上一冬至相對本年春分的角度
pub(crate) const PREV_SOLSTICE_ANGLE: i32 = -90;
/// 本年冬至相對本年春分的角度
pub(crate) const SOLSTICE_ANGLE: i32 = 270;

/// 天象種類
///
/// 節氣以相對本年春分的角度記錄（`-120..=270`），以區分歲首、歲末的同名節氣。
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AstroKind {
    NewMoon,
    SolarTerm(i32),
}

/// 天象，時刻已歸算至當地日期。
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct AstroEvent {
    pub date: Date,
    pub kind: AstroKind,
}

impl AstroEvent {
    pub fn is_new_moon(&self) -> bool {
        self.kind == AstroKind::NewMoon
    }
    pub fn solar_term(&self) -> Option<SolarTerm> {
        self.angle().and_then(SolarTerm::new)
    }
    /// 節氣相對本年春分的角度，合朔返回 `None`。
    pub fn angle(&self) -> Option<i32> {
        match self.kind {
            AstroKind::SolarTerm(angle) => Some(angle),
            AstroKind::NewMoon => None,
        }
    }
}

/// 取公元 `year` 年自上一小雪（-120°）至本年冬至（270°）的全部節氣，及覆蓋此段的全部合朔，
/// 依時刻排序。同日的天象各自保留，不作合併。
///
/// `tz_offset_minutes` 為所用時區距 UTC 的分鐘數，北京時間為 480。
pub fn assemble<E: Ephemeris>(
    ephemeris: &E,
    year: i32,
    tz_offset_minutes: i32,
) -> Result<Vec<AstroEvent>, CalendarError> {
    let mut timed: Vec<(Tt, AstroKind)> = Vec::with_capacity(27 + 15);
    for angle in SOLAR_TERM_ANGLES.step_by(15) {
        let tt = ephemeris.solar_term(year, angle)?;
        timed.push((tt, AstroKind::SolarTerm(angle)));
    }
    let instant_of = |angle: i32| {
        timed
            .iter()
            .find(|(_, kind)| *kind == AstroKind::SolarTerm(angle))
            .map(|&(tt, _)| tt)
            .ok_or(CalendarError::MissingSolarTerm { annus: year, angle })
    };
    let last_ws = instant_of(PREV_SOLSTICE_ANGLE)?;
    let end = date_of(instant_of(SOLSTICE_ANGLE)?, tz_offset_minutes);

    // 須有一朔落在本年冬至之後，以封閉冬至所在之月
    let mut after = last_ws.add_days(-LEAD_DAYS);
    let mut count = 0;
    loop {
        if count == MAX_NEW_MOONS {
            return Err(CalendarError::TooManyNewMoons { annus: year, count });
        }
        let tt = ephemeris.next_new_moon(after)?;
        if tt <= after {
            return Err(EphemerisError::NotMonotonic {
                after: after.0,
                got: tt.0,
            }
            .into());
        }
        timed.push((tt, AstroKind::NewMoon));
        count += 1;
        after = tt;
        if date_of(tt, tz_offset_minutes) > end {
            break;
        }
    }

    timed.sort_by(|a, b| a.0.0.total_cmp(&b.0.0));
    Ok(timed
        .into_iter()
        .map(|(tt, kind)| AstroEvent {
            date: date_of(tt, tz_offset_minutes),
            kind,
        })
        .collect())
}
