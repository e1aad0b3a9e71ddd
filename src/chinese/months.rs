//! 定月與置閏
//!
//! 先以含冬至之朔為十一月，依次數朔得「暫定月序」（11, 12, 13, …），再判斷是否置閏：
//! 兩冬至間有十三朔則為閏歲，自十一月起第一個不含中氣之月為閏月，借用前月之名，其後各月序號減一。
//! 最後將大於 12 的月序減 12。

use tracing::info;

use crate::date::Date;
use crate::error::CalendarError;

use super::Month;
use super::events::{AstroEvent, PREV_SOLSTICE_ANGLE, SOLSTICE_ANGLE};

/// 含冬至之月的月序
const FIRST_MONTH: u32 = 11;
/// 置閏的候選暫定月序，自十一月至次歲十一月。
const LEAP_CANDIDATES: std::ops::RangeInclusive<u32> = 11..=24;

/// 標有暫定月序的天象
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Tagged {
    pub event: AstroEvent,
    pub month: u32,
}

/// 一月內的全部天象，首日為朔日。
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MonthSegment {
    pub month: Month,
    /// 朔日
    pub start: Date,
    pub events: Vec<AstroEvent>,
}

/// 為天象標上暫定月序，並截取自歲首之朔至本年冬至的部分。
///
/// `events` 須依時間排序，見 [`super::events::assemble`]。
pub fn segment(events: &[AstroEvent], annus: i32) -> Result<Vec<Tagged>, CalendarError> {
    let date_of = |angle: i32| {
        events
            .iter()
            .find(|e| e.angle() == Some(angle))
            .map(|e| e.date)
            .ok_or(CalendarError::MissingSolarTerm { annus, angle })
    };
    let last_ws = date_of(PREV_SOLSTICE_ANGLE)?;
    let lc_end = date_of(SOLSTICE_ANGLE)?;

    let new_moons: Vec<Date> = events
        .iter()
        .filter(|e| e.is_new_moon())
        .map(|e| e.date)
        .collect();
    // 含冬至之朔為歲首
    let first = new_moons
        .partition_point(|&date| date <= last_ws)
        .checked_sub(1)
        .ok_or(CalendarError::NoNewMoonBeforeSolstice { annus })?;
    let lc_start = new_moons[first];

    events
        .iter()
        .filter(|e| (lc_start..=lc_end).contains(&e.date))
        .map(|&event| {
            // 所在之月為最後一個不晚於該日的朔；其後須另有一朔以封閉該月
            let idx = new_moons.partition_point(|&date| date <= event.date);
            if idx == new_moons.len() {
                return Err(CalendarError::UntaggedEvent {
                    annus,
                    date: event.date,
                });
            }
            Ok(Tagged {
                event,
                month: FIRST_MONTH + (idx - 1 - first) as u32,
            })
        })
        .collect()
}

/// 判斷置閏並定出最終月名，返回依序排列的各月。
///
/// `tagged` 須為 [`segment`] 的結果，即恰好覆蓋一歲。
pub fn resolve(tagged: Vec<Tagged>, annus: i32) -> Result<Vec<MonthSegment>, CalendarError> {
    let (lc_start, lc_end) = match (tagged.first(), tagged.last()) {
        (Some(first), Some(last)) => (first.event.date, last.event.date),
        _ => return Err(CalendarError::NoNewMoonBeforeSolstice { annus }),
    };
    let new_moons = tagged
        .iter()
        .filter(|t| t.event.is_new_moon() && t.event.date > lc_start && t.event.date <= lc_end)
        .count();

    let leap = if new_moons > 12 {
        let has_principal_term = |month: u32| {
            tagged.iter().any(|t| {
                t.month == month && t.event.solar_term().is_some_and(|term| term.is_principal())
            })
        };
        let leap = LEAP_CANDIDATES
            .filter(|&m| tagged.iter().any(|t| t.month == m))
            .find(|&m| !has_principal_term(m))
            .ok_or(CalendarError::NoLeapMonth { annus })?;
        Some(leap)
    } else {
        None
    };

    let fold = |n: u32| if n > 12 { n - 12 } else { n };
    let finalize = |provisional: u32| match leap {
        Some(m) if provisional == m => Month::Leap(fold(provisional - 1)),
        Some(m) if provisional > m => Month::Common(fold(provisional - 1)),
        _ => Month::Common(fold(provisional)),
    };

    let mut segments: Vec<(u32, MonthSegment)> = Vec::with_capacity(14);
    for t in tagged {
        match segments.last_mut() {
            Some((provisional, seg)) if *provisional == t.month => seg.events.push(t.event),
            _ => segments.push((
                t.month,
                MonthSegment {
                    month: finalize(t.month),
                    start: t.event.date,
                    events: vec![t.event],
                },
            )),
        }
    }
    let segments: Vec<MonthSegment> = segments.into_iter().map(|(_, seg)| seg).collect();

    for pair in segments.windows(2) {
        let (prev, next) = (pair[0].month, pair[1].month);
        if !prev.is_followed_by(next) {
            return Err(CalendarError::IrregularMonths { annus, prev, next });
        }
    }
    if let Some(seg) = segments.iter().find(|seg| !seg.events.iter().any(AstroEvent::is_new_moon)) {
        return Err(CalendarError::UntaggedEvent {
            annus,
            date: seg.start,
        });
    }
    if let Some(month) = segments.iter().map(|seg| seg.month).find(Month::is_leap) {
        info!(annus, ?month, "leap month inserted");
    }
    Ok(segments)
}
