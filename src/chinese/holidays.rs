//! 傳統節日
//!
//! 分兩遍標記：先按月日標出固定節日，再為「某日前一日」類節日（除夕、寒食）回填前一日。
//! 閏月不過節。

use tracing::debug;

use super::{Holiday, LunisolarDay, Month, SolarTerm};

/// 以月日定的節日，只適用於平月。
pub fn fixed(month: Month, day: u32) -> Option<Holiday> {
    use Holiday::*;
    let Month::Common(month) = month else {
        return None;
    };
    Some(match (month, day) {
        (12, 8) => Laba,
        (1, 1) => SpringFestival,
        (1, 15) => Lantern,
        (5, 5) => DragonBoat,
        (7, 7) => Qixi,
        (7, 15) => GhostFestival,
        (8, 15) => MidAutumn,
        (9, 9) => DoubleNinth,
        (10, 15) => LowerOrigin,
        _ => return None,
    })
}

/// 依次以前一日標記的節日：春節前一日為除夕，清明前一日為寒食。
fn eve_of(day: &LunisolarDay) -> Option<Holiday> {
    if day.holiday == Some(Holiday::SpringFestival) {
        Some(Holiday::NewYearsEve)
    } else if day.solar_term == Some(SolarTerm::QINGMING) {
        Some(Holiday::ColdFood)
    } else {
        None
    }
}

/// 為 `days` 標記節日。`days` 須依日期連續排列。
pub fn mark(days: &mut [LunisolarDay]) {
    for day in days.iter_mut() {
        day.holiday = fixed(day.month, day.day);
    }
    for i in 0..days.len() {
        let Some(holiday) = eve_of(&days[i]) else {
            continue;
        };
        match i.checked_sub(1) {
            Some(prev) => days[prev].holiday = Some(holiday),
            None => debug!(date = %days[i].date, ?holiday, "no previous day to mark"),
        }
    }
}
