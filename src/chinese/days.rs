//! 逐日展開

use std::collections::HashMap;

use crate::date::Date;
use crate::error::CalendarError;

use super::fmt::{self, Script};
use super::months::MonthSegment;
use super::{LunisolarDay, Month, SolarTerm};

/// 將各月展開為逐日記錄，自首月朔日至末一天象（本年冬至）當日。
///
/// 初一的 `label` 為月名，其餘為日名；名稱表查不到時報錯，不以空白代替。
/// `year` 以正月初一換年：首個正月之前屬 `annus - 1`。
pub fn expand(
    segments: &[MonthSegment],
    annus: i32,
    script: Script,
) -> Result<Vec<LunisolarDay>, CalendarError> {
    let terms: HashMap<Date, SolarTerm> = segments
        .iter()
        .flat_map(|seg| &seg.events)
        .filter_map(|e| e.solar_term().map(|term| (e.date, term)))
        .collect();
    let Some(end) = segments
        .last()
        .and_then(|seg| seg.events.last())
        .map(|e| e.date)
    else {
        return Ok(Vec::new());
    };

    let mut days = Vec::with_capacity(400);
    let mut year = annus - 1;
    for (i, seg) in segments.iter().enumerate() {
        // 本月最後一日：次月朔日前一日，末月則為本年冬至
        let last = segments.get(i + 1).map_or(end, |next| next.start.pred());
        if seg.month == Month::Common(1) {
            year = annus;
        }
        let mut date = seg.start;
        while date <= last {
            let day = (date - seg.start + 1) as u32;
            let label = if day == 1 {
                fmt::month(seg.month, script)
                    .ok_or(CalendarError::MissingMonthName { month: seg.month })?
            } else {
                fmt::day(day, script).ok_or(CalendarError::MissingDayName { day })?
            };
            days.push(LunisolarDay {
                date,
                year,
                month: seg.month,
                day,
                solar_term: terms.get(&date).copied(),
                holiday: None,
                label,
            });
            date = date.succ();
        }
    }
    Ok(days)
}
