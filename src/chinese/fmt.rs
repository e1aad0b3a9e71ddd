//! 日名、月名、節氣名及節日名稱表
//!
//! 各表均有簡體、繁體兩套，以 [`Script`] 選擇。表外的序號返回 `None`，由調用者決定如何報錯。

use serde::Deserialize;

use super::{Holiday, Month, SolarTerm};

/// 文字版本
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    #[default]
    Simplified,
    Traditional,
}

impl Script {
    fn pick<T>(self, simplified: T, traditional: T) -> T {
        match self {
            Script::Simplified => simplified,
            Script::Traditional => traditional,
        }
    }
}

/// 第 2 至 30 日的日名，第 0 項對應初二。兩套文字相同。
const DAYS: [&str; 29] = [
    "初二", "初三", "初四", "初五", "初六", "初七", "初八", "初九", "初十", "十一", "十二", "十三",
    "十四", "十五", "十六", "十七", "十八", "十九", "二十", "廿一", "廿二", "廿三", "廿四", "廿五",
    "廿六", "廿七", "廿八", "廿九", "三十",
];

const MONTHS: [&str; 12] = [
    "正月", "二月", "三月", "四月", "五月", "六月", "七月", "八月", "九月", "十月", "十一月", "十二月",
];
const LEAP_MONTHS: [&str; 12] = [
    "闰正月", "闰二月", "闰三月", "闰四月", "闰五月", "闰六月", "闰七月", "闰八月", "闰九月", "闰十月",
    "闰十一月", "闰十二月",
];
const LEAP_MONTHS_TRAD: [&str; 12] = [
    "閏正月", "閏二月", "閏三月", "閏四月", "閏五月", "閏六月", "閏七月", "閏八月", "閏九月", "閏十月",
    "閏十一月", "閏十二月",
];

/// 自春分（0°）起每 15° 一項，共 24 項。
const SOLAR_TERMS: [&str; 24] = [
    "春分", "清明", "谷雨", "立夏", "小满", "芒种", "夏至", "小暑", "大暑", "立秋", "处暑", "白露",
    "秋分", "寒露", "霜降", "立冬", "小雪", "大雪", "冬至", "小寒", "大寒", "立春", "雨水", "惊蛰",
];
const SOLAR_TERMS_TRAD: [&str; 24] = [
    "春分", "清明", "穀雨", "立夏", "小滿", "芒種", "夏至", "小暑", "大暑", "立秋", "處暑", "白露",
    "秋分", "寒露", "霜降", "立冬", "小雪", "大雪", "冬至", "小寒", "大寒", "立春", "雨水", "驚蟄",
];

/// 取得日名，`2..=30` 之外（含初一，初一以月名代替）返回 `None`。
///
/// # 用例
///
/// ```
/// use nongli::chinese::fmt::{self, Script};
///
/// assert_eq!(Some("初十"), fmt::day(10, Script::Simplified));
/// assert_eq!(Some("廿五"), fmt::day(25, Script::Traditional));
/// assert_eq!(None, fmt::day(31, Script::Simplified));
/// ```
///
/// 兩套文字共用同一日名表，`script` 僅為與其他名稱函數一致而保留。
pub fn day(d: u32, _script: Script) -> Option<&'static str> {
    let idx = d.checked_sub(2)? as usize;
    DAYS.get(idx).copied()
}

/// 取得月名（含「月」字），月序號不在 `1..=12` 間則返回 `None`。
///
/// # 用例
///
/// ```
/// use nongli::chinese::{fmt::{self, Script}, Month::*};
///
/// assert_eq!(Some("十一月"), fmt::month(Common(11), Script::Simplified));
/// assert_eq!(Some("闰十一月"), fmt::month(Leap(11), Script::Simplified));
/// assert_eq!(Some("閏正月"), fmt::month(Leap(1), Script::Traditional));
/// assert_eq!(None, fmt::month(Common(13), Script::Simplified));
/// ```
pub fn month(m: Month, script: Script) -> Option<&'static str> {
    let table = match m {
        Month::Common(_) => &MONTHS,
        Month::Leap(_) => script.pick(&LEAP_MONTHS, &LEAP_MONTHS_TRAD),
    };
    let idx = m.num().checked_sub(1)? as usize;
    table.get(idx).copied()
}

/// 節氣名
///
/// ```
/// use nongli::chinese::{fmt::{self, Script}, SolarTerm};
///
/// assert_eq!("谷雨", fmt::solar_term(SolarTerm::new(30).unwrap(), Script::Simplified));
/// assert_eq!("穀雨", fmt::solar_term(SolarTerm::new(30).unwrap(), Script::Traditional));
/// ```
pub fn solar_term(term: SolarTerm, script: Script) -> &'static str {
    script.pick(&SOLAR_TERMS, &SOLAR_TERMS_TRAD)[term.index()]
}

/// 節日名
pub fn holiday(holiday: Holiday, script: Script) -> &'static str {
    use Holiday::*;
    match holiday {
        Laba => script.pick("腊八", "臘八"),
        NewYearsEve => "除夕",
        SpringFestival => script.pick("春节", "春節"),
        Lantern => "元宵",
        ColdFood => "寒食",
        DragonBoat => "端午",
        Qixi => "七夕",
        GhostFestival => "中元",
        MidAutumn => "中秋",
        DoubleNinth => script.pick("重阳", "重陽"),
        LowerOrigin => "下元",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chinese::Month::*;

    #[test]
    fn test_day() {
        for (std, d) in [
            ("初二", 2),
            ("初十", 10),
            ("十一", 11),
            ("二十", 20),
            ("廿一", 21),
            ("三十", 30),
        ] {
            assert_eq!(Some(std), day(d, Script::Simplified));
            assert_eq!(Some(std), day(d, Script::Traditional));
        }
        assert_eq!(None, day(0, Script::Simplified));
        assert_eq!(None, day(1, Script::Simplified));
        assert_eq!(None, day(31, Script::Traditional));
    }

    #[test]
    fn test_month() {
        assert_eq!(Some("正月"), month(Common(1), Script::Traditional));
        assert_eq!(Some("十二月"), month(Common(12), Script::Simplified));
        assert_eq!(Some("闰六月"), month(Leap(6), Script::Simplified));
        assert_eq!(Some("閏六月"), month(Leap(6), Script::Traditional));
        assert_eq!(None, month(Common(0), Script::Simplified));
        assert_eq!(None, month(Leap(13), Script::Simplified));
    }

    #[test]
    fn test_solar_term() {
        let name = |angle, script| solar_term(SolarTerm::new(angle).unwrap(), script);
        assert_eq!("冬至", name(-90, Script::Simplified));
        assert_eq!("冬至", name(270, Script::Simplified));
        assert_eq!("清明", name(15, Script::Traditional));
        assert_eq!("惊蛰", name(-15, Script::Simplified));
        assert_eq!("驚蟄", name(-15, Script::Traditional));
        assert_eq!("立冬", name(225, Script::Simplified));
        assert_eq!("小雪", name(-120, Script::Simplified));
        assert_eq!("春分", name(360, Script::Simplified));
        for script in [Script::Simplified, Script::Traditional] {
            let names: std::collections::HashSet<_> =
                SolarTerm::all().map(|t| solar_term(t, script)).collect();
            assert_eq!(24, names.len());
        }
    }

    #[test]
    fn test_holiday() {
        assert_eq!("春节", holiday(Holiday::SpringFestival, Script::Simplified));
        assert_eq!("春節", holiday(Holiday::SpringFestival, Script::Traditional));
        assert_eq!("寒食", holiday(Holiday::ColdFood, Script::Traditional));
    }
}
