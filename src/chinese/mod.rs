//! Chinese calendar
//!
//! Note: 為方便處理諸多術語，本模塊文檔用中文。
//!
//! 本程序以 [`ephemeris`] 給出的節氣、合朔時刻編算夏曆，步驟如下：
//!
//! 1. [`events`]：取一歲所需的節氣與合朔，歸算到當地日期（默認北京時間，UTC+8）；
//! 2. [`months`]：以含冬至之朔為十一月，依次數朔定月，逢十三朔之歲置閏；
//! 3. [`days`]：展開為逐日記錄；
//! 4. [`holidays`]：標記傳統節日；
//! 5. [`Calendar`]：緩存各歲結果，並拼合相鄰兩歲以覆蓋整個公曆年。

use std::collections::BTreeMap;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::config::CalendarConfig;
use crate::date::Date;
use crate::error::CalendarError;

pub mod cache;
pub mod days;
pub mod ephemeris;
pub mod events;
pub mod fmt;
pub mod holidays;
pub mod months;

use cache::YearCache;
use ephemeris::{Ephemeris, Meeus};
use fmt::Script;

/// 月名，`Common` 為平月，`Leap` 為閏月。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Month {
    Common(u32),
    Leap(u32),
}
impl Month {
    /// 取得月序號，無論平閏。
    pub fn num(&self) -> u32 {
        use Month::*;
        *match self {
            Common(v) | Leap(v) => v,
        }
    }
    /// 閏月為 `true`，平月為 `false`
    pub fn is_leap(&self) -> bool {
        matches!(self, Self::Leap(_))
    }
    /// 取得月名的文本形式，月序號不在 `1..=12` 間則返回 `None`。
    pub fn name(&self, script: Script) -> Option<&'static str> {
        fmt::month(*self, script)
    }
    /// 正常情況下緊隨本月的月份是否為 `next`：平月之後為次月或同序號閏月，閏月之後為次月。
    pub fn is_followed_by(&self, next: Month) -> bool {
        use Month::*;
        match (*self, next) {
            (Common(a), Leap(b)) => a == b,
            (Common(a) | Leap(a), Common(b)) => b == a % 12 + 1,
            (Leap(_), Leap(_)) => false,
        }
    }
}

/// 節氣，以太陽視黃經表示，為 `0..360` 間 15 的倍數，0 為春分。
///
/// 同一節氣在相鄰兩歲中分別以負角與正角求得（如上一冬至為 -90°，本年冬至為 270°），
/// 但兩者為同一節氣，取值相同。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SolarTerm(i32);

impl SolarTerm {
    /// 冬至
    pub const WINTER_SOLSTICE: SolarTerm = SolarTerm(270);
    /// 清明
    pub const QINGMING: SolarTerm = SolarTerm(15);

    /// 以距春分的度數建立，`angle` 可為負或超出 360，但須為 15 的倍數，否則返回 `None`。
    ///
    /// ```
    /// use nongli::chinese::SolarTerm;
    ///
    /// assert_eq!(SolarTerm::new(270), SolarTerm::new(-90));
    /// assert_eq!(Some(240), SolarTerm::new(-120).map(|t| t.longitude()));
    /// assert_eq!(None, SolarTerm::new(20));
    /// ```
    pub fn new(angle: i32) -> Option<Self> {
        (angle % 15 == 0).then(|| Self(angle.rem_euclid(360)))
    }
    /// 全部 24 個節氣，自春分起。
    pub fn all() -> impl Iterator<Item = SolarTerm> {
        (0..360).step_by(15).map(SolarTerm)
    }
    /// 太陽視黃經，單位為度，`0..360`。
    pub fn longitude(&self) -> i32 {
        self.0
    }
    /// 是否為中氣（黃經為 30° 的倍數），無中氣之月即為閏月。
    pub fn is_principal(&self) -> bool {
        self.0 % 30 == 0
    }
    pub fn name(&self, script: Script) -> &'static str {
        fmt::solar_term(*self, script)
    }
    /// 名稱表中的序號，春分為 0。
    pub(crate) fn index(&self) -> usize {
        (self.0 / 15) as usize
    }
}

/// 傳統節日
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Holiday {
    /// 臘八，十二月初八
    Laba,
    /// 除夕，春節前一日
    NewYearsEve,
    /// 春節，正月初一
    SpringFestival,
    /// 元宵，正月十五
    Lantern,
    /// 寒食，清明前一日
    ColdFood,
    /// 端午，五月初五
    DragonBoat,
    /// 七夕，七月初七
    Qixi,
    /// 中元，七月十五
    GhostFestival,
    /// 中秋，八月十五
    MidAutumn,
    /// 重陽，九月初九
    DoubleNinth,
    /// 下元，十月十五
    LowerOrigin,
}

impl Holiday {
    pub fn name(&self, script: Script) -> &'static str {
        fmt::holiday(*self, script)
    }
}

/// 一日的夏曆信息
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LunisolarDay {
    /// 公曆日期
    pub date: Date,
    /// 所在夏曆年，以正月初一換年
    pub year: i32,
    pub month: Month,
    /// 月內第幾日，`1..=30`
    pub day: u32,
    /// 當日所交節氣
    pub solar_term: Option<SolarTerm>,
    pub holiday: Option<Holiday>,
    /// 日曆上顯示的文字：初一顯示月名，其餘顯示日名
    pub label: &'static str,
}

/// 月首信息
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct NewMoon {
    /// 月名
    pub month: Month,
    /// 月首所在日期
    pub date: Date,
}

/// 「歲」，相鄰兩冬至間的時段，自含上一冬至之月（十一月）首日至本年冬至當日。
///
/// 注意：「歲」與「年」在曆法上不同，年以正月為首，但曆法編算須以兩冬至間的「歲」為基礎。
/// 本年冬至之後若置閏（如 2033 年閏十一月），只能由次一歲求得，故查詢公曆年時須拼合相鄰兩歲，見 [`Calendar::year`]。
#[derive(Debug, Clone)]
pub struct Annus {
    /// 序號，為該歲大部分時段所在的公元年
    pub annus: i32,
    /// 全部月首，含本年冬至所在之月
    pub months: Vec<NewMoon>,
    /// 逐日記錄，依日期排列且連續
    pub days: Vec<LunisolarDay>,
}

impl Annus {
    /// 以給定曆表編算公元 `annus` 年對應的歲。
    ///
    /// # 用例
    ///
    /// ```
    /// use nongli::chinese::{Annus, ephemeris::Meeus, Month::*};
    /// use nongli::CalendarConfig;
    ///
    /// let annus = Annus::compute(&Meeus, 2017, &CalendarConfig::default()).unwrap();
    /// assert_eq!(Some(Leap(6)), annus.leap_month());
    /// assert_eq!("2016-11-29", annus.months[0].date.iso_gregorian());
    /// ```
    pub fn compute<E: Ephemeris>(
        ephemeris: &E,
        annus: i32,
        config: &CalendarConfig,
    ) -> Result<Self, CalendarError> {
        debug!(annus, "computing lunisolar year");
        let events = events::assemble(ephemeris, annus, config.utc_offset_minutes)?;
        let tagged = months::segment(&events, annus)?;
        let segments = months::resolve(tagged, annus)?;
        let mut days = days::expand(&segments, annus, config.script)?;
        holidays::mark(&mut days);

        let months = segments
            .iter()
            .map(|seg| NewMoon {
                month: seg.month,
                date: seg.start,
            })
            .collect();
        Ok(Annus {
            annus,
            months,
            days,
        })
    }

    /// 該歲的閏月，無閏則為 `None`。
    pub fn leap_month(&self) -> Option<Month> {
        self.months.iter().map(|m| m.month).find(Month::is_leap)
    }

    /// 兩冬至間（不含首月之朔）的合朔次數，12 或 13。
    pub fn new_moon_count(&self) -> usize {
        self.months.len() - 1
    }

    /// 取得給定日期的記錄，不在該歲則返回 `None`。
    pub fn get(&self, date: Date) -> Option<&LunisolarDay> {
        let first = self.days.first()?;
        let idx = usize::try_from(date - first.date).ok()?;
        self.days.get(idx)
    }
}

/// 夏曆查詢服務，持有曆表與各歲結果的緩存。
///
/// # 用例
///
/// ```
/// use nongli::{Calendar, Date};
/// use nongli::chinese::{Holiday, Month::*};
///
/// let mut calendar = Calendar::default();
/// let days = calendar.year(2024).unwrap();
/// assert_eq!(366, days.len());
///
/// let date = Date::from_gregorian(2024, 2, 10).unwrap();
/// let day = calendar.day(date).unwrap();
/// assert_eq!((2024, Common(1), 1), (day.year, day.month, day.day));
/// assert_eq!(Some(Holiday::SpringFestival), day.holiday);
/// ```
#[derive(Debug)]
pub struct Calendar<E = Meeus> {
    ephemeris: E,
    config: CalendarConfig,
    cache: YearCache<Annus>,
}

impl Default for Calendar<Meeus> {
    fn default() -> Self {
        Self::new(CalendarConfig::default())
    }
}

impl Calendar<Meeus> {
    /// 以內置曆表建立。
    pub fn new(config: CalendarConfig) -> Self {
        Self::with_ephemeris(Meeus, config)
    }
}

impl<E: Ephemeris> Calendar<E> {
    pub fn with_ephemeris(ephemeris: E, config: CalendarConfig) -> Self {
        let cache = YearCache::new(config.cache_capacity);
        Calendar {
            ephemeris,
            config,
            cache,
        }
    }

    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    /// 目前緩存的歲數
    pub fn cached_years(&self) -> usize {
        self.cache.len()
    }

    /// 取得公元 `annus` 年對應的歲，已緩存者直接返回。
    pub fn annus(&mut self, annus: i32) -> Result<Rc<Annus>, CalendarError> {
        if let Some(hit) = self.cache.get(annus) {
            trace!(annus, "lunisolar year cache hit");
            return Ok(hit);
        }
        let computed = Annus::compute(&self.ephemeris, annus, &self.config)?;
        Ok(self.cache.insert(annus, computed))
    }

    /// 取得公曆 `year` 年一月一日至十二月三十一日的逐日夏曆，依日期排列。
    ///
    /// 由公元 `year` 年與 `year + 1` 年兩歲拼合而成，兩者重疊之日取後者。
    pub fn year(&mut self, year: i32) -> Result<Vec<LunisolarDay>, CalendarError> {
        // 次年元旦亦須可表示，否則 `year + 1` 無從計算
        let bounds = year.checked_add(1).and_then(|next| {
            Some((
                Date::from_gregorian(year, 1, 1)?,
                Date::from_gregorian(next, 1, 1)?,
            ))
        });
        let Some((first, end)) = bounds else {
            return Err(CalendarError::UnsupportedYear { year });
        };
        let this = self.annus(year)?;
        let next = self.annus(year + 1)?;

        let mut merged: BTreeMap<Date, &LunisolarDay> =
            this.days.iter().map(|d| (d.date, d)).collect();
        merged.extend(next.days.iter().map(|d| (d.date, d)));

        let days: Vec<LunisolarDay> = merged.range(first..end).map(|(_, &d)| *d).collect();
        let mut expected = first;
        for day in &days {
            if day.date != expected {
                break;
            }
            expected = expected.succ();
        }
        if expected != end {
            return Err(CalendarError::MissingDate { date: expected });
        }
        Ok(days)
    }

    /// 取得單日的夏曆信息。
    pub fn day(&mut self, date: Date) -> Result<LunisolarDay, CalendarError> {
        let year = date.gregorian().0;
        if let Some(day) = self.annus(year + 1)?.get(date) {
            return Ok(*day);
        }
        self.annus(year)?
            .get(date)
            .copied()
            .ok_or(CalendarError::MissingDate { date })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annus(year: i32) -> Annus {
        Annus::compute(&Meeus, year, &CalendarConfig::default()).unwrap()
    }

    #[test]
    fn months() {
        let annus = annus(2000);
        let stds = [
            (11, "1999-12-08"),
            (12, "2000-01-07"),
            (1, "2000-02-05"),
            (2, "2000-03-06"),
            (3, "2000-04-05"),
            (4, "2000-05-04"),
            (5, "2000-06-02"),
            (6, "2000-07-02"),
            (7, "2000-07-31"),
            (8, "2000-08-29"),
            (9, "2000-09-28"),
            (10, "2000-10-27"),
            (11, "2000-11-26"),
        ];
        assert_eq!(stds.len(), annus.months.len());
        for (std, month) in stds.iter().zip(&annus.months) {
            assert_eq!(Month::Common(std.0), month.month);
            assert_eq!(std.1, month.date.iso_gregorian());
        }
        assert_eq!(None, annus.leap_month());
        assert_eq!(12, annus.new_moon_count());
    }

    #[test]
    fn leap_months() {
        let stds = [
            (11, "2016-11-29"),
            (12, "2016-12-29"),
            (1, "2017-01-28"),
            (2, "2017-02-26"),
            (3, "2017-03-28"),
            (4, "2017-04-26"),
            (5, "2017-05-26"),
            (6, "2017-06-24"),
            (-6, "2017-07-23"),
            (7, "2017-08-22"),
            (8, "2017-09-20"),
            (9, "2017-10-20"),
            (10, "2017-11-18"),
            (11, "2017-12-18"),
        ];
        let annus = annus(2017);
        for (std, month) in stds.iter().zip(&annus.months) {
            let std_month = if std.0 > 0 {
                Month::Common(std.0 as u32)
            } else {
                Month::Leap(-std.0 as u32)
            };
            assert_eq!(
                (std_month, std.1.into()),
                (month.month, month.date.iso_gregorian())
            );
        }
        assert_eq!(stds.len(), annus.months.len());
        assert_eq!(13, annus.new_moon_count());
    }

    #[test]
    fn leap_eleventh_after_solstice() {
        let annus = annus(2034);
        assert_eq!(Some(Month::Leap(11)), annus.leap_month());
        assert_eq!(
            vec![
                (Month::Common(11), "2033-11-22".to_owned()),
                (Month::Leap(11), "2033-12-22".to_owned()),
                (Month::Common(12), "2034-01-20".to_owned()),
                (Month::Common(1), "2034-02-19".to_owned()),
            ],
            annus.months[..4]
                .iter()
                .map(|m| (m.month, m.date.iso_gregorian()))
                .collect::<Vec<_>>()
        );
        // 前一歲見不到該閏月
        assert_eq!(None, self::annus(2033).leap_month());
    }

    #[test]
    fn dates() {
        use Month::*;
        let annus = annus(2017);
        let data = [
            ((2016, 11, 29), Some((2016, Common(11), 1))),
            ((2017, 1, 27), Some((2016, Common(12), 30))),
            ((2017, 1, 28), Some((2017, Common(1), 1))),
            ((2017, 7, 22), Some((2017, Common(6), 29))),
            ((2017, 7, 23), Some((2017, Leap(6), 1))),
            ((2017, 12, 17), Some((2017, Common(10), 30))),
            ((2017, 12, 18), Some((2017, Common(11), 1))),
            ((2016, 11, 28), None),
            ((2017, 12, 23), None),
        ];
        for ((y, m, d), std) in data {
            let date = Date::from_gregorian(y, m, d).unwrap();
            assert_eq!(
                std,
                annus.get(date).map(|day| (day.year, day.month, day.day)),
                "{}",
                date
            );
        }
    }

    #[test]
    fn annus_spans_solstice_to_solstice() {
        let annus = annus(2024);
        assert_eq!("2023-12-13", annus.days[0].date.iso_gregorian());
        let last = annus.days.last().unwrap();
        assert_eq!("2024-12-21", last.date.iso_gregorian());
        assert_eq!(Some(SolarTerm::WINTER_SOLSTICE), last.solar_term);
        for pair in annus.days.windows(2) {
            assert_eq!(pair[0].date.succ(), pair[1].date);
        }
    }

    #[test]
    fn month_progression() {
        use Month::*;
        assert!(Common(11).is_followed_by(Common(12)));
        assert!(Common(12).is_followed_by(Common(1)));
        assert!(Common(11).is_followed_by(Leap(11)));
        assert!(Leap(11).is_followed_by(Common(12)));
        assert!(!Leap(6).is_followed_by(Leap(6)));
        assert!(!Common(3).is_followed_by(Common(5)));
        assert!(!Common(3).is_followed_by(Leap(2)));
    }

    #[test]
    fn solar_term_identity() {
        assert_eq!(24, SolarTerm::all().count());
        assert_eq!(Some(SolarTerm::QINGMING), SolarTerm::new(15));
        assert_eq!(Some(SolarTerm::QINGMING), SolarTerm::new(375));
        assert_eq!(None, SolarTerm::new(20));
        // 兩歲之中同一節氣的兩種角度
        for (before, after) in [(-120, 240), (-105, 255), (-90, 270)] {
            assert_eq!(SolarTerm::new(before), SolarTerm::new(after));
        }
        assert_eq!(Some(SolarTerm::WINTER_SOLSTICE), SolarTerm::new(-90));
        assert!(SolarTerm::WINTER_SOLSTICE.is_principal());
        assert!(SolarTerm::new(-60).unwrap().is_principal());
        assert!(!SolarTerm::new(-105).unwrap().is_principal());
        assert!(!SolarTerm::QINGMING.is_principal());
        assert_eq!(0, SolarTerm::new(0).unwrap().index());
        assert_eq!(18, SolarTerm::WINTER_SOLSTICE.index());
        assert_eq!(23, SolarTerm::new(-15).unwrap().index());
    }

    #[test]
    fn cache_is_reused() {
        let mut calendar = Calendar::default();
        let first = calendar.annus(2024).unwrap();
        let again = calendar.annus(2024).unwrap();
        assert!(Rc::ptr_eq(&first, &again));
        assert_eq!(1, calendar.cached_years());
        calendar.year(2024).unwrap();
        assert_eq!(2, calendar.cached_years());
    }
}
