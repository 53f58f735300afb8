//! Solar <-> lunar calendar conversion and birth-hour slots.
//!
//! Conversion is table-driven over a packed per-year table
//! and supports solar dates 1900-01-31 through 2100-12-31. Year and day pillars
//! come from the sexagenary cycle: the lunar year `y` is pillar `(y - 4) mod 60`,
//! and solar 1900-01-01 is Jia-Xu (index 10).

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ChartError;
use crate::ganzhi::{Branch, Pillar};
use crate::lunar_data::{
    FIRST_LUNAR_YEAR, YEAR_START_OFFSETS, leap_month, leap_month_days, month_days, year_info,
};
use crate::util::{civil_from_days, days_from_civil, days_in_month};

/// Earliest supported solar date (lunar 1900-01-01).
pub const FIRST_SOLAR_DATE: SolarDate = SolarDate {
    year: 1900,
    month: 1,
    day: 31,
};

/// Latest supported solar date.
pub const LAST_SOLAR_DATE: SolarDate = SolarDate {
    year: 2100,
    month: 12,
    day: 31,
};

const LUNAR_EPOCH_DAYS: i64 = days_from_civil(1900, 1, 31);
const DAY_PILLAR_EPOCH_DAYS: i64 = days_from_civil(1900, 1, 1);
const DAY_PILLAR_EPOCH_INDEX: i64 = 10;

/// Calendar in which a birth date is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarKind {
    #[default]
    Solar,
    Lunar,
}

/// A validated Gregorian date inside the supported range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SolarDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl SolarDate {
    /// Validate a civil date against the calendar and the supported range.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, ChartError> {
        let date = Self { year, month, day };
        let real = (1..=12).contains(&month) && day >= 1 && day <= days_in_month(year, month);
        if !real || date < FIRST_SOLAR_DATE || date > LAST_SOLAR_DATE {
            return Err(ChartError::out_of_range(year, month as i32, day as i32));
        }
        Ok(date)
    }

    /// Days since 1970-01-01.
    pub const fn days_since_unix_epoch(self) -> i64 {
        days_from_civil(self.year, self.month, self.day)
    }

    /// The following civil day, if still inside the supported range.
    pub fn succ(self) -> Result<Self, ChartError> {
        let (y, m, d) = civil_from_days(self.days_since_unix_epoch() + 1);
        Self::new(y, m, d)
    }

    /// Day pillar of this civil day.
    pub const fn day_pillar(self) -> Pillar {
        let n = (self.days_since_unix_epoch() - DAY_PILLAR_EPOCH_DAYS + DAY_PILLAR_EPOCH_INDEX)
            .rem_euclid(60);
        Pillar::from_cycle(n as i32)
    }
}

impl Display for SolarDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// A lunar date with its year and (civil) day pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LunarDate {
    /// Lunar year number (the Gregorian year in which it begins).
    pub year: i32,
    pub year_pillar: Pillar,
    /// Month number 1..=12; a leap month repeats its predecessor's number.
    pub month: u8,
    /// Day of month 1..=30.
    pub day: u8,
    pub is_leap_month: bool,
    /// Pillar of the civil day, before any late-Zi adjustment.
    pub day_pillar: Pillar,
}

impl Display for LunarDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let leap = if self.is_leap_month { "leap " } else { "" };
        write!(
            f,
            "{} ({}) {}month {} day {}",
            self.year, self.year_pillar, leap, self.month, self.day
        )
    }
}

/// Year pillar of a lunar year.
pub const fn year_pillar(lunar_year: i32) -> Pillar {
    Pillar::from_cycle(lunar_year.rem_euclid(60) - 4)
}

/// `(month, is_leap, length)` for every month of a lunar year in order.
fn months_of(info: u32) -> impl Iterator<Item = (u8, bool, u16)> {
    (1..=12u8).flat_map(move |m| {
        let regular = (m, false, month_days(info, m));
        let leap = (leap_month(info) == m).then(|| (m, true, leap_month_days(info)));
        std::iter::once(regular).chain(leap)
    })
}

/// Convert a solar date to its lunar date.
pub fn solar_to_lunar(year: i32, month: u8, day: u8) -> Result<LunarDate, ChartError> {
    solar_date_to_lunar(SolarDate::new(year, month, day)?)
}

/// Convert an already-validated [`SolarDate`] to its lunar date.
pub fn solar_date_to_lunar(solar: SolarDate) -> Result<LunarDate, ChartError> {
    let out_of_range = || ChartError::out_of_range(solar.year, solar.month as i32, solar.day as i32);
    let offset = solar.days_since_unix_epoch() - LUNAR_EPOCH_DAYS;
    let total = YEAR_START_OFFSETS[YEAR_START_OFFSETS.len() - 1] as i64;
    if offset < 0 || offset >= total {
        return Err(out_of_range());
    }

    let row = YEAR_START_OFFSETS.partition_point(|&start| start as i64 <= offset) - 1;
    let lunar_year = FIRST_LUNAR_YEAR + row as i32;
    let info = year_info(lunar_year).ok_or_else(out_of_range)?;
    let mut remaining = offset - YEAR_START_OFFSETS[row] as i64;

    for (m, is_leap, len) in months_of(info) {
        if remaining < len as i64 {
            return Ok(LunarDate {
                year: lunar_year,
                year_pillar: year_pillar(lunar_year),
                month: m,
                day: remaining as u8 + 1,
                is_leap_month: is_leap,
                day_pillar: solar.day_pillar(),
            });
        }
        remaining -= len as i64;
    }
    Err(out_of_range())
}

/// Lunar date of the civil day after `solar`.
///
/// The lunar table runs to lunar 2100-12-29 (solar 2101-01-28), so the day
/// after [`LAST_SOLAR_DATE`] still converts even though it is not itself a
/// supported input.
pub fn next_day_lunar(solar: SolarDate) -> Result<LunarDate, ChartError> {
    let (year, month, day) = civil_from_days(solar.days_since_unix_epoch() + 1);
    solar_date_to_lunar(SolarDate { year, month, day })
}

/// Convert a lunar date to the solar date it falls on.
///
/// `is_leap_month` selects the leap month; it is an error if the year has no
/// leap month numbered `month`.
pub fn lunar_to_solar(
    year: i32,
    month: u8,
    day: u8,
    is_leap_month: bool,
) -> Result<SolarDate, ChartError> {
    let out_of_range = || ChartError::out_of_range(year, month as i32, day as i32);
    let info = year_info(year).ok_or_else(out_of_range)?;
    if !(1..=12).contains(&month) || day == 0 {
        return Err(out_of_range());
    }
    if is_leap_month && leap_month(info) != month {
        return Err(out_of_range());
    }

    let mut offset = YEAR_START_OFFSETS[(year - FIRST_LUNAR_YEAR) as usize] as i64;
    for (m, leap, len) in months_of(info) {
        if m == month && leap == is_leap_month {
            if day as u16 > len {
                return Err(out_of_range());
            }
            offset += day as i64 - 1;
            let (y, mo, d) = civil_from_days(LUNAR_EPOCH_DAYS + offset);
            return SolarDate::new(y, mo, d).map_err(|_| out_of_range());
        }
        offset += len as i64;
    }
    Err(out_of_range())
}

/// Map a clock hour to its two-hour branch slot.
///
/// 23:00-00:59 is Zi, 01:00-02:59 Chou, and so on.
pub fn hour_branch(hour: i32) -> Result<Branch, ChartError> {
    if !(0..=23).contains(&hour) {
        return Err(ChartError::InvalidHour(hour));
    }
    Ok(Branch::from_cycle((hour + 1) / 2))
}

/// Whether the hour falls in the late Zi slot (23:00-23:59).
pub const fn is_late_zi(hour: i32) -> bool {
    hour == 23
}

/// Resolve raw birth-date input to both calendars.
///
/// Solar input that lands in a leap month must carry `leap_flag = true`, or
/// the result is [`ChartError::AmbiguousLeapMonth`]. For lunar input the flag
/// selects the leap month.
pub fn resolve_birth_date(
    calendar: CalendarKind,
    year: i32,
    month: u8,
    day: u8,
    leap_flag: bool,
) -> Result<(SolarDate, LunarDate), ChartError> {
    let (solar, lunar) = match calendar {
        CalendarKind::Solar => {
            let solar = SolarDate::new(year, month, day)?;
            let lunar = solar_date_to_lunar(solar)?;
            if lunar.is_leap_month && !leap_flag {
                return Err(ChartError::AmbiguousLeapMonth {
                    lunar_year: lunar.year,
                    lunar_month: lunar.month,
                });
            }
            (solar, lunar)
        }
        CalendarKind::Lunar => {
            let solar = lunar_to_solar(year, month, day, leap_flag)?;
            (solar, solar_date_to_lunar(solar)?)
        }
    };
    debug!(%solar, %lunar, ?calendar, "resolved birth date");
    Ok((solar, lunar))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ganzhi::{Branch, Stem};

    fn pillar(stem: Stem, branch: Branch) -> Pillar {
        Pillar::new(stem, branch).unwrap()
    }

    #[test]
    fn epoch_is_new_year_1900() {
        let l = solar_to_lunar(1900, 1, 31).unwrap();
        assert_eq!((l.year, l.month, l.day, l.is_leap_month), (1900, 1, 1, false));
        assert_eq!(l.year_pillar, pillar(Stem::Geng, Branch::Zi));
    }

    #[test]
    fn before_epoch_is_out_of_range() {
        assert!(matches!(
            solar_to_lunar(1900, 1, 30),
            Err(ChartError::DateOutOfRange { .. })
        ));
    }

    #[test]
    fn after_2100_is_out_of_range() {
        assert!(matches!(
            solar_to_lunar(2101, 1, 1),
            Err(ChartError::DateOutOfRange { .. })
        ));
    }

    #[test]
    fn last_supported_day() {
        let l = solar_to_lunar(2100, 12, 31).unwrap();
        assert_eq!((l.year, l.month, l.day), (2100, 12, 1));
    }

    #[test]
    fn invalid_civil_dates() {
        assert!(solar_to_lunar(2023, 2, 29).is_err());
        assert!(solar_to_lunar(2023, 13, 1).is_err());
        assert!(solar_to_lunar(2023, 4, 0).is_err());
        assert!(solar_to_lunar(2024, 2, 29).is_ok());
    }

    #[test]
    fn new_year_2024() {
        let eve = solar_to_lunar(2024, 2, 9).unwrap();
        assert_eq!((eve.year, eve.month, eve.day), (2023, 12, 30));
        let ny = solar_to_lunar(2024, 2, 10).unwrap();
        assert_eq!((ny.year, ny.month, ny.day), (2024, 1, 1));
        assert_eq!(ny.year_pillar, pillar(Stem::Jia, Branch::Chen));
    }

    #[test]
    fn leap_second_month_2023() {
        let l = solar_to_lunar(2023, 3, 22).unwrap();
        assert_eq!((l.year, l.month, l.day, l.is_leap_month), (2023, 2, 1, true));
        let after = solar_to_lunar(2023, 4, 20).unwrap();
        assert_eq!((after.month, after.day, after.is_leap_month), (3, 1, false));
    }

    #[test]
    fn day_pillar_known_dates() {
        assert_eq!(
            SolarDate::new(2000, 1, 1).unwrap().day_pillar(),
            pillar(Stem::Wu, Branch::Wu)
        );
        assert_eq!(
            SolarDate::new(1988, 6, 20).unwrap().day_pillar(),
            pillar(Stem::Bing, Branch::Wu)
        );
    }

    #[test]
    fn lunar_to_solar_inverts() {
        assert_eq!(
            lunar_to_solar(2023, 2, 1, true).unwrap(),
            SolarDate::new(2023, 3, 22).unwrap()
        );
        assert_eq!(
            lunar_to_solar(1988, 5, 7, false).unwrap(),
            SolarDate::new(1988, 6, 20).unwrap()
        );
    }

    #[test]
    fn lunar_to_solar_rejects_missing_leap_month() {
        assert!(lunar_to_solar(2023, 3, 1, true).is_err());
        assert!(lunar_to_solar(2024, 1, 1, true).is_err());
    }

    #[test]
    fn lunar_to_solar_rejects_day_30_of_short_month() {
        // 2023 leap month 2 has 29 days
        assert!(lunar_to_solar(2023, 2, 30, true).is_err());
    }

    #[test]
    fn hour_slots() {
        assert_eq!(hour_branch(23).unwrap(), Branch::Zi);
        assert_eq!(hour_branch(0).unwrap(), Branch::Zi);
        assert_eq!(hour_branch(1).unwrap(), Branch::Chou);
        assert_eq!(hour_branch(12).unwrap(), Branch::Wu);
        assert_eq!(hour_branch(19).unwrap(), Branch::Xu);
        assert_eq!(hour_branch(24), Err(ChartError::InvalidHour(24)));
        assert_eq!(hour_branch(-1), Err(ChartError::InvalidHour(-1)));
    }

    #[test]
    fn resolve_requires_leap_flag_for_solar_input() {
        let err = resolve_birth_date(CalendarKind::Solar, 2023, 3, 22, false).unwrap_err();
        assert_eq!(
            err,
            ChartError::AmbiguousLeapMonth {
                lunar_year: 2023,
                lunar_month: 2
            }
        );
        assert!(resolve_birth_date(CalendarKind::Solar, 2023, 3, 22, true).is_ok());
    }

    #[test]
    fn resolve_lunar_input() {
        let (solar, lunar) = resolve_birth_date(CalendarKind::Lunar, 1988, 11, 25, false).unwrap();
        assert_eq!(solar, SolarDate::new(1989, 1, 2).unwrap());
        assert_eq!((lunar.month, lunar.day), (11, 25));
    }

    #[test]
    fn year_pillar_accepts_any_year() {
        assert_eq!(year_pillar(1984), pillar(Stem::Jia, Branch::Zi));
        assert_eq!(year_pillar(3), pillar(Stem::Gui, Branch::Hai));
        assert_eq!(year_pillar(i32::MIN), year_pillar(i32::MIN + 60));
        assert_eq!(year_pillar(i32::MAX), year_pillar(i32::MAX - 60));
    }

    #[test]
    fn successor_lunar_day_past_last_solar_date() {
        let next = next_day_lunar(LAST_SOLAR_DATE).unwrap();
        assert_eq!((next.year, next.month, next.day), (2100, 12, 2));
        assert_eq!(next.day_pillar, LAST_SOLAR_DATE.day_pillar().next());
    }

    #[test]
    fn succ_rolls_month_and_rejects_end() {
        let d = SolarDate::new(1988, 2, 29).unwrap().succ().unwrap();
        assert_eq!(d, SolarDate::new(1988, 3, 1).unwrap());
        assert!(LAST_SOLAR_DATE.succ().is_err());
    }
}
