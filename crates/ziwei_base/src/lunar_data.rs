//! Packed lunisolar month table for lunar years 1900-2100.
//!
//! One `u32` per lunar year:
//! - bits 0-3: number of the leap month (0 = no leap month)
//! - bits 4-15: month lengths, bit `0x10000 >> m` set means month `m` has 30 days
//! - bit 16: the leap month has 30 days (otherwise 29)
//!
//! Lunar year 1900 month 1 day 1 falls on solar 1900-01-31.

/// First lunar year covered by [`LUNAR_INFO`].
pub const FIRST_LUNAR_YEAR: i32 = 1900;

/// Last lunar year covered by [`LUNAR_INFO`].
pub const LAST_LUNAR_YEAR: i32 = 2100;

const YEAR_COUNT: usize = (LAST_LUNAR_YEAR - FIRST_LUNAR_YEAR + 1) as usize;

/// Month-length and leap data, indexed by `lunar_year - 1900`.
pub const LUNAR_INFO: [u32; YEAR_COUNT] = [
    0x04bd8, 0x04ae0, 0x0a570, 0x054d5, 0x0d260, 0x0d950, 0x16554, 0x056a0, 0x09ad0, 0x055d2, // 1900
    0x04ae0, 0x0a5b6, 0x0a4d0, 0x0d250, 0x1d255, 0x0b540, 0x0d6a0, 0x0ada2, 0x095b0, 0x14977, // 1910
    0x04970, 0x0a4b0, 0x0b4b5, 0x06a50, 0x06d40, 0x1ab54, 0x02b60, 0x09570, 0x052f2, 0x04970, // 1920
    0x06566, 0x0d4a0, 0x0ea50, 0x16a95, 0x05ad0, 0x02b60, 0x186e3, 0x092e0, 0x1c8d7, 0x0c950, // 1930
    0x0d4a0, 0x1d8a6, 0x0b550, 0x056a0, 0x1a5b4, 0x025d0, 0x092d0, 0x0d2b2, 0x0a950, 0x0b557, // 1940
    0x06ca0, 0x0b550, 0x15355, 0x04da0, 0x0a5b0, 0x14573, 0x052b0, 0x0a9a8, 0x0e950, 0x06aa0, // 1950
    0x0aea6, 0x0ab50, 0x04b60, 0x0aae4, 0x0a570, 0x05260, 0x0f263, 0x0d950, 0x05b57, 0x056a0, // 1960
    0x096d0, 0x04dd5, 0x04ad0, 0x0a4d0, 0x0d4d4, 0x0d250, 0x0d558, 0x0b540, 0x0b6a0, 0x195a6, // 1970
    0x095b0, 0x049b0, 0x0a974, 0x0a4b0, 0x0b27a, 0x06a50, 0x06d40, 0x0af46, 0x0ab60, 0x09570, // 1980
    0x04af5, 0x04970, 0x064b0, 0x074a3, 0x0ea50, 0x06b58, 0x05ac0, 0x0ab60, 0x096d5, 0x092e0, // 1990
    0x0c960, 0x0d954, 0x0d4a0, 0x0da50, 0x07552, 0x056a0, 0x0abb7, 0x025d0, 0x092d0, 0x0cab5, // 2000
    0x0a950, 0x0b4a0, 0x0baa4, 0x0ad50, 0x055d9, 0x04ba0, 0x0a5b0, 0x15176, 0x052b0, 0x0a930, // 2010
    0x07954, 0x06aa0, 0x0ad50, 0x05b52, 0x04b60, 0x0a6e6, 0x0a4e0, 0x0d260, 0x0ea65, 0x0d530, // 2020
    0x05aa0, 0x076a3, 0x096d0, 0x04afb, 0x04ad0, 0x0a4d0, 0x1d0b6, 0x0d250, 0x0d520, 0x0dd45, // 2030
    0x0b5a0, 0x056d0, 0x055b2, 0x049b0, 0x0a577, 0x0a4b0, 0x0aa50, 0x1b255, 0x06d20, 0x0ada0, // 2040
    0x14b63, 0x09370, 0x049f8, 0x04970, 0x064b0, 0x168a6, 0x0ea50, 0x06b20, 0x1a6c4, 0x0aae0, // 2050
    0x092e0, 0x0d2e3, 0x0c960, 0x0d557, 0x0d4a0, 0x0da50, 0x05d55, 0x056a0, 0x0a6d0, 0x055d4, // 2060
    0x052d0, 0x0a9b8, 0x0a950, 0x0b4a0, 0x0b6a6, 0x0ad50, 0x055a0, 0x0aba4, 0x0a5b0, 0x052b0, // 2070
    0x0b273, 0x06930, 0x07337, 0x06aa0, 0x0ad50, 0x14b55, 0x04b60, 0x0a570, 0x054e4, 0x0d160, // 2080
    0x0e968, 0x0d520, 0x0daa0, 0x16aa6, 0x056d0, 0x04ae0, 0x0a9d4, 0x0a2d0, 0x0d150, 0x0f252, // 2090
    0x0d520, // 2100
];

/// Days from 1900-01-31 to the first day of each lunar year; the final entry
/// is the total span of the table.
pub(crate) const YEAR_START_OFFSETS: [u32; YEAR_COUNT + 1] = year_start_offsets();

const fn year_start_offsets() -> [u32; YEAR_COUNT + 1] {
    let mut out = [0u32; YEAR_COUNT + 1];
    let mut i = 0;
    while i < YEAR_COUNT {
        out[i + 1] = out[i] + year_days(LUNAR_INFO[i]) as u32;
        i += 1;
    }
    out
}

/// Table entry for a lunar year, or `None` outside 1900..=2100.
pub(crate) const fn year_info(lunar_year: i32) -> Option<u32> {
    if lunar_year < FIRST_LUNAR_YEAR || lunar_year > LAST_LUNAR_YEAR {
        None
    } else {
        Some(LUNAR_INFO[(lunar_year - FIRST_LUNAR_YEAR) as usize])
    }
}

/// Leap month number (1..=12), or 0 when the year has none.
pub(crate) const fn leap_month(info: u32) -> u8 {
    (info & 0xf) as u8
}

/// Length of the leap month, 0 when the year has none.
pub(crate) const fn leap_month_days(info: u32) -> u16 {
    if leap_month(info) == 0 {
        0
    } else if info & 0x10000 != 0 {
        30
    } else {
        29
    }
}

/// Length of regular month `month` (1..=12).
pub(crate) const fn month_days(info: u32, month: u8) -> u16 {
    if info & (0x10000 >> month) != 0 { 30 } else { 29 }
}

/// Total days in the lunar year, leap month included.
pub(crate) const fn year_days(info: u32) -> u16 {
    12 * 29 + (info & 0xfff0).count_ones() as u16 + leap_month_days(info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_range() {
        assert_eq!(LUNAR_INFO.len(), 201);
        assert!(year_info(1899).is_none());
        assert!(year_info(2101).is_none());
        assert!(year_info(2100).is_some());
    }

    #[test]
    fn year_lengths_plausible() {
        for info in LUNAR_INFO {
            let days = year_days(info);
            if leap_month(info) == 0 {
                assert!((353..=355).contains(&days), "common year {days}");
            } else {
                assert!((383..=385).contains(&days), "leap year {days}");
            }
        }
    }

    #[test]
    fn leap_months_2020s() {
        assert_eq!(year_info(2020).map(leap_month), Some(4));
        assert_eq!(year_info(2023).map(leap_month), Some(2));
        assert_eq!(year_info(2025).map(leap_month), Some(6));
        assert_eq!(year_info(2024).map(leap_month), Some(0));
    }

    #[test]
    fn offsets_monotonic() {
        for w in YEAR_START_OFFSETS.windows(2) {
            assert!(w[1] > w[0]);
        }
    }
}
