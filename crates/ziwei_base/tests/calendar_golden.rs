//! Integration tests for calendar conversion and the four pillars.
//!
//! Reference dates checked against published lunar almanacs.

use ziwei_base::{
    Branch, CalendarKind, ChartError, LunarDate, SolarDate, Stem, derive_pillars, hour_branch,
    lunar_to_solar, resolve_birth_date, solar_to_lunar, year_pillar,
};

fn lunar(y: i32, m: u8, d: u8) -> LunarDate {
    solar_to_lunar(y, m, d).unwrap()
}

// ---------------------------------------------------------------------------
// Solar -> lunar
// ---------------------------------------------------------------------------

#[test]
fn reference_dates() {
    let cases = [
        ((1900, 1, 31), (1900, 1, 1, false)),
        ((1984, 2, 2), (1984, 1, 1, false)),
        ((1988, 6, 20), (1988, 5, 7, false)),
        ((1989, 1, 2), (1988, 11, 25, false)),
        ((2000, 1, 1), (1999, 11, 25, false)),
        ((2023, 3, 22), (2023, 2, 1, true)),
        ((2023, 4, 19), (2023, 2, 29, true)),
        ((2023, 4, 20), (2023, 3, 1, false)),
        ((2024, 2, 9), (2023, 12, 30, false)),
        ((2024, 2, 10), (2024, 1, 1, false)),
        ((2100, 12, 31), (2100, 12, 1, false)),
    ];
    for ((y, m, d), expected) in cases {
        let l = lunar(y, m, d);
        assert_eq!(
            (l.year, l.month, l.day, l.is_leap_month),
            expected,
            "{y:04}-{m:02}-{d:02}"
        );
    }
}

#[test]
fn lunar_new_years() {
    let new_years = [
        (1901, 2, 19),
        (1949, 1, 29),
        (1966, 1, 21),
        (1990, 1, 27),
        (2008, 2, 7),
        (2025, 1, 29),
        (2050, 1, 23),
        (2099, 1, 21),
    ];
    for (y, m, d) in new_years {
        let l = lunar(y, m, d);
        assert_eq!((l.year, l.month, l.day), (y, 1, 1), "{y}");
        assert_eq!(
            lunar_to_solar(y, 1, 1, false).unwrap(),
            SolarDate::new(y, m, d).unwrap()
        );
    }
}

#[test]
fn lunar_to_solar_inverts_lunar_year_2023() {
    // 2023 carries a leap second month: 384 days
    let mut date = SolarDate::new(2023, 1, 22).unwrap();
    for _ in 0..384 {
        let l = solar_to_lunar(date.year, date.month, date.day).unwrap();
        assert_eq!(l.year, 2023);
        assert_eq!(lunar_to_solar(l.year, l.month, l.day, l.is_leap_month).unwrap(), date);
        date = date.succ().unwrap();
    }
    assert_eq!(solar_to_lunar(date.year, date.month, date.day).unwrap().year, 2024);
}

#[test]
fn lunar_to_solar_rejects_missing_leap_month() {
    assert!(lunar_to_solar(2024, 2, 1, true).is_err());
    assert!(lunar_to_solar(2023, 2, 1, true).is_ok());
    assert!(lunar_to_solar(2023, 2, 30, true).is_err());
    assert!(lunar_to_solar(2023, 13, 1, false).is_err());
}

#[test]
fn out_of_range_years() {
    for (y, m, d) in [(1899, 12, 31), (1900, 1, 30), (2101, 1, 1)] {
        assert!(matches!(
            solar_to_lunar(y, m, d),
            Err(ChartError::DateOutOfRange { .. })
        ));
    }
}

// ---------------------------------------------------------------------------
// Birth-date resolution
// ---------------------------------------------------------------------------

#[test]
fn leap_month_needs_flag_for_solar_input() {
    let err = resolve_birth_date(CalendarKind::Solar, 2023, 3, 22, false).unwrap_err();
    assert_eq!(
        err,
        ChartError::AmbiguousLeapMonth {
            lunar_year: 2023,
            lunar_month: 2
        }
    );
    let (_, l) = resolve_birth_date(CalendarKind::Solar, 2023, 3, 22, true).unwrap();
    assert!(l.is_leap_month);
}

#[test]
fn lunar_input_selects_leap_month() {
    let (regular, _) = resolve_birth_date(CalendarKind::Lunar, 2023, 2, 1, false).unwrap();
    let (leap, _) = resolve_birth_date(CalendarKind::Lunar, 2023, 2, 1, true).unwrap();
    assert_eq!(regular.to_string(), "2023-02-20");
    assert_eq!(leap.to_string(), "2023-03-22");
}

#[test]
fn flag_ignored_outside_leap_months() {
    let (s, l) = resolve_birth_date(CalendarKind::Solar, 1988, 6, 20, true).unwrap();
    assert_eq!(s.to_string(), "1988-06-20");
    assert!(!l.is_leap_month);
}

// ---------------------------------------------------------------------------
// Pillars
// ---------------------------------------------------------------------------

#[test]
fn year_pillars() {
    assert_eq!(year_pillar(1984).to_string(), "甲子");
    assert_eq!(year_pillar(1988).to_string(), "戊辰");
    assert_eq!(year_pillar(2024).to_string(), "甲辰");
    assert_eq!(year_pillar(1900).to_string(), "庚子");
}

#[test]
fn day_pillars() {
    assert_eq!(lunar(2000, 1, 1).day_pillar.to_string(), "戊午");
    assert_eq!(lunar(1989, 1, 2).day_pillar.to_string(), "壬戌");
    assert_eq!(lunar(1988, 6, 20).day_pillar.to_string(), "丙午");
}

#[test]
fn four_pillars_1989() {
    let bazi = derive_pillars(lunar(1989, 1, 2), hour_branch(19).unwrap());
    assert_eq!(bazi.to_string(), "戊辰 甲子 壬戌 庚戌");
}

#[test]
fn four_pillars_2000_noon() {
    let bazi = derive_pillars(lunar(2000, 1, 1), hour_branch(12).unwrap());
    assert_eq!(bazi.to_string(), "己卯 丙子 戊午 戊午");
}

#[test]
fn hour_slots() {
    let expected = [
        (0, Branch::Zi),
        (1, Branch::Chou),
        (2, Branch::Chou),
        (3, Branch::Yin),
        (11, Branch::Wu),
        (12, Branch::Wu),
        (13, Branch::Wei),
        (22, Branch::Hai),
        (23, Branch::Zi),
    ];
    for (h, b) in expected {
        assert_eq!(hour_branch(h).unwrap(), b, "hour {h}");
    }
    assert_eq!(hour_branch(24), Err(ChartError::InvalidHour(24)));
    assert_eq!(hour_branch(-1), Err(ChartError::InvalidHour(-1)));
}

#[test]
fn year_stem_of_pillar() {
    assert_eq!(lunar(1989, 1, 2).year_pillar.stem, Stem::Wu);
}
