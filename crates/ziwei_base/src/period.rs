//! Major periods (大限), minor limits (小限) and the annual / monthly
//! overlays (流年, 流月).
//!
//! Overlays are pure functions of the natal chart and an explicit target
//! year or month; nothing here reads the clock.

use serde::{Deserialize, Serialize};

use crate::bureau::Bureau;
use crate::error::ChartError;
use crate::ganzhi::{Branch, Direction, Pillar, Polarity, Stem};
use crate::lunar::year_pillar;
use crate::palace::{PalaceName, palace_name_at, palace_pillar};
use crate::pillars::month_pillar;

/// Years covered by each major period in the default convention.
pub const DEFAULT_PERIOD_SPAN: u8 = 10;

/// Gender of the chart subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const fn flipped(self) -> Self {
        match self {
            Self::Male => Self::Female,
            Self::Female => Self::Male,
        }
    }
}

/// One major period: an age span ruled by one palace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodRange {
    /// 0-based order in the sequence.
    pub index: u8,
    /// First nominal age, inclusive.
    pub start_age: u8,
    /// Last nominal age, inclusive.
    pub end_age: u8,
    pub branch: Branch,
    /// Pillar of the ruling palace.
    pub pillar: Pillar,
}

impl PeriodRange {
    pub const fn contains_age(&self, age: u8) -> bool {
        age >= self.start_age && age <= self.end_age
    }
}

/// Traversal direction: yang-year males and yin-year females go clockwise.
pub const fn major_period_direction(year_stem: Stem, gender: Gender) -> Direction {
    match (year_stem.polarity(), gender) {
        (Polarity::Yang, Gender::Male) | (Polarity::Yin, Gender::Female) => Direction::Clockwise,
        _ => Direction::CounterClockwise,
    }
}

/// The 12 major periods with the default ten-year span.
pub fn major_periods(
    life: Branch,
    bureau: Bureau,
    gender: Gender,
    year_stem: Stem,
) -> [PeriodRange; 12] {
    major_periods_spanning(life, bureau, gender, year_stem, DEFAULT_PERIOD_SPAN)
}

/// The 12 major periods, each `span` years long, starting at the Life palace
/// at the bureau number's age.
pub fn major_periods_spanning(
    life: Branch,
    bureau: Bureau,
    gender: Gender,
    year_stem: Stem,
    span: u8,
) -> [PeriodRange; 12] {
    let direction = major_period_direction(year_stem, gender);
    let span = span.max(1);
    std::array::from_fn(|i| {
        let index = i as u8;
        let start_age = bureau.number().saturating_add(index.saturating_mul(span));
        let branch = life.step(direction, index);
        PeriodRange {
            index,
            start_age,
            end_age: start_age.saturating_add(span - 1),
            branch,
            pillar: palace_pillar(year_stem, branch),
        }
    })
}

/// The period covering `age`, if any.
pub fn period_at_age(periods: &[PeriodRange], age: u8) -> Option<&PeriodRange> {
    periods.iter().find(|p| p.contains_age(age))
}

/// Nominal (East-Asian) age in `target_year`: 1 in the birth year.
pub const fn nominal_age(birth_lunar_year: i32, target_year: u16) -> i32 {
    (target_year as i32).saturating_sub(birth_lunar_year).saturating_add(1)
}

/// Branch of the minor limit at nominal age 1, from the year branch's triad.
pub const fn minor_limit_start(year_branch: Branch) -> Branch {
    match year_branch.triad() {
        0 => Branch::Xu,
        1 => Branch::Wei,
        2 => Branch::Chen,
        _ => Branch::Chou,
    }
}

/// Minor limits move one palace a year: clockwise for men, counter-clockwise
/// for women, whatever the year polarity.
pub const fn minor_limit_direction(gender: Gender) -> Direction {
    match gender {
        Gender::Male => Direction::Clockwise,
        Gender::Female => Direction::CounterClockwise,
    }
}

/// Branch ruling the minor limit at nominal age `age` (1-based).
pub const fn minor_limit_branch(year_branch: Branch, gender: Gender, age: u8) -> Branch {
    let steps = (age.saturating_sub(1) % 12) as i32;
    minor_limit_start(year_branch).offset(minor_limit_direction(gender).sign() * steps)
}

/// The minor-limit palace for one year of life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MinorLimit {
    pub year: u16,
    pub age: u8,
    pub branch: Branch,
    /// Natal role of that branch.
    pub natal_palace: PalaceName,
}

/// Minor limit in `target_year`, or `None` before birth or past age 255.
pub fn minor_limit(
    year_branch: Branch,
    gender: Gender,
    natal_life: Branch,
    birth_lunar_year: i32,
    target_year: u16,
) -> Option<MinorLimit> {
    let age = u8::try_from(nominal_age(birth_lunar_year, target_year))
        .ok()
        .filter(|&a| a >= 1)?;
    let branch = minor_limit_branch(year_branch, gender, age);
    Some(MinorLimit {
        year: target_year,
        age,
        branch,
        natal_palace: palace_name_at(natal_life, branch),
    })
}

/// Nominal ages up to `max_age` whose minor limit falls on `branch`.
pub fn minor_limit_ages(year_branch: Branch, gender: Gender, branch: Branch, max_age: u8) -> Vec<u8> {
    (1..=max_age)
        .filter(|&age| minor_limit_branch(year_branch, gender, age) == branch)
        .collect()
}

/// The flowing-year life palace for a target year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnnualOverlay {
    pub year: u16,
    pub pillar: Pillar,
    /// Branch acting as the year's Life palace.
    pub life_branch: Branch,
    /// Natal role of that branch.
    pub natal_palace: PalaceName,
}

/// The annual Life palace sits at the target year's branch.
pub const fn annual_overlay(target_year: u16, natal_life: Branch) -> AnnualOverlay {
    let pillar = year_pillar(target_year as i32);
    AnnualOverlay {
        year: target_year,
        pillar,
        life_branch: pillar.branch,
        natal_palace: palace_name_at(natal_life, pillar.branch),
    }
}

/// The flowing-month life palace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthlyOverlay {
    pub year: u16,
    pub month: u8,
    /// Month pillar by the five-tigers rule on the target year's stem.
    pub pillar: Pillar,
    pub life_branch: Branch,
    pub natal_palace: PalaceName,
}

/// Dou-Jun: the first month's palace of a target year. From the year branch,
/// count back `birth_month - 1` and forward by the birth hour.
pub const fn dou_jun(target_year: u16, birth_month: u8, hour_branch: Branch) -> Branch {
    year_pillar(target_year as i32)
        .branch
        .offset(hour_branch.index() as i32 - (birth_month as i32 - 1))
}

/// Life palace of lunar month `target_month` in `target_year`.
pub fn monthly_overlay(
    target_year: u16,
    target_month: u8,
    birth_month: u8,
    hour_branch: Branch,
    natal_life: Branch,
) -> Result<MonthlyOverlay, ChartError> {
    if !(1..=12).contains(&target_month) {
        return Err(ChartError::DateOutOfRange {
            year: target_year as i32,
            month: target_month as i32,
            day: 1,
        });
    }
    let life_branch = dou_jun(target_year, birth_month, hour_branch).offset(target_month as i32 - 1);
    Ok(MonthlyOverlay {
        year: target_year,
        month: target_month,
        pillar: month_pillar(year_pillar(target_year as i32).stem, target_month),
        life_branch,
        natal_palace: palace_name_at(natal_life, life_branch),
    })
}
