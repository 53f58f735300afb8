//! Chart assembly and read-only queries.
//!
//! [`compute_chart`] runs the whole pipeline (calendar, pillars, palaces,
//! bureau, stars, transformations, periods) in one pass and returns an
//! immutable [`CompleteChart`]. Period overlays are derived views over that
//! value; the chart itself never changes after construction.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bureau::{Bureau, five_elements_bureau};
use crate::config::{ChartConfig, LateZiRule};
use crate::error::ChartError;
use crate::ganzhi::{ALL_BRANCHES, Branch, Stem};
use crate::lunar::{
    CalendarKind, LunarDate, SolarDate, hour_branch, is_late_zi, next_day_lunar,
    resolve_birth_date,
};
use crate::palace::{
    PalaceName, body_star, branch_of, lai_yin_palace, life_star, locate_life_and_body,
    palace_name_at, palace_stem, surrounding_palaces,
};
use crate::period::{
    AnnualOverlay, Gender, MinorLimit, MonthlyOverlay, PeriodRange, annual_overlay,
    major_periods_spanning, minor_limit, minor_limit_ages, monthly_overlay, nominal_age,
    period_at_age,
};
use crate::pillars::{BaziQuadruple, derive_pillars};
use crate::placement::{BirthCoordinates, place_main_stars, place_supporting_stars};
use crate::sihua::{FlyingTransform, TransformTag, fly_transforms, natal_transforms, transform_of};
use crate::star::{Star, StarId, StarKind, brightness};

/// Raw birth data. Validation happens inside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChartInput {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    /// Clock hour 0..=23.
    pub hour: i32,
    pub gender: Gender,
    #[serde(default)]
    pub calendar: CalendarKind,
    /// Solar input: acknowledges a leap-month date. Lunar input: selects the
    /// leap month.
    #[serde(default)]
    pub leap_month: bool,
}

impl ChartInput {
    pub const fn solar(year: i32, month: u8, day: u8, hour: i32, gender: Gender) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            gender,
            calendar: CalendarKind::Solar,
            leap_month: false,
        }
    }

    pub const fn lunar(year: i32, month: u8, day: u8, hour: i32, gender: Gender) -> Self {
        Self {
            calendar: CalendarKind::Lunar,
            ..Self::solar(year, month, day, hour, gender)
        }
    }

    pub const fn with_leap_month(self, leap_month: bool) -> Self {
        Self { leap_month, ..self }
    }
}

/// Resolved birth moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BirthInfo {
    pub solar: SolarDate,
    /// Lunar date used for placement (after any late-Zi rollover).
    pub lunar: LunarDate,
    pub hour: u8,
    pub hour_branch: Branch,
    pub gender: Gender,
    /// Month number used for palace and star placement.
    pub placement_month: u8,
}

/// One of the twelve palaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palace {
    pub branch: Branch,
    pub name: PalaceName,
    pub stem: Stem,
    /// Main stars first, then auxiliary, then minor, in catalogue order.
    pub stars: Vec<Star>,
    pub major_period: Option<PeriodRange>,
    pub is_body: bool,
    /// Role of this palace within the selected major period.
    pub decade_overlay: Option<PalaceName>,
    /// Role (not branch) of this palace within the selected year, counted
    /// from the flowing-year Life palace.
    pub annual_overlay: Option<PalaceName>,
    /// Role of this palace within the selected month.
    pub monthly_overlay: Option<PalaceName>,
    /// Role of this palace counted from the selected year's minor limit.
    pub minor_overlay: Option<PalaceName>,
}

impl Palace {
    pub fn main_stars(&self) -> impl Iterator<Item = &Star> {
        self.stars.iter().filter(|s| s.kind == StarKind::Main)
    }

    /// No main star sits here.
    pub fn is_empty(&self) -> bool {
        self.main_stars().next().is_none()
    }

    pub fn has_star(&self, star: StarId) -> bool {
        self.stars.iter().any(|s| s.id == star)
    }
}

/// A fully computed natal chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteChart {
    pub config: ChartConfig,
    pub birth: BirthInfo,
    pub bazi: BaziQuadruple,
    pub life_palace: Branch,
    pub body_palace: Branch,
    pub lai_yin_palace: Branch,
    pub life_star: StarId,
    pub body_star: StarId,
    pub bureau: Bureau,
    /// Indexed by branch (Zi = 0).
    pub palaces: [Palace; 12],
    pub major_periods: [PeriodRange; 12],
}

/// Compute a chart with the default conventions.
pub fn compute_chart(input: &ChartInput) -> Result<CompleteChart, ChartError> {
    compute_chart_with_config(input, &ChartConfig::default())
}

/// Compute a chart.
pub fn compute_chart_with_config(
    input: &ChartInput,
    config: &ChartConfig,
) -> Result<CompleteChart, ChartError> {
    let hour_branch = hour_branch(input.hour)?;
    let (solar, civil_lunar) = resolve_birth_date(
        input.calendar,
        input.year,
        input.month,
        input.day,
        input.leap_month,
    )?;

    let late_zi = is_late_zi(input.hour);
    let lunar = if late_zi && config.late_zi == LateZiRule::NextDay {
        let next = next_day_lunar(solar)?;
        if next.is_leap_month && !input.leap_month {
            return Err(ChartError::AmbiguousLeapMonth {
                lunar_year: next.year,
                lunar_month: next.month,
            });
        }
        next
    } else {
        civil_lunar
    };

    let mut bazi = derive_pillars(lunar, hour_branch);
    if late_zi && config.late_zi == LateZiRule::SplitDay {
        bazi = bazi.with_day_rollover();
    }

    let month = config
        .leap_month
        .placement_month(lunar.month, lunar.day, lunar.is_leap_month);
    let (life, body) = locate_life_and_body(month, hour_branch);
    let year_stem = bazi.year.stem;
    let bureau = five_elements_bureau(year_stem, life);

    let coords = BirthCoordinates {
        year_stem,
        year_branch: bazi.year.branch,
        month,
        day: lunar.day,
        hour_branch,
    };
    let mut placed: Vec<(StarId, Branch)> = place_main_stars(bureau, lunar.day).to_vec();
    placed.extend(place_supporting_stars(&coords));

    let span = config.period_span.years(bureau);
    let major_periods = major_periods_spanning(life, bureau, input.gender, year_stem, span);

    let palaces = ALL_BRANCHES.map(|branch| {
        let stem = palace_stem(year_stem, branch);
        let stars = placed
            .iter()
            .filter(|(_, at)| *at == branch)
            .map(|&(id, _)| Star {
                id,
                kind: id.kind(),
                brightness: brightness(id, branch),
                natal_transform: transform_of(year_stem, id),
                self_transform: transform_of(stem, id),
            })
            .collect();
        Palace {
            branch,
            name: palace_name_at(life, branch),
            stem,
            stars,
            major_period: major_periods.iter().find(|p| p.branch == branch).copied(),
            is_body: branch == body,
            decade_overlay: None,
            annual_overlay: None,
            monthly_overlay: None,
            minor_overlay: None,
        }
    });

    debug!(
        solar = %solar,
        lunar = %lunar,
        bazi = %bazi,
        life = ?life,
        body = ?body,
        bureau = %bureau,
        "chart computed"
    );

    Ok(CompleteChart {
        config: *config,
        birth: BirthInfo {
            solar,
            lunar,
            hour: input.hour as u8,
            hour_branch,
            gender: input.gender,
            placement_month: month,
        },
        bazi,
        life_palace: life,
        body_palace: body,
        lai_yin_palace: lai_yin_palace(year_stem),
        life_star: life_star(life),
        body_star: body_star(bazi.year.branch),
        bureau,
        palaces,
        major_periods,
    })
}

/// Decade, year and month selected for an overlay view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodOverlay {
    pub target_year: u16,
    pub nominal_age: i32,
    /// Major period covering the nominal age, if the age falls in one.
    pub decade: Option<PeriodRange>,
    /// Minor limit for the year; `None` before birth.
    pub minor: Option<MinorLimit>,
    pub annual: AnnualOverlay,
    pub monthly: Option<MonthlyOverlay>,
}

impl CompleteChart {
    pub fn palace(&self, branch: Branch) -> &Palace {
        &self.palaces[branch.index() as usize]
    }

    pub fn palace_by_name(&self, name: PalaceName) -> &Palace {
        self.palace(branch_of(self.life_palace, name))
    }

    /// Main stars in the palace holding role `name`.
    pub fn main_stars_in(&self, name: PalaceName) -> Vec<StarId> {
        self.palace_by_name(name).main_stars().map(|s| s.id).collect()
    }

    /// Every star of `kind` with its branch, palaces in branch order.
    pub fn stars_by_kind(&self, kind: StarKind) -> Vec<(StarId, Branch)> {
        self.palaces
            .iter()
            .flat_map(|p| {
                p.stars
                    .iter()
                    .filter(move |s| s.kind == kind)
                    .map(move |s| (s.id, p.branch))
            })
            .collect()
    }

    /// Branch holding `star`.
    pub fn star_branch(&self, star: StarId) -> Option<Branch> {
        self.palaces
            .iter()
            .find(|p| p.has_star(star))
            .map(|p| p.branch)
    }

    pub fn natal_transforms(&self) -> [(StarId, TransformTag); 4] {
        natal_transforms(self.bazi.year.stem)
    }

    /// Every self-transformation as `(palace branch, star, tag)`.
    pub fn self_transforms(&self) -> Vec<(Branch, StarId, TransformTag)> {
        self.palaces
            .iter()
            .flat_map(|p| {
                p.stars
                    .iter()
                    .filter_map(move |s| s.self_transform.map(|t| (p.branch, s.id, t)))
            })
            .collect()
    }

    /// Transformations flown from the stem of the palace at `from`.
    pub fn flying_transforms(&self, from: Branch) -> Vec<FlyingTransform> {
        fly_transforms(from, self.palace(from).stem, |s| self.star_branch(s))
    }

    pub fn major_period_at_age(&self, age: u8) -> Option<&PeriodRange> {
        period_at_age(&self.major_periods, age)
    }

    /// Nominal ages up to `max_age` whose minor limit falls on `branch`.
    pub fn minor_limit_ages(&self, branch: Branch, max_age: u8) -> Vec<u8> {
        minor_limit_ages(self.bazi.year.branch, self.birth.gender, branch, max_age)
    }

    /// The palace holding `name` together with its opposite and trines.
    pub fn surrounding_palaces(&self, name: PalaceName) -> [&Palace; 4] {
        surrounding_palaces(branch_of(self.life_palace, name)).map(|b| self.palace(b))
    }

    /// Select the decade, year and optionally month for `target_year`.
    pub fn overlay(
        &self,
        target_year: u16,
        target_month: Option<u8>,
    ) -> Result<PeriodOverlay, ChartError> {
        let age = nominal_age(self.birth.lunar.year, target_year);
        let decade = u8::try_from(age)
            .ok()
            .and_then(|a| self.major_period_at_age(a))
            .copied();
        let monthly = target_month
            .map(|m| {
                monthly_overlay(
                    target_year,
                    m,
                    self.birth.placement_month,
                    self.birth.hour_branch,
                    self.life_palace,
                )
            })
            .transpose()?;
        Ok(PeriodOverlay {
            target_year,
            nominal_age: age,
            decade,
            minor: minor_limit(
                self.bazi.year.branch,
                self.birth.gender,
                self.life_palace,
                self.birth.lunar.year,
                target_year,
            ),
            annual: annual_overlay(target_year, self.life_palace),
            monthly,
        })
    }

    /// Copies of the palaces labelled with their roles under `overlay`.
    pub fn overlaid_palaces(&self, overlay: &PeriodOverlay) -> [Palace; 12] {
        self.palaces.clone().map(|mut p| {
            p.decade_overlay = overlay.decade.map(|d| palace_name_at(d.branch, p.branch));
            p.annual_overlay = Some(palace_name_at(overlay.annual.life_branch, p.branch));
            p.monthly_overlay = overlay.monthly.map(|m| palace_name_at(m.life_branch, p.branch));
            p.minor_overlay = overlay.minor.map(|m| palace_name_at(m.branch, p.branch));
            p
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart_1988() -> CompleteChart {
        compute_chart(&ChartInput::solar(1988, 6, 20, 23, Gender::Male)).unwrap()
    }

    #[test]
    fn palaces_indexed_by_branch() {
        let chart = chart_1988();
        for (i, p) in chart.palaces.iter().enumerate() {
            assert_eq!(p.branch.index() as usize, i);
        }
    }

    #[test]
    fn every_star_placed_once() {
        let chart = chart_1988();
        let total: usize = chart.palaces.iter().map(|p| p.stars.len()).sum();
        assert_eq!(total, crate::star::STAR_COUNT);
    }

    #[test]
    fn palace_by_name_round_trip() {
        let chart = chart_1988();
        assert_eq!(chart.palace_by_name(PalaceName::Life).branch, Branch::Wu);
        assert_eq!(chart.palace_by_name(PalaceName::Career).branch, Branch::Xu);
        assert_eq!(
            chart.main_stars_in(PalaceName::Career),
            vec![StarId::Ziwei, StarId::Tianxiang]
        );
    }

    #[test]
    fn body_flag_set_once() {
        let chart = chart_1988();
        let bodies: Vec<_> = chart.palaces.iter().filter(|p| p.is_body).collect();
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0].branch, chart.body_palace);
    }

    #[test]
    fn natal_overlays_empty() {
        let chart = chart_1988();
        assert!(chart.palaces.iter().all(|p| p.annual_overlay.is_none()
            && p.decade_overlay.is_none()
            && p.monthly_overlay.is_none()
            && p.minor_overlay.is_none()));
    }

    #[test]
    fn overlay_view_labels_every_palace() {
        let chart = chart_1988();
        let ov = chart.overlay(2024, Some(3)).unwrap();
        assert_eq!(ov.nominal_age, 37);
        assert_eq!(ov.decade.map(|d| d.branch), Some(Branch::You));
        let view = chart.overlaid_palaces(&ov);
        assert_eq!(view[Branch::Chen.index() as usize].annual_overlay, Some(PalaceName::Life));
        assert_eq!(view[Branch::You.index() as usize].decade_overlay, Some(PalaceName::Life));
        assert!(view.iter().all(|p| p.monthly_overlay.is_some()));
        // natal chart untouched
        assert!(chart.palaces.iter().all(|p| p.annual_overlay.is_none()));
    }

    #[test]
    fn overlay_before_birth_has_no_decade() {
        let chart = chart_1988();
        let ov = chart.overlay(1980, None).unwrap();
        assert!(ov.decade.is_none());
        assert!(ov.minor.is_none());
        assert!(ov.monthly.is_none());
    }

    #[test]
    fn overlay_minor_limit() {
        // Chen-year man: age 1 at Xu, age 37 back at Xu
        let chart = chart_1988();
        let ov = chart.overlay(2024, Some(1)).unwrap();
        let minor = ov.minor.unwrap();
        assert_eq!((minor.age, minor.branch), (37, Branch::Xu));
        assert_eq!(minor.natal_palace, PalaceName::Career);
        assert_eq!(ov.monthly.map(|m| m.pillar.to_string()), Some("丙寅".to_string()));
        let view = chart.overlaid_palaces(&ov);
        assert_eq!(view[Branch::Xu.index() as usize].minor_overlay, Some(PalaceName::Life));
        assert_eq!(chart.minor_limit_ages(Branch::Xu, 40), vec![1, 13, 25, 37]);
    }

    #[test]
    fn overlay_extreme_years() {
        let chart = chart_1988();
        for year in [0, 1, u16::MAX] {
            let ov = chart.overlay(year, Some(12)).unwrap();
            assert!(ov.decade.is_none());
            assert!(ov.minor.is_none());
            assert_eq!(ov.annual.year, year);
        }
        assert_eq!(chart.overlay(0, None).unwrap().nominal_age, -1987);
    }

    #[test]
    fn overlay_rejects_bad_month() {
        assert!(chart_1988().overlay(2024, Some(13)).is_err());
    }

    #[test]
    fn flying_from_life_palace() {
        let chart = chart_1988();
        // Life palace stem is Wu: Tanlang, Taiyin, Youbi, Tianji
        let flown = chart.flying_transforms(Branch::Wu);
        assert_eq!(flown.len(), 4);
        assert_eq!(flown[0].star, StarId::Tanlang);
        assert_eq!(flown[0].to, Branch::Shen);
        assert_eq!(flown[2].to, Branch::Wu);
    }

    #[test]
    fn surrounding_life_palace() {
        let chart = chart_1988();
        let branches = chart
            .surrounding_palaces(PalaceName::Life)
            .map(|p| p.branch);
        assert_eq!(branches, [Branch::Wu, Branch::Zi, Branch::Xu, Branch::Yin]);
    }

    #[test]
    fn next_day_rule_moves_lunar_day() {
        let cfg = ChartConfig {
            late_zi: LateZiRule::NextDay,
            ..ChartConfig::default()
        };
        let chart =
            compute_chart_with_config(&ChartInput::solar(1988, 6, 20, 23, Gender::Male), &cfg)
                .unwrap();
        assert_eq!(chart.birth.lunar.day, 8);
        assert_eq!(chart.bazi.day.to_string(), "丁未");
    }

    #[test]
    fn next_day_rule_into_leap_month_needs_flag() {
        let cfg = ChartConfig {
            late_zi: LateZiRule::NextDay,
            ..ChartConfig::default()
        };
        // 2023-03-21 is lunar 2-30; the next day opens leap month 2
        let input = ChartInput::solar(2023, 3, 21, 23, Gender::Male);
        assert_eq!(
            compute_chart_with_config(&input, &cfg),
            Err(ChartError::AmbiguousLeapMonth {
                lunar_year: 2023,
                lunar_month: 2,
            })
        );
        let chart = compute_chart_with_config(&input.with_leap_month(true), &cfg).unwrap();
        let l = chart.birth.lunar;
        assert_eq!((l.month, l.day, l.is_leap_month), (2, 1, true));
        // default rule keeps the civil lunar day, which is not leap
        assert!(compute_chart(&input).is_ok());
    }

    #[test]
    fn next_day_rule_on_last_supported_day() {
        let cfg = ChartConfig {
            late_zi: LateZiRule::NextDay,
            ..ChartConfig::default()
        };
        let chart =
            compute_chart_with_config(&ChartInput::solar(2100, 12, 31, 23, Gender::Female), &cfg)
                .unwrap();
        assert_eq!(chart.birth.solar, crate::lunar::LAST_SOLAR_DATE);
        let l = chart.birth.lunar;
        assert_eq!((l.year, l.month, l.day), (2100, 12, 2));
    }

    #[test]
    fn same_day_rule_keeps_day_pillar() {
        let cfg = ChartConfig {
            late_zi: LateZiRule::SameDay,
            ..ChartConfig::default()
        };
        let chart =
            compute_chart_with_config(&ChartInput::solar(1988, 6, 20, 23, Gender::Male), &cfg)
                .unwrap();
        assert_eq!(chart.birth.lunar.day, 7);
        assert_eq!(chart.bazi.day.to_string(), "丙午");
        assert_eq!(chart.bazi.hour.to_string(), "戊子");
    }
}
