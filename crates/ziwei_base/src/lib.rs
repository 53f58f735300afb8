//! Zi Wei Dou Shu (紫微斗数) natal chart computation.
//!
//! This crate provides:
//! - Solar/lunar calendar conversion for 1900-2100 with leap-month handling
//! - The four pillars (year, month, day, hour) of a birth moment
//! - Palace layout, the five-element bureau and placement of 58 stars
//! - The four transformations, major periods, minor limits and annual/monthly
//!   overlays
//!
//! Everything is deterministic and table-driven: no clock, no I/O.
//! [`compute_chart`] is the entry point.

pub mod bureau;
pub mod chart;
pub mod config;
pub mod error;
pub mod ganzhi;
pub mod lunar;
mod lunar_data;
pub mod palace;
pub mod period;
pub mod pillars;
pub mod placement;
pub mod sihua;
pub mod star;
mod util;

pub use bureau::{ALL_BUREAUS, Bureau, five_elements_bureau};
pub use chart::{
    BirthInfo, ChartInput, CompleteChart, Palace, PeriodOverlay, compute_chart,
    compute_chart_with_config,
};
pub use config::{ChartConfig, LateZiRule, LeapMonthRule, PeriodSpanRule};
pub use error::ChartError;
pub use ganzhi::{ALL_BRANCHES, ALL_STEMS, Branch, Direction, Element, Pillar, Polarity, Stem};
pub use lunar::{
    CalendarKind, FIRST_SOLAR_DATE, LAST_SOLAR_DATE, LunarDate, SolarDate, hour_branch,
    is_late_zi, lunar_to_solar, next_day_lunar, resolve_birth_date, solar_date_to_lunar,
    solar_to_lunar, year_pillar,
};
pub use palace::{
    ALL_PALACE_NAMES, PalaceName, body_star, branch_of, lai_yin_palace, life_star,
    locate_life_and_body, palace_name_at, palace_pillar, palace_stem, surrounding_palaces,
};
pub use period::{
    AnnualOverlay, DEFAULT_PERIOD_SPAN, Gender, MinorLimit, MonthlyOverlay, PeriodRange,
    annual_overlay, dou_jun, major_period_direction, major_periods, major_periods_spanning,
    minor_limit, minor_limit_ages, minor_limit_branch, minor_limit_direction, minor_limit_start,
    monthly_overlay, nominal_age, period_at_age,
};
pub use pillars::{BaziQuadruple, derive_pillars, five_rats, five_tigers, hour_pillar, month_pillar};
pub use placement::{
    BirthCoordinates, SUPPORTING_STARS, place_main_stars, place_supporting_star,
    place_supporting_stars, tianfu_branch, ziwei_branch,
};
pub use sihua::{
    ALL_TRANSFORM_TAGS, FlyingTransform, TransformTag, fly_transforms, natal_transforms,
    self_transforms, transform_of, transformed_stars,
};
pub use star::{ALL_STARS, Brightness, STAR_COUNT, Star, StarId, StarKind, brightness};
