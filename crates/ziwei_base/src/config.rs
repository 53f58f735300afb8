//! Configuration for the school-dependent conventions of chart computation.

use serde::{Deserialize, Serialize};

use crate::bureau::Bureau;
use crate::period::DEFAULT_PERIOD_SPAN;

/// Which month a leap-month birth counts as when placing palaces and stars.
///
/// The month pillar always uses the nominal month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeapMonthRule {
    /// Days 1-15 count as the nominal month, days 16+ as the following month.
    #[default]
    SplitAtMidMonth,
    /// Always the nominal month.
    Nominal,
    /// Always the following month.
    Following,
}

impl LeapMonthRule {
    /// Month number (1..=12) used for placement.
    pub const fn placement_month(self, month: u8, day: u8, is_leap_month: bool) -> u8 {
        if !is_leap_month {
            return month;
        }
        let following = month % 12 + 1;
        match self {
            Self::Nominal => month,
            Self::Following => following,
            Self::SplitAtMidMonth => {
                if day <= 15 {
                    month
                } else {
                    following
                }
            }
        }
    }
}

/// Handling of births in the late Zi hour (23:00-23:59).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LateZiRule {
    /// Lunar date stays on the civil day; only the day pillar rolls over.
    #[default]
    SplitDay,
    /// Lunar date and day pillar both roll over to the next day.
    NextDay,
    /// Nothing rolls over.
    SameDay,
}

/// Number of years covered by each major period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodSpanRule {
    /// Ten years per period.
    #[default]
    Decade,
    /// As many years as the bureau number.
    BureauNumber,
}

impl PeriodSpanRule {
    pub const fn years(self, bureau: Bureau) -> u8 {
        match self {
            Self::Decade => DEFAULT_PERIOD_SPAN,
            Self::BureauNumber => bureau.number(),
        }
    }
}

/// Conventions applied by [`compute_chart_with_config`](crate::compute_chart_with_config).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub leap_month: LeapMonthRule,
    pub late_zi: LateZiRule,
    pub period_span: PeriodSpanRule,
}
