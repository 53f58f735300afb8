//! The four pillars (BaZi) of a birth moment.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ganzhi::{Branch, Pillar, Stem};
use crate::lunar::LunarDate;

/// Year, month, day and hour pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaziQuadruple {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Pillar,
}

impl BaziQuadruple {
    /// Advance the day pillar by one day and re-derive the hour stem, as
    /// for a late-Zi birth counted on the following day.
    pub const fn with_day_rollover(self) -> Self {
        let day = self.day.next();
        Self {
            day,
            hour: hour_pillar(day.stem, self.hour.branch),
            ..self
        }
    }
}

impl Display for BaziQuadruple {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} {}", self.year, self.month, self.day, self.hour)
    }
}

/// Stem of the first (Yin) month for a year stem ("five tigers").
pub const fn five_tigers(year_stem: Stem) -> Stem {
    match year_stem {
        Stem::Jia | Stem::Ji => Stem::Bing,
        Stem::Yi | Stem::Geng => Stem::Wu,
        Stem::Bing | Stem::Xin => Stem::Geng,
        Stem::Ding | Stem::Ren => Stem::Ren,
        Stem::Wu | Stem::Gui => Stem::Jia,
    }
}

/// Stem of the Zi hour for a day stem ("five rats").
pub const fn five_rats(day_stem: Stem) -> Stem {
    match day_stem {
        Stem::Jia | Stem::Ji => Stem::Jia,
        Stem::Yi | Stem::Geng => Stem::Bing,
        Stem::Bing | Stem::Xin => Stem::Wu,
        Stem::Ding | Stem::Ren => Stem::Geng,
        Stem::Wu | Stem::Gui => Stem::Ren,
    }
}

/// Month pillar: lunar month 1 is the Yin month.
pub const fn month_pillar(year_stem: Stem, month: u8) -> Pillar {
    let steps = month as i32 - 1;
    Pillar {
        stem: five_tigers(year_stem).offset(steps),
        branch: Branch::Yin.offset(steps),
    }
}

pub const fn hour_pillar(day_stem: Stem, hour_branch: Branch) -> Pillar {
    Pillar {
        stem: five_rats(day_stem).offset(hour_branch.index() as i32),
        branch: hour_branch,
    }
}

/// Derive the four pillars from a lunar date and hour slot.
///
/// A leap month takes the pillar of its nominal month. The day pillar is the
/// civil day's; late-Zi rollover is applied by the caller via
/// [`BaziQuadruple::with_day_rollover`].
pub const fn derive_pillars(lunar: LunarDate, hour_branch: Branch) -> BaziQuadruple {
    BaziQuadruple {
        year: lunar.year_pillar,
        month: month_pillar(lunar.year_pillar.stem, lunar.month),
        day: lunar.day_pillar,
        hour: hour_pillar(lunar.day_pillar.stem, hour_branch),
    }
}
