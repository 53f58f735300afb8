//! The twelve palaces: roles, positions and palace stems.
//!
//! Palace roles are laid out counter-clockwise from the Life palace, so the
//! Siblings palace sits one branch before it and the Parents palace one after.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ganzhi::{Branch, Pillar, Stem};
use crate::pillars::five_tigers;
use crate::star::StarId;

/// The 12 palace roles, in counter-clockwise order from Life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum PalaceName {
    Life,
    Siblings,
    Spouse,
    Children,
    Wealth,
    Health,
    Travel,
    Friends,
    Career,
    Property,
    Fortune,
    Parents,
}

/// All 12 roles in order (index 0 = Life).
pub const ALL_PALACE_NAMES: [PalaceName; 12] = [
    PalaceName::Life,
    PalaceName::Siblings,
    PalaceName::Spouse,
    PalaceName::Children,
    PalaceName::Wealth,
    PalaceName::Health,
    PalaceName::Travel,
    PalaceName::Friends,
    PalaceName::Career,
    PalaceName::Property,
    PalaceName::Fortune,
    PalaceName::Parents,
];

const PALACE_NAMES: [&str; 12] = [
    "Life", "Siblings", "Spouse", "Children", "Wealth", "Health", "Travel", "Friends", "Career",
    "Property", "Fortune", "Parents",
];

const PALACE_CHINESE: [&str; 12] = [
    "命宫", "兄弟", "夫妻", "子女", "财帛", "疾厄", "迁移", "交友", "官禄", "田宅", "福德", "父母",
];

impl PalaceName {
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn from_cycle(n: i32) -> Self {
        ALL_PALACE_NAMES[n.rem_euclid(12) as usize]
    }

    pub const fn name(self) -> &'static str {
        PALACE_NAMES[self.index() as usize]
    }

    pub const fn chinese(self) -> &'static str {
        PALACE_CHINESE[self.index() as usize]
    }
}

impl Display for PalaceName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Life and Body palace branches from lunar month and hour slot.
///
/// The month palace is Yin advanced `month - 1` steps; Life then counts back
/// by the hour index and Body counts forward by it.
pub const fn locate_life_and_body(month: u8, hour_branch: Branch) -> (Branch, Branch) {
    let month_palace = Branch::Yin.offset(month as i32 - 1);
    let h = hour_branch.index() as i32;
    (month_palace.offset(-h), month_palace.offset(h))
}

/// Role of the palace at `branch` given the Life palace branch.
pub const fn palace_name_at(life: Branch, branch: Branch) -> PalaceName {
    PalaceName::from_cycle(branch.steps_forward_to(life) as i32)
}

/// Branch holding the palace role `name`.
pub const fn branch_of(life: Branch, name: PalaceName) -> Branch {
    life.offset(-(name.index() as i32))
}

/// Stem of the palace at `branch`.
///
/// Stems run from the Yin palace (five-tigers stem) through Hai; Zi and Chou
/// continue the run, so they repeat the stems of Yin and Mao.
pub const fn palace_stem(year_stem: Stem, branch: Branch) -> Stem {
    five_tigers(year_stem).offset(Branch::Yin.steps_forward_to(branch) as i32)
}

pub const fn palace_pillar(year_stem: Stem, branch: Branch) -> Pillar {
    Pillar {
        stem: palace_stem(year_stem, branch),
        branch,
    }
}

/// The Lai-Yin palace: the one among Yin..Hai whose stem equals the year stem.
pub const fn lai_yin_palace(year_stem: Stem) -> Branch {
    let steps = (year_stem.index() as i32 - five_tigers(year_stem).index() as i32).rem_euclid(10);
    Branch::Yin.offset(steps)
}

/// The palace, its opposite and its two trines (三方四正).
pub const fn surrounding_palaces(branch: Branch) -> [Branch; 4] {
    [branch, branch.opposite(), branch.offset(4), branch.offset(8)]
}

/// Life-ruling star (命主), keyed by the Life palace branch.
pub const fn life_star(life: Branch) -> StarId {
    match life {
        Branch::Zi => StarId::Tanlang,
        Branch::Chou | Branch::Hai => StarId::Jumen,
        Branch::Yin | Branch::Xu => StarId::Lucun,
        Branch::Mao | Branch::You => StarId::Wenqu,
        Branch::Chen | Branch::Shen => StarId::Lianzhen,
        Branch::Si | Branch::Wei => StarId::Wuqu,
        Branch::Wu => StarId::Pojun,
    }
}

/// Body-ruling star (身主), keyed by the year branch.
pub const fn body_star(year_branch: Branch) -> StarId {
    match year_branch {
        Branch::Zi | Branch::Wu => StarId::Huoxing,
        Branch::Chou | Branch::Wei => StarId::Tianxiang,
        Branch::Yin | Branch::Shen => StarId::Tianliang,
        Branch::Mao | Branch::You => StarId::Tiantong,
        Branch::Chen | Branch::Xu => StarId::Wenchang,
        Branch::Si | Branch::Hai => StarId::Tianji,
    }
}
