//! Heavenly stems, earthly branches and the sexagenary cycle.
//!
//! Every calendar coordinate, palace position and period label in a chart is
//! one of the 10 stems or the 12 branches. Branch arithmetic is modular:
//! clockwise means increasing index (Zi -> Chou -> Yin ...).

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Yin/yang polarity of a stem or branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    Yang,
    Yin,
}

impl Polarity {
    /// The other polarity.
    pub const fn flipped(self) -> Self {
        match self {
            Self::Yang => Self::Yin,
            Self::Yin => Self::Yang,
        }
    }
}

/// The five elements (wu xing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Element {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wood => "Wood",
            Self::Fire => "Fire",
            Self::Earth => "Earth",
            Self::Metal => "Metal",
            Self::Water => "Water",
        }
    }

    pub const fn chinese(self) -> &'static str {
        match self {
            Self::Wood => "木",
            Self::Fire => "火",
            Self::Earth => "土",
            Self::Metal => "金",
            Self::Water => "水",
        }
    }
}

/// Direction of travel around the 12 branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Increasing branch index (Zi -> Chou).
    Clockwise,
    /// Decreasing branch index (Chou -> Zi).
    CounterClockwise,
}

impl Direction {
    pub const fn reversed(self) -> Self {
        match self {
            Self::Clockwise => Self::CounterClockwise,
            Self::CounterClockwise => Self::Clockwise,
        }
    }

    /// +1 for clockwise, -1 for counter-clockwise.
    pub const fn sign(self) -> i32 {
        match self {
            Self::Clockwise => 1,
            Self::CounterClockwise => -1,
        }
    }
}

// ---------------------------------------------------------------------------
// Stems
// ---------------------------------------------------------------------------

/// The 10 heavenly stems (tian gan).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Stem {
    Jia,
    Yi,
    Bing,
    Ding,
    Wu,
    Ji,
    Geng,
    Xin,
    Ren,
    Gui,
}

/// All 10 stems in order (index 0 = Jia).
pub const ALL_STEMS: [Stem; 10] = [
    Stem::Jia,
    Stem::Yi,
    Stem::Bing,
    Stem::Ding,
    Stem::Wu,
    Stem::Ji,
    Stem::Geng,
    Stem::Xin,
    Stem::Ren,
    Stem::Gui,
];

const STEM_NAMES: [&str; 10] = [
    "Jia", "Yi", "Bing", "Ding", "Wu", "Ji", "Geng", "Xin", "Ren", "Gui",
];

const STEM_CHINESE: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];

impl Stem {
    /// 0-based index (Jia=0 .. Gui=9).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Stem at a cyclic position; any integer wraps modulo 10.
    pub const fn from_cycle(n: i32) -> Self {
        ALL_STEMS[n.rem_euclid(10) as usize]
    }

    /// Pinyin name.
    pub const fn name(self) -> &'static str {
        STEM_NAMES[self.index() as usize]
    }

    pub const fn chinese(self) -> &'static str {
        STEM_CHINESE[self.index() as usize]
    }

    /// Even-indexed stems are yang.
    pub const fn polarity(self) -> Polarity {
        if self.index() % 2 == 0 {
            Polarity::Yang
        } else {
            Polarity::Yin
        }
    }

    /// Stems pair up by element: Jia/Yi wood, Bing/Ding fire, and so on.
    pub const fn element(self) -> Element {
        match self.index() / 2 {
            0 => Element::Wood,
            1 => Element::Fire,
            2 => Element::Earth,
            3 => Element::Metal,
            _ => Element::Water,
        }
    }

    /// Advance by `steps` (negative goes backwards).
    pub const fn offset(self, steps: i32) -> Self {
        Self::from_cycle(self.index() as i32 + steps)
    }
}

impl Display for Stem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.chinese())
    }
}

// ---------------------------------------------------------------------------
// Branches
// ---------------------------------------------------------------------------

/// The 12 earthly branches (di zhi).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Branch {
    Zi,
    Chou,
    Yin,
    Mao,
    Chen,
    Si,
    Wu,
    Wei,
    Shen,
    You,
    Xu,
    Hai,
}

/// All 12 branches in order (index 0 = Zi).
pub const ALL_BRANCHES: [Branch; 12] = [
    Branch::Zi,
    Branch::Chou,
    Branch::Yin,
    Branch::Mao,
    Branch::Chen,
    Branch::Si,
    Branch::Wu,
    Branch::Wei,
    Branch::Shen,
    Branch::You,
    Branch::Xu,
    Branch::Hai,
];

const BRANCH_NAMES: [&str; 12] = [
    "Zi", "Chou", "Yin", "Mao", "Chen", "Si", "Wu", "Wei", "Shen", "You", "Xu", "Hai",
];

const BRANCH_CHINESE: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

const BRANCH_ANIMALS: [&str; 12] = [
    "Rat", "Ox", "Tiger", "Rabbit", "Dragon", "Snake", "Horse", "Goat", "Monkey", "Rooster",
    "Dog", "Pig",
];

impl Branch {
    /// 0-based index (Zi=0 .. Hai=11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Branch at a cyclic position; any integer wraps modulo 12.
    pub const fn from_cycle(n: i32) -> Self {
        ALL_BRANCHES[n.rem_euclid(12) as usize]
    }

    /// Pinyin name.
    pub const fn name(self) -> &'static str {
        BRANCH_NAMES[self.index() as usize]
    }

    pub const fn chinese(self) -> &'static str {
        BRANCH_CHINESE[self.index() as usize]
    }

    /// Zodiac animal of the branch.
    pub const fn animal(self) -> &'static str {
        BRANCH_ANIMALS[self.index() as usize]
    }

    /// Even-indexed branches are yang.
    pub const fn polarity(self) -> Polarity {
        if self.index() % 2 == 0 {
            Polarity::Yang
        } else {
            Polarity::Yin
        }
    }

    pub const fn element(self) -> Element {
        match self {
            Self::Yin | Self::Mao => Element::Wood,
            Self::Si | Self::Wu => Element::Fire,
            Self::Shen | Self::You => Element::Metal,
            Self::Hai | Self::Zi => Element::Water,
            Self::Chen | Self::Xu | Self::Chou | Self::Wei => Element::Earth,
        }
    }

    /// Move `steps` positions clockwise (negative moves counter-clockwise).
    pub const fn offset(self, steps: i32) -> Self {
        Self::from_cycle(self.index() as i32 + steps)
    }

    /// Move `steps` positions in `direction`.
    pub const fn step(self, direction: Direction, steps: u8) -> Self {
        self.offset(direction.sign() * steps as i32)
    }

    /// The branch six positions away (the opposing palace).
    pub const fn opposite(self) -> Self {
        self.offset(6)
    }

    /// Clockwise distance from `self` to `to`, in 0..12.
    pub const fn steps_forward_to(self, to: Branch) -> u8 {
        (to.index() as i32 - self.index() as i32).rem_euclid(12) as u8
    }

    /// The three-harmony group (san he) containing this branch:
    /// 0 = Shen-Zi-Chen, 1 = Si-You-Chou, 2 = Yin-Wu-Xu, 3 = Hai-Mao-Wei.
    pub const fn triad(self) -> u8 {
        self.index() % 4
    }
}

impl Display for Branch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.chinese())
    }
}

// ---------------------------------------------------------------------------
// Pillars
// ---------------------------------------------------------------------------

/// A stem-branch pair, one of the 60 positions of the sexagenary cycle.
///
/// Stem and branch always share polarity; [`Pillar::new`] rejects mixed pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pillar {
    pub stem: Stem,
    pub branch: Branch,
}

const NAYIN_NAMES: [&str; 30] = [
    "海中金", "炉中火", "大林木", "路旁土", "剑锋金", "山头火", "涧下水", "城头土", "白蜡金",
    "杨柳木", "泉中水", "屋上土", "霹雳火", "松柏木", "长流水", "沙中金", "山下火", "平地木",
    "壁上土", "金箔金", "覆灯火", "天河水", "大驿土", "钗钏金", "桑柘木", "大溪水", "沙中土",
    "天上火", "石榴木", "大海水",
];

const NAYIN_ELEMENTS: [Element; 30] = {
    use Element::*;
    [
        Metal, Fire, Wood, Earth, Metal, Fire, Water, Earth, Metal, Wood, Water, Earth, Fire,
        Wood, Water, Metal, Fire, Wood, Earth, Metal, Fire, Water, Earth, Metal, Wood, Water,
        Earth, Fire, Wood, Water,
    ]
};

impl Pillar {
    /// Pair a stem and a branch; `None` when their polarities differ.
    pub const fn new(stem: Stem, branch: Branch) -> Option<Self> {
        if stem.index() % 2 == branch.index() % 2 {
            Some(Self { stem, branch })
        } else {
            None
        }
    }

    /// Pillar at a cyclic position (0 = Jia-Zi); wraps modulo 60.
    pub const fn from_cycle(n: i32) -> Self {
        let n = n.rem_euclid(60);
        Self {
            stem: Stem::from_cycle(n),
            branch: Branch::from_cycle(n),
        }
    }

    /// Position within the 60-cycle (Jia-Zi = 0 .. Gui-Hai = 59).
    pub const fn cycle_index(self) -> u8 {
        (6 * self.stem.index() as i32 - 5 * self.branch.index() as i32).rem_euclid(60) as u8
    }

    /// Advance by `steps` positions through the 60-cycle.
    pub const fn offset(self, steps: i32) -> Self {
        Self::from_cycle(self.cycle_index() as i32 + steps)
    }

    pub const fn next(self) -> Self {
        self.offset(1)
    }

    /// Element of the pillar's sound (na yin); consecutive pairs share one.
    pub const fn nayin(self) -> Element {
        NAYIN_ELEMENTS[self.cycle_index() as usize / 2]
    }

    pub const fn nayin_name(self) -> &'static str {
        NAYIN_NAMES[self.cycle_index() as usize / 2]
    }
}

impl Display for Pillar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.stem, self.branch)
    }
}
