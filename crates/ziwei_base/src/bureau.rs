//! Five-elements bureau (五行局).

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ganzhi::{Branch, Element, Stem};

/// The five bureaus; the number fixes the main-star cycle length and the
/// starting age of the first major period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bureau {
    Water2,
    Wood3,
    Metal4,
    Earth5,
    Fire6,
}

/// All bureaus in numeric order.
pub const ALL_BUREAUS: [Bureau; 5] = [
    Bureau::Water2,
    Bureau::Wood3,
    Bureau::Metal4,
    Bureau::Earth5,
    Bureau::Fire6,
];

impl Bureau {
    /// The bureau number, 2..=6.
    pub const fn number(self) -> u8 {
        match self {
            Self::Water2 => 2,
            Self::Wood3 => 3,
            Self::Metal4 => 4,
            Self::Earth5 => 5,
            Self::Fire6 => 6,
        }
    }

    pub const fn element(self) -> Element {
        match self {
            Self::Water2 => Element::Water,
            Self::Wood3 => Element::Wood,
            Self::Metal4 => Element::Metal,
            Self::Earth5 => Element::Earth,
            Self::Fire6 => Element::Fire,
        }
    }

    pub const fn from_element(element: Element) -> Self {
        match element {
            Element::Water => Self::Water2,
            Element::Wood => Self::Wood3,
            Element::Metal => Self::Metal4,
            Element::Earth => Self::Earth5,
            Element::Fire => Self::Fire6,
        }
    }

    pub const fn chinese(self) -> &'static str {
        match self {
            Self::Water2 => "水二局",
            Self::Wood3 => "木三局",
            Self::Metal4 => "金四局",
            Self::Earth5 => "土五局",
            Self::Fire6 => "火六局",
        }
    }
}

impl Display for Bureau {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.element().name(), self.number())
    }
}

use Bureau::{Earth5 as E, Fire6 as F, Metal4 as M, Water2 as S, Wood3 as W};

/// Rows: year-stem pairs 甲己, 乙庚, 丙辛, 丁壬, 戊癸.
/// Columns: life-branch pairs 子丑, 寅卯, 辰巳, 午未, 申酉, 戌亥.
#[rustfmt::skip]
const BUREAU_TABLE: [[Bureau; 6]; 5] = [
    [S, F, W, E, M, F],
    [F, E, M, W, S, E],
    [E, W, S, M, F, W],
    [W, M, F, S, E, M],
    [M, S, E, F, W, S],
];

/// Bureau from the year stem and Life palace branch.
pub const fn five_elements_bureau(year_stem: Stem, life: Branch) -> Bureau {
    BUREAU_TABLE[(year_stem.index() % 5) as usize][(life.index() / 2) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ganzhi::{ALL_BRANCHES, ALL_STEMS};
    use crate::palace::palace_pillar;

    #[test]
    fn agrees_with_nayin_of_life_palace() {
        for s in ALL_STEMS {
            for b in ALL_BRANCHES {
                let nayin = palace_pillar(s, b).nayin();
                assert_eq!(five_elements_bureau(s, b).element(), nayin, "{s:?} {b:?}");
            }
        }
    }

    #[test]
    fn fixture_bureaus() {
        assert_eq!(five_elements_bureau(Stem::Wu, Branch::Wu), Bureau::Fire6);
        assert_eq!(five_elements_bureau(Stem::Wu, Branch::Yin), Bureau::Water2);
    }

    #[test]
    fn numbers_and_elements_round_trip() {
        for b in ALL_BUREAUS {
            assert_eq!(Bureau::from_element(b.element()), b);
            assert!((2..=6).contains(&b.number()));
        }
    }
}
