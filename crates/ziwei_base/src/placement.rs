//! Star placement.
//!
//! Main stars hang off two anchors: Ziwei, looked up from the bureau and the
//! lunar day, and Tianfu, its mirror across the Yin-Shen axis. Every other
//! star has its own rule keyed only by birth coordinates (year stem, year
//! branch, month, day, hour), so supporting stars can be placed in any order.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::bureau::Bureau;
use crate::ganzhi::{Branch, Direction, Stem};
use crate::star::{ALL_STARS, StarId};

// ---------------------------------------------------------------------------
// Main stars
// ---------------------------------------------------------------------------

/// Ziwei position by bureau (rows in [`Bureau`] order) and lunar day 1..=30.
///
/// Days that do not divide evenly by the bureau number borrow the missing
/// days and then step back (odd borrow) or forward (even borrow) by them.
#[rustfmt::skip]
pub const ZIWEI_TABLE: [[Branch; 30]; 5] = {
    use Branch::*;
    [
        // Water 2
        [Chou, Yin, Yin, Mao, Mao, Chen, Chen, Si, Si, Wu,
         Wu, Wei, Wei, Shen, Shen, You, You, Xu, Xu, Hai,
         Hai, Zi, Zi, Chou, Chou, Yin, Yin, Mao, Mao, Chen],
        // Wood 3
        [Chen, Chou, Yin, Si, Yin, Mao, Wu, Mao, Chen, Wei,
         Chen, Si, Shen, Si, Wu, You, Wu, Wei, Xu, Wei,
         Shen, Hai, Shen, You, Zi, You, Xu, Chou, Xu, Hai],
        // Metal 4
        [Hai, Chen, Chou, Yin, Zi, Si, Yin, Mao, Chou, Wu,
         Mao, Chen, Yin, Wei, Chen, Si, Mao, Shen, Si, Wu,
         Chen, You, Wu, Wei, Si, Xu, Wei, Shen, Wu, Hai],
        // Earth 5
        [Wu, Hai, Chen, Chou, Yin, Wei, Zi, Si, Yin, Mao,
         Shen, Chou, Wu, Mao, Chen, You, Yin, Wei, Chen, Si,
         Xu, Mao, Shen, Si, Wu, Hai, Chen, You, Wu, Wei],
        // Fire 6
        [You, Wu, Hai, Chen, Chou, Yin, Xu, Wei, Zi, Si,
         Yin, Mao, Hai, Shen, Chou, Wu, Mao, Chen, Zi, You,
         Yin, Wei, Chen, Si, Chou, Xu, Mao, Shen, Si, Wu],
    ]
};

const fn bureau_row(bureau: Bureau) -> usize {
    match bureau {
        Bureau::Water2 => 0,
        Bureau::Wood3 => 1,
        Bureau::Metal4 => 2,
        Bureau::Earth5 => 3,
        Bureau::Fire6 => 4,
    }
}

/// Ziwei branch for a bureau and lunar day (clamped to 1..=30).
pub const fn ziwei_branch(bureau: Bureau, lunar_day: u8) -> Branch {
    let day = if lunar_day < 1 {
        1
    } else if lunar_day > 30 {
        30
    } else {
        lunar_day
    };
    ZIWEI_TABLE[bureau_row(bureau)][day as usize - 1]
}

/// Tianfu mirrors Ziwei across the Yin-Shen axis.
pub const fn tianfu_branch(ziwei: Branch) -> Branch {
    Branch::from_cycle(4 - ziwei.index() as i32)
}

/// Star from which a main star is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Anchor {
    Ziwei,
    Tianfu,
}

/// Offset of a main star from its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MainStarRule {
    pub star: StarId,
    pub anchor: Anchor,
    pub direction: Direction,
    pub steps: u8,
}

const fn rule(star: StarId, anchor: Anchor, direction: Direction, steps: u8) -> MainStarRule {
    MainStarRule {
        star,
        anchor,
        direction,
        steps,
    }
}

/// The 14 main stars: the Ziwei series runs counter-clockwise, the Tianfu
/// series clockwise.
pub const MAIN_STAR_RULES: [MainStarRule; 14] = {
    use Anchor as A;
    use Direction::{Clockwise as Cw, CounterClockwise as Ccw};
    [
        rule(StarId::Ziwei, A::Ziwei, Cw, 0),
        rule(StarId::Tianji, A::Ziwei, Ccw, 1),
        rule(StarId::Taiyang, A::Ziwei, Ccw, 3),
        rule(StarId::Wuqu, A::Ziwei, Ccw, 4),
        rule(StarId::Tiantong, A::Ziwei, Ccw, 5),
        rule(StarId::Lianzhen, A::Ziwei, Ccw, 8),
        rule(StarId::Tianfu, A::Tianfu, Cw, 0),
        rule(StarId::Taiyin, A::Tianfu, Cw, 1),
        rule(StarId::Tanlang, A::Tianfu, Cw, 2),
        rule(StarId::Jumen, A::Tianfu, Cw, 3),
        rule(StarId::Tianxiang, A::Tianfu, Cw, 4),
        rule(StarId::Tianliang, A::Tianfu, Cw, 5),
        rule(StarId::Qisha, A::Tianfu, Cw, 6),
        rule(StarId::Pojun, A::Tianfu, Cw, 10),
    ]
};

/// Place all 14 main stars.
pub fn place_main_stars(bureau: Bureau, lunar_day: u8) -> [(StarId, Branch); 14] {
    let ziwei = ziwei_branch(bureau, lunar_day);
    let tianfu = tianfu_branch(ziwei);
    trace!(?bureau, lunar_day, ?ziwei, ?tianfu, "main star anchors");
    MAIN_STAR_RULES.map(|r| {
        let anchor = match r.anchor {
            Anchor::Ziwei => ziwei,
            Anchor::Tianfu => tianfu,
        };
        (r.star, anchor.step(r.direction, r.steps))
    })
}

// ---------------------------------------------------------------------------
// Supporting stars
// ---------------------------------------------------------------------------

/// Birth-derived coordinates that key every supporting star.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BirthCoordinates {
    pub year_stem: Stem,
    pub year_branch: Branch,
    /// Placement month 1..=12 (after any leap-month adjustment).
    pub month: u8,
    /// Lunar day 1..=30.
    pub day: u8,
    pub hour_branch: Branch,
}

/// Auxiliary and minor stars in catalogue order.
pub const SUPPORTING_STARS: [StarId; 44] = {
    let mut out = [StarId::Zuofu; 44];
    let mut i = 0;
    while i < out.len() {
        out[i] = ALL_STARS[i + 14];
        i += 1;
    }
    out
};

/// Lucun by year stem; Qingyang and Tuoluo flank it.
pub const fn lucun_branch(year_stem: Stem) -> Branch {
    match year_stem {
        Stem::Jia => Branch::Yin,
        Stem::Yi => Branch::Mao,
        Stem::Bing | Stem::Wu => Branch::Si,
        Stem::Ding | Stem::Ji => Branch::Wu,
        Stem::Geng => Branch::Shen,
        Stem::Xin => Branch::You,
        Stem::Ren => Branch::Hai,
        Stem::Gui => Branch::Zi,
    }
}

/// Heavenly nobles (Tiankui, Tianyue) by year stem.
pub const fn noble_branches(year_stem: Stem) -> (Branch, Branch) {
    match year_stem {
        Stem::Jia | Stem::Wu | Stem::Geng => (Branch::Chou, Branch::Wei),
        Stem::Yi | Stem::Ji => (Branch::Zi, Branch::Shen),
        Stem::Bing | Stem::Ding => (Branch::Hai, Branch::You),
        Stem::Xin => (Branch::Wu, Branch::Yin),
        Stem::Ren | Stem::Gui => (Branch::Mao, Branch::Si),
    }
}

/// Pick by the year branch's three-harmony group, in the order
/// Shen-Zi-Chen, Si-You-Chou, Yin-Wu-Xu, Hai-Mao-Wei.
const fn by_triad(year_branch: Branch, table: [Branch; 4]) -> Branch {
    table[year_branch.triad() as usize]
}

/// Pick by season group of the year branch: Yin-Mao-Chen, Si-Wu-Wei,
/// Shen-You-Xu, Hai-Zi-Chou.
const fn by_season(year_branch: Branch, table: [Branch; 4]) -> Branch {
    table[(Branch::Yin.steps_forward_to(year_branch) / 3) as usize]
}

const fn by_stem(year_stem: Stem, table: [Branch; 10]) -> Branch {
    table[year_stem.index() as usize]
}

/// Position of a supporting star, or `None` for a main star.
pub const fn place_supporting_star(star: StarId, c: &BirthCoordinates) -> Option<Branch> {
    use Branch::*;
    let m = c.month as i32 - 1;
    let d = c.day as i32 - 1;
    let h = c.hour_branch.index() as i32;
    let y = c.year_branch.index() as i32;

    let branch = match star {
        StarId::Ziwei
        | StarId::Tianji
        | StarId::Taiyang
        | StarId::Wuqu
        | StarId::Tiantong
        | StarId::Lianzhen
        | StarId::Tianfu
        | StarId::Taiyin
        | StarId::Tanlang
        | StarId::Jumen
        | StarId::Tianxiang
        | StarId::Tianliang
        | StarId::Qisha
        | StarId::Pojun => return None,

        // month
        StarId::Zuofu => Chen.offset(m),
        StarId::Youbi => Xu.offset(-m),
        StarId::Tianxing => You.offset(m),
        StarId::Tianyao => Chou.offset(m),
        StarId::Jieshen => Shen.offset(2 * m.div_euclid(2)),
        StarId::Tianwu => [Si, Shen, Yin, Hai][m.rem_euclid(4) as usize],
        StarId::TianyueMoon => {
            [Xu, Si, Chen, Yin, Wei, Mao, Hai, Wei, Yin, Wu, Xu, Yin][m.rem_euclid(12) as usize]
        }
        StarId::Yinsha => [Yin, Zi, Xu, Shen, Wu, Chen][m.rem_euclid(6) as usize],

        // hour
        StarId::Wenchang => Xu.offset(-h),
        StarId::Wenqu => Chen.offset(h),
        StarId::Dikong => Hai.offset(-h),
        StarId::Dijie => Hai.offset(h),
        StarId::Taifu => Wu.offset(h),
        StarId::Fenggao => Yin.offset(h),
        StarId::Huoxing => by_triad(c.year_branch, [Yin, Mao, Chou, You]).offset(h),
        StarId::Lingxing => by_triad(c.year_branch, [Xu, Xu, Mao, Xu]).offset(h),

        // month + day, hour + day
        StarId::Santai => Chen.offset(m + d),
        StarId::Bazuo => Xu.offset(-(m + d)),
        StarId::Enguang => Xu.offset(-h + d - 1),
        StarId::Tiangui => Chen.offset(h + d - 1),

        // year stem
        StarId::Tiankui => noble_branches(c.year_stem).0,
        StarId::Tianyue => noble_branches(c.year_stem).1,
        StarId::Lucun => lucun_branch(c.year_stem),
        StarId::Qingyang => lucun_branch(c.year_stem).offset(1),
        StarId::Tuoluo => lucun_branch(c.year_stem).offset(-1),
        StarId::Tianguan => by_stem(c.year_stem, [Wei, Chen, Si, Yin, Mao, You, Hai, You, Xu, Wu]),
        StarId::TianfuBlessing => {
            by_stem(c.year_stem, [You, Shen, Zi, Hai, Mao, Yin, Wu, Si, Wu, Si])
        }
        StarId::Tianchu => by_stem(c.year_stem, [Si, Wu, Zi, Si, Wu, Shen, Yin, Wu, You, Hai]),

        // year branch
        StarId::Tianma => by_triad(c.year_branch, [Yin, Hai, Shen, Si]),
        StarId::Xianchi => by_triad(c.year_branch, [You, Wu, Mao, Zi]),
        StarId::Huagai => by_triad(c.year_branch, [Chen, Chou, Xu, Wei]),
        StarId::Guchen => by_season(c.year_branch, [Si, Shen, Hai, Yin]),
        StarId::Guasu => by_season(c.year_branch, [Chou, Chen, Wei, Xu]),
        StarId::Hongluan => Mao.offset(-y),
        StarId::Tianxi => Mao.offset(6 - y),
        StarId::Tianku => Wu.offset(-y),
        StarId::Tianxu => Wu.offset(y),
        StarId::Longchi => Chen.offset(y),
        StarId::Fengge => Xu.offset(-y),
        StarId::Posui => [Si, Chou, You][(y % 3) as usize],
        StarId::Feilian => {
            [Shen, You, Xu, Si, Wu, Wei, Yin, Mao, Chen, Hai, Zi, Chou][y as usize]
        }
        StarId::Tiande => You.offset(y),
        StarId::Yuede => Si.offset(y),
        StarId::Nianjie => Xu.offset(-y),
    };
    Some(branch)
}

/// Place every auxiliary and minor star.
pub fn place_supporting_stars(coords: &BirthCoordinates) -> Vec<(StarId, Branch)> {
    SUPPORTING_STARS
        .iter()
        .filter_map(|&star| place_supporting_star(star, coords).map(|b| (star, b)))
        .collect()
}
