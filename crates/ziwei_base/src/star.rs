//! Star catalogue: identities, kinds and brightness.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ganzhi::Branch;
use crate::sihua::TransformTag;

/// Star category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StarKind {
    /// The 14 main stars of the Ziwei and Tianfu series.
    Main,
    /// The 14 auxiliary stars (assistants, nobles, killers).
    Auxiliary,
    /// The remaining minor stars.
    Minor,
}

/// Brightness of a star in a palace, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Brightness {
    /// 庙
    Temple,
    /// 旺
    Prosperous,
    /// 得
    Gained,
    /// 利
    Favorable,
    /// 平
    Neutral,
    /// 不
    Weak,
    /// 陷
    Fallen,
}

impl Brightness {
    pub const fn chinese(self) -> &'static str {
        match self {
            Self::Temple => "庙",
            Self::Prosperous => "旺",
            Self::Gained => "得",
            Self::Favorable => "利",
            Self::Neutral => "平",
            Self::Weak => "不",
            Self::Fallen => "陷",
        }
    }
}

/// Every star the engine places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum StarId {
    // main
    Ziwei,
    Tianji,
    Taiyang,
    Wuqu,
    Tiantong,
    Lianzhen,
    Tianfu,
    Taiyin,
    Tanlang,
    Jumen,
    Tianxiang,
    Tianliang,
    Qisha,
    Pojun,
    // auxiliary
    Zuofu,
    Youbi,
    Wenchang,
    Wenqu,
    Tiankui,
    Tianyue,
    Lucun,
    Qingyang,
    Tuoluo,
    Tianma,
    Huoxing,
    Lingxing,
    Dikong,
    Dijie,
    // minor
    Tianxing,
    Tianyao,
    Jieshen,
    Tianwu,
    /// 天月 (the monthly star, distinct from the noble 天钺).
    TianyueMoon,
    Yinsha,
    Taifu,
    Fenggao,
    Santai,
    Bazuo,
    Enguang,
    Tiangui,
    Tianguan,
    /// 天福 (distinct from the main star 天府).
    TianfuBlessing,
    Tianchu,
    Hongluan,
    Tianxi,
    Xianchi,
    Tianku,
    Tianxu,
    Longchi,
    Fengge,
    Guchen,
    Guasu,
    Huagai,
    Posui,
    Feilian,
    Tiande,
    Yuede,
    Nianjie,
}

/// Number of stars in the catalogue.
pub const STAR_COUNT: usize = 58;

/// All stars: 14 main, then 14 auxiliary, then 30 minor.
pub const ALL_STARS: [StarId; STAR_COUNT] = {
    use StarId::*;
    [
        Ziwei, Tianji, Taiyang, Wuqu, Tiantong, Lianzhen, Tianfu, Taiyin, Tanlang, Jumen,
        Tianxiang, Tianliang, Qisha, Pojun, Zuofu, Youbi, Wenchang, Wenqu, Tiankui, Tianyue,
        Lucun, Qingyang, Tuoluo, Tianma, Huoxing, Lingxing, Dikong, Dijie, Tianxing, Tianyao,
        Jieshen, Tianwu, TianyueMoon, Yinsha, Taifu, Fenggao, Santai, Bazuo, Enguang, Tiangui,
        Tianguan, TianfuBlessing, Tianchu, Hongluan, Tianxi, Xianchi, Tianku, Tianxu, Longchi,
        Fengge, Guchen, Guasu, Huagai, Posui, Feilian, Tiande, Yuede, Nianjie,
    ]
};

const MAIN_STAR_COUNT: usize = 14;
const AUXILIARY_END: usize = 28;

const STAR_NAMES: [&str; STAR_COUNT] = [
    "Ziwei", "Tianji", "Taiyang", "Wuqu", "Tiantong", "Lianzhen", "Tianfu", "Taiyin", "Tanlang",
    "Jumen", "Tianxiang", "Tianliang", "Qisha", "Pojun", "Zuofu", "Youbi", "Wenchang", "Wenqu",
    "Tiankui", "Tianyue", "Lucun", "Qingyang", "Tuoluo", "Tianma", "Huoxing", "Lingxing",
    "Dikong", "Dijie", "Tianxing", "Tianyao", "Jieshen", "Tianwu", "Tianyue (moon)", "Yinsha",
    "Taifu", "Fenggao", "Santai", "Bazuo", "Enguang", "Tiangui", "Tianguan", "Tianfu (blessing)",
    "Tianchu", "Hongluan", "Tianxi", "Xianchi", "Tianku", "Tianxu", "Longchi", "Fengge",
    "Guchen", "Guasu", "Huagai", "Posui", "Feilian", "Tiande", "Yuede", "Nianjie",
];

const STAR_CHINESE: [&str; STAR_COUNT] = [
    "紫微", "天机", "太阳", "武曲", "天同", "廉贞", "天府", "太阴", "贪狼", "巨门", "天相", "天梁",
    "七杀", "破军", "左辅", "右弼", "文昌", "文曲", "天魁", "天钺", "禄存", "擎羊", "陀罗", "天马",
    "火星", "铃星", "地空", "地劫", "天刑", "天姚", "解神", "天巫", "天月", "阴煞", "台辅", "封诰",
    "三台", "八座", "恩光", "天贵", "天官", "天福", "天厨", "红鸾", "天喜", "咸池", "天哭", "天虚",
    "龙池", "凤阁", "孤辰", "寡宿", "华盖", "破碎", "蜚廉", "天德", "月德", "年解",
];

impl StarId {
    /// 0-based catalogue index (Ziwei=0 .. Nianjie=57).
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        STAR_NAMES[self.index() as usize]
    }

    pub const fn chinese(self) -> &'static str {
        STAR_CHINESE[self.index() as usize]
    }

    pub const fn kind(self) -> StarKind {
        let i = self.index() as usize;
        if i < MAIN_STAR_COUNT {
            StarKind::Main
        } else if i < AUXILIARY_END {
            StarKind::Auxiliary
        } else {
            StarKind::Minor
        }
    }

    pub const fn is_main(self) -> bool {
        matches!(self.kind(), StarKind::Main)
    }
}

impl Display for StarId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.chinese())
    }
}

/// A star as it sits in a palace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Star {
    pub id: StarId,
    pub kind: StarKind,
    /// `None` for stars without a traditional brightness rating.
    pub brightness: Option<Brightness>,
    /// Transformation from the birth-year stem.
    pub natal_transform: Option<TransformTag>,
    /// Transformation from the stem of the palace the star sits in.
    pub self_transform: Option<TransformTag>,
}

// ---------------------------------------------------------------------------
// Brightness tables, indexed from Yin (寅) clockwise
// ---------------------------------------------------------------------------

use Brightness::{
    Fallen as X, Favorable as L, Gained as D, Neutral as P, Prosperous as W, Temple as M,
    Weak as B,
};

#[rustfmt::skip]
const MAIN_BRIGHTNESS: [[Brightness; 12]; MAIN_STAR_COUNT] = [
    //寅 卯 辰 巳 午 未 申 酉 戌 亥 子 丑
    [W, W, D, W, M, M, W, W, D, W, P, M], // Ziwei
    [D, W, L, P, M, X, D, W, L, P, M, X], // Tianji
    [W, M, W, W, W, D, D, X, B, X, X, B], // Taiyang
    [D, L, M, P, W, M, D, L, M, P, W, M], // Wuqu
    [L, P, P, M, X, B, W, P, P, M, W, B], // Tiantong
    [M, P, L, X, P, L, M, P, L, X, P, L], // Lianzhen
    [M, D, M, D, W, M, D, W, M, D, M, M], // Tianfu
    [W, X, X, X, B, B, L, B, W, M, M, M], // Taiyin
    [P, L, M, X, W, M, P, L, M, X, W, M], // Tanlang
    [M, M, X, W, W, B, M, M, X, W, W, B], // Jumen
    [M, X, D, D, M, D, M, X, D, D, M, M], // Tianxiang
    [M, M, M, X, M, W, X, D, M, X, M, W], // Tianliang
    [M, W, M, P, W, M, M, M, M, P, W, M], // Qisha
    [D, X, W, P, M, W, D, X, W, P, M, W], // Pojun
];

#[rustfmt::skip]
const WENCHANG_BRIGHTNESS: [Brightness; 12] = [X, L, D, M, X, L, D, M, X, L, D, M];
#[rustfmt::skip]
const WENQU_BRIGHTNESS: [Brightness; 12] = [P, W, D, M, X, W, D, M, P, W, D, M];

/// Brightness of `star` at `branch`, for the stars that carry a rating.
pub fn brightness(star: StarId, branch: Branch) -> Option<Brightness> {
    let col = Branch::Yin.steps_forward_to(branch) as usize;
    match star {
        StarId::Wenchang => Some(WENCHANG_BRIGHTNESS[col]),
        StarId::Wenqu => Some(WENQU_BRIGHTNESS[col]),
        s if s.is_main() => Some(MAIN_BRIGHTNESS[s.index() as usize][col]),
        _ => None,
    }
}
