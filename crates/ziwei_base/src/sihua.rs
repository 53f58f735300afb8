//! The four transformations (四化).
//!
//! Each stem transforms four stars: one each into Prosperity (禄), Power (权),
//! Status (科) and Adversity (忌). The birth-year stem gives the natal
//! transformations; a palace's own stem gives self-transformations of the
//! stars sitting in it, and flying transformations of stars elsewhere.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ganzhi::{Branch, Stem};
use crate::star::StarId;

/// The four transformation tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TransformTag {
    /// 化禄 (A)
    Prosperity,
    /// 化权 (B)
    Power,
    /// 化科 (C)
    Status,
    /// 化忌 (D)
    Adversity,
}

/// All tags in table order.
pub const ALL_TRANSFORM_TAGS: [TransformTag; 4] = [
    TransformTag::Prosperity,
    TransformTag::Power,
    TransformTag::Status,
    TransformTag::Adversity,
];

impl TransformTag {
    /// Letter code A-D.
    pub const fn letter(self) -> char {
        match self {
            Self::Prosperity => 'A',
            Self::Power => 'B',
            Self::Status => 'C',
            Self::Adversity => 'D',
        }
    }

    pub const fn chinese(self) -> &'static str {
        match self {
            Self::Prosperity => "禄",
            Self::Power => "权",
            Self::Status => "科",
            Self::Adversity => "忌",
        }
    }
}

impl Display for TransformTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.chinese())
    }
}

/// Stars transformed by `stem`, in tag order Prosperity, Power, Status, Adversity.
pub const fn transformed_stars(stem: Stem) -> [StarId; 4] {
    use StarId::*;
    match stem {
        Stem::Jia => [Lianzhen, Pojun, Wuqu, Taiyang],
        Stem::Yi => [Tianji, Tianliang, Ziwei, Taiyin],
        Stem::Bing => [Tiantong, Tianji, Wenchang, Lianzhen],
        Stem::Ding => [Taiyin, Tiantong, Tianji, Jumen],
        Stem::Wu => [Tanlang, Taiyin, Youbi, Tianji],
        Stem::Ji => [Wuqu, Tanlang, Tianliang, Wenqu],
        Stem::Geng => [Taiyang, Wuqu, Taiyin, Tiantong],
        Stem::Xin => [Jumen, Taiyang, Wenqu, Wenchang],
        Stem::Ren => [Tianliang, Ziwei, Zuofu, Wuqu],
        Stem::Gui => [Pojun, Jumen, Taiyin, Tanlang],
    }
}

/// The four `(star, tag)` pairs triggered by a year stem.
pub const fn natal_transforms(year_stem: Stem) -> [(StarId, TransformTag); 4] {
    let stars = transformed_stars(year_stem);
    [
        (stars[0], TransformTag::Prosperity),
        (stars[1], TransformTag::Power),
        (stars[2], TransformTag::Status),
        (stars[3], TransformTag::Adversity),
    ]
}

/// Tag that `stem` gives to `star`, if any.
pub fn transform_of(stem: Stem, star: StarId) -> Option<TransformTag> {
    natal_transforms(stem)
        .into_iter()
        .find_map(|(s, tag)| (s == star).then_some(tag))
}

/// Self-transformations: stars in a palace transformed by that palace's stem.
pub fn self_transforms(palace_stem: Stem, stars_in_palace: &[StarId]) -> Vec<(StarId, TransformTag)> {
    stars_in_palace
        .iter()
        .filter_map(|&star| transform_of(palace_stem, star).map(|tag| (star, tag)))
        .collect()
}

/// A transformation flown from one palace's stem onto a star elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlyingTransform {
    /// Palace whose stem triggers the transformation.
    pub from: Branch,
    pub star: StarId,
    pub tag: TransformTag,
    /// Palace the transformed star sits in.
    pub to: Branch,
}

/// Fly the four transformations of `from`'s stem to the palaces holding
/// the transformed stars. Stars `locate` cannot find are skipped.
pub fn fly_transforms(
    from: Branch,
    from_stem: Stem,
    locate: impl Fn(StarId) -> Option<Branch>,
) -> Vec<FlyingTransform> {
    natal_transforms(from_stem)
        .into_iter()
        .filter_map(|(star, tag)| {
            locate(star).map(|to| FlyingTransform {
                from,
                star,
                tag,
                to,
            })
        })
        .collect()
}
