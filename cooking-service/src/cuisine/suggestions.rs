//! Static table of signature dishes per region and language.

use super::region::Region;
use serde::{Deserialize, Serialize};

/// Languages the service localizes its content for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Vi,
    En,
    Ja,
    Ko,
    Zh,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::Vi,
        Language::En,
        Language::Ja,
        Language::Ko,
        Language::Zh,
    ];

    /// Parse a language code. Unknown codes yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "vi" => Some(Language::Vi),
            "en" => Some(Language::En),
            "ja" => Some(Language::Ja),
            "ko" => Some(Language::Ko),
            "zh" => Some(Language::Zh),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::Vi => "vi",
            Language::En => "en",
            Language::Ja => "ja",
            Language::Ko => "ko",
            Language::Zh => "zh",
        }
    }
}

static NORTH: [&[&str]; 5] = [
    &["Phở Hà Nội", "Bún chả", "Chả cá Lã Vọng", "Bánh cuốn"],
    &["Hanoi Pho", "Bun Cha", "Cha Ca La Vong", "Banh Cuon"],
    &["ハノイフォー", "ブンチャー", "チャーカー", "バインクオン"],
    &["하노이 쌀국수", "분짜", "차까", "반꾸온"],
    &["河内河粉", "烤肉米线", "炸鱼", "卷粉"],
];

static CENTRAL: [&[&str]; 5] = [
    &["Bún bò Huế", "Mì Quảng", "Cao lầu", "Bánh khoái"],
    &["Hue Beef Noodle Soup", "Mi Quang", "Cao Lau", "Banh Khoai"],
    &["フエ牛肉うどん", "ミークアン", "カオラウ", "バインコアイ"],
    &["후에 쇠고기 국수", "미꽝", "까오라우", "반코아이"],
    &["顺化牛肉面", "广面", "高楼面", "煎饼"],
];

static SOUTH: [&[&str]; 5] = [
    &["Bún thịt nướng", "Bánh xèo", "Hủ tiếu", "Chè ba màu"],
    &["Grilled Pork Vermicelli", "Banh Xeo", "Hu Tieu", "Three-Color Dessert"],
    &["焼肉ビーフン", "バインセオ", "フーティウ", "三色チェー"],
    &["구운 돼지고기 쌀국수", "반세오", "후띠에우", "삼색체"],
    &["烤肉米粉", "煎饼", "河粉汤", "三色甜品"],
];

fn language_index(language: Language) -> usize {
    match language {
        Language::Vi => 0,
        Language::En => 1,
        Language::Ja => 2,
        Language::Ko => 3,
        Language::Zh => 4,
    }
}

/// Dishes for a region in the given language, in table order.
pub fn dishes(region: Region, language: Language) -> &'static [&'static str] {
    let table = match region {
        Region::North => &NORTH,
        Region::Central => &CENTRAL,
        Region::South => &SOUTH,
    };
    table[language_index(language)]
}

/// Look up suggestions by raw language code.
///
/// An unsupported code is not an error: it simply has no dishes.
pub fn suggestions(region: Region, language: &str) -> &'static [&'static str] {
    Language::from_code(language)
        .map(|lang| dishes(region, lang))
        .unwrap_or(&[])
}
