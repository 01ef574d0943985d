//! Ingredient checklists for a few well-known dishes.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DishIngredients {
    pub main_ingredients: &'static [&'static str],
    pub seasonings: &'static [&'static str],
    pub vegetables: &'static [&'static str],
    pub optional: &'static [&'static str],
    pub cooking_tips: &'static [&'static str],
}

const PHO: DishIngredients = DishIngredients {
    main_ingredients: &["Xương bò", "Thịt bò", "Bánh phở"],
    seasonings: &["Quế", "Hồi", "Đinh hương", "Nước mắm"],
    vegetables: &["Hành tây", "Gừng", "Rau thơm"],
    optional: &["Tủy xương", "Gân bò"],
    cooking_tips: &["Ninh xương 3-4 tiếng", "Nướng hành gừng cho thơm"],
};

const BUN_BO_HUE: DishIngredients = DishIngredients {
    main_ingredients: &["Xương heo", "Thịt bò", "Bánh bún"],
    seasonings: &["Mắm ruốc", "Ớt", "Sả", "Tôm khô"],
    vegetables: &["Chuối xanh", "Giá đỗ", "Rau ram"],
    optional: &["Chả", "Huyết heo"],
    cooking_tips: &["Xào mắm ruốc với ớt", "Thái thịt bò mỏng"],
};

const BANH_XEO: DishIngredients = DishIngredients {
    main_ingredients: &["Bột bánh xèo", "Tôm", "Thịt ba chỉ"],
    seasonings: &["Nước mắm", "Đường", "Tiêu"],
    vegetables: &["Giá đỗ", "Rau sống", "Dưa leo"],
    optional: &["Nghệ tươi", "Nước cốt dừa"],
    cooking_tips: &["Pha bột với nước cốt dừa", "Rắc đều nhân lên chảo"],
};

pub const GENERIC: DishIngredients = DishIngredients {
    main_ingredients: &["Nguyên liệu chính"],
    seasonings: &["Gia vị cơ bản"],
    vegetables: &["Rau củ tươi"],
    optional: &["Nguyên liệu tùy chọn"],
    cooking_tips: &["Mẹo chế biến"],
};

/// Checklist for a dish name. Matching ignores case and surrounding
/// whitespace; unknown dishes get the generic placeholder.
pub fn ingredients_for(dish_name: &str) -> DishIngredients {
    match dish_name.trim().to_lowercase().as_str() {
        "phở" => PHO,
        "bún bò huế" => BUN_BO_HUE,
        "bánh xèo" => BANH_XEO,
        _ => GENERIC,
    }
}
