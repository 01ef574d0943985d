//! Prompt assembly for the generative text providers.
//!
//! Everything here is string formatting; nothing talks to a provider.

use super::suggestions::Language;
use crate::models::ChatTurn;
use serde_json::{Map, Value};

/// Number of previous chat turns replayed to the model.
pub const CHAT_CONTEXT_TURNS: usize = 5;

const RECIPE_SHAPE_VI: &str = r#"{
  "title": "Tên món ăn",
  "description": "Mô tả ngắn",
  "cooking_time": "thời gian nấu",
  "difficulty": "độ khó",
  "servings": 4,
  "ingredients": ["danh sách nguyên liệu chi tiết"],
  "instructions": ["các bước nấu ăn chi tiết"],
  "tips": ["mẹo nấu ăn"],
  "nutrition": {"calories": 0, "protein": "g", "carbs": "g", "fat": "g"}
}"#;

const RECIPE_SHAPE_EN: &str = r#"{
  "title": "Recipe name",
  "description": "Brief description",
  "cooking_time": "cooking time",
  "difficulty": "difficulty level",
  "servings": 4,
  "ingredients": ["detailed ingredient list"],
  "instructions": ["detailed cooking steps"],
  "tips": ["cooking tips"],
  "nutrition": {"calories": 0, "protein": "g", "carbs": "g", "fat": "g"}
}"#;

const FOOD_ANALYSIS_SHAPE: &str = r#"{
  "detected_food": "dish name",
  "description": "short description",
  "ingredients": ["visible ingredients"],
  "cooking_method": "likely cooking method",
  "origin": "region or country of origin",
  "nutrition_estimate": {"calories": 0, "protein": "g", "carbs": "g", "fat": "g"},
  "suggestions": ["ways to improve the dish"]
}"#;

/// Persona line telling the model which language to answer in.
/// Codes outside the supported set get the English persona, matching the
/// English template every non-Vietnamese prompt uses.
pub fn language_instruction(language: &str) -> &'static str {
    match Language::from_code(language) {
        Some(Language::Vi) => "Bạn là trợ lý nấu ăn thông minh. Trả lời bằng tiếng Việt.",
        Some(Language::Ja) => "あなたは料理アシスタントです。日本語で返答してください。",
        Some(Language::Ko) => "당신은 요리 어시스턴트입니다. 한국어로 답변해 주세요.",
        Some(Language::Zh) => "你是烹饪助手。请用中文回答。",
        Some(Language::En) | None => "You are a smart cooking assistant. Respond in English.",
    }
}

fn is_vietnamese(language: &str) -> bool {
    Language::from_code(language) == Some(Language::Vi)
}

fn preferences_blob(preferences: &Map<String, Value>) -> String {
    if preferences.is_empty() {
        return String::new();
    }
    serde_json::to_string(preferences).unwrap_or_default()
}

/// Build the recipe-generation prompt.
///
/// An empty ingredient list is allowed and produces a prompt with an empty
/// ingredient clause.
pub fn build_prompt(
    ingredients: &[String],
    preferences: &Map<String, Value>,
    language: &str,
) -> String {
    let ingredients_str = ingredients.join(", ");
    let preferences_str = preferences_blob(preferences);

    if is_vietnamese(language) {
        format!(
            "{}\nTạo công thức nấu ăn từ nguyên liệu: {}. Sở thích: {}.\n\
             Trả lời bằng tiếng Việt với định dạng JSON có cấu trúc như sau:\n{}",
            language_instruction(language),
            ingredients_str,
            preferences_str,
            RECIPE_SHAPE_VI
        )
    } else {
        format!(
            "{}\nCreate a cooking recipe using ingredients: {}. Preferences: {}.\n\
             Return JSON with this structure:\n{}",
            language_instruction(language),
            ingredients_str,
            preferences_str,
            RECIPE_SHAPE_EN
        )
    }
}

/// Build the prompt sent along with a photo of a dish.
pub fn build_vision_prompt(language: &str) -> String {
    let task = if is_vietnamese(language) {
        "Hãy phân tích hình ảnh món ăn này: tên món, nguyên liệu nhìn thấy, \
         phương pháp chế biến, xuất xứ, dinh dưỡng ước tính và gợi ý cải thiện.\n\
         Trả lời bằng JSON với các khóa sau (giá trị bằng tiếng Việt):"
    } else {
        "Analyze this photo of a dish: name, visible ingredients, likely cooking \
         method, origin, estimated nutrition and suggestions for improvement.\n\
         Return JSON with these keys:"
    };

    format!(
        "{}\n{}\n{}",
        language_instruction(language),
        task,
        FOOD_ANALYSIS_SHAPE
    )
}

/// Build a chat prompt from the persona, the recent conversation and the
/// new message.
pub fn build_chat_prompt(message: &str, context: &[ChatTurn], language: &str) -> String {
    let (user_label, assistant_label, question_label) = if is_vietnamese(language) {
        ("Người dùng", "Trợ lý", "Câu hỏi của người dùng")
    } else {
        ("User", "Assistant", "User question")
    };

    let mut lines = vec![language_instruction(language).to_string(), String::new()];

    let start = context.len().saturating_sub(CHAT_CONTEXT_TURNS);
    for turn in &context[start..] {
        if let Some(user) = turn.user.as_deref().filter(|s| !s.is_empty()) {
            lines.push(format!("{}: {}", user_label, user));
        }
        if let Some(assistant) = turn.assistant.as_deref().filter(|s| !s.is_empty()) {
            lines.push(format!("{}: {}", assistant_label, assistant));
        }
    }

    lines.push(format!("{}: {}", question_label, message));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn vietnamese_prompt_lists_ingredients() {
        let prompt = build_prompt(&strings(&["egg", "tomato"]), &Map::new(), "vi");
        assert!(!prompt.is_empty());
        assert!(prompt.contains("egg"));
        assert!(prompt.contains("tomato"));
        assert!(prompt.contains("egg, tomato"));
        assert!(prompt.contains("tiếng Việt"));
    }

    #[test]
    fn english_prompt_embeds_preferences_json() {
        let mut prefs = Map::new();
        prefs.insert("difficulty".into(), json!("easy"));
        prefs.insert("spicy".into(), json!(true));

        let prompt = build_prompt(&strings(&["beef"]), &prefs, "en");
        assert!(prompt.contains("Create a cooking recipe using ingredients: beef."));
        assert!(prompt.contains(r#"{"difficulty":"easy","spicy":true}"#));
        assert!(prompt.contains("\"instructions\""));
    }

    #[test]
    fn preferences_keep_non_ascii_text() {
        let mut prefs = Map::new();
        prefs.insert("vị".into(), json!("cay"));
        let prompt = build_prompt(&strings(&["gà"]), &prefs, "vi");
        assert!(prompt.contains(r#"{"vị":"cay"}"#));
    }

    #[test]
    fn empty_ingredients_still_produce_a_prompt() {
        let prompt = build_prompt(&[], &Map::new(), "en");
        assert!(prompt.contains("ingredients: ."));
    }

    #[test]
    fn other_languages_use_english_template_with_persona() {
        let prompt = build_prompt(&strings(&["tofu"]), &Map::new(), "ja");
        assert!(prompt.starts_with(language_instruction("ja")));
        assert!(prompt.contains("tofu"));
    }

    #[test]
    fn unknown_language_gets_english_persona_and_template() {
        assert_eq!(language_instruction("xx"), language_instruction("en"));
        let prompt = build_prompt(&strings(&["tofu"]), &Map::new(), "xx");
        assert!(prompt.starts_with("You are a smart cooking assistant. Respond in English."));
        assert!(!prompt.contains("tiếng Việt"));
    }

    #[test]
    fn vision_prompt_asks_for_json_in_the_request_language() {
        let vi = build_vision_prompt("vi");
        assert!(vi.starts_with(language_instruction("vi")));
        assert!(vi.contains("\"detected_food\""));

        let en = build_vision_prompt("en");
        assert!(en.contains("Analyze this photo"));
        assert!(!en.contains("tiếng Việt"));
    }

    #[test]
    fn chat_prompt_keeps_only_recent_turns() {
        let context: Vec<ChatTurn> = (0..7)
            .map(|i| ChatTurn {
                user: Some(format!("q{}", i)),
                assistant: Some(format!("a{}", i)),
            })
            .collect();

        let prompt = build_chat_prompt("How do I make pho?", &context, "en");
        assert!(!prompt.contains("q1"));
        assert!(prompt.contains("User: q2"));
        assert!(prompt.contains("Assistant: a6"));
        assert!(prompt.ends_with("User question: How do I make pho?"));
    }

    #[test]
    fn chat_prompt_skips_empty_sides() {
        let context = vec![ChatTurn {
            user: Some("xin chào".into()),
            assistant: None,
        }];
        let prompt = build_chat_prompt("phở", &context, "vi");
        assert!(prompt.contains("Người dùng: xin chào"));
        assert!(!prompt.contains("Trợ lý:"));
    }
}
