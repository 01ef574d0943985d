//! Turning free-form model output into a [`RecipeRecord`] or [`FoodAnalysis`].

use crate::models::{FoodAnalysis, RecipeRecord};
use serde_json::{Map, Value, json};

const SUMMARY_CHARS: usize = 200;

/// Locate a JSON object embedded in arbitrary text.
///
/// The widest span from the first `{` to the last `}` is tried first, which
/// covers prose or markdown fences wrapped around a single object. When that
/// span does not parse, the first complete object starting at any `{` wins.
pub fn extract_json_object(text: &str) -> Option<Map<String, Value>> {
    let start = text.find('{')?;
    if let Some(end) = text.rfind('}').filter(|end| *end > start) {
        if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(&text[start..=end]) {
            return Some(map);
        }
    }

    text.match_indices('{').find_map(|(offset, _)| {
        serde_json::Deserializer::from_str(&text[offset..])
            .into_iter::<Map<String, Value>>()
            .next()
            .and_then(Result::ok)
    })
}

/// Normalize raw model output. Never fails: text without a usable object
/// becomes a fallback record carrying the text verbatim.
pub fn normalize(raw_text: &str, language: &str) -> RecipeRecord {
    if let Some(object) = extract_json_object(raw_text) {
        match serde_json::from_value::<RecipeRecord>(Value::Object(object)) {
            Ok(mut record) => {
                record.language = language.to_string();
                if record.title.trim().is_empty() {
                    record.title = default_title(language).to_string();
                }
                return record;
            }
            Err(e) => {
                tracing::debug!(error = %e, "Embedded JSON does not fit the recipe shape");
            }
        }
    }

    tracing::debug!(
        raw_len = raw_text.len(),
        "No recipe object in model output, using fallback"
    );
    fallback_record(raw_text, language)
}

pub fn default_title(language: &str) -> &'static str {
    if language == "vi" {
        "Món ăn ngon từ AI"
    } else {
        "AI Generated Recipe"
    }
}

/// Record built around unstructured text.
pub fn fallback_record(raw_text: &str, language: &str) -> RecipeRecord {
    let vi = language == "vi";
    let nutrition = match json!({"calories": 0, "protein": "0g", "carbs": "0g", "fat": "0g"}) {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    RecipeRecord {
        title: default_title(language).to_string(),
        description: summarize(raw_text),
        cooking_time: Some(if vi { "30 phút" } else { "30 minutes" }.to_string()),
        difficulty: Some(if vi { "Trung bình" } else { "Medium" }.to_string()),
        servings: Some(4),
        ingredients: Vec::new(),
        instructions: vec![raw_text.to_string()],
        tips: Vec::new(),
        nutrition,
        language: language.to_string(),
        raw_response: Some(raw_text.to_string()),
        extra: Map::new(),
    }
}

/// Normalize raw output of an image analysis. Text without a usable object
/// is kept as the description.
pub fn normalize_food_analysis(raw_text: &str, language: &str) -> FoodAnalysis {
    if let Some(object) = extract_json_object(raw_text) {
        match serde_json::from_value::<FoodAnalysis>(Value::Object(object)) {
            Ok(mut analysis) => {
                if analysis.detected_food.trim().is_empty() {
                    analysis.detected_food = unknown_food(language).to_string();
                }
                return analysis;
            }
            Err(e) => {
                tracing::debug!(error = %e, "Embedded JSON does not fit the food analysis shape");
            }
        }
    }

    FoodAnalysis {
        detected_food: unknown_food(language).to_string(),
        description: summarize(raw_text),
        raw_response: Some(raw_text.to_string()),
        ..FoodAnalysis::default()
    }
}

fn unknown_food(language: &str) -> &'static str {
    if language == "vi" {
        "Món ăn chưa xác định"
    } else {
        "Unidentified dish"
    }
}

fn summarize(text: &str) -> String {
    match text.char_indices().nth(SUMMARY_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_clean_object() {
        let record = normalize(
            r#"{"title":"Phở","ingredients":["bánh phở","thịt bò"],"servings":4}"#,
            "vi",
        );
        assert_eq!(record.title, "Phở");
        assert_eq!(record.ingredients, vec!["bánh phở", "thịt bò"]);
        assert_eq!(record.servings, Some(4));
        assert_eq!(record.language, "vi");
        assert_eq!(record.raw_response, None);
    }

    #[test]
    fn object_inside_prose_and_fences_is_found() {
        let raw = "Here you go:\n```json\n{\"title\": \"Bánh xèo\", \"tips\": \"Use a hot pan\"}\n```\nEnjoy!";
        let record = normalize(raw, "en");
        assert_eq!(record.title, "Bánh xèo");
        assert_eq!(record.tips, vec!["Use a hot pan"]);
        assert_eq!(record.language, "en");
    }

    #[test]
    fn stray_braces_after_the_object_fall_back_to_first_complete_object() {
        let raw = r#"{"title": "Gỏi cuốn"} and later an unmatched } brace"#;
        let record = normalize(raw, "vi");
        assert_eq!(record.title, "Gỏi cuốn");
    }

    #[test]
    fn text_without_json_becomes_fallback() {
        let record = normalize("no json here", "en");
        assert_eq!(record.instructions, vec!["no json here"]);
        assert!(record.ingredients.is_empty());
        assert!(record.tips.is_empty());
        assert_eq!(record.title, "AI Generated Recipe");
        assert_eq!(record.cooking_time.as_deref(), Some("30 minutes"));
        assert_eq!(record.nutrition["calories"], 0);
        assert_eq!(record.raw_response.as_deref(), Some("no json here"));
    }

    #[test]
    fn truncated_json_becomes_fallback() {
        let raw = r#"{"title": "Phở", "ingredients": ["bò""#;
        let record = normalize(raw, "vi");
        assert_eq!(record.title, "Món ăn ngon từ AI");
        assert_eq!(record.difficulty.as_deref(), Some("Trung bình"));
        assert_eq!(record.instructions, vec![raw.to_string()]);
    }

    #[test]
    fn unusable_shape_becomes_fallback() {
        let raw = r#"{"title": ["not", "a", "string"]}"#;
        let record = normalize(raw, "en");
        assert_eq!(record.instructions, vec![raw.to_string()]);
    }

    #[test]
    fn long_text_is_summarized_on_char_boundary() {
        let raw = "ă".repeat(250);
        let record = normalize(&raw, "vi");
        assert_eq!(record.description.chars().count(), SUMMARY_CHARS + 3);
        assert!(record.description.ends_with("..."));
    }

    #[test]
    fn missing_title_gets_localized_default() {
        let record = normalize(r#"{"ingredients": ["tôm"]}"#, "vi");
        assert_eq!(record.title, "Món ăn ngon từ AI");
    }

    #[test]
    fn unknown_keys_survive() {
        let record = normalize(r#"{"title": "Chè", "region": "mien_nam"}"#, "vi");
        assert_eq!(record.extra["region"], "mien_nam");
    }

    #[test]
    fn normalizing_a_serialized_record_reproduces_it() {
        let inputs = [
            r#"{"title":"Phở","cooking_time":45,"servings":"2","nutrition":{"calories":420},"spice":"mild"}"#,
            "free text answer",
        ];
        for raw in inputs {
            let record = normalize(raw, "vi");
            let serialized = serde_json::to_string(&record).unwrap();
            assert_eq!(normalize(&serialized, "vi"), record, "{raw}");
        }
    }

    #[test]
    fn food_analysis_is_read_from_fenced_json() {
        let raw = "```json\n{\"detected_food\": \"Bánh xèo\", \"ingredients\": [\"bột gạo\", \"tôm\"]}\n```";
        let analysis = normalize_food_analysis(raw, "vi");
        assert_eq!(analysis.detected_food, "Bánh xèo");
        assert_eq!(analysis.ingredients, vec!["bột gạo", "tôm"]);
        assert_eq!(analysis.raw_response, None);
    }

    #[test]
    fn food_analysis_without_json_keeps_the_text() {
        let analysis = normalize_food_analysis("Looks like a bowl of noodles", "en");
        assert_eq!(analysis.detected_food, "Unidentified dish");
        assert_eq!(analysis.description, "Looks like a bowl of noodles");
        assert_eq!(
            analysis.raw_response.as_deref(),
            Some("Looks like a bowl of noodles")
        );
    }

    #[test]
    fn extractor_ignores_non_object_json() {
        assert!(extract_json_object("[1, 2, 3]").is_none());
        assert!(extract_json_object("").is_none());
    }
}
