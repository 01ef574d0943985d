use super::{language, lenient};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use validator::Validate;

fn default_cooking_time() -> u32 {
    30
}

fn default_servings() -> u32 {
    4
}

fn default_cuisine() -> String {
    "vietnamese".to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(self, language: &str) -> &'static str {
        match (self, language == "vi") {
            (Difficulty::Easy, true) => "Dễ",
            (Difficulty::Medium, true) => "Trung bình",
            (Difficulty::Hard, true) => "Khó",
            (Difficulty::Easy, false) => "Easy",
            (Difficulty::Medium, false) => "Medium",
            (Difficulty::Hard, false) => "Hard",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecipeRequest {
    #[validate(length(min = 1, message = "at least one ingredient is required"))]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub preferences: Map<String, Value>,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    /// Upper bound on cooking time, in minutes.
    #[serde(default = "default_cooking_time")]
    #[validate(range(min = 5, max = 480))]
    pub cooking_time: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default = "default_cuisine")]
    pub cuisine_type: String,
    #[serde(default = "default_servings")]
    #[validate(range(min = 1, max = 20))]
    pub servings: u32,
    #[serde(
        default = "language::default_language",
        deserialize_with = "language::deserialize"
    )]
    pub language: String,
}

impl RecipeRequest {
    /// Free-form preferences merged with the structured request fields.
    /// Structured fields win over same-named free-form keys.
    pub fn prompt_preferences(&self) -> Map<String, Value> {
        let mut prefs = self.preferences.clone();
        prefs.insert("cooking_time".into(), json!(self.cooking_time));
        prefs.insert("difficulty".into(), json!(self.difficulty));
        prefs.insert("cuisine_type".into(), json!(self.cuisine_type));
        prefs.insert("servings".into(), json!(self.servings));
        if !self.dietary_restrictions.is_empty() {
            prefs.insert(
                "dietary_restrictions".into(),
                json!(self.dietary_restrictions),
            );
        }
        prefs
    }

    /// Ingredients with surrounding whitespace removed and blanks dropped.
    pub fn clean_ingredients(&self) -> Vec<String> {
        self.ingredients
            .iter()
            .map(|i| i.trim())
            .filter(|i| !i.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Fixed-shape recipe produced from free-form model output.
///
/// Keys the model adds beyond the known fields are kept in `extra` and
/// serialized back at the top level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRecord {
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub cooking_time: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub difficulty: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_u32",
        skip_serializing_if = "Option::is_none"
    )]
    pub servings: Option<u32>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub ingredients: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub instructions: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub tips: Vec<String>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub nutrition: Map<String, Value>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub language: String,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub raw_response: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A recipe together with where it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedRecipe {
    #[serde(flatten)]
    pub recipe: RecipeRecord,
    pub ai_model: String,
    pub mock_data: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(body: Value) -> RecipeRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn defaults_fill_optional_fields() {
        let req = request(json!({"ingredients": ["gà"]}));
        assert_eq!(req.cooking_time, 30);
        assert_eq!(req.servings, 4);
        assert_eq!(req.difficulty, Difficulty::Medium);
        assert_eq!(req.language, "vi");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn empty_ingredients_fail_validation() {
        let req = request(json!({"ingredients": []}));
        assert!(req.validate().is_err());
    }

    #[test]
    fn out_of_range_numbers_fail_validation() {
        assert!(request(json!({"ingredients": ["a"], "servings": 0})).validate().is_err());
        assert!(request(json!({"ingredients": ["a"], "servings": 21})).validate().is_err());
        assert!(request(json!({"ingredients": ["a"], "cooking_time": 4})).validate().is_err());
        assert!(request(json!({"ingredients": ["a"], "cooking_time": 481})).validate().is_err());
    }

    #[test]
    fn structured_fields_override_free_form_preferences() {
        let req = request(json!({
            "ingredients": ["beef"],
            "preferences": {"servings": 99, "spicy": true},
            "servings": 2,
            "difficulty": "easy",
            "dietary_restrictions": ["no peanuts"]
        }));
        let prefs = req.prompt_preferences();
        assert_eq!(prefs["servings"], 2);
        assert_eq!(prefs["spicy"], true);
        assert_eq!(prefs["difficulty"], "easy");
        assert_eq!(prefs["dietary_restrictions"], json!(["no peanuts"]));
    }

    #[test]
    fn blank_ingredients_are_dropped() {
        let req = request(json!({"ingredients": [" trứng ", "", "  "]}));
        assert_eq!(req.clean_ingredients(), vec!["trứng".to_string()]);
    }

    #[test]
    fn difficulty_labels_are_localized() {
        assert_eq!(Difficulty::Hard.label("vi"), "Khó");
        assert_eq!(Difficulty::Hard.label("en"), "Hard");
    }

    #[test]
    fn generated_recipe_flattens_the_record() {
        let record: RecipeRecord = serde_json::from_value(json!({"title": "Phở"})).unwrap();
        let generated = GeneratedRecipe {
            recipe: record,
            ai_model: "Mock Service".into(),
            mock_data: true,
        };
        let value = serde_json::to_value(&generated).unwrap();
        assert_eq!(value["title"], "Phở");
        assert_eq!(value["mock_data"], true);
        assert!(value.get("recipe").is_none());
    }
}
