use super::lenient;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// What a model recognised in a photo of food.
///
/// Unknown keys such as `confidence` or `region` ride along in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoodAnalysis {
    #[serde(default, deserialize_with = "lenient::string")]
    pub detected_food: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub ingredients: Vec<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub cooking_method: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub origin: Option<String>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub nutrition_estimate: Map<String, Value>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub suggestions: Vec<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub raw_response: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An analysis together with where it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzedImage {
    #[serde(flatten)]
    pub analysis: FoodAnalysis,
    pub model: String,
    pub mock_data: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn loose_shapes_are_accepted() {
        let analysis: FoodAnalysis = serde_json::from_value(json!({
            "detected_food": "Bún chả",
            "ingredients": "bún",
            "nutrition_estimate": "about 500 kcal",
            "confidence": 0.8
        }))
        .unwrap();
        assert_eq!(analysis.ingredients, vec!["bún"]);
        assert_eq!(analysis.nutrition_estimate["summary"], "about 500 kcal");
        assert_eq!(analysis.extra["confidence"], 0.8);
        assert!(analysis.suggestions.is_empty());
    }

    #[test]
    fn extras_serialize_at_the_top_level() {
        let analyzed = AnalyzedImage {
            analysis: FoodAnalysis {
                detected_food: "Phở".into(),
                extra: Map::from_iter([("region".to_string(), json!("mien_bac"))]),
                ..FoodAnalysis::default()
            },
            model: "m".into(),
            mock_data: true,
        };
        let value = serde_json::to_value(&analyzed).unwrap();
        assert_eq!(value["region"], "mien_bac");
        assert_eq!(value["detected_food"], "Phở");
        assert!(value.get("cooking_method").is_none());
    }
}
