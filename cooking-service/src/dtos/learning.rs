use crate::cuisine::learning::{LearningPath, SkillLevel};
use serde::{Deserialize, Serialize};
use validator::Validate;

fn default_skill_level() -> String {
    "beginner".to_string()
}

fn default_cuisine_preference() -> String {
    "vietnamese".to_string()
}

fn default_available_time() -> u32 {
    30
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LearningPathRequest {
    /// Unknown levels are treated as beginner.
    #[serde(default = "default_skill_level")]
    #[validate(length(max = 50))]
    pub skill_level: String,
    #[serde(default = "default_cuisine_preference")]
    #[validate(length(max = 50))]
    pub cuisine_preference: String,
    /// Minutes a day the learner can spend cooking.
    #[serde(default = "default_available_time")]
    #[validate(range(max = 1440))]
    pub available_time: u32,
}

#[derive(Debug, Serialize)]
pub struct CustomizedFor {
    pub skill_level: SkillLevel,
    pub cuisine_preference: String,
    pub available_time: u32,
}

#[derive(Debug, Serialize)]
pub struct LearningPathResponse {
    #[serde(flatten)]
    pub path: LearningPath,
    pub customized_for: CustomizedFor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_field_is_optional() {
        let request: LearningPathRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.skill_level, "beginner");
        assert_eq!(request.cuisine_preference, "vietnamese");
        assert_eq!(request.available_time, 30);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn more_than_a_day_fails_validation() {
        let request: LearningPathRequest =
            serde_json::from_str(r#"{"available_time": 1441}"#).unwrap();
        assert!(request.validate().is_err());
    }
}
