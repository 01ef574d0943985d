//! Rough nutrition estimate from ingredient names.
//!
//! Each ingredient counts as a 100 g portion of the first table entry whose
//! key appears in its lowercased name.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Nutrients {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub fiber: f64,
}

impl Nutrients {
    const fn new(calories: f64, protein: f64, fat: f64, carbs: f64, fiber: f64) -> Self {
        Nutrients {
            calories,
            protein,
            fat,
            carbs,
            fiber,
        }
    }

    fn add(&mut self, other: &Nutrients) {
        self.calories += other.calories;
        self.protein += other.protein;
        self.fat += other.fat;
        self.carbs += other.carbs;
        self.fiber += other.fiber;
    }

    fn per_serving(&self, servings: u32) -> Nutrients {
        let share = |v: f64| round1(v / f64::from(servings));
        Nutrients {
            calories: share(self.calories),
            protein: share(self.protein),
            fat: share(self.fat),
            carbs: share(self.carbs),
            fiber: share(self.fiber),
        }
    }
}

/// Per 100 g, in match order.
const TABLE: [(&str, Nutrients); 8] = [
    ("thịt bò", Nutrients::new(250.0, 26.0, 15.0, 0.0, 0.0)),
    ("thịt heo", Nutrients::new(242.0, 27.0, 14.0, 0.0, 0.0)),
    ("gà", Nutrients::new(165.0, 31.0, 3.6, 0.0, 0.0)),
    ("tôm", Nutrients::new(85.0, 20.0, 0.3, 0.0, 0.0)),
    ("cá", Nutrients::new(206.0, 22.0, 12.0, 0.0, 0.0)),
    ("cơm", Nutrients::new(130.0, 2.7, 0.3, 28.0, 0.4)),
    ("bánh phở", Nutrients::new(109.0, 0.9, 0.2, 25.0, 0.9)),
    ("rau", Nutrients::new(25.0, 2.0, 0.2, 5.0, 2.0)),
];

/// Profile used for ingredients missing from the table.
pub const DEFAULT_PROFILE: Nutrients = Nutrients::new(50.0, 2.0, 1.0, 8.0, 1.0);

const POINTS_PER_CHECK: u32 = 25;

#[derive(Debug, Error, PartialEq)]
pub enum NutritionError {
    #[error("servings must be at least 1")]
    ZeroServings,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientNutrition {
    pub name: String,
    pub nutrition_per_100g: Nutrients,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthAssessment {
    pub score: u32,
    pub grade: char,
    pub recommendations: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutritionAnalysis {
    pub per_serving: Nutrients,
    pub total_dish: Nutrients,
    pub servings: u32,
    pub detailed_ingredients: Vec<IngredientNutrition>,
    pub health_assessment: HealthAssessment,
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Table entry for one ingredient name.
pub fn lookup(ingredient: &str) -> Nutrients {
    let lowered = ingredient.to_lowercase();
    TABLE
        .iter()
        .find(|(key, _)| lowered.contains(key))
        .map(|(_, n)| *n)
        .unwrap_or(DEFAULT_PROFILE)
}

pub fn grade(score: u32) -> char {
    match score {
        s if s >= 80 => 'A',
        s if s >= 60 => 'B',
        _ => 'C',
    }
}

fn assess(per_serving: &Nutrients, language: &str) -> HealthAssessment {
    let vi = language == "vi";
    let checks = [
        (
            per_serving.protein >= 20.0,
            if vi {
                "Tăng thêm protein từ thịt, cá hoặc đậu"
            } else {
                "Add more protein from meat, fish or beans"
            },
        ),
        (
            per_serving.fiber >= 5.0,
            if vi {
                "Thêm rau xanh và trái cây để tăng chất xơ"
            } else {
                "Add greens and fruit for more fiber"
            },
        ),
        (
            per_serving.calories <= 600.0,
            if vi {
                "Giảm lượng dầu mỡ để kiểm soát calo"
            } else {
                "Use less oil to keep calories in check"
            },
        ),
        (
            per_serving.fat <= 20.0,
            if vi {
                "Hạn chế dầu mỡ, chọn phương pháp nấu ít dầu"
            } else {
                "Limit fat and prefer low-oil cooking methods"
            },
        ),
    ];

    let mut score = 0;
    let mut recommendations = Vec::new();
    for (passed, advice) in checks {
        if passed {
            score += POINTS_PER_CHECK;
        } else {
            recommendations.push(advice);
        }
    }

    HealthAssessment {
        score,
        grade: grade(score),
        recommendations,
    }
}

pub fn analyze(
    ingredients: &[String],
    servings: u32,
    language: &str,
) -> Result<NutritionAnalysis, NutritionError> {
    if servings == 0 {
        return Err(NutritionError::ZeroServings);
    }

    let mut total = Nutrients::default();
    let detailed_ingredients = ingredients
        .iter()
        .map(|name| {
            let profile = lookup(name);
            total.add(&profile);
            IngredientNutrition {
                name: name.clone(),
                nutrition_per_100g: profile,
            }
        })
        .collect();

    let per_serving = total.per_serving(servings);
    let health_assessment = assess(&per_serving, language);

    Ok(NutritionAnalysis {
        per_serving,
        total_dish: total,
        servings,
        detailed_ingredients,
        health_assessment,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn matches_by_substring_case_insensitively() {
        assert_eq!(lookup("Thịt Bò Úc").calories, 250.0);
        assert_eq!(lookup("rau muống").fiber, 2.0);
        assert_eq!(lookup("durian"), DEFAULT_PROFILE);
    }

    #[test]
    fn first_table_entry_wins() {
        // "thịt bò" precedes "cá" in the table
        assert_eq!(lookup("thịt bò kho cá").calories, 250.0);
    }

    #[test]
    fn per_serving_is_rounded_to_one_decimal() {
        let analysis = analyze(&names(&["gà"]), 3, "vi").unwrap();
        assert_eq!(analysis.total_dish.fat, 3.6);
        assert_eq!(analysis.per_serving.fat, 1.2);
        assert_eq!(analysis.per_serving.calories, 55.0);
    }

    #[test]
    fn lean_high_fiber_meal_scores_a() {
        let analysis = analyze(&names(&["gà", "rau", "rau", "rau"]), 1, "en").unwrap();
        // protein 37, fiber 6, calories 240, fat 4.2
        assert_eq!(analysis.health_assessment.score, 100);
        assert_eq!(analysis.health_assessment.grade, 'A');
        assert!(analysis.health_assessment.recommendations.is_empty());
    }

    #[test]
    fn starchy_meal_scores_c() {
        let analysis = analyze(&names(&["cơm"]), 1, "vi").unwrap();
        assert_eq!(analysis.health_assessment.score, 50);
        assert_eq!(analysis.health_assessment.grade, 'C');
        assert_eq!(analysis.health_assessment.recommendations.len(), 2);
        assert!(analysis.health_assessment.recommendations[0].contains("protein"));
    }

    #[test]
    fn grade_boundaries() {
        assert_eq!(grade(100), 'A');
        assert_eq!(grade(80), 'A');
        assert_eq!(grade(75), 'B');
        assert_eq!(grade(60), 'B');
        assert_eq!(grade(50), 'C');
        assert_eq!(grade(0), 'C');
    }

    #[test]
    fn zero_servings_is_rejected() {
        assert_eq!(
            analyze(&names(&["gà"]), 0, "vi"),
            Err(NutritionError::ZeroServings)
        );
    }

    #[test]
    fn no_ingredients_gives_zero_totals() {
        let analysis = analyze(&[], 4, "vi").unwrap();
        assert_eq!(analysis.total_dish, Nutrients::default());
        assert!(analysis.detailed_ingredients.is_empty());
    }
}
