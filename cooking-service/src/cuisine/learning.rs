//! Week-by-week cooking curricula per skill level.

use serde::Serialize;

/// Daily practice time, in minutes, below which a path is stretched out.
pub const SHORT_SESSION_MINUTES: u32 = 20;

const SHORT_SESSION_NOTE: &str = "Lộ trình đã được điều chỉnh cho thời gian có hạn";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    /// Parse a level name. Anything unrecognised starts at the beginning.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "intermediate" => SkillLevel::Intermediate,
            "advanced" => SkillLevel::Advanced,
            _ => SkillLevel::Beginner,
        }
    }
}

#[derive(Debug, PartialEq, Serialize)]
pub struct WeekPlan {
    pub week: u32,
    pub title: &'static str,
    pub skills: &'static [&'static str],
    pub practice_dishes: &'static [&'static str],
    pub estimated_time: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LearningPath {
    pub title: &'static str,
    pub duration_weeks: u32,
    pub total_dishes: u32,
    pub weekly_plan: &'static [WeekPlan],
    pub final_goals: &'static [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

const BEGINNER_WEEKS: &[WeekPlan] = &[
    WeekPlan {
        week: 1,
        title: "Làm quen với bếp núc",
        skills: &["Cách cầm dao", "An toàn bếp núc", "Vệ sinh thực phẩm"],
        practice_dishes: &["Trứng chiên", "Canh rau"],
        estimated_time: "2-3 tiếng",
    },
    WeekPlan {
        week: 2,
        title: "Kỹ thuật luộc và xào cơ bản",
        skills: &["Luộc rau", "Xào đơn giản", "Nêm nếm"],
        practice_dishes: &["Rau luộc", "Thịt xào rau củ"],
        estimated_time: "3-4 tiếng",
    },
    WeekPlan {
        week: 3,
        title: "Nấu cơm và canh",
        skills: &["Nấu cơm ngon", "Nấu canh", "Pha nước mắm"],
        practice_dishes: &["Cơm trắng", "Canh chua"],
        estimated_time: "3-4 tiếng",
    },
    WeekPlan {
        week: 4,
        title: "Ướp và nướng",
        skills: &["Ướp thịt", "Nướng cơ bản", "Làm nước chấm"],
        practice_dishes: &["Thịt nướng", "Nước chấm chua ngọt"],
        estimated_time: "4-5 tiếng",
    },
];

const INTERMEDIATE_WEEKS: &[WeekPlan] = &[
    WeekPlan {
        week: 1,
        title: "Kỹ thuật thái chuyên nghiệp",
        skills: &["Thái julienne", "Thái brunoise", "Tốc độ và độ đều"],
        practice_dishes: &["Salad rau củ", "Canh bí đao"],
        estimated_time: "4-5 tiếng",
    },
    WeekPlan {
        week: 2,
        title: "Nấu nước dùng",
        skills: &["Ninh xương", "Nước dùng trong", "Cân bằng vị"],
        practice_dishes: &["Nước dùng phở", "Canh xương"],
        estimated_time: "6-8 tiếng",
    },
];

const ADVANCED_WEEKS: &[WeekPlan] = &[WeekPlan {
    week: 1,
    title: "Nghệ thuật trình bày",
    skills: &["Plating techniques", "Color harmony", "Food styling"],
    practice_dishes: &["Fine dining presentation", "Fusion dishes"],
    estimated_time: "8-10 tiếng",
}];

const BEGINNER: LearningPath = LearningPath {
    title: "Lộ trình nấu ăn cơ bản",
    duration_weeks: 8,
    total_dishes: 16,
    weekly_plan: BEGINNER_WEEKS,
    final_goals: &[
        "Tự tin nấu được 4-5 món cơ bản",
        "Hiểu về an toàn thực phẩm",
        "Biết cách nêm nếm",
    ],
    note: None,
};

const INTERMEDIATE: LearningPath = LearningPath {
    title: "Nâng cao kỹ năng nấu ăn",
    duration_weeks: 12,
    total_dishes: 24,
    weekly_plan: INTERMEDIATE_WEEKS,
    final_goals: &[
        "Thành thạo 15-20 món Việt",
        "Tự sáng tạo biến tấu món ăn",
        "Hiểu về cân bằng dinh dưỡng",
    ],
    note: None,
};

const ADVANCED: LearningPath = LearningPath {
    title: "Đầu bếp chuyên nghiệp",
    duration_weeks: 16,
    total_dishes: 32,
    weekly_plan: ADVANCED_WEEKS,
    final_goals: &[
        "Nấu được món ăn chuyên nghiệp",
        "Sáng tạo công thức riêng",
        "Quản lý bếp hiệu quả",
    ],
    note: None,
};

/// Path for a level, stretched by half (rounded down) when fewer than
/// [`SHORT_SESSION_MINUTES`] a day are available.
pub fn learning_path(level: SkillLevel, available_minutes: u32) -> LearningPath {
    let mut path = match level {
        SkillLevel::Beginner => BEGINNER,
        SkillLevel::Intermediate => INTERMEDIATE,
        SkillLevel::Advanced => ADVANCED,
    };

    if available_minutes < SHORT_SESSION_MINUTES {
        path.duration_weeks = path.duration_weeks * 3 / 2;
        path.note = Some(SHORT_SESSION_NOTE);
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn beginner_path_has_four_weeks_of_practice() {
        let path = learning_path(SkillLevel::Beginner, 30);
        assert_eq!(path.duration_weeks, 8);
        assert_eq!(path.total_dishes, 16);
        assert_eq!(path.weekly_plan.len(), 4);
        assert_eq!(path.weekly_plan[2].practice_dishes, &["Cơm trắng", "Canh chua"]);
        assert!(path.note.is_none());
    }

    #[test]
    fn short_sessions_stretch_the_path() {
        assert_eq!(learning_path(SkillLevel::Beginner, 19).duration_weeks, 12);
        assert_eq!(learning_path(SkillLevel::Intermediate, 10).duration_weeks, 18);
        let advanced = learning_path(SkillLevel::Advanced, 0);
        assert_eq!(advanced.duration_weeks, 24);
        assert_eq!(advanced.note, Some(SHORT_SESSION_NOTE));
    }

    #[test]
    fn twenty_minutes_is_not_short() {
        assert_eq!(learning_path(SkillLevel::Advanced, 20).duration_weeks, 16);
    }

    #[test]
    fn unknown_level_starts_at_beginner() {
        assert_eq!(SkillLevel::from_name("expert"), SkillLevel::Beginner);
        assert_eq!(SkillLevel::from_name(" Advanced "), SkillLevel::Advanced);
        assert_eq!(SkillLevel::from_name(""), SkillLevel::Beginner);
    }
}
