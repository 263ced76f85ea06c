//! Nutrition calculation module
//!
//! Goal calculation, intake progress, diet recommendations, and unit conversions.

pub mod calculator;
pub mod progress;
pub mod recommendations;
pub mod summary;
pub mod units;

pub use calculator::{
    activity_multiplier, adjust_calories_for_goal, apply_loss_override, base_split,
    calculate_additional_nutrition, calculate_bmr, calculate_macros, calculate_nutrition_goals,
    calculate_tdee, macro_split, round_half_up, AdditionalTargets, MacroGrams, MacroSplit,
};
pub use progress::{daily_progress, progress, week_start, weekly_progress, DailyProgress, DayCalories, Progress, WeeklyProgress};
pub use recommendations::{get_diet_recommendations, get_diet_recommendations_for, DietRecommendations};
pub use summary::{format_nutrition_goals, nutrition_summary, FormattedGoals, MacroBreakdown, NutritionSummary};
pub use units::{
    convert_height_to_cm, convert_weight_to_kg, feet_inches_to_cm, pounds_to_kg, HeightInput,
    HeightUnit, WeightUnit,
};
