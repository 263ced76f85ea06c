//! Calculation summary and display formatting

use serde::{Deserialize, Serialize};

use super::calculator::{
    calculate_bmr, calculate_tdee, round_half_up, KCAL_PER_G_CARBS, KCAL_PER_G_FAT,
    KCAL_PER_G_PROTEIN,
};
use crate::models::{NutritionGoals, UserProfileData};

/// Share of calories per macro, in whole percent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroBreakdown {
    pub protein_percent: i64,
    pub carbs_percent: i64,
    pub fats_percent: i64,
}

/// How a set of goals was reached
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionSummary {
    pub bmr: i64,
    pub tdee: i64,
    /// Daily calories minus rounded TDEE
    pub calorie_adjustment: i64,
    /// Grams of protein per kg of body weight, one decimal
    pub protein_per_kg: f64,
    pub macro_breakdown: MacroBreakdown,
}

/// Goals rendered for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedGoals {
    pub calories: String,
    pub protein: String,
    pub carbs: String,
    pub fats: String,
    pub fiber: String,
    pub sugar: String,
    pub sodium: String,
}

fn percent_of(part_kcal: f64, total_kcal: i64) -> i64 {
    if total_kcal == 0 {
        return 0;
    }
    round_half_up(part_kcal / total_kcal as f64 * 100.0)
}

pub fn nutrition_summary(profile: &UserProfileData, goals: &NutritionGoals) -> NutritionSummary {
    let bmr = calculate_bmr(profile.gender, profile.age, profile.weight, profile.height);
    let tdee = round_half_up(calculate_tdee(bmr, profile.activity_level));

    NutritionSummary {
        bmr: round_half_up(bmr),
        tdee,
        calorie_adjustment: goals.daily_calories - tdee,
        protein_per_kg: round_half_up(goals.protein as f64 / profile.weight * 10.0) as f64 / 10.0,
        macro_breakdown: MacroBreakdown {
            protein_percent: percent_of(goals.protein as f64 * KCAL_PER_G_PROTEIN, goals.daily_calories),
            carbs_percent: percent_of(goals.carbs as f64 * KCAL_PER_G_CARBS, goals.daily_calories),
            fats_percent: percent_of(goals.fats as f64 * KCAL_PER_G_FAT, goals.daily_calories),
        },
    }
}

pub fn format_nutrition_goals(goals: &NutritionGoals) -> FormattedGoals {
    FormattedGoals {
        calories: format!("{} kcal", goals.daily_calories),
        protein: format!("{}g", goals.protein),
        carbs: format!("{}g", goals.carbs),
        fats: format!("{}g", goals.fats),
        fiber: format!("{}g", goals.fiber),
        sugar: format!("≤{}g", goals.sugar),
        sodium: format!("≤{}mg", goals.sodium),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityLevel, DietPreference, Gender, Goal};
    use crate::nutrition::calculate_nutrition_goals;

    fn lifter() -> UserProfileData {
        UserProfileData {
            gender: Gender::Male,
            age: 25,
            weight: 80.0,
            height: 180.0,
            activity_level: ActivityLevel::Active,
            goal: Goal::LoseWeight,
            diet_preference: DietPreference::Classic,
        }
    }

    #[test]
    fn test_summary_for_weight_loss() {
        let profile = lifter();
        let goals = calculate_nutrition_goals(&profile);
        let summary = nutrition_summary(&profile, &goals);

        assert_eq!(summary.bmr, 1805);
        assert_eq!(summary.tdee, 3114);
        assert_eq!(summary.calorie_adjustment, -500);
        assert_eq!(goals.protein, 196);
        assert_eq!(summary.protein_per_kg, 2.5);
        assert_eq!(summary.macro_breakdown.protein_percent, 30);
        assert_eq!(summary.macro_breakdown.fats_percent, 22);
        assert_eq!(summary.macro_breakdown.carbs_percent, 48);
    }

    #[test]
    fn test_summary_with_zero_calories() {
        let goals = NutritionGoals {
            daily_calories: 0,
            protein: 0,
            carbs: 0,
            fats: 0,
            fiber: 25,
            sugar: 0,
            sodium: 1200,
        };
        let summary = nutrition_summary(&lifter(), &goals);
        assert_eq!(summary.macro_breakdown.protein_percent, 0);
        assert_eq!(summary.macro_breakdown.carbs_percent, 0);
    }

    #[test]
    fn test_format_goals() {
        let goals = NutritionGoals {
            daily_calories: 2000,
            protein: 150,
            carbs: 200,
            fats: 67,
            fiber: 28,
            sugar: 50,
            sodium: 2300,
        };
        let formatted = format_nutrition_goals(&goals);
        assert_eq!(formatted.calories, "2000 kcal");
        assert_eq!(formatted.protein, "150g");
        assert_eq!(formatted.sugar, "≤50g");
        assert_eq!(formatted.sodium, "≤2300mg");
    }
}
