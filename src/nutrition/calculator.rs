//! Nutrition goal calculator
//!
//! Turns a complete profile into daily targets:
//! BMR (Mifflin-St Jeor) -> TDEE -> goal adjustment -> diet-aware macro split
//! -> fiber/sugar/sodium targets.
//!
//! Everything here is pure arithmetic. No input validation happens at this
//! level; see [`crate::models::ProfileDraft::complete`].

use serde::{Deserialize, Serialize};

use crate::models::{ActivityLevel, DietPreference, Gender, Goal, NutritionGoals, UserProfileData};

// ============================================================================
// Constants
// ============================================================================

/// kcal per gram of protein
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
/// kcal per gram of carbohydrate
pub const KCAL_PER_G_CARBS: f64 = 4.0;
/// kcal per gram of fat
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// Daily deficit for ~1 lb/week loss
pub const LOSE_WEIGHT_DEFICIT: f64 = 500.0;
/// Daily surplus for lean gain
pub const GAIN_WEIGHT_SURPLUS: f64 = 300.0;

pub const LOSS_PROTEIN_BOOST: f64 = 0.05;
pub const LOSS_PROTEIN_CEILING: f64 = 0.35;
pub const LOSS_FAT_REDUCTION: f64 = 0.03;
pub const LOSS_FAT_FLOOR: f64 = 0.20;

pub const FIBER_G_PER_1000_KCAL: f64 = 14.0;
pub const FIBER_FLOOR_G: i64 = 25;
/// Added sugar ceiling as a fraction of calories
pub const SUGAR_CALORIE_FRACTION: f64 = 0.10;
pub const SODIUM_MG_PER_KG: f64 = 15.0;
pub const SODIUM_CEILING_MG: i64 = 2300;

// ============================================================================
// Rounding
// ============================================================================

/// Round half toward positive infinity (`-2.5` -> `-2`, `2.5` -> `3`)
///
/// NaN maps to 0 through the saturating float-to-int cast.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

// ============================================================================
// Energy
// ============================================================================

/// Basal Metabolic Rate via Mifflin-St Jeor
///
/// `Other` shares the female constant.
pub fn calculate_bmr(gender: Gender, age: u32, weight_kg: f64, height_cm: f64) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age);
    match gender {
        Gender::Male => base + 5.0,
        Gender::Female | Gender::Other => base - 161.0,
    }
}

/// TDEE multiplier for an activity level
pub fn activity_multiplier(level: ActivityLevel) -> f64 {
    match level {
        ActivityLevel::Sedentary => 1.2,
        ActivityLevel::Light => 1.375,
        ActivityLevel::Moderate => 1.55,
        ActivityLevel::Active => 1.725,
        ActivityLevel::VeryActive => 1.9,
    }
}

/// Total Daily Energy Expenditure
pub fn calculate_tdee(bmr: f64, level: ActivityLevel) -> f64 {
    bmr * activity_multiplier(level)
}

/// Apply the goal deficit or surplus. The result is not clamped.
pub fn adjust_calories_for_goal(tdee: f64, goal: Goal) -> f64 {
    match goal {
        Goal::LoseWeight => tdee - LOSE_WEIGHT_DEFICIT,
        Goal::GainWeight => tdee + GAIN_WEIGHT_SURPLUS,
        Goal::MaintainWeight => tdee,
    }
}

// ============================================================================
// Macros
// ============================================================================

/// Fractions of total calories per macronutrient
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroSplit {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl MacroSplit {
    /// Build a split where carbs take whatever protein and fat leave
    pub fn new(protein: f64, fat: f64) -> Self {
        Self {
            protein,
            carbs: 1.0 - protein - fat,
            fat,
        }
    }

    pub fn total(&self) -> f64 {
        self.protein + self.carbs + self.fat
    }
}

/// Diet table lookup, before any goal-specific override
pub fn base_split(diet: DietPreference, goal: Goal) -> MacroSplit {
    let gaining = goal == Goal::GainWeight;
    let (protein, fat) = match diet {
        DietPreference::Vegan => (if gaining { 0.18 } else { 0.15 }, 0.25),
        DietPreference::Vegetarian => (if gaining { 0.20 } else { 0.17 }, 0.27),
        DietPreference::Pescatarian => (if gaining { 0.25 } else { 0.20 }, 0.30),
        DietPreference::Classic => (if gaining { 0.30 } else { 0.25 }, 0.25),
    };
    MacroSplit::new(protein, fat)
}

/// Shift calories toward protein when losing weight
///
/// Protein is capped at 35% and fat floored at 20% before carbs are recomputed.
/// Other goals pass through untouched.
pub fn apply_loss_override(split: MacroSplit, goal: Goal) -> MacroSplit {
    if goal != Goal::LoseWeight {
        return split;
    }
    let protein = (split.protein + LOSS_PROTEIN_BOOST).min(LOSS_PROTEIN_CEILING);
    let fat = (split.fat - LOSS_FAT_REDUCTION).max(LOSS_FAT_FLOOR);
    MacroSplit::new(protein, fat)
}

/// Final macro split for a diet and goal
pub fn macro_split(diet: DietPreference, goal: Goal) -> MacroSplit {
    apply_loss_override(base_split(diet, goal), goal)
}

/// Macro targets in grams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroGrams {
    pub protein: i64,
    pub carbs: i64,
    pub fats: i64,
}

/// Convert a split into grams for the given calories
pub fn split_to_grams(calories: f64, split: MacroSplit) -> MacroGrams {
    MacroGrams {
        protein: round_half_up(calories * split.protein / KCAL_PER_G_PROTEIN),
        carbs: round_half_up(calories * split.carbs / KCAL_PER_G_CARBS),
        fats: round_half_up(calories * split.fat / KCAL_PER_G_FAT),
    }
}

pub fn calculate_macros(calories: f64, diet: DietPreference, goal: Goal) -> MacroGrams {
    split_to_grams(calories, macro_split(diet, goal))
}

// ============================================================================
// Additional targets
// ============================================================================

/// Fiber floor, added sugar ceiling, sodium ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalTargets {
    pub fiber: i64,
    pub sugar: i64,
    pub sodium: i64,
}

pub fn calculate_additional_nutrition(calories: f64, weight_kg: f64) -> AdditionalTargets {
    AdditionalTargets {
        fiber: round_half_up(calories / 1000.0 * FIBER_G_PER_1000_KCAL).max(FIBER_FLOOR_G),
        sugar: round_half_up(calories * SUGAR_CALORIE_FRACTION / KCAL_PER_G_CARBS),
        sodium: round_half_up(weight_kg * SODIUM_MG_PER_KG).min(SODIUM_CEILING_MG),
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Calculate the complete set of daily goals for a profile
///
/// Macro and additional targets are derived from the unrounded calorie target;
/// only the reported `daily_calories` is rounded.
pub fn calculate_nutrition_goals(profile: &UserProfileData) -> NutritionGoals {
    let bmr = calculate_bmr(profile.gender, profile.age, profile.weight, profile.height);
    let tdee = calculate_tdee(bmr, profile.activity_level);
    let calories = adjust_calories_for_goal(tdee, profile.goal);

    let macros = calculate_macros(calories, profile.diet_preference, profile.goal);
    let additional = calculate_additional_nutrition(calories, profile.weight);

    NutritionGoals {
        daily_calories: round_half_up(calories),
        protein: macros.protein,
        carbs: macros.carbs,
        fats: macros.fats,
        fiber: additional.fiber,
        sugar: additional.sugar,
        sodium: additional.sodium,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn profile(gender: Gender, diet: DietPreference, goal: Goal) -> UserProfileData {
        UserProfileData {
            gender,
            age: 25,
            weight: 80.0,
            height: 180.0,
            activity_level: ActivityLevel::Active,
            goal,
            diet_preference: diet,
        }
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(2.4999), 2);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.6), -3);
        assert_eq!(round_half_up(f64::NAN), 0);
    }

    #[test]
    fn test_bmr_male_and_female() {
        let male = calculate_bmr(Gender::Male, 30, 70.0, 175.0);
        assert!((male - 1648.75).abs() < EPS);

        let female = calculate_bmr(Gender::Female, 30, 70.0, 175.0);
        assert!((female - 1482.75).abs() < EPS);
    }

    #[test]
    fn test_bmr_other_uses_female_constant() {
        assert_eq!(
            calculate_bmr(Gender::Other, 40, 65.0, 170.0),
            calculate_bmr(Gender::Female, 40, 65.0, 170.0)
        );
    }

    #[test]
    fn test_tdee_multipliers() {
        assert!((calculate_tdee(1500.0, ActivityLevel::Sedentary) - 1800.0).abs() < EPS);
        assert!((calculate_tdee(1500.0, ActivityLevel::Light) - 2062.5).abs() < EPS);
        assert!((calculate_tdee(1500.0, ActivityLevel::Moderate) - 2325.0).abs() < EPS);
        assert!((calculate_tdee(1500.0, ActivityLevel::Active) - 2587.5).abs() < EPS);
        assert!((calculate_tdee(1500.0, ActivityLevel::VeryActive) - 2850.0).abs() < EPS);
    }

    #[test]
    fn test_unknown_activity_uses_moderate_multiplier() {
        let level = ActivityLevel::from_str("marathon every morning");
        assert_eq!(activity_multiplier(level), 1.55);
    }

    #[test]
    fn test_goal_adjustment() {
        assert_eq!(adjust_calories_for_goal(2000.0, Goal::LoseWeight), 1500.0);
        assert_eq!(adjust_calories_for_goal(2000.0, Goal::GainWeight), 2300.0);
        assert_eq!(adjust_calories_for_goal(2000.0, Goal::MaintainWeight), 2000.0);
        assert_eq!(
            adjust_calories_for_goal(2000.0, Goal::from_str("recomp")),
            2000.0
        );
    }

    #[test]
    fn test_goal_adjustment_is_not_clamped() {
        assert_eq!(adjust_calories_for_goal(300.0, Goal::LoseWeight), -200.0);
    }

    #[test]
    fn test_splits_sum_to_one() {
        for diet in DietPreference::ALL {
            for goal in Goal::ALL {
                let split = macro_split(diet, goal);
                assert!(
                    (split.total() - 1.0).abs() < EPS,
                    "{:?}/{:?} sums to {}",
                    diet,
                    goal,
                    split.total()
                );
            }
        }
    }

    #[test]
    fn test_base_split_table() {
        let vegan = base_split(DietPreference::Vegan, Goal::GainWeight);
        assert!((vegan.protein - 0.18).abs() < EPS);
        assert!((vegan.fat - 0.25).abs() < EPS);

        let pescatarian = base_split(DietPreference::Pescatarian, Goal::MaintainWeight);
        assert!((pescatarian.protein - 0.20).abs() < EPS);
        assert!((pescatarian.fat - 0.30).abs() < EPS);
        assert!((pescatarian.carbs - 0.50).abs() < EPS);
    }

    #[test]
    fn test_loss_override_applied_on_top_of_diet() {
        let classic = macro_split(DietPreference::Classic, Goal::LoseWeight);
        assert!((classic.protein - 0.30).abs() < EPS);
        assert!((classic.fat - 0.22).abs() < EPS);
        assert!((classic.carbs - 0.48).abs() < EPS);

        let vegetarian = macro_split(DietPreference::Vegetarian, Goal::LoseWeight);
        assert!((vegetarian.protein - 0.22).abs() < EPS);
        assert!((vegetarian.fat - 0.24).abs() < EPS);
    }

    #[test]
    fn test_loss_override_protein_ceiling() {
        let split = apply_loss_override(MacroSplit::new(0.32, 0.25), Goal::LoseWeight);
        assert_eq!(split.protein, LOSS_PROTEIN_CEILING);
        assert!((split.total() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_loss_override_fat_floor() {
        let split = apply_loss_override(MacroSplit::new(0.25, 0.21), Goal::LoseWeight);
        assert_eq!(split.fat, LOSS_FAT_FLOOR);
        assert!((split.protein - 0.30).abs() < EPS);
        assert!((split.carbs - 0.50).abs() < EPS);
    }

    #[test]
    fn test_loss_override_ignores_other_goals() {
        let split = MacroSplit::new(0.25, 0.25);
        assert_eq!(apply_loss_override(split, Goal::GainWeight), split);
        assert_eq!(apply_loss_override(split, Goal::MaintainWeight), split);
    }

    #[test]
    fn test_additional_targets() {
        let low = calculate_additional_nutrition(1000.0, 50.0);
        assert_eq!(low.fiber, 25);
        assert_eq!(low.sodium, 750);
        assert_eq!(low.sugar, 25);

        let high = calculate_additional_nutrition(3000.0, 200.0);
        assert_eq!(high.fiber, 42);
        assert_eq!(high.sodium, 2300);
        assert_eq!(high.sugar, 75);
    }

    #[test]
    fn test_end_to_end_active_male() {
        let goals = calculate_nutrition_goals(&profile(
            Gender::Male,
            DietPreference::Classic,
            Goal::MaintainWeight,
        ));
        assert_eq!(goals.daily_calories, 3114);
        assert_eq!(goals.protein, 195);
        assert_eq!(goals.carbs, 389);
        // 3113.625 * 0.25 / 9 = 86.49
        assert_eq!(goals.fats, 86);
        assert_eq!(goals.fiber, 44);
        assert_eq!(goals.sugar, 78);
        assert_eq!(goals.sodium, 1200);
    }

    #[test]
    fn test_grams_use_unrounded_calories() {
        // 1879.75 kcal target: 117.48 g protein, but 117.5 g from the rounded 1880
        let p = UserProfileData {
            gender: Gender::Male,
            age: 18,
            weight: 40.0,
            height: 150.0,
            activity_level: ActivityLevel::VeryActive,
            goal: Goal::LoseWeight,
            diet_preference: DietPreference::Pescatarian,
        };
        let goals = calculate_nutrition_goals(&p);
        assert_eq!(goals.daily_calories, 1880);
        assert_eq!(goals.protein, 117);

        let from_rounded = calculate_macros(1880.0, p.diet_preference, p.goal);
        assert_eq!(from_rounded.protein, 118);
    }

    #[test]
    fn test_macro_energy_close_to_calories() {
        for gender in Gender::ALL {
            for diet in DietPreference::ALL {
                for goal in Goal::ALL {
                    let goals = calculate_nutrition_goals(&profile(gender, diet, goal));
                    let diff = (goals.macro_calories() - goals.daily_calories).abs();
                    assert!(diff <= 9, "{:?}/{:?}/{:?} off by {} kcal", gender, diet, goal, diff);
                }
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let p = profile(Gender::Female, DietPreference::Vegan, Goal::GainWeight);
        assert_eq!(calculate_nutrition_goals(&p), calculate_nutrition_goals(&p));
    }

    #[test]
    fn test_unknown_diet_uses_classic_row() {
        let diet = DietPreference::from_str("paleo");
        assert_eq!(
            macro_split(diet, Goal::MaintainWeight),
            macro_split(DietPreference::Classic, Goal::MaintainWeight)
        );
    }
}
