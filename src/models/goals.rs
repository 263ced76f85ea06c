//! Nutrition goals
//!
//! Daily targets produced by the calculator.

use serde::{Deserialize, Serialize};

/// Personalized daily nutrition targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionGoals {
    pub daily_calories: i64, // kcal
    pub protein: i64,        // grams
    pub carbs: i64,          // grams
    pub fats: i64,           // grams
    pub fiber: i64,          // grams (minimum)
    pub sugar: i64,          // grams (max recommended)
    pub sodium: i64,         // milligrams (max recommended)
}

impl NutritionGoals {
    /// Energy implied by the macro targets (4/4/9 kcal per gram)
    pub fn macro_calories(&self) -> i64 {
        self.protein * 4 + self.carbs * 4 + self.fats * 9
    }
}
