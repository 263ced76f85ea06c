//! Intake progress against daily goals
//!
//! Remaining amounts never go below zero and percentages are capped at 100.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::calculator::round_half_up;
use crate::models::{Intake, NutritionGoals};

const DAYS_PER_WEEK: usize = 7;

/// Consumption of one nutrient against its target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub consumed: f64,
    pub target: i64,
    pub remaining: f64,
    /// Share of the target eaten, 0-100, one decimal
    pub percent: f64,
    pub exceeded: bool,
}

/// Compare an amount eaten with a target
///
/// A target of zero or less is fully met by any intake at all.
pub fn progress(consumed: f64, target: i64) -> Progress {
    let target_f = target as f64;
    let percent = if target <= 0 {
        if consumed > 0.0 { 100.0 } else { 0.0 }
    } else {
        (consumed / target_f * 100.0).min(100.0)
    };

    Progress {
        consumed,
        target,
        remaining: (target_f - consumed).max(0.0),
        percent: round_half_up(percent * 10.0) as f64 / 10.0,
        exceeded: consumed > target_f,
    }
}

/// A day's intake against the stored goals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyProgress {
    pub date: NaiveDate,
    pub meals_logged: usize,
    pub calories: Progress,
    pub protein: Progress,
    pub carbs: Progress,
    pub fat: Progress,
}

pub fn daily_progress(
    date: NaiveDate,
    intake: &Intake,
    goals: &NutritionGoals,
    meals_logged: usize,
) -> DailyProgress {
    DailyProgress {
        date,
        meals_logged,
        calories: progress(intake.calories, goals.daily_calories),
        protein: progress(intake.protein, goals.protein),
        carbs: progress(intake.carbs, goals.carbs),
        fat: progress(intake.fat, goals.fats),
    }
}

/// Calories for one day of a week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayCalories {
    pub date: NaiveDate,
    pub weekday: String,
    pub calories: f64,
    pub percent: f64,
}

/// Sunday-to-Saturday calorie overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyProgress {
    pub week_start: NaiveDate,
    pub daily_calorie_goal: i64,
    pub days: Vec<DayCalories>,
    /// Mean over all seven days, including days with nothing logged
    pub average_calories: i64,
}

/// Sunday on or before `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// Build the week overview from per-day calorie totals, Sunday first
pub fn weekly_progress(week_start: NaiveDate, calories: [f64; DAYS_PER_WEEK], daily_goal: i64) -> WeeklyProgress {
    let days = calories
        .iter()
        .enumerate()
        .map(|(offset, &kcal)| {
            let date = week_start + Duration::days(offset as i64);
            DayCalories {
                date,
                weekday: date.format("%a").to_string(),
                calories: kcal,
                percent: progress(kcal, daily_goal).percent,
            }
        })
        .collect();

    let total: f64 = calories.iter().sum();
    WeeklyProgress {
        week_start,
        daily_calorie_goal: daily_goal,
        days,
        average_calories: round_half_up(total / DAYS_PER_WEEK as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goals() -> NutritionGoals {
        NutritionGoals {
            daily_calories: 2000,
            protein: 150,
            carbs: 200,
            fats: 67,
            fiber: 28,
            sugar: 50,
            sodium: 2300,
        }
    }

    #[test]
    fn test_progress_partial() {
        let p = progress(500.0, 2000);
        assert_eq!(p.remaining, 1500.0);
        assert_eq!(p.percent, 25.0);
        assert!(!p.exceeded);
    }

    #[test]
    fn test_progress_over_target_is_clamped() {
        let p = progress(2600.0, 2000);
        assert_eq!(p.remaining, 0.0);
        assert_eq!(p.percent, 100.0);
        assert!(p.exceeded);
        assert_eq!(p.consumed, 2600.0);
    }

    #[test]
    fn test_progress_zero_target() {
        let nothing = progress(0.0, 0);
        assert_eq!(nothing.percent, 0.0);
        assert_eq!(nothing.remaining, 0.0);
        assert!(!nothing.exceeded);

        let something = progress(120.0, 0);
        assert_eq!(something.percent, 100.0);
        assert_eq!(something.remaining, 0.0);
        assert!(something.exceeded);
    }

    #[test]
    fn test_progress_percent_one_decimal() {
        assert_eq!(progress(1.0, 3).percent, 33.3);
    }

    #[test]
    fn test_daily_progress_per_macro() {
        let intake = Intake {
            calories: 1500.0,
            protein: 160.0,
            carbs: 100.0,
            fat: 33.5,
        };
        let date = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
        let day = daily_progress(date, &intake, &goals(), 3);

        assert_eq!(day.meals_logged, 3);
        assert_eq!(day.calories.remaining, 500.0);
        assert_eq!(day.calories.percent, 75.0);
        assert_eq!(day.protein.percent, 100.0);
        assert!(day.protein.exceeded);
        assert_eq!(day.carbs.percent, 50.0);
        assert_eq!(day.fat.target, 67);
        assert_eq!(day.fat.percent, 50.0);
    }

    #[test]
    fn test_week_starts_on_sunday() {
        // 2025-03-05 is a Wednesday
        let wednesday = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        let sunday = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        assert_eq!(week_start(wednesday), sunday);
        assert_eq!(week_start(sunday), sunday);
    }

    #[test]
    fn test_weekly_progress() {
        let sunday = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        let week = weekly_progress(sunday, [2000.0, 1000.0, 0.0, 3000.0, 0.0, 0.0, 500.0], 2000);

        assert_eq!(week.days.len(), 7);
        assert_eq!(week.days[0].weekday, "Sun");
        assert_eq!(week.days[6].date, NaiveDate::from_ymd_opt(2025, 3, 8).unwrap());
        assert_eq!(week.days[1].percent, 50.0);
        assert_eq!(week.days[3].percent, 100.0);
        // 6500 / 7 = 928.57
        assert_eq!(week.average_calories, 929);
    }
}
