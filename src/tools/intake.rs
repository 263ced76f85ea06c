//! Intake Tools
//!
//! Meal logging and progress against a user's stored goals.

use chrono::NaiveDate;
use serde::Serialize;

use crate::db::{Database, DbError};
use crate::models::{
    day_totals, Intake, MealEntry, MealEntryCreate, MealType, NutritionGoals, UserProfile,
};
use crate::nutrition::{daily_progress, week_start, weekly_progress, DailyProgress, WeeklyProgress};

/// Parse an ISO date, defaulting to today (local time)
pub fn parse_date(date: Option<&str>) -> Result<NaiveDate, String> {
    match date.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| format!("Invalid date '{}', expected YYYY-MM-DD", s)),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

fn validate_intake(intake: &Intake) -> Result<(), String> {
    let fields = [
        ("calories", intake.calories),
        ("protein", intake.protein),
        ("carbs", intake.carbs),
        ("fat", intake.fat),
    ];
    for (name, value) in fields {
        if !value.is_finite() || value < 0.0 {
            return Err(format!("{} must be a non-negative number, got {}", name, value));
        }
    }
    Ok(())
}

/// Response for log_meal
#[derive(Debug, Serialize)]
pub struct LogMealResponse {
    pub entry: MealEntry,
    pub day_totals: Intake,
}

/// Response for list_meals
#[derive(Debug, Serialize)]
pub struct DayMealsResponse {
    pub user_id: String,
    pub date: NaiveDate,
    pub meals: Vec<MealEntry>,
    pub totals: Intake,
}

/// Log a meal for a user
pub fn log_meal(
    db: &Database,
    user_id: &str,
    date: Option<&str>,
    meal_type: Option<&str>,
    name: &str,
    intake: Intake,
) -> Result<LogMealResponse, String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Meal name is required".to_string());
    }
    validate_intake(&intake)?;

    let data = MealEntryCreate {
        date: parse_date(date)?,
        meal_type: meal_type.map(MealType::from_str).unwrap_or(MealType::Unspecified),
        name: name.to_string(),
        intake,
    };

    db.with_conn_mut(|conn| {
        let tx = conn.transaction()?;
        let entry = MealEntry::create(&tx, user_id, &data)?;
        let totals = day_totals(&tx, user_id, entry.date)?;
        tx.commit()?;

        tracing::info!(
            "Logged '{}' for {} on {}: {} kcal (day total {} kcal)",
            entry.name,
            user_id,
            entry.date,
            entry.intake.calories,
            totals.calories
        );
        Ok(LogMealResponse {
            entry,
            day_totals: totals,
        })
    })
    .map_err(|e| format!("Failed to log meal: {}", e))
}

/// Meals and totals for a user's day
pub fn list_meals(db: &Database, user_id: &str, date: Option<&str>) -> Result<DayMealsResponse, String> {
    let date = parse_date(date)?;
    db.with_conn(|conn| {
        let meals = MealEntry::list_for_day(conn, user_id, date)?;
        let totals: Intake = meals.iter().map(|m| m.intake).sum();
        Ok(DayMealsResponse {
            user_id: user_id.to_string(),
            date,
            meals,
            totals,
        })
    })
    .map_err(|e| format!("Failed to list meals: {}", e))
}

/// Delete a logged meal, returning whether it existed
pub fn delete_meal(db: &Database, id: i64) -> Result<bool, String> {
    let deleted = db
        .with_conn(|conn| MealEntry::delete(conn, id))
        .map_err(|e| format!("Failed to delete meal: {}", e))?;
    if deleted {
        tracing::info!("Deleted meal entry {}", id);
    }
    Ok(deleted)
}

/// A user's stored goals; errors when the profile or its goals are missing
fn stored_goals(
    conn: &rusqlite::Connection,
    user_id: &str,
) -> Result<Result<NutritionGoals, String>, DbError> {
    let profile = match UserProfile::get(conn, user_id)? {
        Some(profile) => profile,
        None => return Ok(Err(format!("Profile not found: {}", user_id))),
    };
    Ok(profile.goals.ok_or_else(|| {
        format!("No nutrition goals calculated yet for {}; complete the profile first", user_id)
    }))
}

/// Intake for a day against the stored goals
pub fn get_daily_progress(db: &Database, user_id: &str, date: Option<&str>) -> Result<DailyProgress, String> {
    let date = parse_date(date)?;
    db.with_conn(|conn| {
        let goals = match stored_goals(conn, user_id)? {
            Ok(goals) => goals,
            Err(e) => return Ok(Err(e)),
        };
        let meals = MealEntry::list_for_day(conn, user_id, date)?;
        let intake: Intake = meals.iter().map(|m| m.intake).sum();
        Ok(Ok(daily_progress(date, &intake, &goals, meals.len())))
    })
    .map_err(|e| format!("Database error: {}", e))?
}

/// Calorie totals for the Sunday-to-Saturday week containing `date`
pub fn get_weekly_progress(db: &Database, user_id: &str, date: Option<&str>) -> Result<WeeklyProgress, String> {
    let start = week_start(parse_date(date)?);
    db.with_conn(|conn| {
        let goals = match stored_goals(conn, user_id)? {
            Ok(goals) => goals,
            Err(e) => return Ok(Err(e)),
        };
        let mut calories = [0.0; 7];
        for (offset, kcal) in calories.iter_mut().enumerate() {
            let day = start + chrono::Duration::days(offset as i64);
            *kcal = day_totals(conn, user_id, day)?.calories;
        }
        Ok(Ok(weekly_progress(start, calories, goals.daily_calories)))
    })
    .map_err(|e| format!("Database error: {}", e))?
}
