//! Meal Entry model
//!
//! A logged meal with its energy and macros, filed under a user and a day.

use std::iter::Sum;
use std::ops::Add;

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};

/// Meal type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    Unspecified,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
            MealType::Unspecified => "unspecified",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => MealType::Breakfast,
            "lunch" => MealType::Lunch,
            "dinner" => MealType::Dinner,
            "snack" => MealType::Snack,
            _ => MealType::Unspecified,
        }
    }
}

/// Energy and macros eaten
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Intake {
    pub calories: f64,
    pub protein: f64, // grams
    pub carbs: f64,   // grams
    pub fat: f64,     // grams
}

impl Intake {
    pub fn zero() -> Self {
        Self::default()
    }
}

impl Add for Intake {
    type Output = Intake;

    fn add(self, other: Intake) -> Intake {
        Intake {
            calories: self.calories + other.calories,
            protein: self.protein + other.protein,
            carbs: self.carbs + other.carbs,
            fat: self.fat + other.fat,
        }
    }
}

impl Sum for Intake {
    fn sum<I: Iterator<Item = Intake>>(iter: I) -> Intake {
        iter.fold(Intake::zero(), Add::add)
    }
}

/// A logged meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealEntry {
    pub id: i64,
    pub user_id: String,
    pub date: NaiveDate,
    pub meal_type: MealType,
    pub name: String,
    pub intake: Intake,
    pub created_at: String,
}

/// Data for logging a meal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealEntryCreate {
    pub date: NaiveDate,
    pub meal_type: MealType,
    pub name: String,
    pub intake: Intake,
}

impl MealEntry {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let meal_type: String = row.get("meal_type")?;
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            date: row.get("date")?,
            meal_type: MealType::from_str(&meal_type),
            name: row.get("name")?,
            intake: Intake {
                calories: row.get("calories")?,
                protein: row.get("protein")?,
                carbs: row.get("carbs")?,
                fat: row.get("fat")?,
            },
            created_at: row.get("created_at")?,
        })
    }

    /// Log a meal for a user; the profile row must exist
    pub fn create(conn: &Connection, user_id: &str, data: &MealEntryCreate) -> DbResult<Self> {
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM user_profiles WHERE user_id = ?1)",
            [user_id],
            |row| row.get(0),
        )?;
        if !exists {
            return Err(DbError::ProfileNotFound(user_id.to_string()));
        }

        conn.execute(
            r#"
            INSERT INTO meal_entries (user_id, date, meal_type, name, calories, protein, carbs, fat)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                user_id,
                data.date,
                data.meal_type.as_str(),
                data.name,
                data.intake.calories,
                data.intake.protein,
                data.intake.carbs,
                data.intake.fat,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?
            .ok_or(DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let entry = conn
            .query_row("SELECT * FROM meal_entries WHERE id = ?1", [id], Self::from_row)
            .optional()?;
        Ok(entry)
    }

    /// All meals a user logged on a day, in logging order
    pub fn list_for_day(conn: &Connection, user_id: &str, date: NaiveDate) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM meal_entries WHERE user_id = ?1 AND date = ?2 ORDER BY id",
        )?;
        let entries = stmt
            .query_map(params![user_id, date], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    /// Delete a meal entry, returning whether a row was removed
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM meal_entries WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }
}

/// Total intake for a user's day
pub fn day_totals(conn: &Connection, user_id: &str, date: NaiveDate) -> DbResult<Intake> {
    let entries = MealEntry::list_for_day(conn, user_id, date)?;
    Ok(entries.iter().map(|e| e.intake).sum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::models::{ProfileDraft, UserProfile};

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        run_migrations(&conn).unwrap();
        UserProfile::upsert_profile(&conn, "ana", &ProfileDraft::default(), None).unwrap();
        conn
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn meal(date: NaiveDate, name: &str, calories: f64, protein: f64, carbs: f64, fat: f64) -> MealEntryCreate {
        MealEntryCreate {
            date,
            meal_type: MealType::Lunch,
            name: name.to_string(),
            intake: Intake {
                calories,
                protein,
                carbs,
                fat,
            },
        }
    }

    #[test]
    fn test_create_and_list() {
        let conn = setup();
        let entry = MealEntry::create(&conn, "ana", &meal(day(4), "Oats", 350.0, 12.0, 60.0, 7.0)).unwrap();
        assert_eq!(entry.user_id, "ana");
        assert_eq!(entry.date, day(4));
        assert_eq!(entry.meal_type, MealType::Lunch);

        MealEntry::create(&conn, "ana", &meal(day(5), "Pasta", 700.0, 25.0, 110.0, 15.0)).unwrap();

        let listed = MealEntry::list_for_day(&conn, "ana", day(4)).unwrap();
        assert_eq!(listed, vec![entry]);
    }

    #[test]
    fn test_create_requires_profile() {
        let conn = setup();
        let err = MealEntry::create(&conn, "nobody", &meal(day(4), "Toast", 200.0, 6.0, 30.0, 4.0)).unwrap_err();
        assert!(matches!(err, DbError::ProfileNotFound(ref id) if id == "nobody"));
    }

    #[test]
    fn test_day_totals() {
        let conn = setup();
        assert_eq!(day_totals(&conn, "ana", day(4)).unwrap(), Intake::zero());

        MealEntry::create(&conn, "ana", &meal(day(4), "Eggs", 210.0, 18.0, 1.5, 14.0)).unwrap();
        MealEntry::create(&conn, "ana", &meal(day(4), "Rice bowl", 640.0, 30.0, 95.0, 12.0)).unwrap();
        MealEntry::create(&conn, "ana", &meal(day(6), "Pizza", 900.0, 35.0, 100.0, 38.0)).unwrap();

        let totals = day_totals(&conn, "ana", day(4)).unwrap();
        assert_eq!(totals.calories, 850.0);
        assert_eq!(totals.protein, 48.0);
        assert_eq!(totals.carbs, 96.5);
        assert_eq!(totals.fat, 26.0);
    }

    #[test]
    fn test_delete_and_cascade() {
        let conn = setup();
        let entry = MealEntry::create(&conn, "ana", &meal(day(4), "Soup", 180.0, 8.0, 20.0, 6.0)).unwrap();
        assert!(MealEntry::delete(&conn, entry.id).unwrap());
        assert!(!MealEntry::delete(&conn, entry.id).unwrap());

        MealEntry::create(&conn, "ana", &meal(day(4), "Salad", 250.0, 9.0, 15.0, 17.0)).unwrap();
        UserProfile::delete(&conn, "ana").unwrap();
        assert!(MealEntry::list_for_day(&conn, "ana", day(4)).unwrap().is_empty());
    }

    #[test]
    fn test_meal_type_parsing() {
        assert_eq!(MealType::from_str("Dinner"), MealType::Dinner);
        assert_eq!(MealType::from_str("brunch"), MealType::Unspecified);
    }
}
