//! Stored user profile
//!
//! One row per user id holding the onboarding answers and the last derived
//! goals.

use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

use super::{NutritionGoals, ProfileDraft};
use crate::db::{DbError, DbResult};

/// A user's stored profile record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    pub gender: Option<String>,
    pub age: Option<u32>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub activity_level: Option<String>,
    pub goal: Option<String>,
    pub diet_preference: Option<String>,
    pub workout_frequency: Option<String>,
    pub goals: Option<NutritionGoals>,
    pub goals_updated_at: Option<String>,
    pub onboarding_completed: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl UserProfile {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let goals = match (
            row.get::<_, Option<i64>>("daily_calorie_goal")?,
            row.get::<_, Option<i64>>("daily_protein_goal")?,
            row.get::<_, Option<i64>>("daily_carbs_goal")?,
            row.get::<_, Option<i64>>("daily_fat_goal")?,
            row.get::<_, Option<i64>>("daily_fiber_goal")?,
            row.get::<_, Option<i64>>("daily_sugar_goal")?,
            row.get::<_, Option<i64>>("daily_sodium_goal")?,
        ) {
            (
                Some(daily_calories),
                Some(protein),
                Some(carbs),
                Some(fats),
                Some(fiber),
                Some(sugar),
                Some(sodium),
            ) => Some(NutritionGoals {
                daily_calories,
                protein,
                carbs,
                fats,
                fiber,
                sugar,
                sodium,
            }),
            _ => None,
        };

        Ok(Self {
            user_id: row.get("user_id")?,
            gender: row.get("gender")?,
            age: row.get("age")?,
            weight_kg: row.get("weight_kg")?,
            height_cm: row.get("height_cm")?,
            activity_level: row.get("activity_level")?,
            goal: row.get("goal")?,
            diet_preference: row.get("diet_preference")?,
            workout_frequency: row.get("workout_frequency")?,
            goals,
            goals_updated_at: row.get("goals_updated_at")?,
            onboarding_completed: row.get("onboarding_completed")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Get a profile by user id
    pub fn get(conn: &Connection, user_id: &str) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM user_profiles WHERE user_id = ?1")?;
        Ok(stmt.query_row([user_id], Self::from_row).optional()?)
    }

    /// All profiles ordered by user id
    pub fn list(conn: &Connection) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM user_profiles ORDER BY user_id ASC")?;
        let profiles = stmt
            .query_map([], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(profiles)
    }

    pub fn count(conn: &Connection) -> DbResult<i64> {
        Ok(conn.query_row("SELECT COUNT(*) FROM user_profiles", [], |row| row.get(0))?)
    }

    /// Insert or update profile fields; fields absent from `draft` keep their stored value
    pub fn upsert_profile(
        conn: &Connection,
        user_id: &str,
        draft: &ProfileDraft,
        workout_frequency: Option<&str>,
    ) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO user_profiles (
                user_id, gender, age, weight_kg, height_cm,
                activity_level, goal, diet_preference, workout_frequency
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT(user_id) DO UPDATE SET
                gender = COALESCE(excluded.gender, gender),
                age = COALESCE(excluded.age, age),
                weight_kg = COALESCE(excluded.weight_kg, weight_kg),
                height_cm = COALESCE(excluded.height_cm, height_cm),
                activity_level = COALESCE(excluded.activity_level, activity_level),
                goal = COALESCE(excluded.goal, goal),
                diet_preference = COALESCE(excluded.diet_preference, diet_preference),
                workout_frequency = COALESCE(excluded.workout_frequency, workout_frequency),
                updated_at = datetime('now')
            "#,
            params![
                user_id,
                draft.gender,
                draft.age,
                draft.weight,
                draft.height,
                draft.activity_level,
                draft.goal,
                draft.diet_preference,
                workout_frequency,
            ],
        )?;

        Self::get(conn, user_id)?.ok_or_else(|| DbError::ProfileNotFound(user_id.to_string()))
    }

    /// Store freshly derived goals
    pub fn set_goals(conn: &Connection, user_id: &str, goals: &NutritionGoals) -> DbResult<Self> {
        let updated = conn.execute(
            r#"
            UPDATE user_profiles SET
                daily_calorie_goal = ?2,
                daily_protein_goal = ?3,
                daily_carbs_goal = ?4,
                daily_fat_goal = ?5,
                daily_fiber_goal = ?6,
                daily_sugar_goal = ?7,
                daily_sodium_goal = ?8,
                goals_updated_at = datetime('now'),
                updated_at = datetime('now')
            WHERE user_id = ?1
            "#,
            params![
                user_id,
                goals.daily_calories,
                goals.protein,
                goals.carbs,
                goals.fats,
                goals.fiber,
                goals.sugar,
                goals.sodium,
            ],
        )?;

        if updated == 0 {
            return Err(DbError::ProfileNotFound(user_id.to_string()));
        }
        Self::get(conn, user_id)?.ok_or_else(|| DbError::ProfileNotFound(user_id.to_string()))
    }

    pub fn mark_onboarding_completed(conn: &Connection, user_id: &str) -> DbResult<Self> {
        let updated = conn.execute(
            "UPDATE user_profiles SET onboarding_completed = 1, updated_at = datetime('now') WHERE user_id = ?1",
            [user_id],
        )?;

        if updated == 0 {
            return Err(DbError::ProfileNotFound(user_id.to_string()));
        }
        Self::get(conn, user_id)?.ok_or_else(|| DbError::ProfileNotFound(user_id.to_string()))
    }

    /// Delete a profile, returning whether a row was removed
    pub fn delete(conn: &Connection, user_id: &str) -> DbResult<bool> {
        let deleted = conn.execute("DELETE FROM user_profiles WHERE user_id = ?1", [user_id])?;
        Ok(deleted > 0)
    }

    /// The stored profile fields as a draft
    pub fn draft(&self) -> ProfileDraft {
        ProfileDraft {
            gender: self.gender.clone(),
            age: self.age,
            weight: self.weight_kg,
            height: self.height_cm,
            activity_level: self.activity_level.clone(),
            goal: self.goal.clone(),
            diet_preference: self.diet_preference.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn sample_goals() -> NutritionGoals {
        NutritionGoals {
            daily_calories: 2200,
            protein: 138,
            carbs: 275,
            fats: 61,
            fiber: 31,
            sugar: 55,
            sodium: 1050,
        }
    }

    #[test]
    fn test_upsert_and_get() {
        let conn = setup();
        let draft = ProfileDraft {
            gender: Some("female".into()),
            age: Some(29),
            weight: Some(70.0),
            ..Default::default()
        };
        let created = UserProfile::upsert_profile(&conn, "user-1", &draft, Some("3-4")).unwrap();
        assert_eq!(created.user_id, "user-1");
        assert_eq!(created.age, Some(29));
        assert_eq!(created.workout_frequency.as_deref(), Some("3-4"));
        assert!(created.goals.is_none());
        assert!(!created.onboarding_completed);

        assert_eq!(UserProfile::get(&conn, "user-1").unwrap(), Some(created));
        assert_eq!(UserProfile::get(&conn, "nobody").unwrap(), None);
    }

    #[test]
    fn test_partial_update_keeps_existing_fields() {
        let conn = setup();
        let first = ProfileDraft {
            gender: Some("male".into()),
            height: Some(181.0),
            ..Default::default()
        };
        UserProfile::upsert_profile(&conn, "user-2", &first, None).unwrap();

        let second = ProfileDraft {
            weight: Some(85.0),
            ..Default::default()
        };
        let merged = UserProfile::upsert_profile(&conn, "user-2", &second, None).unwrap();
        assert_eq!(merged.gender.as_deref(), Some("male"));
        assert_eq!(merged.height_cm, Some(181.0));
        assert_eq!(merged.weight_kg, Some(85.0));
        assert_eq!(UserProfile::count(&conn).unwrap(), 1);
    }

    #[test]
    fn test_set_goals_round_trip() {
        let conn = setup();
        UserProfile::upsert_profile(&conn, "user-3", &ProfileDraft::default(), None).unwrap();
        let stored = UserProfile::set_goals(&conn, "user-3", &sample_goals()).unwrap();
        assert_eq!(stored.goals, Some(sample_goals()));
        assert!(stored.goals_updated_at.is_some());
    }

    #[test]
    fn test_set_goals_requires_profile() {
        let conn = setup();
        let err = UserProfile::set_goals(&conn, "ghost", &sample_goals()).unwrap_err();
        assert!(matches!(err, DbError::ProfileNotFound(id) if id == "ghost"));
    }

    #[test]
    fn test_onboarding_flag_and_delete() {
        let conn = setup();
        UserProfile::upsert_profile(&conn, "user-4", &ProfileDraft::default(), None).unwrap();
        let done = UserProfile::mark_onboarding_completed(&conn, "user-4").unwrap();
        assert!(done.onboarding_completed);

        assert!(UserProfile::delete(&conn, "user-4").unwrap());
        assert!(!UserProfile::delete(&conn, "user-4").unwrap());
        assert!(UserProfile::list(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_draft_reflects_stored_fields() {
        let conn = setup();
        let draft = ProfileDraft {
            gender: Some("male".into()),
            age: Some(40),
            weight: Some(90.0),
            height: Some(185.0),
            activity_level: Some("light".into()),
            goal: Some("lose_weight".into()),
            diet_preference: Some("classic".into()),
        };
        let stored = UserProfile::upsert_profile(&conn, "user-5", &draft, None).unwrap();
        assert_eq!(stored.draft(), draft);
    }
}
