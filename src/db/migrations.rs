//! Database migrations
//!
//! Schema creation and versioning for the profile store.

use rusqlite::Connection;

use super::connection::DbResult;

/// Current schema version
const SCHEMA_VERSION: i32 = 2;

/// Run all migrations to bring the database up to the current schema version
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    let current_version = get_schema_version(conn)?;

    if current_version < 1 {
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
        tracing::info!("Applied schema migration v1");
    }

    if current_version < 2 {
        migrate_v2(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (2)", [])?;
        tracing::info!("Applied schema migration v2");
    }

    debug_assert!(get_schema_version(conn)? == SCHEMA_VERSION);
    Ok(())
}

/// Highest applied schema version (0 for a fresh database)
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let version = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// Migration v1: user profiles with cached goals
fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE user_profiles (
            user_id TEXT PRIMARY KEY,

            -- Biometrics and preferences (nullable until onboarding fills them in)
            gender TEXT,
            age INTEGER,
            weight_kg REAL,
            height_cm REAL,
            activity_level TEXT,
            goal TEXT,
            diet_preference TEXT,
            workout_frequency TEXT,

            -- Derived daily goals
            daily_calorie_goal INTEGER,
            daily_protein_goal INTEGER,     -- grams
            daily_carbs_goal INTEGER,       -- grams
            daily_fat_goal INTEGER,         -- grams
            daily_fiber_goal INTEGER,       -- grams
            daily_sugar_goal INTEGER,       -- grams
            daily_sodium_goal INTEGER,      -- milligrams
            goals_updated_at TEXT,

            onboarding_completed INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_user_profiles_onboarding ON user_profiles(onboarding_completed);
        "#,
    )?;
    Ok(())
}

/// Migration v2: meal log
fn migrate_v2(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE meal_entries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL REFERENCES user_profiles(user_id) ON DELETE CASCADE,
            date TEXT NOT NULL,             -- ISO date: "2025-01-09"
            meal_type TEXT NOT NULL DEFAULT 'unspecified',
            name TEXT NOT NULL,

            calories REAL NOT NULL DEFAULT 0,
            protein REAL NOT NULL DEFAULT 0,  -- grams
            carbs REAL NOT NULL DEFAULT 0,    -- grams
            fat REAL NOT NULL DEFAULT 0,      -- grams

            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_meal_entries_user_date ON meal_entries(user_id, date);
        "#,
    )?;
    Ok(())
}
