//! Recalculate stored nutrition goals
//! Usage: cargo run --bin recalculate_goals -- [user_id]

use nutrigoals::models::UserProfile;
use nutrigoals::{calculate_nutrition_goals, config, db, tools};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(config::DEFAULT_LOG_DIRECTIVE.parse()?))
        .init();

    let user_id = std::env::args().nth(1);

    let db_path = config::get_database_path();
    println!("Database: {}", db_path.display());

    let database = db::Database::new(&db_path)?;
    database.with_conn(db::migrations::run_migrations)?;

    let Some(user_id) = user_id else {
        let summary = tools::goals::recalculate_all(&database)?;
        println!("Updated {} of {} profiles", summary.updated, summary.total);
        for skipped in &summary.skipped {
            println!("  Skipped {}: missing {}", skipped.user_id, skipped.missing_fields.join(", "));
        }
        return Ok(());
    };

    database.with_conn(|conn| {
        let stored = match UserProfile::get(conn, &user_id)? {
            Some(stored) => stored,
            None => {
                println!("No profile found for: {}", user_id);
                return Ok(());
            }
        };

        let profile = match stored.draft().complete() {
            Ok(profile) => profile,
            Err(e) => {
                println!("Profile {} is incomplete: {}", user_id, e);
                return Ok(());
            }
        };

        let goals = calculate_nutrition_goals(&profile);
        if let Some(old) = stored.goals {
            println!("  Old: {} kcal, P{}g C{}g F{}g", old.daily_calories, old.protein, old.carbs, old.fats);
        }
        UserProfile::set_goals(conn, &user_id, &goals)?;
        println!("  New: {} kcal, P{}g C{}g F{}g", goals.daily_calories, goals.protein, goals.carbs, goals.fats);
        println!("  Fiber >= {}g, sugar <= {}g, sodium <= {}mg", goals.fiber, goals.sugar, goals.sodium);
        Ok(())
    })?;

    Ok(())
}
