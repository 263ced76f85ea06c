//! Status Tool
//!
//! Runtime status of the service plus usage instructions for assistants.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Goal workflow instructions for AI assistants
pub const GOAL_INSTRUCTIONS: &str = r#"
# Nutrition Goal Instructions

## Onboarding flow

1. Collect answers one at a time and store each with `update_profile`:
   gender, workout frequency (`never`, `1-2`, `3-4`, `5-6`, `daily`; blank
   answers are ignored), age, weight and height, diet preference, goal.
2. `update_profile` reports `missing_fields` until the profile is complete.
   Once complete, goals are derived automatically on every change.
3. Call `complete_onboarding` to finalize.

## Units

Weights are kilograms and heights centimeters. Use `convert_weight`
(`lbs` -> kg) and `convert_height` (`ft` + inches -> cm) before storing.

## Accepted values

- gender: male, female, other
- activity_level: sedentary, light, moderate, active, very_active
- goal: lose_weight, maintain_weight, gain_weight
- diet_preference: classic, pescatarian, vegetarian, vegan

Unrecognized values are accepted and fall back to moderate activity,
maintain_weight, and the classic diet.

## Tracking intake

After goals exist, log each meal with `log_meal` (calories plus protein, carbs
and fat in grams). `get_daily_progress` reports consumed, remaining and percent
of target per nutrient; `get_weekly_progress` shows calories per day for the
week. Remaining amounts stop at 0 and percentages at 100 when the user eats
over target.

## Notes

- `calculate_nutrition_goals` previews goals without saving anything.
- Calorie targets are never clamped. Very small, sedentary, older profiles
  with lose_weight can produce targets under 1200 kcal; mention this to the user.
"#;

/// Runtime status of the service
#[derive(Debug, Clone, Serialize)]
pub struct ServiceStatus {
    pub build: BuildInfo,

    pub database_path: String,
    pub database_size_bytes: Option<u64>,
    pub profiles_stored: Option<i64>,

    pub started_at: String,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    started_at: chrono::DateTime<chrono::Utc>,
    database_path: PathBuf,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            started_at: chrono::Utc::now(),
            database_path,
        }
    }

    /// Snapshot the current status; `profiles_stored` comes from the caller's database query
    pub fn get_status(&self, profiles_stored: Option<i64>) -> ServiceStatus {
        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));
        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        ServiceStatus {
            build: BuildInfo::current(),
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            profiles_stored,
            started_at: self.started_at.to_rfc3339(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reports_missing_database() {
        let tracker = StatusTracker::new(PathBuf::from("/nonexistent/nutrigoals.db"));
        let status = tracker.get_status(Some(3));
        assert_eq!(status.database_size_bytes, None);
        assert_eq!(status.profiles_stored, Some(3));
        assert_eq!(status.process_id, std::process::id());
        assert_eq!(status.build.name, "nutrigoals");
    }
}
