//! Goal and Profile Tools
//!
//! Validate profiles, derive goals, and keep the stored record in sync.

use serde::Serialize;

use crate::db::Database;
use crate::models::{
    ActivityLevel, NutritionGoals, ProfileDraft, UserProfile, UserProfileData,
};
use crate::nutrition::{
    calculate_nutrition_goals, format_nutrition_goals, get_diet_recommendations_for,
    nutrition_summary, DietRecommendations, FormattedGoals, NutritionSummary,
};

/// Targets under this many kcal get a warning in the logs; they are not clamped
pub const LOW_CALORIE_WARNING_KCAL: i64 = 1200;

/// Response for calculate_goals
#[derive(Debug, Serialize)]
pub struct CalculateGoalsResponse {
    pub profile: UserProfileData,
    pub goals: NutritionGoals,
    pub summary: NutritionSummary,
    pub formatted: FormattedGoals,
}

/// Response for calculate_and_save_nutrition_goals
#[derive(Debug, Serialize)]
pub struct SaveGoalsResponse {
    pub success: bool,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals: Option<NutritionGoals>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response for update_profile
#[derive(Debug, Serialize)]
pub struct UpdateProfileResponse {
    pub profile: UserProfile,
    /// True when the merged profile was complete and goals were re-derived
    pub recalculated: bool,
    pub missing_fields: Vec<&'static str>,
}

/// Stored profile with derived details
#[derive(Debug, Serialize)]
pub struct ProfileDetail {
    pub profile: UserProfile,
    pub missing_fields: Vec<&'static str>,
    pub summary: Option<NutritionSummary>,
}

/// Response for complete_onboarding
#[derive(Debug, Serialize)]
pub struct CompleteOnboardingResponse {
    pub user_id: String,
    pub goals: NutritionGoals,
    pub onboarding_completed: bool,
}

/// Response for recalculate_all
#[derive(Debug, Serialize)]
pub struct RecalculateAllResponse {
    pub total: usize,
    pub updated: usize,
    pub skipped: Vec<SkippedProfile>,
}

#[derive(Debug, Serialize)]
pub struct SkippedProfile {
    pub user_id: String,
    pub missing_fields: Vec<&'static str>,
}

fn warn_if_low(user_id: &str, goals: &NutritionGoals) {
    if goals.daily_calories < LOW_CALORIE_WARNING_KCAL {
        tracing::warn!(
            "Calorie target for {} is {} kcal, below {} kcal",
            user_id,
            goals.daily_calories,
            LOW_CALORIE_WARNING_KCAL
        );
    }
}

/// Blank answers are no answer
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Drop blank answers, and derive the activity level from the workout
/// frequency when no activity level was given
fn prepare_draft(draft: &ProfileDraft, workout_frequency: Option<&str>) -> ProfileDraft {
    let keep = |field: &Option<String>| present(field.as_deref()).map(str::to_string);
    let mut draft = ProfileDraft {
        gender: keep(&draft.gender),
        activity_level: keep(&draft.activity_level),
        goal: keep(&draft.goal),
        diet_preference: keep(&draft.diet_preference),
        ..draft.clone()
    };
    if draft.activity_level.is_none() {
        draft.activity_level = workout_frequency
            .and_then(ActivityLevel::from_workout_frequency)
            .map(|level| level.as_str().to_string());
    }
    draft
}

// ============================================================================
// Calculation Tools
// ============================================================================

/// Validate a draft and calculate its goals without touching storage
pub fn calculate_goals(draft: &ProfileDraft) -> Result<CalculateGoalsResponse, String> {
    let profile = draft.complete().map_err(|e| e.to_string())?;
    let goals = calculate_nutrition_goals(&profile);

    Ok(CalculateGoalsResponse {
        summary: nutrition_summary(&profile, &goals),
        formatted: format_nutrition_goals(&goals),
        profile,
        goals,
    })
}

/// Validate, calculate, and persist goals for a user
///
/// Failures are reported in the response rather than returned as errors.
pub fn calculate_and_save_nutrition_goals(
    db: &Database,
    user_id: &str,
    draft: &ProfileDraft,
) -> SaveGoalsResponse {
    let failure = |error: String| SaveGoalsResponse {
        success: false,
        user_id: user_id.to_string(),
        goals: None,
        error: Some(error),
    };

    let profile = match draft.complete() {
        Ok(profile) => profile,
        Err(e) => {
            tracing::info!("Skipping goal calculation for {}: {}", user_id, e);
            return failure(format!("Missing required profile data for nutrition calculation: {}", e));
        }
    };

    let goals = calculate_nutrition_goals(&profile);
    warn_if_low(user_id, &goals);

    let stored = db.with_conn_mut(|conn| {
        let tx = conn.transaction()?;
        UserProfile::upsert_profile(&tx, user_id, &ProfileDraft::from(&profile), None)?;
        UserProfile::set_goals(&tx, user_id, &goals)?;
        tx.commit()?;
        Ok(())
    });

    match stored {
        Ok(()) => {
            tracing::info!(
                "Nutrition goals saved for {}: {} kcal, P{}g C{}g F{}g",
                user_id,
                goals.daily_calories,
                goals.protein,
                goals.carbs,
                goals.fats
            );
            SaveGoalsResponse {
                success: true,
                user_id: user_id.to_string(),
                goals: Some(goals),
                error: None,
            }
        }
        Err(e) => {
            tracing::error!("Failed to save nutrition goals for {}: {}", user_id, e);
            failure(format!("Failed to save nutrition goals: {}", e))
        }
    }
}

// ============================================================================
// Profile Tools
// ============================================================================

/// Merge new profile fields into the stored record, re-deriving goals when complete
pub fn update_profile(
    db: &Database,
    user_id: &str,
    draft: &ProfileDraft,
    workout_frequency: Option<&str>,
) -> Result<UpdateProfileResponse, String> {
    let workout_frequency = present(workout_frequency);
    let draft = prepare_draft(draft, workout_frequency);

    db.with_conn_mut(|conn| {
        let tx = conn.transaction()?;
        let stored = UserProfile::upsert_profile(&tx, user_id, &draft, workout_frequency)?;
        let merged = stored.draft();

        let response = match merged.complete() {
            Ok(profile) => {
                let goals = calculate_nutrition_goals(&profile);
                warn_if_low(user_id, &goals);
                let profile = UserProfile::set_goals(&tx, user_id, &goals)?;
                tracing::info!("Profile {} updated, goals recalculated", user_id);
                UpdateProfileResponse {
                    profile,
                    recalculated: true,
                    missing_fields: Vec::new(),
                }
            }
            Err(_) => {
                tracing::debug!("Profile {} updated, still incomplete", user_id);
                UpdateProfileResponse {
                    missing_fields: merged.missing_fields(),
                    profile: stored,
                    recalculated: false,
                }
            }
        };

        tx.commit()?;
        Ok(response)
    })
    .map_err(|e| format!("Failed to update profile: {}", e))
}

/// Get a stored profile with its missing fields and calculation summary
pub fn get_profile(db: &Database, user_id: &str) -> Result<Option<ProfileDetail>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let profile = UserProfile::get(&conn, user_id)
        .map_err(|e| format!("Failed to get profile: {}", e))?;

    Ok(profile.map(|profile| {
        let draft = profile.draft();
        let summary = match (draft.complete(), profile.goals.as_ref()) {
            (Ok(data), Some(goals)) => Some(nutrition_summary(&data, goals)),
            _ => None,
        };
        ProfileDetail {
            missing_fields: draft.missing_fields(),
            summary,
            profile,
        }
    }))
}

/// Finish onboarding: the stored profile must be complete
pub fn complete_onboarding(db: &Database, user_id: &str) -> Result<CompleteOnboardingResponse, String> {
    db.with_conn_mut(|conn| {
        let tx = conn.transaction()?;
        let stored = UserProfile::get(&tx, user_id)?;
        let stored = match stored {
            Some(stored) => stored,
            None => return Ok(Err(format!("Profile not found: {}", user_id))),
        };

        let profile = match stored.draft().complete() {
            Ok(profile) => profile,
            Err(e) => return Ok(Err(format!("Cannot complete onboarding: {}", e))),
        };

        let goals = calculate_nutrition_goals(&profile);
        warn_if_low(user_id, &goals);
        UserProfile::set_goals(&tx, user_id, &goals)?;
        let updated = UserProfile::mark_onboarding_completed(&tx, user_id)?;
        tx.commit()?;

        tracing::info!("Onboarding completed for {}", user_id);
        Ok(Ok(CompleteOnboardingResponse {
            user_id: updated.user_id,
            goals,
            onboarding_completed: updated.onboarding_completed,
        }))
    })
    .map_err(|e| format!("Database error: {}", e))?
}

/// Re-derive goals for every complete stored profile
pub fn recalculate_all(db: &Database) -> Result<RecalculateAllResponse, String> {
    db.with_conn_mut(|conn| {
        let tx = conn.transaction()?;
        let profiles = UserProfile::list(&tx)?;
        let total = profiles.len();
        let mut updated = 0;
        let mut skipped = Vec::new();

        for stored in profiles {
            let draft = stored.draft();
            match draft.complete() {
                Ok(profile) => {
                    let goals = calculate_nutrition_goals(&profile);
                    warn_if_low(&stored.user_id, &goals);
                    UserProfile::set_goals(&tx, &stored.user_id, &goals)?;
                    updated += 1;
                }
                Err(_) => skipped.push(SkippedProfile {
                    missing_fields: draft.missing_fields(),
                    user_id: stored.user_id,
                }),
            }
        }

        tx.commit()?;
        tracing::info!("Recalculated goals for {} of {} profiles", updated, total);
        Ok(RecalculateAllResponse {
            total,
            updated,
            skipped,
        })
    })
    .map_err(|e| format!("Failed to recalculate goals: {}", e))
}

/// Diet recommendations by raw preference string
pub fn diet_recommendations(diet_preference: &str) -> DietRecommendations {
    get_diet_recommendations_for(diet_preference)
}
