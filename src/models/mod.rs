//! Data models
//!
//! Profile input, goal output, the stored profile record, and the meal log.

mod goals;
mod meal_entry;
mod profile;
mod user_profile;

pub use goals::NutritionGoals;
pub use meal_entry::{day_totals, Intake, MealEntry, MealEntryCreate, MealType};
pub use profile::{
    ActivityLevel, DietPreference, Gender, Goal, ProfileDraft, ProfileError, UserProfileData,
};
pub use user_profile::UserProfile;
