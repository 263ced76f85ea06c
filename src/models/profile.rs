//! Profile model
//!
//! Biometric profile consumed by the goal calculator, plus the draft form
//! collected during onboarding before every field is known.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Profile validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("Missing required profile field: {0}")]
    MissingField(&'static str),
}

/// Lowercase, trim, and fold `-`/space separators into `_`
fn normalize(s: &str) -> String {
    s.trim().to_lowercase().replace(['-', ' '], "_")
}

/// Biological sex used to pick the BMR constant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }

    /// Parse leniently; anything unrecognized is `Other`
    pub fn from_str(s: &str) -> Self {
        match normalize(s).as_str() {
            "male" => Gender::Male,
            "female" => Gender::Female,
            _ => Gender::Other,
        }
    }
}

/// Activity level for the TDEE multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little to no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    Moderate,
    /// Heavy exercise 6-7 days/week
    Active,
    /// Very heavy exercise or a physical job
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }

    /// Parse leniently; anything unrecognized is `Moderate`
    pub fn from_str(s: &str) -> Self {
        match normalize(s).as_str() {
            "sedentary" => ActivityLevel::Sedentary,
            "light" => ActivityLevel::Light,
            "moderate" => ActivityLevel::Moderate,
            "active" => ActivityLevel::Active,
            "very_active" => ActivityLevel::VeryActive,
            _ => ActivityLevel::Moderate,
        }
    }

    /// Map an onboarding workout-frequency answer to an activity level
    ///
    /// Answers are `never`, `1-2`, `3-4`, `5-6` (per week) and `daily`. A blank
    /// answer is no answer (`None`); any other value gets the same `Moderate`
    /// fallback as an unrecognized activity level.
    pub fn from_workout_frequency(frequency: &str) -> Option<Self> {
        let level = match frequency.trim().to_lowercase().as_str() {
            "" => return None,
            "never" => ActivityLevel::Sedentary,
            "1-2" => ActivityLevel::Light,
            "3-4" => ActivityLevel::Moderate,
            "5-6" => ActivityLevel::Active,
            "daily" => ActivityLevel::VeryActive,
            _ => ActivityLevel::Moderate,
        };
        Some(level)
    }
}

/// Weight goal driving the calorie adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    LoseWeight,
    MaintainWeight,
    GainWeight,
}

impl Goal {
    pub const ALL: [Goal; 3] = [Goal::LoseWeight, Goal::MaintainWeight, Goal::GainWeight];

    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::LoseWeight => "lose_weight",
            Goal::MaintainWeight => "maintain_weight",
            Goal::GainWeight => "gain_weight",
        }
    }

    /// Parse leniently; anything unrecognized is `MaintainWeight`
    pub fn from_str(s: &str) -> Self {
        match normalize(s).as_str() {
            "lose_weight" => Goal::LoseWeight,
            "gain_weight" => Goal::GainWeight,
            _ => Goal::MaintainWeight,
        }
    }
}

/// Diet preference selecting the macro table row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietPreference {
    Classic,
    Pescatarian,
    Vegetarian,
    Vegan,
}

impl DietPreference {
    pub const ALL: [DietPreference; 4] = [
        DietPreference::Classic,
        DietPreference::Pescatarian,
        DietPreference::Vegetarian,
        DietPreference::Vegan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DietPreference::Classic => "classic",
            DietPreference::Pescatarian => "pescatarian",
            DietPreference::Vegetarian => "vegetarian",
            DietPreference::Vegan => "vegan",
        }
    }

    /// Parse leniently; anything unrecognized is `Classic`
    pub fn from_str(s: &str) -> Self {
        match normalize(s).as_str() {
            "pescatarian" => DietPreference::Pescatarian,
            "vegetarian" => DietPreference::Vegetarian,
            "vegan" => DietPreference::Vegan,
            _ => DietPreference::Classic,
        }
    }
}

/// A complete profile, ready for goal calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserProfileData {
    pub gender: Gender,
    pub age: u32,
    /// Kilograms
    pub weight: f64,
    /// Centimeters
    pub height: f64,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
    pub diet_preference: DietPreference,
}

/// A profile as collected, any field possibly missing
///
/// Enum fields are kept as the raw strings received from the caller and are
/// parsed leniently by [`ProfileDraft::complete`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileDraft {
    pub gender: Option<String>,
    pub age: Option<u32>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub activity_level: Option<String>,
    pub goal: Option<String>,
    pub diet_preference: Option<String>,
}

fn present_str<'a>(value: &'a Option<String>) -> Option<&'a str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn present_positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

impl ProfileDraft {
    /// Convert into a complete profile, failing on the first missing field
    pub fn complete(&self) -> Result<UserProfileData, ProfileError> {
        let gender = present_str(&self.gender).ok_or(ProfileError::MissingField("gender"))?;
        let age = self
            .age
            .filter(|a| *a > 0)
            .ok_or(ProfileError::MissingField("age"))?;
        let weight = present_positive(self.weight).ok_or(ProfileError::MissingField("weight"))?;
        let height = present_positive(self.height).ok_or(ProfileError::MissingField("height"))?;
        let activity_level = present_str(&self.activity_level)
            .ok_or(ProfileError::MissingField("activity_level"))?;
        let goal = present_str(&self.goal).ok_or(ProfileError::MissingField("goal"))?;
        let diet_preference = present_str(&self.diet_preference)
            .ok_or(ProfileError::MissingField("diet_preference"))?;

        Ok(UserProfileData {
            gender: Gender::from_str(gender),
            age,
            weight,
            height,
            activity_level: ActivityLevel::from_str(activity_level),
            goal: Goal::from_str(goal),
            diet_preference: DietPreference::from_str(diet_preference),
        })
    }

    /// Names of every field that would block [`ProfileDraft::complete`]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if present_str(&self.gender).is_none() {
            missing.push("gender");
        }
        if self.age.filter(|a| *a > 0).is_none() {
            missing.push("age");
        }
        if present_positive(self.weight).is_none() {
            missing.push("weight");
        }
        if present_positive(self.height).is_none() {
            missing.push("height");
        }
        if present_str(&self.activity_level).is_none() {
            missing.push("activity_level");
        }
        if present_str(&self.goal).is_none() {
            missing.push("goal");
        }
        if present_str(&self.diet_preference).is_none() {
            missing.push("diet_preference");
        }
        missing
    }
}

impl From<&UserProfileData> for ProfileDraft {
    fn from(profile: &UserProfileData) -> Self {
        Self {
            gender: Some(profile.gender.as_str().to_string()),
            age: Some(profile.age),
            weight: Some(profile.weight),
            height: Some(profile.height),
            activity_level: Some(profile.activity_level.as_str().to_string()),
            goal: Some(profile.goal.as_str().to_string()),
            diet_preference: Some(profile.diet_preference.as_str().to_string()),
        }
    }
}
