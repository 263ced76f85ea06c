//! Nutrition Goals Library
//!
//! Personalized daily calorie and macronutrient targets from a biometric
//! profile, with a SQLite profile store and an MCP server front end.

pub mod build_info;
pub mod config;
pub mod db;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod tools;

pub use models::{NutritionGoals, ProfileDraft, UserProfileData};
pub use nutrition::{calculate_nutrition_goals, get_diet_recommendations};
