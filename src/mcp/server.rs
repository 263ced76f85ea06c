//! MCP Server Implementation
//!
//! Routes MCP tool calls to the goal, profile, intake, and conversion tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::db::Database;
use crate::models::{Intake, ProfileDraft, UserProfile};
use crate::tools::conversions;
use crate::tools::goals;
use crate::tools::intake;
use crate::tools::status::StatusTracker;

/// Nutrition goals MCP service
#[derive(Clone)]
pub struct NutriGoalsService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    database: Database,
    tool_router: ToolRouter<NutriGoalsService>,
}

impl NutriGoalsService {
    pub fn new(database_path: PathBuf, database: Database) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database_path))),
            database,
            tool_router: Self::tool_router(),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ProfileParams {
    /// male, female, or other
    pub gender: Option<String>,
    /// Age in years
    pub age: Option<u32>,
    /// Weight in kilograms
    pub weight: Option<f64>,
    /// Height in centimeters
    pub height: Option<f64>,
    /// sedentary, light, moderate, active, or very_active
    pub activity_level: Option<String>,
    /// lose_weight, maintain_weight, or gain_weight
    pub goal: Option<String>,
    /// classic, pescatarian, vegetarian, or vegan
    pub diet_preference: Option<String>,
}

impl ProfileParams {
    fn into_draft(self) -> ProfileDraft {
        ProfileDraft {
            gender: self.gender,
            age: self.age,
            weight: self.weight,
            height: self.height,
            activity_level: self.activity_level,
            goal: self.goal,
            diet_preference: self.diet_preference,
        }
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SaveGoalsParams {
    /// User identity the goals are stored under
    pub user_id: String,
    #[serde(flatten)]
    pub profile: ProfileParams,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateProfileParams {
    pub user_id: String,
    /// Onboarding answer: never, 1-2, 3-4, 5-6, or daily. Sets activity_level when that is omitted.
    pub workout_frequency: Option<String>,
    #[serde(flatten)]
    pub profile: ProfileParams,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UserIdParams {
    pub user_id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DietRecommendationsParams {
    /// classic, pescatarian, vegetarian, or vegan (unknown values get classic)
    pub diet_preference: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ConvertWeightParams {
    pub value: f64,
    /// kg or lbs
    #[serde(default = "default_weight_unit")]
    pub unit: String,
}

fn default_weight_unit() -> String { "lbs".to_string() }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ConvertHeightParams {
    /// cm or ft
    #[serde(default = "default_height_unit")]
    pub unit: String,
    /// Height in centimeters (unit = cm)
    pub value: Option<f64>,
    /// Feet (unit = ft)
    pub feet: Option<f64>,
    /// Inches (unit = ft, default 0)
    pub inches: Option<f64>,
}

fn default_height_unit() -> String { "ft".to_string() }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogMealParams {
    pub user_id: String,
    /// Short description of what was eaten
    pub name: String,
    /// breakfast, lunch, dinner, or snack
    pub meal_type: Option<String>,
    /// YYYY-MM-DD, defaults to today
    pub date: Option<String>,
    /// Energy in kcal
    pub calories: f64,
    /// Grams
    #[serde(default)]
    pub protein: f64,
    /// Grams
    #[serde(default)]
    pub carbs: f64,
    /// Grams
    #[serde(default)]
    pub fat: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UserDateParams {
    pub user_id: String,
    /// YYYY-MM-DD, defaults to today
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct MealIdParams {
    /// Meal entry id returned by log_meal
    pub id: i64,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl NutriGoalsService {
    // --- Status ---

    #[tool(description = "Get the current status of the service including build info, database status, and process information")]
    async fn service_status(&self) -> Result<CallToolResult, McpError> {
        let profiles_stored = self.database.with_conn(UserProfile::count).ok();
        let tracker = self.status_tracker.lock().await;
        to_json(&tracker.get_status(profiles_stored))
    }

    #[tool(description = "Get instructions for the onboarding and goal workflow. Call this before collecting profile data.")]
    fn goal_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::GOAL_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(GOAL_INSTRUCTIONS)]))
    }

    // --- Goals ---

    #[tool(description = "Calculate daily calorie, macro, fiber, sugar, and sodium goals for a profile without saving. All seven profile fields are required.")]
    fn calculate_nutrition_goals(&self, Parameters(p): Parameters<ProfileParams>) -> Result<CallToolResult, McpError> {
        let result = goals::calculate_goals(&p.into_draft()).map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Validate a complete profile, calculate its goals, and save both under user_id. Returns success=false with an error when data is missing.")]
    fn calculate_and_save_nutrition_goals(&self, Parameters(p): Parameters<SaveGoalsParams>) -> Result<CallToolResult, McpError> {
        let result = goals::calculate_and_save_nutrition_goals(&self.database, &p.user_id, &p.profile.into_draft());
        to_json(&result)
    }

    // --- Profiles ---

    #[tool(description = "Store some or all profile fields for a user. Omitted fields keep their stored values. Goals are recalculated whenever the stored profile is complete.")]
    fn update_profile(&self, Parameters(p): Parameters<UpdateProfileParams>) -> Result<CallToolResult, McpError> {
        let result = goals::update_profile(&self.database, &p.user_id, &p.profile.into_draft(), p.workout_frequency.as_deref())
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get a stored profile with its goals, missing fields, and calculation summary")]
    fn get_profile(&self, Parameters(p): Parameters<UserIdParams>) -> Result<CallToolResult, McpError> {
        let result = goals::get_profile(&self.database, &p.user_id).map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(detail) => to_json(&detail),
            None => Ok(CallToolResult::success(vec![Content::text(format!(
                r#"{{"error": "Profile not found", "user_id": {}}}"#,
                serde_json::Value::String(p.user_id)
            ))])),
        }
    }

    #[tool(description = "Finish onboarding for a user whose stored profile is complete. Recalculates and saves goals.")]
    fn complete_onboarding(&self, Parameters(p): Parameters<UserIdParams>) -> Result<CallToolResult, McpError> {
        let result = goals::complete_onboarding(&self.database, &p.user_id).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Recalculate goals for every stored profile. Incomplete profiles are skipped and listed.")]
    fn recalculate_all_goals(&self) -> Result<CallToolResult, McpError> {
        let result = goals::recalculate_all(&self.database).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    // --- Intake ---

    #[tool(description = "Log a meal (calories and macros) for a user on a day")]
    fn log_meal(&self, Parameters(p): Parameters<LogMealParams>) -> Result<CallToolResult, McpError> {
        let eaten = Intake {
            calories: p.calories,
            protein: p.protein,
            carbs: p.carbs,
            fat: p.fat,
        };
        let result = intake::log_meal(&self.database, &p.user_id, p.date.as_deref(), p.meal_type.as_deref(), &p.name, eaten)
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "List the meals logged by a user on a day, with totals")]
    fn list_meals(&self, Parameters(p): Parameters<UserDateParams>) -> Result<CallToolResult, McpError> {
        let result = intake::list_meals(&self.database, &p.user_id, p.date.as_deref())
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Delete a logged meal by id")]
    fn delete_meal(&self, Parameters(p): Parameters<MealIdParams>) -> Result<CallToolResult, McpError> {
        let deleted = intake::delete_meal(&self.database, p.id).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&serde_json::json!({ "id": p.id, "deleted": deleted }))
    }

    #[tool(description = "Calories and macros eaten on a day against the user's goals: consumed, remaining, and percent of target (capped at 100)")]
    fn get_daily_progress(&self, Parameters(p): Parameters<UserDateParams>) -> Result<CallToolResult, McpError> {
        let result = intake::get_daily_progress(&self.database, &p.user_id, p.date.as_deref())
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Calories per day for the Sunday-to-Saturday week containing the date, with the weekly average")]
    fn get_weekly_progress(&self, Parameters(p): Parameters<UserDateParams>) -> Result<CallToolResult, McpError> {
        let result = intake::get_weekly_progress(&self.database, &p.user_id, p.date.as_deref())
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    // --- Reference ---

    #[tool(description = "Get protein sources, tips, and considerations for a diet preference")]
    fn get_diet_recommendations(&self, Parameters(p): Parameters<DietRecommendationsParams>) -> Result<CallToolResult, McpError> {
        to_json(&goals::diet_recommendations(&p.diet_preference))
    }

    #[tool(description = "Convert a weight to kilograms (unit: kg or lbs)")]
    fn convert_weight(&self, Parameters(p): Parameters<ConvertWeightParams>) -> Result<CallToolResult, McpError> {
        let result = conversions::convert_weight(p.value, &p.unit).map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Convert a height to centimeters (unit: cm with value, or ft with feet and inches)")]
    fn convert_height(&self, Parameters(p): Parameters<ConvertHeightParams>) -> Result<CallToolResult, McpError> {
        let result = conversions::convert_height(&p.unit, p.value, p.feet, p.inches)
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for NutriGoalsService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "nutrigoals".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Nutrition Goals".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Nutrition goal calculator. Call goal_instructions first. \
                 Preview: calculate_nutrition_goals. \
                 Save: calculate_and_save_nutrition_goals, update_profile, complete_onboarding. \
                 Read: get_profile, get_diet_recommendations. \
                 Intake: log_meal, list_meals, delete_meal, get_daily_progress, get_weekly_progress. \
                 Units: convert_weight, convert_height. \
                 Maintenance: recalculate_all_goals, service_status."
                    .into(),
            ),
        }
    }
}
