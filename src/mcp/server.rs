//! MediNova MCP Server Implementation
//!
//! A thin dispatch shell: each tool forwards to `crate::tools` and renders the
//! result as pretty JSON.

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

use crate::client::PlanSource;
use crate::db::Database;
use crate::models::{Exercise, MealItem, ProfileMetrics};
use crate::planner::{PlannerState, Screen};
use crate::tools::status::{StatusTracker, PLANNER_INSTRUCTIONS, VERSION};
use crate::tools::{plans, profile, store};

/// MediNova MCP Service
#[derive(Clone)]
pub struct MedinovaService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    database: Database,
    source: Arc<dyn PlanSource>,
    /// Session planner; completion marks live here only
    planner: Arc<std::sync::Mutex<PlannerState>>,
    default_user_id: i64,
    tool_router: ToolRouter<MedinovaService>,
}

impl MedinovaService {
    pub fn new(
        database_path: PathBuf,
        database: Database,
        source: Arc<dyn PlanSource>,
        default_user_id: i64,
    ) -> Self {
        let tracker = StatusTracker::new(database_path, source.describe(), default_user_id);
        Self {
            status_tracker: Arc::new(Mutex::new(tracker)),
            database,
            source,
            planner: Arc::new(std::sync::Mutex::new(PlannerState::default())),
            default_user_id,
            tool_router: Self::tool_router(),
        }
    }

    fn user(&self, user_id: Option<i64>) -> i64 {
        user_id.unwrap_or(self.default_user_id)
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Plan Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LoadPlanParams {
    /// User whose plan to load (defaults to the configured user)
    pub user_id: Option<i64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CancelLoadParams {
    /// Which load to abandon: "diet", "workout", or "profile"
    pub screen: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SelectDayParams {
    /// Weekday name, e.g. "Monday" or "mon"
    pub day: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ToggleExerciseParams {
    /// Exercise category: Cardio, Strength, or Flexibility
    pub category: String,
    /// Zero-based position within the category on the selected day
    pub index: usize,
}

// ============================================================================
// Profile Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateBmiParams {
    /// Height in centimetres
    pub height_cm: Option<f64>,
    /// Weight in kilograms
    pub weight_kg: Option<f64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetProfileParams {
    /// Height in centimetres (omit to clear)
    pub height_cm: Option<f64>,
    /// Weight in kilograms (omit to clear)
    pub weight_kg: Option<f64>,
    /// Also store the measurements in the local plan store (default false)
    #[serde(default)]
    pub save: bool,
    pub user_id: Option<i64>,
}

// ============================================================================
// Plan Store Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SaveMealParams {
    pub user_id: Option<i64>,
    /// Weekday name
    pub day: String,
    /// breakfast, lunch, dinner, or snacks
    pub meal_type: String,
    pub name: String,
    pub calories: f64,
    /// grams
    #[serde(default)]
    pub protein: f64,
    /// grams
    #[serde(default)]
    pub carbs: f64,
    /// grams
    #[serde(default)]
    pub fat: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SaveExerciseParams {
    pub user_id: Option<i64>,
    /// Weekday name
    pub day: String,
    /// Cardio, Strength, or Flexibility
    pub category: String,
    pub name: String,
    pub duration_minutes: f64,
    pub calories: f64,
    pub sets: Option<u32>,
    pub reps: Option<u32>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeletePlanParams {
    pub user_id: Option<i64>,
    /// Must be true to confirm deleting every row of the plan
    #[serde(default)]
    pub force: bool,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl MedinovaService {
    // --- Status ---

    #[tool(description = "Get the current status of the MediNova service including version, plan source, database, and process information")]
    async fn medinova_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        json_result(&tracker.get_status())
    }

    #[tool(description = "Get instructions for using the planner tools. Call this when starting a session or when unsure how the tools fit together.")]
    fn planner_instructions(&self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(
            PLANNER_INSTRUCTIONS,
        )]))
    }

    // --- Plans ---

    #[tool(description = "Load the user's weekly diet plan into the session and return the selected day's meals and nutrition totals")]
    async fn load_diet_plan(
        &self,
        Parameters(p): Parameters<LoadPlanParams>,
    ) -> Result<CallToolResult, McpError> {
        let user_id = self.user(p.user_id);
        let result = plans::load_diet_plan(&self.planner, self.source.as_ref(), user_id)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Load the user's weekly exercise plan into the session (completion marks start cleared) and return the selected day's workout stats")]
    async fn load_exercise_plan(
        &self,
        Parameters(p): Parameters<LoadPlanParams>,
    ) -> Result<CallToolResult, McpError> {
        let user_id = self.user(p.user_id);
        let result = plans::load_exercise_plan(&self.planner, self.source.as_ref(), user_id)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Abandon an in-flight load so its result is discarded when it arrives")]
    fn cancel_load(
        &self,
        Parameters(p): Parameters<CancelLoadParams>,
    ) -> Result<CallToolResult, McpError> {
        let screen = match p.screen.trim().to_lowercase().as_str() {
            "diet" => Screen::Diet,
            "workout" | "exercise" => Screen::Workout,
            "profile" => Screen::Profile,
            other => {
                return Err(McpError::invalid_params(
                    format!("Unknown screen '{}'. Use diet, workout, or profile.", other),
                    None,
                ))
            }
        };
        plans::cancel_load(&self.planner, screen)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&serde_json::json!({ "cancelled": screen.as_str() }))
    }

    #[tool(description = "Select the weekday shown by the diet and workout summaries")]
    fn select_day(
        &self,
        Parameters(p): Parameters<SelectDayParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = plans::select_day(&self.planner, &p.day)
            .map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Get the selected day's meals by category with calorie, protein, carb, and fat totals")]
    fn get_diet_summary(&self) -> Result<CallToolResult, McpError> {
        let result = plans::get_diet_summary(&self.planner)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Get the selected day's exercises by category with total minutes, calories, and completion progress")]
    fn get_workout_summary(&self) -> Result<CallToolResult, McpError> {
        let result = plans::get_workout_summary(&self.planner)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Mark an exercise on the selected day as done (or not done). Session only; not saved.")]
    fn toggle_exercise(
        &self,
        Parameters(p): Parameters<ToggleExerciseParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = plans::toggle_exercise(&self.planner, &p.category, p.index)
            .map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Get nutrition totals, workout progress, and BMI for the selected day in one call")]
    fn get_day_summary(&self) -> Result<CallToolResult, McpError> {
        let result = plans::get_day_summary(&self.planner)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    // --- Profile ---

    #[tool(description = "Load the user's height and weight into the session and return them with the derived BMI")]
    async fn load_profile(
        &self,
        Parameters(p): Parameters<LoadPlanParams>,
    ) -> Result<CallToolResult, McpError> {
        let user_id = self.user(p.user_id);
        let result = profile::load_profile(&self.planner, self.source.as_ref(), user_id)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Set the session's height (cm) and weight (kg). Pass save=true to also store them locally.")]
    fn set_profile(
        &self,
        Parameters(p): Parameters<SetProfileParams>,
    ) -> Result<CallToolResult, McpError> {
        let metrics = ProfileMetrics::new(p.height_cm, p.weight_kg);
        let user_id = self.user(p.user_id);
        let result = profile::set_profile(&self.planner, &self.database, user_id, metrics, p.save)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Calculate BMI and its category from height (cm) and weight (kg). Missing or zero values give \"0.0\" with no category.")]
    fn calculate_bmi(
        &self,
        Parameters(p): Parameters<CalculateBmiParams>,
    ) -> Result<CallToolResult, McpError> {
        json_result(&profile::calculate_bmi_tool(p.height_cm, p.weight_kg))
    }

    // --- Plan Store ---

    #[tool(description = "Save a meal item to the user's diet plan in the local plan store")]
    fn save_meal(
        &self,
        Parameters(p): Parameters<SaveMealParams>,
    ) -> Result<CallToolResult, McpError> {
        let user_id = self.user(p.user_id);
        let meal = MealItem {
            name: p.name,
            calories: p.calories,
            protein: p.protein,
            carbs: p.carbs,
            fat: p.fat,
        };
        let result = store::save_meal(&self.database, user_id, &p.day, &p.meal_type, meal)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Save an exercise to the user's exercise plan in the local plan store")]
    fn save_exercise(
        &self,
        Parameters(p): Parameters<SaveExerciseParams>,
    ) -> Result<CallToolResult, McpError> {
        let user_id = self.user(p.user_id);
        let exercise = Exercise {
            name: p.name,
            duration: p.duration_minutes,
            calories: p.calories,
            sets: p.sets,
            reps: p.reps,
            completed: false,
        };
        let result = store::save_exercise(&self.database, user_id, &p.day, &p.category, exercise)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Delete the user's whole diet plan from the local plan store (requires force=true)")]
    fn delete_diet_plan(
        &self,
        Parameters(p): Parameters<DeletePlanParams>,
    ) -> Result<CallToolResult, McpError> {
        if !p.force {
            return Err(McpError::invalid_params(
                "delete_diet_plan requires force=true",
                None,
            ));
        }
        let result = store::delete_diet_plan(&self.database, self.user(p.user_id))
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Delete the user's whole exercise plan from the local plan store (requires force=true)")]
    fn delete_exercise_plan(
        &self,
        Parameters(p): Parameters<DeletePlanParams>,
    ) -> Result<CallToolResult, McpError> {
        if !p.force {
            return Err(McpError::invalid_params(
                "delete_exercise_plan requires force=true",
                None,
            ));
        }
        let result = store::delete_exercise_plan(&self.database, self.user(p.user_id))
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for MedinovaService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "medinova".into(),
                version: VERSION.into(),
                title: Some("MediNova Health Metrics".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "MediNova - diet plans, exercise plans, and BMI. \
                 IMPORTANT: Call planner_instructions first. \
                 Plans: load_diet_plan/load_exercise_plan, select_day, \
                 get_diet_summary/get_workout_summary/get_day_summary, \
                 toggle_exercise (session only), cancel_load. \
                 Profile: load_profile/set_profile, calculate_bmi. \
                 Plan store: save_meal/save_exercise, \
                 delete_diet_plan/delete_exercise_plan (force=true)."
                    .into(),
            ),
        }
    }
}
