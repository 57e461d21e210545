//! Diet and Workout Plan Tools
//!
//! Load plans into the session planner, switch days, toggle exercises, and
//! report the derived totals.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;

use crate::client::PlanSource;
use crate::metrics::{nutrition_totals, workout_stats, WorkoutStats};
use crate::models::{DayPlan, ExerciseCategory, Nutrition, Weekday, WorkoutPlan};
use crate::planner::{reduce, Action, DaySummary, LoadTicket, PlannerState, Screen};

/// Diet view for the selected day
#[derive(Debug, Serialize)]
pub struct DietPlanView {
    pub day: Weekday,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub meals: Arc<DayPlan>,
    pub meal_count: usize,
    pub totals: Nutrition,
    pub days_with_plan: Vec<Weekday>,
}

/// Workout view for the selected day
#[derive(Debug, Serialize)]
pub struct WorkoutPlanView {
    pub day: Weekday,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub exercises: Arc<WorkoutPlan>,
    pub stats: WorkoutStats,
    pub progress_percentage: f64,
    pub days_with_plan: Vec<Weekday>,
}

// ============================================================================
// Planner access
// ============================================================================

pub(crate) fn lock(
    planner: &Mutex<PlannerState>,
) -> Result<MutexGuard<'_, PlannerState>, String> {
    planner
        .lock()
        .map_err(|_| "Planner state is unavailable (lock poisoned)".to_string())
}

/// Reduce an action into the shared planner and return the new state
pub(crate) fn dispatch(
    planner: &Mutex<PlannerState>,
    action: Action,
) -> Result<PlannerState, String> {
    let mut state = lock(planner)?;
    *state = reduce(&state, action);
    Ok(state.clone())
}

fn begin_load(planner: &Mutex<PlannerState>, screen: Screen) -> Result<LoadTicket, String> {
    let mut state = lock(planner)?;
    let (next, ticket) = state.begin_load(screen);
    *state = next;
    Ok(ticket)
}

pub fn parse_day(day: &str) -> Result<Weekday, String> {
    Weekday::from_str(day).ok_or_else(|| format!("Unknown day '{}'. Use Monday..Sunday.", day))
}

pub fn parse_category(category: &str) -> Result<ExerciseCategory, String> {
    ExerciseCategory::from_str(category).ok_or_else(|| {
        format!(
            "Unknown category '{}'. Use Cardio, Strength, or Flexibility.",
            category
        )
    })
}

// ============================================================================
// Views
// ============================================================================

pub fn diet_view(state: &PlannerState) -> DietPlanView {
    let meals = state.diet_plan();
    DietPlanView {
        day: state.selected_day,
        status: state.diet.label(),
        error: state.diet.error().map(str::to_string),
        meal_count: meals.meal_count(),
        totals: nutrition_totals(&meals),
        meals,
        days_with_plan: state
            .diet
            .loaded()
            .map(|week| week.days().map(|(day, _)| day).collect())
            .unwrap_or_default(),
    }
}

pub fn workout_view(state: &PlannerState) -> WorkoutPlanView {
    let exercises = state.workout_plan();
    let stats = workout_stats(&exercises);
    WorkoutPlanView {
        day: state.selected_day,
        status: state.workouts.label(),
        error: state.workouts.error().map(str::to_string),
        exercises,
        stats,
        progress_percentage: stats.progress_percentage(),
        days_with_plan: state
            .workouts
            .loaded()
            .map(|week| week.days().map(|(day, _)| day).collect())
            .unwrap_or_default(),
    }
}

// ============================================================================
// Plan Tools
// ============================================================================

/// Fetch the user's diet plan. A failed fetch is reported in the view, not as an error.
pub async fn load_diet_plan(
    planner: &Mutex<PlannerState>,
    source: &dyn PlanSource,
    user_id: i64,
) -> Result<DietPlanView, String> {
    let ticket = begin_load(planner, Screen::Diet)?;

    let action = match source.diet_week(user_id).await {
        Ok(week) => {
            tracing::info!(user_id, days = week.len(), "Loaded diet plan");
            Action::DietLoaded { ticket, week }
        }
        Err(e) => Action::LoadFailed {
            screen: Screen::Diet,
            ticket,
            message: e.to_string(),
        },
    };

    let state = dispatch(planner, action)?;
    Ok(diet_view(&state))
}

/// Fetch the user's exercise plan. Completion marks start cleared.
pub async fn load_exercise_plan(
    planner: &Mutex<PlannerState>,
    source: &dyn PlanSource,
    user_id: i64,
) -> Result<WorkoutPlanView, String> {
    let ticket = begin_load(planner, Screen::Workout)?;

    let action = match source.workout_week(user_id).await {
        Ok(week) => {
            tracing::info!(user_id, days = week.len(), "Loaded exercise plan");
            Action::WorkoutLoaded { ticket, week }
        }
        Err(e) => Action::LoadFailed {
            screen: Screen::Workout,
            ticket,
            message: e.to_string(),
        },
    };

    let state = dispatch(planner, action)?;
    Ok(workout_view(&state))
}

/// Abandon any in-flight load for a screen
pub fn cancel_load(planner: &Mutex<PlannerState>, screen: Screen) -> Result<(), String> {
    dispatch(planner, Action::Leave(screen))?;
    Ok(())
}

pub fn select_day(planner: &Mutex<PlannerState>, day: &str) -> Result<DaySummary, String> {
    let day = parse_day(day)?;
    let state = dispatch(planner, Action::SelectDay(day))?;
    Ok(state.day_summary())
}

pub fn get_diet_summary(planner: &Mutex<PlannerState>) -> Result<DietPlanView, String> {
    let state = lock(planner)?;
    Ok(diet_view(&state))
}

pub fn get_workout_summary(planner: &Mutex<PlannerState>) -> Result<WorkoutPlanView, String> {
    let state = lock(planner)?;
    Ok(workout_view(&state))
}

pub fn get_day_summary(planner: &Mutex<PlannerState>) -> Result<DaySummary, String> {
    Ok(lock(planner)?.day_summary())
}

/// Toggle completion of the exercise at `index` in `category` on the selected day.
///
/// The check and the update happen under one lock, so a reload that starts in
/// between cannot turn an accepted toggle into a silent no-op.
pub fn toggle_exercise(
    planner: &Mutex<PlannerState>,
    category: &str,
    index: usize,
) -> Result<WorkoutPlanView, String> {
    let category = parse_category(category)?;

    let mut state = lock(planner)?;
    if state.workouts.loaded().is_none() {
        return Err("No exercise plan loaded. Call load_exercise_plan first.".to_string());
    }
    let available = state.workout_plan().exercises(category).len();
    if index >= available {
        return Err(format!(
            "No {} exercise at index {} on {} ({} available)",
            category.as_str(),
            index,
            state.selected_day,
            available
        ));
    }

    *state = reduce(&state, Action::ToggleExercise { category, index });
    Ok(workout_view(&state))
}
