//! Planner state and reducer

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{LoadTicket, RequestGeneration};
use crate::metrics::{
    nutrition_totals, toggle_completion, workout_stats, Bmi, BmiCategory, WorkoutStats,
};
use crate::models::{
    DayPlan, DietWeek, ExerciseCategory, Nutrition, ProfileMetrics, Weekday, WorkoutPlan,
    WorkoutWeek,
};

/// A view that loads its data independently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Diet,
    Workout,
    Profile,
}

impl Screen {
    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Diet => "diet",
            Screen::Workout => "workout",
            Screen::Profile => "profile",
        }
    }
}

/// Load progress for a week of plans
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum LoadState<T> {
    Idle,
    Loading,
    Loaded(T),
    /// Loaded, but the user has no plan yet
    Empty,
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn label(&self) -> &'static str {
        match self {
            LoadState::Idle => "idle",
            LoadState::Loading => "loading",
            LoadState::Loaded(_) => "loaded",
            LoadState::Empty => "empty",
            LoadState::Failed(_) => "failed",
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// State changes the planner accepts
#[derive(Debug, Clone)]
pub enum Action {
    SelectDay(Weekday),
    DietLoaded { ticket: LoadTicket, week: DietWeek },
    WorkoutLoaded { ticket: LoadTicket, week: WorkoutWeek },
    ProfileLoaded { ticket: LoadTicket, metrics: ProfileMetrics },
    LoadFailed { screen: Screen, ticket: LoadTicket, message: String },
    /// The view went away; results still in flight must not land
    Leave(Screen),
    /// Flip completion of an exercise on the selected day
    ToggleExercise { category: ExerciseCategory, index: usize },
    /// User-entered measurements; supersede any profile fetch in flight
    SetProfile(ProfileMetrics),
}

/// Everything the diet, workout and profile views display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannerState {
    pub selected_day: Weekday,
    pub diet: LoadState<DietWeek>,
    pub workouts: LoadState<WorkoutWeek>,
    pub profile: ProfileMetrics,
    diet_requests: RequestGeneration,
    workout_requests: RequestGeneration,
    profile_requests: RequestGeneration,
}

/// Derived figures for the selected day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    pub day: Weekday,
    pub nutrition: Nutrition,
    pub meal_count: usize,
    pub workout: WorkoutStats,
    pub progress_percentage: f64,
    pub bmi: Bmi,
    pub bmi_category: Option<BmiCategory>,
}

impl Default for PlannerState {
    fn default() -> Self {
        Self::new(Weekday::today())
    }
}

impl PlannerState {
    pub fn new(selected_day: Weekday) -> Self {
        Self {
            selected_day,
            diet: LoadState::Idle,
            workouts: LoadState::Idle,
            profile: ProfileMetrics::default(),
            diet_requests: RequestGeneration::default(),
            workout_requests: RequestGeneration::default(),
            profile_requests: RequestGeneration::default(),
        }
    }

    /// Start loading a view's data. Returns the new state and the ticket the
    /// result must carry; any earlier ticket for the view becomes stale.
    pub fn begin_load(&self, screen: Screen) -> (PlannerState, LoadTicket) {
        let mut next = self.clone();
        let ticket = match screen {
            Screen::Diet => {
                next.diet = LoadState::Loading;
                next.diet_requests.begin()
            }
            Screen::Workout => {
                next.workouts = LoadState::Loading;
                next.workout_requests.begin()
            }
            Screen::Profile => next.profile_requests.begin(),
        };
        (next, ticket)
    }

    fn requests(&self, screen: Screen) -> &RequestGeneration {
        match screen {
            Screen::Diet => &self.diet_requests,
            Screen::Workout => &self.workout_requests,
            Screen::Profile => &self.profile_requests,
        }
    }

    fn accepts(&self, screen: Screen, ticket: LoadTicket) -> bool {
        let current = self.requests(screen).is_current(ticket);
        if !current {
            tracing::debug!(
                screen = screen.as_str(),
                generation = ticket.generation(),
                "Discarding stale load result"
            );
        }
        current
    }

    /// The selected day's meals; empty when nothing is loaded for that day
    pub fn diet_plan(&self) -> Arc<DayPlan> {
        self.diet
            .loaded()
            .map(|week| week.plan_or_empty(self.selected_day))
            .unwrap_or_default()
    }

    /// The selected day's exercises; empty when nothing is loaded for that day
    pub fn workout_plan(&self) -> Arc<WorkoutPlan> {
        self.workouts
            .loaded()
            .map(|week| week.plan_or_empty(self.selected_day))
            .unwrap_or_default()
    }

    pub fn day_summary(&self) -> DaySummary {
        let diet = self.diet_plan();
        let workout = workout_stats(&self.workout_plan());
        let bmi = self.profile.bmi();

        DaySummary {
            day: self.selected_day,
            nutrition: nutrition_totals(&diet),
            meal_count: diet.meal_count(),
            workout,
            progress_percentage: workout.progress_percentage(),
            bmi,
            bmi_category: bmi.category(),
        }
    }
}

fn week_state<P>(week: crate::models::Week<P>) -> LoadState<crate::models::Week<P>> {
    if week.is_empty() {
        LoadState::Empty
    } else {
        LoadState::Loaded(week)
    }
}

/// Apply an action, returning the next state. `state` is left untouched and
/// unchanged parts of the plans stay shared with it.
pub fn reduce(state: &PlannerState, action: Action) -> PlannerState {
    let mut next = state.clone();

    match action {
        Action::SelectDay(day) => next.selected_day = day,

        Action::DietLoaded { ticket, week } => {
            if state.accepts(Screen::Diet, ticket) {
                next.diet = week_state(week);
            }
        }

        Action::WorkoutLoaded { ticket, week } => {
            if state.accepts(Screen::Workout, ticket) {
                next.workouts = week_state(week);
            }
        }

        Action::ProfileLoaded { ticket, metrics } => {
            if state.accepts(Screen::Profile, ticket) {
                next.profile = metrics;
            }
        }

        Action::LoadFailed { screen, ticket, message } => {
            if state.accepts(screen, ticket) {
                tracing::warn!(screen = screen.as_str(), error = %message, "Load failed");
                match screen {
                    Screen::Diet => next.diet = LoadState::Failed(message),
                    Screen::Workout => next.workouts = LoadState::Failed(message),
                    // Profile keeps whatever measurements it already had
                    Screen::Profile => {}
                }
            }
        }

        Action::Leave(screen) => match screen {
            Screen::Diet => {
                next.diet_requests.cancel();
                if next.diet.is_loading() {
                    next.diet = LoadState::Idle;
                }
            }
            Screen::Workout => {
                next.workout_requests.cancel();
                if next.workouts.is_loading() {
                    next.workouts = LoadState::Idle;
                }
            }
            Screen::Profile => next.profile_requests.cancel(),
        },

        Action::ToggleExercise { category, index } => {
            if let LoadState::Loaded(week) = &state.workouts {
                next.workouts =
                    LoadState::Loaded(toggle_completion(week, state.selected_day, category, index));
            }
        }

        Action::SetProfile(metrics) => {
            next.profile_requests.cancel();
            next.profile = metrics;
        }
    }

    next
}
