//! Workout plan model
//!
//! A day's workout plan: exercises grouped by category. Category lists are
//! shared behind `Arc` so toggling one exercise only rebuilds its own list.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::lenient;

/// Exercise category within a workout plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExerciseCategory {
    Cardio,
    Strength,
    Flexibility,
}

impl ExerciseCategory {
    pub const ALL: [ExerciseCategory; 3] = [
        ExerciseCategory::Cardio,
        ExerciseCategory::Strength,
        ExerciseCategory::Flexibility,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseCategory::Cardio => "Cardio",
            ExerciseCategory::Strength => "Strength",
            ExerciseCategory::Flexibility => "Flexibility",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "cardio" => Some(ExerciseCategory::Cardio),
            "strength" => Some(ExerciseCategory::Strength),
            "flexibility" => Some(ExerciseCategory::Flexibility),
            _ => None,
        }
    }
}

/// A planned exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    #[serde(alias = "exercise_name", default)]
    pub name: String,
    /// Minutes
    #[serde(alias = "duration_minutes", default, deserialize_with = "lenient::minutes")]
    pub duration: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub calories: f64,
    #[serde(default, deserialize_with = "lenient::count", skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(default, deserialize_with = "lenient::count", skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    /// Session-local; never sent back to the backend
    #[serde(default)]
    pub completed: bool,
}

/// One weekday's exercises by category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    #[serde(rename = "Cardio", alias = "cardio", default = "empty_list")]
    pub cardio: Arc<[Exercise]>,
    #[serde(rename = "Strength", alias = "strength", default = "empty_list")]
    pub strength: Arc<[Exercise]>,
    #[serde(rename = "Flexibility", alias = "flexibility", default = "empty_list")]
    pub flexibility: Arc<[Exercise]>,
}

fn empty_list() -> Arc<[Exercise]> {
    Arc::from(Vec::new())
}

impl Default for WorkoutPlan {
    fn default() -> Self {
        Self {
            cardio: empty_list(),
            strength: empty_list(),
            flexibility: empty_list(),
        }
    }
}

impl WorkoutPlan {
    pub fn new(cardio: Vec<Exercise>, strength: Vec<Exercise>, flexibility: Vec<Exercise>) -> Self {
        Self {
            cardio: Arc::from(cardio),
            strength: Arc::from(strength),
            flexibility: Arc::from(flexibility),
        }
    }

    pub fn exercises(&self, category: ExerciseCategory) -> &Arc<[Exercise]> {
        match category {
            ExerciseCategory::Cardio => &self.cardio,
            ExerciseCategory::Strength => &self.strength,
            ExerciseCategory::Flexibility => &self.flexibility,
        }
    }

    /// Copy of this plan with one category list replaced; the others stay shared
    pub fn with_exercises(&self, category: ExerciseCategory, list: Arc<[Exercise]>) -> Self {
        let mut plan = self.clone();
        match category {
            ExerciseCategory::Cardio => plan.cardio = list,
            ExerciseCategory::Strength => plan.strength = list,
            ExerciseCategory::Flexibility => plan.flexibility = list,
        }
        plan
    }

    /// All exercises, cardio first
    pub fn all_exercises(&self) -> impl Iterator<Item = &Exercise> {
        ExerciseCategory::ALL
            .into_iter()
            .flat_map(move |category| self.exercises(category).iter())
    }

    pub fn is_empty(&self) -> bool {
        self.all_exercises().next().is_none()
    }
}
