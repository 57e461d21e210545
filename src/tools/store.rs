//! Plan Store Tools
//!
//! Save and delete plan rows in the local plan store.

use serde::Serialize;

use crate::db::Database;
use crate::models::{
    DietEntry, DietEntryCreate, Exercise, ExerciseCategory, ExerciseEntry, ExerciseEntryCreate,
    MealCategory, MealItem, ProfileMetrics, Weekday,
};
use super::plans::{parse_category, parse_day};

/// Response for save_meal
#[derive(Debug, Serialize)]
pub struct SaveMealResponse {
    pub id: i64,
    pub day: String,
    pub meal_type: String,
    pub meal: MealItem,
}

/// Response for save_exercise
#[derive(Debug, Serialize)]
pub struct SaveExerciseResponse {
    pub id: i64,
    pub day: String,
    pub category: String,
    pub exercise: Exercise,
}

/// Response for delete_diet_plan / delete_exercise_plan
#[derive(Debug, Serialize)]
pub struct DeletePlanResponse {
    pub user_id: i64,
    pub rows_deleted: usize,
}

pub fn save_meal(
    db: &Database,
    user_id: i64,
    day: &str,
    meal_type: &str,
    meal: MealItem,
) -> Result<SaveMealResponse, String> {
    let day = parse_day(day)?;
    let meal_type = MealCategory::from_str(meal_type).ok_or_else(|| {
        format!("Unknown meal type '{}'. Use breakfast, lunch, dinner, or snacks.", meal_type)
    })?;
    if meal.name.trim().is_empty() {
        return Err("Meal name must not be empty".to_string());
    }

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let entry = DietEntry::create(
        &conn,
        &DietEntryCreate {
            user_id,
            day,
            meal_type,
            item: meal,
        },
    )
    .map_err(|e| format!("Failed to save meal: {}", e))?;

    Ok(SaveMealResponse {
        id: entry.id,
        day: entry.day,
        meal_type: entry.meal_type,
        meal: entry.item,
    })
}

pub fn save_exercise(
    db: &Database,
    user_id: i64,
    day: &str,
    category: &str,
    exercise: Exercise,
) -> Result<SaveExerciseResponse, String> {
    let day = parse_day(day)?;
    let category = parse_category(category)?;
    if exercise.name.trim().is_empty() {
        return Err("Exercise name must not be empty".to_string());
    }

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let entry = ExerciseEntry::create(
        &conn,
        &ExerciseEntryCreate {
            user_id,
            day,
            category,
            exercise,
        },
    )
    .map_err(|e| format!("Failed to save exercise: {}", e))?;

    Ok(SaveExerciseResponse {
        id: entry.id,
        day: entry.day,
        category: entry.category,
        exercise: entry.exercise,
    })
}

pub fn delete_diet_plan(db: &Database, user_id: i64) -> Result<DeletePlanResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let rows_deleted = DietEntry::delete_for_user(&conn, user_id)
        .map_err(|e| format!("Failed to delete diet plan: {}", e))?;

    tracing::info!(user_id, rows_deleted, "Deleted diet plan");
    Ok(DeletePlanResponse { user_id, rows_deleted })
}

pub fn delete_exercise_plan(db: &Database, user_id: i64) -> Result<DeletePlanResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let rows_deleted = ExerciseEntry::delete_for_user(&conn, user_id)
        .map_err(|e| format!("Failed to delete exercise plan: {}", e))?;

    tracing::info!(user_id, rows_deleted, "Deleted exercise plan");
    Ok(DeletePlanResponse { user_id, rows_deleted })
}

// ============================================================================
// Sample plan
// ============================================================================

/// Response for seed_sample_plans
#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub user_id: i64,
    pub rows_replaced: usize,
    pub meals: usize,
    pub exercises: usize,
    pub profile: ProfileMetrics,
}

fn sample_meal(name: &str, calories: f64, protein: f64, carbs: f64, fat: f64) -> MealItem {
    MealItem {
        name: name.to_string(),
        calories,
        protein,
        carbs,
        fat,
    }
}

fn sample_exercise(
    name: &str,
    minutes: f64,
    calories: f64,
    sets_reps: Option<(u32, u32)>,
) -> Exercise {
    Exercise {
        name: name.to_string(),
        duration: minutes,
        calories,
        sets: sets_reps.map(|(sets, _)| sets),
        reps: sets_reps.map(|(_, reps)| reps),
        completed: false,
    }
}

fn sample_meals() -> Vec<(MealCategory, MealItem)> {
    vec![
        (MealCategory::Breakfast, sample_meal("Oatmeal with Berries", 320.0, 12.0, 54.0, 6.0)),
        (MealCategory::Breakfast, sample_meal("Greek Yogurt", 150.0, 15.0, 12.0, 4.0)),
        (MealCategory::Lunch, sample_meal("Grilled Chicken Salad", 450.0, 35.0, 25.0, 18.0)),
        (MealCategory::Lunch, sample_meal("Quinoa Bowl", 280.0, 10.0, 45.0, 8.0)),
        (MealCategory::Dinner, sample_meal("Baked Salmon", 380.0, 40.0, 5.0, 22.0)),
        (MealCategory::Dinner, sample_meal("Steamed Vegetables", 120.0, 4.0, 20.0, 2.0)),
        (MealCategory::Snacks, sample_meal("Apple with Almond Butter", 200.0, 5.0, 22.0, 12.0)),
        (MealCategory::Snacks, sample_meal("Protein Shake", 180.0, 25.0, 8.0, 4.0)),
    ]
}

fn sample_exercises() -> Vec<(ExerciseCategory, Exercise)> {
    vec![
        (ExerciseCategory::Cardio, sample_exercise("Running", 30.0, 300.0, None)),
        (ExerciseCategory::Cardio, sample_exercise("Cycling", 20.0, 200.0, None)),
        (ExerciseCategory::Strength, sample_exercise("Push-ups", 10.0, 80.0, Some((3, 15)))),
        (ExerciseCategory::Strength, sample_exercise("Squats", 10.0, 70.0, Some((3, 20)))),
        (ExerciseCategory::Strength, sample_exercise("Planks", 5.0, 40.0, Some((3, 1)))),
        (ExerciseCategory::Flexibility, sample_exercise("Yoga Flow", 15.0, 60.0, None)),
        (ExerciseCategory::Flexibility, sample_exercise("Stretching", 10.0, 30.0, None)),
    ]
}

/// Replace a user's plans with the sample Monday plan and a 175 cm / 70 kg profile.
///
/// Runs in one transaction: on failure the user's previous plans are kept.
pub fn seed_sample_plans(db: &Database, user_id: i64) -> Result<SeedResponse, String> {
    let meals = sample_meals();
    let exercises = sample_exercises();
    let (meal_count, exercise_count) = (meals.len(), exercises.len());

    let (rows_replaced, profile) = db
        .with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            let rows_replaced = DietEntry::delete_for_user(&tx, user_id)?
                + ExerciseEntry::delete_for_user(&tx, user_id)?;

            for (meal_type, item) in meals {
                DietEntry::create(
                    &tx,
                    &DietEntryCreate {
                        user_id,
                        day: Weekday::Monday,
                        meal_type,
                        item,
                    },
                )?;
            }

            for (category, exercise) in exercises {
                ExerciseEntry::create(
                    &tx,
                    &ExerciseEntryCreate {
                        user_id,
                        day: Weekday::Monday,
                        category,
                        exercise,
                    },
                )?;
            }

            let profile =
                ProfileMetrics::set(&tx, user_id, &ProfileMetrics::new(Some(175.0), Some(70.0)))?;

            tx.commit()?;
            Ok((rows_replaced, profile))
        })
        .map_err(|e| format!("Failed to seed sample plans: {}", e))?;

    tracing::info!(user_id, rows_replaced, "Seeded sample plans");
    Ok(SeedResponse {
        user_id,
        rows_replaced,
        meals: meal_count,
        exercises: exercise_count,
        profile,
    })
}
