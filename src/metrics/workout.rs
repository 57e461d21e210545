//! Workout totals and completion progress

use std::sync::Arc;

use serde::Serialize;

use crate::models::{ExerciseCategory, Weekday, WorkoutPlan, WorkoutWeek};

/// Totals for one day's workout
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct WorkoutStats {
    pub total_calories: f64,
    pub total_minutes: f64,
    pub completed_count: usize,
    pub total_count: usize,
}

impl WorkoutStats {
    /// Percentage of exercises marked completed, 0 for an empty plan
    pub fn progress_percentage(&self) -> f64 {
        if self.total_count == 0 {
            return 0.0;
        }
        self.completed_count as f64 / self.total_count as f64 * 100.0
    }
}

/// Sum calories and minutes across all categories and count completions
pub fn workout_stats(plan: &WorkoutPlan) -> WorkoutStats {
    plan.all_exercises()
        .fold(WorkoutStats::default(), |mut stats, exercise| {
            stats.total_calories += exercise.calories;
            stats.total_minutes += exercise.duration;
            stats.total_count += 1;
            if exercise.completed {
                stats.completed_count += 1;
            }
            stats
        })
}

/// Flip the completion flag of one exercise.
///
/// Only the day's plan and the touched category list are rebuilt; every other
/// day and category list in the returned week is shared with `week`. A day
/// with no plan or an out-of-range index returns an identical week.
pub fn toggle_completion(
    week: &WorkoutWeek,
    day: Weekday,
    category: ExerciseCategory,
    index: usize,
) -> WorkoutWeek {
    let Some(plan) = week.get(day) else {
        tracing::debug!(%day, "No workout plan for day, toggle ignored");
        return week.clone();
    };

    let exercises = plan.exercises(category);
    if index >= exercises.len() {
        tracing::debug!(
            %day,
            category = category.as_str(),
            index,
            "Exercise index out of range, toggle ignored"
        );
        return week.clone();
    }

    let mut list = exercises.to_vec();
    list[index].completed = !list[index].completed;

    let updated = plan.with_exercises(category, Arc::from(list));
    week.with_day(day, Arc::new(updated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Exercise;

    fn exercise(name: &str, duration: f64, calories: f64, completed: bool) -> Exercise {
        Exercise {
            name: name.to_string(),
            duration,
            calories,
            sets: None,
            reps: None,
            completed,
        }
    }

    fn sample_plan() -> WorkoutPlan {
        WorkoutPlan::new(
            vec![
                exercise("Running", 30.0, 300.0, false),
                exercise("Cycling", 20.0, 200.0, false),
            ],
            vec![
                exercise("Push-ups", 10.0, 80.0, false),
                exercise("Squats", 10.0, 70.0, false),
                exercise("Planks", 5.0, 40.0, false),
            ],
            vec![
                exercise("Yoga Flow", 15.0, 60.0, false),
                exercise("Stretching", 10.0, 30.0, false),
            ],
        )
    }

    fn sample_week() -> WorkoutWeek {
        WorkoutWeek::from_labelled(vec![
            ("Monday".to_string(), sample_plan()),
            ("Tuesday".to_string(), sample_plan()),
        ])
    }

    #[test]
    fn test_sample_stats() {
        let stats = workout_stats(&sample_plan());
        assert_eq!(stats.total_calories, 780.0);
        assert_eq!(stats.total_minutes, 100.0);
        assert_eq!(stats.total_count, 7);
        assert_eq!(stats.completed_count, 0);
        assert_eq!(stats.progress_percentage(), 0.0);
    }

    #[test]
    fn test_empty_plan_progress_is_zero() {
        let stats = workout_stats(&WorkoutPlan::default());
        assert_eq!(stats, WorkoutStats::default());
        assert_eq!(stats.progress_percentage(), 0.0);
    }

    #[test]
    fn test_progress_percentage() {
        let plan = WorkoutPlan::new(
            vec![exercise("Running", 30.0, 300.0, true)],
            vec![exercise("Squats", 10.0, 70.0, false)],
            vec![
                exercise("Yoga Flow", 15.0, 60.0, true),
                exercise("Stretching", 10.0, 30.0, true),
            ],
        );
        let stats = workout_stats(&plan);
        assert_eq!(stats.completed_count, 3);
        assert_eq!(stats.progress_percentage(), 75.0);

        let all_done =
            WorkoutPlan::new(vec![exercise("Running", 30.0, 300.0, true)], vec![], vec![]);
        assert_eq!(workout_stats(&all_done).progress_percentage(), 100.0);
    }

    #[test]
    fn test_toggle_flips_only_target() {
        let week = sample_week();
        let toggled = toggle_completion(&week, Weekday::Monday, ExerciseCategory::Cardio, 0);

        let before = week.get(Weekday::Monday).unwrap();
        let after = toggled.get(Weekday::Monday).unwrap();

        assert!(after.cardio[0].completed);
        assert!(!before.cardio[0].completed);
        assert_eq!(after.cardio[1], before.cardio[1]);

        assert!(Arc::ptr_eq(&before.strength, &after.strength));
        assert!(Arc::ptr_eq(&before.flexibility, &after.flexibility));
        assert!(Arc::ptr_eq(
            week.get(Weekday::Tuesday).unwrap(),
            toggled.get(Weekday::Tuesday).unwrap()
        ));
        assert_eq!(toggled.get(Weekday::Tuesday).unwrap().as_ref(), &sample_plan());
    }

    #[test]
    fn test_toggle_twice_restores_flag() {
        let week = sample_week();
        let once = toggle_completion(&week, Weekday::Monday, ExerciseCategory::Strength, 2);
        let twice = toggle_completion(&once, Weekday::Monday, ExerciseCategory::Strength, 2);

        assert_eq!(workout_stats(&once.plan_or_empty(Weekday::Monday)).completed_count, 1);
        assert_eq!(twice, week);
    }

    #[test]
    fn test_toggle_out_of_range_or_missing_day_is_noop() {
        let week = sample_week();

        let out_of_range =
            toggle_completion(&week, Weekday::Monday, ExerciseCategory::Flexibility, 9);
        assert!(Arc::ptr_eq(
            week.get(Weekday::Monday).unwrap(),
            out_of_range.get(Weekday::Monday).unwrap()
        ));

        let missing = toggle_completion(&week, Weekday::Sunday, ExerciseCategory::Cardio, 0);
        assert_eq!(missing, week);
        assert!(missing.get(Weekday::Sunday).is_none());
    }
}
