//! Data models
//!
//! Plan records, profile metrics, and the stored rows they load from.

pub mod lenient;

mod diet_entry;
mod exercise;
mod exercise_entry;
mod meal;
mod nutrition;
mod profile;
mod week;
mod weekday;

pub use diet_entry::{group_diet_entries, DietEntry, DietEntryCreate};
pub use exercise::{Exercise, ExerciseCategory, WorkoutPlan};
pub use exercise_entry::{group_exercise_entries, ExerciseEntry, ExerciseEntryCreate};
pub use meal::{DayPlan, MealCategory, MealItem};
pub use nutrition::Nutrition;
pub use profile::ProfileMetrics;
pub use week::{DietWeek, Week, WorkoutWeek};
pub use weekday::Weekday;
