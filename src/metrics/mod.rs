//! Health metrics
//!
//! Pure aggregations over plan records: nutrition totals, workout totals and
//! progress, and BMI classification. Nothing here performs I/O or fails.

pub mod bmi;
pub mod nutrition;
pub mod workout;

pub use bmi::{calculate_bmi, calculate_bmi_from_input, classify_bmi, Bmi, BmiCategory};
pub use nutrition::nutrition_totals;
pub use workout::{toggle_completion, workout_stats, WorkoutStats};
