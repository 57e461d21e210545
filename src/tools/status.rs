//! MediNova Status Tool
//!
//! Runtime status and usage instructions for the MediNova service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

/// Package version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Planner usage instructions for AI assistants
pub const PLANNER_INSTRUCTIONS: &str = r#"
# MediNova Planner Instructions

## Session model

The server keeps one planner session in memory: a selected weekday, the
loaded diet plan, the loaded exercise plan, and profile measurements.

- Exercise completion marks live only in this session. They are never saved
  and are cleared when the plan is reloaded or the server restarts.
- Totals are always recomputed from the loaded items.

## Typical workflow

1. `load_diet_plan` and `load_exercise_plan` to fetch the user's week.
2. `select_day` with a weekday name (Monday..Sunday, or mon..sun).
3. `get_diet_summary` / `get_workout_summary` for the selected day.
4. `toggle_exercise` with a category (Cardio, Strength, Flexibility) and the
   zero-based position of the exercise in that category.
5. `get_day_summary` for nutrition, workout progress and BMI together.

If a load fails the view reports `"status": "failed"` with an `error`, and
totals show an empty plan. Loads are not retried; call the load tool again.

## BMI

- `load_profile` fetches height (cm) and weight (kg).
- `set_profile` replaces them for this session (`save: true` also stores them).
- `calculate_bmi` works on any measurements without changing the session.
- Missing, zero, or invalid measurements give BMI `"0.0"` with no category.

| BMI | Category |
|-----|----------|
| below 18.5 | Underweight |
| 18.5 to below 25 | Normal |
| 25 to below 30 | Overweight |
| 30 and above | Obese |

## Plan store

`save_meal`, `save_exercise`, `delete_diet_plan` and `delete_exercise_plan`
edit the local plan store. They take effect on the next load when the server
reads plans from the local store.
"#;

/// Status information
#[derive(Debug, Serialize)]
pub struct MedinovaStatus {
    pub name: &'static str,
    pub version: &'static str,
    pub plan_source: String,
    pub user_id: i64,
    pub database_path: String,
    pub database_size_bytes: Option<u64>,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Tracks service start time and static details for status reports
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
    plan_source: String,
    user_id: i64,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf, plan_source: String, user_id: i64) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
            plan_source,
            user_id,
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> MedinovaStatus {
        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        MedinovaStatus {
            name: NAME,
            version: VERSION,
            plan_source: self.plan_source.clone(),
            user_id: self.user_id,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reports_source_and_missing_database() {
        let tracker = StatusTracker::new(
            PathBuf::from("/nonexistent/medinova.db"),
            "local plan store".to_string(),
            9,
        );
        let status = tracker.get_status();

        assert_eq!(status.name, "medinova");
        assert_eq!(status.plan_source, "local plan store");
        assert_eq!(status.user_id, 9);
        assert_eq!(status.database_size_bytes, None);
        assert_eq!(status.process_id, std::process::id());
    }
}
