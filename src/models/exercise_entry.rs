//! Exercise plan rows
//!
//! Each stored row is one exercise for a user, day and category. Completion
//! is not stored; rows always load with `completed = false`.

use std::collections::BTreeMap;

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;
use super::{Exercise, ExerciseCategory, Weekday, WorkoutPlan, WorkoutWeek};

/// A stored exercise row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseEntry {
    pub id: i64,
    pub user_id: i64,
    pub day: String,
    pub category: String,
    pub exercise: Exercise,
    pub created_at: String,
}

/// Data for saving an exercise row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseEntryCreate {
    pub user_id: i64,
    pub day: Weekday,
    pub category: ExerciseCategory,
    pub exercise: Exercise,
}

impl ExerciseEntry {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            day: row.get("day")?,
            category: row.get("category")?,
            exercise: Exercise {
                name: row.get("exercise_name")?,
                duration: row.get("duration")?,
                calories: row.get("calories")?,
                sets: row.get("sets")?,
                reps: row.get("reps")?,
                completed: false,
            },
            created_at: row.get("created_at")?,
        })
    }

    /// Save an exercise row
    pub fn create(conn: &Connection, data: &ExerciseEntryCreate) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO exercise_plans (user_id, day, category, exercise_name, duration, calories, sets, reps)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                data.user_id,
                data.day.as_str(),
                data.category.as_str(),
                data.exercise.name,
                data.exercise.duration,
                data.exercise.calories,
                data.exercise.sets,
                data.exercise.reps,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    /// Get an exercise row by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM exercise_plans WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(entry) => Ok(Some(entry)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List a user's rows in insertion order
    pub fn list_for_user(conn: &Connection, user_id: i64) -> DbResult<Vec<Self>> {
        let mut stmt =
            conn.prepare("SELECT * FROM exercise_plans WHERE user_id = ?1 ORDER BY id")?;
        let entries = stmt
            .query_map([user_id], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// Delete all of a user's rows
    pub fn delete_for_user(conn: &Connection, user_id: i64) -> DbResult<usize> {
        let rows = conn.execute("DELETE FROM exercise_plans WHERE user_id = ?1", [user_id])?;
        Ok(rows)
    }

    /// Load a user's exercise plan as a week
    pub fn week_for_user(conn: &Connection, user_id: i64) -> DbResult<WorkoutWeek> {
        let entries = Self::list_for_user(conn, user_id)?;
        Ok(group_exercise_entries(entries))
    }
}

#[derive(Default)]
struct DayLists {
    cardio: Vec<Exercise>,
    strength: Vec<Exercise>,
    flexibility: Vec<Exercise>,
}

/// Group rows by day and category, keeping row order within each list
pub fn group_exercise_entries(entries: Vec<ExerciseEntry>) -> WorkoutWeek {
    let mut days: BTreeMap<String, DayLists> = BTreeMap::new();

    for entry in entries {
        let Some(category) = ExerciseCategory::from_str(&entry.category) else {
            tracing::warn!(
                id = entry.id,
                category = %entry.category,
                "Skipping exercise row with unknown category"
            );
            continue;
        };
        let lists = days.entry(entry.day).or_default();
        match category {
            ExerciseCategory::Cardio => lists.cardio.push(entry.exercise),
            ExerciseCategory::Strength => lists.strength.push(entry.exercise),
            ExerciseCategory::Flexibility => lists.flexibility.push(entry.exercise),
        }
    }

    WorkoutWeek::from_labelled(days.into_iter().map(|(day, lists)| {
        (day, WorkoutPlan::new(lists.cardio, lists.strength, lists.flexibility))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    fn exercise(name: &str, duration: f64, sets: Option<u32>) -> Exercise {
        Exercise {
            name: name.to_string(),
            duration,
            calories: duration * 10.0,
            sets,
            reps: sets.map(|_| 12),
            completed: true,
        }
    }

    #[test]
    fn test_rows_group_into_week_without_completion() {
        let db = Database::in_memory().unwrap();
        db.with_conn(|conn| {
            for (category, ex) in [
                (ExerciseCategory::Cardio, exercise("Running", 20.0, None)),
                (ExerciseCategory::Strength, exercise("Push-ups", 10.0, Some(3))),
                (ExerciseCategory::Cardio, exercise("Jump Rope", 10.0, None)),
            ] {
                ExerciseEntry::create(
                    conn,
                    &ExerciseEntryCreate {
                        user_id: 4,
                        day: Weekday::Thursday,
                        category,
                        exercise: ex,
                    },
                )?;
            }

            let week = ExerciseEntry::week_for_user(conn, 4)?;
            let thursday = week.get(Weekday::Thursday).unwrap();

            let names: Vec<&str> = thursday.cardio.iter().map(|e| e.name.as_str()).collect();
            assert_eq!(names, vec!["Running", "Jump Rope"]);
            assert_eq!(thursday.strength[0].sets, Some(3));
            assert_eq!(thursday.strength[0].reps, Some(12));
            assert_eq!(thursday.cardio[0].sets, None);
            assert!(thursday.flexibility.is_empty());
            assert!(thursday.all_exercises().all(|e| !e.completed));
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_delete_for_user() {
        let db = Database::in_memory().unwrap();
        db.with_conn(|conn| {
            ExerciseEntry::create(
                conn,
                &ExerciseEntryCreate {
                    user_id: 4,
                    day: Weekday::Sunday,
                    category: ExerciseCategory::Flexibility,
                    exercise: exercise("Yoga Stretches", 15.0, None),
                },
            )?;

            assert_eq!(ExerciseEntry::delete_for_user(conn, 4)?, 1);
            assert_eq!(ExerciseEntry::delete_for_user(conn, 4)?, 0);
            assert!(ExerciseEntry::week_for_user(conn, 4)?.is_empty());
            Ok(())
        })
        .unwrap();
    }
}
