//! Diet plan rows
//!
//! Each stored row is one meal item for a user, day and meal category.
//! Rows are grouped back into a [`DietWeek`] when read.

use std::collections::BTreeMap;

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;
use super::{DayPlan, DietWeek, MealCategory, MealItem, Weekday};

/// A stored meal row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DietEntry {
    pub id: i64,
    pub user_id: i64,
    pub day: String,
    pub meal_type: String,
    pub item: MealItem,
    pub created_at: String,
}

/// Data for saving a meal row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DietEntryCreate {
    pub user_id: i64,
    pub day: Weekday,
    pub meal_type: MealCategory,
    pub item: MealItem,
}

impl DietEntry {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            day: row.get("day")?,
            meal_type: row.get("meal_type")?,
            item: MealItem {
                name: row.get("meal_name")?,
                calories: row.get("calories")?,
                protein: row.get("protein")?,
                carbs: row.get("carbs")?,
                fat: row.get("fat")?,
            },
            created_at: row.get("created_at")?,
        })
    }

    /// Save a meal row
    pub fn create(conn: &Connection, data: &DietEntryCreate) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO diet_plans (user_id, day, meal_type, meal_name, calories, protein, carbs, fat)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                data.user_id,
                data.day.as_str(),
                data.meal_type.as_str(),
                data.item.name,
                data.item.calories,
                data.item.protein,
                data.item.carbs,
                data.item.fat,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    /// Get a meal row by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM diet_plans WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(entry) => Ok(Some(entry)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List a user's rows in insertion order
    pub fn list_for_user(conn: &Connection, user_id: i64) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM diet_plans WHERE user_id = ?1 ORDER BY id")?;
        let entries = stmt
            .query_map([user_id], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// Delete all of a user's rows
    pub fn delete_for_user(conn: &Connection, user_id: i64) -> DbResult<usize> {
        let rows = conn.execute("DELETE FROM diet_plans WHERE user_id = ?1", [user_id])?;
        Ok(rows)
    }

    /// Load a user's diet plan as a week
    pub fn week_for_user(conn: &Connection, user_id: i64) -> DbResult<DietWeek> {
        let entries = Self::list_for_user(conn, user_id)?;
        Ok(group_diet_entries(entries))
    }
}

/// Group rows by day and meal category, keeping row order within each list
pub fn group_diet_entries(entries: Vec<DietEntry>) -> DietWeek {
    let mut days: BTreeMap<String, DayPlan> = BTreeMap::new();

    for entry in entries {
        let Some(category) = MealCategory::from_str(&entry.meal_type) else {
            tracing::warn!(
                id = entry.id,
                meal_type = %entry.meal_type,
                "Skipping diet row with unknown meal type"
            );
            continue;
        };
        days.entry(entry.day)
            .or_default()
            .meals_mut(category)
            .push(entry.item);
    }

    DietWeek::from_labelled(days)
}
