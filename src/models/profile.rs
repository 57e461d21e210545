//! Profile metrics model
//!
//! Height and weight used to derive BMI. Either may be unset.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use super::lenient;
use crate::db::DbResult;

/// Body measurements from the user's profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileMetrics {
    #[serde(
        rename = "height",
        alias = "height_cm",
        default,
        deserialize_with = "lenient::optional_number"
    )]
    pub height_cm: Option<f64>,
    #[serde(
        rename = "weight",
        alias = "weight_kg",
        default,
        deserialize_with = "lenient::optional_number"
    )]
    pub weight_kg: Option<f64>,
}

impl ProfileMetrics {
    pub fn new(height_cm: Option<f64>, weight_kg: Option<f64>) -> Self {
        Self { height_cm, weight_kg }
    }

    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            height_cm: row.get("height")?,
            weight_kg: row.get("weight")?,
        })
    }

    /// Get a user's stored metrics
    pub fn get(conn: &Connection, user_id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT height, weight FROM profiles WHERE user_id = ?1")?;

        let result = stmt.query_row([user_id], Self::from_row);
        match result {
            Ok(metrics) => Ok(Some(metrics)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set or replace a user's metrics (upsert)
    pub fn set(conn: &Connection, user_id: i64, metrics: &ProfileMetrics) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO profiles (user_id, height, weight)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(user_id) DO UPDATE SET
                height = excluded.height,
                weight = excluded.weight,
                updated_at = datetime('now')
            "#,
            params![user_id, metrics.height_cm, metrics.weight_kg],
        )?;

        Self::get(conn, user_id)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    #[test]
    fn test_null_and_text_measurements() {
        let metrics: ProfileMetrics =
            serde_json::from_str(r#"{"height": "175", "weight": null}"#).unwrap();
        assert_eq!(metrics.height_cm, Some(175.0));
        assert_eq!(metrics.weight_kg, None);

        let metrics: ProfileMetrics = serde_json::from_str("{}").unwrap();
        assert_eq!(metrics, ProfileMetrics::default());
    }

    #[test]
    fn test_set_and_get() {
        let db = Database::in_memory().unwrap();
        db.with_conn(|conn| {
            assert_eq!(ProfileMetrics::get(conn, 7)?, None);

            ProfileMetrics::set(conn, 7, &ProfileMetrics::new(Some(175.0), Some(70.0)))?;
            let updated = ProfileMetrics::set(conn, 7, &ProfileMetrics::new(Some(175.0), None))?;

            assert_eq!(updated, ProfileMetrics::new(Some(175.0), None));
            Ok(())
        })
        .unwrap();
    }
}
