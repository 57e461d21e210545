//! Local plan store as a plan source

use async_trait::async_trait;

use super::{PlanSource, SourceResult};
use crate::db::Database;
use crate::models::{DietEntry, DietWeek, ExerciseEntry, ProfileMetrics, WorkoutWeek};

/// Serves plans saved in the local SQLite store
#[derive(Clone)]
pub struct StorePlanSource {
    database: Database,
}

impl StorePlanSource {
    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

#[async_trait]
impl PlanSource for StorePlanSource {
    async fn diet_week(&self, user_id: i64) -> SourceResult<DietWeek> {
        Ok(self
            .database
            .with_conn(|conn| DietEntry::week_for_user(conn, user_id))?)
    }

    async fn workout_week(&self, user_id: i64) -> SourceResult<WorkoutWeek> {
        Ok(self
            .database
            .with_conn(|conn| ExerciseEntry::week_for_user(conn, user_id))?)
    }

    async fn profile(&self, user_id: i64) -> SourceResult<ProfileMetrics> {
        let metrics = self
            .database
            .with_conn(|conn| ProfileMetrics::get(conn, user_id))?;
        Ok(metrics.unwrap_or_default())
    }

    fn describe(&self) -> String {
        "local plan store".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DietEntryCreate, MealCategory, MealItem, Weekday};

    #[tokio::test]
    async fn test_empty_store_gives_empty_plans() {
        let source = StorePlanSource::new(Database::in_memory().unwrap());

        assert!(source.diet_week(1).await.unwrap().is_empty());
        assert!(source.workout_week(1).await.unwrap().is_empty());
        assert_eq!(source.profile(1).await.unwrap(), ProfileMetrics::default());
    }

    #[tokio::test]
    async fn test_saved_rows_are_served() {
        let database = Database::in_memory().unwrap();
        database
            .with_conn(|conn| {
                DietEntry::create(
                    conn,
                    &DietEntryCreate {
                        user_id: 3,
                        day: Weekday::Saturday,
                        meal_type: MealCategory::Dinner,
                        item: MealItem {
                            name: "Steamed Vegetables".into(),
                            calories: 120.0,
                            protein: 4.0,
                            carbs: 20.0,
                            fat: 2.0,
                        },
                    },
                )?;
                ProfileMetrics::set(conn, 3, &ProfileMetrics::new(Some(160.0), Some(90.0)))?;
                Ok(())
            })
            .unwrap();

        let source = StorePlanSource::new(database);
        let week = source.diet_week(3).await.unwrap();
        assert_eq!(week.get(Weekday::Saturday).unwrap().dinner[0].name, "Steamed Vegetables");
        assert_eq!(source.profile(3).await.unwrap().bmi().to_string(), "35.2");
    }
}
