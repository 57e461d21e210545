//! Plan sources
//!
//! Where diet plans, exercise plans and profile metrics come from: the
//! remote plan backend, or the local plan store.

mod backend;
mod store;

use async_trait::async_trait;
use thiserror::Error;

use crate::db::DbError;
use crate::models::{DietWeek, ProfileMetrics, WorkoutWeek};

pub use backend::BackendClient;
pub use store::StorePlanSource;

/// Errors from loading plans
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Plan store error: {0}")]
    Db(#[from] DbError),
}

pub type SourceResult<T> = Result<T, SourceError>;

/// Loads a user's plans and measurements.
///
/// An absent plan is an empty week, not an error.
#[async_trait]
pub trait PlanSource: Send + Sync {
    async fn diet_week(&self, user_id: i64) -> SourceResult<DietWeek>;

    async fn workout_week(&self, user_id: i64) -> SourceResult<WorkoutWeek>;

    async fn profile(&self, user_id: i64) -> SourceResult<ProfileMetrics>;

    /// Short label for status output and logs
    fn describe(&self) -> String;
}
