//! Plan backend client
//!
//! `GET {base}/diet/{user_id}`, `GET {base}/exercise/{user_id}` and
//! `GET {base}/profile/{user_id}`. Plans arrive wrapped in an envelope:
//! `{"success": true, "diet_plan": {...}}`, or `{"success": false, "message":
//! "No diet plan found"}` when the user has none.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{PlanSource, SourceError, SourceResult};
use crate::models::{DietWeek, ProfileMetrics, Week, WorkoutWeek};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Deserialize)]
struct PlanEnvelope<W> {
    #[serde(default = "default_success")]
    success: bool,
    #[serde(alias = "diet_plan", alias = "exercise_plan", default)]
    plan: Option<W>,
    #[serde(default)]
    message: Option<String>,
}

fn default_success() -> bool {
    true
}

impl<P> PlanEnvelope<Week<P>> {
    fn into_week(self) -> Week<P> {
        if !self.success {
            tracing::debug!(message = ?self.message, "Backend has no plan");
            return Week::new();
        }
        self.plan.unwrap_or_default()
    }
}

/// Map a backend status: 2xx carries a body to decode, 404 means the user has
/// nothing stored yet, anything else is a failed load.
fn has_body(status: StatusCode, url: &str) -> SourceResult<bool> {
    match status {
        StatusCode::NOT_FOUND => Ok(false),
        status if status.is_success() => Ok(true),
        status => Err(SourceError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        }),
    }
}

/// HTTP client for the plan backend
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl BackendClient {
    pub fn new(base_url: &str, auth_token: Option<String>) -> SourceResult<Self> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token,
        })
    }

    fn url(&self, resource: &str, user_id: i64) -> String {
        format!("{}/{}/{}", self.base_url, resource, user_id)
    }

    /// GET a JSON resource; `None` when the backend answers 404
    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        user_id: i64,
    ) -> SourceResult<Option<T>> {
        let url = self.url(resource, user_id);
        let mut request = self.http.get(&url);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        tracing::debug!(%url, "Fetching from plan backend");
        let response = request.send().await?;

        if !has_body(response.status(), &url)? {
            return Ok(None);
        }
        Ok(Some(response.json::<T>().await?))
    }

    async fn week<P: DeserializeOwned>(
        &self,
        resource: &str,
        user_id: i64,
    ) -> SourceResult<Week<P>> {
        let envelope: Option<PlanEnvelope<Week<P>>> = self.get_json(resource, user_id).await?;
        Ok(envelope.map(PlanEnvelope::into_week).unwrap_or_default())
    }
}

#[async_trait]
impl PlanSource for BackendClient {
    async fn diet_week(&self, user_id: i64) -> SourceResult<DietWeek> {
        self.week("diet", user_id).await
    }

    async fn workout_week(&self, user_id: i64) -> SourceResult<WorkoutWeek> {
        self.week("exercise", user_id).await
    }

    async fn profile(&self, user_id: i64) -> SourceResult<ProfileMetrics> {
        let metrics: Option<ProfileMetrics> = self.get_json("profile", user_id).await?;
        Ok(metrics.unwrap_or_default())
    }

    fn describe(&self) -> String {
        format!("backend {}", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Weekday;

    fn envelope<P: DeserializeOwned>(json: &str) -> Week<P> {
        serde_json::from_str::<PlanEnvelope<Week<P>>>(json)
            .unwrap()
            .into_week()
    }

    #[test]
    fn test_status_mapping() {
        let url = "http://backend/diet/1";
        assert!(has_body(StatusCode::OK, url).unwrap());
        assert!(!has_body(StatusCode::NOT_FOUND, url).unwrap());

        match has_body(StatusCode::SERVICE_UNAVAILABLE, url) {
            Err(SourceError::Status { status, url }) => {
                assert_eq!(status, 503);
                assert_eq!(url, "http://backend/diet/1");
            }
            other => panic!("expected a status error, got {:?}", other.map_err(|e| e.to_string())),
        }
        assert!(has_body(StatusCode::UNAUTHORIZED, url).is_err());
    }

    #[test]
    fn test_url_building() {
        let client = BackendClient::new("https://medinova.example.com/", None).unwrap();
        assert_eq!(client.url("diet", 12), "https://medinova.example.com/diet/12");
        assert_eq!(client.describe(), "backend https://medinova.example.com");
    }

    #[test]
    fn test_diet_envelope() {
        let week: DietWeek = envelope(
            r#"{"success": true, "diet_plan": {
                "Monday": {"breakfast": [{"name": "Oatmeal", "calories": 320, "protein": 12, "carbs": 54, "fat": 6}],
                           "lunch": [], "dinner": [], "snacks": []}
            }}"#,
        );
        assert_eq!(week.len(), 1);
        assert_eq!(week.get(Weekday::Monday).unwrap().breakfast[0].calories, 320.0);
    }

    #[test]
    fn test_exercise_envelope() {
        let week: WorkoutWeek = envelope(
            r#"{"success": true, "exercise_plan": {
                "Friday": {"Cardio": [{"exercise_name": "Running", "duration": 20, "calories": 200, "sets": null, "reps": null}],
                           "Strength": [], "Flexibility": []}
            }}"#,
        );
        assert_eq!(week.get(Weekday::Friday).unwrap().cardio[0].name, "Running");
    }

    #[test]
    fn test_no_plan_envelope_is_empty_week() {
        let week: DietWeek = envelope(r#"{"success": false, "message": "No diet plan found"}"#);
        assert!(week.is_empty());

        let week: WorkoutWeek = envelope(r#"{"success": true, "exercise_plan": {}}"#);
        assert!(week.is_empty());
    }
}
