//! Profile and BMI Tools

use std::sync::Mutex;

use serde::Serialize;

use super::plans::{dispatch, lock};
use crate::client::PlanSource;
use crate::db::Database;
use crate::metrics::{calculate_bmi, Bmi, BmiCategory};
use crate::models::ProfileMetrics;
use crate::planner::{Action, PlannerState, Screen};

/// BMI reading with its category
#[derive(Debug, Serialize)]
pub struct BmiView {
    pub bmi: Bmi,
    /// Absent until both height and weight are set
    pub category: Option<BmiCategory>,
}

impl From<Bmi> for BmiView {
    fn from(bmi: Bmi) -> Self {
        Self {
            bmi,
            category: bmi.category(),
        }
    }
}

/// Profile measurements with the derived BMI
#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    #[serde(flatten)]
    pub bmi: BmiView,
}

impl From<&ProfileMetrics> for ProfileView {
    fn from(metrics: &ProfileMetrics) -> Self {
        Self {
            height_cm: metrics.height_cm,
            weight_kg: metrics.weight_kg,
            bmi: metrics.bmi().into(),
        }
    }
}

/// BMI for arbitrary measurements, without touching the session profile
pub fn calculate_bmi_tool(height_cm: Option<f64>, weight_kg: Option<f64>) -> BmiView {
    calculate_bmi(height_cm, weight_kg).into()
}

/// Fetch the user's profile. On failure the session keeps its current measurements.
pub async fn load_profile(
    planner: &Mutex<PlannerState>,
    source: &dyn PlanSource,
    user_id: i64,
) -> Result<ProfileView, String> {
    let ticket = {
        let mut state = lock(planner)?;
        let (next, ticket) = state.begin_load(Screen::Profile);
        *state = next;
        ticket
    };

    let action = match source.profile(user_id).await {
        Ok(metrics) => Action::ProfileLoaded { ticket, metrics },
        Err(e) => Action::LoadFailed {
            screen: Screen::Profile,
            ticket,
            message: e.to_string(),
        },
    };

    let state = dispatch(planner, action)?;
    Ok(ProfileView::from(&state.profile))
}

/// Replace the session's measurements, optionally saving them to the plan store
pub fn set_profile(
    planner: &Mutex<PlannerState>,
    db: &Database,
    user_id: i64,
    metrics: ProfileMetrics,
    save: bool,
) -> Result<ProfileView, String> {
    if save {
        db.with_conn(|conn| ProfileMetrics::set(conn, user_id, &metrics))
            .map_err(|e| format!("Failed to save profile: {}", e))?;
    }

    let state = dispatch(planner, Action::SetProfile(metrics))?;
    Ok(ProfileView::from(&state.profile))
}
