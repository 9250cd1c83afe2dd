use axum::extract::State;
use axum::{Form, Json};
use serde::Deserialize;

use dialback_core::{DialbackError, ScheduleReceipt};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScheduleForm {
    /// Raw form value — parsed here so "abc" and a missing field both get
    /// the same 400 as an out-of-range number.
    #[serde(default)]
    pub delay: Option<String>,
}

/// POST /schedule — validate the delay and arm the scheduler.
pub async fn schedule_call(
    State(app): State<AppState>,
    Form(form): Form<ScheduleForm>,
) -> Result<Json<ScheduleReceipt>, AppError> {
    let delay: i64 = form
        .delay
        .as_deref()
        .and_then(|raw| raw.trim().parse().ok())
        .ok_or(DialbackError::InvalidDelay)?;

    let receipt = app.scheduler.schedule(delay).await?;
    Ok(Json(receipt))
}
