use axum::extract::State;
use axum::Json;

use dialback_core::StatusReport;

use crate::error::AppError;
use crate::state::AppState;

/// GET /status — current record projected as JSON. Always succeeds.
pub async fn get_status(State(app): State<AppState>) -> Result<Json<StatusReport>, AppError> {
    Ok(Json(app.scheduler.status().await?))
}
