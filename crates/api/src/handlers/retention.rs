use axum::{extract::State, Json};
use tracing::info;

use crate::{
    dto::{ApiResponse, RetentionReportDto, RunRetentionRequest},
    errors::ApiError,
    extract::ValidatedJson,
    state::AppState,
};

/// Runs one prune immediately, optionally with a different window or batch size.
pub async fn run_retention(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RunRetentionRequest>,
) -> Result<Json<ApiResponse<RetentionReportDto>>, ApiError> {
    let settings = state
        .cleanup
        .settings()
        .with_overrides(req.retention_days, req.batch_size)?;

    info!(
        retention_days = settings.retention_days(),
        batch_size = settings.batch_size(),
        "Manual log retention run requested"
    );

    let report = state.cleanup.execute_with(&settings, &state.shutdown).await?;
    Ok(Json(ApiResponse::success(report.into())))
}
