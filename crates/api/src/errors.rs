use crate::dto::ApiResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use jenkin_domain::PruneError;
use tracing::error;

pub struct ApiError(pub PruneError);

impl From<PruneError> for ApiError {
    fn from(err: PruneError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            PruneError::AlreadyRunning => StatusCode::CONFLICT,
            PruneError::Connection(_) | PruneError::Cancelled { .. } => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            PruneError::InvalidSettings(_) => StatusCode::BAD_REQUEST,
            PruneError::BatchDelete { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self.0, status = status.as_u16(), "Request failed");
        }

        let body = ApiResponse::<()>::failure(status.as_u16(), self.0.to_string());
        (status, Json(body)).into_response()
    }
}
