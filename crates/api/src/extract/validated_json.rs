use crate::dto::ApiResponse;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::collections::BTreeMap;
use tracing::warn;
use validator::{Validate, ValidationError, ValidationErrors};

const INVALID_BODY_MESSAGE: &str = "Request body is invalid";

/// JSON body that has been deserialised and checked against its
/// `validator` rules. Any failure short-circuits the handler with a 400
/// envelope listing the messages per field.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidationRejection::from)?;
        value.validate().map_err(ValidationRejection::from)?;
        Ok(Self(value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRejection {
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationRejection {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(field.into(), vec![message.into()]);
        Self { errors }
    }

    pub fn errors(&self) -> &BTreeMap<String, Vec<String>> {
        &self.errors
    }
}

impl From<JsonRejection> for ValidationRejection {
    fn from(rejection: JsonRejection) -> Self {
        let field = match &rejection {
            JsonRejection::MissingJsonContentType(_) => "contentType",
            _ => "body",
        };
        Self::single(field, rejection.body_text())
    }
}

impl From<ValidationErrors> for ValidationRejection {
    fn from(errors: ValidationErrors) -> Self {
        let errors = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages = errs.iter().map(describe).collect();
                (field.to_string(), messages)
            })
            .collect();
        Self { errors }
    }
}

fn describe(error: &ValidationError) -> String {
    match &error.message {
        Some(message) => message.to_string(),
        None => format!("failed `{}` validation", error.code),
    }
}

impl IntoResponse for ValidationRejection {
    fn into_response(self) -> Response {
        let code = StatusCode::BAD_REQUEST.as_u16();
        warn!(
            filter = "Model Filter",
            code,
            errors = ?self.errors,
            "Bad request, body is invalid"
        );

        let body =
            ApiResponse::<()>::failure(code, INVALID_BODY_MESSAGE).with_exception(json!(self.errors));
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}
