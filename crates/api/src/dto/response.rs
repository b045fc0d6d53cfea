use serde::Serialize;
use serde_json::Value;

/// Envelope shared by every JSON response under `/api`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: u16,
    pub message: String,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception_message: Option<Value>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            code: 200,
            message: "OK".to_string(),
            data: Some(data),
            exception_message: None,
        }
    }

    pub fn failure(code: u16, message: impl Into<String>) -> Self {
        Self {
            success: false,
            code,
            message: message.into(),
            data: None,
            exception_message: None,
        }
    }

    pub fn with_exception(mut self, details: Value) -> Self {
        self.exception_message = Some(details);
        self
    }
}
