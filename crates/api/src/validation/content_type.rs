use crate::extract::ValidationRejection;
use axum::extract::multipart::Field;
use jenkin_domain::ContentTypeValidator;

/// Checks the content type a client declared for one multipart field.
/// Rejections are keyed by the field name, like body validation errors.
pub fn validate_upload(
    validator: &ContentTypeValidator,
    field: &Field<'_>,
) -> Result<(), ValidationRejection> {
    validator.validate(field.content_type()).map_err(|e| {
        ValidationRejection::single(field.name().unwrap_or("file"), e.to_string())
    })
}
