use axum::{
    body::{to_bytes, Body, Bytes, HttpBody},
    extract::{Request, State},
    http::{HeaderMap, StatusCode, Uri},
    middleware::Next,
    response::Response,
};
use jenkin_domain::config::RequestLoggingConfig;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

const NOT_BUFFERED: &str = "<not buffered>";

/// Logs request and response bodies for paths under the configured prefix.
/// Bodies within the buffer limit are read into memory and handed on
/// unchanged; larger or unsized bodies stream through unlogged.
pub async fn log_requests(
    State(config): State<Arc<RequestLoggingConfig>>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if !config.enabled || !matches_prefix(request.uri().path(), &config.path_prefix) {
        return Ok(next.run(request).await);
    }

    let started = Instant::now();
    let scheme = request.uri().scheme_str().unwrap_or("http").to_string();
    let method = request.method().clone();
    let path = path_and_query(request.uri());

    let (parts, body) = request.into_parts();
    let (body, logged) = buffer_for_log(body, &config).await.map_err(|e| {
        warn!(error = %e, method = %method, path = %path, "Failed to read request body");
        StatusCode::BAD_REQUEST
    })?;

    debug!(
        scheme = %scheme,
        method = %method,
        path = %path,
        headers = %format_headers(&parts.headers),
        body = %logged.as_deref().unwrap_or(NOT_BUFFERED),
        "HTTP request"
    );

    let request = Request::from_parts(parts, body);
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let (body, logged) = buffer_for_log(body, &config).await.map_err(|e| {
        warn!(error = %e, method = %method, path = %path, "Failed to read response body");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    debug!(
        scheme = %scheme,
        method = %method,
        path = %path,
        status = parts.status.as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        body = %logged.as_deref().unwrap_or(NOT_BUFFERED),
        "HTTP response"
    );

    Ok(Response::from_parts(parts, body))
}

/// Buffers a body whose declared size fits `max_buffer_bytes` and returns it
/// with its log rendering. Anything else is handed back untouched.
async fn buffer_for_log(
    body: Body,
    config: &RequestLoggingConfig,
) -> Result<(Body, Option<String>), axum::Error> {
    let limit = config.max_buffer_bytes;
    let fits = body
        .size_hint()
        .upper()
        .is_some_and(|len| len <= limit as u64);
    if !fits {
        return Ok((body, None));
    }

    let bytes = to_bytes(body, limit).await?;
    let logged = body_for_log(&bytes, config.max_body_bytes);
    Ok((Body::from(bytes), Some(logged)))
}

/// Segment match, ASCII case-insensitive: `/api` matches `/api` and
/// `/API/x` but not `/apix`.
pub fn matches_prefix(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return true;
    }

    match path.get(..prefix.len()) {
        Some(head) if head.eq_ignore_ascii_case(prefix) => {
            let rest = &path[prefix.len()..];
            rest.is_empty() || rest.starts_with('/')
        }
        _ => false,
    }
}

fn path_and_query(uri: &Uri) -> String {
    uri.path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string())
}

fn format_headers(headers: &HeaderMap) -> String {
    let joined = headers
        .iter()
        .map(|(name, value)| format!("{} {}", name, String::from_utf8_lossy(value.as_bytes())))
        .collect::<Vec<_>>()
        .join(",");
    format!("[{}]", joined)
}

fn body_for_log(bytes: &Bytes, max_bytes: usize) -> String {
    let end = bytes.len().min(max_bytes);
    String::from_utf8_lossy(&bytes[..end])
        .chars()
        .filter(|c| *c != '\n' && *c != '\r')
        .collect()
}
