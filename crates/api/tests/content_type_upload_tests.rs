use axum::{
    body::Body,
    extract::Multipart,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use http_body_util::BodyExt;
use jenkin_api::validation::validate_upload;
use jenkin_domain::{ContentTypeGroup, ContentTypeValidator};
use serde_json::Value;
use tower::ServiceExt;

const BOUNDARY: &str = "jenkin-boundary";

async fn upload(mut multipart: Multipart) -> Response {
    let validator = ContentTypeValidator::for_group(ContentTypeGroup::Image);
    let mut accepted = 0;
    while let Ok(Some(field)) = multipart.next_field().await {
        if let Err(rejection) = validate_upload(&validator, &field) {
            return rejection.into_response();
        }
        accepted += 1;
    }
    format!("accepted {}", accepted).into_response()
}

fn create_router() -> Router {
    Router::new().route("/upload", post(upload))
}

fn multipart_request(content_type: Option<&str>) -> Request<Body> {
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"avatar\"; filename=\"a.bin\"\r\n"
    );
    if let Some(ct) = content_type {
        body.push_str(&format!("Content-Type: {ct}\r\n"));
    }
    body.push_str(&format!("\r\nDATA\r\n--{BOUNDARY}--\r\n"));

    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn read(response: Response) -> (StatusCode, Vec<u8>) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

#[tokio::test]
async fn test_image_upload_accepted() {
    let response = create_router()
        .oneshot(multipart_request(Some("image/png")))
        .await
        .unwrap();

    let (status, body) = read(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"accepted 1");
}

#[tokio::test]
async fn test_undeclared_content_type_accepted() {
    let response = create_router()
        .oneshot(multipart_request(None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_disallowed_content_type_rejected() {
    let response = create_router()
        .oneshot(multipart_request(Some("application/pdf")))
        .await
        .unwrap();

    let (status, body) = read(response).await;
    let json: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(
        json["exceptionMessage"]["avatar"][0],
        "Content-Type should be one of the following: image/jpeg,image/jpg,image/png,image/gif"
    );
}
