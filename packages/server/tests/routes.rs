use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use lander_assets::IngestOptions;
use lander_parts::AssetRef;
use lander_server::{router, AppState};
use std::io::{Cursor, Read};
use tower::ServiceExt;

const BOUNDARY: &str = "lander-test-boundary";

struct FormField<'a> {
    name: &'a str,
    file_name: Option<&'a str>,
    value: &'a [u8],
}

fn text<'a>(name: &'a str, value: &'a str) -> FormField<'a> {
    FormField {
        name,
        file_name: None,
        value: value.as_bytes(),
    }
}

fn file<'a>(name: &'a str, file_name: &'a str, value: &'a [u8]) -> FormField<'a> {
    FormField {
        name,
        file_name: Some(file_name),
        value,
    }
}

fn multipart_request(uri: &str, fields: &[FormField]) -> Request<Body> {
    let mut body = Vec::new();
    for field in fields {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match field.file_name {
            Some(file_name) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                    field.name, file_name
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", field.name).as_bytes(),
            ),
        }
        body.extend_from_slice(field.value);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

fn app() -> Router {
    router(AppState::new(IngestOptions::default(), true))
}

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
}

async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

const PARTS: &str = r#"[{"id": "1", "type": "hero", "title": "Spring sale"}, {"id": "2", "type": "footer"}]"#;

#[tokio::test]
async fn test_health() {
    let response = send(
        app(),
        Request::builder().uri("/health").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn test_preview_renders_parts_with_controls() {
    let request = multipart_request(
        "/preview",
        &[
            text("title", "Acme"),
            text("bgColor", "#fafafa"),
            text("parts", PARTS),
        ],
    );
    let response = send(app(), request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Spring sale"));
    assert!(html.contains("--bg-color: #fafafa;"));
    assert!(html.contains("data-action=\"edit\" data-part-id=\"1\""));
}

#[tokio::test]
async fn test_export_mode_has_no_controls() {
    let request = multipart_request("/preview", &[text("parts", PARTS), text("mode", "export")]);
    let html = body_text(send(app(), request).await).await;

    assert!(html.contains("Spring sale"));
    assert!(!html.contains("data-action"));
}

#[tokio::test]
async fn test_malformed_parts_render_empty_page() {
    let request = multipart_request("/preview", &[text("parts", "[{\"type\": ")]);
    let response = send(app(), request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(!html.contains("data-part-index"));
}

#[tokio::test]
async fn test_oversized_logo_is_rejected() {
    let ingest = IngestOptions {
        max_bytes: 1024,
        ..IngestOptions::default()
    };
    let app = router(AppState::new(ingest, true));
    let logo = vec![0u8; 2048];

    let request = multipart_request("/preview", &[text("parts", PARTS), file("logo", "logo.png", &logo)]);
    let response = send(app, request).await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_gallery_with_embedded_images_is_rendered() {
    let images: Vec<String> = (0..12u8)
        .map(|i| AssetRef::new("image/jpeg", vec![i; 1024 * 1024]).to_data_uri())
        .collect();
    let parts = serde_json::json!([
        {"id": "g", "type": "gallery", "title": "Work", "images": images},
        {"id": "f", "type": "footer"}
    ])
    .to_string();
    assert!(parts.len() > 16 * 1024 * 1024);

    let request = multipart_request("/preview", &[text("parts", &parts)]);
    let response = send(app(), request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert_eq!(html.matches("data:image/jpeg;base64,").count(), 12);
}

#[test]
fn test_body_limit_fits_a_full_page() {
    let state = AppState::new(IngestOptions::default(), true);
    let per_file = IngestOptions::default().max_bytes as usize;
    assert!(state.body_limit() > 50 * per_file * 4 / 3);
}

#[tokio::test]
async fn test_empty_file_field_is_ignored() {
    let request = multipart_request("/preview", &[text("parts", PARTS), file("logo", "", b"")]);
    let response = send(app(), request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(!body_text(response).await.contains("<img class=\"site-logo\""));
}

#[tokio::test]
async fn test_export_returns_archive() {
    let request = multipart_request("/export", &[text("title", "Acme"), text("parts", PARTS)]);
    let response = send(app(), request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/zip"
    );
    assert!(response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .contains("landing-page.zip"));

    let bytes = body_bytes(response).await;
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut html = String::new();
    archive
        .by_name("index.html")
        .unwrap()
        .read_to_string(&mut html)
        .unwrap();
    assert!(html.contains("Spring sale"));
    assert!(archive.by_name("style.css").is_ok());
}

#[tokio::test]
async fn test_schema_lists_every_part_type() {
    let response = send(
        app(),
        Request::builder().uri("/api/schema").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    let types: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|schema| schema["partType"].as_str())
        .collect();
    assert_eq!(types.len(), 10);
    assert!(types.contains(&"pricing"));
}

#[tokio::test]
async fn test_form_for_part_record() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/form")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"id": "7", "type": "faq"}"#))
        .unwrap();
    let response = send(app(), request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("name=\"items.0.question\""));
}

#[tokio::test]
async fn test_form_rejects_unknown_type() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/form")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"type": "carousel"}"#))
        .unwrap();
    let response = send(app(), request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
