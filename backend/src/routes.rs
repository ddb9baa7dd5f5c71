use actix_files::Files;
use actix_multipart::Multipart;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use log::{error, info};
use shared::{ErrorResponse, HealthResponse, IdentifyResponse, SegmentResponse};

use crate::config::AppConfig;
use crate::gemini::{GeminiError, GeminiService};
use crate::upload::{read_upload_form, UploadError};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error("Nenhum objeto foi informado para isolar.")]
    MissingLabel,
    #[error("Não foi possível identificar objetos na imagem. Tente novamente.")]
    Identification(#[source] GeminiError),
    #[error("Não foi possível isolar o objeto. Tente outro objeto ou imagem.")]
    Segmentation(#[source] GeminiError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Upload(UploadError::TooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Upload(UploadError::UnsupportedFormat(_)) => {
                StatusCode::UNSUPPORTED_MEDIA_TYPE
            }
            ApiError::Upload(_) | ApiError::MissingLabel => StatusCode::BAD_REQUEST,
            ApiError::Identification(GeminiError::MissingApiKey)
            | ApiError::Segmentation(GeminiError::MissingApiKey) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ApiError::Identification(_) | ApiError::Segmentation(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}

/// API routes only; used on their own by the tests.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/health").route(web::get().to(health)))
        .service(web::resource("/api/identify").route(web::post().to(identify_objects)))
        .service(web::resource("/api/segment").route(web::post().to(segment_object)));
}

pub fn configure_routes(cfg: &mut web::ServiceConfig, frontend_dir: String) {
    configure_api(cfg);
    cfg.service(Files::new("/", frontend_dir).index_file("index.html"));
}

async fn health(gemini: web::Data<GeminiService>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".into(),
        gemini_configured: gemini.is_configured(),
    })
}

async fn identify_objects(
    gemini: web::Data<GeminiService>,
    config: web::Data<AppConfig>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let (image, _) = read_upload_form(payload, config.max_upload_bytes)
        .await?
        .require_image()?;
    info!(
        "Identify request: {} bytes ({})",
        image.bytes.len(),
        image.mime_type
    );

    let objects = gemini.identify_objects(&image).await.map_err(|e| {
        error!("Error identifying objects: {}", e);
        ApiError::Identification(e)
    })?;

    Ok(HttpResponse::Ok().json(IdentifyResponse { objects }))
}

async fn segment_object(
    gemini: web::Data<GeminiService>,
    config: web::Data<AppConfig>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let (image, label) = read_upload_form(payload, config.max_upload_bytes)
        .await?
        .require_image()?;
    let label = label.ok_or(ApiError::MissingLabel)?;
    info!(
        "Segment request for '{}': {} bytes ({})",
        label,
        image.bytes.len(),
        image.mime_type
    );

    let segmented = gemini.segment_object(&image, &label).await.map_err(|e| {
        error!("Error segmenting '{}': {}", label, e);
        ApiError::Segmentation(e)
    })?;

    Ok(HttpResponse::Ok().json(SegmentResponse {
        data: segmented.to_base64(),
        mime_type: segmented.mime_type,
        label,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header;
    use actix_web::{test, App};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const BOUNDARY: &str = "wizard-test-boundary";
    const PHOTO: &[u8] = &[1, 2, 3];

    fn multipart_body(image: Option<(&str, &[u8])>, label: Option<&str>) -> Vec<u8> {
        let mut body = Vec::new();
        if let Some((mime_type, bytes)) = image {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"photo\"\r\nContent-Type: {mime_type}\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        if let Some(label) = label {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"label\"\r\n\r\n{label}\r\n"
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn upload(uri: &str, body: Vec<u8>) -> test::TestRequest {
        test::TestRequest::post()
            .uri(uri)
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(body)
    }

    fn config_for(server: &MockServer) -> AppConfig {
        AppConfig {
            api_key: Some("test-key".into()),
            api_base_url: server.uri(),
            ..AppConfig::default()
        }
    }

    macro_rules! test_app {
        ($config:expr) => {{
            let config: AppConfig = $config;
            test::init_service(
                App::new()
                    .app_data(web::Data::new(GeminiService::new(&config)))
                    .app_data(web::Data::new(config))
                    .configure(configure_api),
            )
            .await
        }};
    }

    async fn gemini_replying(body: serde_json::Value) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;
        server
    }

    #[actix_web::test]
    async fn identify_returns_labels() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-pro:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": "bola, grama" }] } }]
            })))
            .expect(1)
            .mount(&server)
            .await;
        let app = test_app!(config_for(&server));

        let body = multipart_body(Some(("image/png", PHOTO)), None);
        let resp = test::call_service(&app, upload("/api/identify", body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: IdentifyResponse = test::read_body_json(resp).await;
        assert_eq!(body.objects, vec!["bola", "grama"]);
    }

    #[actix_web::test]
    async fn identify_without_image_is_bad_request() {
        let server = MockServer::start().await;
        let app = test_app!(config_for(&server));

        let resp = test::call_service(&app, upload("/api/identify", multipart_body(None, None)).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "Nenhuma imagem foi enviada.");
    }

    #[actix_web::test]
    async fn identify_rejects_unsupported_format() {
        let server = MockServer::start().await;
        let app = test_app!(config_for(&server));

        let body = multipart_body(Some(("image/gif", &b"GIF89a"[..])), None);
        let resp = test::call_service(&app, upload("/api/identify", body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[actix_web::test]
    async fn oversized_upload_is_rejected() {
        let server = MockServer::start().await;
        let app = test_app!(AppConfig {
            max_upload_bytes: 4,
            ..config_for(&server)
        });

        let body = multipart_body(Some(("image/png", &[0u8; 8][..])), None);
        let resp = test::call_service(&app, upload("/api/identify", body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[actix_web::test]
    async fn identify_failure_is_a_gateway_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;
        let app = test_app!(config_for(&server));

        let body = multipart_body(Some(("image/jpeg", PHOTO)), None);
        let resp = test::call_service(&app, upload("/api/identify", body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(
            body.error,
            "Não foi possível identificar objetos na imagem. Tente novamente."
        );
    }

    #[actix_web::test]
    async fn missing_api_key_is_unavailable() {
        let server = MockServer::start().await;
        let app = test_app!(AppConfig {
            api_key: None,
            ..config_for(&server)
        });

        let body = multipart_body(Some(("image/png", PHOTO)), None);
        let resp = test::call_service(&app, upload("/api/identify", body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[actix_web::test]
    async fn segment_returns_image_payload() {
        let server = gemini_replying(json!({
            "candidates": [{ "content": { "parts": [
                { "inlineData": { "mimeType": "image/png", "data": "iVBORw==" } }
            ] } }]
        }))
        .await;
        let app = test_app!(config_for(&server));

        let body = multipart_body(Some(("image/png", PHOTO)), Some("bola"));
        let resp = test::call_service(&app, upload("/api/segment", body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: SegmentResponse = test::read_body_json(resp).await;
        assert_eq!(
            body,
            SegmentResponse {
                label: "bola".into(),
                mime_type: "image/png".into(),
                data: "iVBORw==".into(),
            }
        );
    }

    #[actix_web::test]
    async fn segment_without_image_part_fails() {
        let server = gemini_replying(json!({
            "candidates": [{ "content": { "parts": [{ "text": "Desculpe." }] } }]
        }))
        .await;
        let app = test_app!(config_for(&server));

        let body = multipart_body(Some(("image/png", PHOTO)), Some("bola"));
        let resp = test::call_service(&app, upload("/api/segment", body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(
            body.error,
            "Não foi possível isolar o objeto. Tente outro objeto ou imagem."
        );
    }

    #[actix_web::test]
    async fn segment_requires_label() {
        let server = MockServer::start().await;
        let app = test_app!(config_for(&server));

        let body = multipart_body(Some(("image/png", PHOTO)), Some("   "));
        let resp = test::call_service(&app, upload("/api/segment", body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn health_reports_key_presence() {
        let server = MockServer::start().await;
        let app = test_app!(AppConfig {
            api_key: None,
            ..config_for(&server)
        });

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: HealthResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.status, "ok");
        assert!(!body.gemini_configured);
    }
}
