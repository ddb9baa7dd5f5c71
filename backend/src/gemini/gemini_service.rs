use reqwest::{Client, StatusCode};
use shared::ImageData;
use shared::labels::parse_labels;

use super::models::{ErrorWrapper, GenerateContentRequest, GenerateContentResponse};
use crate::config::AppConfig;

const IDENTIFY_INSTRUCTION: &str = "Identifique os principais objetos nesta imagem. Responda com uma lista de itens separados por vírgula, em português. Por exemplo: 'carro, árvore, céu'. Não adicione nenhuma outra formatação ou texto introdutório.";

fn segment_instruction(label: &str) -> String {
    format!(
        "Isole o seguinte objeto da imagem: '{}'. Coloque o objeto isolado sobre um fundo totalmente branco. Retorne apenas a imagem resultante, sem texto adicional.",
        label
    )
}

#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    #[error("GEMINI_API_KEY is not configured")]
    MissingApiKey,
    #[error("Gemini request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Gemini API returned {status}: {message}")]
    Status { status: StatusCode, message: String },
    #[error("Gemini response contained no image")]
    NoImage,
    #[error("Invalid image payload from Gemini: {0}")]
    InvalidImage(#[from] shared::image::ImageDecodeError),
}

/// Client for the two Gemini calls the wizard needs.
#[derive(Clone)]
pub struct GeminiService {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    identification_model: String,
    segmentation_model: String,
}

impl GeminiService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            base_url: config.api_base_url.clone(),
            identification_model: config.identification_model.clone(),
            segmentation_model: config.segmentation_model.clone(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Labels of the principal objects in `image`. An empty reply is a valid
    /// "nothing recognizable" answer, not an error.
    pub async fn identify_objects(&self, image: &ImageData) -> Result<Vec<String>, GeminiError> {
        let request =
            GenerateContentRequest::image_with_instruction(image, IDENTIFY_INSTRUCTION.to_string());
        let response = self
            .generate_content(&self.identification_model, &request)
            .await?;

        let objects = parse_labels(&response.text());
        log::info!("Gemini identified {} object(s)", objects.len());
        Ok(objects)
    }

    /// `label` isolated on a white background, as returned by the image model.
    pub async fn segment_object(
        &self,
        image: &ImageData,
        label: &str,
    ) -> Result<ImageData, GeminiError> {
        let request = GenerateContentRequest::image_with_instruction(image, segment_instruction(label))
            .with_response_modalities(&["IMAGE"]);
        let response = self
            .generate_content(&self.segmentation_model, &request)
            .await?;

        let inline = response.first_inline_image().ok_or(GeminiError::NoImage)?;
        let segmented = ImageData::from_base64(inline.mime_type.clone(), &inline.data)?;
        log::info!(
            "Gemini isolated '{}' ({} bytes, {})",
            label,
            segmented.bytes.len(),
            segmented.mime_type
        );
        Ok(segmented)
    }

    async fn generate_content(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let api_key = self.api_key.as_deref().ok_or(GeminiError::MissingApiKey)?;
        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        log::debug!("Calling Gemini model {}", model);
        let response = self
            .client
            .post(url)
            .query(&[("key", api_key)])
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response.text().await.unwrap_or_default();
            return Err(GeminiError::Status {
                status,
                message: error_message(&body_text),
            });
        }

        Ok(response.json::<GenerateContentResponse>().await?)
    }
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorWrapper>(body)
        .ok()
        .and_then(|wrapper| {
            let message = wrapper.error.message?;
            Some(match wrapper.error.status {
                Some(status) if !status.is_empty() => format!("{}: {}", status, message),
                _ => message,
            })
        })
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service_for(server: &MockServer, api_key: Option<&str>) -> GeminiService {
        let config = AppConfig {
            api_key: api_key.map(String::from),
            api_base_url: server.uri(),
            ..AppConfig::default()
        };
        GeminiService::new(&config)
    }

    fn photo() -> ImageData {
        ImageData::new("image/jpeg", vec![0xff, 0xd8, 0xff])
    }

    fn text_reply(text: &str) -> serde_json::Value {
        json!({ "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }] })
    }

    #[tokio::test]
    async fn identify_sends_image_and_parses_labels() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-pro:generateContent"))
            .and(query_param("key", "test-key"))
            .and(body_partial_json(json!({
                "contents": [{ "parts": [{ "inlineData": { "mimeType": "image/jpeg", "data": "/9j/" } }] }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_reply(" 'bola', grama \n")))
            .expect(1)
            .mount(&server)
            .await;

        let objects = service_for(&server, Some("test-key"))
            .identify_objects(&photo())
            .await
            .unwrap();
        assert_eq!(objects, vec!["bola", "grama"]);
    }

    #[tokio::test]
    async fn identify_accepts_empty_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_reply("")))
            .mount(&server)
            .await;

        let objects = service_for(&server, Some("test-key"))
            .identify_objects(&photo())
            .await
            .unwrap();
        assert!(objects.is_empty());
    }

    #[tokio::test]
    async fn identify_reports_api_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": { "code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED" }
            })))
            .mount(&server)
            .await;

        let err = service_for(&server, Some("test-key"))
            .identify_objects(&photo())
            .await
            .unwrap_err();
        match err {
            GeminiError::Status { status, message } => {
                assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
                assert_eq!(message, "RESOURCE_EXHAUSTED: Quota exceeded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_key_fails_without_calling_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_reply("bola")))
            .expect(0)
            .mount(&server)
            .await;

        let err = service_for(&server, None)
            .identify_objects(&photo())
            .await
            .unwrap_err();
        assert!(matches!(err, GeminiError::MissingApiKey));
    }

    #[tokio::test]
    async fn segment_returns_first_inline_image() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash-image:generateContent"))
            .and(body_partial_json(json!({
                "generationConfig": { "responseModalities": ["IMAGE"] }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [
                    { "text": "Pronto." },
                    { "inlineData": { "mimeType": "image/png", "data": "iVBORw==" } }
                ] } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let image = service_for(&server, Some("test-key"))
            .segment_object(&photo(), "bola")
            .await
            .unwrap();
        assert_eq!(image, ImageData::new("image/png", vec![137, 80, 78, 71]));
    }

    #[tokio::test]
    async fn segment_without_image_part_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_reply("Não consigo.")))
            .mount(&server)
            .await;

        let err = service_for(&server, Some("test-key"))
            .segment_object(&photo(), "bola")
            .await
            .unwrap_err();
        assert!(matches!(err, GeminiError::NoImage));
    }

    #[test]
    fn segment_instruction_names_the_object() {
        let instruction = segment_instruction("traffic light");
        assert!(instruction.contains("'traffic light'"));
        assert!(instruction.contains("fundo totalmente branco"));
    }

    #[test]
    fn error_message_falls_back_to_raw_body() {
        assert_eq!(error_message("upstream exploded"), "upstream exploded");
        assert_eq!(
            error_message(r#"{"error":{"message":"bad key"}}"#),
            "bad key"
        );
    }
}
