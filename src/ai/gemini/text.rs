use super::client::GeminiHttpClient;
use super::types::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part};
use crate::ai::{StructuredPrompt, TextGenerationService};
use crate::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Gemini implementation of [`TextGenerationService`] with JSON-schema replies.
pub struct GeminiTextClient {
    http: GeminiHttpClient,
}

impl GeminiTextClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(
                api_key,
                model,
                Duration::from_secs(60),
                client,
            ),
        }
    }

    fn build_request(prompt: &StructuredPrompt) -> GenerateContentRequest {
        GenerateContentRequest {
            system_instruction: prompt.system_instruction.clone().map(Content::text),
            contents: vec![Content::user(prompt.parts.iter().map(Part::from).collect())],
            generation_config: prompt.response_schema.clone().map(|schema| GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(schema),
                ..Default::default()
            }),
        }
    }
}

super::impl_with_gemini_base_url!(GeminiTextClient);

#[async_trait]
impl TextGenerationService for GeminiTextClient {
    async fn generate_text(&self, prompt: &StructuredPrompt) -> Result<String> {
        let request = Self::build_request(prompt);
        let response: GenerateContentResponse = self.http.generate_content(&request).await?;

        let text = response
            .text()
            .ok_or_else(|| Error::Generation("No text in Gemini response".to_string()))?;

        tracing::debug!(
            "Gemini ({}) returned {} chars of structured output",
            self.http.model(),
            text.len()
        );

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::gemini::test_support;
    use crate::ai::{PromptPart, Schema};
    use crate::models::ReferenceImage;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const DEFAULT_MODEL: &str = "gemini-2.5-flash";

    fn make_client(server: &MockServer, api_key: &str, model: &str) -> GeminiTextClient {
        GeminiTextClient::new(api_key.to_string(), model.to_string()).with_base_url(server.uri())
    }

    fn sample_prompt() -> StructuredPrompt {
        StructuredPrompt::new(
            "Write a lesson".to_string(),
            Schema::object(vec![("title", Schema::string())]),
        )
    }

    #[tokio::test]
    async fn test_generate_text_returns_reply_text() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::GENERATE_CONTENT_PATH_REGEX)
            .and(header("x-goog-api-key", "test-key"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(test_support::text_response("{\"title\":\"Volcanoes\"}")),
            )
            .mount(&server)
            .await;

        let client = make_client(&server, "test-key", DEFAULT_MODEL);

        let text = client.generate_text(&sample_prompt()).await.unwrap();
        assert_eq!(text, "{\"title\":\"Volcanoes\"}");
    }

    #[tokio::test]
    async fn test_request_carries_schema_and_json_mime_type() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::GENERATE_CONTENT_PATH_REGEX)
            .and(body_partial_json(serde_json::json!({
                "contents": [{ "role": "user", "parts": [{ "text": "Write a lesson" }] }],
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "responseSchema": {
                        "type": "OBJECT",
                        "required": ["title"]
                    }
                }
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(test_support::text_response("{}")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = make_client(&server, "test-key", DEFAULT_MODEL);
        client.generate_text(&sample_prompt()).await.unwrap();
    }

    #[tokio::test]
    async fn test_reference_image_is_sent_as_inline_data_first() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::GENERATE_CONTENT_PATH_REGEX)
            .and(body_partial_json(serde_json::json!({
                "contents": [{
                    "parts": [
                        { "inlineData": { "mimeType": "image/jpeg", "data": "/9j/4A==" } },
                        { "text": "Describe it" }
                    ]
                }]
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(test_support::text_response("{}")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let prompt = StructuredPrompt {
            system_instruction: None,
            parts: vec![
                PromptPart::Image(ReferenceImage {
                    mime_type: "image/jpeg".to_string(),
                    data: "/9j/4A==".to_string(),
                }),
                PromptPart::Text("Describe it".to_string()),
            ],
            response_schema: None,
        };

        let client = make_client(&server, "test-key", DEFAULT_MODEL);
        client.generate_text(&prompt).await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_text_is_generation_error() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::GENERATE_CONTENT_PATH_REGEX)
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": []
            })))
            .mount(&server)
            .await;

        let client = make_client(&server, "test-key", DEFAULT_MODEL);
        let err = client.generate_text(&sample_prompt()).await.unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
    }

    #[tokio::test]
    async fn test_api_error_returns_ai_provider_error() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::GENERATE_CONTENT_PATH_REGEX)
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let client = make_client(&server, "bad-key", DEFAULT_MODEL);
        let err = client.generate_text(&sample_prompt()).await.unwrap_err();
        assert!(matches!(err, Error::AiProvider(_)));
        assert!(err.to_string().contains("403"));
    }

    #[tokio::test]
    async fn test_malformed_envelope_returns_ai_provider_error() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::GENERATE_CONTENT_PATH_REGEX)
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"candidates\": ["))
            .mount(&server)
            .await;

        let client = make_client(&server, "test-key", DEFAULT_MODEL);
        let err = client.generate_text(&sample_prompt()).await.unwrap_err();
        assert!(matches!(err, Error::AiProvider(_)));
    }

    #[tokio::test]
    async fn test_models_prefix_is_stripped_from_model_id() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(test_support::text_response("{}")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = make_client(&server, "test-key", "models/gemini-2.5-flash");
        client.generate_text(&sample_prompt()).await.unwrap();
    }
}
