use super::client::GeminiHttpClient;
use super::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, ImageConfig, Part,
};
use crate::ai::{mime, GeneratedImage, ImageGenerationService};
use crate::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;

pub struct GeminiImageClient {
    http: GeminiHttpClient,
    aspect_ratio: String,
}

impl GeminiImageClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(
                api_key,
                model,
                Duration::from_secs(120),
                client,
            ),
            aspect_ratio: "4:3".to_string(),
        }
    }
}

super::impl_with_gemini_base_url!(GeminiImageClient);

#[async_trait]
impl ImageGenerationService for GeminiImageClient {
    async fn generate_image(&self, prompt: &str) -> Result<Option<GeneratedImage>> {
        let request = GenerateContentRequest {
            system_instruction: None,
            contents: vec![Content::user(vec![Part::Text {
                text: prompt.to_string(),
            }])],
            generation_config: Some(GenerationConfig {
                response_modalities: vec!["IMAGE".to_string()],
                image_config: Some(ImageConfig {
                    aspect_ratio: self.aspect_ratio.clone(),
                }),
                ..Default::default()
            }),
        };

        let response: GenerateContentResponse = self.http.generate_content(&request).await?;

        let Some(inline) = response.inline_data() else {
            tracing::debug!("Gemini image response contained no inline image part");
            return Ok(None);
        };

        use base64::Engine as _;
        let data = base64::engine::general_purpose::STANDARD
            .decode(&inline.data)
            .map_err(|e| Error::AiProvider(format!("Failed to decode Gemini base64 image: {}", e)))?;

        let mime_type = if inline.mime_type.is_empty() {
            mime::detect_image_mime(&data).to_string()
        } else {
            inline.mime_type.clone()
        };

        tracing::debug!(
            "Gemini returned image ({} bytes, mime_type: {})",
            data.len(),
            mime_type
        );

        Ok(Some(GeneratedImage { mime_type, data }))
    }
}
