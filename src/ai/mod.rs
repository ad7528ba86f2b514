//! AI service integration for structured text and image generation
//!
//! Defines the provider-neutral seams the lesson workflows call through,
//! with a Gemini implementation and in-memory mocks.

pub mod gemini;
pub mod mime;
pub mod mock;
pub mod schema;

pub use gemini::{GeminiImageClient, GeminiTextClient};
pub use mock::{MockImageClient, MockTextClient};
pub use schema::{Schema, SchemaType};

use crate::models::ReferenceImage;
use crate::Result;
use async_trait::async_trait;

/// One piece of request content.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptPart {
    Text(String),
    Image(ReferenceImage),
}

/// A generation request constrained to a structured reply.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredPrompt {
    pub system_instruction: Option<String>,
    pub parts: Vec<PromptPart>,
    pub response_schema: Option<Schema>,
}

impl StructuredPrompt {
    pub fn new(instruction: String, response_schema: Schema) -> Self {
        Self {
            system_instruction: None,
            parts: vec![PromptPart::Text(instruction)],
            response_schema: Some(response_schema),
        }
    }

    /// Concatenated text parts, mainly for logging and assertions.
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| match p {
                PromptPart::Text(text) => Some(text.as_str()),
                PromptPart::Image(_) => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Decoded image returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl GeneratedImage {
    pub fn to_data_uri(&self) -> String {
        use base64::Engine as _;
        mime::to_data_uri(
            &self.mime_type,
            &base64::engine::general_purpose::STANDARD.encode(&self.data),
        )
    }
}

#[async_trait]
pub trait TextGenerationService: Send + Sync {
    /// Returns the reply text. A reply without text is [`crate::Error::Generation`].
    async fn generate_text(&self, prompt: &StructuredPrompt) -> Result<String>;
}

#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    /// Returns `None` when the provider answered without an image part.
    async fn generate_image(&self, prompt: &str) -> Result<Option<GeneratedImage>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_image_data_uri() {
        let image = GeneratedImage {
            mime_type: "image/png".to_string(),
            data: vec![0x89, 0x50, 0x4E, 0x47],
        };
        assert_eq!(image.to_data_uri(), "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn test_prompt_text_skips_image_parts() {
        let prompt = StructuredPrompt {
            system_instruction: None,
            parts: vec![
                PromptPart::Image(ReferenceImage {
                    mime_type: "image/png".to_string(),
                    data: "AAAA".to_string(),
                }),
                PromptPart::Text("first".to_string()),
                PromptPart::Text("second".to_string()),
            ],
            response_schema: None,
        };
        assert_eq!(prompt.text(), "first\nsecond");
    }
}
