//! Lesson workflows: generation, language enhancement, and quizzes.
//!
//! [`LessonService`] owns the two provider seams and holds no other state,
//! so every call is independent of the others.

mod enhance;
mod generate;
mod quiz;
pub mod schema;

use crate::ai::{
    GeminiImageClient, GeminiTextClient, ImageGenerationService, TextGenerationService,
};
use crate::models::Config;
use tracing::info;

pub struct LessonService {
    text: Box<dyn TextGenerationService>,
    image: Box<dyn ImageGenerationService>,
}

/// Injectable service bundle used to construct [`LessonService`] in tests/harnesses.
pub struct LessonServices {
    pub text: Box<dyn TextGenerationService>,
    pub image: Box<dyn ImageGenerationService>,
}

impl LessonService {
    pub fn with_services(services: LessonServices) -> Self {
        Self {
            text: services.text,
            image: services.image,
        }
    }

    /// Build Gemini-backed clients from configuration.
    pub fn from_config(config: &Config) -> Self {
        // Reuse one HTTP connection pool across provider clients.
        let http_client = reqwest::Client::new();

        let mut text = GeminiTextClient::new_with_client(
            config.gemini_api_key.clone(),
            config.text_model.clone(),
            http_client.clone(),
        );
        let mut image = GeminiImageClient::new_with_client(
            config.gemini_api_key.clone(),
            config.image_model.clone(),
            http_client,
        );

        if let Some(base_url) = &config.gemini_base_url {
            info!("Using Gemini base URL override: {}", base_url);
            text = text.with_base_url(base_url.clone());
            image = image.with_base_url(base_url.clone());
        }

        info!("Text provider: Gemini (model: {})", config.text_model);
        info!("Image provider: Gemini (model: {})", config.image_model);

        Self::with_services(LessonServices {
            text: Box::new(text),
            image: Box::new(image),
        })
    }
}
