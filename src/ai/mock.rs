use super::{GeneratedImage, ImageGenerationService, StructuredPrompt, TextGenerationService};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Scripted reply for [`MockTextClient`].
#[derive(Debug, Clone)]
enum TextReply {
    Text(String),
    Empty,
    Failure(String),
}

/// In-memory [`TextGenerationService`] replaying queued replies in order.
#[derive(Clone, Default)]
pub struct MockTextClient {
    replies: Arc<Mutex<Vec<TextReply>>>,
    prompts: Arc<Mutex<Vec<StructuredPrompt>>>,
    call_count: Arc<AtomicUsize>,
}

impl MockTextClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text_response(self, response: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push(TextReply::Text(response.into()));
        self
    }

    pub fn with_json_response(self, response: serde_json::Value) -> Self {
        self.with_text_response(response.to_string())
    }

    /// Reply as if the provider answered without any text.
    pub fn with_empty_response(self) -> Self {
        self.replies.lock().unwrap().push(TextReply::Empty);
        self
    }

    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push(TextReply::Failure(message.into()));
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<StructuredPrompt> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerationService for MockTextClient {
    async fn generate_text(&self, prompt: &StructuredPrompt) -> Result<String> {
        let count = self.call_count.fetch_add(1, Ordering::SeqCst) + 1;
        self.prompts.lock().unwrap().push(prompt.clone());

        let reply = {
            let replies = self.replies.lock().unwrap();
            if replies.is_empty() {
                TextReply::Empty
            } else {
                // Cycles once the queue is exhausted.
                replies[(count - 1) % replies.len()].clone()
            }
        };

        match reply {
            TextReply::Text(text) => Ok(text),
            TextReply::Empty => Err(Error::Generation("No text in mock response".to_string())),
            TextReply::Failure(message) => Err(Error::AiProvider(message)),
        }
    }
}

/// In-memory [`ImageGenerationService`] that tracks request concurrency.
#[derive(Clone)]
pub struct MockImageClient {
    image: Arc<Mutex<Option<GeneratedImage>>>,
    failing_prompts: Arc<Mutex<Vec<String>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    delay: Duration,
    call_count: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    peak_in_flight: Arc<AtomicUsize>,
}

impl MockImageClient {
    pub fn new() -> Self {
        Self {
            image: Arc::new(Mutex::new(Some(GeneratedImage {
                mime_type: "image/png".to_string(),
                data: vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A],
            }))),
            failing_prompts: Arc::new(Mutex::new(Vec::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            delay: Duration::ZERO,
            call_count: Arc::new(AtomicUsize::new(0)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            peak_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_image_response(self, mime_type: &str, data: Vec<u8>) -> Self {
        *self.image.lock().unwrap() = Some(GeneratedImage {
            mime_type: mime_type.to_string(),
            data,
        });
        self
    }

    /// Answer every request without an image part.
    pub fn without_image(self) -> Self {
        *self.image.lock().unwrap() = None;
        self
    }

    /// Fail any request whose prompt contains `needle`.
    pub fn failing_when_prompt_contains(self, needle: impl Into<String>) -> Self {
        self.failing_prompts.lock().unwrap().push(needle.into());
        self
    }

    /// Hold each request open for `delay` so overlapping calls can be observed.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Highest number of requests that were in flight at the same time.
    pub fn peak_concurrency(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Default for MockImageClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenerationService for MockImageClient {
    async fn generate_image(&self, prompt: &str) -> Result<Option<GeneratedImage>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let should_fail = self
            .failing_prompts
            .lock()
            .unwrap()
            .iter()
            .any(|needle| prompt.contains(needle.as_str()));
        if should_fail {
            return Err(Error::AiProvider("mock image failure".to_string()));
        }

        Ok(self.image.lock().unwrap().clone())
    }
}
