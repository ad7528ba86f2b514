//! Gemini `generateContent` clients for structured text and illustrations.

/// Adds a `with_base_url` builder to a client wrapping [`client::GeminiHttpClient`].
macro_rules! impl_with_gemini_base_url {
    ($client:ty) => {
        impl $client {
            /// Point the client at a different API host (local stubs, proxies).
            pub fn with_base_url(mut self, base_url: String) -> Self {
                self.http = self.http.with_base_url(base_url);
                self
            }
        }
    };
}
pub(crate) use impl_with_gemini_base_url;

pub mod client;
pub mod image;
pub mod text;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use image::GeminiImageClient;
pub use text::GeminiTextClient;
