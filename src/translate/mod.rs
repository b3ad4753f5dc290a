//! Headline translation.
//!
//! [`Translator`] decides whether a title needs translating and delegates the
//! network call to a [`TranslationProvider`]. Failures come back as
//! [`TranslationError`]; callers choose the fallback.

mod google;
mod script;

use std::future::Future;

use thiserror::Error;

pub use google::{GoogleTranslator, DEFAULT_BASE_URL};
pub use script::TargetLanguage;

/// Source language passed to providers: let the provider detect it.
pub const SOURCE_AUTO: &str = "auto";

#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    #[error("Unexpected response from translation provider: {0}")]
    Malformed(String),
    #[error("Translation provider returned an empty result")]
    Empty,
    #[error("Insecure base URL: HTTPS required (except localhost for testing)")]
    InsecureBaseUrl,
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

/// An external service that turns text into another language.
pub trait TranslationProvider: Send + Sync {
    fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> impl Future<Output = Result<String, TranslationError>> + Send;
}

/// Translates titles into one target language.
pub struct Translator<P> {
    provider: P,
    target: TargetLanguage,
}

impl<P: TranslationProvider> Translator<P> {
    pub fn new(provider: P, target: TargetLanguage) -> Self {
        Self { provider, target }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Translates `title` unless it already contains a character of the
    /// target script, in which case it is returned as is and the provider is
    /// not called.
    ///
    /// # Errors
    ///
    /// Any provider error, and [`TranslationError::Empty`] when the provider
    /// answers with blank text.
    pub async fn translate(&self, title: &str) -> Result<String, TranslationError> {
        if self.target.is_written_in(title) {
            return Ok(title.to_string());
        }

        let translated = self
            .provider
            .translate(title, SOURCE_AUTO, self.target.code())
            .await?;

        match translated.trim() {
            "" => Err(TranslationError::Empty),
            text => Ok(text.to_string()),
        }
    }
}
