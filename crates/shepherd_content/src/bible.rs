//! bible-api.com verse lookup.

use crate::reference::VerseReference;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use shepherd_core::BilingualVerse;
use shepherd_error::{SourceError, SourceErrorKind, SourceResult};
use shepherd_interface::VerseSource;
use tracing::{debug, error, instrument, warn};

/// Public bible-api.com endpoint.
pub const BIBLE_API_BASE_URL: &str = "https://bible-api.com";

#[derive(Debug, Deserialize)]
struct PassageResponse {
    #[serde(default)]
    text: String,
}

/// Fetches each reference twice: once in an English translation and once in
/// a Chinese one.
#[derive(Debug, Clone)]
pub struct BibleApiClient {
    client: Client,
    base_url: String,
    english_translation: String,
    chinese_translation: String,
}

impl Default for BibleApiClient {
    fn default() -> Self {
        Self::new(BIBLE_API_BASE_URL)
    }
}

impl BibleApiClient {
    /// Client using the World English Bible and the Chinese Union Version.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            english_translation: "web".to_string(),
            chinese_translation: "cuv".to_string(),
        }
    }

    /// Override the translation identifiers.
    pub fn with_translations(
        mut self,
        english: impl Into<String>,
        chinese: impl Into<String>,
    ) -> Self {
        self.english_translation = english.into();
        self.chinese_translation = chinese.into();
        self
    }

    async fn passage(&self, reference: &VerseReference, translation: &str) -> SourceResult<String> {
        let url = format!("{}/{}", self.base_url, reference.api_path());
        let response = self
            .client
            .get(&url)
            .query(&[("translation", translation)])
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, url = %url, "Verse request failed");
                SourceError::new(SourceErrorKind::Http(e.to_string()))
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            warn!(reference = %reference, translation, "Verse not found");
            return Err(SourceError::new(SourceErrorKind::UnknownReference(
                reference.english(),
            )));
        }
        if !status.is_success() {
            warn!(status = %status, translation, "Verse service returned error");
            return Err(SourceError::new(SourceErrorKind::Status(status.as_u16())));
        }

        let passage: PassageResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse verse response");
            SourceError::new(SourceErrorKind::Malformed(e.to_string()))
        })?;

        let text = passage.text.split_whitespace().collect::<Vec<_>>().join(" ");
        if text.is_empty() {
            return Err(SourceError::new(SourceErrorKind::Malformed(format!(
                "empty {} text for {}",
                translation, reference
            ))));
        }
        Ok(text)
    }
}

#[async_trait]
impl VerseSource for BibleApiClient {
    #[instrument(skip(self))]
    async fn lookup(&self, reference: &str) -> SourceResult<BilingualVerse> {
        let reference = VerseReference::parse(reference)?;
        let english = self.passage(&reference, &self.english_translation).await?;
        let chinese = self.passage(&reference, &self.chinese_translation).await?;
        debug!(reference = %reference, "Verse fetched");

        Ok(BilingualVerse::new(
            reference.english(),
            english,
            reference.chinese(),
            chinese,
        ))
    }
}
