//! Theme selection through a local Ollama model.

use crate::themes::{keyword_eligible, keyword_theme};
use async_trait::async_trait;
use ollama_rs::Ollama;
use ollama_rs::generation::completion::request::GenerationRequest;
use shepherd_core::Theme;
use shepherd_error::{SourceError, SourceErrorKind, SourceResult};
use shepherd_interface::ThemeSelector;
use std::str::FromStr;
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument, warn};

/// Classifies posts with a local model, falling back to keywords whenever the
/// model errors or answers with something unusable.
#[derive(Debug, Clone)]
pub struct OllamaThemeSelector {
    client: Ollama,
    model: String,
}

impl OllamaThemeSelector {
    /// Selector using `model` on the server at `host:port`.
    pub fn new(host: impl Into<String>, port: u16, model: impl Into<String>) -> Self {
        let host = host.into();
        let model = model.into();
        info!(host = %host, port, model = %model, "Creating Ollama theme selector");
        Self {
            client: Ollama::new(host, port),
            model,
        }
    }

    async fn ask(&self, prompt: String) -> SourceResult<String> {
        let request = GenerationRequest::new(self.model.clone(), prompt);
        let response = self
            .client
            .generate(request)
            .await
            .map_err(|e| SourceError::new(SourceErrorKind::Inference(e.to_string())))?;
        Ok(normalise_answer(&response.response))
    }
}

fn theme_prompt(text: &str) -> String {
    let themes = Theme::iter()
        .map(|theme| theme.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Analyze this social media post and determine the most relevant biblical theme.\n\
         Choose from: {themes}\n\n\
         Post: \"{text}\"\n\n\
         Respond with only the theme name."
    )
}

fn relevance_prompt(text: &str) -> String {
    format!(
        "Should a bot that shares encouraging Bible verses about markets, crypto and \
         finance reply to this post?\n\n\
         Post: \"{text}\"\n\n\
         Respond with only yes or no."
    )
}

fn normalise_answer(answer: &str) -> String {
    answer
        .trim()
        .trim_matches(|c: char| !c.is_alphanumeric() && c != '_')
        .to_lowercase()
        .replace(' ', "_")
}

#[async_trait]
impl ThemeSelector for OllamaThemeSelector {
    #[instrument(skip_all)]
    async fn classify(&self, text: &str) -> Theme {
        match self.ask(theme_prompt(text)).await {
            Ok(answer) => match Theme::from_str(&answer) {
                Ok(theme) => {
                    debug!(theme = %theme, "Model theme");
                    theme
                }
                Err(_) => {
                    warn!(answer = %answer, "Model answered with unknown theme");
                    keyword_theme(text)
                }
            },
            Err(e) => {
                warn!(error = %e, "Theme inference failed");
                keyword_theme(text)
            }
        }
    }

    #[instrument(skip_all)]
    async fn is_eligible(&self, text: &str) -> bool {
        match self.ask(relevance_prompt(text)).await {
            Ok(answer) => match answer.as_str() {
                "yes" | "true" | "1" => true,
                "no" | "false" | "0" => false,
                other => {
                    warn!(answer = %other, "Model answered neither yes nor no");
                    keyword_eligible(text)
                }
            },
            Err(e) => {
                warn!(error = %e, "Relevance inference failed");
                keyword_eligible(text)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalise_answer() {
        assert_eq!(normalise_answer("  Market Crash.\n"), "market_crash");
        assert_eq!(normalise_answer("\"Yes\""), "yes");
    }

    #[test]
    fn test_theme_prompt_lists_themes() {
        let prompt = theme_prompt("gm");
        assert!(prompt.contains("market_crash"));
        assert!(prompt.contains("patience"));
    }
}
