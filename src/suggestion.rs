//! Random task suggestions
//!
//! A suggestion comes from a remote endpoint answering with a JSON object
//! that carries the text in a `todo` field. Only that field is read.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::storage::SuggestionConfig;

#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error("Failed to reach suggestion service: {0}")]
    Network(String),

    #[error("Unexpected response from suggestion service: {0}")]
    Parse(String),
}

/// Anything that can produce one suggested task text
pub trait SuggestionSource: Send + Sync {
    fn fetch_suggestion_text(&self) -> Result<String, SuggestionError>;
}

#[derive(Debug, Deserialize)]
struct SuggestionBody {
    todo: String,
}

/// Extracts the suggestion text from a response body
pub fn parse_suggestion(body: &str) -> Result<String, SuggestionError> {
    serde_json::from_str::<SuggestionBody>(body)
        .map(|b| b.todo)
        .map_err(|e| SuggestionError::Parse(e.to_string()))
}

/// Fetches suggestions over HTTP
#[derive(Debug, Clone)]
pub struct HttpSuggestionSource {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpSuggestionSource {
    pub fn new(config: &SuggestionConfig) -> Result<Self, SuggestionError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout_secs.map(Duration::from_secs))
            .build()
            .map_err(|e| SuggestionError::Network(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl SuggestionSource for HttpSuggestionSource {
    fn fetch_suggestion_text(&self) -> Result<String, SuggestionError> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .map_err(|e| SuggestionError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SuggestionError::Network(format!(
                "{} returned HTTP {}",
                self.endpoint, status
            )));
        }

        let body = response
            .text()
            .map_err(|e| SuggestionError::Network(e.to_string()))?;

        parse_suggestion(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reads_todo_field() {
        let body = r#"{"id": 42, "todo": "Learn to juggle", "completed": false, "userId": 7}"#;
        assert_eq!(parse_suggestion(body).unwrap(), "Learn to juggle");
    }

    #[test]
    fn parse_keeps_text_verbatim() {
        let body = r#"{"todo": "  Spaced out  "}"#;
        assert_eq!(parse_suggestion(body).unwrap(), "  Spaced out  ");
    }

    #[test]
    fn parse_missing_field_is_parse_error() {
        let body = r#"{"message": "Not found"}"#;
        assert!(matches!(parse_suggestion(body), Err(SuggestionError::Parse(_))));
    }

    #[test]
    fn parse_non_json_is_parse_error() {
        assert!(matches!(
            parse_suggestion("<html>502</html>"),
            Err(SuggestionError::Parse(_))
        ));
    }

    #[test]
    fn http_source_uses_configured_endpoint() {
        let config = SuggestionConfig {
            endpoint: "http://127.0.0.1:9/random".to_string(),
            timeout_secs: Some(1),
        };
        let source = HttpSuggestionSource::new(&config).unwrap();
        assert_eq!(source.endpoint(), "http://127.0.0.1:9/random");
    }

    #[test]
    fn unreachable_endpoint_is_network_error() {
        let config = SuggestionConfig {
            endpoint: "http://127.0.0.1:9/random".to_string(),
            timeout_secs: Some(2),
        };
        let source = HttpSuggestionSource::new(&config).unwrap();
        assert!(matches!(
            source.fetch_suggestion_text(),
            Err(SuggestionError::Network(_))
        ));
    }
}
