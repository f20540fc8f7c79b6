//! Minimal client for the Supadata transcript API.
//!
//! One GET per video: `/youtube/transcript?url=..&lang=..&text=true` with
//! the credential in an `x-api-key` header. The server answers 2xx with a
//! transcript payload or an error body carrying a machine code and a
//! human-readable message.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.supadata.ai/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Error surface of the transcript API.
#[derive(Error, Debug)]
pub enum SupadataError {
    /// The API answered with an error payload: invalid key, rate limit,
    /// no transcript for the video, language unavailable.
    #[error("{message}")]
    Api {
        status: StatusCode,
        code: Option<String>,
        message: String,
    },

    /// The request never produced a usable answer.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

/// A transcript as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct Transcript {
    pub content: TranscriptContent,

    /// Language the transcript was delivered in
    #[serde(default)]
    pub lang: Option<String>,

    #[serde(default, rename = "availableLangs")]
    pub available_langs: Vec<String>,
}

/// Plain-text mode returns a single string; without it the API sends
/// timed segments.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TranscriptContent {
    Text(String),
    Segments(Vec<TranscriptSegment>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptSegment {
    pub text: String,
    #[serde(default)]
    pub offset: Option<f64>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub lang: Option<String>,
}

impl Transcript {
    /// Transcript body as one plain-text block.
    pub fn plain_text(&self) -> String {
        match &self.content {
            TranscriptContent::Text(text) => text.clone(),
            TranscriptContent::Segments(segments) => segments
                .iter()
                .map(|s| s.text.trim())
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Anything that can produce a transcript for a YouTube URL.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Request a plain-text transcript in the given language.
    async fn plain_transcript(
        &self,
        url: &str,
        language: &str,
    ) -> Result<Transcript, SupadataError>;
}

/// HTTP client for the Supadata API.
pub struct SupadataClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl SupadataClient {
    pub fn new(api_key: impl Into<String>) -> crate::Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Point the client at a different endpoint (tests, proxies).
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> crate::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl TranscriptSource for SupadataClient {
    async fn plain_transcript(
        &self,
        url: &str,
        language: &str,
    ) -> Result<Transcript, SupadataError> {
        debug!("Fetching transcript for {} (lang: {})", url, language);

        let response = self
            .http
            .get(format!("{}/youtube/transcript", self.base_url))
            .header("x-api-key", &self.api_key)
            .query(&[("url", url), ("lang", language), ("text", "true")])
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(api_error(status, &body))
        }
    }
}

fn api_error(status: StatusCode, body: &str) -> SupadataError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => {
            let message = parsed
                .message
                .clone()
                .or_else(|| parsed.error.clone())
                .unwrap_or_else(|| format!("HTTP {status}"));
            SupadataError::Api {
                status,
                code: parsed.error,
                message,
            }
        }
        Err(_) => SupadataError::Api {
            status,
            code: None,
            message: format!("HTTP {status}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_plain_text_response() {
        let json = r#"{"content": "Hello world.", "lang": "en", "availableLangs": ["en", "es"]}"#;
        let transcript: Transcript = serde_json::from_str(json).unwrap();
        assert_eq!(transcript.plain_text(), "Hello world.");
        assert_eq!(transcript.lang.as_deref(), Some("en"));
        assert_eq!(transcript.available_langs, vec!["en", "es"]);
    }

    #[test]
    fn deserializes_segmented_response() {
        let json = r#"{
            "content": [
                {"text": "Hello ", "offset": 0.0, "duration": 1.2},
                {"text": "world.", "offset": 1.2, "duration": 0.8},
                {"text": "  ", "offset": 2.0}
            ],
            "lang": "en"
        }"#;
        let transcript: Transcript = serde_json::from_str(json).unwrap();
        assert_eq!(transcript.plain_text(), "Hello world.");
    }

    #[test]
    fn api_error_prefers_server_message() {
        let err = api_error(
            StatusCode::NOT_FOUND,
            r#"{"error": "transcript-unavailable", "message": "no captions available"}"#,
        );
        assert_eq!(err.to_string(), "no captions available");
        match err {
            SupadataError::Api { status, code, .. } => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(code.as_deref(), Some("transcript-unavailable"));
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn api_error_falls_back_to_code_then_status() {
        let from_code = api_error(StatusCode::TOO_MANY_REQUESTS, r#"{"error": "limit-exceeded"}"#);
        assert_eq!(from_code.to_string(), "limit-exceeded");

        let from_status = api_error(StatusCode::BAD_GATEWAY, "<html>nope</html>");
        assert_eq!(from_status.to_string(), "HTTP 502 Bad Gateway");
    }
}
