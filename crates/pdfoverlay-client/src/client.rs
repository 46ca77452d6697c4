//! Blocking HTTP client for the analysis service.
//!
//! One multipart POST per document with a single `file` part. There is no
//! retry; a failed request is reported once and the caller decides what to
//! do next.

use std::path::Path;
use std::time::Duration;

use pdfoverlay_core::AnalysisResult;
use reqwest::blocking::{Client, multipart};

use crate::backend::AnalysisBackend;
use crate::error::ClientError;

/// Environment variable that overrides [`ClientOptions::endpoint`].
pub const ENDPOINT_ENV: &str = "PDFOVERLAY_ENDPOINT";

/// Default analysis endpoint of a locally running service.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/api/analyze-pdf/";

/// Error bodies longer than this are cut when no `error` key is present.
const MAX_ERROR_BODY: usize = 200;

/// Options for [`AnalysisClient`].
///
/// Provides sensible defaults for all settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientOptions {
    /// Full URL the document is posted to.
    pub endpoint: String,
    /// Total time allowed for one request (default: 60 s).
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(60),
            user_agent: concat!("pdfoverlay/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientOptions {
    /// Defaults, with the endpoint taken from `PDFOVERLAY_ENDPOINT` when set.
    pub fn from_env() -> Self {
        Self::from_endpoint_var(std::env::var(ENDPOINT_ENV).ok())
    }

    fn from_endpoint_var(value: Option<String>) -> Self {
        let mut options = Self::default();
        if let Some(endpoint) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            options.endpoint = endpoint;
        }
        options
    }
}

/// Uploads documents to the analysis service.
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    http: Client,
    options: ClientOptions,
}

impl AnalysisClient {
    /// Build a client.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying HTTP client cannot be
    /// constructed (e.g. the TLS backend fails to initialize).
    pub fn new(options: ClientOptions) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(options.timeout)
            .user_agent(options.user_agent.clone())
            .build()?;
        Ok(Self { http, options })
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Post `bytes` as the `file` part and decode the analysis result.
    pub fn analyze(&self, file_name: &str, bytes: Vec<u8>) -> Result<AnalysisResult, ClientError> {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            endpoint = %self.options.endpoint,
            file = file_name,
            size = bytes.len(),
            "uploading document for analysis"
        );

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("application/pdf")?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(&self.options.endpoint)
            .multipart(form)
            .send()?;
        let status = response.status().as_u16();
        let body = response.text()?;

        #[cfg(feature = "tracing")]
        tracing::debug!(status, bytes = body.len(), "analysis response received");

        decode_response(status, &body)
    }

    /// Read the document at `path` and analyze it under its file name.
    pub fn analyze_file(&self, path: impl AsRef<Path>) -> Result<AnalysisResult, ClientError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document.pdf");
        self.analyze(file_name, bytes)
    }
}

impl AnalysisBackend for AnalysisClient {
    type Error = ClientError;

    fn analyze(&self, file_name: &str, bytes: Vec<u8>) -> Result<AnalysisResult, Self::Error> {
        AnalysisClient::analyze(self, file_name, bytes)
    }
}

/// Turn an HTTP status and body into an analysis result.
///
/// Non-2xx statuses become [`ClientError::Status`], carrying the service's
/// `{"error": "..."}` message when the body has one. A success body that
/// carries an `error` key is treated the same way.
pub fn decode_response(status: u16, body: &str) -> Result<AnalysisResult, ClientError> {
    let success = (200..300).contains(&status);
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) if success => return Err(ClientError::Decode(e)),
        Err(_) => {
            return Err(ClientError::Status {
                status,
                message: truncate(body.trim()),
            });
        }
    };

    if let Some(message) = value.get("error").and_then(|e| e.as_str()) {
        return Err(ClientError::Status {
            status,
            message: message.to_string(),
        });
    }
    if !success {
        return Err(ClientError::Status {
            status,
            message: truncate(body.trim()),
        });
    }

    Ok(serde_json::from_value(value)?)
}

fn truncate(text: &str) -> String {
    if text.is_empty() {
        return "empty response body".to_string();
    }
    match text.char_indices().nth(MAX_ERROR_BODY) {
        Some((at, _)) => format!("{}...", &text[..at]),
        None => text.to_string(),
    }
}
