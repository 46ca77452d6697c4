//! Analysis backend trait and the upload workflow built on it.
//!
//! [`AnalysisBackend`] abstracts whatever produces an [`AnalysisResult`]
//! for a document's bytes. [`AnalysisClient`](crate::AnalysisClient) is the
//! HTTP implementation; tests and offline tools can supply their own.

use pdfoverlay_core::{AnalysisResult, LoadOutcome, OverlayError, Session};

/// Produces an analysis result for raw document bytes.
///
/// # Usage
///
/// ```ignore
/// let client = AnalysisClient::new(ClientOptions::from_env())?;
/// let mut session = Session::default();
/// let outcome = load_document(&mut session, &client, "form.pdf", bytes)?;
/// ```
pub trait AnalysisBackend {
    /// Backend-specific error type, convertible to [`OverlayError`].
    type Error: std::error::Error + Into<OverlayError>;

    /// Analyze one document.
    ///
    /// # Errors
    ///
    /// Returns an error if the analysis could not be obtained.
    fn analyze(&self, file_name: &str, bytes: Vec<u8>) -> Result<AnalysisResult, Self::Error>;
}

/// Select `file_name` in `session`, analyze it and apply the result.
///
/// The document is selected before the request is made, so the previous
/// overlay is gone even if the analysis fails.
pub fn load_document<B: AnalysisBackend>(
    session: &mut Session,
    backend: &B,
    file_name: &str,
    bytes: Vec<u8>,
) -> Result<LoadOutcome, OverlayError> {
    let token = session.open_document(file_name);
    let response = backend.analyze(file_name, bytes);

    #[cfg(feature = "tracing")]
    {
        if let Err(e) = &response {
            tracing::debug!(%token, error = %e, "analysis request failed");
        }
    }

    session.complete(token, response)
}
