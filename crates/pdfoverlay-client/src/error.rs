//! Error types for the analysis request boundary.
//!
//! Uses [`thiserror`] for the transport-level [`ClientError`] and converts
//! every variant into [`OverlayError::AnalysisRequestFailed`] so that the
//! session sees a single failure kind regardless of what went wrong.

use pdfoverlay_core::OverlayError;
use thiserror::Error;

/// Error type for analysis requests.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be sent or the response could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("analysis service returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body was not a valid analysis result.
    #[error("invalid analysis response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Error reading the document to upload.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ClientError> for OverlayError {
    fn from(err: ClientError) -> Self {
        OverlayError::AnalysisRequestFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_display() {
        let err = ClientError::Status {
            status: 500,
            message: "No file uploaded".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "analysis service returned 500: No file uploaded"
        );
    }

    #[test]
    fn io_error_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: ClientError = io_err.into();
        assert!(matches!(err, ClientError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn decode_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ClientError = json_err.into();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[test]
    fn every_variant_maps_to_request_failed() {
        let status = ClientError::Status {
            status: 502,
            message: "bad gateway".to_string(),
        };
        let io: ClientError = std::io::Error::other("disk").into();
        for err in [status, io] {
            let text = err.to_string();
            let overlay: OverlayError = err.into();
            assert_eq!(overlay, OverlayError::AnalysisRequestFailed(text));
        }
    }
}
