//! pdfoverlay-client: the document analysis request boundary.
//!
//! Uploads a document to the analysis service, decodes the response into
//! [`pdfoverlay_core::AnalysisResult`] and maps transport failures into the
//! core error taxonomy. It depends on pdfoverlay-core for shared data types.

pub mod backend;
pub mod client;
pub mod error;

pub use backend::{AnalysisBackend, load_document};
pub use client::{AnalysisClient, ClientOptions, DEFAULT_ENDPOINT, ENDPOINT_ENV, decode_response};
pub use error::ClientError;
pub use pdfoverlay_core;
