//! pdfoverlay-core: editable form fields over rendered document pages.
//!
//! This crate turns the page-space hints of a document analysis (AcroForm
//! widgets, detected boxes, detected underlines) into fields stored in
//! resolution-independent normalized coordinates, and keeps them in step
//! with the on-screen page as it is resized, paged through and edited.
//! It performs no I/O.
//!
//! # Architecture
//!
//! - [`geometry`]: pure conversions between page, normalized and pixel space
//! - [`reconcile`]: analysis result to field collection
//! - [`overlay`]: live field state, gestures and selection for one page
//! - [`session`]: active document identity and stale-response handling

pub mod analysis;
pub mod error;
pub mod geometry;
pub mod model;
pub mod options;
pub mod overlay;
pub mod reconcile;
pub mod session;

pub use analysis::{
    AnalysisResult, AnalysisSummary, InteractiveFieldEntry, TableEntry, TextContent, TextPage,
    TextWord, VisualElements,
};
pub use error::{OverlayError, ReconcileResult, ReconcileWarning, ReconcileWarningCode};
pub use geometry::{
    NormalizedRect, Origin, PageSize, PixelRect, SourceBox, pixel_delta_to_normalized,
    pixel_point_to_normalized, to_normalized, to_pixels,
};
pub use model::{
    Field, FieldPatch, FieldType, FieldValue, PageMetrics, PageMetricsTable, SourceGeometry,
    SourceKind,
};
pub use options::ReconcileOptions;
pub use overlay::{GestureKind, OverlayController, PendingGesture, RenderedField, ViewportGeometry};
pub use reconcile::{reconcile, reconcile_sources};
pub use session::{DocumentToken, LoadOutcome, Session};
