//! Error and warning types for pdfoverlay.
//!
//! Provides [`OverlayError`] for conditions that stop an operation,
//! [`ReconcileWarning`] for per-item problems that reconciliation skips
//! over, and [`ReconcileResult`] for pairing a value with the warnings
//! collected while producing it.
//!
//! Operations on unknown field ids are not errors at all: the overlay
//! controller treats them as no-ops.

use std::fmt;

use crate::geometry::PageSize;

/// Fatal error types.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayError {
    /// A page or viewport dimension was zero, negative, or not finite.
    InvalidMetrics {
        /// 1-based page number, when the dimension belongs to a page.
        page: Option<u32>,
        width: f64,
        height: f64,
    },
    /// The analysis request failed in transport or could not be decoded.
    AnalysisRequestFailed(String),
    /// A source geometry entry could not be interpreted.
    MalformedSource(String),
}

impl fmt::Display for OverlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlayError::InvalidMetrics {
                page: Some(page),
                width,
                height,
            } => write!(f, "invalid metrics for page {page}: {width}x{height}"),
            OverlayError::InvalidMetrics {
                page: None,
                width,
                height,
            } => write!(f, "invalid dimensions: {width}x{height}"),
            OverlayError::AnalysisRequestFailed(msg) => write!(f, "analysis request failed: {msg}"),
            OverlayError::MalformedSource(msg) => write!(f, "malformed source geometry: {msg}"),
        }
    }
}

impl std::error::Error for OverlayError {}

/// Machine-readable category of a reconciliation warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum ReconcileWarningCode {
    /// A page resolved to a non-positive size; its items were skipped.
    InvalidMetrics,
    /// A page had no metrics and the default page size was used.
    MissingPageMetrics,
    /// A box or line entry had too few or non-finite coordinates.
    MalformedGeometry,
}

impl ReconcileWarningCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReconcileWarningCode::InvalidMetrics => "INVALID_METRICS",
            ReconcileWarningCode::MissingPageMetrics => "MISSING_PAGE_METRICS",
            ReconcileWarningCode::MalformedGeometry => "MALFORMED_GEOMETRY",
        }
    }

    /// Informational codes never escalate to errors, even in strict mode.
    pub fn is_informational(&self) -> bool {
        matches!(self, ReconcileWarningCode::MissingPageMetrics)
    }
}

impl fmt::Display for ReconcileWarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-fatal problem found while reconciling one analysis result.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReconcileWarning {
    pub code: ReconcileWarningCode,
    pub description: String,
    /// 1-based page number the warning refers to.
    pub page: Option<u32>,
    /// Position of the offending item in reconciliation order.
    pub source_index: Option<usize>,
    /// Page size involved, for metrics-related warnings.
    pub page_size: Option<PageSize>,
    /// Number of source items skipped because of this condition.
    pub skipped: usize,
}

impl ReconcileWarning {
    pub fn new(code: ReconcileWarningCode, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
            page: None,
            source_index: None,
            page_size: None,
            skipped: 0,
        }
    }

    /// A page whose resolved size cannot be divided by.
    pub fn invalid_metrics(page: u32, size: PageSize, source_index: usize) -> Self {
        Self {
            page: Some(page),
            source_index: Some(source_index),
            page_size: Some(size),
            skipped: 1,
            ..Self::new(
                ReconcileWarningCode::InvalidMetrics,
                format!("page size {}x{} is not positive", size.width, size.height),
            )
        }
    }

    /// A page referenced by a source item but absent from the page metrics.
    pub fn missing_metrics(page: u32, fallback: PageSize) -> Self {
        Self {
            page: Some(page),
            page_size: Some(fallback),
            ..Self::new(
                ReconcileWarningCode::MissingPageMetrics,
                format!(
                    "no metrics for page, using {}x{}",
                    fallback.width, fallback.height
                ),
            )
        }
    }

    /// A box or line entry that could not be read.
    pub fn malformed(page: u32, description: impl Into<String>) -> Self {
        Self {
            page: Some(page),
            skipped: 1,
            ..Self::new(ReconcileWarningCode::MalformedGeometry, description)
        }
    }

    /// Convert this warning into the [`OverlayError`] it stands for.
    pub fn to_error(&self) -> OverlayError {
        match (self.code, self.page_size) {
            (ReconcileWarningCode::InvalidMetrics, Some(size)) => OverlayError::InvalidMetrics {
                page: self.page,
                width: size.width,
                height: size.height,
            },
            _ => OverlayError::MalformedSource(self.to_string()),
        }
    }
}

impl fmt::Display for ReconcileWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.description)?;
        if let Some(page) = self.page {
            write!(f, " (page {page})")?;
        }
        if self.skipped > 1 {
            write!(f, " [{} items skipped]", self.skipped)?;
        }
        Ok(())
    }
}

/// Result wrapper that pairs a value with collected warnings.
#[derive(Debug, Clone)]
pub struct ReconcileResult<T> {
    pub value: T,
    pub warnings: Vec<ReconcileWarning>,
}

impl<T> ReconcileResult<T> {
    pub fn with_warnings(value: T, warnings: Vec<ReconcileWarning>) -> Self {
        Self { value, warnings }
    }

    /// Returns true if there are no warnings.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Errors among the collected warnings, in collection order.
    pub fn errors(&self) -> Vec<OverlayError> {
        self.warnings
            .iter()
            .filter(|w| !w.code.is_informational())
            .map(ReconcileWarning::to_error)
            .collect()
    }

    /// Escalate the first non-informational warning to an error.
    pub fn into_strict(self) -> Result<T, OverlayError> {
        match self.warnings.iter().find(|w| !w.code.is_informational()) {
            Some(w) => Err(w.to_error()),
            None => Ok(self.value),
        }
    }
}
