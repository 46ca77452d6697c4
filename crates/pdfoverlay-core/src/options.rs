//! Options controlling reconciliation.

use crate::geometry::{Origin, PageSize};

/// Options controlling how an analysis result is turned into fields.
///
/// Provides sensible defaults for all settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcileOptions {
    /// Page size assumed for pages absent from the analysis (default: 612×792).
    pub default_page_size: PageSize,
    /// Height, in page units, of the input box synthesized above a detected
    /// underline (default: 14).
    pub line_field_height: f64,
    /// Gap, in page units, between the synthesized box's bottom edge and the
    /// underline (default: 2).
    pub line_baseline_offset: f64,
    /// Origin of the analysis coordinates (default: top-left).
    pub origin: Origin,
    /// When true, any non-informational warning fails the load (default: false).
    pub strict: bool,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            default_page_size: PageSize::LETTER,
            line_field_height: 14.0,
            line_baseline_offset: 2.0,
            origin: Origin::TopLeft,
            strict: false,
        }
    }
}

impl ReconcileOptions {
    /// Options for analyses that report native PDF (bottom-left) coordinates.
    pub fn bottom_left() -> Self {
        Self {
            origin: Origin::BottomLeft,
            ..Self::default()
        }
    }
}
