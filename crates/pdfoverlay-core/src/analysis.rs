//! The analysis service's response, as received on the wire.
//!
//! Every top-level key is optional. Collections the overlay does not use
//! (text words, tables, the AcroForm value map) are still carried so that
//! callers can inspect them.

use std::collections::BTreeMap;

use crate::error::{ReconcileResult, ReconcileWarning};
use crate::geometry::{PageSize, SourceBox};
use crate::model::{FieldValue, PageMetrics, PageMetricsTable, SourceGeometry};

/// Decoders for values the service passes through from the PDF unchanged.
#[cfg(feature = "serde")]
mod lenient {
    use std::collections::BTreeMap;

    use serde::de::IgnoredAny;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient<T> {
        Known(T),
        Other(IgnoredAny),
    }

    impl<T> Lenient<T> {
        fn into_option(self) -> Option<T> {
            match self {
                Lenient::Known(v) => Some(v),
                Lenient::Other(_) => None,
            }
        }
    }

    /// `T`, or `None` for `null` and any shape `T` does not accept.
    pub fn option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        let raw = Option::<Lenient<T>>::deserialize(deserializer)?;
        Ok(raw.and_then(Lenient::into_option))
    }

    /// A name-to-text map whose non-text values become `None`.
    pub fn text_map<'de, D>(
        deserializer: D,
    ) -> Result<Option<BTreeMap<String, Option<String>>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<BTreeMap<String, Lenient<String>>>::deserialize(deserializer)?;
        Ok(raw.map(|map| {
            map.into_iter()
                .map(|(name, value)| (name, value.into_option()))
                .collect()
        }))
    }
}

/// Complete analysis response for one document.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct AnalysisResult {
    pub file_name: Option<String>,
    /// AcroForm field name to current value. Values that are not text
    /// (multi-select arrays, numbers) are kept as `None`.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient::text_map"))]
    pub acroform_fields: Option<BTreeMap<String, Option<String>>>,
    pub interactive_fields: Option<Vec<InteractiveFieldEntry>>,
    pub text_content: Option<TextContent>,
    pub visual_elements: Option<Vec<VisualElements>>,
    pub tables: Option<Vec<TableEntry>>,
    pub analysis_summary: Option<AnalysisSummary>,
}

/// A widget annotation with its position.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct InteractiveFieldEntry {
    pub page_number: u32,
    pub name: Option<String>,
    /// Current value; anything other than text or a boolean reads as `None`.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient::option"))]
    pub value: Option<FieldValue>,
    /// `[x0, y0, x1, y1]` in page space.
    pub bbox: Vec<f64>,
    /// Raw `/FT` tag.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub field_type: String,
}

/// Per-document text extraction.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct TextContent {
    pub page_count: u32,
    pub pages: Vec<TextPage>,
}

/// One page of text extraction; carries the page's metrics.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct TextPage {
    pub page_number: u32,
    pub width: f64,
    pub height: f64,
    pub text_and_coords: Vec<TextWord>,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct TextWord {
    pub text: String,
    pub bbox: Vec<f64>,
    pub is_list_marker: bool,
}

/// Detected underlines and empty boxes on one page.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct VisualElements {
    pub page_number: u32,
    /// `[x0, y0, x1, y1]`; only `x0`, `y0` and `x1` are used.
    pub lines: Vec<Vec<f64>>,
    /// `[x0, y0, x1, y1]`.
    pub boxes: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct TableEntry {
    pub page_number: u32,
    pub bbox: Vec<f64>,
    pub row_count: usize,
    pub col_count: usize,
}

/// Counts reported alongside the analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct AnalysisSummary {
    pub has_acroform: bool,
    pub interactive_field_count: usize,
    pub page_count: usize,
    pub table_count: usize,
}

impl AnalysisResult {
    /// Page metrics from the text extraction, keyed by page number.
    pub fn page_metrics(&self, fallback: PageSize) -> PageMetricsTable {
        let pages = self
            .text_content
            .iter()
            .flat_map(|tc| tc.pages.iter())
            .map(|p| PageMetrics {
                page_number: p.page_number,
                width: p.width,
                height: p.height,
            });
        PageMetricsTable::from_pages(pages, fallback)
    }

    /// Flatten the three source collections into reconciliation order:
    /// interactive fields, then boxes, then lines, each in source order.
    ///
    /// Entries with unusable coordinates are skipped with a warning.
    pub fn source_geometry(&self) -> ReconcileResult<Vec<SourceGeometry>> {
        let mut sources = Vec::new();
        let mut warnings = Vec::new();

        for entry in self.interactive_fields.iter().flatten() {
            match SourceBox::from_slice(&entry.bbox) {
                Some(bbox) => sources.push(SourceGeometry::InteractiveField {
                    page: entry.page_number,
                    name: entry.name.clone().filter(|n| !n.is_empty()),
                    type_tag: entry.field_type.clone(),
                    value: entry.value.clone(),
                    bbox,
                }),
                None => warnings.push(ReconcileWarning::malformed(
                    entry.page_number,
                    format!(
                        "interactive field bbox has {} usable coordinates",
                        entry.bbox.len()
                    ),
                )),
            }
        }

        let elements = self.visual_elements.as_deref().unwrap_or_default();

        for page in elements {
            for coords in &page.boxes {
                match SourceBox::from_slice(coords) {
                    Some(bbox) => sources.push(SourceGeometry::VisualBox {
                        page: page.page_number,
                        bbox,
                    }),
                    None => warnings.push(ReconcileWarning::malformed(
                        page.page_number,
                        format!("box has {} usable coordinates", coords.len()),
                    )),
                }
            }
        }

        for page in elements {
            for coords in &page.lines {
                match coords.as_slice() {
                    [x0, y0, x1, ..] if [x0, y0, x1].iter().all(|v| v.is_finite()) => {
                        sources.push(SourceGeometry::VisualLine {
                            page: page.page_number,
                            x0: x0.min(*x1),
                            y0: *y0,
                            x1: x0.max(*x1),
                        })
                    }
                    _ => warnings.push(ReconcileWarning::malformed(
                        page.page_number,
                        format!("line has {} usable coordinates", coords.len()),
                    )),
                }
            }
        }

        ReconcileResult::with_warnings(sources, warnings)
    }

    /// Number of pages in the document, as best the analysis can tell.
    pub fn page_count(&self) -> u32 {
        if let Some(tc) = &self.text_content {
            if tc.page_count > 0 {
                return tc.page_count;
            }
            if let Some(max) = tc.pages.iter().map(|p| p.page_number).max() {
                return max;
            }
        }
        let interactive = self
            .interactive_fields
            .iter()
            .flatten()
            .map(|f| f.page_number);
        let visual = self
            .visual_elements
            .iter()
            .flatten()
            .map(|v| v.page_number);
        interactive.chain(visual).max().unwrap_or(0)
    }

    /// The service's summary, or one derived from the other keys.
    pub fn summary(&self) -> AnalysisSummary {
        if let Some(summary) = &self.analysis_summary {
            return summary.clone();
        }
        AnalysisSummary {
            has_acroform: self.acroform_fields.as_ref().is_some_and(|m| !m.is_empty()),
            interactive_field_count: self.interactive_fields.as_ref().map_or(0, Vec::len),
            page_count: self.page_count() as usize,
            table_count: self.tables.as_ref().map_or(0, Vec::len),
        }
    }
}
