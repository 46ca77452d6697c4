//! Field, page metrics and source geometry types.
//!
//! [`SourceGeometry`] is what the analysis reports, in page space.
//! [`Field`] is what the overlay edits, in normalized space.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::geometry::{NormalizedRect, Origin, PageSize, SourceBox};
use crate::options::ReconcileOptions;

/// The kind of input widget drawn for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum FieldType {
    #[default]
    Text,
    Checkbox,
    Date,
    Signature,
}

impl FieldType {
    /// Map an AcroForm `/FT` tag onto a field type.
    ///
    /// Only buttons (`Btn`) are distinguished; every other tag, including
    /// `Sig` and `Ch`, becomes a text field.
    pub fn from_source_tag(tag: &str) -> Self {
        match tag {
            "Btn" => Self::Checkbox,
            _ => Self::Text,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Checkbox => "checkbox",
            Self::Date => "date",
            Self::Signature => "signature",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "checkbox" => Ok(Self::Checkbox),
            "date" => Ok(Self::Date),
            "signature" => Ok(Self::Signature),
            other => Err(format!("unknown field type: {other}")),
        }
    }
}

/// The current value of a field: text, or a boolean for toggled widgets.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    pub fn empty() -> Self {
        Self::Text(String::new())
    }

    /// Whether a checkbox showing this value is ticked.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Text(s) => !s.is_empty(),
            Self::Flag(b) => *b,
        }
    }

    /// The value as text; flags render as `"true"`/`"false"`.
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Flag(b) => b.to_string(),
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

/// An editable field placed on a page.
///
/// Geometry is in normalized space relative to the field's own page, so
/// it survives any change of zoom or viewport size unchanged.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    /// Identity assigned at reconciliation; never reused within a document.
    pub id: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub field_type: FieldType,
    /// 1-based page number.
    pub page: u32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub value: FieldValue,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub required: bool,
}

impl Field {
    pub fn rect(&self) -> NormalizedRect {
        NormalizedRect {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }

    pub fn set_rect(&mut self, rect: NormalizedRect) {
        self.x = rect.x;
        self.y = rect.y;
        self.width = rect.width;
        self.height = rect.height;
    }
}

/// A partial set of field properties to merge into an existing [`Field`].
///
/// `None` leaves the property untouched.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldPatch {
    #[cfg_attr(feature = "serde", serde(default, rename = "type"))]
    pub field_type: Option<FieldType>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: Option<FieldValue>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub required: Option<bool>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub x: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub y: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub width: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub height: Option<f64>,
}

impl FieldPatch {
    pub fn value(value: impl Into<FieldValue>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn apply(&self, field: &mut Field) {
        if let Some(t) = self.field_type {
            field.field_type = t;
        }
        if let Some(ref v) = self.value {
            field.value = v.clone();
        }
        if let Some(ref n) = self.name {
            field.name = Some(n.clone());
        }
        if let Some(r) = self.required {
            field.required = r;
        }
        if let Some(x) = self.x {
            field.x = x;
        }
        if let Some(y) = self.y {
            field.y = y;
        }
        if let Some(w) = self.width {
            field.width = w;
        }
        if let Some(h) = self.height {
            field.height = h;
        }
    }
}

/// Size of one page as reported by the analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageMetrics {
    /// 1-based page number.
    pub page_number: u32,
    pub width: f64,
    pub height: f64,
}

impl PageMetrics {
    pub fn size(&self) -> PageSize {
        PageSize::new(self.width, self.height)
    }
}

/// Page metrics keyed by page number, with a fallback size for pages the
/// analysis did not describe.
#[derive(Debug, Clone, PartialEq)]
pub struct PageMetricsTable {
    pages: BTreeMap<u32, PageMetrics>,
    fallback: PageSize,
}

impl PageMetricsTable {
    pub fn new(fallback: PageSize) -> Self {
        Self {
            pages: BTreeMap::new(),
            fallback,
        }
    }

    /// Build a table; a later entry for the same page number replaces an earlier one.
    pub fn from_pages(pages: impl IntoIterator<Item = PageMetrics>, fallback: PageSize) -> Self {
        let mut table = Self::new(fallback);
        for page in pages {
            table.insert(page);
        }
        table
    }

    pub fn insert(&mut self, metrics: PageMetrics) {
        self.pages.insert(metrics.page_number, metrics);
    }

    pub fn get(&self, page: u32) -> Option<&PageMetrics> {
        self.pages.get(&page)
    }

    /// Size of `page`, or the fallback size when the page is unknown.
    pub fn size_of(&self, page: u32) -> PageSize {
        self.get(page).map_or(self.fallback, PageMetrics::size)
    }

    pub fn fallback(&self) -> PageSize {
        self.fallback
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl Default for PageMetricsTable {
    fn default() -> Self {
        Self::new(PageSize::LETTER)
    }
}

/// Which analysis collection a source item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    InteractiveField,
    VisualBox,
    VisualLine,
}

impl SourceKind {
    /// Prefix of the ids assigned to fields of this kind.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            SourceKind::InteractiveField => "acro",
            SourceKind::VisualBox => "box",
            SourceKind::VisualLine => "line",
        }
    }
}

/// A page-space hint from the analysis that becomes one field.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceGeometry {
    /// A native AcroForm widget.
    InteractiveField {
        page: u32,
        name: Option<String>,
        /// Raw `/FT` tag, e.g. `Tx` or `Btn`.
        type_tag: String,
        value: Option<FieldValue>,
        bbox: SourceBox,
    },
    /// A detected empty rectangle.
    VisualBox { page: u32, bbox: SourceBox },
    /// A detected underline; it has no height of its own.
    VisualLine { page: u32, x0: f64, y0: f64, x1: f64 },
}

impl SourceGeometry {
    pub fn page(&self) -> u32 {
        match self {
            SourceGeometry::InteractiveField { page, .. }
            | SourceGeometry::VisualBox { page, .. }
            | SourceGeometry::VisualLine { page, .. } => *page,
        }
    }

    pub fn kind(&self) -> SourceKind {
        match self {
            SourceGeometry::InteractiveField { .. } => SourceKind::InteractiveField,
            SourceGeometry::VisualBox { .. } => SourceKind::VisualBox,
            SourceGeometry::VisualLine { .. } => SourceKind::VisualLine,
        }
    }

    /// The field box in top-left page space.
    ///
    /// Underlines get a box `line_field_height` tall whose bottom edge sits
    /// `line_baseline_offset` above the line, so the input rests on it.
    pub fn field_box(&self, page_height: f64, options: &ReconcileOptions) -> SourceBox {
        match self {
            SourceGeometry::InteractiveField { bbox, .. } | SourceGeometry::VisualBox { bbox, .. } => {
                bbox.to_top_left(options.origin, page_height)
            }
            SourceGeometry::VisualLine { x0, y0, x1, .. } => {
                let baseline = match options.origin {
                    Origin::TopLeft => *y0,
                    Origin::BottomLeft => page_height - *y0,
                };
                let height = options.line_field_height;
                let top = baseline - height + options.line_baseline_offset;
                SourceBox::new(*x0, top, *x1, top + height)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_field() -> Field {
        Field {
            id: "box-1".to_string(),
            field_type: FieldType::Text,
            page: 1,
            x: 10.0,
            y: 20.0,
            width: 30.0,
            height: 2.0,
            value: FieldValue::empty(),
            name: Some("Field 1".to_string()),
            required: false,
        }
    }

    #[test]
    fn field_type_from_source_tag() {
        assert_eq!(FieldType::from_source_tag("Btn"), FieldType::Checkbox);
        assert_eq!(FieldType::from_source_tag("Tx"), FieldType::Text);
        assert_eq!(FieldType::from_source_tag("Sig"), FieldType::Text);
        assert_eq!(FieldType::from_source_tag("Ch"), FieldType::Text);
        assert_eq!(FieldType::from_source_tag(""), FieldType::Text);
    }

    #[test]
    fn field_type_display() {
        assert_eq!(FieldType::Text.to_string(), "text");
        assert_eq!(FieldType::Checkbox.to_string(), "checkbox");
        assert_eq!(FieldType::Date.to_string(), "date");
        assert_eq!(FieldType::Signature.to_string(), "signature");
    }

    #[test]
    fn field_type_from_str() {
        assert_eq!("checkbox".parse::<FieldType>(), Ok(FieldType::Checkbox));
        assert_eq!("Signature".parse::<FieldType>(), Ok(FieldType::Signature));
        assert!("radio".parse::<FieldType>().is_err());
    }

    #[test]
    fn field_value_truthiness() {
        assert!(!FieldValue::empty().is_truthy());
        assert!(FieldValue::from("/Yes").is_truthy());
        assert!(FieldValue::from(true).is_truthy());
        assert!(!FieldValue::from(false).is_truthy());
    }

    #[test]
    fn field_value_as_text() {
        assert_eq!(FieldValue::from("abc").as_text(), "abc");
        assert_eq!(FieldValue::from(true).as_text(), "true");
    }

    #[test]
    fn patch_merges_only_set_properties() {
        let mut field = sample_field();
        let patch = FieldPatch {
            field_type: Some(FieldType::Date),
            name: Some("Birth date".to_string()),
            width: Some(12.5),
            ..FieldPatch::default()
        };
        patch.apply(&mut field);
        assert_eq!(field.field_type, FieldType::Date);
        assert_eq!(field.name.as_deref(), Some("Birth date"));
        assert_eq!(field.width, 12.5);
        assert_eq!(field.x, 10.0);
        assert_eq!(field.height, 2.0);
        assert_eq!(field.id, "box-1");
    }

    #[test]
    fn empty_patch_is_identity() {
        let mut field = sample_field();
        FieldPatch::default().apply(&mut field);
        assert_eq!(field, sample_field());
    }

    #[test]
    fn patch_helpers() {
        let mut field = sample_field();
        FieldPatch::value("hello").apply(&mut field);
        FieldPatch::position(1.0, 2.0).apply(&mut field);
        assert_eq!(field.value, FieldValue::from("hello"));
        assert_eq!((field.x, field.y), (1.0, 2.0));
    }

    #[test]
    fn rect_round_trip() {
        let mut field = sample_field();
        let mut r = field.rect();
        r.x = 55.0;
        field.set_rect(r);
        assert_eq!(field.x, 55.0);
        assert_eq!(field.rect(), r);
    }

    #[test]
    fn metrics_table_falls_back_for_unknown_pages() {
        let table = PageMetricsTable::from_pages(
            [PageMetrics {
                page_number: 1,
                width: 595.0,
                height: 842.0,
            }],
            PageSize::LETTER,
        );
        assert_eq!(table.size_of(1), PageSize::new(595.0, 842.0));
        assert_eq!(table.size_of(2), PageSize::LETTER);
        assert!(table.get(2).is_none());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn metrics_table_later_entry_wins() {
        let table = PageMetricsTable::from_pages(
            [
                PageMetrics {
                    page_number: 1,
                    width: 100.0,
                    height: 100.0,
                },
                PageMetrics {
                    page_number: 1,
                    width: 200.0,
                    height: 300.0,
                },
            ],
            PageSize::LETTER,
        );
        assert_eq!(table.size_of(1), PageSize::new(200.0, 300.0));
    }

    #[test]
    fn id_prefixes() {
        assert_eq!(SourceKind::InteractiveField.id_prefix(), "acro");
        assert_eq!(SourceKind::VisualBox.id_prefix(), "box");
        assert_eq!(SourceKind::VisualLine.id_prefix(), "line");
    }

    #[test]
    fn line_box_sits_above_the_line() {
        let line = SourceGeometry::VisualLine {
            page: 1,
            x0: 50.0,
            y0: 300.0,
            x1: 150.0,
        };
        let b = line.field_box(792.0, &ReconcileOptions::default());
        assert_eq!(b, SourceBox::new(50.0, 288.0, 150.0, 302.0));
    }

    #[test]
    fn line_box_with_bottom_left_origin() {
        let line = SourceGeometry::VisualLine {
            page: 1,
            x0: 50.0,
            y0: 492.0,
            x1: 150.0,
        };
        let b = line.field_box(792.0, &ReconcileOptions::bottom_left());
        assert_eq!(b, SourceBox::new(50.0, 288.0, 150.0, 302.0));
    }

    #[test]
    fn box_passes_through_with_top_left_origin() {
        let bbox = SourceBox::new(10.0, 20.0, 30.0, 40.0);
        let src = SourceGeometry::VisualBox { page: 2, bbox };
        assert_eq!(src.field_box(792.0, &ReconcileOptions::default()), bbox);
        assert_eq!(src.page(), 2);
        assert_eq!(src.kind(), SourceKind::VisualBox);
    }
}
