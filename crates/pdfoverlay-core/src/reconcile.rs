//! Field reconciliation: analysis result in, normalized fields out.
//!
//! Each source item is resolved against its page's metrics, normalized,
//! and given a type, value, name and id. A single counter runs across all
//! three source kinds and feeds both the `Field {n}` placeholder names and
//! the id suffixes, so placeholder numbers can have gaps when interactive
//! fields carry their own names.

use std::collections::{BTreeMap, BTreeSet};

use crate::analysis::AnalysisResult;
use crate::error::{ReconcileResult, ReconcileWarning};
use crate::geometry::to_normalized;
use crate::model::{Field, FieldType, FieldValue, PageMetricsTable, SourceGeometry};
use crate::options::ReconcileOptions;

/// Reconcile a complete analysis result.
///
/// Never fails: unusable items are skipped and reported in the returned
/// warnings. Use [`ReconcileResult::into_strict`] to turn those into an error.
pub fn reconcile(analysis: &AnalysisResult, options: &ReconcileOptions) -> ReconcileResult<Vec<Field>> {
    let metrics = analysis.page_metrics(options.default_page_size);
    let sources = analysis.source_geometry();
    let mut result = reconcile_sources(&sources.value, &metrics, options);

    let mut warnings = sources.warnings;
    warnings.append(&mut result.warnings);
    ReconcileResult::with_warnings(result.value, warnings)
}

/// Reconcile already-flattened source items against a metrics table.
pub fn reconcile_sources(
    sources: &[SourceGeometry],
    metrics: &PageMetricsTable,
    options: &ReconcileOptions,
) -> ReconcileResult<Vec<Field>> {
    let mut fields = Vec::with_capacity(sources.len());
    let mut warnings = Vec::new();
    let mut missing_pages = BTreeSet::new();
    // page -> index into `warnings` of that page's InvalidMetrics entry
    let mut invalid_pages: BTreeMap<u32, usize> = BTreeMap::new();
    let mut counter: u32 = 0;

    for (index, source) in sources.iter().enumerate() {
        let page = source.page();

        if metrics.get(page).is_none() && missing_pages.insert(page) {
            warnings.push(ReconcileWarning::missing_metrics(page, metrics.fallback()));
        }
        let size = metrics.size_of(page);

        let bbox = source.field_box(size.height, options);
        let rect = match to_normalized(&bbox, size.width, size.height) {
            Ok(rect) => rect,
            Err(_) => {
                match invalid_pages.get(&page) {
                    Some(&at) => warnings[at].skipped += 1,
                    None => {
                        invalid_pages.insert(page, warnings.len());
                        warnings.push(ReconcileWarning::invalid_metrics(page, size, index));
                    }
                }
                continue;
            }
        };

        counter += 1;
        let kind = source.kind();

        let (field_type, value, name) = match source {
            SourceGeometry::InteractiveField {
                name,
                type_tag,
                value,
                ..
            } => (
                FieldType::from_source_tag(type_tag),
                value.clone().unwrap_or_default(),
                name.clone(),
            ),
            SourceGeometry::VisualBox { .. } | SourceGeometry::VisualLine { .. } => {
                (FieldType::Text, FieldValue::empty(), None)
            }
        };

        let field = Field {
            id: format!("{}-{counter}", kind.id_prefix()),
            field_type,
            page,
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            value,
            name: Some(name.unwrap_or_else(|| format!("Field {counter}"))),
            required: false,
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(id = %field.id, page, x = field.x, y = field.y, "reconciled field");

        fields.push(field);
    }

    #[cfg(feature = "tracing")]
    for w in &warnings {
        tracing::debug!("{w}");
    }

    ReconcileResult::with_warnings(fields, warnings)
}
