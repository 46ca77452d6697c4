use std::io::IsTerminal;
use std::path::Path;

use pdfoverlay_core::{AnalysisResult, Field, OverlayError, ReconcileOptions, ReconcileWarning, reconcile};
use tracing_subscriber::EnvFilter;

use crate::cli::OriginArg;
use crate::page_range::parse_page_range;

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level is `warn`, raised to
/// `debug` by `-v` and `trace` by `-vv`.
pub fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// Read and decode an analysis JSON file with user-friendly error messages.
///
/// Returns `Err(1)` with a message printed to stderr if the file is not found
/// or does not hold an analysis result.
pub fn load_analysis(file: &Path) -> Result<AnalysisResult, i32> {
    if !file.exists() {
        eprintln!("Error: file not found: {}", file.display());
        return Err(1);
    }

    let text = std::fs::read_to_string(file).map_err(|e| {
        eprintln!("Error: failed to read {}: {e}", file.display());
        1
    })?;
    serde_json::from_str(&text).map_err(|e| {
        eprintln!("Error: invalid analysis JSON: {e}");
        1
    })
}

pub fn reconcile_options(origin: OriginArg, strict: bool) -> ReconcileOptions {
    ReconcileOptions {
        origin: origin.into(),
        strict,
        ..ReconcileOptions::default()
    }
}

/// Reconcile `analysis`, printing warnings to stderr.
///
/// In strict mode the first non-informational warning is printed as an
/// error and the command fails.
pub fn reconcile_fields(
    analysis: &AnalysisResult,
    options: &ReconcileOptions,
) -> Result<Vec<Field>, i32> {
    let result = reconcile(analysis, options);
    report_warnings(&result.warnings);
    if options.strict {
        result.into_strict().map_err(report_error)
    } else {
        Ok(result.value)
    }
}

pub fn report_warnings(warnings: &[ReconcileWarning]) {
    for w in warnings {
        eprintln!("Warning: {w}");
    }
}

pub fn report_error(err: OverlayError) -> i32 {
    eprintln!("Error: {err}");
    1
}

/// Number of pages a page range is validated against: the document's page
/// count, or the highest page a field sits on if that is larger.
pub fn page_span(analysis: &AnalysisResult, fields: &[Field]) -> u32 {
    let highest = fields.iter().map(|f| f.page).max().unwrap_or(0);
    analysis.page_count().max(highest)
}

/// Resolve an optional page range string into 1-based page numbers.
///
/// If `pages` is `None`, returns `None` (every page).
pub fn resolve_pages(pages: Option<&str>, page_count: u32) -> Result<Option<Vec<u32>>, i32> {
    match pages {
        Some(range) => parse_page_range(range, page_count).map(Some).map_err(|e| {
            eprintln!("Error: {e}");
            1
        }),
        None => Ok(None),
    }
}

/// Keep fields whose page is in `pages`, preserving collection order.
pub fn filter_pages(fields: Vec<Field>, pages: Option<&[u32]>) -> Vec<Field> {
    match pages {
        Some(pages) => fields
            .into_iter()
            .filter(|f| pages.contains(&f.page))
            .collect(),
        None => fields,
    }
}

/// Escape a string for CSV output.
///
/// If the text contains commas, double quotes, or newlines, wraps it in
/// double quotes and escapes any internal double quotes by doubling them.
pub fn csv_escape(text: &str) -> String {
    if text.contains(',') || text.contains('"') || text.contains('\n') {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

/// Serialize to a JSON line on stdout.
pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), i32> {
    let json_str = serde_json::to_string(value).map_err(|e| {
        eprintln!("Error: failed to serialize output: {e}");
        1
    })?;
    println!("{json_str}");
    Ok(())
}
