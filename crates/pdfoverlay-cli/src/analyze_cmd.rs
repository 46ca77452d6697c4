use std::path::Path;
use std::time::Duration;

use pdfoverlay_client::{AnalysisClient, ClientOptions, load_document};
use pdfoverlay_core::{LoadOutcome, Session};

use crate::cli::{OriginArg, OutputFormat};
use crate::fields_cmd::write_fields;
use crate::shared::{filter_pages, reconcile_options, report_error, report_warnings, resolve_pages};

pub struct AnalyzeArgs<'a> {
    pub endpoint: Option<&'a str>,
    pub timeout: u64,
    pub pages: Option<&'a str>,
    pub origin: OriginArg,
    pub strict: bool,
}

pub fn run(file: &Path, args: &AnalyzeArgs<'_>, format: &OutputFormat) -> Result<(), i32> {
    if !file.exists() {
        eprintln!("Error: file not found: {}", file.display());
        return Err(1);
    }
    let bytes = std::fs::read(file).map_err(|e| {
        eprintln!("Error: failed to read {}: {e}", file.display());
        1
    })?;
    let file_name = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document.pdf");

    let mut options = ClientOptions::from_env();
    if let Some(endpoint) = args.endpoint {
        options.endpoint = endpoint.to_string();
    }
    options.timeout = Duration::from_secs(args.timeout);
    let client = AnalysisClient::new(options).map_err(|e| report_error(e.into()))?;

    let mut session = Session::new(reconcile_options(args.origin, args.strict));
    match load_document(&mut session, &client, file_name, bytes).map_err(report_error)? {
        LoadOutcome::Loaded { warnings, .. } => report_warnings(&warnings),
        LoadOutcome::Stale => {
            eprintln!("Error: analysis response for {file_name} was superseded");
            return Err(1);
        }
    }

    let overlay = session.controller();
    let page_count = overlay
        .page_count()
        .max(overlay.fields().iter().map(|f| f.page).max().unwrap_or(0));
    let selected = resolve_pages(args.pages, page_count)?;
    let fields = filter_pages(overlay.fields().to_vec(), selected.as_deref());
    write_fields(&fields, format)
}
