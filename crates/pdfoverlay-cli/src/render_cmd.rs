use std::path::Path;

use pdfoverlay_core::{OverlayController, PageSize, RenderedField};

use crate::cli::{OriginArg, ReportFormat};
use crate::shared::{load_analysis, page_span, print_json, reconcile_fields, reconcile_options, report_error};

pub fn run(
    file: &Path,
    page: u32,
    width: f64,
    height: f64,
    select: Option<&str>,
    format: &ReportFormat,
    origin: OriginArg,
) -> Result<(), i32> {
    PageSize::new(width, height)
        .validate(None)
        .map_err(report_error)?;

    let analysis = load_analysis(file)?;
    let fields = reconcile_fields(&analysis, &reconcile_options(origin, false))?;
    let page_count = page_span(&analysis, &fields);

    let mut overlay = OverlayController::new(fields, page_count);
    overlay.set_page(page);
    overlay.on_viewport_resize(width, height);
    if let Some(id) = select {
        overlay.select(id);
        if overlay.selected().is_none() {
            eprintln!("Warning: no field with id '{id}'");
        }
    }

    match format {
        ReportFormat::Text => {
            write_text(overlay.visible());
            Ok(())
        }
        ReportFormat::Json => print_json(&serde_json::json!({
            "page": overlay.page(),
            "page_count": overlay.page_count(),
            "viewport": overlay.viewport(),
            "fields": overlay.visible(),
        })),
    }
}

fn write_text(rendered: &[RenderedField]) {
    println!("id\ttype\tname\tvalue\tleft\ttop\twidth\theight\tselected");
    for r in rendered {
        println!(
            "{}\t{}\t{}\t{}\t{:.1}\t{:.1}\t{:.1}\t{:.1}\t{}",
            r.id,
            r.field_type,
            r.name.as_deref().unwrap_or(""),
            r.value.as_text(),
            r.rect.x,
            r.rect.y,
            r.rect.width,
            r.rect.height,
            if r.selected { "*" } else { "" },
        );
    }
}
