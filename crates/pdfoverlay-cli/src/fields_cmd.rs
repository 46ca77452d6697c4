use std::path::Path;

use pdfoverlay_core::Field;

use crate::cli::{OriginArg, OutputFormat};
use crate::shared::{
    csv_escape, filter_pages, load_analysis, page_span, print_json, reconcile_fields,
    reconcile_options, resolve_pages,
};

pub fn run(
    file: &Path,
    pages: Option<&str>,
    format: &OutputFormat,
    origin: OriginArg,
    strict: bool,
) -> Result<(), i32> {
    let analysis = load_analysis(file)?;
    let options = reconcile_options(origin, strict);
    let fields = reconcile_fields(&analysis, &options)?;
    let selected = resolve_pages(pages, page_span(&analysis, &fields))?;
    let fields = filter_pages(fields, selected.as_deref());
    write_fields(&fields, format)
}

/// Print a field listing in the requested format.
pub fn write_fields(fields: &[Field], format: &OutputFormat) -> Result<(), i32> {
    match format {
        OutputFormat::Text => {
            write_text(fields);
            Ok(())
        }
        OutputFormat::Json => print_json(fields),
        OutputFormat::Csv => {
            write_csv(fields);
            Ok(())
        }
    }
}

fn write_text(fields: &[Field]) {
    println!("id\tpage\ttype\tname\tvalue\tx\ty\twidth\theight");
    for f in fields {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{:.2}\t{:.2}\t{:.2}\t{:.2}",
            f.id,
            f.page,
            f.field_type,
            f.name.as_deref().unwrap_or(""),
            f.value.as_text(),
            f.x,
            f.y,
            f.width,
            f.height,
        );
    }
}

fn write_csv(fields: &[Field]) {
    println!("id,page,type,name,value,x,y,width,height");
    for f in fields {
        println!(
            "{},{},{},{},{},{:.2},{:.2},{:.2},{:.2}",
            f.id,
            f.page,
            f.field_type,
            csv_escape(f.name.as_deref().unwrap_or("")),
            csv_escape(&f.value.as_text()),
            f.x,
            f.y,
            f.width,
            f.height,
        );
    }
}
