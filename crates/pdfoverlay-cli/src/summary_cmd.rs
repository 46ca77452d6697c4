use std::path::Path;

use crate::cli::ReportFormat;
use crate::shared::{load_analysis, print_json};

pub fn run(file: &Path, format: &ReportFormat) -> Result<(), i32> {
    let analysis = load_analysis(file)?;
    let summary = analysis.summary();

    match format {
        ReportFormat::Text => {
            if let Some(name) = &analysis.file_name {
                println!("File:                {name}");
            }
            println!("Pages:               {}", summary.page_count);
            println!("AcroForm:            {}", if summary.has_acroform { "yes" } else { "no" });
            println!("Interactive fields:  {}", summary.interactive_field_count);
            println!("Tables:              {}", summary.table_count);
            Ok(())
        }
        ReportFormat::Json => print_json(&serde_json::json!({
            "file_name": analysis.file_name,
            "analysis_summary": summary,
        })),
    }
}
