use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use pdfoverlay_core::Origin;

/// Turn document analysis results into editable form-field overlays.
#[derive(Debug, Parser)]
#[command(name = "pdfoverlay", about, version)]
pub struct Cli {
    /// Increase log verbosity (-v: debug, -vv: trace). RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Reconcile an analysis result and list the normalized fields
    Fields {
        /// Path to the analysis JSON file
        #[arg(value_name = "ANALYSIS_JSON")]
        file: PathBuf,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Origin of the analysis coordinates
        #[arg(long, value_enum, default_value_t = OriginArg::TopLeft)]
        origin: OriginArg,

        /// Fail on malformed geometry or invalid page metrics instead of skipping
        #[arg(long)]
        strict: bool,
    },

    /// Project one page's fields into viewport pixel space
    Render {
        /// Path to the analysis JSON file
        #[arg(value_name = "ANALYSIS_JSON")]
        file: PathBuf,

        /// Page to render (1-based)
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Viewport width in pixels
        #[arg(long)]
        width: f64,

        /// Viewport height in pixels
        #[arg(long)]
        height: f64,

        /// Field id to mark as selected
        #[arg(long)]
        select: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,

        /// Origin of the analysis coordinates
        #[arg(long, value_enum, default_value_t = OriginArg::TopLeft)]
        origin: OriginArg,
    },

    /// Upload a PDF to the analysis service and list the resulting fields
    Analyze {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Analysis endpoint URL. Default: $PDFOVERLAY_ENDPOINT or the local service
        #[arg(long)]
        endpoint: Option<String>,

        /// Request timeout in seconds
        #[arg(long, default_value_t = 60)]
        timeout: u64,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Origin of the analysis coordinates
        #[arg(long, value_enum, default_value_t = OriginArg::TopLeft)]
        origin: OriginArg,

        /// Fail on malformed geometry or invalid page metrics instead of skipping
        #[arg(long)]
        strict: bool,
    },

    /// Print the analysis summary
    Summary {
        /// Path to the analysis JSON file
        #[arg(value_name = "ANALYSIS_JSON")]
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },
}

/// Output format for field listings.
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Plain text (tab-separated)
    Text,
    /// JSON output
    Json,
    /// CSV output
    Csv,
}

/// Output format for render and summary reports.
#[derive(Debug, Clone, ValueEnum)]
pub enum ReportFormat {
    /// Plain text output
    Text,
    /// JSON output
    Json,
}

/// Coordinate origin of the analysis service's boxes.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OriginArg {
    /// y grows downward from the top edge
    TopLeft,
    /// y grows upward from the bottom edge (native PDF)
    BottomLeft,
}

impl From<OriginArg> for Origin {
    fn from(arg: OriginArg) -> Self {
        match arg {
            OriginArg::TopLeft => Origin::TopLeft,
            OriginArg::BottomLeft => Origin::BottomLeft,
        }
    }
}
