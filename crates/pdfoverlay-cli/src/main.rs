mod analyze_cmd;
mod cli;
mod fields_cmd;
mod page_range;
mod render_cmd;
mod shared;
mod summary_cmd;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();
    shared::init_logging(cli.verbose);
    tracing::debug!(command = ?cli.command, "starting");

    let result = match cli.command {
        cli::Commands::Fields {
            ref file,
            ref pages,
            ref format,
            origin,
            strict,
        } => fields_cmd::run(file, pages.as_deref(), format, origin, strict),
        cli::Commands::Render {
            ref file,
            page,
            width,
            height,
            ref select,
            ref format,
            origin,
        } => render_cmd::run(file, page, width, height, select.as_deref(), format, origin),
        cli::Commands::Analyze {
            ref file,
            ref endpoint,
            timeout,
            ref pages,
            ref format,
            origin,
            strict,
        } => {
            let args = analyze_cmd::AnalyzeArgs {
                endpoint: endpoint.as_deref(),
                timeout,
                pages: pages.as_deref(),
                origin,
                strict,
            };
            analyze_cmd::run(file, &args, format)
        }
        cli::Commands::Summary {
            ref file,
            ref format,
        } => summary_cmd::run(file, format),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
