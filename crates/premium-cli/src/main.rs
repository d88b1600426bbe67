mod commands;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "premium",
    version,
    about = "Extract GROSS premium transaction amounts from division report PDFs"
)]
struct Cli {
    /// Log every page and matched row (overrides RUST_LOG's default)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract DIRECT BILLED GROSS amounts from a report (PDF or form-feed separated text)
    Extract {
        /// Path to the report PDF, or a .txt file with pages separated by form feeds
        input_file: PathBuf,

        /// Write rows to a CSV file (parent directories are created)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Printed format when no CSV file is given
        #[arg(short, long, value_enum, default_value_t = PrintFormat::Table)]
        format: PrintFormat,

        /// Write one CSV row per division instead of one row per amount
        #[arg(long)]
        wide: bool,

        /// Custom JSON layout file (default: built-in premium-transactions layout)
        #[arg(short, long, value_name = "FILE")]
        layout: Option<PathBuf>,

        /// Exit with an error if any page, cell or amount is missing or unreadable
        #[arg(long)]
        strict: bool,
    },
    /// Inspect and check report layouts
    Layout {
        #[command(subcommand)]
        action: LayoutAction,
    },
}

/// How results are printed when no CSV file is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PrintFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum LayoutAction {
    /// Print the effective layout as JSON
    Show {
        /// Custom JSON layout file (default: built-in layout)
        #[arg(short, long, value_name = "FILE")]
        layout: Option<PathBuf>,
    },
    /// Validate a custom layout file
    Validate {
        /// Path to JSON layout file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();

    let result = match cli.command {
        Commands::Extract {
            input_file,
            output,
            format,
            wide,
            layout,
            strict,
        } => commands::extract::run(input_file, output, format, wide, layout, strict),
        Commands::Layout { action } => match action {
            LayoutAction::Show { layout } => commands::layout::show(layout.as_deref()),
            LayoutAction::Validate { file } => commands::layout::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
