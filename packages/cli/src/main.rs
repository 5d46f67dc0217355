#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for pdf-tabify.
//!
//! `pdf_tabify run` extracts every PDF in a directory with `pdftotext` and
//! converts the space-aligned text into `.tsv` files. `tabify` and
//! `segment` run only the conversion step on existing text. Without a
//! subcommand the tool asks for its settings interactively.
//!
//! Uses `indicatif-log-bridge` (via [`pdf_tabify_cli_utils::init_logger`])
//! to route `log` output through `indicatif::MultiProgress` so that log
//! lines and progress bars never fight for the terminal.

mod interactive;

use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use pdf_tabify_cli_utils::{IndicatifProgress, MultiProgress};
use pdf_tabify_extract::{EndOfLine, Layout};
use pdf_tabify_pipeline::{
    BatchConfig, BatchReport, ConfigError, PipelineError, TabifyConfig, TabifyStats,
};

#[derive(Parser)]
#[command(
    name = "pdf_tabify",
    about = "Convert tables in PDF files into tab-delimited text"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract and convert every PDF in a directory
    Run(RunArgs),
    /// Convert an existing space-delimited text file into a `.tsv` file
    Tabify {
        /// Space-delimited input (e.g. `report.spt`)
        input: PathBuf,
        /// Output path. Defaults to the input path with a `.tsv` extension.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Read space-delimited lines from stdin and write tab-delimited lines
    /// to stdout
    Segment,
}

/// `pdftotext` text layout modes selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LayoutArg {
    Table,
    Layout,
    Raw,
}

impl From<LayoutArg> for Layout {
    fn from(value: LayoutArg) -> Self {
        match value {
            LayoutArg::Table => Self::Table,
            LayoutArg::Layout => Self::Layout,
            LayoutArg::Raw => Self::Raw,
        }
    }
}

/// Line endings selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EolArg {
    Unix,
    Dos,
    Mac,
}

impl From<EolArg> for EndOfLine {
    fn from(value: EolArg) -> Self {
        match value {
            EolArg::Unix => Self::Unix,
            EolArg::Dos => Self::Dos,
            EolArg::Mac => Self::Mac,
        }
    }
}

#[derive(Args, Default)]
struct RunArgs {
    /// Directory containing the PDF files
    #[arg(long, alias = "pdfs_dir")]
    pdfs_dir: Option<PathBuf>,
    /// Directory receiving `.spt` and `.tsv` files
    #[arg(long, alias = "output_dir")]
    output_dir: Option<PathBuf>,
    /// TOML config file; flags given here override its values
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// First page to extract (1-based)
    #[arg(long)]
    first_page: Option<u32>,
    /// Last page to extract (1-based, inclusive)
    #[arg(long)]
    last_page: Option<u32>,
    /// Seconds to wait for `pdftotext` on each file
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Number of PDFs to process concurrently
    #[arg(short, long)]
    jobs: Option<usize>,
    /// Path to the `pdftotext` executable
    #[arg(long)]
    pdftotext: Option<String>,
    /// Text layout mode
    #[arg(long, value_enum)]
    layout: Option<LayoutArg>,
    /// Line endings `pdftotext` writes
    #[arg(long, value_enum)]
    eol: Option<EolArg>,
    /// Delete the intermediate `.spt` file after a successful conversion
    #[arg(long)]
    remove_intermediate: bool,
    /// Write a JSON report of per-file outcomes to this path
    #[arg(long)]
    report: Option<PathBuf>,
}

impl RunArgs {
    /// Layers the flags over the config file (if any) and resolves the
    /// result against the environment.
    fn into_config(self) -> Result<BatchConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => TabifyConfig::from_file(path)?,
            None => TabifyConfig::default(),
        };

        if self.pdfs_dir.is_some() {
            config.pdfs_dir = self.pdfs_dir;
        }
        if self.output_dir.is_some() {
            config.output_dir = self.output_dir;
        }
        if let Some(jobs) = self.jobs {
            config.jobs = jobs;
        }
        if self.remove_intermediate {
            config.keep_intermediate = false;
        }

        let extractor = &mut config.extractor;
        if let Some(first) = self.first_page {
            extractor.pages.first = Some(first);
        }
        if let Some(last) = self.last_page {
            extractor.pages.last = Some(last);
        }
        if let Some(timeout_secs) = self.timeout_secs {
            extractor.timeout_secs = timeout_secs;
        }
        if let Some(program) = self.pdftotext {
            extractor.program = program;
        }
        if let Some(layout) = self.layout {
            extractor.layout = layout.into();
        }
        if let Some(eol) = self.eol {
            extractor.eol = eol.into();
        }

        config.resolve()
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = pdf_tabify_cli_utils::init_logger();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        return interactive::run(&multi).await;
    };

    match command {
        Commands::Run(args) => {
            let report_path = args.report.clone();
            let config = args.into_config()?;
            run_batch(&config, &multi, report_path.as_deref()).await?;
        }
        Commands::Tabify { input, output } => {
            run_tabify(&input, output)?;
        }
        Commands::Segment => {
            let stdin = std::io::stdin().lock();
            let mut stdout = BufWriter::new(std::io::stdout().lock());
            pdf_tabify_pipeline::tabify_reader(stdin, &mut stdout)?;
            stdout.flush()?;
        }
    }

    Ok(())
}

/// Converts one existing text file. The output defaults to the input path
/// with a `.tsv` extension; writing over the input is refused.
fn run_tabify(input: &Path, output: Option<PathBuf>) -> Result<TabifyStats, PipelineError> {
    let output = output.unwrap_or_else(|| input.with_extension("tsv"));
    let stats = pdf_tabify_pipeline::tabify_file(input, &output)?;
    log::info!(
        "Wrote {} ({} lines, {} fields)",
        output.display(),
        stats.lines,
        stats.fields
    );
    Ok(stats)
}

/// Runs a batch with a progress bar, prints failures, and optionally
/// writes the JSON report.
///
/// # Errors
///
/// Returns an error if directory validation fails, the report cannot be
/// written, or every PDF failed.
async fn run_batch(
    config: &BatchConfig,
    multi: &MultiProgress,
    report_path: Option<&Path>,
) -> Result<BatchReport, Box<dyn std::error::Error>> {
    let progress = IndicatifProgress::files_bar(multi, "Scanning for PDFs...");
    let report = pdf_tabify_pipeline::run_batch(config, &progress).await?;

    for file in report.files.iter().filter(|f| !f.outcome.is_success()) {
        println!(
            "FAILED  {}  {}",
            file.pdf.display(),
            file.outcome.reason().unwrap_or_default()
        );
    }
    println!("{}", report.summary());

    if let Some(path) = report_path {
        std::fs::write(path, report.to_json()?)?;
        log::info!("Wrote report to {}", path.display());
    }

    if report.all_failed() {
        return Err(format!("all {} PDF(s) failed", report.files.len()).into());
    }

    Ok(report)
}
