//! CLI binary for webpage-binder.
//!
//! Maps flags onto `Options`, runs the pipeline over HTTP and writes the
//! combined document to disk. Warnings go to stderr.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;
use webpage_binder::fetch::HttpFetcher;
use webpage_binder::render::{CommandRenderer, Unconfigured};
use webpage_binder::{Format, Options, Pipeline};

const AFTER_HELP: &str = r#"EXAMPLES:
  # Two pages into one PDF (needs weasyprint on PATH)
  webbind https://example.com/a https://example.com/b

  # DOCX through a writer that reads block JSON on stdin
  webbind --format docx --docx-command "blocks2docx -" https://example.com/a

  # Inspect what happens to each page
  RUST_LOG=webpage_binder=debug webbind -o out.pdf https://example.com/a
"#;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Pdf,
    Docx,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Pdf => Format::Pdf,
            OutputFormat::Docx => Format::Docx,
        }
    }
}

/// Bind web pages into a single offline PDF or DOCX document.
#[derive(Parser, Debug)]
#[command(
    name = "webbind",
    version,
    about = "Bind web pages into a single offline PDF or DOCX document",
    arg_required_else_help = true,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Page URLs, in output order (at most 6).
    #[arg(required = true)]
    urls: Vec<String>,

    /// Output format.
    #[arg(short, long, env = "WEBBIND_FORMAT", value_enum, default_value = "pdf")]
    format: OutputFormat,

    /// Write the document here instead of combined_webpage.<format>.
    #[arg(short, long, env = "WEBBIND_OUTPUT")]
    output: Option<PathBuf>,

    /// PDF engine reading HTML on stdin and writing PDF to stdout.
    #[arg(long, env = "WEBBIND_PDF_COMMAND", default_value = "weasyprint - -")]
    pdf_command: String,

    /// Word-processor writer reading block JSON on stdin and writing DOCX to stdout.
    #[arg(long, env = "WEBBIND_DOCX_COMMAND")]
    docx_command: Option<String>,

    /// User-Agent header for every request.
    #[arg(long, env = "WEBBIND_USER_AGENT")]
    user_agent: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, env = "WEBBIND_TIMEOUT")]
    timeout: Option<u64>,

    /// Debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let options = Options {
        user_agent: cli.user_agent.clone(),
        timeout: cli.timeout.map(Duration::from_secs),
        ..Options::default()
    };

    let Some(pdf) = CommandRenderer::parse(&cli.pdf_command) else {
        bail!("--pdf-command is empty");
    };
    let docx = cli.docx_command.as_deref().and_then(CommandRenderer::parse);
    let format = Format::from(cli.format);
    if matches!(format, Format::Docx) && docx.is_none() {
        bail!("--format docx needs --docx-command");
    }

    let fetcher = HttpFetcher::new(&options).context("Failed to build HTTP client")?;
    let output = match &docx {
        Some(docx) => Pipeline::new(&fetcher, &pdf, docx, options).convert(&cli.urls, format),
        None => Pipeline::new(&fetcher, &pdf, &Unconfigured, options).convert(&cli.urls, format),
    };

    for warning in &output.warnings {
        eprintln!("warning: {warning}");
    }

    let document = output.result.context("Conversion failed")?;

    let path = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(document.file_name));
    fs::write(&path, &document.bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    eprintln!(
        "wrote {} ({} bytes, {})",
        path.display(),
        document.bytes.len(),
        document.mime_type
    );
    Ok(())
}
