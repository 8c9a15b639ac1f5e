//! Browser native-messaging host: converts one `.nbib` record per launch.
//!
//! The browser starts the host with the caller's origin as argument, writes one
//! framed request to stdin and reads one framed response from stdout. The payload
//! files are written to `--output-dir`, and everything the host does is logged to a
//! file that is truncated on every launch.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use nbib_endnote::host;
use nbib_endnote::{
    AuthorPolicy, AuthorStyle, ConvertOptions, DirectorySink, TextEncoding, TracingDiagnostics,
};
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_FILE_NAME: &str = "nbib-endnote-host.log";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory receiving citation.rtf and citation.txt [default: next to the executable]
    #[arg(long, env = "NBIB_ENDNOTE_OUTPUT_DIR", value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Log file, truncated on every launch [default: next to the executable]
    #[arg(long, env = "NBIB_ENDNOTE_LOG_FILE", value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Encoding of the RTF payload (windows-1252 or us-ascii)
    #[arg(long, default_value = "windows-1252")]
    encoding: TextEncoding,

    /// Write authors as "Last, F. M." instead of the full name
    #[arg(long)]
    initials: bool,

    /// Keep AU names that do not abbreviate the preceding FAU name
    #[arg(long)]
    abbreviated_authors: bool,

    /// Arguments supplied by the browser (caller origin, parent window); ignored
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    browser_args: Vec<String>,
}

impl Cli {
    fn options(&self) -> ConvertOptions {
        let mut options = ConvertOptions::new();
        options.set_encoding(self.encoding);
        if self.initials {
            options.set_author_style(AuthorStyle::Initials);
        }
        if self.abbreviated_authors {
            options.set_author_policy(AuthorPolicy::AbbreviatedFallback);
        }
        options
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nbib_endnote=info,nbib_endnote_host=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let exe = std::env::current_exe().context("Failed to locate the host executable")?;
    let exe_dir = exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let log_file = cli
        .log_file
        .clone()
        .unwrap_or_else(|| exe_dir.join(LOG_FILE_NAME));
    init_logging(&log_file)?;

    info!("Host started");
    if !cli.browser_args.is_empty() {
        info!("Browser arguments: {:?}", cli.browser_args);
    }

    let options = cli.options();
    let mut sink = DirectorySink::new(cli.output_dir.clone().unwrap_or(exe_dir));
    let mut diagnostics = TracingDiagnostics::new();

    let result = host::run_once(
        &mut std::io::stdin().lock(),
        &mut std::io::stdout().lock(),
        &mut sink,
        &options,
        &mut diagnostics,
    );
    if let Err(e) = &result {
        error!("Host pipe failed: {e}");
    }
    info!(
        "Host shutting down ({} diagnostic(s) reported)",
        diagnostics.reported()
    );
    result.context("Native messaging exchange failed")?;
    Ok(())
}
