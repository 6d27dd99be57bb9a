//! `archive-labels`: generate, preview and print archive box labels.

mod render;
mod surface;

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use archive_labels_code128::Code128Renderer;
use archive_labels_core::codec::EXPIRY_OFFSET_DAYS;
use archive_labels_core::{
    FACILITY_NAME, GeneratedBatch, LabelConfig, LabelCount, PreviewPanel, PrintOutcome,
    SymbologyRenderer, format_display_date, generate, print_batch,
};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::render::{Format, print_json, print_render_summary, report_error};
use crate::surface::{DirectorySurface, StdoutSurface};

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "archive-labels",
    version,
    about = "Archive box labels: generate sequential identifiers, preview CODE128 symbols, and build print-ready 4cm x 3cm label documents"
)]
struct Cli {
    /// Output mode: "pretty" for coloured terminal output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    /// Path to a JSON label config (symbol options, renderer script, title).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug events to stderr (overrides RUST_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Cmd,
}

/// Inputs shared by every command that derives a batch.
#[derive(Args, Debug)]
struct BatchArgs {
    /// Archive date (YYYY-MM-DD). Defaults to today's local date.
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Number of sequential labels (1-99).
    #[arg(long, short = 'n', default_value_t = 3, allow_negative_numbers = true)]
    count: i64,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Derive a batch of identifiers and show it.
    Generate {
        #[command(flatten)]
        batch: BatchArgs,
    },

    /// Render the on-screen preview of a batch.
    Preview {
        #[command(flatten)]
        batch: BatchArgs,
        /// Write the preview page (inline SVG symbols) to this path.
        #[arg(long)]
        html: Option<PathBuf>,
        /// Render without a symbology renderer (identifiers as text only).
        #[arg(long)]
        no_symbols: bool,
    },

    /// Assemble the print document for a batch.
    Print {
        #[command(flatten)]
        batch: BatchArgs,
        /// Directory to write `archive-labels-<YYMMDD>.html` into.
        #[arg(long, conflicts_with = "stdout", required_unless_present = "stdout")]
        out_dir: Option<PathBuf>,
        /// Write the document to stdout instead of a file.
        #[arg(long)]
        stdout: bool,
    },
}

impl BatchArgs {
    /// Validate inputs at the boundary and derive the batch.
    fn generate(&self) -> Result<GeneratedBatch> {
        let count = LabelCount::new(self.count)?;
        let date = self
            .date
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        Ok(generate(date, count)?)
    }
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let format = Format::resolve_or_detect(cli.output.as_deref());

    if let Err(err) = run(cli, format) {
        report_error(&err, format);
        process::exit(if render::is_input_error(&err) { 2 } else { 1 });
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli, format: Format) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.cmd {
        Cmd::Generate { batch } => cmd_generate(&batch, format),
        Cmd::Preview {
            batch,
            html,
            no_symbols,
        } => cmd_preview(&batch, html.as_deref(), no_symbols, &config, format),
        Cmd::Print {
            batch,
            out_dir,
            stdout,
        } => cmd_print(&batch, out_dir, stdout, &config, format),
    }
}

fn load_config(path: Option<&Path>) -> Result<LabelConfig> {
    let Some(path) = path else {
        return Ok(LabelConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file '{}'", path.display()))?;
    LabelConfig::from_json(&text)
        .with_context(|| format!("failed to load config file '{}'", path.display()))
}

// ── Commands ────────────────────────────────────────────────────────────

fn cmd_generate(args: &BatchArgs, format: Format) -> Result<()> {
    let batch = args.generate()?;

    match format {
        Format::Json => print_json(&serde_json::json!({
            "archive_date": batch.archive_date().to_string(),
            "expiry_date": batch.expiry_date(),
            "facility": FACILITY_NAME,
            "count": batch.len(),
            "labels": batch.records(),
        })),
        Format::Pretty => {
            print_batch_header(&batch);
            for (i, record) in batch.iter().enumerate() {
                println!(
                    "{:>3}. {}  Exp: {}",
                    i + 1,
                    record.identifier(),
                    record.expiry_date()
                );
            }
        }
    }
    Ok(())
}

/// One preview card in JSON output.
#[derive(Serialize)]
struct CardView<'a> {
    identifier: &'a str,
    expiry_date: &'a str,
    surface: Option<&'a str>,
    symbol_drawn: bool,
}

fn cmd_preview(
    args: &BatchArgs,
    html: Option<&Path>,
    no_symbols: bool,
    config: &LabelConfig,
    format: Format,
) -> Result<()> {
    let batch = args.generate()?;
    let symbols: Option<&dyn SymbologyRenderer> = if no_symbols {
        None
    } else {
        Some(&Code128Renderer)
    };

    let mut panel = PreviewPanel::new(config.preview_symbol.clone());
    let report = panel.replace_batch(batch, symbols);

    if let Some(path) = html {
        fs::write(path, panel.to_html(&config.document_title))
            .with_context(|| format!("failed to write preview '{}'", path.display()))?;
    }

    match format {
        Format::Json => {
            let cards: Vec<CardView<'_>> = panel
                .cards()
                .map(|(record, surface)| CardView {
                    identifier: record.identifier(),
                    expiry_date: record.expiry_date(),
                    surface: surface.map(|s| s.id()),
                    symbol_drawn: surface.is_some_and(|s| s.is_drawn()),
                })
                .collect();
            print_json(&serde_json::json!({
                "labels": cards,
                "report": {
                    "drawn": report.drawn,
                    "skipped": report.skipped,
                    "failed": report.failed,
                },
                "html": html.map(|p| p.display().to_string()),
                "ready_to_print": panel.is_ready_to_print(),
            }));
        }
        Format::Pretty => {
            if let Some(batch) = panel.batch() {
                print_batch_header(batch);
            }
            for (i, (record, surface)) in panel.cards().enumerate() {
                let symbol = if surface.is_some_and(|s| s.is_drawn()) {
                    "symbol ready"
                } else {
                    "symbol blank"
                };
                println!(
                    "[{}] {}  {}  Exp: {}  ({symbol})",
                    i + 1,
                    record.identifier(),
                    FACILITY_NAME,
                    record.expiry_date()
                );
            }
            print_render_summary(&report);
            if let Some(path) = html {
                eprintln!("preview written: {}", path.display());
            }
        }
    }
    Ok(())
}

fn cmd_print(
    args: &BatchArgs,
    out_dir: Option<PathBuf>,
    to_stdout: bool,
    config: &LabelConfig,
    format: Format,
) -> Result<()> {
    let batch = args.generate()?;

    let outcome = match out_dir {
        Some(dir) if !to_stdout => {
            let mut surface = DirectorySurface::for_batch(dir, &batch);
            print_batch(&mut surface, &batch, config)
        }
        _ => {
            let outcome = print_batch(&mut StdoutSurface, &batch, config);
            // stdout carries the document itself; keep status off it.
            if let PrintOutcome::Skipped { reason } = &outcome {
                eprintln!("warning: print skipped: {reason}");
            }
            return Ok(());
        }
    };

    match (&outcome, format) {
        (PrintOutcome::Printed { location, pages }, Format::Json) => {
            print_json(&serde_json::json!({
                "status": "printed",
                "pages": pages,
                "location": location,
            }));
        }
        (PrintOutcome::Skipped { reason }, Format::Json) => {
            print_json(&serde_json::json!({
                "status": "skipped",
                "reason": reason,
            }));
        }
        (PrintOutcome::Printed { location, pages }, Format::Pretty) => {
            eprintln!("wrote {pages} label page(s): {location}");
        }
        (PrintOutcome::Skipped { reason }, Format::Pretty) => {
            eprintln!("warning: print skipped: {reason}");
        }
        (_, _) => {}
    }
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn print_batch_header(batch: &GeneratedBatch) {
    println!(
        "archive date: {}",
        format_display_date(batch.archive_date())
    );
    println!("barcode format: {}", batch.identifier_list());
    println!(
        "expiry date: {} ({EXPIRY_OFFSET_DAYS} days after archive date)",
        batch.expiry_date()
    );
    println!("facility: {FACILITY_NAME}");
}
