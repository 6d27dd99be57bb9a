//! Output formatting for the CLI.
//!
//! Human-facing text goes to stderr (status) and stdout (results) in
//! `pretty` mode; `json` mode writes one JSON document to stdout.

use std::io::{self, IsTerminal};

use archive_labels_core::{LabelError, RenderReport};
use ariadne::{Color, Fmt};

// ── Output format ───────────────────────────────────────────────────────

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Coloured, human-readable output.
    Pretty,
    /// Machine-readable JSON.
    Json,
}

impl Format {
    /// Use the explicit choice, or detect: pretty for terminals, JSON for pipes.
    pub(crate) fn resolve_or_detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            Some("pretty") => Format::Pretty,
            _ => {
                if io::stdout().is_terminal() {
                    Format::Pretty
                } else {
                    Format::Json
                }
            }
        }
    }
}

// ── JSON ────────────────────────────────────────────────────────────────

/// Print a JSON value to stdout.
pub(crate) fn print_json(value: &serde_json::Value) {
    let json = serde_json::to_string_pretty(value).expect("JSON value serialization cannot fail");
    println!("{json}");
}

// ── Errors ──────────────────────────────────────────────────────────────

/// Whether `err` is an input rejection (bad count or date) rather than a
/// failure while carrying out the command.
pub(crate) fn is_input_error(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<LabelError>(),
        Some(
            LabelError::InvalidCount { .. }
                | LabelError::SequenceOverflow { .. }
                | LabelError::DateOutOfRange(_)
        )
    )
}

/// Report a command failure in the requested format.
///
/// JSON mode emits `{"success": false, "error": <kind>, "message": ...}`
/// on stdout; pretty mode writes `error: ...` to stderr.
pub(crate) fn report_error(err: &anyhow::Error, format: Format) {
    let kind = if is_input_error(err) {
        "invalid_input"
    } else {
        "command_failed"
    };
    match format {
        Format::Json => print_json(&serde_json::json!({
            "success": false,
            "error": kind,
            "message": format!("{err:#}"),
        })),
        Format::Pretty => {
            eprintln!("{}: {err:#}", "error".fg(Color::Red));
        }
    }
}

// ── Summary line ────────────────────────────────────────────────────────

/// Print a coloured summary of a preview render pass to stderr.
///
/// Example: `3 drawn, 1 blank`
pub(crate) fn print_render_summary(report: &RenderReport) {
    let mut parts = Vec::new();
    if report.drawn > 0 {
        parts.push(format!(
            "{}",
            format!("{} drawn", report.drawn).fg(Color::Green)
        ));
    }
    if report.skipped > 0 {
        parts.push(format!(
            "{}",
            format!("{} blank", report.skipped).fg(Color::Yellow)
        ));
    }
    if report.failed > 0 {
        let s = if report.failed == 1 { "" } else { "s" };
        parts.push(format!(
            "{}",
            format!("{} failed symbol{s}", report.failed).fg(Color::Red)
        ));
    }
    if !parts.is_empty() {
        eprintln!("{}", parts.join(", "));
    }
}
