//! Archive label core library.
//!
//! Derives deterministic batches of `YYMMDDNN` box identifiers from an
//! archive date, binds them to preview symbol surfaces, and assembles
//! isolated, page-per-label print documents. The main entry points are
//! [`generate`] for batches, [`PreviewPanel`] for the on-screen preview,
//! and [`print_batch`] / [`build_print_document`] for printing.

#![warn(missing_docs)]

/// Batch generation and count validation.
pub mod batch;
/// Archive date ⇄ identifier prefix and the expiry rule.
pub mod codec;
/// Presentation configuration.
pub mod config;
/// Print document assembly.
pub mod document;
mod error;
mod html;
/// Preview surface binding.
pub mod preview;
/// Print surface contract and print flow.
pub mod surface;
/// Symbology renderer contract.
pub mod symbology;

/// Facility name printed on every label.
pub const FACILITY_NAME: &str = "Siloam Hospitals";

// ── Convenience re-exports ──────────────────────────────────────────────────

pub use batch::{GeneratedBatch, LabelCount, LabelRecord, generate, identifier_sample};
pub use codec::{compute_expiry, format_display_date, parse_display_date, to_identifier_prefix};
pub use config::{ConfigError, LabelConfig};
pub use document::{PrintDocument, PrintLabel, build_print_document};
pub use error::LabelError;
pub use preview::{PreviewPanel, PreviewRenderer, RenderReport};
pub use surface::{PrintContext, PrintOutcome, PrintSurface, print_batch};
pub use symbology::{SymbolOptions, Symbology, SymbologyRenderer, Surface};
