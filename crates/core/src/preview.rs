//! Preview renderer: binds each record of the current batch to an
//! on-screen symbol surface.
//!
//! Surfaces are mounted before any rendering happens. [`PreviewPanel`]
//! mounts a fresh surface per record on every batch swap and only then
//! calls the renderer, so the renderer never targets a surface that does
//! not exist yet.

use std::fmt::Write as _;

use crate::batch::{GeneratedBatch, LabelRecord};
use crate::codec::EXPIRY_OFFSET_DAYS;
use crate::html::escape;
use crate::symbology::{SymbolOptions, Surface, SymbologyRenderer};
use crate::{FACILITY_NAME, LabelError};

/// Element id of the preview surface for record `index` (0-based).
pub fn preview_surface_id(index: usize) -> String {
    format!("preview-barcode-{index}")
}

/// Outcome counts of one render pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderReport {
    /// Surfaces that now show a symbol.
    pub drawn: usize,
    /// Records left blank because no surface or no renderer was available.
    pub skipped: usize,
    /// Records whose payload the renderer rejected.
    pub failed: usize,
}

/// Draws batch identifiers onto preview surfaces with fixed options.
#[derive(Debug, Clone)]
pub struct PreviewRenderer {
    options: SymbolOptions,
}

impl PreviewRenderer {
    /// A renderer that uses `options` for every symbol.
    pub fn new(options: SymbolOptions) -> Self {
        Self { options }
    }

    /// Options passed to the symbology renderer.
    pub fn options(&self) -> &SymbolOptions {
        &self.options
    }

    /// Render `batch[i]` onto `surfaces[i]` for every record.
    ///
    /// Missing slots (`None` or past the end of `surfaces`) are skipped.
    /// With no symbology renderer every record is skipped and surfaces stay
    /// blank; identifiers remain readable as text in the preview.
    pub fn render(
        &self,
        batch: &GeneratedBatch,
        surfaces: &mut [Option<Surface>],
        symbols: Option<&dyn SymbologyRenderer>,
    ) -> RenderReport {
        let mut report = RenderReport::default();

        let Some(symbols) = symbols else {
            let err = LabelError::RenderUnavailable {
                reason: "no renderer attached to the preview".into(),
            };
            tracing::warn!(labels = batch.len(), error = %err, "preview symbols left blank");
            report.skipped = batch.len();
            return report;
        };

        for (index, record) in batch.iter().enumerate() {
            let Some(Some(surface)) = surfaces.get_mut(index) else {
                tracing::debug!(index, "preview surface not mounted; skipping");
                report.skipped += 1;
                continue;
            };
            match symbols.render(surface, record.identifier(), &self.options) {
                Ok(()) => report.drawn += 1,
                Err(e) => {
                    surface.clear();
                    tracing::warn!(identifier = record.identifier(), error = %e, "preview symbol not rendered");
                    report.failed += 1;
                }
            }
        }

        report
    }
}

/// The live preview: the current batch plus its mounted surfaces.
#[derive(Debug, Clone)]
pub struct PreviewPanel {
    renderer: PreviewRenderer,
    batch: Option<GeneratedBatch>,
    surfaces: Vec<Option<Surface>>,
}

impl PreviewPanel {
    /// An empty panel. Nothing is printable until a batch is shown.
    pub fn new(options: SymbolOptions) -> Self {
        Self {
            renderer: PreviewRenderer::new(options),
            batch: None,
            surfaces: Vec::new(),
        }
    }

    /// Swap in `batch`, discarding every previous surface, and render it.
    pub fn replace_batch(
        &mut self,
        batch: GeneratedBatch,
        symbols: Option<&dyn SymbologyRenderer>,
    ) -> RenderReport {
        self.surfaces = (0..batch.len())
            .map(|i| Some(Surface::new(preview_surface_id(i))))
            .collect();
        self.batch = Some(batch);
        self.render(symbols)
    }

    /// Re-render the current batch onto its surfaces. No-op without a batch.
    pub fn render(&mut self, symbols: Option<&dyn SymbologyRenderer>) -> RenderReport {
        match &self.batch {
            Some(batch) => self.renderer.render(batch, &mut self.surfaces, symbols),
            None => RenderReport::default(),
        }
    }

    /// The batch currently shown, if any.
    pub fn batch(&self) -> Option<&GeneratedBatch> {
        self.batch.as_ref()
    }

    /// Whether printing is possible (at least one generation happened).
    pub fn is_ready_to_print(&self) -> bool {
        self.batch.is_some()
    }

    /// Records paired with their surfaces, in batch order.
    pub fn cards(&self) -> impl Iterator<Item = (&LabelRecord, Option<&Surface>)> {
        self.batch
            .iter()
            .flat_map(GeneratedBatch::iter)
            .enumerate()
            .map(move |(i, record)| (record, self.surfaces.get(i).and_then(Option::as_ref)))
    }

    /// Render the panel as a standalone HTML preview page.
    pub fn to_html(&self, title: &str) -> String {
        let mut out = String::new();
        let _ = write!(
            out,
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{PREVIEW_CSS}</style>\n</head>\n<body>\n",
            escape(title)
        );

        if let Some(batch) = &self.batch {
            let _ = writeln!(
                out,
                "<header><h1>Generated Labels</h1><p>Barcode format: {}</p><p>Expiry date: {} ({} days after archive date)</p><p>Facility: {}</p></header>",
                escape(&batch.identifier_list()),
                escape(batch.expiry_date()),
                EXPIRY_OFFSET_DAYS,
                escape(FACILITY_NAME),
            );
        }

        out.push_str("<main class=\"grid\">\n");
        for (index, (record, surface)) in self.cards().enumerate() {
            let id = preview_surface_id(index);
            let symbol = surface
                .and_then(Surface::markup)
                .map(str::to_string)
                .unwrap_or_else(|| format!("<svg id=\"{id}\"></svg>"));
            let _ = writeln!(
                out,
                "<div class=\"label-item\">\n  <span class=\"badge\">{}</span>\n  <div class=\"barcode-container\" data-surface=\"{id}\">{symbol}</div>\n  <span class=\"identifier\">{}</span>\n  <p class=\"facility\">{}</p>\n  <p class=\"expiry\">Exp: {}</p>\n</div>",
                index + 1,
                escape(record.identifier()),
                escape(FACILITY_NAME),
                escape(record.expiry_date()),
            );
        }
        out.push_str("</main>\n</body>\n</html>\n");
        out
    }
}

const PREVIEW_CSS: &str = "body{font-family:Arial,sans-serif;background:#f3f4f6;margin:2rem}\
.grid{display:grid;grid-template-columns:repeat(2,8cm);gap:1rem}\
.label-item{position:relative;background:#fff;border:2px solid #d1d5db;border-radius:8px;padding:0.5rem;text-align:center}\
.badge{position:absolute;top:-0.5rem;left:-0.5rem;background:#2563eb;color:#fff;border-radius:50%;width:1.25rem;height:1.25rem;font-size:0.75rem;line-height:1.25rem}\
.barcode-container svg{width:100%;height:2rem}\
.identifier{font-family:monospace;font-size:0.75rem;color:#374151}\
.facility{font-weight:600;font-size:0.75rem;margin:0.25rem 0}\
.expiry{color:#4b5563;font-size:0.75rem;margin:0}";
