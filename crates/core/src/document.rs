//! Print document assembler.
//!
//! Serializes a batch into a standalone HTML document: one 4cm × 3cm page
//! per label, embedded styling, and a script that loads its own copy of the
//! symbology renderer. The document runs in an isolated context, so the
//! batch is copied in as literal values and every symbol is drawn again
//! inside the document. Nothing rendered by the preview crosses over.
//!
//! The embedded script replaces a fixed wait with an explicit sequence:
//! `load` → draw every symbol → confirm every target holds a drawing →
//! `print()` on the next frame → `close()` on `afterprint`. While any target
//! is still blank the script redraws on the following frame, up to
//! [`READY_FRAME_LIMIT`] frames, and does not print at all if they never
//! fill.

use std::fmt::{self, Write as _};

use chrono::NaiveDate;
use serde::Serialize;

use crate::FACILITY_NAME;
use crate::batch::GeneratedBatch;
use crate::codec::format_display_date;
use crate::config::LabelConfig;
use crate::html::{escape, script_literal};
use crate::symbology::SymbolOptions;

/// Physical page width of one label.
pub const PAGE_WIDTH_CM: f32 = 4.0;
/// Physical page height of one label.
pub const PAGE_HEIGHT_CM: f32 = 3.0;

/// Animation frames the print script waits for every symbol to be drawn.
/// If they are still blank after that, `print()` is never called.
pub const READY_FRAME_LIMIT: u32 = 60;

/// Element id of the print surface for record `index` (0-based).
pub fn print_surface_id(index: usize) -> String {
    format!("print-barcode-{index}")
}

/// One page of the print document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrintLabel {
    /// Element id the in-document renderer draws into.
    pub target: String,
    /// Identifier encoded into the symbol and printed as text.
    pub payload: String,
    /// Expiry date as printed (`dd/mm/yyyy`).
    #[serde(skip)]
    pub expiry_date: String,
}

/// A self-contained print document for one batch.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintDocument {
    title: String,
    archive_date: String,
    renderer_script_url: String,
    options: SymbolOptions,
    labels: Vec<PrintLabel>,
}

impl PrintDocument {
    /// Pages in print order.
    pub fn labels(&self) -> &[PrintLabel] {
        &self.labels
    }

    /// Number of physical pages the document prints.
    pub fn page_count(&self) -> usize {
        self.labels.len()
    }

    /// Document title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Archive date as printed in each page corner (`dd/mm/yyyy`).
    pub fn archive_date(&self) -> &str {
        &self.archive_date
    }

    /// Render the complete HTML document.
    pub fn to_html(&self) -> String {
        let mut out = String::with_capacity(2048 + self.labels.len() * 640);
        let _ = write!(
            out,
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<script src=\"{}\"></script>\n<style>\n{}</style>\n</head>\n<body>\n",
            escape(&self.title),
            escape(&self.renderer_script_url),
            print_css(),
        );

        let last = self.labels.len().saturating_sub(1);
        for (index, label) in self.labels.iter().enumerate() {
            let page_break = if index < last {
                " style=\"page-break-after: always;\""
            } else {
                ""
            };
            let _ = write!(
                out,
                concat!(
                    "<div class=\"barcode-label\"{}>\n",
                    "  <div class=\"registration-date\"><span>{}</span></div>\n",
                    "  <div class=\"barcode-container\"><svg id=\"{}\" data-payload=\"{}\"></svg></div>\n",
                    "  <div class=\"sample-id-row\"><span class=\"sample-id\">{}</span></div>\n",
                    "  <div class=\"sample-info\">\n",
                    "    <div class=\"hospital-name\"><div class=\"print-logo\"></div><span>{}</span></div>\n",
                    "    <div class=\"expiry-details\"><span>Exp: {}</span></div>\n",
                    "  </div>\n",
                    "</div>\n",
                ),
                page_break,
                escape(&self.archive_date),
                escape(&label.target),
                escape(&label.payload),
                escape(&label.payload),
                escape(FACILITY_NAME),
                escape(&label.expiry_date),
            );
        }

        let _ = write!(
            out,
            "<script>\n{}</script>\n</body>\n</html>\n",
            self.script()
        );
        out
    }

    fn script(&self) -> String {
        format!(
            r#"(function () {{
  var labels = {labels};
  var options = {options};
  function drawAll() {{
    if (!window.JsBarcode) {{ return false; }}
    labels.forEach(function (label) {{
      var target = document.getElementById(label.target);
      if (target) {{ window.JsBarcode(target, label.payload, options); }}
    }});
    return labels.every(function (label) {{
      var target = document.getElementById(label.target);
      return target !== null && target.childNodes.length > 0;
    }});
  }}
  window.addEventListener("afterprint", function () {{ window.close(); }});
  function printWhenReady(attempt) {{
    var ready = drawAll();
    document.body.setAttribute("data-symbols-ready", String(ready));
    if (ready) {{
      window.requestAnimationFrame(function () {{ window.print(); }});
    }} else if (attempt < {max_frames}) {{
      window.requestAnimationFrame(function () {{ printWhenReady(attempt + 1); }});
    }}
  }}
  window.addEventListener("load", function () {{ printWhenReady(1); }});
}})();
"#,
            labels = script_literal(&self.labels),
            options = script_literal(&self.options),
            max_frames = READY_FRAME_LIMIT,
        )
    }
}

impl fmt::Display for PrintDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}

/// Assemble the print document for `batch`.
///
/// The archive date printed in each page corner is the batch's own archive
/// date, so the corner date and the identifier prefix cannot disagree.
pub fn build_print_document(batch: &GeneratedBatch, config: &LabelConfig) -> PrintDocument {
    let labels: Vec<PrintLabel> = batch
        .iter()
        .enumerate()
        .map(|(index, record)| PrintLabel {
            target: print_surface_id(index),
            payload: record.identifier().to_string(),
            expiry_date: record.expiry_date().to_string(),
        })
        .collect();

    tracing::debug!(pages = labels.len(), "assembled print document");

    PrintDocument {
        title: config.document_title.clone(),
        archive_date: corner_date(batch.archive_date()),
        renderer_script_url: config.renderer_script_url.clone(),
        options: config.print_symbol.clone(),
        labels,
    }
}

fn corner_date(date: NaiveDate) -> String {
    format_display_date(date)
}

fn print_css() -> String {
    format!(
        r#"@page {{ size: {w}cm {h}cm; margin: 0; }}
body {{ margin: 0; padding: 0; font-family: Arial, sans-serif; width: {w}cm; }}
.barcode-label {{ width: {w}cm; height: {h}cm; position: relative; display: flex; flex-direction: column; padding: 2mm; box-sizing: border-box; background: white; margin: 0; overflow: hidden; }}
.registration-date {{ position: absolute; top: 1mm; right: 1mm; font-size: 8px; font-weight: bold; }}
.barcode-container {{ flex: 1; display: flex; align-items: center; justify-content: center; margin: 0.5mm 0; }}
.barcode-container svg {{ max-width: 100%; max-height: 15mm; }}
.sample-id-row {{ text-align: center; margin: 1mm 0; }}
.sample-id {{ font-size: 18px; font-weight: bold; font-family: monospace; }}
.sample-info {{ text-align: center; font-size: 7px; margin-top: auto; }}
.hospital-name {{ font-weight: bold; margin-bottom: 0.5mm; font-size: 8px; display: flex; align-items: center; justify-content: center; gap: 1mm; }}
.print-logo {{ position: relative; width: 2mm; height: 2mm; }}
.print-logo::before, .print-logo::after {{ content: ""; position: absolute; background: #000; }}
.print-logo::before {{ left: 0.7mm; top: 0; width: 0.6mm; height: 2mm; }}
.print-logo::after {{ left: 0; top: 0.7mm; width: 2mm; height: 0.6mm; }}
.expiry-details {{ font-size: 7px; color: #666; }}
"#,
        w = PAGE_WIDTH_CM,
        h = PAGE_HEIGHT_CM,
    )
}
