//! Print document structure and the print flow.

mod common;

use archive_labels_core::document::READY_FRAME_LIMIT;
use archive_labels_core::{LabelConfig, PrintOutcome, build_print_document, generate, print_batch};
use common::{MemorySurface, count, ymd};

fn document_html(n: i64) -> String {
    let batch = generate(ymd(2025, 3, 5), count(n)).unwrap();
    build_print_document(&batch, &LabelConfig::default()).to_html()
}

#[test]
fn one_page_per_label_with_breaks_between() {
    for n in [1, 2, 3, 6, 99] {
        let html = document_html(n);
        assert_eq!(
            html.matches("<div class=\"barcode-label\"").count() as i64,
            n
        );
        assert_eq!(
            html.matches("page-break-after: always").count() as i64,
            n - 1
        );
    }
}

#[test]
fn each_page_targets_its_own_surface() {
    let batch = generate(ymd(2025, 3, 5), count(3)).unwrap();
    let doc = build_print_document(&batch, &LabelConfig::default());
    let html = doc.to_html();

    for (i, label) in doc.labels().iter().enumerate() {
        assert_eq!(label.target, format!("print-barcode-{i}"));
        assert_eq!(label.payload, batch.records()[i].identifier());
        let svg = format!(
            "<svg id=\"print-barcode-{i}\" data-payload=\"{}\"></svg>",
            label.payload
        );
        assert_eq!(html.matches(&svg).count(), 1, "missing {svg}");
        assert!(html.contains(&format!(
            "{{\"target\":\"print-barcode-{i}\",\"payload\":\"{}\"}}",
            label.payload
        )));
    }
}

#[test]
fn pages_carry_date_identifier_facility_and_expiry() {
    let html = document_html(2);
    assert_eq!(html.matches("<span>05/03/2025</span>").count(), 2);
    assert_eq!(html.matches("<span class=\"sample-id\">2503050").count(), 2);
    assert_eq!(html.matches("<span>Siloam Hospitals</span>").count(), 2);
    assert_eq!(html.matches("<span>Exp: 10/03/2025</span>").count(), 2);
}

#[test]
fn page_is_sized_for_label_stock() {
    let html = document_html(1);
    assert!(html.contains("@page { size: 4cm 3cm; margin: 0; }"));
}

#[test]
fn document_loads_its_own_renderer_and_prints_after_drawing() {
    let html = document_html(1);
    assert!(html.contains(
        "<script src=\"https://cdn.jsdelivr.net/npm/jsbarcode@3.11.5/dist/JsBarcode.all.min.js\"></script>"
    ));
    assert!(html.contains("\"format\":\"CODE128\""));
    assert!(html.contains("\"width\":1.2"));
    assert!(html.contains("\"displayValue\":false"));
    assert!(html.contains("window.addEventListener(\"load\", function () { printWhenReady(1); });"));
    assert!(html.contains("addEventListener(\"afterprint\", function () { window.close(); })"));
    assert!(!html.contains("setTimeout"));
}

#[test]
fn print_waits_for_every_symbol_to_be_drawn() {
    let html = document_html(2);
    assert_eq!(html.matches("window.print()").count(), 1);
    let gate = html.find("if (ready) {").unwrap();
    let print = html.find("window.print()").unwrap();
    let retry = html.find("printWhenReady(attempt + 1)").unwrap();
    assert!(gate < print && print < retry);
    assert!(html.contains(&format!("else if (attempt < {READY_FRAME_LIMIT})")));
    assert!(html.contains("document.body.setAttribute(\"data-symbols-ready\", String(ready));"));
}

#[test]
fn configured_title_and_options_are_used() {
    let cfg = LabelConfig::from_json(
        r#"{"document_title": "Box <labels>", "print_symbol": {"height": 40}}"#,
    )
    .unwrap();
    let batch = generate(ymd(2025, 3, 5), count(1)).unwrap();
    let html = build_print_document(&batch, &cfg).to_html();
    assert!(html.contains("<title>Box &lt;labels&gt;</title>"));
    assert!(html.contains("\"height\":40"));
}

#[test]
fn print_flow_writes_one_document() {
    let mut surface = MemorySurface::default();
    let batch = generate(ymd(2025, 3, 5), count(3)).unwrap();

    let outcome = print_batch(&mut surface, &batch, &LabelConfig::default());

    assert_eq!(
        outcome,
        PrintOutcome::Printed {
            location: "memory".into(),
            pages: 3
        }
    );
    let docs = surface.documents.borrow();
    assert_eq!(docs.len(), 1);
    assert!(docs[0].starts_with("<!DOCTYPE html>"));
}

#[test]
fn blocked_surface_skips_quietly() {
    let mut surface = MemorySurface {
        blocked: true,
        ..Default::default()
    };
    let batch = generate(ymd(2025, 3, 5), count(3)).unwrap();
    let before = batch.clone();

    let outcome = print_batch(&mut surface, &batch, &LabelConfig::default());

    assert!(!outcome.is_printed());
    assert!(matches!(outcome, PrintOutcome::Skipped { ref reason } if reason.contains("popup blocked")));
    assert!(surface.documents.borrow().is_empty());
    assert_eq!(batch, before);
}

#[test]
fn failed_write_skips_without_delivering() {
    let mut surface = MemorySurface {
        fail_write: true,
        ..Default::default()
    };
    let batch = generate(ymd(2025, 3, 5), count(1)).unwrap();
    let outcome = print_batch(&mut surface, &batch, &LabelConfig::default());
    assert!(matches!(outcome, PrintOutcome::Skipped { .. }));
    assert!(surface.documents.borrow().is_empty());
}
