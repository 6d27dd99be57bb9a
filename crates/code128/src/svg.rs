//! SVG drawing of an encoded symbol.

use std::fmt::Write as _;

use archive_labels_core::SymbolOptions;

use crate::encode::{EncodeError, encode};

/// Height reserved under the bars for the human-readable payload.
const TEXT_BAND: f64 = 14.0;

/// Draw `payload` as a standalone `<svg>` element with id `id`.
///
/// Geometry is in CSS pixels: each module is `options.module_width` wide,
/// bars are `options.height` tall, and `options.margin` surrounds the
/// symbol on every side.
pub fn render_svg(id: &str, payload: &str, options: &SymbolOptions) -> Result<String, EncodeError> {
    let encoded = encode(payload)?;
    let margin = f64::from(options.margin);
    let bar_height = f64::from(options.height);
    let text_band = if options.display_value { TEXT_BAND } else { 0.0 };

    let width = f64::from(encoded.module_count()) * options.module_width + 2.0 * margin;
    let height = bar_height + text_band + 2.0 * margin;

    let mut out = String::new();
    let _ = write!(
        out,
        r#"<svg id="{}" xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" data-payload="{}">"#,
        escape_attr(id),
        escape_attr(payload),
        w = num(width),
        h = num(height),
    );
    let _ = write!(
        out,
        r##"<rect x="0" y="0" width="{}" height="{}" fill="#ffffff"/>"##,
        num(width),
        num(height)
    );

    let mut modules = 0u32;
    for (i, w) in encoded.widths().enumerate() {
        if i % 2 == 0 {
            let x = margin + f64::from(modules) * options.module_width;
            let _ = write!(
                out,
                r##"<rect x="{}" y="{}" width="{}" height="{}" fill="#000000"/>"##,
                num(x),
                num(margin),
                num(f64::from(w) * options.module_width),
                num(bar_height),
            );
        }
        modules += u32::from(w);
    }

    if options.display_value {
        let _ = write!(
            out,
            r#"<text x="{}" y="{}" text-anchor="middle" font-family="monospace" font-size="12">{}</text>"#,
            num(width / 2.0),
            num(margin + bar_height + TEXT_BAND - 2.0),
            escape_attr(payload),
        );
    }

    out.push_str("</svg>");
    Ok(out)
}

/// Format a coordinate with at most three decimals and no trailing zeros.
fn num(value: f64) -> String {
    let text = format!("{value:.3}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn escape_attr(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
