//! Markup helpers shared by the preview page and the print document.

use serde::Serialize;

/// Escape text for use in HTML element content or a quoted attribute.
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Serialize `value` as a JavaScript literal safe to place inside `<script>`.
pub(crate) fn script_literal<T: Serialize + ?Sized>(value: &T) -> String {
    // JSON is a JS literal; `</` is the only sequence that can end the script early.
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/")
}
