//! CODE128 symbology renderer for archive labels.
//!
//! Encodes payloads with code sets B and C and draws them as SVG onto a
//! core [`Surface`](archive_labels_core::Surface). Plug [`Code128Renderer`]
//! into anything that takes a [`SymbologyRenderer`].

mod encode;
mod patterns;
mod svg;

pub use encode::{EncodeError, Encoded, encode};
pub use svg::render_svg;

use archive_labels_core::{LabelError, SymbolOptions, Surface, Symbology, SymbologyRenderer};

/// Draws CODE128 symbols as inline SVG.
#[derive(Debug, Clone, Copy, Default)]
pub struct Code128Renderer;

impl SymbologyRenderer for Code128Renderer {
    fn render(
        &self,
        target: &mut Surface,
        payload: &str,
        options: &SymbolOptions,
    ) -> Result<(), LabelError> {
        if options.format != Symbology::Code128 {
            return Err(LabelError::Render {
                payload: payload.to_string(),
                reason: format!("unsupported format {}", options.format.as_str()),
            });
        }
        let svg = render_svg(target.id(), payload, options).map_err(|e| LabelError::Render {
            payload: payload.to_string(),
            reason: e.to_string(),
        })?;
        target.draw(svg);
        Ok(())
    }
}
