//! Contract with the external symbology renderer.
//!
//! The core never draws bars itself. It hands a payload and a
//! [`SymbolOptions`] to whatever [`SymbologyRenderer`] the host provides,
//! targeting an addressable [`Surface`].

use serde::{Deserialize, Serialize};

use crate::LabelError;

/// Linear symbologies the renderer may be asked for.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbology {
    /// CODE128 (ISO/IEC 15417).
    #[default]
    #[serde(rename = "CODE128")]
    Code128,
}

impl Symbology {
    /// Format identifier as renderers spell it.
    pub fn as_str(self) -> &'static str {
        match self {
            Symbology::Code128 => "CODE128",
        }
    }
}

/// Rendering parameters passed with every payload.
///
/// Serialized field names match the option object of browser-side
/// renderers (`format`, `width`, `height`, `displayValue`, `margin`) so
/// the same value can be embedded verbatim in a print document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolOptions {
    /// Encoding format.
    pub format: Symbology,
    /// Width of the narrowest bar, in CSS pixels.
    #[serde(rename = "width")]
    pub module_width: f64,
    /// Bar height, in CSS pixels.
    pub height: u32,
    /// Whether to print the payload as text under the bars.
    #[serde(rename = "displayValue")]
    pub display_value: bool,
    /// Quiet margin around the symbol, in CSS pixels.
    pub margin: u32,
}

impl SymbolOptions {
    /// Parameters for on-screen preview surfaces.
    pub fn preview() -> Self {
        Self {
            format: Symbology::Code128,
            module_width: 1.0,
            height: 30,
            display_value: false,
            margin: 0,
        }
    }

    /// Parameters for the printed 4cm × 3cm label.
    pub fn print() -> Self {
        Self {
            module_width: 1.2,
            ..Self::preview()
        }
    }
}

impl Default for SymbolOptions {
    fn default() -> Self {
        Self::preview()
    }
}

/// An addressable drawing target for one encoded symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    id: String,
    markup: Option<String>,
}

impl Surface {
    /// A blank surface addressed by `id`.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            markup: None,
        }
    }

    /// The surface address (used as the element id in emitted markup).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Drawn markup, if a renderer has drawn on this surface.
    pub fn markup(&self) -> Option<&str> {
        self.markup.as_deref()
    }

    /// Whether a symbol has been drawn.
    pub fn is_drawn(&self) -> bool {
        self.markup.is_some()
    }

    /// Replace the surface contents. Called by renderers.
    pub fn draw(&mut self, markup: String) {
        self.markup = Some(markup);
    }

    /// Blank the surface.
    pub fn clear(&mut self) {
        self.markup = None;
    }
}

/// Draws an encoded symbol for a payload onto a surface.
pub trait SymbologyRenderer {
    /// Render `payload` onto `target` using `options`.
    ///
    /// On error the target must be left blank.
    fn render(
        &self,
        target: &mut Surface,
        payload: &str,
        options: &SymbolOptions,
    ) -> Result<(), LabelError>;
}
