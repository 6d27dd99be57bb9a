//! Print surface contract and the one-shot print flow.

use crate::LabelError;
use crate::batch::GeneratedBatch;
use crate::config::LabelConfig;
use crate::document::build_print_document;

/// Something that can open an isolated print context.
pub trait PrintSurface {
    /// The context type handed out by [`PrintSurface::open`].
    type Context: PrintContext;

    /// Open a fresh, isolated context for a document titled `title`.
    fn open(&mut self, title: &str) -> Result<Self::Context, LabelError>;
}

/// An open, isolated rendering context that receives one document.
pub trait PrintContext {
    /// Write the complete document into the context.
    fn write_document(&mut self, html: &str) -> Result<(), LabelError>;

    /// Hand the document over for physical output and dispose of the
    /// context. Returns a description of where the document went.
    fn close(self) -> Result<String, LabelError>;
}

/// Result of a print request. Printing never fails loudly.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintOutcome {
    /// The document was handed to the print context.
    Printed {
        /// Where the document went (path, stream name, ...).
        location: String,
        /// Physical pages in the document.
        pages: usize,
    },
    /// The print context was unavailable; nothing was printed.
    Skipped {
        /// Why printing did not happen.
        reason: String,
    },
}

impl PrintOutcome {
    /// Whether the document reached the print context.
    pub fn is_printed(&self) -> bool {
        matches!(self, PrintOutcome::Printed { .. })
    }
}

/// Assemble the print document for `batch` and hand it to `surface`.
///
/// Fire-and-forget: no retry, and any surface failure is logged and
/// reported as [`PrintOutcome::Skipped`] instead of an error. The batch is
/// only read.
pub fn print_batch<S: PrintSurface>(
    surface: &mut S,
    batch: &GeneratedBatch,
    config: &LabelConfig,
) -> PrintOutcome {
    let document = build_print_document(batch, config);
    let pages = document.page_count();

    let result = surface.open(document.title()).and_then(|mut ctx| {
        ctx.write_document(&document.to_html())?;
        ctx.close()
    });

    match result {
        Ok(location) => {
            tracing::debug!(%location, pages, "print document delivered");
            PrintOutcome::Printed { location, pages }
        }
        Err(e) => {
            tracing::warn!(error = %e, "print skipped");
            PrintOutcome::Skipped {
                reason: e.to_string(),
            }
        }
    }
}
