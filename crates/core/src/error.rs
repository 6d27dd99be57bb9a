//! Typed error types for label generation and rendering.

use std::io;

/// Failure conditions of the label core, categorized by stage.
///
/// Input errors (`InvalidCount`, `SequenceOverflow`, `DateOutOfRange`) are
/// meant to be rejected at the input boundary. Everything else has a defined
/// degraded behaviour; use [`LabelError::is_degradable()`] to tell them apart.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum LabelError {
    // -- Input --
    /// The requested label count is zero or negative.
    #[error("invalid label count {requested}: must be at least 1")]
    InvalidCount {
        /// The count that was asked for.
        requested: i64,
    },

    /// The requested label count does not fit the two-digit sequence suffix.
    #[error("label count {requested} exceeds the two-digit sequence limit of {max}")]
    SequenceOverflow {
        /// The count that was asked for.
        requested: i64,
        /// Highest count the sequence suffix can hold.
        max: u8,
    },

    /// Adding the expiry offset overflowed the supported calendar range.
    #[error("archive date {0} is outside the supported calendar range")]
    DateOutOfRange(chrono::NaiveDate),

    // -- Rendering --
    /// No symbology renderer is present at render time.
    #[error("symbology renderer unavailable: {reason}")]
    RenderUnavailable {
        /// Why the renderer could not be used.
        reason: String,
    },

    /// The renderer rejected a payload.
    #[error("could not render symbol for {payload:?}: {reason}")]
    Render {
        /// The payload that failed to encode.
        payload: String,
        /// Renderer-provided explanation.
        reason: String,
    },

    // -- Print surface --
    /// The isolated print context could not be opened or written.
    #[error("print surface unavailable: {reason}")]
    PrintSurfaceUnavailable {
        /// Human-readable context (usually the target location).
        reason: String,
        /// The underlying I/O error, when there is one.
        #[source]
        source: Option<io::Error>,
    },
}

impl LabelError {
    /// Returns `true` when the caller should degrade locally (blank symbol,
    /// skipped print) instead of surfacing a failure.
    pub fn is_degradable(&self) -> bool {
        matches!(
            self,
            LabelError::RenderUnavailable { .. }
                | LabelError::Render { .. }
                | LabelError::PrintSurfaceUnavailable { .. }
        )
    }
}
