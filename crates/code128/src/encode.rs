//! Payload → CODE128 symbol values.

use crate::patterns::PATTERNS;

const SHIFT_TO_B: u8 = 100;
const START_B: u8 = 104;
const START_C: u8 = 105;
const STOP: u8 = 106;

/// Reasons a payload cannot be encoded.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// Nothing to encode.
    #[error("payload is empty")]
    Empty,

    /// A character outside printable ASCII (code set B) was found.
    #[error("unsupported character {ch:?} at position {position}")]
    UnsupportedChar {
        /// The offending character.
        ch: char,
        /// Zero-based character index in the payload.
        position: usize,
    },
}

/// A fully encoded symbol: start code, data, check symbol, stop code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    values: Vec<u8>,
}

impl Encoded {
    /// Every symbol value in order, start and stop included.
    pub fn values(&self) -> &[u8] {
        &self.values
    }

    /// The modulo-103 check symbol.
    pub fn check_value(&self) -> u8 {
        self.values[self.values.len() - 2]
    }

    /// Bar/space widths in modules, alternating and starting with a bar.
    pub fn widths(&self) -> impl Iterator<Item = u8> + '_ {
        self.values
            .iter()
            .flat_map(|&v| PATTERNS[usize::from(v)].iter().copied())
    }

    /// Total symbol width in modules, excluding quiet zones.
    pub fn module_count(&self) -> u32 {
        self.widths().map(u32::from).sum()
    }
}

/// Encode `payload` as CODE128.
///
/// All-digit payloads use code set C (two digits per symbol); an odd
/// trailing digit switches to code set B. Anything else uses code set B
/// and must be printable ASCII.
pub fn encode(payload: &str) -> Result<Encoded, EncodeError> {
    if payload.is_empty() {
        return Err(EncodeError::Empty);
    }
    if let Some((position, ch)) = payload
        .chars()
        .enumerate()
        .find(|(_, c)| !(' '..='~').contains(c))
    {
        return Err(EncodeError::UnsupportedChar { ch, position });
    }

    let bytes = payload.as_bytes();
    let mut values = Vec::with_capacity(bytes.len() + 3);

    if bytes.len() >= 2 && bytes.iter().all(u8::is_ascii_digit) {
        values.push(START_C);
        let mut pairs = bytes.chunks_exact(2);
        for pair in pairs.by_ref() {
            values.push((pair[0] - b'0') * 10 + (pair[1] - b'0'));
        }
        if let [last] = pairs.remainder() {
            values.push(SHIFT_TO_B);
            values.push(last - b' ');
        }
    } else {
        values.push(START_B);
        values.extend(bytes.iter().map(|b| b - b' '));
    }

    let weighted: u32 = values
        .iter()
        .enumerate()
        .map(|(i, &v)| u32::from(v) * (i.max(1) as u32))
        .sum();
    values.push((weighted % 103) as u8);
    values.push(STOP);

    Ok(Encoded { values })
}
