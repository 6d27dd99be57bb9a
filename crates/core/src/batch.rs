//! Batch generator: archive date + count → ordered label records.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::LabelError;
use crate::codec::{compute_expiry, to_identifier_prefix};

/// Number of labels in one batch, validated to fit the `NN` suffix.
///
/// Construct with [`LabelCount::new`]; zero, negative and over-limit
/// requests are rejected rather than clamped, so a generated batch never
/// contains a wrapped or colliding sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct LabelCount(u8);

impl LabelCount {
    /// Highest count the two-digit sequence suffix can represent.
    pub const MAX: u8 = 99;

    /// Count used when the caller does not ask for one.
    pub const DEFAULT: LabelCount = LabelCount(3);

    /// Validate a requested count.
    pub fn new(requested: i64) -> Result<Self, LabelError> {
        if requested < 1 {
            return Err(LabelError::InvalidCount { requested });
        }
        if requested > i64::from(Self::MAX) {
            return Err(LabelError::SequenceOverflow {
                requested,
                max: Self::MAX,
            });
        }
        Ok(LabelCount(requested as u8))
    }

    /// The count as a plain integer.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for LabelCount {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i64> for LabelCount {
    type Error = LabelError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for LabelCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One physical label: identifier plus shared expiry date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelRecord {
    identifier: String,
    expiry_date: String,
}

impl LabelRecord {
    /// The eight-character `YYMMDDNN` identifier.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Expiry date as `dd/mm/yyyy`.
    pub fn expiry_date(&self) -> &str {
        &self.expiry_date
    }

    /// The two-digit sequence suffix.
    pub fn sequence(&self) -> &str {
        &self.identifier[crate::codec::PREFIX_LEN..]
    }
}

/// The ordered output of one generation action.
///
/// A batch is a value: renderers borrow it, and a new generation replaces
/// it wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedBatch {
    archive_date: NaiveDate,
    records: Vec<LabelRecord>,
}

impl GeneratedBatch {
    /// The archive date this batch was derived from.
    pub fn archive_date(&self) -> NaiveDate {
        self.archive_date
    }

    /// Records in sequence order.
    pub fn records(&self) -> &[LabelRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always `false` for a generated batch; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over records in sequence order.
    pub fn iter(&self) -> std::slice::Iter<'_, LabelRecord> {
        self.records.iter()
    }

    /// The expiry date shared by every record.
    pub fn expiry_date(&self) -> &str {
        self.records
            .first()
            .map(LabelRecord::expiry_date)
            .unwrap_or_default()
    }

    /// Every identifier in sequence order, joined with `, `.
    ///
    /// Shown as the barcode format once a batch exists; before that,
    /// [`identifier_sample`] gives the shortened hint.
    pub fn identifier_list(&self) -> String {
        self.records
            .iter()
            .map(LabelRecord::identifier)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl<'a> IntoIterator for &'a GeneratedBatch {
    type Item = &'a LabelRecord;
    type IntoIter = std::slice::Iter<'a, LabelRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Derive a batch of `count` labels for `archive_date`.
///
/// Pure and deterministic: the prefix and expiry are computed once and
/// identifiers run `prefix01`, `prefix02`, … in order.
pub fn generate(archive_date: NaiveDate, count: LabelCount) -> Result<GeneratedBatch, LabelError> {
    let prefix = to_identifier_prefix(archive_date);
    let expiry = compute_expiry(archive_date)?;

    let records = (1..=count.get())
        .map(|seq| LabelRecord {
            identifier: format!("{prefix}{seq:02}"),
            expiry_date: expiry.clone(),
        })
        .collect();

    tracing::debug!(%archive_date, count = count.get(), %prefix, "generated label batch");

    Ok(GeneratedBatch {
        archive_date,
        records,
    })
}

/// Short preview of the identifiers a request would produce.
///
/// Lists at most three identifiers and appends `...` when more follow,
/// e.g. `25030501, 25030502, 25030503, ...`.
pub fn identifier_sample(archive_date: NaiveDate, count: LabelCount) -> String {
    let prefix = to_identifier_prefix(archive_date);
    let mut parts: Vec<String> = (1..=count.get().min(3))
        .map(|seq| format!("{prefix}{seq:02}"))
        .collect();
    if count.get() > 3 {
        parts.push("...".to_string());
    }
    parts.join(", ")
}
