use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("Theater name is empty after normalization: {0:?}")]
    EmptyTheater(String),
    #[error("Screening title must not be empty")]
    EmptyScreening,
    #[error("Malformed seat code: {0:?}")]
    MalformedSeat(String),
}

/// Normalized lookup key for a theater.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TheaterId(String);

impl TheaterId {
    /// Build a key from free-form user text ("PVR Theater", " inox ", ...).
    pub fn parse(raw: &str) -> Result<Self, IdentifierError> {
        let key = normalize(raw);
        if key.is_empty() {
            return Err(IdentifierError::EmptyTheater(raw.to_string()));
        }
        Ok(TheaterId(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TheaterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Turn user-entered theater text into a lookup key.
///
/// Rules, applied in order:
/// - trim surrounding whitespace
/// - lowercase
/// - remove every occurrence of `" theater"`
/// - replace each remaining space with `_`
/// - remove hyphens
/// - trim again, for whitespace a removed hyphen left at either end
///
/// The output is lowercase, trimmed and free of spaces and hyphens, so
/// normalizing a key again is a no-op.
pub fn normalize(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace(" theater", "")
        .replace(' ', "_")
        .replace('-', "")
        .trim()
        .to_string()
}

/// A movie title, unique within its theater.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScreeningId(String);

impl ScreeningId {
    pub fn new(title: impl Into<String>) -> Result<Self, IdentifierError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(IdentifierError::EmptyScreening);
        }
        Ok(ScreeningId(title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScreeningId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Row letters followed by a 1-based column number, e.g. `A1`, `C10`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatCode(String);

impl SeatCode {
    /// Parse a seat code. Surrounding whitespace is ignored and letters are
    /// uppercased, so `" a1"` and `"A1"` name the same seat.
    pub fn parse(raw: &str) -> Result<Self, IdentifierError> {
        let code = raw.trim().to_ascii_uppercase();
        let split = code
            .find(|c: char| !c.is_ascii_alphabetic())
            .ok_or_else(|| IdentifierError::MalformedSeat(raw.to_string()))?;
        let (row, column) = code.split_at(split);

        let column_ok = !column.is_empty()
            && column.chars().all(|c| c.is_ascii_digit())
            && !column.starts_with('0');
        if row.is_empty() || !column_ok {
            return Err(IdentifierError::MalformedSeat(raw.to_string()));
        }

        Ok(SeatCode(code))
    }

    pub(crate) fn from_parts(row: &str, column: u32) -> Self {
        SeatCode(format!("{}{}", row.to_ascii_uppercase(), column))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SeatCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-engine sequence number handed out on submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(u64);

impl RequestId {
    pub(crate) fn new(value: u64) -> Self {
        RequestId(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_matches_reference_inputs() {
        assert_eq!(normalize("PVR Theater"), "pvr");
        assert_eq!(normalize("  Inox  "), "inox");
        assert_eq!(normalize("Big Screen-Plex"), "big_screenplex");
        assert_eq!(normalize("Carnival Theater Annex"), "carnival_annex");
    }

    #[test]
    fn whitespace_exposed_by_hyphen_removal_is_trimmed() {
        assert_eq!(normalize("pvr\t-"), "pvr");
        assert_eq!(normalize("-\tinox"), "inox");
        assert_eq!(normalize(&normalize("pvr\t-")), normalize("pvr\t-"));
        assert!(TheaterId::parse("\t-").is_err());
    }

    #[test]
    fn seat_code_rejects_malformed_input() {
        for bad in ["", "A", "1", "A0", "A01", "A1B", "1A", "A-1"] {
            assert!(SeatCode::parse(bad).is_err(), "{bad:?} should be rejected");
        }
        assert_eq!(SeatCode::parse(" b12 ").unwrap().as_str(), "B12");
        assert_eq!(SeatCode::parse("AA3").unwrap().as_str(), "AA3");
    }
}
