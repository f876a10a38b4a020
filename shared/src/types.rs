//! Common types used across the platform

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A staff-editable quantity field.
///
/// The POS wire format carries these as strings, with the empty string
/// meaning "not entered yet". An empty field is not a zero count, so the
/// distinction survives into the domain model. `parse` is the single gate
/// every edit goes through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QtyEntry {
    #[default]
    Empty,
    Value(i32),
}

impl QtyEntry {
    /// Parse raw field input: empty string or ASCII digits only.
    ///
    /// Returns `None` for anything else (including digit strings that do
    /// not fit `i32`); the caller ignores the edit. Leading zeros
    /// normalize, so `"007"` becomes `Value(7)`.
    pub fn parse(input: &str) -> Option<QtyEntry> {
        if input.is_empty() {
            return Some(QtyEntry::Empty);
        }
        if !input.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        input.parse::<i32>().ok().map(QtyEntry::Value)
    }

    pub fn value(self) -> Option<i32> {
        match self {
            QtyEntry::Empty => None,
            QtyEntry::Value(n) => Some(n),
        }
    }

    /// The numeric reading used at submission time: empty counts as 0.
    pub fn or_zero(self) -> i32 {
        self.value().unwrap_or(0)
    }

    pub fn is_empty(self) -> bool {
        matches!(self, QtyEntry::Empty)
    }
}

impl fmt::Display for QtyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QtyEntry::Empty => Ok(()),
            QtyEntry::Value(n) => write!(f, "{}", n),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("quantity entry must be empty or decimal digits, got {0:?}")]
pub struct ParseQtyEntryError(pub String);

impl FromStr for QtyEntry {
    type Err = ParseQtyEntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QtyEntry::parse(s).ok_or_else(|| ParseQtyEntryError(s.to_string()))
    }
}

// On the wire a quantity entry is always the string form: "" or digits.
impl Serialize for QtyEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for QtyEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Mutually exclusive grouping modes for sheet display
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    #[default]
    Category,
    Location,
}

impl GroupBy {
    pub fn code(&self) -> &'static str {
        match self {
            GroupBy::Category => "category",
            GroupBy::Location => "location",
        }
    }

    pub fn from_code(code: &str) -> Option<GroupBy> {
        match code {
            "category" => Some(GroupBy::Category),
            "location" => Some(GroupBy::Location),
            _ => None,
        }
    }
}

/// Supported languages
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Thai,
    English,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Thai => "th",
            Language::English => "en",
        }
    }
}

/// GPS coordinates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GpsCoordinates {
    pub latitude: Decimal,
    pub longitude: Decimal,
}

impl GpsCoordinates {
    pub fn new(latitude: Decimal, longitude: Decimal) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Date range for queries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateRange {
    pub start: chrono::NaiveDate,
    pub end: chrono::NaiveDate,
}
