//! # Document Identity Newtypes
//!
//! Newtype wrappers for the two unique keys in the packing list model.
//! These prevent accidental identifier confusion — you cannot pass a
//! `CartonNo` where a `PackingNo` is expected, and the uniqueness
//! indexes in the registry are keyed by the distinct types.
//!
//! ## Reconciliation Invariant
//!
//! Legacy records carried `carton_no` as a JSON number; the canonical
//! model uses strings. `CartonNo` accepts both at the serde boundary and
//! normalizes numbers to their decimal string form, so `1` and `"1"`
//! deserialize to the same key.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::PackListError;

/// Unique identifier of a packing list document (e.g. `"PL-001"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PackingNo(pub String);

impl PackingNo {
    /// Build a packing number, rejecting empty or all-whitespace input.
    pub fn new(no: impl Into<String>) -> Result<Self, PackListError> {
        let no = no.into();
        if no.trim().is_empty() {
            return Err(PackListError::InvalidIdentifier(
                "packing_no must not be empty".to_string(),
            ));
        }
        Ok(Self(no))
    }

    /// Access the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PackingNo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier of a carton, globally unique across all packing
/// lists, not just within one document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CartonNo(pub String);

impl CartonNo {
    /// Build a carton number, rejecting empty or all-whitespace input.
    pub fn new(no: impl Into<String>) -> Result<Self, PackListError> {
        let no = no.into();
        if no.trim().is_empty() {
            return Err(PackListError::InvalidIdentifier(
                "carton_no must not be empty".to_string(),
            ));
        }
        Ok(Self(no))
    }

    /// Access the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for CartonNo {
    fn from(no: u64) -> Self {
        Self(no.to_string())
    }
}

impl std::fmt::Display for CartonNo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CartonNo {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Legacy schema variant encoded carton_no as a number.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(CartonNo(n.to_string())),
            Raw::Text(s) => Ok(CartonNo(s)),
        }
    }
}
