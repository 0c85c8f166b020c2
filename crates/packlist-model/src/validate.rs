//! # Document Validation
//!
//! Write-time validation of packing list documents. Every persist
//! operation re-runs these checks; a document with any violation is
//! rejected whole, with no partial write.
//!
//! ## Ambient Context
//!
//! The size allow-list check is not purely local: validating a carton
//! subtree requires the `available_sizes` of its *root* document. The
//! context is passed explicitly — [`validate_carton`] takes a
//! [`SizeAllowList`] argument rather than relying on any implicit
//! parent lookup, so a carton being appended to an existing document is
//! checked against the same rules as one arriving inside a full
//! document.
//!
//! ## Reporting
//!
//! Violations are collected across the whole tree before rejecting, so
//! a caller sees every offending field path in one round trip. Each
//! violation carries the path in `cartons[i].items[j].sizes[k].field`
//! form.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::document::{Carton, PackingList};

// ─── Violations ──────────────────────────────────────────────────────

/// What went wrong at one field path.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    /// A required field is absent or empty.
    MissingField,
    /// A value is present but outside its permitted domain.
    TypeMismatch {
        /// Description of the permitted domain.
        expected: String,
        /// The value actually found.
        actual: String,
    },
    /// An item references a size label missing from the packing list's
    /// `available_sizes`.
    SizeNotAvailable {
        /// The offending size label.
        size_name: String,
    },
    /// A unique key collides with another key in the same document.
    DuplicateKey {
        /// The colliding key.
        key: String,
    },
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField => write!(f, "missing required field"),
            Self::TypeMismatch { expected, actual } => {
                write!(f, "expected {expected}, got {actual}")
            }
            Self::SizeNotAvailable { size_name } => {
                write!(f, "size {size_name:?} is not in available_sizes")
            }
            Self::DuplicateKey { key } => write!(f, "duplicate key {key:?}"),
        }
    }
}

/// A single validation violation with the offending field path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// Path to the violating field, e.g. `cartons[0].items[1].color_name`.
    pub path: String,
    /// What rule the field violated.
    pub kind: ViolationKind,
}

impl Violation {
    fn new(path: impl Into<String>, kind: ViolationKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  {}: {}", self.path, self.kind)
    }
}

/// Collection of validation violations for one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl From<Vec<Violation>> for Violations {
    fn from(violations: Vec<Violation>) -> Self {
        Self { violations }
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Error rejecting a candidate document.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// The document violated one or more validation rules.
    #[error("packing list '{packing_no}' rejected:\n{violations}")]
    Rejected {
        /// The `packing_no` of the rejected document.
        packing_no: String,
        /// Every violation found in the document.
        violations: Violations,
    },
}

impl ValidationError {
    /// The violations behind the rejection.
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Rejected { violations, .. } => violations.violations(),
        }
    }
}

// ─── Ancestor Context ────────────────────────────────────────────────

/// The ambient `available_sizes` of a root document, passed explicitly
/// into carton subtree validation.
#[derive(Debug, Clone, Copy)]
pub struct SizeAllowList<'a> {
    sizes: &'a BTreeSet<String>,
}

impl<'a> SizeAllowList<'a> {
    /// Borrow the allow-list from a set of size labels.
    pub fn new(sizes: &'a BTreeSet<String>) -> Self {
        Self { sizes }
    }

    /// Borrow the allow-list of a packing list.
    pub fn of(list: &'a PackingList) -> Self {
        Self::new(&list.available_sizes)
    }

    /// Whether a size label is on the allow-list.
    pub fn contains(&self, size_name: &str) -> bool {
        self.sizes.contains(size_name)
    }
}

// ─── Validation ──────────────────────────────────────────────────────

/// Validate a whole packing list document.
///
/// Checks every structural and cross-field rule: required fields,
/// positive measurements and weights, `gross_weight >= net_weight`,
/// document-local `carton_no` uniqueness, and the size allow-list
/// invariant. All violations are collected; any violation rejects the
/// document.
///
/// Cross-*document* uniqueness of `packing_no` and `carton_no` is the
/// registry's responsibility, not this function's.
///
/// # Errors
///
/// Returns [`ValidationError::Rejected`] listing every violation found.
pub fn validate_packing_list(list: &PackingList) -> Result<(), ValidationError> {
    let mut out = Vec::new();

    if list.packing_no.as_str().trim().is_empty() {
        out.push(Violation::new("packing_no", ViolationKind::MissingField));
    }
    if list.available_sizes.is_empty() {
        out.push(Violation::new(
            "available_sizes",
            ViolationKind::MissingField,
        ));
    }

    let allow = SizeAllowList::of(list);
    let mut seen = HashSet::new();
    for (i, carton) in list.cartons.iter().enumerate() {
        let path = format!("cartons[{i}]");
        if !carton.carton_no.as_str().trim().is_empty() && !seen.insert(&carton.carton_no) {
            out.push(Violation::new(
                format!("{path}.carton_no"),
                ViolationKind::DuplicateKey {
                    key: carton.carton_no.to_string(),
                },
            ));
        }
        out.extend(validate_carton(carton, &allow, &path));
    }

    if out.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::Rejected {
            packing_no: list.packing_no.to_string(),
            violations: Violations { violations: out },
        })
    }
}

/// Validate one carton subtree against the ambient allow-list of its
/// root document.
///
/// Returns the violations found; an empty Vec means the subtree is
/// acceptable. `path` is the prefix for reported field paths, e.g.
/// `cartons[2]`.
pub fn validate_carton(carton: &Carton, allow: &SizeAllowList<'_>, path: &str) -> Vec<Violation> {
    let mut out = Vec::new();

    if carton.carton_no.as_str().trim().is_empty() {
        out.push(Violation::new(
            format!("{path}.carton_no"),
            ViolationKind::MissingField,
        ));
    }

    check_positive(
        carton.measurement.length,
        format!("{path}.measurement.length"),
        &mut out,
    );
    check_positive(
        carton.measurement.width,
        format!("{path}.measurement.width"),
        &mut out,
    );
    check_positive(
        carton.measurement.height,
        format!("{path}.measurement.height"),
        &mut out,
    );
    check_positive(carton.net_weight, format!("{path}.net_weight"), &mut out);
    check_positive(
        carton.gross_weight,
        format!("{path}.gross_weight"),
        &mut out,
    );

    // Cross-field: only meaningful once both weights are in domain.
    if is_positive(carton.net_weight)
        && is_positive(carton.gross_weight)
        && carton.gross_weight < carton.net_weight
    {
        out.push(Violation::new(
            format!("{path}.gross_weight"),
            ViolationKind::TypeMismatch {
                expected: format!("number >= net_weight ({})", carton.net_weight),
                actual: carton.gross_weight.to_string(),
            },
        ));
    }

    if carton.style.trim().is_empty() {
        out.push(Violation::new(
            format!("{path}.style"),
            ViolationKind::MissingField,
        ));
    }

    for (j, item) in carton.items.iter().enumerate() {
        if item.color_name.trim().is_empty() {
            out.push(Violation::new(
                format!("{path}.items[{j}].color_name"),
                ViolationKind::MissingField,
            ));
        }
        for (k, size) in item.sizes.iter().enumerate() {
            let size_path = format!("{path}.items[{j}].sizes[{k}].size_name");
            if size.size_name.trim().is_empty() {
                out.push(Violation::new(size_path, ViolationKind::MissingField));
            } else if !allow.contains(&size.size_name) {
                out.push(Violation::new(
                    size_path,
                    ViolationKind::SizeNotAvailable {
                        size_name: size.size_name.clone(),
                    },
                ));
            }
        }
    }

    out
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn check_positive(value: f64, path: String, out: &mut Vec<Violation>) {
    if !is_positive(value) {
        out.push(Violation::new(
            path,
            ViolationKind::TypeMismatch {
                expected: "positive number".to_string(),
                actual: value.to_string(),
            },
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Item, Measurement, MeasurementUnit, SizeBreakdown};
    use packlist_core::{CartonNo, PackingDate, PackingNo};

    fn carton(no: &str) -> Carton {
        Carton {
            carton_no: CartonNo::new(no).unwrap(),
            measurement: Measurement::cm(60.0, 40.0, 30.0),
            net_weight: 10.0,
            gross_weight: 11.5,
            style: "ST-100".to_string(),
            customer: None,
            customer_po: None,
            items: vec![Item::new(
                "Red",
                vec![SizeBreakdown::new("S", 10)],
            )],
        }
    }

    fn list() -> PackingList {
        PackingList {
            packing_no: PackingNo::new("PL-001").unwrap(),
            packing_date: PackingDate::parse("2026-01-15").unwrap(),
            buyer_name: None,
            available_sizes: ["S", "M"].iter().map(|s| s.to_string()).collect(),
            cartons: vec![carton("1")],
        }
    }

    fn kinds(err: &ValidationError) -> Vec<&ViolationKind> {
        err.violations().iter().map(|v| &v.kind).collect()
    }

    #[test]
    fn test_valid_document_passes() {
        validate_packing_list(&list()).unwrap();
    }

    #[test]
    fn test_empty_cartons_is_valid() {
        let mut l = list();
        l.cartons.clear();
        validate_packing_list(&l).unwrap();
    }

    #[test]
    fn test_size_not_available() {
        let mut l = list();
        l.cartons[0].items[0].sizes[0].size_name = "L".to_string();
        let err = validate_packing_list(&l).unwrap_err();
        assert_eq!(
            kinds(&err),
            vec![&ViolationKind::SizeNotAvailable {
                size_name: "L".to_string()
            }]
        );
        assert_eq!(err.violations()[0].path, "cartons[0].items[0].sizes[0].size_name");
    }

    #[test]
    fn test_empty_available_sizes_rejected() {
        let mut l = list();
        l.available_sizes.clear();
        let err = validate_packing_list(&l).unwrap_err();
        // The empty allow-list itself, plus the size that can no longer resolve.
        assert!(err
            .violations()
            .iter()
            .any(|v| v.path == "available_sizes" && v.kind == ViolationKind::MissingField));
    }

    #[test]
    fn test_empty_packing_no_rejected() {
        let mut l = list();
        l.packing_no = PackingNo(String::new());
        let err = validate_packing_list(&l).unwrap_err();
        assert!(err
            .violations()
            .iter()
            .any(|v| v.path == "packing_no" && v.kind == ViolationKind::MissingField));
    }

    #[test]
    fn test_empty_style_and_color_rejected() {
        let mut l = list();
        l.cartons[0].style = String::new();
        l.cartons[0].items[0].color_name = "  ".to_string();
        let err = validate_packing_list(&l).unwrap_err();
        let paths: Vec<&str> = err.violations().iter().map(|v| v.path.as_str()).collect();
        assert_eq!(paths, vec!["cartons[0].style", "cartons[0].items[0].color_name"]);
    }

    #[test]
    fn test_nonpositive_dimensions_rejected() {
        let mut l = list();
        l.cartons[0].measurement = Measurement::new(0.0, -1.0, f64::NAN, MeasurementUnit::Inch);
        let err = validate_packing_list(&l).unwrap_err();
        assert_eq!(err.violations().len(), 3);
        assert!(err
            .violations()
            .iter()
            .all(|v| matches!(v.kind, ViolationKind::TypeMismatch { .. })));
    }

    #[test]
    fn test_gross_weight_below_net_weight_rejected() {
        let mut l = list();
        l.cartons[0].net_weight = 12.5;
        l.cartons[0].gross_weight = 10.0;
        let err = validate_packing_list(&l).unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert_eq!(err.violations()[0].path, "cartons[0].gross_weight");
        match &err.violations()[0].kind {
            ViolationKind::TypeMismatch { expected, actual } => {
                assert_eq!(expected, "number >= net_weight (12.5)");
                assert_eq!(actual, "10");
            }
            other => panic!("expected TypeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_gross_equal_to_net_is_valid() {
        let mut l = list();
        l.cartons[0].net_weight = 11.5;
        l.cartons[0].gross_weight = 11.5;
        validate_packing_list(&l).unwrap();
    }

    #[test]
    fn test_duplicate_carton_no_within_document() {
        let mut l = list();
        l.cartons.push(carton("1"));
        let err = validate_packing_list(&l).unwrap_err();
        assert_eq!(
            kinds(&err),
            vec![&ViolationKind::DuplicateKey {
                key: "1".to_string()
            }]
        );
        assert_eq!(err.violations()[0].path, "cartons[1].carton_no");
    }

    #[test]
    fn test_all_violations_collected() {
        let mut l = list();
        l.packing_no = PackingNo(String::new());
        l.cartons[0].style = String::new();
        l.cartons[0].items[0].sizes[0].size_name = "XXL".to_string();
        let err = validate_packing_list(&l).unwrap_err();
        assert_eq!(err.violations().len(), 3);
    }

    #[test]
    fn test_validate_carton_with_explicit_context() {
        let sizes: std::collections::BTreeSet<String> =
            ["S"].iter().map(|s| s.to_string()).collect();
        let allow = SizeAllowList::new(&sizes);

        let ok = validate_carton(&carton("9"), &allow, "cartons[0]");
        assert!(ok.is_empty());

        let mut bad = carton("9");
        bad.items[0].sizes[0].size_name = "M".to_string();
        let violations = validate_carton(&bad, &allow, "cartons[3]");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "cartons[3].items[0].sizes[0].size_name");
    }

    #[test]
    fn test_rejection_display_lists_paths() {
        let mut l = list();
        l.cartons[0].items[0].sizes[0].size_name = "L".to_string();
        let err = validate_packing_list(&l).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("PL-001"));
        assert!(msg.contains("cartons[0].items[0].sizes[0].size_name"));
        assert!(msg.contains("\"L\""));
    }
}
