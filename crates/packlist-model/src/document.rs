//! # Packing List Documents
//!
//! The document shapes for shipping packing lists. Ownership is strictly
//! hierarchical containment: a packing list owns its cartons, a carton
//! owns its items, an item owns its size breakdowns. No sharing, no
//! cycles.
//!
//! ## Central Consistency Invariant
//!
//! Every `size_name` referenced transitively by a packing list's cartons
//! must appear in that list's `available_sizes` set. The types here do
//! not enforce this on their own — construction and deserialization are
//! permissive, and [`crate::validate`] is the write-time gate.
//!
//! ## Schema Reconciliation
//!
//! This is the canonical superset of the two historical schema variants:
//! string `carton_no` (numeric input still accepted, see
//! [`packlist_core::CartonNo`]), optional `customer`/`customer_po`, and
//! an explicit measurement `unit` defaulting to centimeters.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use packlist_core::{CartonNo, PackingDate, PackingNo};

// ─── Size / Item ─────────────────────────────────────────────────────

/// A (size label, quantity) pair inside an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeBreakdown {
    /// Size label, e.g. `"S"`, `"M"`, `"L"`.
    pub size_name: String,
    /// Number of pieces of that size. Non-negative by construction.
    pub quantity: u32,
}

impl SizeBreakdown {
    /// Build a size breakdown.
    pub fn new(size_name: impl Into<String>, quantity: u32) -> Self {
        Self {
            size_name: size_name.into(),
            quantity,
        }
    }
}

/// A color variant within a carton, broken down by size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Color name of the variant, e.g. `"Red"`.
    pub color_name: String,
    /// Ordered size breakdown for this color.
    pub sizes: Vec<SizeBreakdown>,
}

impl Item {
    /// Build an item from a color name and its size breakdowns.
    pub fn new(color_name: impl Into<String>, sizes: Vec<SizeBreakdown>) -> Self {
        Self {
            color_name: color_name.into(),
            sizes,
        }
    }
}

// ─── Measurement ─────────────────────────────────────────────────────

/// Unit of the carton dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MeasurementUnit {
    /// Centimeters. The default when a record omits the unit.
    #[default]
    Cm,
    /// Inches.
    Inch,
}

impl MeasurementUnit {
    /// The uppercase string identifier, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cm => "CM",
            Self::Inch => "INCH",
        }
    }
}

impl std::fmt::Display for MeasurementUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outer dimensions of a carton.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Length of the carton. Must be a positive number.
    pub length: f64,
    /// Width of the carton. Must be a positive number.
    pub width: f64,
    /// Height of the carton. Must be a positive number.
    pub height: f64,
    /// Unit of the three dimensions. Defaults to centimeters.
    #[serde(default)]
    pub unit: MeasurementUnit,
}

impl Measurement {
    /// Build a measurement in the given unit.
    pub fn new(length: f64, width: f64, height: f64, unit: MeasurementUnit) -> Self {
        Self {
            length,
            width,
            height,
            unit,
        }
    }

    /// Build a measurement in centimeters, the default unit.
    pub fn cm(length: f64, width: f64, height: f64) -> Self {
        Self::new(length, width, height, MeasurementUnit::Cm)
    }
}

// ─── Carton ──────────────────────────────────────────────────────────

/// A physical shipping box with weight/dimension metadata and the items
/// packed inside it.
///
/// `carton_no` is unique across the entire collection of cartons, not
/// just within one packing list. The registry enforces the global scope;
/// the validator catches duplicates within a single document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Carton {
    /// Globally unique carton number.
    pub carton_no: CartonNo,
    /// Outer dimensions of the carton.
    pub measurement: Measurement,
    /// Net weight (contents only). Must be positive.
    pub net_weight: f64,
    /// Gross weight (contents plus packaging). Must be positive and
    /// at least `net_weight`.
    pub gross_weight: f64,
    /// Style of the items in the carton.
    pub style: String,
    /// Customer the carton is destined for, if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    /// Customer purchase order reference, if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_po: Option<String>,
    /// Ordered items packed in this carton.
    pub items: Vec<Item>,
}

// ─── Packing List ────────────────────────────────────────────────────

/// Root shipping document describing one or more cartons for a buyer or
/// shipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackingList {
    /// Unique packing number, the primary key of the document.
    pub packing_no: PackingNo,
    /// Calendar date the packing documentation was entered.
    pub packing_date: PackingDate,
    /// Buyer the shipment is for, if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer_name: Option<String>,
    /// Allow-list of size labels valid for this packing list. Must be a
    /// superset of every `size_name` referenced by the cartons' items.
    pub available_sizes: BTreeSet<String>,
    /// Ordered cartons in the shipment.
    pub cartons: Vec<Carton>,
}

impl PackingList {
    /// Whether a size label is on this document's allow-list.
    pub fn size_available(&self, size_name: &str) -> bool {
        self.available_sizes.contains(size_name)
    }

    /// Total number of pieces across all cartons, items, and sizes.
    pub fn total_quantity(&self) -> u64 {
        self.cartons
            .iter()
            .flat_map(|c| &c.items)
            .flat_map(|i| &i.sizes)
            .map(|s| u64::from(s.quantity))
            .sum()
    }

    /// Iterate over the carton numbers in document order.
    pub fn carton_nos(&self) -> impl Iterator<Item = &CartonNo> {
        self.cartons.iter().map(|c| &c.carton_no)
    }
}
