//! # packlist-model — Packing List Documents, Validation, and Registry
//!
//! The document model for shipping packing lists: a packing list owns
//! cartons, cartons own items, items own size breakdowns. On top of the
//! shapes sit two gates every write passes through:
//!
//! - [`validate`] — structural and cross-field rules, reported as
//!   path-addressed violations. The central invariant: every size label
//!   referenced under a carton must be on the root document's
//!   `available_sizes` allow-list.
//! - [`registry`] — the uniqueness indexes (`packing_no` primary,
//!   `carton_no` global secondary) with all-or-nothing persist
//!   semantics.
//!
//! Persistence, transport, and concurrency control belong to external
//! collaborators consuming these types as their payload contract.

pub mod document;
pub mod registry;
pub mod validate;

// Re-export primary types for ergonomic imports.
pub use document::{Carton, Item, Measurement, MeasurementUnit, PackingList, SizeBreakdown};
pub use registry::{PackingListRegistry, RegistryError};
pub use validate::{
    validate_carton, validate_packing_list, SizeAllowList, ValidationError, Violation,
    ViolationKind, Violations,
};
