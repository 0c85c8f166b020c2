//! # packlist-core — Foundational Types for the Packing List Model
//!
//! Defines the type-system primitives shared by the rest of the
//! workspace: validated identifier newtypes and calendar dates.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for document keys.** `PackingNo` and `CartonNo`
//!    are distinct types with validated constructors. No bare strings
//!    for identifiers.
//!
//! 2. **Dates are calendar dates.** `PackingDate` carries no time-of-day
//!    or timezone; the serialized form is always `YYYY-MM-DD`.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `packlist-*` crates (leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod error;
pub mod identity;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use error::PackListError;
pub use identity::{CartonNo, PackingNo};
pub use temporal::PackingDate;
