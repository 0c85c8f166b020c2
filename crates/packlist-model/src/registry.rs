//! # Packing List Registry
//!
//! In-memory collection of packing lists with the two uniqueness
//! indexes the storage layer must uphold: `packing_no` as primary key
//! and a global secondary index on `carton_no` spanning every document.
//!
//! Every persist operation re-validates the affected document and is
//! all-or-nothing: a rejected write leaves the registry untouched.
//! Concurrency control is out of scope; callers serialize access.

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;
use tracing::debug;

use packlist_core::{CartonNo, PackingNo};

use crate::document::{Carton, PackingList};
use crate::validate::{
    validate_carton, validate_packing_list, SizeAllowList, ValidationError, Violations,
};

/// Errors raised by registry persist operations.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// A document with the same `packing_no` already exists.
    #[error("packing list '{packing_no}' already exists")]
    DuplicatePackingNo {
        /// The colliding packing number.
        packing_no: PackingNo,
    },

    /// A carton number already belongs to a stored document. The scope
    /// is global: the owner may be a different packing list.
    #[error("carton '{carton_no}' already belongs to packing list '{owner}'")]
    DuplicateCartonNo {
        /// The colliding carton number.
        carton_no: CartonNo,
        /// The document that currently owns the carton number.
        owner: PackingNo,
    },

    /// No document with the given `packing_no` exists.
    #[error("packing list '{packing_no}' not found")]
    NotFound {
        /// The missing packing number.
        packing_no: PackingNo,
    },

    /// The document failed validation.
    #[error(transparent)]
    Rejected(#[from] ValidationError),
}

/// In-memory registry of packing lists.
///
/// Stands in for the external storage collaborator's unique indexes:
/// documents are keyed by `packing_no`, and a secondary index maps every
/// stored `carton_no` to its owning document.
#[derive(Debug, Default)]
pub struct PackingListRegistry {
    documents: BTreeMap<PackingNo, PackingList>,
    carton_index: HashMap<CartonNo, PackingNo>,
}

impl PackingListRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new packing list.
    ///
    /// Validates the document, then checks the `packing_no` primary key
    /// and every `carton_no` against the global index before anything is
    /// written.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::Rejected`] if the document fails validation.
    /// - [`RegistryError::DuplicatePackingNo`] on primary key collision.
    /// - [`RegistryError::DuplicateCartonNo`] if any carton number is
    ///   already owned by a stored document.
    pub fn insert(&mut self, list: PackingList) -> Result<(), RegistryError> {
        validate_packing_list(&list)?;

        if self.documents.contains_key(&list.packing_no) {
            return Err(RegistryError::DuplicatePackingNo {
                packing_no: list.packing_no.clone(),
            });
        }
        self.check_carton_index(&list, None)?;

        for no in list.carton_nos() {
            self.carton_index.insert(no.clone(), list.packing_no.clone());
        }
        debug!(packing_no = %list.packing_no, cartons = list.cartons.len(), "packing list inserted");
        self.documents.insert(list.packing_no.clone(), list);
        Ok(())
    }

    /// Replace an existing packing list with a new revision.
    ///
    /// The revision is validated and its carton numbers are checked
    /// against every *other* document; carton numbers the document
    /// already owns may be kept or dropped freely.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::NotFound`] if no document with this
    ///   `packing_no` exists.
    /// - [`RegistryError::Rejected`] / [`RegistryError::DuplicateCartonNo`]
    ///   as for [`insert`](Self::insert).
    pub fn update(&mut self, list: PackingList) -> Result<(), RegistryError> {
        if !self.documents.contains_key(&list.packing_no) {
            return Err(RegistryError::NotFound {
                packing_no: list.packing_no.clone(),
            });
        }
        validate_packing_list(&list)?;
        self.check_carton_index(&list, Some(&list.packing_no))?;

        // Drop the previous revision's index entries before re-indexing.
        self.carton_index.retain(|_, owner| owner != &list.packing_no);
        for no in list.carton_nos() {
            self.carton_index.insert(no.clone(), list.packing_no.clone());
        }
        debug!(packing_no = %list.packing_no, cartons = list.cartons.len(), "packing list updated");
        self.documents.insert(list.packing_no.clone(), list);
        Ok(())
    }

    /// Append a carton to an existing packing list.
    ///
    /// The carton subtree is validated against the parent document's
    /// `available_sizes` and the global carton index. On success the
    /// carton is appended in document order.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::NotFound`] if the parent does not exist.
    /// - [`RegistryError::Rejected`] if the carton subtree is invalid
    ///   for this parent.
    /// - [`RegistryError::DuplicateCartonNo`] on index collision.
    pub fn append_carton(
        &mut self,
        packing_no: &PackingNo,
        carton: Carton,
    ) -> Result<(), RegistryError> {
        let list = self
            .documents
            .get(packing_no)
            .ok_or_else(|| RegistryError::NotFound {
                packing_no: packing_no.clone(),
            })?;

        let path = format!("cartons[{}]", list.cartons.len());
        let violations = validate_carton(&carton, &SizeAllowList::of(list), &path);
        if !violations.is_empty() {
            return Err(ValidationError::Rejected {
                packing_no: packing_no.to_string(),
                violations: Violations::from(violations),
            }
            .into());
        }
        if let Some(owner) = self.carton_index.get(&carton.carton_no) {
            return Err(RegistryError::DuplicateCartonNo {
                carton_no: carton.carton_no.clone(),
                owner: owner.clone(),
            });
        }

        self.carton_index
            .insert(carton.carton_no.clone(), packing_no.clone());
        debug!(packing_no = %packing_no, carton_no = %carton.carton_no, "carton appended");
        // The key was just looked up; the document is still there.
        if let Some(list) = self.documents.get_mut(packing_no) {
            list.cartons.push(carton);
        }
        Ok(())
    }

    /// Remove a packing list, freeing its carton numbers for reuse.
    ///
    /// Returns the removed document, or `None` if no document with this
    /// `packing_no` exists.
    pub fn remove(&mut self, packing_no: &PackingNo) -> Option<PackingList> {
        let removed = self.documents.remove(packing_no)?;
        self.carton_index.retain(|_, owner| owner != packing_no);
        debug!(packing_no = %packing_no, "packing list removed");
        Some(removed)
    }

    /// Look up a packing list by its packing number.
    pub fn get(&self, packing_no: &PackingNo) -> Option<&PackingList> {
        self.documents.get(packing_no)
    }

    /// Which document owns a carton number, if any.
    pub fn carton_owner(&self, carton_no: &CartonNo) -> Option<&PackingNo> {
        self.carton_index.get(carton_no)
    }

    /// Whether a document with this packing number exists.
    pub fn contains(&self, packing_no: &PackingNo) -> bool {
        self.documents.contains_key(packing_no)
    }

    /// Number of stored packing lists.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Iterate over the stored packing lists in `packing_no` order.
    pub fn iter(&self) -> impl Iterator<Item = &PackingList> {
        self.documents.values()
    }

    /// Check a candidate document's carton numbers against the global
    /// index. Collisions with `exempt_owner` are ignored (used by
    /// `update`, where a document may keep its own carton numbers).
    fn check_carton_index(
        &self,
        list: &PackingList,
        exempt_owner: Option<&PackingNo>,
    ) -> Result<(), RegistryError> {
        for no in list.carton_nos() {
            if let Some(owner) = self.carton_index.get(no) {
                if Some(owner) != exempt_owner {
                    return Err(RegistryError::DuplicateCartonNo {
                        carton_no: no.clone(),
                        owner: owner.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
