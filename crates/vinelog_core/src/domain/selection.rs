//! In-progress chemical selection for a treatment draft.
//!
//! # Responsibility
//! - Hold the chemicals chosen for a not-yet-saved treatment.
//! - Reject duplicate reference ids instead of silently merging them.
//!
//! # Invariants
//! - At most one line item per chemical reference id.
//! - The selection is owned by the calling session; the core never keeps
//!   one alive between operations.

use crate::model::treatment::ChemicalApplication;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Error raised when a selection operation cannot apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// The chemical is already part of the selection.
    Duplicate { chemical_id: u32 },
}

impl Display for SelectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Duplicate { chemical_id } => {
                write!(f, "chemical {chemical_id} is already selected")
            }
        }
    }
}

impl Error for SelectionError {}

/// Ordered set of chemical line items for a pending treatment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChemicalSelection {
    items: Vec<ChemicalApplication>,
}

impl ChemicalSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a line item, rejecting a reference id that is already present.
    pub fn add(&mut self, application: ChemicalApplication) -> Result<(), SelectionError> {
        if self
            .items
            .iter()
            .any(|item| item.chemical_id == application.chemical_id)
        {
            return Err(SelectionError::Duplicate {
                chemical_id: application.chemical_id,
            });
        }
        self.items.push(application);
        Ok(())
    }

    /// Removes the line item for `chemical_id` if present.
    pub fn remove(&mut self, chemical_id: u32) {
        self.items.retain(|item| item.chemical_id != chemical_id);
    }

    /// Replaces the rate on an existing line item. Unknown ids are ignored.
    pub fn set_rate(&mut self, chemical_id: u32, rate: f64) {
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.chemical_id == chemical_id)
        {
            item.rate = rate;
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[ChemicalApplication] {
        &self.items
    }

    /// Consumes the selection into the draft's chemical list.
    pub fn into_applications(self) -> Vec<ChemicalApplication> {
        self.items
    }
}
