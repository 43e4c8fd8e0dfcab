use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::record::Record;

/// The entire record collection, modeled as one document.
///
/// On the wire this is a bare JSON array. Order is insertion order and
/// carries no meaning beyond display; the only cross-record invariant is id
/// uniqueness. The dataset is always read and written as a single unit, and
/// partial access is deliberately absent from the contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Dataset(Vec<Record>);

impl Dataset {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Self(records)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.0
    }

    pub fn into_records(self) -> Vec<Record> {
        self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.0.iter()
    }

    /// Append during initial generation. The dataset has no notion of
    /// post-generation inserts; see [`Dataset::insert`].
    pub fn push(&mut self, record: Record) {
        self.0.push(record);
    }

    /// Linear scan by id. The scan is part of the contract: lookup cost
    /// grows with the dataset.
    pub fn find(&self, id: &str) -> Option<&Record> {
        self.0.iter().find(|record| record.id == id)
    }

    /// Linear scan by id, mutable.
    pub fn find_mut(&mut self, id: &str) -> Option<&mut Record> {
        self.0.iter_mut().find(|record| record.id == id)
    }

    /// Record deletion is not part of this model.
    pub fn remove(&mut self, id: &str) -> Result<Record> {
        Err(Error::Unsupported(format!(
            "record deletion is not supported (id '{id}')"
        )))
    }

    /// Post-generation insertion is not part of this model.
    pub fn insert(&mut self, record: Record) -> Result<()> {
        Err(Error::Unsupported(format!(
            "post-generation insertion is not supported (id '{}')",
            record.id
        )))
    }

    /// Check the id uniqueness invariant across the whole collection.
    pub fn verify_unique_ids(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.0.len());
        for record in &self.0 {
            if !seen.insert(record.id.as_str()) {
                return Err(Error::DuplicateId(record.id.clone()));
            }
        }
        Ok(())
    }
}

impl IntoIterator for Dataset {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
