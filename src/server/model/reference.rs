//! Lightweight cross references embedded in documents.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::model::api::ReferenceDto;

/// Pointer to another document: its ID and a self link, never its contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub id: i32,
    #[serde(rename = "self")]
    pub self_link: String,
}

impl Reference {
    pub fn into_dto(self) -> ReferenceDto {
        ReferenceDto {
            id: self.id,
            self_link: self.self_link,
        }
    }
}

/// Ordered set of references keyed by ID.
///
/// Serialized as a plain JSON array. Lookups go through an ID → position index that is
/// rebuilt on removal. A stored array that already contains duplicate IDs (left behind by
/// racing writers) is accepted; the index then tracks the first occurrence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Reference>", into = "Vec<Reference>")]
pub struct ReferenceList {
    entries: Vec<Reference>,
    index: HashMap<i32, usize>,
}

impl ReferenceList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: i32) -> bool {
        self.index.contains_key(&id)
    }

    pub fn get(&self, id: i32) -> Option<&Reference> {
        self.index.get(&id).map(|&position| &self.entries[position])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reference> {
        self.entries.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = i32> + '_ {
        self.entries.iter().map(|reference| reference.id)
    }

    /// Appends a reference unless one with the same ID is already present.
    ///
    /// # Returns
    /// - `true` - Reference appended
    /// - `false` - ID already listed, list unchanged
    pub fn insert(&mut self, reference: Reference) -> bool {
        if self.contains(reference.id) {
            return false;
        }

        self.index.insert(reference.id, self.entries.len());
        self.entries.push(reference);
        true
    }

    /// Removes the first reference with the given ID.
    pub fn remove(&mut self, id: i32) -> Option<Reference> {
        let position = self.index.get(&id).copied()?;
        let removed = self.entries.remove(position);
        self.reindex();
        Some(removed)
    }

    pub fn into_dto(self) -> Vec<ReferenceDto> {
        self.entries.into_iter().map(Reference::into_dto).collect()
    }

    fn reindex(&mut self) {
        self.index.clear();
        for (position, reference) in self.entries.iter().enumerate() {
            self.index.entry(reference.id).or_insert(position);
        }
    }
}

impl PartialEq for ReferenceList {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl From<Vec<Reference>> for ReferenceList {
    fn from(entries: Vec<Reference>) -> Self {
        let mut list = Self {
            entries,
            index: HashMap::new(),
        };
        list.reindex();
        list
    }
}

impl From<ReferenceList> for Vec<Reference> {
    fn from(list: ReferenceList) -> Self {
        list.entries
    }
}
