//! Self links built from the base URL a request arrived on.

use url::Url;

use crate::server::model::{
    document::{Cursor, Kind},
    reference::Reference,
};

/// Builds absolute links to documents and collection pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Links {
    /// Always ends with `/`.
    base: String,
}

impl Links {
    pub fn new(base: Url) -> Self {
        let mut base = base.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        Self { base }
    }

    /// Link to a single document, e.g. `https://host/races/12`.
    pub fn document(&self, kind: Kind, id: i32) -> String {
        format!("{}{}/{}", self.base, kind.collection(), id)
    }

    /// Reference entry pointing at a document.
    pub fn reference(&self, kind: Kind, id: i32) -> Reference {
        Reference {
            id,
            self_link: self.document(kind, id),
        }
    }

    /// Link to the page of a collection that starts after `cursor`.
    pub fn next_page(&self, kind: Kind, cursor: Cursor) -> String {
        format!("{}{}?cursor={}", self.base, kind.collection(), cursor.token())
    }
}
