//! Document store abstractions shared by athletes, races and courses.
//!
//! A document is a serde-serializable body stored under a [`Kind`] key space. The store
//! assigns the ID, so documents never carry their own ID; [`Stored`] pairs the two once
//! a document has been read back.

use serde::{de::DeserializeOwned, Serialize};

/// Key space a document lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Athlete,
    Race,
    Course,
}

impl Kind {
    /// Key space name used in the `kind` column of the document table.
    pub fn store_key(self) -> &'static str {
        match self {
            Self::Athlete => entity::document::kind::ATHLETES,
            Self::Race => entity::document::kind::RACES,
            Self::Course => entity::document::kind::COURSES,
        }
    }

    /// Plural path segment of the collection endpoint, also used as the listing key.
    pub fn collection(self) -> &'static str {
        match self {
            Self::Athlete => "athletes",
            Self::Race => "races",
            Self::Course => "courses",
        }
    }

    /// Singular lowercase name for messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Athlete => "athlete",
            Self::Race => "race",
            Self::Course => "course",
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Ownership discriminator used by access control.
pub trait Owned {
    /// Identity allowed to read and write the document, `None` when unrestricted.
    fn owner(&self) -> Option<&str>;
}

/// A body that can be persisted in the document store.
pub trait Document: Owned + Serialize + DeserializeOwned + Send + Sync {
    const KIND: Kind;
}

/// A document together with its store-assigned ID.
#[derive(Debug, Clone, PartialEq)]
pub struct Stored<D> {
    pub id: i32,
    pub document: D,
}

impl<D: Owned> Owned for Stored<D> {
    fn owner(&self) -> Option<&str> {
        self.document.owner()
    }
}

/// A stored document as seen by access control.
pub trait Resource: Owned {
    fn kind(&self) -> Kind;
    fn id(&self) -> i32;
}

impl<D: Document> Resource for Stored<D> {
    fn kind(&self) -> Kind {
        D::KIND
    }

    fn id(&self) -> i32 {
        self.id
    }
}

/// Position in a key space after which the next page starts.
///
/// Issued by the store and handed to clients as an opaque token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor(i32);

impl Cursor {
    pub fn after(id: i32) -> Self {
        Self(id)
    }

    /// Last document ID of the page that issued this cursor.
    pub fn last_id(self) -> i32 {
        self.0
    }

    pub fn token(self) -> String {
        self.0.to_string()
    }
}

/// One bounded page of a key space.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<D> {
    pub items: Vec<Stored<D>>,
    /// Present only when the store holds more documents beyond this page.
    pub next: Option<Cursor>,
}
