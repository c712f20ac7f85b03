//! Document repository for the schema-less store.
//!
//! Provides the `DocumentRepository` for reading and writing athletes, races and courses.
//! Every document lives in one row of the `document` table, tagged with the key space it
//! belongs to. Each method touches a single row, so each call is atomic on its own but
//! nothing spans two documents. Rows carry a revision that every write bumps; writes and
//! deletes of a document read earlier are conditional on it.

use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

use entity::document::{Column, Entity as DocumentEntity};

use crate::server::model::document::{Cursor, Document, Page, Stored};

/// Outcome of a read-modify-write on one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modified {
    /// No document with the ID exists in the key space.
    Missing,
    /// The modification reported no change, nothing was written.
    Unchanged,
    /// The modified document was saved.
    Written,
}

/// Attempts a conditional write makes before giving up on a contended document.
const WRITE_ATTEMPTS: usize = 16;

/// Write counter of a stored document, as read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Revision(i32);

enum Rewrite<D> {
    Missing,
    Unchanged(Stored<D>),
    Written(Stored<D>),
}

/// Repository providing single-document operations on the document table.
pub struct DocumentRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DocumentRepository<'a> {
    /// Creates a new DocumentRepository instance
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `DocumentRepository` - new repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a new document and returns it with its assigned ID
    ///
    /// IDs come from the table's autoincrement key and are never reused.
    ///
    /// # Returns
    /// - `Ok(Stored<D>)` - The stored document
    /// - `Err(DbErr)` - Serialization or database error during insert
    pub async fn create<D: Document>(&self, document: D) -> Result<Stored<D>, DbErr> {
        let model = entity::document::ActiveModel {
            id: ActiveValue::NotSet,
            kind: ActiveValue::Set(D::KIND.store_key().to_string()),
            data: ActiveValue::Set(encode(&document)?),
            version: ActiveValue::Set(0),
        }
        .insert(self.db)
        .await?;

        Ok(Stored {
            id: model.id,
            document,
        })
    }

    /// Finds a document by ID within the key space of `D`
    ///
    /// # Returns
    /// - `Ok(Some(Stored<D>))` - The document exists
    /// - `Ok(None)` - No document of this kind has the ID
    /// - `Err(DbErr)` - Database error or stored data that does not decode as `D`
    pub async fn get<D: Document>(&self, id: i32) -> Result<Option<Stored<D>>, DbErr> {
        Ok(self.get_with_revision(id).await?.map(|(stored, _)| stored))
    }

    /// Finds a document together with the revision it was read at
    ///
    /// # Returns
    /// - `Ok(Some((Stored<D>, Revision)))` - The document exists
    /// - `Ok(None)` - No document of this kind has the ID
    /// - `Err(DbErr)` - Database error or stored data that does not decode as `D`
    pub async fn get_with_revision<D: Document>(
        &self,
        id: i32,
    ) -> Result<Option<(Stored<D>, Revision)>, DbErr> {
        let Some(model) = DocumentEntity::find_by_id(id)
            .filter(Column::Kind.eq(D::KIND.store_key()))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let revision = Revision(model.version);
        Ok(Some((decode(model)?, revision)))
    }

    /// Deletes a document if it is still at `revision`
    ///
    /// # Returns
    /// - `Ok(true)` - Document deleted
    /// - `Ok(false)` - No document of this kind has the ID, or it was written since
    ///   `revision` was read
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete<D: Document>(&self, id: i32, revision: Revision) -> Result<bool, DbErr> {
        let result = DocumentEntity::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::Kind.eq(D::KIND.store_key()))
            .filter(Column::Version.eq(revision.0))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Fetches up to `limit` documents in ascending ID order, starting after `after`
    ///
    /// One extra row is requested to learn whether a further page exists.
    ///
    /// # Returns
    /// - `Ok(Page<D>)` - The page, with `next` set only if more documents follow
    /// - `Err(DbErr)` - Database or decode error
    pub async fn page<D: Document>(
        &self,
        after: Option<Cursor>,
        limit: u64,
    ) -> Result<Page<D>, DbErr> {
        let mut query = DocumentEntity::find()
            .filter(Column::Kind.eq(D::KIND.store_key()))
            .order_by_asc(Column::Id)
            .limit(limit + 1);

        if let Some(cursor) = after {
            query = query.filter(Column::Id.gt(cursor.last_id()));
        }

        let mut models = query.all(self.db).await?;

        let next = if models.len() as u64 > limit {
            models.truncate(limit as usize);
            models.last().map(|model| Cursor::after(model.id))
        } else {
            None
        };

        let items = models
            .into_iter()
            .map(decode)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page { items, next })
    }

    /// Returns the lowest-ID document of kind `D` matching `predicate`
    ///
    /// Scans the whole key space.
    pub async fn find_first<D, P>(&self, predicate: P) -> Result<Option<Stored<D>>, DbErr>
    where
        D: Document,
        P: Fn(&D) -> bool,
    {
        let models = DocumentEntity::find()
            .filter(Column::Kind.eq(D::KIND.store_key()))
            .order_by_asc(Column::Id)
            .all(self.db)
            .await?;

        for model in models {
            let stored = decode::<D>(model)?;
            if predicate(&stored.document) {
                return Ok(Some(stored));
            }
        }

        Ok(None)
    }

    /// Reads a document, applies `modify` and writes it back if it reports a change
    ///
    /// The write only lands if nobody wrote the document since it was read. Otherwise it
    /// is read again and `modify` runs again on the fresh copy.
    ///
    /// # Returns
    /// - `Ok(Modified::Missing)` - No such document, or it was deleted before the write
    /// - `Ok(Modified::Unchanged)` - `modify` returned `false`
    /// - `Ok(Modified::Written)` - The modified document was saved
    /// - `Err(DbErr)` - Database or decode error, or the document kept changing underneath
    pub async fn modify<D, F>(&self, id: i32, modify: F) -> Result<Modified, DbErr>
    where
        D: Document,
        F: FnMut(&mut D) -> bool,
    {
        Ok(match self.rewrite(id, modify).await? {
            Rewrite::Missing => Modified::Missing,
            Rewrite::Unchanged(_) => Modified::Unchanged,
            Rewrite::Written(_) => Modified::Written,
        })
    }

    /// Applies `change` to a document and saves it, with the same retry as [`Self::modify`]
    ///
    /// A document deleted in the meantime is not recreated.
    ///
    /// # Returns
    /// - `Ok(Some(Stored<D>))` - The document as written
    /// - `Ok(None)` - No such document
    /// - `Err(DbErr)` - Serialization, decode or database error
    pub async fn update<D, F>(&self, id: i32, mut change: F) -> Result<Option<Stored<D>>, DbErr>
    where
        D: Document,
        F: FnMut(&mut D),
    {
        let rewrite = self
            .rewrite(id, |document: &mut D| {
                change(document);
                true
            })
            .await?;

        Ok(match rewrite {
            Rewrite::Missing => None,
            Rewrite::Unchanged(stored) | Rewrite::Written(stored) => Some(stored),
        })
    }

    async fn rewrite<D, F>(&self, id: i32, mut modify: F) -> Result<Rewrite<D>, DbErr>
    where
        D: Document,
        F: FnMut(&mut D) -> bool,
    {
        for _ in 0..WRITE_ATTEMPTS {
            let Some((mut stored, revision)) = self.get_with_revision::<D>(id).await? else {
                return Ok(Rewrite::Missing);
            };

            if !modify(&mut stored.document) {
                return Ok(Rewrite::Unchanged(stored));
            }

            if self.write(&stored, revision).await? {
                return Ok(Rewrite::Written(stored));
            }

            tracing::trace!("{} {} changed before write, retrying", D::KIND, id);
        }

        Err(DbErr::Custom(format!(
            "{} {} kept changing; gave up after {} attempts",
            D::KIND,
            id,
            WRITE_ATTEMPTS
        )))
    }

    /// Writes the body and bumps the revision, only if the row is still at `revision`.
    async fn write<D: Document>(
        &self,
        stored: &Stored<D>,
        revision: Revision,
    ) -> Result<bool, DbErr> {
        let result = DocumentEntity::update_many()
            .col_expr(Column::Data, Expr::value(encode(&stored.document)?))
            .col_expr(Column::Version, Expr::value(revision.0 + 1))
            .filter(Column::Id.eq(stored.id))
            .filter(Column::Kind.eq(D::KIND.store_key()))
            .filter(Column::Version.eq(revision.0))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

fn encode<D: Document>(document: &D) -> Result<serde_json::Value, DbErr> {
    serde_json::to_value(document).map_err(|e| DbErr::Json(e.to_string()))
}

fn decode<D: Document>(model: entity::document::Model) -> Result<Stored<D>, DbErr> {
    let document = serde_json::from_value(model.data).map_err(|e| {
        DbErr::Json(format!(
            "{} document {} failed to decode: {}",
            model.kind, model.id, e
        ))
    })?;

    Ok(Stored {
        id: model.id,
        document,
    })
}
