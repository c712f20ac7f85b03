use sea_orm::DatabaseConnection;

use crate::server::{
    data::document::DocumentRepository,
    error::AppError,
    model::{
        document::{Cursor, Document, Owned, Page},
        identity::Identity,
    },
};

/// Cursor-based listing of one key space at a time.
pub struct ListingService<'a> {
    db: &'a DatabaseConnection,
    page_size: u64,
}

impl<'a> ListingService<'a> {
    pub fn new(db: &'a DatabaseConnection, page_size: u64) -> Self {
        Self { db, page_size }
    }

    /// Lists up to one page of documents of kind `D` after `cursor`
    ///
    /// With an `owner`, documents owned by someone else are dropped from the fetched
    /// page. Filtering happens after paging, so a page can hold fewer documents than the
    /// page size while `next` still points at further documents.
    pub async fn list<D: Document>(
        &self,
        cursor: Option<Cursor>,
        owner: Option<&Identity>,
    ) -> Result<Page<D>, AppError> {
        let repo = DocumentRepository::new(self.db);

        let mut page = repo.page::<D>(cursor, self.page_size).await?;

        if let Some(identity) = owner {
            page.items
                .retain(|item| item.owner() == Some(identity.sub.as_str()));
        }

        Ok(page)
    }
}
