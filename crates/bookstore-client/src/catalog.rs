//! Book catalog: fetched once, filtered locally.

use bookstore_core::catalog::{filter_books, CatalogFilter};
use bookstore_core::Book;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::api::BookstoreApi;
use crate::error::ClientResult;

/// Cached public book list.
///
/// `load` hits the network only the first time; `reload` forces a refetch.
pub struct Catalog {
    api: Arc<dyn BookstoreApi>,
    books: RwLock<Option<Vec<Book>>>,
}

impl Catalog {
    pub fn new(api: Arc<dyn BookstoreApi>) -> Self {
        Catalog {
            api,
            books: RwLock::new(None),
        }
    }

    /// Returns the cached list, fetching it on first use.
    pub async fn load(&self) -> ClientResult<Vec<Book>> {
        if let Some(books) = self.books.read().await.as_ref() {
            return Ok(books.clone());
        }
        self.reload().await
    }

    /// Fetches the list again and replaces the cache.
    pub async fn reload(&self) -> ClientResult<Vec<Book>> {
        let books = self.api.list_books().await?;
        info!(count = books.len(), "Catalog loaded");
        *self.books.write().await = Some(books.clone());
        Ok(books)
    }

    /// The cached list, or `None` before the first load.
    pub async fn books(&self) -> Option<Vec<Book>> {
        self.books.read().await.clone()
    }

    /// Loads if needed, then applies `filter`.
    pub async fn filtered(&self, filter: &CatalogFilter) -> ClientResult<Vec<Book>> {
        let books = self.load().await?;
        Ok(filter_books(&books, filter))
    }
}
