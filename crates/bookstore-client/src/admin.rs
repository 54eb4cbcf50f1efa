//! # Admin Console
//!
//! Catalog and order management for admin accounts.
//!
//! ## Refetch After Every Mutation
//! ```text
//! add_book(NewBook) ──► validate ──► POST /api/books ──► GET /api/books
//! delete_book(id)   ─────────────► DELETE /api/books/{id} ──► GET /api/books
//! update_order_status(id, s) ────► PUT /api/orders/{id} ──► GET /api/orders
//! ```
//!
//! Each mutation returns the freshly read list, never a locally patched one.
//! Role checks are the server's; a non-admin token surfaces as HTTP 401/403.

use bookstore_core::validation::validate_new_book;
use bookstore_core::{Book, NewBook, Order, OrderStatus, UpdateOrderStatus};
use std::sync::Arc;
use tracing::info;

use crate::api::BookstoreApi;
use crate::error::{ClientError, ClientResult};
use crate::token::{AccessToken, TokenProvider};

/// Admin operations over the injected API.
pub struct AdminConsole {
    api: Arc<dyn BookstoreApi>,
    tokens: Arc<dyn TokenProvider>,
}

impl AdminConsole {
    pub fn new(api: Arc<dyn BookstoreApi>, tokens: Arc<dyn TokenProvider>) -> Self {
        AdminConsole { api, tokens }
    }

    fn require_token(&self) -> ClientResult<AccessToken> {
        self.tokens.token().ok_or(ClientError::NotAuthenticated)
    }

    // =========================================================================
    // Books
    // =========================================================================

    /// The full catalog. Requires a session like the rest of the console,
    /// although the endpoint itself is public.
    pub async fn list_books(&self) -> ClientResult<Vec<Book>> {
        self.require_token()?;
        self.api.list_books().await
    }

    /// Validates and creates a book, then returns the refreshed catalog.
    pub async fn add_book(&self, book: NewBook) -> ClientResult<Vec<Book>> {
        let token = self.require_token()?;
        let book = normalize(book);
        validate_new_book(&book)?;

        self.api.create_book(&token, &book).await?;
        info!(title = %book.title, "Book created");

        self.api.list_books().await
    }

    /// Deletes a book, then returns the refreshed catalog.
    pub async fn delete_book(&self, book_id: &str) -> ClientResult<Vec<Book>> {
        let token = self.require_token()?;

        self.api.delete_book(&token, book_id).await?;
        info!(book_id, "Book deleted");

        self.api.list_books().await
    }

    // =========================================================================
    // Orders
    // =========================================================================

    pub async fn list_orders(&self) -> ClientResult<Vec<Order>> {
        let token = self.require_token()?;
        self.api.list_orders(&token).await
    }

    /// Sets an order's status, then returns the refreshed order list.
    pub async fn update_order_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> ClientResult<Vec<Order>> {
        let token = self.require_token()?;
        if status == OrderStatus::Unknown {
            return Err(ClientError::Validation(
                bookstore_core::ValidationError::NotAllowed {
                    field: "status".to_string(),
                    allowed: OrderStatus::ASSIGNABLE
                        .iter()
                        .map(|s| s.as_str().to_string())
                        .collect(),
                },
            ));
        }

        self.api
            .update_order_status(&token, order_id, &UpdateOrderStatus { status })
            .await?;
        info!(order_id, %status, "Order status updated");

        self.api.list_orders(&token).await
    }
}

/// Trims text fields and drops a blank image URL.
fn normalize(book: NewBook) -> NewBook {
    NewBook {
        title: book.title.trim().to_string(),
        author: book.author.trim().to_string(),
        price: book.price,
        image_url: book
            .image_url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty()),
    }
}
