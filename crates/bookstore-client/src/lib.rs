//! # bookstore-client: REST Client and Cart Store
//!
//! Talks to the bookstore API and keeps a local mirror of the session's cart.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Bookstore Client Architecture                      │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                  Presentation (apps/cli)                         │  │
//! │  └───────┬───────────────────┬───────────────────┬──────────────────┘  │
//! │          ▼                   ▼                   ▼                      │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────┐    │
//! │  │   CartStore    │  │    Catalog     │  │   AdminConsole         │    │
//! │  │                │  │                │  │                        │    │
//! │  │ watch channel  │  │ load once,     │  │ books + orders,        │    │
//! │  │ full refetch   │  │ filter locally │  │ refetch on mutation    │    │
//! │  │ 1s "updated"   │  │                │  │                        │    │
//! │  └───────┬────────┘  └───────┬────────┘  └───────────┬────────────┘    │
//! │          └───────────────────┼───────────────────────┘                  │
//! │                              ▼                                          │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Arc<dyn BookstoreApi>          Arc<dyn TokenProvider>           │  │
//! │  │  BookstoreClient (reqwest)      Memory / Static / File store     │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`api`] - `BookstoreApi` trait and the reqwest `BookstoreClient`
//! - [`store`] - `CartStore`, the cart mirror
//! - [`catalog`] - cached book list with local filtering
//! - [`admin`] - book and order management
//! - [`account`] - registration, login, logout
//! - [`token`] - access tokens and where they are kept
//! - [`config`] - TOML + environment configuration
//! - [`error`] - `ClientError`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use bookstore_client::{BookstoreClient, CartStore, ClientConfig, MemoryTokenStore};
//!
//! # async fn run() -> bookstore_client::ClientResult<()> {
//! let config = ClientConfig::load_or_default(None);
//! let api = Arc::new(BookstoreClient::new(&config)?);
//! let tokens = Arc::new(MemoryTokenStore::new());
//!
//! let store = CartStore::new(api, tokens);
//! store.fetch_cart().await?;
//! println!("items in cart: {}", store.count());
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod account;
pub mod admin;
pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod store;
pub mod token;

#[cfg(test)]
mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use admin::AdminConsole;
pub use api::{BookstoreApi, BookstoreClient};
pub use catalog::Catalog;
pub use config::{ClientConfig, UPDATED_FLAG_DURATION};
pub use error::{ClientError, ClientResult};
pub use store::{CartState, CartStore};
pub use token::{AccessToken, FileTokenStore, MemoryTokenStore, StaticToken, TokenProvider};
