//! # bookstore-core: Pure Domain Logic for the Bookstore Client
//!
//! Everything the client knows about books, carts and orders that does not
//! need a network connection lives here.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Bookstore Client Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation (apps/cli, web UI)                 │   │
//! │  │     Book list ──► Cart view ──► Place order ──► Admin panel     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          bookstore-client (REST client, Cart Store)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ bookstore-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  catalog  │  │ validation│  │   │
//! │  │   │   Book    │  │   Money   │  │  filter   │  │   forms   │  │   │
//! │  │   │   Order   │  │           │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                    ┌───────────┐                               │   │
//! │  │                    │   cart    │  count, subtotal              │   │
//! │  │                    └───────────┘                               │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Wire/domain types (Book, CartLine, Order, ...)
//! - [`money`] - Integer-cent money with decimal wire encoding
//! - [`cart`] - Read-only cart projection and its derived fields
//! - [`catalog`] - Client-side book filtering
//! - [`validation`] - Form validation for admin and registration flows
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use bookstore_core::catalog::{filter_books, CatalogFilter};
//! use bookstore_core::{Book, Money};
//!
//! let books = vec![
//!     Book::new("1", "Dune", "Frank Herbert", Money::from_cents(999)),
//!     Book::new("2", "Emma", "Jane Austen", Money::from_cents(1999)),
//! ];
//!
//! let filter = CatalogFilter::from_inputs("herb", "", "15").unwrap();
//! let hits = filter_books(&books, &filter);
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].title, "Dune");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::Cart;
pub use catalog::CatalogFilter;
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Quantity sent by a single "add to cart" action.
pub const ADD_TO_CART_QUANTITY: u32 = 1;

/// Maximum quantity of a single cart line.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
/// Checked client-side before an update request is sent.
pub const MAX_ITEM_QUANTITY: u32 = 999;
