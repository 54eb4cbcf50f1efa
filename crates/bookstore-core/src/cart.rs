//! # Cart Projection
//!
//! Read-only view of the server-side cart and its derived fields.
//!
//! ## Full Replacement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET /api/cart ──► Vec<CartLine> ──► Cart::from_lines(..)               │
//! │                                          │                              │
//! │                                          ├── count()    Σ quantity      │
//! │                                          └── subtotal() Σ line_total    │
//! │                                                                         │
//! │  There is no add/remove here. Every mutation goes to the server and    │
//! │  the next read builds a brand new Cart.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::CartLine;

/// The cart as last read from the server.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart (no token, or logged out).
    pub fn empty() -> Self {
        Cart::default()
    }

    /// Wraps lines exactly as the server returned them, order preserved.
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        Cart { lines }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of line quantities (the badge count).
    pub fn count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of line totals. Display only.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Looks up a line by its line id.
    pub fn line(&self, line_id: &str) -> CoreResult<&CartLine> {
        self.lines
            .iter()
            .find(|l| l.id == line_id)
            .ok_or_else(|| CoreError::LineNotFound(line_id.to_string()))
    }

    /// The line holding a given book, if any.
    pub fn line_for_book(&self, book_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.book.id == book_id)
    }

    pub fn into_lines(self) -> Vec<CartLine> {
        self.lines
    }
}

/// Cart totals summary for presentation output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub item_count: u64,
    pub subtotal: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.len(),
            item_count: cart.count(),
            subtotal: cart.subtotal(),
        }
    }
}
