//! # Domain Types
//!
//! Wire and domain types shared by every layer of the bookstore client.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Book       │   │    CartLine     │   │     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  _id            │◄──│  _id            │   │  _id            │       │
//! │  │  title          │   │  book (Book)    │   │  user           │       │
//! │  │  author         │   │  quantity       │   │  items          │       │
//! │  │  price          │   └─────────────────┘   │  total          │       │
//! │  │  imageUrl?      │                         │  status         │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! │                                                                         │
//! │  Request bodies: NewBook, Registration, AddToCart, UpdateCartLine,     │
//! │                  UpdateOrderStatus                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Server-Owned Identity
//! Every entity id is the server's opaque `_id` string. The client never
//! mints ids; it only echoes them back in request paths.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Book
// =============================================================================

/// A book in the catalog. Immutable from the client's perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Server identifier.
    #[serde(rename = "_id")]
    pub id: String,

    pub title: String,

    pub author: String,

    /// Unit price.
    #[ts(type = "number")]
    pub price: Money,

    /// Cover image; presentation falls back to a placeholder when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Book {
    /// Creates a book without a cover image.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        price: Money,
    ) -> Self {
        Book {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            price,
            image_url: None,
        }
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One book/quantity pairing in the server-side cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Line identifier (not the book id).
    #[serde(rename = "_id")]
    pub id: String,

    /// The book, populated by the server.
    pub book: Book,

    pub quantity: u32,
}

impl CartLine {
    /// Price × quantity. Display only; the server computes order totals.
    pub fn line_total(&self) -> Money {
        self.book.price * self.quantity
    }
}

// =============================================================================
// Orders
// =============================================================================

/// Order status as managed from the admin panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    /// A status this client version does not know about.
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// Statuses an admin may assign.
    pub const ASSIGNABLE: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        OrderStatus::ASSIGNABLE
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: OrderStatus::ASSIGNABLE
                    .iter()
                    .map(|s| s.as_str().to_string())
                    .collect(),
            })
    }
}

/// The customer an order belongs to, as populated by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderCustomer {
    #[serde(default, rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A line of a placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub book: Book,

    pub quantity: u32,

    /// Unit price captured by the server at order time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "number | null")]
    pub price: Option<Money>,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub user: Option<OrderCustomer>,

    #[serde(default)]
    pub items: Vec<OrderItem>,

    #[ts(type = "number")]
    pub total: Money,

    #[serde(default)]
    pub status: OrderStatus,

    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Last six characters of the id, as shown in the admin order table.
    pub fn short_id(&self) -> &str {
        let start = self
            .id
            .char_indices()
            .rev()
            .nth(5)
            .map(|(i, _)| i)
            .unwrap_or(0);
        &self.id[start..]
    }

    /// Customer name, or a placeholder when the server did not populate it.
    pub fn customer_name(&self) -> &str {
        self.user.as_ref().map(|u| u.name.as_str()).unwrap_or("-")
    }
}

// =============================================================================
// Request Bodies
// =============================================================================

/// Body of `POST /api/cart`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AddToCart {
    pub book_id: String,
    pub quantity: u32,
}

/// Body of `PUT /api/cart/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UpdateCartLine {
    pub quantity: u32,
}

/// Body of `PUT /api/orders/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UpdateOrderStatus {
    pub status: OrderStatus,
}

/// Body of `POST /api/books`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    pub title: String,

    pub author: String,

    #[ts(type = "number")]
    pub price: Money,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Body of `POST /api/auth/register`.
#[derive(Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
