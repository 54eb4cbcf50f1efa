//! CLI command implementations.

pub mod account;
pub mod admin;
pub mod books;
pub mod cart;
pub mod config;
pub mod order;

use bookstore_core::{Money, OrderStatus};
use clap::{Args, Subcommand};
use std::fmt;

/// Arguments for `bookstore books`.
#[derive(Args, Debug)]
pub struct BooksArgs {
    /// Case-insensitive match against title or author
    #[arg(short, long)]
    pub search: Option<String>,

    /// Lowest price to include, e.g. 5 or 4.99
    #[arg(long)]
    pub min_price: Option<String>,

    /// Highest price to include
    #[arg(long)]
    pub max_price: Option<String>,
}

/// Arguments for `bookstore cart`.
#[derive(Args, Debug)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Subcommand, Debug)]
pub enum CartCommand {
    /// Show the cart's lines and totals
    Show,

    /// Add one copy of a book
    Add {
        /// Book ID
        book_id: String,
    },

    /// Set a line's quantity (0 removes the line)
    Set {
        /// Cart line ID
        line_id: String,
        /// New quantity
        quantity: u32,
    },

    /// Add one to a line's quantity
    Inc {
        /// Cart line ID
        line_id: String,
    },

    /// Take one from a line's quantity (removes the line at 1)
    Dec {
        /// Cart line ID
        line_id: String,
    },

    /// Remove a line
    Remove {
        /// Cart line ID
        line_id: String,
    },
}

/// Arguments for `bookstore order`.
#[derive(Args, Debug)]
pub struct OrderArgs {
    #[command(subcommand)]
    pub command: Option<OrderCommand>,
}

#[derive(Subcommand, Debug)]
pub enum OrderCommand {
    /// Turn the current cart into an order
    Place,

    /// List orders
    List,
}

/// Arguments for `bookstore admin`.
#[derive(Args, Debug)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// List all books
    Books,

    /// Create a book
    AddBook(AddBookArgs),

    /// Delete a book
    DeleteBook {
        /// Book ID
        book_id: String,
    },

    /// List all orders
    Orders,

    /// Change an order's status
    SetStatus {
        /// Order ID
        order_id: String,
        /// One of: pending, processing, shipped, delivered
        #[arg(value_parser = parse_status)]
        status: OrderStatus,
    },
}

#[derive(Args, Debug)]
pub struct AddBookArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub author: String,

    /// Price in dollars, e.g. 12.50
    #[arg(long, value_parser = parse_money)]
    pub price: Money,

    #[arg(long)]
    pub image_url: Option<String>,
}

/// Arguments for `bookstore register`.
#[derive(Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,

    #[arg(long)]
    pub confirm_password: String,
}

impl fmt::Debug for RegisterArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterArgs")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("confirm_password", &"<redacted>")
            .finish()
    }
}

/// Arguments for `bookstore login`.
#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Access token issued by the bookstore server
    #[arg(long)]
    pub token: String,
}

/// Arguments for `bookstore config`.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn parse_status(raw: &str) -> Result<OrderStatus, String> {
    raw.parse::<OrderStatus>().map_err(|e| e.to_string())
}

fn parse_money(raw: &str) -> Result<Money, String> {
    raw.trim().parse::<Money>().map_err(|e| e.to_string())
}
