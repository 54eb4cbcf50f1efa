//! Output formatting for the CLI.
//!
//! Human output is styled with `console`; `--json` suppresses it and prints
//! only machine-readable documents on stdout.

use bookstore_core::{Book, CartLine, Money, Order, OrderStatus};
use console::style;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Errors are printed in both modes; JSON mode emits `{"error": ...}`.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Only shown with `--verbose`.
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Prints a JSON document; a no-op outside JSON mode.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if !self.json {
            return;
        }
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        println!("  {}", format_row(cols, widths));
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    // =========================================================================
    // Domain Tables
    // =========================================================================

    pub fn books(&self, books: &[Book]) {
        if self.json {
            self.json(&books);
            return;
        }
        if books.is_empty() {
            self.info("No books found.");
            return;
        }
        let widths = [24, 32, 24, 10];
        self.table_row(&["ID", "TITLE", "AUTHOR", "PRICE"], &widths);
        for book in books {
            self.table_row(
                &[
                    &book.id,
                    &truncate(&book.title, widths[1]),
                    &truncate(&book.author, widths[2]),
                    &book.price.to_string(),
                ],
                &widths,
            );
        }
    }

    pub fn cart_lines(&self, lines: &[CartLine], subtotal: Money) {
        if lines.is_empty() {
            self.info("Your cart is empty.");
            return;
        }
        let widths = [24, 32, 5, 10, 10];
        self.table_row(&["LINE", "TITLE", "QTY", "PRICE", "TOTAL"], &widths);
        for line in lines {
            self.table_row(
                &[
                    &line.id,
                    &truncate(&line.book.title, widths[1]),
                    &line.quantity.to_string(),
                    &line.book.price.to_string(),
                    &line.line_total().to_string(),
                ],
                &widths,
            );
        }
        self.kv("subtotal", &style(subtotal).bold().to_string());
    }

    pub fn orders(&self, orders: &[Order]) {
        if self.json {
            self.json(&orders);
            return;
        }
        if orders.is_empty() {
            self.info("No orders yet.");
            return;
        }
        let widths = [8, 20, 6, 10, 12, 10];
        self.table_row(&["ORDER", "CUSTOMER", "ITEMS", "TOTAL", "STATUS", "DATE"], &widths);
        for order in orders {
            let items: u64 = order.items.iter().map(|i| u64::from(i.quantity)).sum();
            let date = order
                .created_at
                .map(|at| at.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string());
            self.table_row(
                &[
                    order.short_id(),
                    &truncate(order.customer_name(), widths[1]),
                    &items.to_string(),
                    &order.total.to_string(),
                    &pad_badge(order.status, widths[4]),
                    &date,
                ],
                &widths,
            );
        }
    }
}

/// Status badge for order states.
pub fn status_badge(status: OrderStatus) -> String {
    let label = status.as_str();
    match status {
        OrderStatus::Delivered => style(label).green().to_string(),
        OrderStatus::Shipped => style(label).cyan().to_string(),
        OrderStatus::Processing => style(label).yellow().to_string(),
        OrderStatus::Pending => style(label).dim().to_string(),
        OrderStatus::Unknown => style(label).red().to_string(),
    }
}

/// Styling escapes count toward `{:width$}`, so pad the plain label first.
fn pad_badge(status: OrderStatus, width: usize) -> String {
    let padding = width.saturating_sub(status.as_str().chars().count());
    format!("{}{}", status_badge(status), " ".repeat(padding))
}

fn format_row(cols: &[&str], widths: &[usize]) -> String {
    cols.iter()
        .zip(widths.iter())
        .map(|(col, width)| format!("{:width$}", col, width = width))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Shortens `text` to `max` characters, marking the cut with `…`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}
