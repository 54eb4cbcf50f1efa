//! # Catalog Filtering
//!
//! Client-side narrowing of the book list by free text and a price range.
//!
//! ## Matching Rule
//! ```text
//! book matches  ⇔  text_ok ∧ min_ok ∧ max_ok
//!
//!   text_ok : search is empty
//!             ∨ lowercase(title)  contains lowercase(search)
//!             ∨ lowercase(author) contains lowercase(search)
//!   min_ok  : min unset ∨ price ≥ min
//!   max_ok  : max unset ∨ price ≤ max
//! ```
//!
//! Filtering never reorders and never talks to the server.
//!
//! Prices compare as whole cents. A wire price with sub-cent digits is
//! rounded when decoded, so `9.994` counts as `$9.99` and passes `max 9.99`.

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Book;
use crate::validation::{parse_price, ValidationResult};

/// A parsed catalog filter. The default matches every book.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogFilter {
    pub search: String,
    pub min_price: Option<Money>,
    pub max_price: Option<Money>,
}

impl CatalogFilter {
    /// Builds a filter from raw form inputs.
    ///
    /// Blank bounds mean "no bound". A bound that is not a price is rejected
    /// rather than silently matching nothing.
    ///
    /// ## Example
    /// ```rust
    /// use bookstore_core::catalog::CatalogFilter;
    ///
    /// let f = CatalogFilter::from_inputs("", "5", "").unwrap();
    /// assert_eq!(f.min_price.map(|m| m.cents()), Some(500));
    /// assert!(f.max_price.is_none());
    /// assert!(CatalogFilter::from_inputs("", "abc", "").is_err());
    /// ```
    pub fn from_inputs(search: &str, min_price: &str, max_price: &str) -> ValidationResult<Self> {
        Ok(CatalogFilter {
            search: search.trim().to_string(),
            min_price: parse_bound(min_price, "min price")?,
            max_price: parse_bound(max_price, "max price")?,
        })
    }

    /// True when the filter matches every book.
    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.min_price.is_none() && self.max_price.is_none()
    }

    /// Tests a single book.
    pub fn matches(&self, book: &Book) -> bool {
        self.matches_text(book) && self.matches_price(book.price)
    }

    fn matches_text(&self, book: &Book) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        book.title.to_lowercase().contains(&needle) || book.author.to_lowercase().contains(&needle)
    }

    fn matches_price(&self, price: Money) -> bool {
        self.min_price.map_or(true, |min| price >= min)
            && self.max_price.map_or(true, |max| price <= max)
    }
}

fn parse_bound(raw: &str, field: &str) -> ValidationResult<Option<Money>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    parse_price(raw)
        .map(Some)
        .map_err(|err| match err {
            ValidationError::InvalidFormat { reason, .. } => ValidationError::InvalidFormat {
                field: field.to_string(),
                reason,
            },
            ValidationError::OutOfRange { min, max, .. } => ValidationError::OutOfRange {
                field: field.to_string(),
                min,
                max,
            },
            other => other,
        })
}

/// Returns the books matching `filter`, in their original order.
pub fn filter_books(books: &[Book], filter: &CatalogFilter) -> Vec<Book> {
    books.iter().filter(|b| filter.matches(b)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn books() -> Vec<Book> {
        vec![
            Book::new("1", "Dune", "Frank Herbert", Money::from_cents(999)),
            Book::new("2", "Emma", "Jane Austen", Money::from_cents(1999)),
            Book::new("3", "Children of Dune", "Frank Herbert", Money::from_cents(1500)),
            Book::new("4", "Persuasion", "Jane Austen", Money::from_cents(500)),
        ]
    }

    fn ids(books: &[Book]) -> Vec<&str> {
        books.iter().map(|b| b.id.as_str()).collect()
    }

    #[test]
    fn test_empty_filter_returns_everything_in_order() {
        let filter = CatalogFilter::from_inputs("", "", "").unwrap();
        assert!(filter.is_empty());
        assert_eq!(filter_books(&books(), &filter), books());
    }

    #[test]
    fn test_search_is_case_insensitive_over_title_and_author() {
        let filter = CatalogFilter::from_inputs("DUNE", "", "").unwrap();
        assert_eq!(ids(&filter_books(&books(), &filter)), vec!["1", "3"]);

        let filter = CatalogFilter::from_inputs("austen", "", "").unwrap();
        assert_eq!(ids(&filter_books(&books(), &filter)), vec!["2", "4"]);
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let filter = CatalogFilter::from_inputs("", "9.99", "15").unwrap();
        assert_eq!(ids(&filter_books(&books(), &filter)), vec!["1", "3"]);

        let filter = CatalogFilter::from_inputs("", "15.01", "").unwrap();
        assert_eq!(ids(&filter_books(&books(), &filter)), vec!["2"]);
    }

    #[test]
    fn test_sub_cent_prices_compare_after_rounding() {
        let wire = r#"[
            {"_id":"a","title":"A","author":"X","price":9.994},
            {"_id":"b","title":"B","author":"X","price":9.996}
        ]"#;
        let books: Vec<Book> = serde_json::from_str(wire).unwrap();
        let filter = CatalogFilter::from_inputs("", "", "9.99").unwrap();

        let hits = filter_books(&books, &filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "a");
    }

    #[test]
    fn test_search_and_bounds_combine() {
        let filter = CatalogFilter::from_inputs("herbert", "", "10").unwrap();
        assert_eq!(ids(&filter_books(&books(), &filter)), vec!["1"]);
    }

    #[test]
    fn test_no_match_yields_empty() {
        let filter = CatalogFilter::from_inputs("tolkien", "", "").unwrap();
        assert!(filter_books(&books(), &filter).is_empty());
    }

    #[test]
    fn test_invalid_bound_is_rejected() {
        let err = CatalogFilter::from_inputs("", "cheap", "").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { ref field, .. } if field == "min price"));
        assert!(CatalogFilter::from_inputs("", "", "-3").is_err());
    }

    #[test]
    fn test_whitespace_bounds_mean_unbounded() {
        let filter = CatalogFilter::from_inputs("  ", "  ", "\t").unwrap();
        assert!(filter.is_empty());
    }
}
