//! # Validation Module
//!
//! Input validation for the bookstore client's forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation (CLI args / web form)                           │
//! │  ├── Raw strings typed by the user                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Prices parsed exactly into Money                                  │
//! │  ├── Quantities bounded by MAX_ITEM_QUANTITY                           │
//! │  └── Admin and registration payloads checked before sending            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Bookstore API                                                │
//! │  └── Authoritative checks (uniqueness, roles, stock)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bookstore_core::validation::{parse_price, validate_quantity};
//!
//! assert_eq!(parse_price("12.50").unwrap().cents(), 1250);
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{NewBook, Registration};
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_TITLE_LEN: usize = 200;
const MAX_AUTHOR_LEN: usize = 200;
const MAX_NAME_LEN: usize = 100;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity for an add or an update.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// A zero update never reaches this check: the cart store turns it into a
/// removal first.
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: i64::from(MAX_ITEM_QUANTITY),
        });
    }

    Ok(())
}

/// Parses a user-typed price such as `12`, `12.5`, `$12.50`.
///
/// ## Rules
/// - Exact decimal, at most two fractional digits
/// - Must be non-negative (zero is allowed)
///
/// ## Example
/// ```rust
/// use bookstore_core::validation::parse_price;
///
/// assert_eq!(parse_price("$9.99").unwrap().cents(), 999);
/// assert!(parse_price("-1").is_err());
/// assert!(parse_price("1.999").is_err());
/// ```
pub fn parse_price(raw: &str) -> ValidationResult<Money> {
    let price: Money = raw.parse()?;
    validate_price(price)?;
    Ok(price)
}

/// Validates an already-parsed price.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

fn require(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates an optional cover image URL.
///
/// ## Rules
/// - Must parse as an absolute URL
/// - Scheme must be `http` or `https`
pub fn validate_image_url(raw: &str) -> ValidationResult<()> {
    let parsed = url::Url::parse(raw.trim()).map_err(|e| ValidationError::InvalidFormat {
        field: "image url".to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ValidationError::InvalidFormat {
            field: "image url".to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

/// Validates an email address loosely: one `@` with text on both sides.
///
/// The server remains the authority on deliverability and uniqueness.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(())
        }
        _ => Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@example.com".to_string(),
        }),
    }
}

// =============================================================================
// Payload Validators
// =============================================================================

/// Validates an admin "add book" payload.
///
/// ## Rules
/// - Title and author required (≤ 200 characters)
/// - Price ≥ 0
/// - Image URL, when present and non-blank, must be http(s)
pub fn validate_new_book(book: &NewBook) -> ValidationResult<()> {
    require("title", &book.title, MAX_TITLE_LEN)?;
    require("author", &book.author, MAX_AUTHOR_LEN)?;
    validate_price(book.price)?;

    if let Some(url) = book.image_url.as_deref() {
        if !url.trim().is_empty() {
            validate_image_url(url)?;
        }
    }

    Ok(())
}

/// Raw registration form, including the confirmation field that is never
/// sent to the server.
#[derive(Clone, Default)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl std::fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Validates a registration form and produces the request payload.
///
/// ## Flow
/// ```text
/// RegistrationForm ──► name/email/password present?
///                  ──► password == confirm_password?
///                  ──► Registration { name, email, password }
/// ```
pub fn validate_registration(form: &RegistrationForm) -> ValidationResult<Registration> {
    require("name", &form.name, MAX_NAME_LEN)?;
    validate_email(&form.email)?;

    if form.password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    if form.password != form.confirm_password {
        return Err(ValidationError::Mismatch {
            field: "confirm password".to_string(),
            other: "password".to_string(),
        });
    }

    Ok(Registration {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        password: form.password.clone(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
