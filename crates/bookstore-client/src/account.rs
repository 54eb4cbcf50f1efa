//! Account flows: registration, and session start/end.
//!
//! Login itself happens outside this client; a token obtained there is
//! handed to [`login`] and kept by the [`TokenProvider`].

use bookstore_core::validation::{validate_registration, RegistrationForm};
use tracing::info;

use crate::api::BookstoreApi;
use crate::error::{ClientError, ClientResult};
use crate::store::CartStore;
use crate::token::{AccessToken, TokenProvider};

/// Registers a new account.
///
/// The form is checked locally first (required fields, matching password
/// confirmation). A rejection from the server carries its `message`.
pub async fn register(api: &dyn BookstoreApi, form: &RegistrationForm) -> ClientResult<()> {
    let registration = validate_registration(form)?;
    api.register(&registration).await?;
    info!(email = %registration.email, "Account registered");
    Ok(())
}

/// Stores an externally obtained token as the current session.
pub fn login(tokens: &dyn TokenProvider, raw_token: &str) -> ClientResult<()> {
    let token = AccessToken::new(raw_token).ok_or_else(|| {
        ClientError::Validation(bookstore_core::ValidationError::Required {
            field: "token".to_string(),
        })
    })?;
    tokens.set_token(token)?;
    info!("Session started");
    Ok(())
}

/// Ends the session: forgets the token and discards the local cart.
pub fn logout(tokens: &dyn TokenProvider, store: Option<&CartStore>) -> ClientResult<()> {
    tokens.clear()?;
    if let Some(store) = store {
        store.reset();
    }
    info!("Session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{book, Call, FakeApi};
    use crate::token::MemoryTokenStore;
    use std::sync::Arc;

    fn form() -> RegistrationForm {
        RegistrationForm {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "pw".into(),
            confirm_password: "pw".into(),
        }
    }

    #[tokio::test]
    async fn test_register_sends_payload() {
        let api = FakeApi::new();
        register(&api, &form()).await.unwrap();
        assert_eq!(api.calls(), vec![Call::Register("ada@example.com".into())]);
    }

    #[tokio::test]
    async fn test_register_mismatch_makes_no_call() {
        let api = FakeApi::new();
        let mut bad = form();
        bad.confirm_password = "other".into();

        let err = register(&api, &bad).await.unwrap_err();

        assert!(matches!(err, ClientError::Validation(_)));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_register_server_rejection() {
        let api = FakeApi::new();
        api.fail("register", 409);

        let err = register(&api, &form()).await.unwrap_err();
        assert!(matches!(err, ClientError::Http { status: 409, .. }));
    }

    #[test]
    fn test_login_rejects_blank_token() {
        let tokens = MemoryTokenStore::new();
        assert!(login(&tokens, "  ").is_err());
        login(&tokens, "abc").unwrap();
        assert!(tokens.is_signed_in());
    }

    #[tokio::test]
    async fn test_logout_clears_token_and_cart() {
        let api = Arc::new(FakeApi::with_books(vec![book("b1", "Dune", 999)]));
        let tokens = Arc::new(MemoryTokenStore::with_token(AccessToken::new("t").unwrap()));
        let store = CartStore::new(api.clone(), tokens.clone());
        store.add_item("b1").await.unwrap();
        assert_eq!(store.count(), 1);

        logout(&*tokens, Some(&store)).unwrap();

        assert!(!tokens.is_signed_in());
        assert_eq!(store.count(), 0);
        assert!(matches!(store.add_item("b1").await, Err(ClientError::NotAuthenticated)));
    }
}
