//! # Bookstore API
//!
//! The single seam between this crate and the network.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Method  Path                  Auth   Body                 Returns      │
//! │  ──────  ────────────────────  ─────  ───────────────────  ──────────── │
//! │  GET     /api/books            -      -                    [Book]       │
//! │  POST    /api/books            yes    NewBook              -            │
//! │  DELETE  /api/books/{id}       yes    -                    -            │
//! │  GET     /api/cart             yes    -                    [CartLine]   │
//! │  POST    /api/cart             yes    {bookId, quantity}   -            │
//! │  PUT     /api/cart/{id}        yes    {quantity}           -            │
//! │  DELETE  /api/cart/{id}        yes    -                    -            │
//! │  GET     /api/orders           yes    -                    [Order]      │
//! │  POST    /api/orders           yes    -                    Order        │
//! │  PUT     /api/orders/{id}      yes    {status}             -            │
//! │  POST    /api/auth/register    -      Registration         -            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Authenticated calls take the token explicitly. Deciding whether a token
//! exists is the caller's job, so a missing token never reaches this layer.

use async_trait::async_trait;
use bookstore_core::{
    AddToCart, Book, CartLine, NewBook, Order, Registration, UpdateCartLine, UpdateOrderStatus,
};
use reqwest::{header, Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::token::AccessToken;

// =============================================================================
// API Trait
// =============================================================================

/// Everything the client can ask of the bookstore server.
///
/// [`BookstoreClient`] is the HTTP implementation; tests substitute an
/// in-memory fake.
#[async_trait]
pub trait BookstoreApi: Send + Sync {
    // ---------- Catalog ----------
    async fn list_books(&self) -> ClientResult<Vec<Book>>;

    async fn create_book(&self, token: &AccessToken, book: &NewBook) -> ClientResult<()>;

    async fn delete_book(&self, token: &AccessToken, book_id: &str) -> ClientResult<()>;

    // ---------- Cart ----------
    async fn get_cart(&self, token: &AccessToken) -> ClientResult<Vec<CartLine>>;

    async fn add_to_cart(&self, token: &AccessToken, body: &AddToCart) -> ClientResult<()>;

    async fn update_cart_line(
        &self,
        token: &AccessToken,
        line_id: &str,
        body: &UpdateCartLine,
    ) -> ClientResult<()>;

    async fn remove_cart_line(&self, token: &AccessToken, line_id: &str) -> ClientResult<()>;

    // ---------- Orders ----------
    async fn list_orders(&self, token: &AccessToken) -> ClientResult<Vec<Order>>;

    async fn place_order(&self, token: &AccessToken) -> ClientResult<Order>;

    async fn update_order_status(
        &self,
        token: &AccessToken,
        order_id: &str,
        body: &UpdateOrderStatus,
    ) -> ClientResult<()>;

    // ---------- Accounts ----------
    async fn register(&self, registration: &Registration) -> ClientResult<()>;
}

// =============================================================================
// HTTP Client
// =============================================================================

/// Error body shape used by the server: `{ "message": "..." }`.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// reqwest-backed [`BookstoreApi`].
#[derive(Debug, Clone)]
pub struct BookstoreClient {
    base_url: Url,
    http: Client,
}

impl BookstoreClient {
    /// Builds a client from validated configuration.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        config.validate()?;
        let base_url = Url::parse(config.base_url())?;
        let http = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ClientError::InvalidConfig(format!("HTTP client: {}", e)))?;

        Ok(BookstoreClient { base_url, http })
    }

    /// Builds a client for `base_url` with default timeouts.
    pub fn with_base_url(base_url: &str) -> ClientResult<Self> {
        let mut config = ClientConfig::default();
        config.api.base_url = base_url.to_string();
        Self::new(&config)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Joins path segments onto the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(
        &self,
        method: Method,
        segments: &[&str],
        token: Option<&AccessToken>,
    ) -> ClientResult<RequestBuilder> {
        let url = self.endpoint(segments)?;
        debug!(%method, path = url.path(), authenticated = token.is_some(), "API request");

        let builder = self.http.request(method, url);
        Ok(match token {
            Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {}", token.expose())),
            None => builder,
        })
    }

    /// Sends the request and maps non-success statuses to [`ClientError::Http`].
    async fn send(&self, builder: RequestBuilder) -> ClientResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty());
        debug!(status = status.as_u16(), ?message, "API error response");

        Err(ClientError::Http {
            status: status.as_u16(),
            message,
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ClientResult<T> {
        let response = self.send(builder).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl BookstoreApi for BookstoreClient {
    async fn list_books(&self) -> ClientResult<Vec<Book>> {
        let req = self.request(Method::GET, &["api", "books"], None)?;
        self.send_json(req).await
    }

    async fn create_book(&self, token: &AccessToken, book: &NewBook) -> ClientResult<()> {
        let req = self.request(Method::POST, &["api", "books"], Some(token))?.json(book);
        self.send(req).await?;
        Ok(())
    }

    async fn delete_book(&self, token: &AccessToken, book_id: &str) -> ClientResult<()> {
        let req = self.request(Method::DELETE, &["api", "books", book_id], Some(token))?;
        self.send(req).await?;
        Ok(())
    }

    async fn get_cart(&self, token: &AccessToken) -> ClientResult<Vec<CartLine>> {
        let req = self.request(Method::GET, &["api", "cart"], Some(token))?;
        self.send_json(req).await
    }

    async fn add_to_cart(&self, token: &AccessToken, body: &AddToCart) -> ClientResult<()> {
        let req = self.request(Method::POST, &["api", "cart"], Some(token))?.json(body);
        self.send(req).await?;
        Ok(())
    }

    async fn update_cart_line(
        &self,
        token: &AccessToken,
        line_id: &str,
        body: &UpdateCartLine,
    ) -> ClientResult<()> {
        let req = self
            .request(Method::PUT, &["api", "cart", line_id], Some(token))?
            .json(body);
        self.send(req).await?;
        Ok(())
    }

    async fn remove_cart_line(&self, token: &AccessToken, line_id: &str) -> ClientResult<()> {
        let req = self.request(Method::DELETE, &["api", "cart", line_id], Some(token))?;
        self.send(req).await?;
        Ok(())
    }

    async fn list_orders(&self, token: &AccessToken) -> ClientResult<Vec<Order>> {
        let req = self.request(Method::GET, &["api", "orders"], Some(token))?;
        self.send_json(req).await
    }

    async fn place_order(&self, token: &AccessToken) -> ClientResult<Order> {
        let req = self.request(Method::POST, &["api", "orders"], Some(token))?;
        self.send_json(req).await
    }

    async fn update_order_status(
        &self,
        token: &AccessToken,
        order_id: &str,
        body: &UpdateOrderStatus,
    ) -> ClientResult<()> {
        let req = self
            .request(Method::PUT, &["api", "orders", order_id], Some(token))?
            .json(body);
        self.send(req).await?;
        Ok(())
    }

    async fn register(&self, registration: &Registration) -> ClientResult<()> {
        let req = self
            .request(Method::POST, &["api", "auth", "register"], None)?
            .json(registration);
        self.send(req).await?;
        Ok(())
    }
}
