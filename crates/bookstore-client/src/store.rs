//! # Cart Store
//!
//! Client-side mirror of the server cart for the current session.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Cart Store                                      │
//! │                                                                         │
//! │  add_item / update_quantity / remove_item / place_order                 │
//! │       │                                                                 │
//! │       ├── token? ── None ──► Err(NotAuthenticated)   (no request)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  mutate on server ── Err ──► return error, state untouched             │
//! │       │                                                                 │
//! │       ▼ Ok                                                              │
//! │  GET /api/cart ── Err ──► warn!, mutation still Ok                     │
//! │       │                                                                 │
//! │       ▼ Ok                                                              │
//! │  watch::Sender ── whole Cart swapped ──► subscribers notified          │
//! │       │                                                                 │
//! │       └── (add only) just_updated = true ──► cleared after 1s          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ordering
//! Only the mutate → refetch pair is ordered. Two concurrent mutations are
//! not sequenced; whichever refetch resolves last is what subscribers see.
//!
//! ## Cancellation
//! The store owns a [`CancellationToken`]. Every network await races it, and
//! nothing is written to state once it fires. [`CartStore::teardown`]
//! cancels it; so does cancelling the parent token passed to
//! [`CartStore::with_parent`].

use bookstore_core::{
    validation::validate_quantity, AddToCart, Cart, Order, UpdateCartLine, ADD_TO_CART_QUANTITY,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::api::BookstoreApi;
use crate::config::UPDATED_FLAG_DURATION;
use crate::error::{ClientError, ClientResult};
use crate::token::{AccessToken, TokenProvider};

// =============================================================================
// Cart State
// =============================================================================

/// What subscribers observe.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
    /// The cart as of the last successful fetch.
    pub cart: Cart,

    /// True for a short window after a successful add.
    pub just_updated: bool,

    /// When the last successful add completed.
    pub updated_at: Option<Instant>,
}

impl CartState {
    pub fn count(&self) -> u64 {
        self.cart.count()
    }
}

// =============================================================================
// Cart Store
// =============================================================================

/// Mirrors the server cart and exposes cart mutations.
pub struct CartStore {
    api: Arc<dyn BookstoreApi>,
    tokens: Arc<dyn TokenProvider>,
    state: Arc<watch::Sender<CartState>>,
    flag_duration: Duration,
    cancel: CancellationToken,
}

impl CartStore {
    /// Creates an empty store. Nothing is fetched until [`fetch_cart`](Self::fetch_cart).
    pub fn new(api: Arc<dyn BookstoreApi>, tokens: Arc<dyn TokenProvider>) -> Self {
        let (state, _) = watch::channel(CartState::default());
        CartStore {
            api,
            tokens,
            state: Arc::new(state),
            flag_duration: UPDATED_FLAG_DURATION,
            cancel: CancellationToken::new(),
        }
    }

    /// Ties the store's lifetime to `parent`: cancelling it tears the store down.
    pub fn with_parent(mut self, parent: &CancellationToken) -> Self {
        self.cancel = parent.child_token();
        self
    }

    /// Overrides how long the "just updated" flag stays raised.
    pub fn with_updated_flag_duration(mut self, duration: Duration) -> Self {
        self.flag_duration = duration;
        self
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// A copy of the current state.
    pub fn snapshot(&self) -> CartState {
        self.state.borrow().clone()
    }

    /// A receiver notified on every cart replacement and flag change.
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.state.subscribe()
    }

    /// Sum of line quantities.
    pub fn count(&self) -> u64 {
        self.state.borrow().count()
    }

    pub fn is_just_updated(&self) -> bool {
        self.state.borrow().just_updated
    }

    pub fn is_torn_down(&self) -> bool {
        self.cancel.is_cancelled()
    }

    // =========================================================================
    // Fetch
    // =========================================================================

    /// Replaces local state with the server's cart.
    ///
    /// Without a token this does nothing and succeeds. On failure the
    /// previous state is kept and the error is returned.
    pub async fn fetch_cart(&self) -> ClientResult<()> {
        let Some(token) = self.tokens.token() else {
            debug!("No session token, skipping cart fetch");
            return Ok(());
        };
        self.fetch_with(&token).await
    }

    async fn fetch_with(&self, token: &AccessToken) -> ClientResult<()> {
        let lines = match self.guarded(self.api.get_cart(token)).await {
            Ok(lines) => lines,
            Err(ClientError::Cancelled) => return Err(ClientError::Cancelled),
            Err(e) => {
                warn!(error = %e, "Cart fetch failed, keeping previous cart");
                return Err(e);
            }
        };

        let cart = Cart::from_lines(lines);
        info!(lines = cart.len(), count = cart.count(), "Cart replaced");
        self.state.send_modify(|state| state.cart = cart);
        Ok(())
    }

    /// Refetch after a successful mutation. Only cancellation is reported.
    async fn refetch_after_mutation(&self, token: &AccessToken) -> ClientResult<()> {
        match self.fetch_with(token).await {
            Err(ClientError::Cancelled) => Err(ClientError::Cancelled),
            Err(e) => {
                warn!(error = %e, "Refetch after cart mutation failed");
                Ok(())
            }
            Ok(()) => Ok(()),
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds one copy of a book, refetches, and raises the "just updated" flag.
    pub async fn add_item(&self, book_id: &str) -> ClientResult<()> {
        let token = self.require_token()?;
        let body = AddToCart {
            book_id: book_id.to_string(),
            quantity: ADD_TO_CART_QUANTITY,
        };

        self.guarded(self.api.add_to_cart(&token, &body)).await?;
        debug!(book_id, "Book added to cart");

        self.refetch_after_mutation(&token).await?;
        self.raise_updated_flag();
        Ok(())
    }

    /// Sets a line's quantity. Zero removes the line.
    pub async fn update_quantity(&self, line_id: &str, quantity: u32) -> ClientResult<()> {
        let token = self.require_token()?;
        if quantity == 0 {
            return self.remove_with(&token, line_id).await;
        }
        validate_quantity(quantity)?;

        let body = UpdateCartLine { quantity };
        self.guarded(self.api.update_cart_line(&token, line_id, &body))
            .await?;
        debug!(line_id, quantity, "Cart line quantity updated");

        self.refetch_after_mutation(&token).await
    }

    /// Bumps a line's quantity by one.
    pub async fn increment(&self, line_id: &str) -> ClientResult<()> {
        self.require_token()?;
        let quantity = self.current_quantity(line_id)?;
        self.update_quantity(line_id, quantity.saturating_add(1)).await
    }

    /// Drops a line's quantity by one; at one this removes the line.
    pub async fn decrement(&self, line_id: &str) -> ClientResult<()> {
        self.require_token()?;
        let quantity = self.current_quantity(line_id)?;
        self.update_quantity(line_id, quantity.saturating_sub(1)).await
    }

    /// Removes a line.
    pub async fn remove_item(&self, line_id: &str) -> ClientResult<()> {
        let token = self.require_token()?;
        self.remove_with(&token, line_id).await
    }

    async fn remove_with(&self, token: &AccessToken, line_id: &str) -> ClientResult<()> {
        self.guarded(self.api.remove_cart_line(token, line_id))
            .await?;
        debug!(line_id, "Cart line removed");

        self.refetch_after_mutation(token).await
    }

    /// Places an order for the current cart. The server empties the cart,
    /// which the refetch then reflects.
    pub async fn place_order(&self) -> ClientResult<Order> {
        let token = self.require_token()?;
        let order = self.guarded(self.api.place_order(&token)).await?;
        info!(order_id = %order.id, total = %order.total, "Order placed");

        self.refetch_after_mutation(&token).await?;
        Ok(order)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Discards local state (logout). The server cart is untouched.
    pub fn reset(&self) {
        self.state.send_replace(CartState::default());
        info!("Cart state discarded");
    }

    /// Cancels in-flight work. Operations resolving afterwards return
    /// [`ClientError::Cancelled`] and leave state alone.
    pub fn teardown(&self) {
        if !self.cancel.is_cancelled() {
            debug!("Cart store torn down");
        }
        self.cancel.cancel();
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn require_token(&self) -> ClientResult<AccessToken> {
        self.tokens.token().ok_or(ClientError::NotAuthenticated)
    }

    fn current_quantity(&self, line_id: &str) -> ClientResult<u32> {
        let state = self.state.borrow();
        Ok(state.cart.line(line_id)?.quantity)
    }

    /// Races `fut` against cancellation and refuses results that arrive late.
    async fn guarded<T>(&self, fut: impl Future<Output = ClientResult<T>>) -> ClientResult<T> {
        if self.cancel.is_cancelled() {
            return Err(ClientError::Cancelled);
        }
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(ClientError::Cancelled),
            result = fut => {
                if self.cancel.is_cancelled() {
                    Err(ClientError::Cancelled)
                } else {
                    result
                }
            }
        }
    }

    /// Every add arms its own clear timer; the first to fire lowers the
    /// flag even if a later add raised it again.
    fn raise_updated_flag(&self) {
        self.state.send_modify(|state| {
            state.just_updated = true;
            state.updated_at = Some(Instant::now());
        });

        let state = Arc::clone(&self.state);
        let cancel = self.cancel.clone();
        let duration = self.flag_duration;

        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = tokio::time::sleep(duration) => {
                    state.send_if_modified(|state| {
                        let was_set = state.just_updated;
                        state.just_updated = false;
                        was_set
                    });
                    debug!("Cart updated flag cleared");
                }
            }
        });
    }
}

impl Drop for CartStore {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
