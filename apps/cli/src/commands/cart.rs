//! `bookstore cart`: view and change the session's cart.
//!
//! Every mutation goes through [`CartStore`], which refetches the whole cart
//! afterwards; what is printed is always the server's view.

use anyhow::Result;
use bookstore_client::{CartState, CartStore};
use bookstore_core::cart::CartTotals;
use serde_json::json;

use super::{CartArgs, CartCommand};
use crate::context::Context;

pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let store = ctx.cart_store();

    match args.command {
        CartCommand::Show => {
            require_session(ctx)?;
            store.fetch_cart().await?;
        }
        CartCommand::Add { book_id } => {
            store.add_item(&book_id).await?;
            ctx.output.success(&format!("Added {} to cart", book_id));
        }
        CartCommand::Set { line_id, quantity } => {
            store.update_quantity(&line_id, quantity).await?;
            if quantity == 0 {
                ctx.output.success(&format!("Removed line {}", line_id));
            } else {
                ctx.output
                    .success(&format!("Line {} set to {}", line_id, quantity));
            }
        }
        CartCommand::Inc { line_id } => {
            load_current(&store).await?;
            store.increment(&line_id).await?;
            ctx.output.success(&format!("Line {} increased", line_id));
        }
        CartCommand::Dec { line_id } => {
            load_current(&store).await?;
            store.decrement(&line_id).await?;
            ctx.output.success(&format!("Line {} decreased", line_id));
        }
        CartCommand::Remove { line_id } => {
            store.remove_item(&line_id).await?;
            ctx.output.success(&format!("Removed line {}", line_id));
        }
    }

    let state = store.snapshot();
    ctx.output.debug(&format!(
        "{} lines mirrored, just_updated={}",
        state.cart.len(),
        state.just_updated
    ));
    render(ctx, &state);
    store.teardown();
    Ok(())
}

/// `show` with no session would print an empty cart; say why instead.
fn require_session(ctx: &Context) -> Result<()> {
    if !ctx.tokens.is_signed_in() {
        return Err(bookstore_client::ClientError::NotAuthenticated.into());
    }
    Ok(())
}

/// Increment and decrement work from the mirrored quantity.
async fn load_current(store: &CartStore) -> Result<()> {
    store.fetch_cart().await?;
    Ok(())
}

fn render(ctx: &Context, state: &CartState) {
    let totals = CartTotals::from(&state.cart);

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "lines": state.cart.lines(),
            "count": totals.item_count,
            "subtotal": totals.subtotal,
            "justUpdated": state.just_updated,
        }));
        return;
    }

    ctx.output.header(&format!("Cart ({} items)", totals.item_count));
    ctx.output.cart_lines(state.cart.lines(), totals.subtotal);
}
