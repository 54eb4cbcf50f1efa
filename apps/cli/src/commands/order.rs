//! `bookstore order`: checkout and order history.

use anyhow::Result;
use bookstore_client::{BookstoreApi, ClientError};

use super::{OrderArgs, OrderCommand};
use crate::context::Context;
use crate::output::status_badge;

pub async fn run(args: OrderArgs, ctx: &Context) -> Result<()> {
    match args.command.unwrap_or(OrderCommand::List) {
        OrderCommand::Place => place(ctx).await,
        OrderCommand::List => list(ctx).await,
    }
}

async fn place(ctx: &Context) -> Result<()> {
    let store = ctx.cart_store();
    let order = store.place_order().await?;
    store.teardown();

    if ctx.output.is_json() {
        ctx.output.json(&order);
        return Ok(());
    }

    ctx.output.success(&format!("Order #{} placed", order.short_id()));
    ctx.output.kv("total", &order.total.to_string());
    ctx.output.kv("status", &status_badge(order.status));
    Ok(())
}

async fn list(ctx: &Context) -> Result<()> {
    let token = ctx.tokens.token().ok_or(ClientError::NotAuthenticated)?;
    let orders = ctx.api.list_orders(&token).await?;

    ctx.output.header("Orders");
    ctx.output.orders(&orders);
    Ok(())
}
