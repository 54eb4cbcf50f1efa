//! `bookstore books`: the catalog with local filtering.

use anyhow::Result;
use bookstore_core::CatalogFilter;

use super::BooksArgs;
use crate::context::Context;

pub async fn run(args: BooksArgs, ctx: &Context) -> Result<()> {
    // Bad bounds are rejected before anything is fetched.
    let filter = CatalogFilter::from_inputs(
        args.search.as_deref().unwrap_or(""),
        args.min_price.as_deref().unwrap_or(""),
        args.max_price.as_deref().unwrap_or(""),
    )?;

    let catalog = ctx.catalog();
    let books = catalog.filtered(&filter).await?;

    ctx.output.header("Books");
    if !filter.is_empty() {
        let total = catalog.books().await.map(|all| all.len()).unwrap_or(0);
        ctx.output
            .info(&format!("Showing {} of {} books", books.len(), total));
    }
    ctx.output.books(&books);

    Ok(())
}
