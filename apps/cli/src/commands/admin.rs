//! `bookstore admin`: book and order management.
//!
//! Each mutation prints the list re-read from the server afterwards.

use anyhow::Result;
use bookstore_core::NewBook;

use super::{AdminArgs, AdminCommand};
use crate::context::Context;

pub async fn run(args: AdminArgs, ctx: &Context) -> Result<()> {
    let admin = ctx.admin();

    match args.command {
        AdminCommand::Books => {
            let books = admin.list_books().await?;
            ctx.output.header("Manage Books");
            ctx.output.books(&books);
        }
        AdminCommand::AddBook(book) => {
            let books = admin
                .add_book(NewBook {
                    title: book.title,
                    author: book.author,
                    price: book.price,
                    image_url: book.image_url,
                })
                .await?;
            ctx.output.success("Book added");
            ctx.output.books(&books);
        }
        AdminCommand::DeleteBook { book_id } => {
            let books = admin.delete_book(&book_id).await?;
            ctx.output.success(&format!("Book {} deleted", book_id));
            ctx.output.books(&books);
        }
        AdminCommand::Orders => {
            let orders = admin.list_orders().await?;
            ctx.output.header("Manage Orders");
            ctx.output.orders(&orders);
        }
        AdminCommand::SetStatus { order_id, status } => {
            let orders = admin.update_order_status(&order_id, status).await?;
            ctx.output
                .success(&format!("Order {} is now {}", order_id, status));
            ctx.output.orders(&orders);
        }
    }

    Ok(())
}
