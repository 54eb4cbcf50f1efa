//! In-memory [`BookstoreApi`] used by unit tests.
//!
//! Behaves like a tiny bookstore server: adds merge into existing lines,
//! orders empty the cart. Every call is recorded so tests can assert on
//! exactly what went over the "wire".

use async_trait::async_trait;
use bookstore_core::{
    AddToCart, Book, CartLine, Money, NewBook, Order, OrderItem, OrderStatus, Registration,
    UpdateCartLine, UpdateOrderStatus,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::Notify;

use crate::api::BookstoreApi;
use crate::error::{ClientError, ClientResult};
use crate::token::AccessToken;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    ListBooks,
    CreateBook(String),
    DeleteBook(String),
    GetCart,
    AddToCart { book_id: String, quantity: u32 },
    UpdateCartLine { line_id: String, quantity: u32 },
    RemoveCartLine(String),
    ListOrders,
    PlaceOrder,
    UpdateOrderStatus { order_id: String, status: OrderStatus },
    Register(String),
}

#[derive(Default)]
struct Server {
    books: Vec<Book>,
    cart: Vec<CartLine>,
    orders: Vec<Order>,
    calls: Vec<Call>,
    failures: HashMap<&'static str, u16>,
    next_id: u64,
}

impl Server {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }

    fn check_failure(&self, op: &'static str) -> ClientResult<()> {
        match self.failures.get(op) {
            Some(status) => Err(ClientError::Http {
                status: *status,
                message: None,
            }),
            None => Ok(()),
        }
    }
}

#[derive(Default)]
pub(crate) struct FakeApi {
    server: Mutex<Server>,
    cart_gate: Mutex<Option<Arc<Notify>>>,
}

pub(crate) fn book(id: &str, title: &str, cents: i64) -> Book {
    Book::new(id, title, "Test Author", Money::from_cents(cents))
}

impl FakeApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_books(books: Vec<Book>) -> Self {
        let fake = Self::default();
        fake.lock().books = books;
        fake
    }

    fn lock(&self) -> MutexGuard<'_, Server> {
        self.server.lock().unwrap()
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    pub(crate) fn server_cart(&self) -> Vec<CartLine> {
        self.lock().cart.clone()
    }

    pub(crate) fn server_books(&self) -> Vec<Book> {
        self.lock().books.clone()
    }

    pub(crate) fn seed_cart(&self, lines: Vec<CartLine>) {
        self.lock().cart = lines;
    }

    pub(crate) fn seed_orders(&self, orders: Vec<Order>) {
        self.lock().orders = orders;
    }

    /// Makes every call to `op` fail with `status` until cleared.
    pub(crate) fn fail(&self, op: &'static str, status: u16) {
        self.lock().failures.insert(op, status);
    }

    pub(crate) fn recover(&self, op: &'static str) {
        self.lock().failures.remove(op);
    }

    /// Holds `get_cart` until the returned notifier fires.
    pub(crate) fn gate_cart(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.cart_gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }
}

#[async_trait]
impl BookstoreApi for FakeApi {
    async fn list_books(&self) -> ClientResult<Vec<Book>> {
        let mut server = self.lock();
        server.calls.push(Call::ListBooks);
        server.check_failure("list_books")?;
        Ok(server.books.clone())
    }

    async fn create_book(&self, _token: &AccessToken, book: &NewBook) -> ClientResult<()> {
        let mut server = self.lock();
        server.calls.push(Call::CreateBook(book.title.clone()));
        server.check_failure("create_book")?;
        let id = server.next_id("book");
        server.books.push(Book {
            id,
            title: book.title.clone(),
            author: book.author.clone(),
            price: book.price,
            image_url: book.image_url.clone(),
        });
        Ok(())
    }

    async fn delete_book(&self, _token: &AccessToken, book_id: &str) -> ClientResult<()> {
        let mut server = self.lock();
        server.calls.push(Call::DeleteBook(book_id.to_string()));
        server.check_failure("delete_book")?;
        server.books.retain(|b| b.id != book_id);
        Ok(())
    }

    async fn get_cart(&self, _token: &AccessToken) -> ClientResult<Vec<CartLine>> {
        {
            let mut server = self.lock();
            server.calls.push(Call::GetCart);
            server.check_failure("get_cart")?;
        }
        let gate = self.cart_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        Ok(self.lock().cart.clone())
    }

    async fn add_to_cart(&self, _token: &AccessToken, body: &AddToCart) -> ClientResult<()> {
        let mut server = self.lock();
        server.calls.push(Call::AddToCart {
            book_id: body.book_id.clone(),
            quantity: body.quantity,
        });
        server.check_failure("add_to_cart")?;

        if let Some(line) = server.cart.iter_mut().find(|l| l.book.id == body.book_id) {
            line.quantity += body.quantity;
            return Ok(());
        }

        let book = server
            .books
            .iter()
            .find(|b| b.id == body.book_id)
            .cloned()
            .ok_or_else(|| ClientError::Http {
                status: 404,
                message: Some("Book not found".to_string()),
            })?;
        let id = server.next_id("line");
        server.cart.push(CartLine {
            id,
            book,
            quantity: body.quantity,
        });
        Ok(())
    }

    async fn update_cart_line(
        &self,
        _token: &AccessToken,
        line_id: &str,
        body: &UpdateCartLine,
    ) -> ClientResult<()> {
        let mut server = self.lock();
        server.calls.push(Call::UpdateCartLine {
            line_id: line_id.to_string(),
            quantity: body.quantity,
        });
        server.check_failure("update_cart_line")?;
        match server.cart.iter_mut().find(|l| l.id == line_id) {
            Some(line) => {
                line.quantity = body.quantity;
                Ok(())
            }
            None => Err(ClientError::Http {
                status: 404,
                message: Some("Cart item not found".to_string()),
            }),
        }
    }

    async fn remove_cart_line(&self, _token: &AccessToken, line_id: &str) -> ClientResult<()> {
        let mut server = self.lock();
        server.calls.push(Call::RemoveCartLine(line_id.to_string()));
        server.check_failure("remove_cart_line")?;
        server.cart.retain(|l| l.id != line_id);
        Ok(())
    }

    async fn list_orders(&self, _token: &AccessToken) -> ClientResult<Vec<Order>> {
        let mut server = self.lock();
        server.calls.push(Call::ListOrders);
        server.check_failure("list_orders")?;
        Ok(server.orders.clone())
    }

    async fn place_order(&self, _token: &AccessToken) -> ClientResult<Order> {
        let mut server = self.lock();
        server.calls.push(Call::PlaceOrder);
        server.check_failure("place_order")?;
        if server.cart.is_empty() {
            return Err(ClientError::Http {
                status: 400,
                message: Some("Cart is empty".to_string()),
            });
        }

        let lines = std::mem::take(&mut server.cart);
        let total: Money = lines.iter().map(CartLine::line_total).sum();
        let id = server.next_id("order");
        let order = Order {
            id,
            user: None,
            items: lines
                .into_iter()
                .map(|l| OrderItem {
                    price: Some(l.book.price),
                    book: l.book,
                    quantity: l.quantity,
                })
                .collect(),
            total,
            status: OrderStatus::Pending,
            created_at: None,
        };
        server.orders.push(order.clone());
        Ok(order)
    }

    async fn update_order_status(
        &self,
        _token: &AccessToken,
        order_id: &str,
        body: &UpdateOrderStatus,
    ) -> ClientResult<()> {
        let mut server = self.lock();
        server.calls.push(Call::UpdateOrderStatus {
            order_id: order_id.to_string(),
            status: body.status,
        });
        server.check_failure("update_order_status")?;
        match server.orders.iter_mut().find(|o| o.id == order_id) {
            Some(order) => {
                order.status = body.status;
                Ok(())
            }
            None => Err(ClientError::Http {
                status: 404,
                message: Some("Order not found".to_string()),
            }),
        }
    }

    async fn register(&self, registration: &Registration) -> ClientResult<()> {
        let mut server = self.lock();
        server.calls.push(Call::Register(registration.email.clone()));
        server.check_failure("register")?;
        Ok(())
    }
}
