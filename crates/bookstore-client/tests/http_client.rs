//! BookstoreClient against an in-process axum server.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use bookstore_client::{
    AccessToken, BookstoreApi, BookstoreClient, CartStore, ClientError, MemoryTokenStore,
};
use bookstore_core::{AddToCart, Money, NewBook, OrderStatus, Registration, UpdateCartLine, UpdateOrderStatus};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

const TOKEN: &str = "valid-token";

#[derive(Default)]
struct Recorded {
    requests: Vec<String>,
    bodies: Vec<Value>,
    cart: Vec<Value>,
}

type Shared = Arc<Mutex<Recorded>>;

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", TOKEN))
        .unwrap_or(false)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Token is not valid" })),
    )
        .into_response()
}

fn dune() -> Value {
    json!({ "_id": "b1", "title": "Dune", "author": "Frank Herbert", "price": 9.99, "__v": 0 })
}

async fn list_books(State(state): State<Shared>) -> Json<Value> {
    state.lock().unwrap().requests.push("GET /api/books".into());
    Json(json!([
        dune(),
        { "_id": "b2", "title": "Emma", "author": "Jane Austen", "price": 12, "imageUrl": "https://img.example.com/emma.png" }
    ]))
}

async fn create_book(State(state): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut state = state.lock().unwrap();
    state.requests.push("POST /api/books".into());
    state.bodies.push(body);
    (StatusCode::CREATED, Json(json!({ "_id": "b9" }))).into_response()
}

async fn get_cart(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut state = state.lock().unwrap();
    state.requests.push("GET /api/cart".into());
    Json(Value::Array(state.cart.clone())).into_response()
}

async fn add_to_cart(State(state): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut state = state.lock().unwrap();
    state.requests.push("POST /api/cart".into());
    state.bodies.push(body.clone());
    state.cart = vec![json!({ "_id": "line-1", "book": dune(), "quantity": body["quantity"] })];
    StatusCode::OK.into_response()
}

async fn update_cart_line(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut state = state.lock().unwrap();
    state.requests.push(format!("PUT /api/cart/{}", id));
    state.bodies.push(body);
    StatusCode::OK.into_response()
}

async fn remove_cart_line(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<String>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut state = state.lock().unwrap();
    state.requests.push(format!("DELETE /api/cart/{}", id));
    state.cart.clear();
    StatusCode::OK.into_response()
}

async fn list_orders(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    state.lock().unwrap().requests.push("GET /api/orders".into());
    Json(json!([{
        "_id": "6650f1c2aa19be0012345678",
        "user": { "name": "Ada" },
        "items": [{ "book": dune(), "quantity": 2 }],
        "total": 19.98,
        "status": "processing",
        "createdAt": "2024-05-24T10:00:00.000Z"
    }]))
    .into_response()
}

async fn place_order(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut state = state.lock().unwrap();
    state.requests.push("POST /api/orders".into());
    state.cart.clear();
    (
        StatusCode::CREATED,
        Json(json!({ "_id": "o1", "items": [], "total": 9.99, "status": "pending" })),
    )
        .into_response()
}

async fn update_order(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut state = state.lock().unwrap();
    state.requests.push(format!("PUT /api/orders/{}", id));
    state.bodies.push(body);
    StatusCode::OK.into_response()
}

async fn register(Json(body): Json<Value>) -> Response {
    if body["email"] == "taken@example.com" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "User already exists" })),
        )
            .into_response();
    }
    (StatusCode::CREATED, Json(json!({ "message": "ok" }))).into_response()
}

async fn broken() -> Response {
    (StatusCode::OK, "<html>not json</html>").into_response()
}

async fn spawn_server() -> (String, Shared) {
    let state: Shared = Arc::new(Mutex::new(Recorded::default()));
    let app = Router::new()
        .route("/api/books", get(list_books).post(create_book))
        .route("/api/cart", get(get_cart).post(add_to_cart))
        .route("/api/cart/{id}", put(update_cart_line).delete(remove_cart_line))
        .route("/api/orders", get(list_orders).post(place_order))
        .route("/api/orders/{id}", put(update_order))
        .route("/api/auth/register", post(register))
        .route("/broken/api/books", get(broken))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    (format!("http://{}", addr), state)
}

fn token() -> AccessToken {
    AccessToken::new(TOKEN).unwrap()
}

fn requests(state: &Shared) -> Vec<String> {
    state.lock().unwrap().requests.clone()
}

#[tokio::test]
async fn test_list_books_decodes_wire_shape() {
    let (base, _state) = spawn_server().await;
    let client = BookstoreClient::with_base_url(&base).unwrap();

    let books = client.list_books().await.unwrap();

    assert_eq!(books.len(), 2);
    assert_eq!(books[0].id, "b1");
    assert_eq!(books[0].price, Money::from_cents(999));
    assert_eq!(books[1].price, Money::from_cents(1200));
    assert!(books[1].image_url.is_some());
}

#[tokio::test]
async fn test_bad_token_maps_to_http_error_with_message() {
    let (base, _state) = spawn_server().await;
    let client = BookstoreClient::with_base_url(&base).unwrap();

    let err = client
        .get_cart(&AccessToken::new("expired").unwrap())
        .await
        .unwrap_err();

    match &err {
        ClientError::Http { status, message } => {
            assert_eq!(*status, 401);
            assert_eq!(message.as_deref(), Some("Token is not valid"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(err.is_auth_error());
}

#[tokio::test]
async fn test_cart_requests_and_bodies() {
    let (base, state) = spawn_server().await;
    let client = BookstoreClient::with_base_url(&base).unwrap();

    client
        .add_to_cart(
            &token(),
            &AddToCart {
                book_id: "b1".into(),
                quantity: 1,
            },
        )
        .await
        .unwrap();
    let lines = client.get_cart(&token()).await.unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].book.title, "Dune");

    client
        .update_cart_line(&token(), "line 1", &UpdateCartLine { quantity: 3 })
        .await
        .unwrap();
    client.remove_cart_line(&token(), "line-1").await.unwrap();

    assert_eq!(
        requests(&state),
        vec![
            "POST /api/cart",
            "GET /api/cart",
            "PUT /api/cart/line 1",
            "DELETE /api/cart/line-1",
        ]
    );
    let bodies = state.lock().unwrap().bodies.clone();
    assert_eq!(bodies[0], json!({ "bookId": "b1", "quantity": 1 }));
    assert_eq!(bodies[1], json!({ "quantity": 3 }));
}

#[tokio::test]
async fn test_orders_round_trip() {
    let (base, state) = spawn_server().await;
    let client = BookstoreClient::with_base_url(&base).unwrap();

    let orders = client.list_orders(&token()).await.unwrap();
    assert_eq!(orders[0].status, OrderStatus::Processing);
    assert_eq!(orders[0].total, Money::from_cents(1998));
    assert_eq!(orders[0].customer_name(), "Ada");

    let order = client.place_order(&token()).await.unwrap();
    assert_eq!(order.id, "o1");

    client
        .update_order_status(
            &token(),
            "o1",
            &UpdateOrderStatus {
                status: OrderStatus::Delivered,
            },
        )
        .await
        .unwrap();
    assert_eq!(
        state.lock().unwrap().bodies.last().cloned(),
        Some(json!({ "status": "delivered" }))
    );
}

#[tokio::test]
async fn test_create_book_sends_decimal_price() {
    let (base, state) = spawn_server().await;
    let client = BookstoreClient::with_base_url(&base).unwrap();

    client
        .create_book(
            &token(),
            &NewBook {
                title: "Emma".into(),
                author: "Jane Austen".into(),
                price: Money::from_cents(1250),
                image_url: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(
        state.lock().unwrap().bodies[0],
        json!({ "title": "Emma", "author": "Jane Austen", "price": 12.5 })
    );
}

#[tokio::test]
async fn test_register_surfaces_server_message() {
    let (base, _state) = spawn_server().await;
    let client = BookstoreClient::with_base_url(&base).unwrap();

    let ok = Registration {
        name: "Ada".into(),
        email: "ada@example.com".into(),
        password: "pw".into(),
    };
    client.register(&ok).await.unwrap();

    let taken = Registration {
        email: "taken@example.com".into(),
        ..ok
    };
    let err = client.register(&taken).await.unwrap_err();
    assert_eq!(err.user_message(), "User already exists");
}

#[tokio::test]
async fn test_non_json_body_is_decode_error() {
    let (base, _state) = spawn_server().await;
    let client = BookstoreClient::with_base_url(&format!("{}/broken", base)).unwrap();

    let err = client.list_books().await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = BookstoreClient::with_base_url(&format!("http://{}", addr)).unwrap();
    let err = client.list_books().await.unwrap_err();

    assert!(err.is_transport_error());
}

#[tokio::test]
async fn test_cart_store_over_http() {
    let (base, state) = spawn_server().await;
    let api = Arc::new(BookstoreClient::with_base_url(&base).unwrap());
    let tokens = Arc::new(MemoryTokenStore::with_token(token()));
    let store = CartStore::new(api, tokens);

    store.add_item("b1").await.unwrap();
    assert_eq!(store.count(), 1);
    assert!(store.is_just_updated());

    store.update_quantity("line-1", 0).await.unwrap();
    assert_eq!(store.count(), 0);

    assert_eq!(
        requests(&state),
        vec!["POST /api/cart", "GET /api/cart", "DELETE /api/cart/line-1", "GET /api/cart"]
    );
}
