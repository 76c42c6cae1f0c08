//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                      - Health check
//!
//! # Products
//! GET    /products                    - Search, filter, sort, paginate
//! GET    /products/{id}               - Product detail
//! GET    /products/{id}/reviews       - Rating and first reviews
//! GET    /products/{id}/similar       - Random neighbours
//!
//! # Cart
//! GET    /cart?shipping=              - Cart with checkout totals
//! POST   /cart/items                  - Add one of a product
//! PATCH  /cart/items/{id}             - Set quantity
//! DELETE /cart/items/{id}             - Remove line
//! DELETE /cart                        - Clear
//!
//! # Wishlist
//! GET    /wishlist                    - Saved products
//! POST   /wishlist/toggle             - Save / unsave
//! DELETE /wishlist/items/{id}         - Remove
//! DELETE /wishlist                    - Clear
//!
//! # Auth (form validation only)
//! POST   /auth/login                  - Login form
//! POST   /auth/signup                 - Signup form
//!
//! # Account
//! GET    /account/settings            - Settings
//! PATCH  /account/settings            - Update settings
//! ```

pub mod account;
pub mod cart;
pub mod products;
pub mod wishlist;

use std::time::Duration;

use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
        .route("/{id}/reviews", get(products::reviews))
        .route("/{id}/similar", get(products::similar))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).delete(cart::clear))
        .route("/items", post(cart::add))
        .route("/items/{id}", patch(cart::update).delete(cart::remove))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show).delete(wishlist::clear))
        .route("/toggle", post(wishlist::toggle))
        .route("/items/{id}", delete(wishlist::remove))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(account::login))
        .route("/signup", post(account::signup))
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new().route(
        "/settings",
        get(account::settings).patch(account::update_settings),
    )
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/wishlist", wishlist_routes())
        .nest("/auth", auth_routes())
        .nest("/account", account_routes())
}

/// Build the complete application: routes, request tracing and Sentry.
pub fn app(state: AppState) -> Router {
    routes()
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
