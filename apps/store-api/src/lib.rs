//! # store-api: HTTP Layer for the Store API
//!
//! axum router, handlers, configuration and error mapping.
//!
//! ## Routes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST   /basketProduct                create a basket line              │
//! │  GET    /basketProduct/{id}           fetch one line                    │
//! │  PUT    /basketProduct/{id}           update a line (path id wins)      │
//! │  DELETE /basketProduct/{id}           delete a line                     │
//! │  GET    /basketProducts               page + search + total count       │
//! │  POST   /product/sell                 atomic sell-and-decrement         │
//! │  PUT    /product/{name}/quantity      overwrite a stock level           │
//! │  GET    /health                       database liveness                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod response;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post, put};
use axum::Router;
use store_db::{BasketProductStore, Database, InventoryStore};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Shared application state.
///
/// Handlers only see the storage traits; `db` is kept for health checks.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub basket_products: Arc<dyn BasketProductStore>,
    pub inventory: Arc<dyn InventoryStore>,
}

impl AppState {
    /// State backed by the SQLite repositories of `db`.
    pub fn new(db: Database) -> Self {
        AppState {
            basket_products: Arc::new(db.basket_products()),
            inventory: Arc::new(db.products()),
            db,
        }
    }

    /// Replaces the basket product store.
    pub fn with_basket_products(mut self, store: Arc<dyn BasketProductStore>) -> Self {
        self.basket_products = store;
        self
    }
}

/// Builds the application router with tracing and timeout middleware.
pub fn router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/basketProduct", post(handlers::basket_product::create))
        .route(
            "/basketProduct/{id}",
            get(handlers::basket_product::get_by_id)
                .put(handlers::basket_product::update)
                .delete(handlers::basket_product::delete),
        )
        .route("/basketProducts", get(handlers::basket_product::get_list))
        .route("/product/sell", post(handlers::product::sell))
        .route("/product/{name}/quantity", put(handlers::product::set_quantity))
        .route("/health", get(handlers::health::health))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
