//! HTTP surface of the Perplexity relay.
//!
//! Exposes `GET /status` (is a credential configured?) and `POST /search`
//! (question in, `{result, links}` out) on top of [`perplexity_async::Client`].

#![warn(missing_docs)]

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use perplexity_async::{Client, Config};
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultOnFailure, TraceLayer};
use tracing::Level;

pub mod error;
pub mod routes;

pub use error::RelayError;

/// Shared, read-only handler state.
pub struct AppState<C: Config> {
    client: Arc<Client<C>>,
}

impl<C: Config> AppState<C> {
    /// Wraps `client` for sharing across requests.
    pub fn new(client: Client<C>) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

impl<C: Config> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

/// Bare relay routes without middleware.
pub fn router<C: Config + 'static>(state: AppState<C>) -> Router {
    Router::new()
        .route("/status", get(routes::status::<C>))
        .route("/search", post(routes::search::<C>))
        .with_state(state)
}

/// The routes as served: request tracing and permissive CORS on top of
/// [`router`].
///
/// 5xx responses are traced at DEBUG; upstream failures already get their
/// single ERROR event from [`RelayError`].
pub fn app<C: Config + 'static>(state: AppState<C>) -> Router {
    router(state)
        .layer(TraceLayer::new_for_http().on_failure(DefaultOnFailure::new().level(Level::DEBUG)))
        .layer(CorsLayer::permissive())
}
