//! HTTP transport: maps the storefront REST routes onto [`ProductService`].
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! | Method | Path | Access |
//! |---|---|---|
//! | `POST` | `/api/products/` | admin |
//! | `GET` | `/api/products/` | public |
//! | `DELETE` | `/api/products/?productId=` | admin |
//! | `GET` | `/api/products/filter` | public |
//! | `GET` | `/api/products/latest` | public |
//! | `GET` | `/api/products/cartItems?productId=` | public |
//! | `GET` | `/api/products/totalPrice?productId=` | private |
//! | `GET`, `PATCH` | `/api/products/zzim` | private |
//! | `GET` | `/api/products/:id` | public |
//! | `PATCH` | `/api/products/:id` | admin |
//! | `GET` | `/health` | public |
//!
//! Caller identity is read from the `x-user-id` / `x-user-role` headers set by
//! the auth gateway.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use artshop_products::{http, InMemoryProductStore, ProductService};
//!
//! let service = Arc::new(ProductService::new(InMemoryProductStore::new()));
//!
//! // Get the router to compose with other axum routes
//! let app = http::router(service.clone());
//!
//! // Or serve directly
//! http::serve(service, "0.0.0.0:5000").await?;
//! ```

mod handlers;
mod params;

use std::sync::Arc;
use std::time::Duration;

use axum::http::header::{HeaderName, CONTENT_TYPE};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::service::{ProductService, ServiceError, Session, ROLE_KEY, USER_ID_KEY};
use crate::store::ProductStore;

/// Build an axum `Router` serving the product API from the given service.
pub fn router<S: ProductStore + 'static>(service: Arc<ProductService<S>>) -> Router {
    let collection = get(handlers::list_all::<S>)
        .post(handlers::create::<S>)
        .delete(handlers::delete::<S>);

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/products", collection.clone())
        .route("/api/products/", collection)
        .route("/api/products/filter", get(handlers::list_by_filter::<S>))
        .route("/api/products/latest", get(handlers::list_latest::<S>))
        .route("/api/products/cartItems", get(handlers::cart_items::<S>))
        .route("/api/products/totalPrice", get(handlers::total_price::<S>))
        .route(
            "/api/products/zzim",
            get(handlers::list_favorites::<S>).patch(handlers::toggle_favorite::<S>),
        )
        .route(
            "/api/products/:id",
            get(handlers::get_by_id::<S>).patch(handlers::update::<S>),
        )
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Serve the product API at the given address (e.g. `"0.0.0.0:5000"`) until
/// Ctrl+C or SIGTERM.
pub async fn serve<S: ProductStore + 'static>(
    service: Arc<ProductService<S>>,
    addr: &str,
) -> Result<(), std::io::Error> {
    let app = router(service);
    let listener = TcpListener::bind(addr).await?;
    info!("Server running on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            CONTENT_TYPE,
            HeaderName::from_static(USER_ID_KEY),
            HeaderName::from_static(ROLE_KEY),
        ])
        .max_age(Duration::from_secs(60 * 60))
}

/// `GET /health` returns `{ "ok": true }`.
async fn health_handler() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

/// Extract session variables from HTTP headers.
///
/// All headers are lowercased and included as session variables.
fn session_from_headers(headers: &HeaderMap) -> Session {
    let mut vars = std::collections::HashMap::new();
    for (name, value) in headers.iter() {
        if let Ok(v) = value.to_str() {
            vars.insert(name.as_str().to_string(), v.to_string());
        }
    }
    Session::from_map(vars)
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "request rejected");
        }
        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
