pub mod handler;
pub mod response;
pub mod views;

use crate::repositories::AuthorRepository;
use anyhow::Context;
use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub const API_PREFIX: &str = "/api";
pub const AUTHORS_PATH: &str = "/api/authors";

#[derive(Debug)]
pub struct AppState<AR: AuthorRepository> {
    pub author_repo: Arc<AR>,
}

impl<AR: AuthorRepository> AppState<AR> {
    pub fn new(author_repo: AR) -> Self {
        Self {
            author_repo: Arc::new(author_repo),
        }
    }
}

impl<AR: AuthorRepository> Clone for AppState<AR> {
    fn clone(&self) -> Self {
        Self {
            author_repo: Arc::clone(&self.author_repo),
        }
    }
}

#[derive(Debug)]
pub struct HttpServerConfig {
    port: u16,
}

impl HttpServerConfig {
    pub const fn new(port: u16) -> Self {
        Self { port }
    }
}

pub struct HttpServer {
    router: Router,
    listener: TcpListener,
}

impl HttpServer {
    pub async fn new<AR: AuthorRepository>(
        state: AppState<AR>,
        config: HttpServerConfig,
    ) -> anyhow::Result<Self> {
        let router = router(state);

        let listener = TcpListener::bind(format!("0.0.0.0:{}", config.port))
            .await
            .with_context(|| format!("Failed to bind to port {}", config.port))?;

        Ok(Self { router, listener })
    }

    pub async fn run(self) -> anyhow::Result<()> {
        tracing::info!(
            address = ?self.listener.local_addr().ok(),
            "listening for requests"
        );
        axum::serve(self.listener, self.router)
            .await
            .context("Received error from running server")?;
        Ok(())
    }
}

/// Full application router: the API routes plus request tracing and an
/// allow-all cross-origin policy.
pub fn router<AR: AuthorRepository>(state: AppState<AR>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest(API_PREFIX, api_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes<AR: AuthorRepository>() -> Router<AppState<AR>> {
    Router::new()
        .route(
            "/authors",
            get(handler::get_authors::<AR>).post(handler::create_author::<AR>),
        )
        .route(
            "/authors/{id}",
            get(handler::get_author::<AR>)
                .put(handler::update_author::<AR>)
                .delete(handler::delete_author::<AR>),
        )
}
