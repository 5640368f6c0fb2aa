use axum::{http::Method, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod app_config;
pub mod catalog;
pub mod error;
pub mod generate;
pub mod keyword;
pub mod package;
pub mod sourcing;
pub mod state;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    Router::new()
        .merge(generate::routes())
        .merge(catalog::routes())
        .merge(keyword::routes())
        .merge(sourcing::routes())
        .merge(package::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
