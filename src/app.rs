// src/app.rs

use axum::{routing::get, Router};

use crate::{config::AppState, docs, handlers};

pub fn build_router(app_state: AppState) -> Router {
    // Páginas (uma por painel)
    let pages = Router::new()
        .route("/", get(handlers::paineis::index))
        .route("/ptb", get(handlers::paineis::ptb_page))
        .route("/gapr", get(handlers::paineis::gapr_page));

    // Os mesmos relatórios em JSON
    let api_routes = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/openapi.json", get(docs::openapi_json))
        .route("/relatorios/ptb/{aba}", get(handlers::paineis::get_ptb_report))
        .route("/relatorios/gapr", get(handlers::paineis::get_gapr_report));

    Router::new()
        .merge(pages)
        .nest("/api", api_routes)
        .with_state(app_state)
}
