use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
};

use crate::{config::Config, routes, state::AppState};

pub fn create_app(state: AppState, config: &Config) -> Router {
    let api_routes = Router::new()
        .route(
            "/companies",
            get(routes::companies::list_companies).post(routes::companies::add_company),
        )
        .route("/seed", post(routes::companies::seed))
        .route(
            "/historical/:ticker",
            get(routes::historical::get_historical).put(routes::historical::put_historical),
        )
        .route(
            "/indicators/:ticker",
            get(routes::indicators::get_ticker_indicators),
        )
        .route("/indicators", post(routes::indicators::post_indicators))
        .route("/chart/:ticker", get(routes::chart::get_chart))
        .route(
            "/company-info/:ticker",
            get(routes::company_info::get_company_info),
        );

    let mut app = Router::new()
        .route("/health", get(routes::health::health))
        .nest("/api", api_routes);

    if let Some(dir) = &config.static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(cors_layer(&config.cors_allowed_origins))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
