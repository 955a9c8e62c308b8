use axum::{middleware as axum_middleware, routing::get, Router};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    normalize_path::NormalizePath,
};

pub mod error;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;

use state::AppState;

/// Full service: the router behind trailing-slash normalization, so
/// `/api/v1/` and `/api/v1` reach the same handler.
pub fn app(state: AppState) -> NormalizePath<Router> {
    NormalizePath::trim_trailing_slash(router(state))
}

/// `/health` plus everything under `/api/v1`.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/", get(routes::health::root))
        .merge(routes::user::routes(state.clone()))
        .merge(routes::blog::routes(state.clone()))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::api_key::require_api_key,
        ));

    with_common_layers(
        Router::new()
            .route("/health", get(routes::health::health_check))
            .nest("/api/v1", api)
            .with_state(state),
    )
}

fn with_common_layers(router: Router) -> Router {
    // ToDo: Tighten this up
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .layer(CatchPanicLayer::custom(error::handle_panic))
        .layer(axum_middleware::from_fn(
            middleware::error_path::attach_error_path,
        ))
        .layer(cors)
}
