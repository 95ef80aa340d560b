#![allow(non_snake_case)]

pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;

pub use crate::state::AppState;

pub fn api_router(state: AppState) -> Router {
    let apiRoutes = routes::api_routes(state.clone());
    let authRoutes = routes::auth_proxy::routes(state.clone());

    Router::new()
        .merge(apiRoutes)
        .merge(authRoutes)
        .with_state(state)
}
