use axum::Router;

use crate::AppState;

mod health;
mod weather;

// ---

pub fn router(state: AppState) -> Router {
    // ---
    Router::new()
        .merge(weather::router(state.clone()))
        .merge(health::router())
        .with_state(state)
}
