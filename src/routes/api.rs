//! Resource routes for scientists, planets and missions.

use crate::handlers::{mission, planet, scientist};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/scientists", get(scientist::list).post(scientist::create))
        .route(
            "/scientists/:id",
            get(scientist::read)
                .patch(scientist::update)
                .delete(scientist::delete),
        )
        .route("/planets", get(planet::list))
        .route("/planets/:id", get(planet::read).delete(planet::delete))
        .route("/missions", post(mission::create))
        .route("/missions/:id", get(mission::read))
        .with_state(state)
}
