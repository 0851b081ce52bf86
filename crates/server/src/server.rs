use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use std::sync::Arc;

use crate::{balances, expenses, groups, users};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn reset(State(state): State<ServerState>) -> StatusCode {
    state.engine.reset();
    StatusCode::NO_CONTENT
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/users", post(users::user_new).get(users::list))
        .route("/users/{user_id}", get(users::get))
        .route("/groups", post(groups::group_new).get(groups::list))
        .route("/groups/{group_id}", get(groups::get))
        .route("/groups/{group_id}/members", post(groups::add_member))
        .route("/groups/{group_id}/expenses", get(expenses::list))
        .route("/groups/{group_id}/balances", get(balances::get))
        .route(
            "/groups/{group_id}/balances/simplified",
            get(balances::simplified),
        )
        .route("/expenses", post(expenses::expense_new))
        .route("/settlements", post(expenses::settlement_new))
        .route("/reset", post(reset))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}
