//! User directory endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    ServerError,
    server::ServerState,
    types::user::{UserNew, UserView, UsersResponse},
};

fn view(user: engine::User) -> UserView {
    UserView {
        id: user.id,
        name: user.name,
    }
}

pub async fn user_new(
    State(state): State<ServerState>,
    Json(payload): Json<UserNew>,
) -> Result<(StatusCode, Json<UserView>), ServerError> {
    let user = state.engine.create_user(&payload.name)?;
    Ok((StatusCode::CREATED, Json(view(user))))
}

pub async fn list(State(state): State<ServerState>) -> Json<UsersResponse> {
    let users = state.engine.list_users().into_iter().map(view).collect();
    Json(UsersResponse { users })
}

pub async fn get(
    State(state): State<ServerState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserView>, ServerError> {
    Ok(Json(view(state.engine.user(user_id)?)))
}
