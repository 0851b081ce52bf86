//! Group management endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    ServerError,
    server::ServerState,
    types::group::{GroupNew, GroupView, GroupsResponse, MemberAdd},
};

fn view(group: engine::Group) -> GroupView {
    GroupView {
        id: group.id,
        name: group.name,
        members: group.members,
    }
}

pub async fn group_new(
    State(state): State<ServerState>,
    Json(payload): Json<GroupNew>,
) -> Result<(StatusCode, Json<GroupView>), ServerError> {
    let group = state.engine.create_group(&payload.name, &payload.members)?;
    Ok((StatusCode::CREATED, Json(view(group))))
}

pub async fn list(State(state): State<ServerState>) -> Json<GroupsResponse> {
    let groups = state.engine.list_groups().into_iter().map(view).collect();
    Json(GroupsResponse { groups })
}

pub async fn get(
    State(state): State<ServerState>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<GroupView>, ServerError> {
    Ok(Json(view(state.engine.group(group_id)?)))
}

pub async fn add_member(
    State(state): State<ServerState>,
    Path(group_id): Path<Uuid>,
    Json(payload): Json<MemberAdd>,
) -> Result<Json<GroupView>, ServerError> {
    let group = state.engine.add_group_member(group_id, payload.user_id)?;
    Ok(Json(view(group)))
}
