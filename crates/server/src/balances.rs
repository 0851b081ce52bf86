//! Balance queries: raw net balances and the simplified transfer list.

use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

use crate::{
    ServerError,
    server::ServerState,
    types::balance::{BalancesResponse, SimplifiedBalancesResponse, TransferView},
};

pub async fn get(
    State(state): State<ServerState>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<BalancesResponse>, ServerError> {
    let balances = state
        .engine
        .balances(group_id)?
        .into_iter()
        .map(|(user_id, balance)| (user_id, balance.cents()))
        .collect();

    Ok(Json(BalancesResponse { group_id, balances }))
}

pub async fn simplified(
    State(state): State<ServerState>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<SimplifiedBalancesResponse>, ServerError> {
    let transactions: Vec<TransferView> = state
        .engine
        .simplified_balances(group_id)?
        .into_iter()
        .map(|transfer| TransferView {
            from: transfer.from,
            to: transfer.to,
            amount_minor: transfer.amount.cents(),
        })
        .collect();

    Ok(Json(SimplifiedBalancesResponse {
        group_id,
        count: transactions.len(),
        transactions,
    }))
}
