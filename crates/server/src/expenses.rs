//! Expense and settlement endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{EngineError, ExpenseCmd, Money, SettlementCmd, SplitInput, SplitKind};
use uuid::Uuid;

use crate::{
    ServerError,
    server::ServerState,
    types::{
        expense::{ExpenseNew, ExpenseView, ExpensesResponse, ParticipantInput, SplitView},
        settlement::SettlementNew,
    },
};

fn view(expense: engine::Expense) -> ExpenseView {
    ExpenseView {
        id: expense.id,
        group_id: expense.group_id,
        description: expense.description,
        category: expense.category,
        amount_minor: expense.amount.cents(),
        paid_by: expense.paid_by,
        split_type: expense.split_kind.to_string(),
        splits: expense
            .splits
            .into_iter()
            .map(|entry| SplitView {
                user_id: entry.user_id,
                amount_minor: entry.amount.cents(),
            })
            .collect(),
        created_at: expense.created_at,
    }
}

fn shape_mismatch(kind: SplitKind, expected: &str) -> EngineError {
    EngineError::Validation(format!(
        "{kind} split expects participants as {expected}"
    ))
}

/// Checks that every participant has the shape required by `kind`.
fn split_input(kind: SplitKind, participants: Vec<ParticipantInput>) -> Result<SplitInput, EngineError> {
    match kind {
        SplitKind::Equal => participants
            .into_iter()
            .map(|row| match row {
                ParticipantInput::Id(user_id) => Ok(user_id),
                _ => Err(shape_mismatch(kind, "user ids")),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(SplitInput::Equal),
        SplitKind::Exact => participants
            .into_iter()
            .map(|row| match row {
                ParticipantInput::Amount {
                    user_id,
                    amount_minor,
                } => Ok((user_id, Money::new(amount_minor))),
                _ => Err(shape_mismatch(kind, "{user_id, amount_minor} objects")),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(SplitInput::Exact),
        SplitKind::Percent => participants
            .into_iter()
            .map(|row| match row {
                ParticipantInput::Percent { user_id, percent } => Ok((user_id, percent)),
                _ => Err(shape_mismatch(kind, "{user_id, percent} objects")),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(SplitInput::Percent),
    }
}

pub async fn expense_new(
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseNew>,
) -> Result<(StatusCode, Json<ExpenseView>), ServerError> {
    let kind: SplitKind = payload.split_type.parse()?;
    let split = split_input(kind, payload.participants)?;

    let mut cmd = ExpenseCmd::new(
        payload.group_id,
        payload.description,
        Money::new(payload.amount_minor),
        payload.paid_by,
        split,
    );
    if let Some(category) = payload.category {
        cmd = cmd.category(category);
    }

    let expense = state.engine.create_expense(cmd)?;
    Ok((StatusCode::CREATED, Json(view(expense))))
}

pub async fn list(
    State(state): State<ServerState>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<ExpensesResponse>, ServerError> {
    let expenses = state
        .engine
        .list_expenses(group_id)?
        .into_iter()
        .map(view)
        .collect();

    Ok(Json(ExpensesResponse { group_id, expenses }))
}

pub async fn settlement_new(
    State(state): State<ServerState>,
    Json(payload): Json<SettlementNew>,
) -> Result<StatusCode, ServerError> {
    state.engine.settle(SettlementCmd {
        group_id: payload.group_id,
        from: payload.from,
        to: payload.to,
        amount: Money::new(payload.amount_minor),
    })?;

    Ok(StatusCode::NO_CONTENT)
}
