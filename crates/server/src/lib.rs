use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{ServerState, router, run_with_listener};

mod balances;
mod expenses;
mod groups;
mod server;
mod users;

pub mod types {
    pub mod user {
        pub use api_types::user::{UserNew, UserView, UsersResponse};
    }

    pub mod group {
        pub use api_types::group::{GroupNew, GroupView, GroupsResponse, MemberAdd};
    }

    pub mod expense {
        pub use api_types::expense::{
            ExpenseNew, ExpenseView, ExpensesResponse, ParticipantInput, SplitView,
        };
    }

    pub mod settlement {
        pub use api_types::settlement::SettlementNew;
    }

    pub mod balance {
        pub use api_types::balance::{BalancesResponse, SimplifiedBalancesResponse, TransferView};
    }
}

pub enum ServerError {
    Engine(EngineError),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::InvariantViolation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::SplitConservation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::Validation(_)
        | EngineError::UnknownSplitType(_)
        | EngineError::InvalidAmount(_) => StatusCode::BAD_REQUEST,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::InvariantViolation(detail) => {
            tracing::error!("ledger invariant violated: {detail}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let ServerError::Engine(err) = self;
        let (status, error) = (status_for_engine_error(&err), message_for_engine_error(err));

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
