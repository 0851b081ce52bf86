use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod user {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserNew {
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserView {
        pub id: Uuid,
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UsersResponse {
        pub users: Vec<UserView>,
    }
}

pub mod group {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GroupNew {
        pub name: String,
        #[serde(default)]
        pub members: Vec<Uuid>,
    }

    /// Request body for adding a member to a group.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct MemberAdd {
        pub user_id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GroupView {
        pub id: Uuid,
        pub name: String,
        pub members: Vec<Uuid>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GroupsResponse {
        pub groups: Vec<GroupView>,
    }
}

pub mod expense {
    use super::*;

    /// One element of the `participants` list.
    ///
    /// The accepted shape depends on `split_type`:
    /// - `EQUAL`: a bare user id
    /// - `EXACT`: `{ "user_id": ..., "amount_minor": ... }`
    /// - `PERCENT`: `{ "user_id": ..., "percent": ... }`
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum ParticipantInput {
        Id(Uuid),
        Amount { user_id: Uuid, amount_minor: i64 },
        Percent { user_id: Uuid, percent: Decimal },
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub group_id: Uuid,
        pub description: String,
        pub category: Option<String>,
        /// Total in minor units (cents).
        pub amount_minor: i64,
        pub paid_by: Uuid,
        /// `EQUAL`, `EXACT` or `PERCENT`.
        pub split_type: String,
        pub participants: Vec<ParticipantInput>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SplitView {
        pub user_id: Uuid,
        pub amount_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: Uuid,
        pub group_id: Uuid,
        pub description: String,
        pub category: Option<String>,
        pub amount_minor: i64,
        pub paid_by: Uuid,
        pub split_type: String,
        pub splits: Vec<SplitView>,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpensesResponse {
        pub group_id: Uuid,
        pub expenses: Vec<ExpenseView>,
    }
}

pub mod settlement {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SettlementNew {
        pub group_id: Uuid,
        pub from: Uuid,
        pub to: Uuid,
        pub amount_minor: i64,
    }
}

pub mod balance {
    use std::collections::BTreeMap;

    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BalancesResponse {
        pub group_id: Uuid,
        /// Net balance per user, in minor units. Positive means the user is owed.
        pub balances: BTreeMap<Uuid, i64>,
    }

    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TransferView {
        pub from: Uuid,
        pub to: Uuid,
        pub amount_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SimplifiedBalancesResponse {
        pub group_id: Uuid,
        pub transactions: Vec<TransferView>,
        pub count: usize,
    }
}
