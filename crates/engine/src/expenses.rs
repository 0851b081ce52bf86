//! Expense records.
//!
//! An expense owns the splits computed for it. Records are immutable once
//! stored; the ledger only sees their effect on balances.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Money, SplitEntry, SplitKind};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub group_id: Uuid,
    pub description: String,
    pub category: Option<String>,
    pub amount: Money,
    pub paid_by: Uuid,
    pub split_kind: SplitKind,
    pub splits: Vec<SplitEntry>,
    pub created_at: DateTime<Utc>,
}
