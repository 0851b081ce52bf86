//! Command structs for engine write operations.
//!
//! These types group the parameters of expense creation and settlements,
//! keeping call sites readable and avoiding long argument lists.

use uuid::Uuid;

use crate::{Money, SplitInput};

/// Create an expense and apply its splits to the group ledger.
#[derive(Clone, Debug)]
pub struct ExpenseCmd {
    pub group_id: Uuid,
    pub description: String,
    pub category: Option<String>,
    pub amount: Money,
    pub paid_by: Uuid,
    pub split: SplitInput,
}

impl ExpenseCmd {
    #[must_use]
    pub fn new(
        group_id: Uuid,
        description: impl Into<String>,
        amount: Money,
        paid_by: Uuid,
        split: SplitInput,
    ) -> Self {
        Self {
            group_id,
            description: description.into(),
            category: None,
            amount,
            paid_by,
            split,
        }
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Direct payment from `from` to `to` inside a group.
#[derive(Clone, Copy, Debug)]
pub struct SettlementCmd {
    pub group_id: Uuid,
    pub from: Uuid,
    pub to: Uuid,
    pub amount: Money,
}
