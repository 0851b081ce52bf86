use chrono::Utc;
use uuid::Uuid;

use crate::{EngineError, Expense, ExpenseCmd, ResultEngine, SettlementCmd, split::compute_split};

use super::{Engine, access::require_member, normalize_optional_text, normalize_required_name};

impl Engine {
    /// Validates an expense, computes its splits and applies them to the
    /// group ledger.
    ///
    /// Membership of the payer and of every participant is checked first and
    /// the split is computed before anything is written, so a failed call
    /// leaves no trace.
    pub fn create_expense(&self, cmd: ExpenseCmd) -> ResultEngine<Expense> {
        let description = normalize_required_name(&cmd.description, "description")?;
        let category = normalize_optional_text(cmd.category.as_deref());

        let mut state = self.write();
        {
            let group = state.require_group(cmd.group_id)?;
            require_member(group, cmd.paid_by, "payer")?;
            for participant in cmd.split.participants() {
                require_member(group, participant, "participant")?;
            }
        }

        let splits = compute_split(cmd.amount, &cmd.split, &self.split_options)?;
        state
            .ledger
            .apply_expense(cmd.group_id, cmd.paid_by, cmd.amount, &splits)?;

        let expense = Expense {
            id: Uuid::new_v4(),
            group_id: cmd.group_id,
            description,
            category,
            amount: cmd.amount,
            paid_by: cmd.paid_by,
            split_kind: cmd.split.kind(),
            splits,
            created_at: Utc::now(),
        };
        state
            .expenses
            .entry(cmd.group_id)
            .or_default()
            .push(expense.clone());

        tracing::info!(
            group_id = %expense.group_id,
            expense_id = %expense.id,
            amount = %expense.amount,
            split = %expense.split_kind,
            "expense applied"
        );
        Ok(expense)
    }

    /// Expenses of a group, oldest first.
    pub fn list_expenses(&self, group_id: Uuid) -> ResultEngine<Vec<Expense>> {
        let state = self.read();
        state.require_group(group_id)?;
        Ok(state.expenses.get(&group_id).cloned().unwrap_or_default())
    }

    /// Applies a direct payment between two members of a group.
    pub fn settle(&self, cmd: SettlementCmd) -> ResultEngine<()> {
        if !cmd.amount.is_positive() {
            return Err(EngineError::InvalidAmount(
                "settlement amount must be > 0".to_string(),
            ));
        }
        if cmd.from == cmd.to {
            return Err(EngineError::Validation(
                "cannot settle with oneself".to_string(),
            ));
        }

        let mut state = self.write();
        {
            let group = state.require_group(cmd.group_id)?;
            require_member(group, cmd.from, "payer")?;
            require_member(group, cmd.to, "payee")?;
        }

        state
            .ledger
            .apply_settlement(cmd.group_id, cmd.from, cmd.to, cmd.amount)?;

        tracing::info!(
            group_id = %cmd.group_id,
            from = %cmd.from,
            to = %cmd.to,
            amount = %cmd.amount,
            "settlement applied"
        );
        Ok(())
    }
}
