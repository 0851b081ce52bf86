//! Balance ledger: per-group net balance of every user.
//!
//! A positive balance means the group owes the user, a negative one means the
//! user owes the group. Every mutation credits and debits the same total, so
//! the balances of a group always sum to zero.

use std::collections::HashMap;

use indexmap::IndexMap;
use uuid::Uuid;

use crate::{EngineError, Money, ResultEngine, SplitEntry};

/// Net balances of one group, in the order users were first referenced.
pub type GroupBalances = IndexMap<Uuid, Money>;

#[derive(Clone, Debug, Default)]
pub struct Ledger {
    groups: HashMap<Uuid, GroupBalances>,
}

impl Ledger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits `payer` with `total` and debits every split entry.
    ///
    /// All new balances are computed before any of them is written, so an
    /// overflow leaves the ledger untouched.
    pub fn apply_expense(
        &mut self,
        group_id: Uuid,
        payer: Uuid,
        total: Money,
        splits: &[SplitEntry],
    ) -> ResultEngine<()> {
        let split_total = splits
            .iter()
            .try_fold(Money::ZERO, |acc, entry| acc.checked_add(entry.amount))
            .ok_or_else(overflow)?;
        if split_total != total {
            return Err(EngineError::InvariantViolation(format!(
                "splits sum to {split_total} but expense total is {total}"
            )));
        }

        let mut deltas: Vec<(Uuid, Money)> = Vec::with_capacity(splits.len() + 1);
        deltas.push((payer, total));
        deltas.extend(splits.iter().map(|entry| (entry.user_id, -entry.amount)));
        self.apply_deltas(group_id, &deltas)
    }

    /// Records a direct payment of `amount` from `from` to `to`.
    ///
    /// `amount` is expected to be positive; callers validate it.
    pub fn apply_settlement(
        &mut self,
        group_id: Uuid,
        from: Uuid,
        to: Uuid,
        amount: Money,
    ) -> ResultEngine<()> {
        self.apply_deltas(group_id, &[(from, amount), (to, -amount)])
    }

    /// Snapshot of a group's balances. Unknown groups yield an empty map.
    #[must_use]
    pub fn balances(&self, group_id: Uuid) -> GroupBalances {
        self.groups.get(&group_id).cloned().unwrap_or_default()
    }

    /// Sum of all balances of a group; zero unless the ledger is corrupted.
    #[must_use]
    pub fn total(&self, group_id: Uuid) -> i128 {
        self.groups
            .get(&group_id)
            .map(|balances| balances.values().map(|b| i128::from(b.cents())).sum())
            .unwrap_or_default()
    }

    /// Clears every group.
    pub fn reset(&mut self) {
        self.groups.clear();
    }

    fn apply_deltas(&mut self, group_id: Uuid, deltas: &[(Uuid, Money)]) -> ResultEngine<()> {
        let balances = self.groups.entry(group_id).or_default();

        let mut staged: IndexMap<Uuid, Money> = IndexMap::new();
        for (user_id, delta) in deltas {
            let current = match staged.get(user_id) {
                Some(value) => *value,
                None => balances.get(user_id).copied().unwrap_or_default(),
            };
            let next = current
                .checked_add(*delta)
                .filter(|value| value.checked_abs().is_some())
                .ok_or_else(overflow)?;
            staged.insert(*user_id, next);
        }

        balances.extend(staged);
        Ok(())
    }
}

fn overflow() -> EngineError {
    EngineError::InvalidAmount("balance out of range".to_string())
}
