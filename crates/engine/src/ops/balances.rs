use uuid::Uuid;

use crate::{GroupBalances, Money, ResultEngine, Transfer, simplify::simplify};

use super::Engine;

impl Engine {
    /// Net balance of every member of a group.
    ///
    /// Members without any activity report zero; users that left a trace in
    /// the ledger are always listed.
    pub fn balances(&self, group_id: Uuid) -> ResultEngine<GroupBalances> {
        let state = self.read();
        let group = state.require_group(group_id)?;

        let mut balances = state.ledger.balances(group_id);
        for member in &group.members {
            balances.entry(*member).or_insert(Money::ZERO);
        }
        Ok(balances)
    }

    /// Minimal list of transfers that settles every balance of the group.
    pub fn simplified_balances(&self, group_id: Uuid) -> ResultEngine<Vec<Transfer>> {
        let snapshot = {
            let state = self.read();
            state.require_group(group_id)?;
            state.ledger.balances(group_id)
        };

        let transfers = simplify(snapshot).inspect_err(|err| {
            tracing::error!(%group_id, "cannot simplify balances: {err}");
        })?;
        tracing::debug!(%group_id, count = transfers.len(), "balances simplified");
        Ok(transfers)
    }
}
