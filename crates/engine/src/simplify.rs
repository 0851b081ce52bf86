//! Debt simplifier.
//!
//! Reduces a snapshot of net balances to point-to-point transfers that bring
//! every balance to zero. Creditors and debtors are both matched largest
//! first, so each transfer closes at least one side and `k` non-zero balances
//! settle in at most `k - 1` transfers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Money, ResultEngine};

/// A payment of `amount` from `from` (a debtor) to `to` (a creditor).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: Uuid,
    pub to: Uuid,
    pub amount: Money,
}

/// Computes the settling transfers for `balances`.
///
/// Users with equal amounts keep the order in which `balances` yields them.
/// Zero balances are skipped. Fails with [`EngineError::InvariantViolation`]
/// when credits and debits do not match.
pub fn simplify<I>(balances: I) -> ResultEngine<Vec<Transfer>>
where
    I: IntoIterator<Item = (Uuid, Money)>,
{
    let mut creditors: Vec<(Uuid, Money)> = Vec::new();
    let mut debtors: Vec<(Uuid, Money)> = Vec::new();
    for (user_id, balance) in balances {
        if balance.is_positive() {
            creditors.push((user_id, balance));
        } else if balance.is_negative() {
            let debt = balance.checked_abs().ok_or_else(|| {
                EngineError::InvalidAmount(format!("balance of {user_id} out of range"))
            })?;
            debtors.push((user_id, debt));
        }
    }

    let credit_total: i128 = creditors.iter().map(|(_, m)| i128::from(m.cents())).sum();
    let debit_total: i128 = debtors.iter().map(|(_, m)| i128::from(m.cents())).sum();
    if credit_total != debit_total {
        return Err(EngineError::InvariantViolation(format!(
            "credits ({credit_total}) and debits ({debit_total}) differ"
        )));
    }

    // `sort_by` is stable: ties keep their input order.
    creditors.sort_by(|a, b| b.1.cmp(&a.1));
    debtors.sort_by(|a, b| b.1.cmp(&a.1));

    let mut transfers = Vec::with_capacity(creditors.len() + debtors.len());
    let (mut ci, mut di) = (0, 0);
    while ci < creditors.len() && di < debtors.len() {
        let (creditor, credit) = &mut creditors[ci];
        let (debtor, debt) = &mut debtors[di];

        let amount = (*credit).min(*debt);
        transfers.push(Transfer {
            from: *debtor,
            to: *creditor,
            amount,
        });
        *credit -= amount;
        *debt -= amount;

        if credit.is_zero() {
            ci += 1;
        }
        if debt.is_zero() {
            di += 1;
        }
    }

    debug_assert!(ci == creditors.len() && di == debtors.len());
    if ci != creditors.len() || di != debtors.len() {
        return Err(EngineError::InvariantViolation(
            "unmatched balances left after simplification".to_string(),
        ));
    }

    Ok(transfers)
}
