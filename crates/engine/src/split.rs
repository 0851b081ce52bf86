//! Split calculator.
//!
//! Turns an expense total plus a strategy-specific participant list into the
//! per-user owed amounts. The result always sums to the total, or the call
//! fails without producing anything.

use std::{fmt, str::FromStr};

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Money, ResultEngine};

/// Strategy tag of a split.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SplitKind {
    Equal,
    Exact,
    Percent,
}

impl SplitKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "EQUAL",
            Self::Exact => "EXACT",
            Self::Percent => "PERCENT",
        }
    }
}

impl fmt::Display for SplitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SplitKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EQUAL" => Ok(Self::Equal),
            "EXACT" => Ok(Self::Exact),
            "PERCENT" => Ok(Self::Percent),
            _ => Err(EngineError::UnknownSplitType(s.to_string())),
        }
    }
}

/// Participant data, shaped per strategy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SplitInput {
    /// Participants sharing the total evenly, in the order given.
    Equal(Vec<Uuid>),
    /// Fixed owed amount per participant.
    Exact(Vec<(Uuid, Money)>),
    /// Percentage of the total per participant.
    Percent(Vec<(Uuid, Decimal)>),
}

impl SplitInput {
    #[must_use]
    pub fn kind(&self) -> SplitKind {
        match self {
            Self::Equal(_) => SplitKind::Equal,
            Self::Exact(_) => SplitKind::Exact,
            Self::Percent(_) => SplitKind::Percent,
        }
    }

    /// Participant ids in input order (duplicates included).
    #[must_use]
    pub fn participants(&self) -> Vec<Uuid> {
        match self {
            Self::Equal(users) => users.clone(),
            Self::Exact(rows) => rows.iter().map(|(user, _)| *user).collect(),
            Self::Percent(rows) => rows.iter().map(|(user, _)| *user).collect(),
        }
    }
}

/// One participant's share of an expense.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitEntry {
    pub user_id: Uuid,
    pub amount: Money,
}

/// What to do when the same participant is listed more than once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail with a validation error.
    #[default]
    Reject,
    /// Collapse repeats into the first occurrence, summing amounts/percents.
    Merge,
    /// Keep every row; the user is charged once per occurrence.
    Allow,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SplitOptions {
    pub duplicates: DuplicatePolicy,
}

impl SplitOptions {
    #[must_use]
    pub fn duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }
}

/// Maximum distance of the percentage sum from 100.
fn percent_tolerance() -> Decimal {
    Decimal::new(1, 2)
}

/// Computes the owed amount of every participant.
///
/// - `Equal`: `total / n` each; the first `total % n` participants pay one
///   extra cent.
/// - `Exact`: amounts are kept verbatim and must sum to `total`.
/// - `Percent`: every participant but the last gets `total * p / 100`, rounded
///   half away from zero; the last one absorbs whatever is left.
pub fn compute_split(
    total: Money,
    input: &SplitInput,
    options: &SplitOptions,
) -> ResultEngine<Vec<SplitEntry>> {
    if !total.is_positive() {
        return Err(EngineError::InvalidAmount(
            "total amount must be > 0".to_string(),
        ));
    }

    match input {
        SplitInput::Equal(users) => {
            let users = dedup_users(users, options.duplicates)?;
            split_equal(total, &users)
        }
        SplitInput::Exact(rows) => {
            let rows = dedup_rows(rows, options.duplicates)?;
            split_exact(total, &rows)
        }
        SplitInput::Percent(rows) => {
            let rows = dedup_rows(rows, options.duplicates)?;
            split_percent(total, &rows)
        }
    }
}

fn split_equal(total: Money, users: &[Uuid]) -> ResultEngine<Vec<SplitEntry>> {
    if users.is_empty() {
        return Err(EngineError::Validation(
            "equal split needs at least one participant".to_string(),
        ));
    }

    let count = i64::try_from(users.len())
        .map_err(|_| EngineError::Validation("too many participants".to_string()))?;
    let base = total.cents() / count;
    let remainder = usize::try_from(total.cents() % count).unwrap_or_default();

    Ok(users
        .iter()
        .enumerate()
        .map(|(idx, user_id)| {
            let extra = i64::from(idx < remainder);
            SplitEntry {
                user_id: *user_id,
                amount: Money::new(base + extra),
            }
        })
        .collect())
}

fn split_exact(total: Money, rows: &[(Uuid, Money)]) -> ResultEngine<Vec<SplitEntry>> {
    if rows.is_empty() {
        return Err(EngineError::Validation(
            "exact split needs at least one participant".to_string(),
        ));
    }

    let mut sum = Money::ZERO;
    for (user_id, amount) in rows {
        if amount.is_negative() {
            return Err(EngineError::Validation(format!(
                "amount for {user_id} must not be negative"
            )));
        }
        sum = sum
            .checked_add(*amount)
            .ok_or_else(|| EngineError::InvalidAmount("split amounts too large".to_string()))?;
    }

    if sum != total {
        return Err(EngineError::SplitConservation(format!(
            "exact amounts sum to {sum}, expected {total}"
        )));
    }

    Ok(rows
        .iter()
        .map(|(user_id, amount)| SplitEntry {
            user_id: *user_id,
            amount: *amount,
        })
        .collect())
}

fn split_percent(total: Money, rows: &[(Uuid, Decimal)]) -> ResultEngine<Vec<SplitEntry>> {
    let Some(((last_user, _), head)) = rows.split_last() else {
        return Err(EngineError::Validation(
            "percent split needs at least one participant".to_string(),
        ));
    };

    let mut percent_sum = Decimal::ZERO;
    for (user_id, percent) in rows {
        if *percent < Decimal::ZERO || *percent > Decimal::ONE_HUNDRED {
            return Err(EngineError::Validation(format!(
                "percent for {user_id} must be between 0 and 100, got {percent}"
            )));
        }
        percent_sum += *percent;
    }

    if (percent_sum - Decimal::ONE_HUNDRED).abs() > percent_tolerance() {
        return Err(EngineError::SplitConservation(format!(
            "percentages sum to {percent_sum}, expected 100"
        )));
    }

    let too_large = || EngineError::InvalidAmount("total amount too large".to_string());
    let total_dec = Decimal::from(total.cents());
    let mut entries = Vec::with_capacity(rows.len());
    let mut allocated = Money::ZERO;

    for (user_id, percent) in head {
        let share = total_dec
            .checked_mul(*percent)
            .ok_or_else(too_large)?
            / Decimal::ONE_HUNDRED;
        let cents = share
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .ok_or_else(too_large)?;
        let amount = Money::new(cents);
        allocated = allocated.checked_add(amount).ok_or_else(too_large)?;
        entries.push(SplitEntry {
            user_id: *user_id,
            amount,
        });
    }

    let last = total.checked_sub(allocated).ok_or_else(too_large)?;
    if last.is_negative() {
        return Err(EngineError::SplitConservation(format!(
            "rounded shares already exceed the total by {}",
            -last
        )));
    }
    entries.push(SplitEntry {
        user_id: *last_user,
        amount: last,
    });

    Ok(entries)
}

fn dedup_users(users: &[Uuid], policy: DuplicatePolicy) -> ResultEngine<Vec<Uuid>> {
    let mut out: Vec<Uuid> = Vec::with_capacity(users.len());
    for user in users {
        if out.contains(user) {
            match policy {
                DuplicatePolicy::Reject => return Err(duplicate_error(user)),
                DuplicatePolicy::Merge => continue,
                DuplicatePolicy::Allow => {}
            }
        }
        out.push(*user);
    }
    Ok(out)
}

fn dedup_rows<T>(rows: &[(Uuid, T)], policy: DuplicatePolicy) -> ResultEngine<Vec<(Uuid, T)>>
where
    T: Copy + std::ops::AddAssign,
{
    let mut out: Vec<(Uuid, T)> = Vec::with_capacity(rows.len());
    for (user, value) in rows {
        if let Some(existing) = out.iter_mut().find(|(seen, _)| seen == user) {
            match policy {
                DuplicatePolicy::Reject => return Err(duplicate_error(user)),
                DuplicatePolicy::Merge => {
                    existing.1 += *value;
                    continue;
                }
                DuplicatePolicy::Allow => {}
            }
        }
        out.push((*user, *value));
    }
    Ok(out)
}

fn duplicate_error(user: &Uuid) -> EngineError {
    EngineError::Validation(format!("participant {user} is listed more than once"))
}
