use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use uuid::Uuid;

use crate::{EngineError, Expense, Group, Ledger, ResultEngine, SplitOptions, User};

mod access;
mod balances;
mod expenses;
mod groups;
mod users;

/// Everything the engine keeps in memory.
///
/// Held behind a single lock: an expense record and its ledger update become
/// visible to readers together.
#[derive(Debug, Default)]
pub(crate) struct State {
    pub(crate) users: HashMap<Uuid, User>,
    pub(crate) user_order: Vec<Uuid>,
    pub(crate) groups: HashMap<Uuid, Group>,
    pub(crate) group_order: Vec<Uuid>,
    pub(crate) expenses: HashMap<Uuid, Vec<Expense>>,
    pub(crate) ledger: Ledger,
}

#[derive(Debug)]
pub struct Engine {
    state: RwLock<State>,
    split_options: SplitOptions,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Drops every user, group, expense and balance.
    pub fn reset(&self) {
        let mut state = self.write();
        *state = State::default();
        tracing::warn!("engine state reset");
    }

    // Poisoning is ignored: writers stage every change before committing it.
    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn normalize_required_name(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::Validation(format!("{label} must not be empty")));
    }
    Ok(trimmed.to_string())
}

fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    split_options: SplitOptions,
}

impl EngineBuilder {
    /// Policy knobs of the split calculator.
    pub fn split_options(mut self, options: SplitOptions) -> EngineBuilder {
        self.split_options = options;
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> Engine {
        Engine {
            state: RwLock::new(State::default()),
            split_options: self.split_options,
        }
    }
}
