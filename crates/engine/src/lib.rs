//! Balance engine for shared expenses.
//!
//! Expenses are split among group members by the [`split`] calculator, their
//! effect is accumulated per user in the [`Ledger`], and [`simplify`] turns a
//! ledger snapshot into the transfers that settle the group. [`Engine`] ties
//! them together with the user and group directory behind one lock.

pub use commands::{ExpenseCmd, SettlementCmd};
pub use error::EngineError;
pub use expenses::Expense;
pub use groups::Group;
pub use ledger::{GroupBalances, Ledger};
pub use money::Money;
pub use ops::{Engine, EngineBuilder};
pub use simplify::{Transfer, simplify};
pub use split::{DuplicatePolicy, SplitEntry, SplitInput, SplitKind, SplitOptions, compute_split};
pub use users::User;

mod commands;
mod error;
mod expenses;
mod groups;
mod ledger;
mod money;
mod ops;
pub mod simplify;
pub mod split;
mod users;

type ResultEngine<T> = Result<T, EngineError>;
