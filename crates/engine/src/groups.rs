//! Expense-splitting groups.
//!
//! A group is a named, ordered list of member ids. Membership is what the
//! engine checks before letting an expense or settlement touch the ledger.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    /// Member ids in the order they joined, without duplicates.
    pub members: Vec<Uuid>,
}

impl Group {
    pub(crate) fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            members: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_member(&self, user_id: Uuid) -> bool {
        self.members.contains(&user_id)
    }

    /// Adds `user_id` unless already present. Returns `true` if added.
    pub(crate) fn add_member(&mut self, user_id: Uuid) -> bool {
        if self.is_member(user_id) {
            return false;
        }
        self.members.push(user_id);
        true
    }
}
