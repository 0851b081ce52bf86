//! Lookups and membership checks shared by the operations.

use uuid::Uuid;

use crate::{EngineError, Group, ResultEngine, User};

use super::State;

impl State {
    pub(super) fn require_user(&self, user_id: Uuid) -> ResultEngine<&User> {
        self.users
            .get(&user_id)
            .ok_or_else(|| EngineError::KeyNotFound(format!("user {user_id}")))
    }

    pub(super) fn require_group(&self, group_id: Uuid) -> ResultEngine<&Group> {
        self.groups
            .get(&group_id)
            .ok_or_else(|| EngineError::KeyNotFound(format!("group {group_id}")))
    }

    pub(super) fn require_group_mut(&mut self, group_id: Uuid) -> ResultEngine<&mut Group> {
        self.groups
            .get_mut(&group_id)
            .ok_or_else(|| EngineError::KeyNotFound(format!("group {group_id}")))
    }
}

/// Fails unless `user_id` belongs to `group`; `role` names the user in the
/// error message (payer, participant, ...).
pub(super) fn require_member(group: &Group, user_id: Uuid, role: &str) -> ResultEngine<()> {
    if group.is_member(user_id) {
        return Ok(());
    }
    Err(EngineError::Validation(format!(
        "{role} {user_id} is not a member of group {}",
        group.id
    )))
}
