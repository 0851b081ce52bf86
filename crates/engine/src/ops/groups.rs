use uuid::Uuid;

use crate::{Group, ResultEngine};

use super::{Engine, normalize_required_name};

impl Engine {
    /// Creates a group with the given members (repeated ids are collapsed).
    ///
    /// Every member must be a registered user.
    pub fn create_group(&self, name: &str, members: &[Uuid]) -> ResultEngine<Group> {
        let name = normalize_required_name(name, "group name")?;
        let mut state = self.write();

        for member in members {
            state.require_user(*member)?;
        }

        let mut group = Group::new(name);
        for member in members {
            group.add_member(*member);
        }

        state.group_order.push(group.id);
        state.groups.insert(group.id, group.clone());
        tracing::debug!(group_id = %group.id, members = group.members.len(), "group created");
        Ok(group)
    }

    /// Adds a user to a group. Adding an existing member is a no-op.
    pub fn add_group_member(&self, group_id: Uuid, user_id: Uuid) -> ResultEngine<Group> {
        let mut state = self.write();
        state.require_user(user_id)?;

        let group = state.require_group_mut(group_id)?;
        if group.add_member(user_id) {
            tracing::debug!(%group_id, %user_id, "member added");
        }
        Ok(group.clone())
    }

    pub fn group(&self, group_id: Uuid) -> ResultEngine<Group> {
        self.read().require_group(group_id).cloned()
    }

    /// All groups, in creation order.
    pub fn list_groups(&self) -> Vec<Group> {
        let state = self.read();
        state
            .group_order
            .iter()
            .filter_map(|id| state.groups.get(id))
            .cloned()
            .collect()
    }
}
