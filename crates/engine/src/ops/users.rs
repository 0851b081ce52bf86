use uuid::Uuid;

use crate::{EngineError, ResultEngine, User};

use super::{Engine, normalize_required_name};

impl Engine {
    /// Registers a new user. Names are unique, ignoring case.
    pub fn create_user(&self, name: &str) -> ResultEngine<User> {
        let name = normalize_required_name(name, "user name")?;
        let mut state = self.write();

        if state
            .users
            .values()
            .any(|user| user.name.eq_ignore_ascii_case(&name))
        {
            return Err(EngineError::ExistingKey(name));
        }

        let user = User::new(name);
        state.user_order.push(user.id);
        state.users.insert(user.id, user.clone());
        tracing::debug!(user_id = %user.id, name = %user.name, "user created");
        Ok(user)
    }

    pub fn user(&self, user_id: Uuid) -> ResultEngine<User> {
        self.read().require_user(user_id).cloned()
    }

    /// All users, in creation order.
    pub fn list_users(&self) -> Vec<User> {
        let state = self.read();
        state
            .user_order
            .iter()
            .filter_map(|id| state.users.get(id))
            .cloned()
            .collect()
    }
}
