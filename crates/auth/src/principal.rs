use serde::{Deserialize, Serialize};

use nexus_core::UserId;

use crate::roles::Role;

/// An authenticated caller, as resolved by the session layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: UserId,
    pub role: Role,
}

impl Principal {
    pub fn new(user_id: impl Into<UserId>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }

    pub fn admin(user_id: impl Into<UserId>) -> Self {
        Self::new(user_id, Role::Admin)
    }

    pub fn external(user_id: impl Into<UserId>) -> Self {
        Self::new(user_id, Role::External)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
