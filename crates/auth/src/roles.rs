use core::str::FromStr;

use serde::{Deserialize, Serialize};

use nexus_core::DomainError;

use crate::permissions::Permission;

/// Role carried by an authenticated user.
///
/// Admins read and write; external users only read.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[serde(alias = "externo")]
    External,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::External => "external",
        }
    }

    pub fn permissions(self) -> &'static [Permission] {
        match self {
            Role::Admin => &[Permission::Read, Permission::Write],
            Role::External => &[Permission::Read],
        }
    }

    pub fn grants(self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "external" | "externo" => Ok(Role::External),
            other => Err(DomainError::validation(format!("unknown role: {other}"))),
        }
    }
}
