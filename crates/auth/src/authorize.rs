use nexus_core::{DomainError, DomainResult};

use crate::permissions::Permission;
use crate::principal::Principal;

/// Authorize a principal for `required`.
///
/// - No IO
/// - No panics
/// - Pure policy check; use-cases never call this
pub fn authorize(principal: &Principal, required: Permission) -> DomainResult<()> {
    if principal.role.grants(required) {
        Ok(())
    } else {
        Err(DomainError::unauthorized(format!(
            "role '{}' lacks '{}' permission",
            principal.role, required
        )))
    }
}

/// Shorthand for mutating operations.
pub fn require_write(principal: &Principal) -> DomainResult<()> {
    authorize(principal, Permission::Write)
}
