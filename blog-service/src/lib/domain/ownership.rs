use thiserror::Error;

use crate::domain::user::models::UserId;

/// Authorization failure: the principal does not own the resource.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OwnershipError {
    #[error("You are not permitted to modify this resource")]
    Forbidden,
}

/// Authorize a mutation by strict owner equality.
///
/// Ownership is the sole authorization predicate in this system: no
/// roles, no hierarchy, no admin override. Callers must fetch the
/// resource first so a missing resource surfaces as not-found rather
/// than forbidden.
pub fn require_owner(principal: &UserId, owner: &UserId) -> Result<(), OwnershipError> {
    if principal == owner {
        Ok(())
    } else {
        Err(OwnershipError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_is_allowed() {
        let id = UserId::new();
        assert!(require_owner(&id, &id).is_ok());
    }

    #[test]
    fn test_non_owner_is_forbidden() {
        let principal = UserId::new();
        let owner = UserId::new();

        assert_eq!(
            require_owner(&principal, &owner),
            Err(OwnershipError::Forbidden)
        );
    }
}
