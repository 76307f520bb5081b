use crate::auth::{AuthUser, Role};
use crate::error::DenyReason;

/// Action
///
/// What the caller is attempting against a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Mutate,
}

/// Decision
///
/// Outcome of a policy evaluation. Ephemeral: recomputed on every request,
/// never persisted or cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Permit,
    Deny(DenyReason),
}

impl Decision {
    /// Turns a decision into a result for `?` propagation in handlers.
    pub fn permitted(self) -> Result<(), DenyReason> {
        match self {
            Decision::Permit => Ok(()),
            Decision::Deny(reason) => Err(reason),
        }
    }
}

/// authorize
///
/// Decides whether a validated identity may act on a post owned by
/// `resource_owner`. Reads are public. Mutation permits the record's owner,
/// or any ADMIN: the role bypass is evaluated first and short-circuits the
/// owner comparison, so an admin mutates regardless of whose post it is.
pub fn authorize(user: &AuthUser, action: Action, resource_owner: &str) -> Decision {
    match action {
        Action::Read => Decision::Permit,
        Action::Mutate if user.role == Role::Admin => Decision::Permit,
        Action::Mutate if user.subject == resource_owner => Decision::Permit,
        Action::Mutate => Decision::Deny(DenyReason::NotOwner),
    }
}
