use tracing::warn;

use crate::common::entity_ids::UserId;
use crate::common::error::{ApiError, ApiResult};

/// Identity attached to one request.
///
/// Resolved once from the bearer token by the HTTP layer and threaded
/// through every engine call; never stored beyond the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Caller {
    #[default]
    Anonymous,
    User(UserId),
}

impl Caller {
    pub fn user(id: UserId) -> Self {
        Caller::User(id)
    }

    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Caller::User(id) => Some(*id),
            Caller::Anonymous => None,
        }
    }

    /// Returns the signed-in user, or `Unauthenticated`.
    pub fn require_user(&self) -> ApiResult<UserId> {
        self.user_id().ok_or(ApiError::Unauthenticated)
    }

    /// Requires a signed-in caller that owns the resource.
    ///
    /// `denial` is the message returned when someone else owns it.
    pub fn require_owner(&self, owner_id: UserId, denial: &str) -> ApiResult<UserId> {
        let user_id = self.require_user()?;
        if user_id != owner_id {
            warn!(caller = %user_id, owner = %owner_id, "Ownership check failed");
            return Err(ApiError::permission_denied(denial));
        }
        Ok(user_id)
    }
}
