use crate::{
    auth::{Identity, Role},
    error::ApiError,
};

/// Action
///
/// Every operation a handler can perform on a resource. The names mirror the
/// endpoint contract (index/show are the read-only pair, the rest mutate).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Index,
    Show,
    New,
    Create,
    Edit,
    Update,
    Destroy,
    Reorder,
    ToggleStatus,
}

/// Resource
///
/// The two managed resource types. Kept explicit even though the current
/// capability table treats them identically, so a future per-resource rule
/// changes the table and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Portfolio,
    Blog,
}

/// check
///
/// The pure capability table mapping (role, action) to allow/deny:
/// site admins may do everything; anonymous visitors and ordinary
/// authenticated users get read-only access.
pub fn check(role: Role, action: Action, _resource: Resource) -> bool {
    match role {
        Role::SiteAdmin => true,
        Role::Anonymous | Role::User => matches!(action, Action::Index | Action::Show),
    }
}

/// require
///
/// Gate helper called at the top of every handler, before any repository
/// call. A denial short-circuits the handler with a 403 so a rejected request
/// never performs a partial mutation.
pub fn require(identity: &Identity, action: Action, resource: Resource) -> Result<(), ApiError> {
    if check(identity.role(), action, resource) {
        Ok(())
    } else {
        tracing::warn!(?action, ?resource, role = ?identity.role(), "authorization denied");
        Err(ApiError::Forbidden)
    }
}
