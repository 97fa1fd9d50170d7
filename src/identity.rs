use crate::flight_control::plane::UserId;
use async_trait::async_trait;

/// Supplies who is logged in and the session token for authenticated writes.
///
/// Ownership checks against the returned user are advisory only; the store enforces access.
#[async_trait]
pub trait Identity: Send + Sync {
    /// The current user, `None` if nobody is logged in.
    fn user(&self) -> Option<UserId>;
    /// A bearer token for the current session, fetched or refreshed on demand.
    async fn token(&self) -> Option<String>;
}

/// An identity fixed at startup.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    user: Option<UserId>,
    token: Option<String>,
}

impl StaticIdentity {
    pub fn new(user: Option<UserId>, token: Option<String>) -> Self { Self { user, token } }
}

#[async_trait]
impl Identity for StaticIdentity {
    fn user(&self) -> Option<UserId> { self.user.clone() }
    async fn token(&self) -> Option<String> { self.token.clone() }
}
