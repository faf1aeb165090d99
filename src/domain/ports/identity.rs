use crate::domain::models::Actor;
use async_trait::async_trait;

/// Port for the external identity provider.
///
/// Session management lives outside this system; all the task service
/// needs is the current actor, or `None` when unauthenticated.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn current_actor(&self) -> Option<Actor>;
}
