//! Identity adapter for CLI deployments.
//!
//! The real auth provider lives outside this system; here the actor is
//! fixed at construction from configuration or environment.

use async_trait::async_trait;

use crate::domain::models::{Actor, ActorConfig};
use crate::domain::ports::IdentityProvider;

pub struct StaticIdentityProvider {
    actor: Option<Actor>,
}

impl StaticIdentityProvider {
    pub fn new(actor: Actor) -> Self {
        Self { actor: Some(actor) }
    }

    /// An unauthenticated provider; every operation fails `AuthRequired`.
    pub fn anonymous() -> Self {
        Self { actor: None }
    }

    /// Resolve the actor from config. Returns the anonymous provider when
    /// id or email is missing or the id is not a valid UUID.
    pub fn from_config(config: &ActorConfig) -> Self {
        let actor = match (&config.id, &config.email) {
            (Some(id), Some(email)) => id.parse().ok().map(|id| Actor {
                id,
                email: email.clone(),
            }),
            _ => None,
        };
        Self { actor }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn current_actor(&self) -> Option<Actor> {
        self.actor.clone()
    }
}
