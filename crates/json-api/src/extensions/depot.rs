//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use storefront_app::auth::Actor;

const ACTOR_KEY: &str = "storefront.actor";

/// Helpers for moving the authenticated actor and shared state through the
/// request depot.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Stash the decoded actor for downstream handlers.
    fn insert_actor(&mut self, actor: Actor);

    /// The decoded actor, or 401 when authentication never ran.
    fn actor_or_401(&self) -> Result<Actor, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_actor(&mut self, actor: Actor) {
        self.insert(ACTOR_KEY, actor);
    }

    fn actor_or_401(&self) -> Result<Actor, StatusError> {
        self.get::<Actor>(ACTOR_KEY)
            .copied()
            .map_err(|_ignored| StatusError::unauthorized().brief("Authentication required"))
    }
}
