//! Mutation Relay: create, update, delete and action calls, and how each
//! one reconciles with the loaded list.
//!
//! The relay itself never touches a list. It returns a
//! [`MutationOutcome`] and the owning view applies it, so a failed call
//! leaves the list exactly as it was.

mod error;

use std::sync::Arc;

use crate::config::RequestContext;
use crate::gateway::{decode_entity, FetchGateway, FetchRequest};
use crate::models::{Entity, EntityId};

pub use error::MutationError;

/// What the list should do once the backend has accepted a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconcile {
    /// Insert the returned entity at the top, or reload if none came back.
    Prepend,
    /// Swap the loaded entity with the returned one, or reload if none
    /// came back.
    Replace,
    /// Replace when the backend returns the entity, otherwise reload
    /// without a warning. For endpoints that often answer `{message}`.
    ReplaceOrReload,
    /// Drop the entity with this id.
    Remove(EntityId),
    /// Reset and fetch page 1 again.
    Reload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update(EntityId),
    Delete(EntityId),
    /// A verb on an existing entity, e.g. check-in.
    Action(EntityId),
}

/// A prepared backend call plus its reconciliation rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Mutation {
    pub kind: MutationKind,
    pub request: FetchRequest,
    pub reconcile: Reconcile,
}

impl Mutation {
    pub fn create(request: FetchRequest) -> Self {
        Self {
            kind: MutationKind::Create,
            request,
            reconcile: Reconcile::Prepend,
        }
    }

    pub fn update(id: EntityId, request: FetchRequest) -> Self {
        Self {
            kind: MutationKind::Update(id),
            request,
            reconcile: Reconcile::Replace,
        }
    }

    pub fn delete(id: EntityId, request: FetchRequest) -> Self {
        Self {
            kind: MutationKind::Delete(id),
            request,
            reconcile: Reconcile::Remove(id),
        }
    }

    pub fn action(id: EntityId, request: FetchRequest) -> Self {
        Self {
            kind: MutationKind::Action(id),
            request,
            reconcile: Reconcile::ReplaceOrReload,
        }
    }

    /// Override the default reconciliation.
    pub fn reconcile(mut self, reconcile: Reconcile) -> Self {
        self.reconcile = reconcile;
        self
    }
}

/// Local effect of an accepted mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome<T> {
    Created(T),
    Updated(T),
    Removed(EntityId),
    ReloadRequired,
}

/// Sends mutations through the gateway and decodes what came back.
#[derive(Clone)]
pub struct MutationRelay {
    gateway: Arc<dyn FetchGateway>,
    ctx: RequestContext,
}

impl MutationRelay {
    pub fn new(gateway: Arc<dyn FetchGateway>, ctx: RequestContext) -> Self {
        Self { gateway, ctx }
    }

    /// Send `mutation` and work out its local effect.
    ///
    /// # Returns
    /// * `Ok(MutationOutcome)` - The backend accepted the change
    /// * `Err(MutationError)` - Nothing must be applied locally
    pub async fn submit<T: Entity>(&self, mutation: Mutation) -> Result<MutationOutcome<T>, MutationError> {
        let Mutation {
            kind,
            request,
            reconcile,
        } = mutation;

        tracing::debug!(?kind, method = %request.method, path = %request.path, "submitting mutation");

        let body = self.gateway.fetch(request, &self.ctx).await.map_err(|e| {
            tracing::warn!(?kind, error = %e, "mutation failed");
            MutationError::from(e)
        })?;

        // The backend has accepted the change at this point. A body that is
        // not the entity falls back to a reload, never to an error.
        let outcome = match reconcile {
            Reconcile::Prepend => match decode_entity(body) {
                Ok(entity) => MutationOutcome::Created(entity),
                Err(e) => {
                    tracing::warn!(?kind, error = %e, "created entity not returned, reloading");
                    MutationOutcome::ReloadRequired
                }
            },
            Reconcile::Replace => match decode_entity(body) {
                Ok(entity) => MutationOutcome::Updated(entity),
                Err(e) => {
                    tracing::warn!(?kind, error = %e, "updated entity not returned, reloading");
                    MutationOutcome::ReloadRequired
                }
            },
            Reconcile::ReplaceOrReload => match decode_entity(body) {
                Ok(entity) => MutationOutcome::Updated(entity),
                Err(_) => MutationOutcome::ReloadRequired,
            },
            Reconcile::Remove(id) => MutationOutcome::Removed(id),
            Reconcile::Reload => MutationOutcome::ReloadRequired,
        };

        Ok(outcome)
    }
}
