use crate::gateway::FetchResult;
use crate::models::{Entity, EntityId};
use crate::mvi::Intent;

/// Everything that can happen to a list.
#[derive(Debug, Clone, PartialEq)]
pub enum ListIntent<T> {
    /// Drop everything and start over from page 1.
    Reset,

    /// A page request is about to be issued.
    LoadStarted,

    /// The in-flight page arrived.
    PageLoaded(FetchResult<T>),

    /// The in-flight page failed.
    PageFailed { message: String },

    /// A mutation returned the updated entity.
    ItemReplaced(T),

    /// A mutation created a new entity.
    ItemPrepended(T),

    /// A mutation deleted the entity with this id.
    ItemRemoved(EntityId),
}

impl<T: Entity> Intent for ListIntent<T> {}
