//! Generic container for combining entities.

use super::EntityId;
use serde::{Deserialize, Serialize};

/// A group of entities that is caught and queried as a single unit.
/// Containers can hold other containers, enabling nested hierarchies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Container {
    /// Child entity ids, in drawing order.
    pub children: Vec<EntityId>,
}

impl Container {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a container holding the given children.
    pub fn with_children(children: Vec<EntityId>) -> Self {
        Self { children }
    }
}
