//! Body registry: entity id -> live physics body.
//!
//! A non-owning lookup. The entity system creates and destroys bodies and
//! keeps this map in step; the wind system only reads it. The registry is
//! an ordinary owned value held by the session, never a global.

use std::collections::HashMap;

use crate::game::types::EntityId;

#[derive(Debug, Clone)]
pub struct BodyRegistry<B> {
    bodies: HashMap<EntityId, B>,
}

impl<B> Default for BodyRegistry<B> {
    fn default() -> Self {
        Self {
            bodies: HashMap::new(),
        }
    }
}

impl<B: Copy> BodyRegistry<B> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. Returns the previous handle, if any.
    pub fn insert(&mut self, id: EntityId, body: B) -> Option<B> {
        self.bodies.insert(id, body)
    }

    pub fn remove(&mut self, id: EntityId) -> Option<B> {
        self.bodies.remove(&id)
    }

    pub fn get(&self, id: EntityId) -> Option<B> {
        self.bodies.get(&id).copied()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.bodies.contains_key(&id)
    }

    /// All (id, handle) pairs. Order is unspecified.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, B)> + '_ {
        self.bodies.iter().map(|(id, body)| (*id, *body))
    }

    /// All handles. Order is unspecified.
    pub fn handles(&self) -> impl Iterator<Item = B> + '_ {
        self.bodies.values().copied()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn clear(&mut self) {
        self.bodies.clear();
    }
}
