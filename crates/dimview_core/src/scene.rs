//! Scene abstraction
//!
//! The [`Scene`] trait is the surface shapes draw into. [`SceneGraph`] is the
//! in-memory implementation renderers read from.

use slotmap::{new_key_type, SlotMap};
use crate::Primitive;

// Define generational key type for primitives
new_key_type! {
    /// Key to a primitive in a scene
    ///
    /// Uses generational indexing: once a primitive is removed, its old key
    /// returns None even if the slot is reused.
    pub struct PrimitiveKey;
}

/// A rendering surface that accepts drawable primitives
pub trait Scene {
    /// Add a primitive, returning its key
    fn add(&mut self, primitive: Primitive) -> PrimitiveKey;

    /// Remove a primitive and return it
    fn remove(&mut self, key: PrimitiveKey) -> Option<Primitive>;

    /// Get a primitive by key
    fn get(&self, key: PrimitiveKey) -> Option<&Primitive>;

    /// Get a mutable primitive by key
    fn get_mut(&mut self, key: PrimitiveKey) -> Option<&mut Primitive>;

    /// Number of primitives in the scene
    fn len(&self) -> usize;

    /// Check if the scene is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Show or hide a primitive; returns false if the key is stale
    fn set_visible(&mut self, key: PrimitiveKey, visible: bool) -> bool {
        match self.get_mut(key) {
            Some(primitive) => {
                primitive.set_visible(visible);
                true
            }
            None => false,
        }
    }
}

/// In-memory scene backed by a slot map
#[derive(Default)]
pub struct SceneGraph {
    primitives: SlotMap<PrimitiveKey, Primitive>,
}

impl SceneGraph {
    /// Create a new empty scene
    pub fn new() -> Self {
        Self {
            primitives: SlotMap::with_key(),
        }
    }

    /// Iterate over all primitives
    pub fn iter(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives.values()
    }

    /// Iterate over keys and primitives
    pub fn iter_with_keys(&self) -> impl Iterator<Item = (PrimitiveKey, &Primitive)> {
        self.primitives.iter()
    }

    /// Iterate over visible primitives only
    pub fn visible(&self) -> impl Iterator<Item = &Primitive> {
        self.iter().filter(|p| p.is_visible())
    }

    /// Check if any primitive changed since the last [`SceneGraph::clear_dirty`]
    pub fn has_dirty(&self) -> bool {
        self.iter().any(Primitive::is_dirty)
    }

    /// Clear dirty flags on every primitive
    pub fn clear_dirty(&mut self) {
        for primitive in self.primitives.values_mut() {
            primitive.clear_dirty();
        }
    }

    /// Remove every primitive
    pub fn clear(&mut self) {
        self.primitives.clear();
    }
}

impl Scene for SceneGraph {
    fn add(&mut self, primitive: Primitive) -> PrimitiveKey {
        self.primitives.insert(primitive)
    }

    fn remove(&mut self, key: PrimitiveKey) -> Option<Primitive> {
        self.primitives.remove(key)
    }

    fn get(&self, key: PrimitiveKey) -> Option<&Primitive> {
        self.primitives.get(key)
    }

    fn get_mut(&mut self, key: PrimitiveKey) -> Option<&mut Primitive> {
        self.primitives.get_mut(key)
    }

    fn len(&self) -> usize {
        self.primitives.len()
    }
}
