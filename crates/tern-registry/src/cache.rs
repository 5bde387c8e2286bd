//! Three-state descriptor cache slots.
//!
//! A key is absent (uninitialized) until a build reserves it; the build then
//! publishes its skeleton through the `InProgress` slot and marks it `Ready`
//! when done. Each key takes each transition exactly once. A build that
//! fails releases its reservation, so the key reads as uninitialized again.

use std::fmt::Display;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use tern_core::{DescriptorId, RegistryError};

/// The observable state of one cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotState {
    /// Never looked up.
    Uninitialized,
    /// Being built; the id is the published skeleton.
    InProgress(DescriptorId),
    /// Fully built.
    Ready(DescriptorId),
}

impl SlotState {
    /// The descriptor, if the key was reserved.
    pub fn descriptor(self) -> Option<DescriptorId> {
        match self {
            SlotState::Uninitialized => None,
            SlotState::InProgress(id) | SlotState::Ready(id) => Some(id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CacheSlot {
    InProgress(DescriptorId),
    Ready(DescriptorId),
}

/// Memoizes descriptors by declaration identity.
///
/// Maps key → slot. Absent keys are uninitialized.
#[derive(Debug, Clone)]
pub struct DescriptorCache<K> {
    slots: FxHashMap<K, CacheSlot>,
}

impl<K> Default for DescriptorCache<K> {
    fn default() -> Self {
        Self {
            slots: FxHashMap::default(),
        }
    }
}

impl<K: Eq + Hash + Display> DescriptorCache<K> {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of `key`.
    pub fn state(&self, key: &K) -> SlotState {
        match self.slots.get(key) {
            None => SlotState::Uninitialized,
            Some(CacheSlot::InProgress(id)) => SlotState::InProgress(*id),
            Some(CacheSlot::Ready(id)) => SlotState::Ready(*id),
        }
    }

    /// Reserve `key` for a build whose skeleton is `skeleton`.
    pub fn reserve(&mut self, key: K, skeleton: DescriptorId) -> Result<(), RegistryError> {
        if self.slots.contains_key(&key) {
            return Err(RegistryError::SlotAlreadyReserved {
                key: key.to_string(),
            });
        }
        self.slots.insert(key, CacheSlot::InProgress(skeleton));
        Ok(())
    }

    /// Mark the build of `key` finished.
    pub fn mark_ready(&mut self, key: &K) -> Result<DescriptorId, RegistryError> {
        let Some(slot) = self.slots.get_mut(key) else {
            return Err(RegistryError::SlotNotReserved {
                key: key.to_string(),
            });
        };
        match *slot {
            CacheSlot::InProgress(id) => {
                *slot = CacheSlot::Ready(id);
                Ok(id)
            }
            CacheSlot::Ready(_) => Err(RegistryError::SlotAlreadyReserved {
                key: key.to_string(),
            }),
        }
    }

    /// Drop the reservation of a build that failed.
    ///
    /// Ready slots are never released. Returns whether a slot was dropped.
    pub fn release(&mut self, key: &K) -> bool {
        match self.slots.get(key) {
            Some(CacheSlot::InProgress(_)) => {
                self.slots.remove(key);
                true
            }
            _ => false,
        }
    }

    /// The descriptor of `key` once fully built.
    pub fn ready(&self, key: &K) -> Option<DescriptorId> {
        match self.slots.get(key) {
            Some(CacheSlot::Ready(id)) => Some(*id),
            _ => None,
        }
    }

    /// Number of reserved keys.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of keys still being built.
    pub fn in_progress_count(&self) -> usize {
        self.slots
            .values()
            .filter(|s| matches!(s, CacheSlot::InProgress(_)))
            .count()
    }
}
