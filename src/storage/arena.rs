//! Generational arena backing the vertex and edge collections.
//!
//! Slots are reused through a free list; each reuse bumps the slot's
//! generation so that stale keys miss instead of aliasing.

use std::marker::PhantomData;

use crate::model::{EdgeId, VertexId};
use crate::{Error, Result};

/// Key types that address an [`Arena`].
pub(crate) trait ArenaKey: Copy {
    fn from_parts(index: u32, generation: u32) -> Self;
    fn index(self) -> usize;
    fn generation(self) -> u32;
}

impl ArenaKey for VertexId {
    fn from_parts(index: u32, generation: u32) -> Self {
        VertexId { index, generation }
    }
    fn index(self) -> usize {
        self.index as usize
    }
    fn generation(self) -> u32 {
        self.generation
    }
}

impl ArenaKey for EdgeId {
    fn from_parts(index: u32, generation: u32) -> Self {
        EdgeId { index, generation }
    }
    fn index(self) -> usize {
        self.index as usize
    }
    fn generation(self) -> u32 {
        self.generation
    }
}

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

#[derive(Debug)]
pub(crate) struct Arena<K, T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    len: usize,
    _key: PhantomData<fn() -> K>,
}

impl<K: ArenaKey, T> Arena<K, T> {
    pub(crate) fn new() -> Self {
        Self::with_capacity(0)
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
            _key: PhantomData,
        }
    }

    /// Insert a value built from its own key.
    ///
    /// Fails only when every one of the `u32::MAX` slot indices is taken.
    pub(crate) fn insert_with(&mut self, build: impl FnOnce(K) -> T) -> Result<K> {
        let key = if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            let key = K::from_parts(index, slot.generation);
            slot.value = Some(build(key));
            key
        } else {
            let index = slot_index(self.slots.len())?;
            let key = K::from_parts(index, 0);
            self.slots.push(Slot { generation: 0, value: Some(build(key)) });
            key
        };
        self.len += 1;
        Ok(key)
    }

    pub(crate) fn get(&self, key: K) -> Option<&T> {
        self.slots
            .get(key.index())
            .filter(|slot| slot.generation == key.generation())
            .and_then(|slot| slot.value.as_ref())
    }

    pub(crate) fn get_mut(&mut self, key: K) -> Option<&mut T> {
        self.slots
            .get_mut(key.index())
            .filter(|slot| slot.generation == key.generation())
            .and_then(|slot| slot.value.as_mut())
    }

    pub(crate) fn contains(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    pub(crate) fn remove(&mut self, key: K) -> Option<T> {
        let slot = self.slots.get_mut(key.index())?;
        if slot.generation != key.generation() {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(key.index() as u32);
        self.len -= 1;
        Some(value)
    }

    /// Drop every value. Keys issued before the call become stale.
    pub(crate) fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.value.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index as u32);
            }
        }
        self.len = 0;
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Live entries in slot order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (K, &T)> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.value
                .as_ref()
                .map(|value| (K::from_parts(index as u32, slot.generation), value))
        })
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.iter().map(|(key, _)| key)
    }
}

/// Index for a slot appended at position `len`.
fn slot_index(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| Error::InvalidState(format!("arena is full at {len} slots")))
}

impl<K: ArenaKey, T> Default for Arena<K, T> {
    fn default() -> Self {
        Self::new()
    }
}
