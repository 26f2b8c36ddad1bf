//! Generational arena for host objects.
//!
//! The host heap stores every value the script side can hold a reference to:
//! resource [`Handle`]s and opaque script values. Slots are addressed by
//! [`ValueRef`], a copyable (index, generation) pair. When a slot is freed its
//! generation is incremented, so a reference that outlived its object is
//! detected instead of silently reading a recycled slot.
//!
//! Each slot carries a root count: the number of references held by script
//! code. The collector treats rooted slots as the roots of its mark phase.

use std::any::Any;
use std::fmt;

use crate::{AccessError, Handle};

/// Reference to a host object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValueRef {
    /// Index into `HostHeap::slots`
    pub index: u32,
    /// Generation for stale-reference detection
    pub generation: u32,
}

impl ValueRef {
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    fn collected(self) -> AccessError {
        AccessError::Collected {
            index: self.index,
            generation: self.generation,
        }
    }
}

impl fmt::Display for ValueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// Anything the script side can reference.
pub enum HostObject {
    /// A wrapped native resource.
    Handle(Handle),
    /// A plain script value.
    Value(Box<dyn Any>),
}

impl HostObject {
    pub fn as_handle(&self) -> Option<&Handle> {
        match self {
            HostObject::Handle(handle) => Some(handle),
            HostObject::Value(_) => None,
        }
    }

    pub fn as_handle_mut(&mut self) -> Option<&mut Handle> {
        match self {
            HostObject::Handle(handle) => Some(handle),
            HostObject::Value(_) => None,
        }
    }

    /// The host reference this object keeps reachable, if any.
    pub fn traced_edge(&self) -> Option<ValueRef> {
        self.as_handle().and_then(Handle::keep_alive)
    }
}

impl fmt::Debug for HostObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostObject::Handle(handle) => f.debug_tuple("Handle").field(handle).finish(),
            HostObject::Value(_) => f.write_str("Value(..)"),
        }
    }
}

struct HeapSlot {
    generation: u32,
    object: Option<HostObject>,
    roots: u32,
}

/// Slot storage for host objects.
pub struct HostHeap {
    slots: Vec<HeapSlot>,
    free_list: Vec<u32>,
    live: usize,
}

impl HostHeap {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            live: 0,
        }
    }

    /// Allocate an object holding one script root.
    pub fn allocate(&mut self, object: HostObject) -> ValueRef {
        self.live += 1;
        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            slot.object = Some(object);
            slot.roots = 1;
            ValueRef::new(index, slot.generation)
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(HeapSlot {
                generation: 0,
                object: Some(object),
                roots: 1,
            });
            ValueRef::new(index, 0)
        }
    }

    fn slot(&self, r: ValueRef) -> Option<&HeapSlot> {
        self.slots
            .get(r.index as usize)
            .filter(|slot| slot.generation == r.generation && slot.object.is_some())
    }

    fn slot_mut(&mut self, r: ValueRef) -> Option<&mut HeapSlot> {
        self.slots
            .get_mut(r.index as usize)
            .filter(|slot| slot.generation == r.generation && slot.object.is_some())
    }

    pub fn get(&self, r: ValueRef) -> Result<&HostObject, AccessError> {
        self.slot(r)
            .and_then(|slot| slot.object.as_ref())
            .ok_or_else(|| r.collected())
    }

    pub fn get_mut(&mut self, r: ValueRef) -> Result<&mut HostObject, AccessError> {
        self.slot_mut(r)
            .and_then(|slot| slot.object.as_mut())
            .ok_or_else(|| r.collected())
    }

    /// Returns true if `r` still names a live slot.
    pub fn contains(&self, r: ValueRef) -> bool {
        self.slot(r).is_some()
    }

    /// Add a script root. Returns the new root count.
    pub fn retain(&mut self, r: ValueRef) -> Result<u32, AccessError> {
        let slot = self.slot_mut(r).ok_or_else(|| r.collected())?;
        slot.roots = slot.roots.saturating_add(1);
        Ok(slot.roots)
    }

    /// Drop a script root. Returns the new root count.
    ///
    /// The object stays in place until the next collection finds it
    /// unreachable.
    pub fn release(&mut self, r: ValueRef) -> Result<u32, AccessError> {
        let slot = self.slot_mut(r).ok_or_else(|| r.collected())?;
        slot.roots = slot.roots.saturating_sub(1);
        Ok(slot.roots)
    }

    pub fn roots(&self, r: ValueRef) -> Option<u32> {
        self.slot(r).map(|slot| slot.roots)
    }

    /// Free a slot, bumping its generation. Returns the evicted object.
    pub fn free(&mut self, r: ValueRef) -> Option<HostObject> {
        let slot = self.slot_mut(r)?;
        let object = slot.object.take();
        slot.roots = 0;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(r.index);
        self.live -= 1;
        object
    }

    /// Drop every script root (used at teardown).
    pub fn clear_roots(&mut self) {
        for slot in &mut self.slots {
            slot.roots = 0;
        }
    }

    /// Iterate over live objects with their root counts.
    pub fn iter(&self) -> impl Iterator<Item = (ValueRef, &HostObject, u32)> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.object.as_ref().map(|object| {
                (
                    ValueRef::new(index as u32, slot.generation),
                    object,
                    slot.roots,
                )
            })
        })
    }

    /// Number of slots ever allocated, live or free.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}

impl Default for HostHeap {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HostHeap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostHeap")
            .field("slot_count", &self.slots.len())
            .field("free_count", &self.free_list.len())
            .field("live", &self.live)
            .finish()
    }
}
