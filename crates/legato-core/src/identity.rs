//! Weak identity table: native address → live handle.
//!
//! The table deduplicates proxies. It holds plain [`ValueRef`]s that are
//! neither roots nor traced edges, so an entry never keeps a handle alive.
//! Entries whose slot was collected, or whose handle was invalidated, are
//! pruned lazily on lookup and eagerly by the collector's sweep.
//!
//! Identity is per (address, kind): a native library may legitimately hand
//! out the same address as two different kinds.

use rustc_hash::FxHashMap;

use crate::{HostHeap, KindHash, NativePtr, ValueRef};

type IdentityKey = (usize, KindHash);

/// Weak-valued map from native identity to handle.
#[derive(Debug, Default)]
pub struct IdentityTable {
    entries: FxHashMap<IdentityKey, ValueRef>,
}

impl IdentityTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Register `handle` for `(ptr, kind)`, returning any previous entry.
    pub fn insert(&mut self, ptr: NativePtr, kind: KindHash, handle: ValueRef) -> Option<ValueRef> {
        self.entries.insert((ptr.addr(), kind), handle)
    }

    /// Find the live handle for `(ptr, kind)`.
    ///
    /// A stale entry is removed and reported as absent.
    pub fn find_live(
        &mut self,
        heap: &HostHeap,
        ptr: NativePtr,
        kind: KindHash,
    ) -> Option<ValueRef> {
        let key = (ptr.addr(), kind);
        let candidate = *self.entries.get(&key)?;
        let live = heap
            .get(candidate)
            .ok()
            .and_then(|object| object.as_handle())
            .is_some_and(|handle| handle.native_ptr() == Some(ptr));
        if live {
            Some(candidate)
        } else {
            self.entries.remove(&key);
            None
        }
    }

    /// Remove the entry for `(addr, kind)` only if it still names `handle`.
    pub fn remove_if(&mut self, addr: usize, kind: KindHash, handle: ValueRef) -> bool {
        if self.entries.get(&(addr, kind)) == Some(&handle) {
            self.entries.remove(&(addr, kind));
            true
        } else {
            false
        }
    }

    /// Drop every entry whose handle is no longer live. Returns the number removed.
    pub fn prune(&mut self, heap: &HostHeap) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, r| {
            heap.get(*r)
                .ok()
                .and_then(|object| object.as_handle())
                .is_some_and(|handle| handle.is_alive())
        });
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
