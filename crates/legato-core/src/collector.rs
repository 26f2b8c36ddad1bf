//! Mark & sweep collection over the host heap.
//!
//! ## Algorithm
//!
//! 1. Mark: every slot with a script root is live; liveness propagates along
//!    keep-alive edges (a dependent keeps its ancestor reachable).
//! 2. Order: unmarked slots are finalized dependents first. Each dead slot
//!    counts the dead dependents still pointing at it and only becomes ready
//!    once that count reaches zero. Dependency edges form a forest, so every
//!    dead slot is eventually ready.
//! 3. Finalize: an owning handle of an automatically finalized kind goes
//!    through the destroy path. An owning handle of an explicit-only kind is
//!    reported as leaked. Every other handle is simply invalidated.
//! 4. Free: identity entries for the slot are dropped and the slot's
//!    generation is bumped.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

use crate::{HostHeap, HostObject, IdentityTable, KindRegistry, ValueRef};

/// Result of one collection cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectionStats {
    /// Live slots found during mark.
    pub marked: usize,
    /// Native destructors invoked by finalization.
    pub finalized: usize,
    /// Handles reclaimed without a native call (non-owning or already destroyed).
    pub released: usize,
    /// Owning handles of explicit-only kinds reclaimed without teardown.
    pub leaked: usize,
    /// Slots freed in total, handles and plain values.
    pub freed: usize,
}

/// Mark every slot reachable from script roots.
pub fn mark(heap: &HostHeap) -> Vec<bool> {
    let mut marks = vec![false; heap.capacity()];
    let mut work: Vec<ValueRef> = heap
        .iter()
        .filter(|(_, _, roots)| *roots > 0)
        .map(|(r, _, _)| r)
        .collect();

    while let Some(r) = work.pop() {
        let Some(mark) = marks.get_mut(r.index as usize) else {
            continue;
        };
        if *mark {
            continue;
        }
        *mark = true;
        if let Some(edge) = heap.get(r).ok().and_then(HostObject::traced_edge) {
            work.push(edge);
        }
    }
    marks
}

/// Order unmarked slots so every dependent precedes its ancestor.
pub fn finalization_order(heap: &HostHeap, marks: &[bool]) -> Vec<ValueRef> {
    let is_dead = |r: ValueRef| !marks.get(r.index as usize).copied().unwrap_or(false);

    let dead: Vec<(ValueRef, Option<ValueRef>)> = heap
        .iter()
        .filter(|(r, _, _)| is_dead(*r))
        .map(|(r, object, _)| (r, object.traced_edge()))
        .collect();

    let mut pending: FxHashMap<ValueRef, usize> = FxHashMap::default();
    for (_, edge) in &dead {
        if let Some(ancestor) = edge.filter(|a| is_dead(*a)) {
            *pending.entry(ancestor).or_insert(0) += 1;
        }
    }

    let edges: FxHashMap<ValueRef, Option<ValueRef>> = dead.iter().copied().collect();
    let mut ready: VecDeque<ValueRef> = dead
        .iter()
        .map(|(r, _)| *r)
        .filter(|r| !pending.contains_key(r))
        .collect();

    let mut order = Vec::with_capacity(dead.len());
    while let Some(r) = ready.pop_front() {
        order.push(r);
        let Some(ancestor) = edges.get(&r).copied().flatten() else {
            continue;
        };
        if let Some(count) = pending.get_mut(&ancestor) {
            *count -= 1;
            if *count == 0 {
                pending.remove(&ancestor);
                ready.push_back(ancestor);
            }
        }
    }
    order
}

/// Run a full collection cycle.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn collect(
    heap: &mut HostHeap,
    identity: &mut IdentityTable,
    kinds: &KindRegistry,
) -> CollectionStats {
    let marks = mark(heap);
    let mut stats = CollectionStats {
        marked: marks.iter().filter(|m| **m).count(),
        ..CollectionStats::default()
    };

    for r in finalization_order(heap, &marks) {
        if let Ok(HostObject::Handle(handle)) = heap.get_mut(r) {
            let kind_hash = handle.kind();
            let addr = handle.native_ptr().map(|ptr| ptr.addr());
            match (handle.destroy_target(), kinds.get(kind_hash)) {
                (Some(_), Some(kind)) if kind.auto_finalize() => {
                    trace!(kind = kind.name(), slot = %r, "finalizing handle");
                    if handle.destroy_with(kind) {
                        stats.finalized += 1;
                    } else {
                        handle.invalidate();
                        stats.released += 1;
                    }
                }
                (Some(ptr), kind) => {
                    let name = kind.map_or_else(|| kind_hash.to_string(), |k| k.name().to_string());
                    warn!(kind = %name, %ptr, "unreachable owning handle requires explicit destroy; native resource leaked");
                    handle.invalidate();
                    stats.leaked += 1;
                }
                (None, _) => {
                    handle.invalidate();
                    stats.released += 1;
                }
            }
            if let Some(addr) = addr {
                identity.remove_if(addr, kind_hash, r);
            }
        }
        heap.free(r);
        stats.freed += 1;
    }

    identity.prune(heap);
    debug!(
        marked = stats.marked,
        finalized = stats.finalized,
        released = stats.released,
        leaked = stats.leaked,
        freed = stats.freed,
        "collection finished"
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Handle, KindHash, NativePtr};

    fn handle(heap: &mut HostHeap, addr: usize, keep_alive: Option<ValueRef>) -> ValueRef {
        let ptr = NativePtr::from_addr(addr).unwrap();
        heap.allocate(HostObject::Handle(Handle::new(
            ptr,
            KindHash::from_name("legato_bitmap"),
            true,
            keep_alive,
        )))
    }

    #[test]
    fn mark_follows_keep_alive_edges() {
        let mut heap = HostHeap::new();
        let parent = handle(&mut heap, 0x10, None);
        let child = handle(&mut heap, 0x20, Some(parent));
        let orphan = handle(&mut heap, 0x30, None);
        heap.release(parent).unwrap();
        heap.release(orphan).unwrap();

        let marks = mark(&heap);
        assert!(marks[parent.index as usize]);
        assert!(marks[child.index as usize]);
        assert!(!marks[orphan.index as usize]);
    }

    #[test]
    fn dependents_are_ordered_before_ancestors() {
        let mut heap = HostHeap::new();
        let root = handle(&mut heap, 0x10, None);
        let mid = handle(&mut heap, 0x20, Some(root));
        let leaf_a = handle(&mut heap, 0x30, Some(mid));
        let leaf_b = handle(&mut heap, 0x40, Some(mid));
        heap.clear_roots();

        let marks = mark(&heap);
        let order = finalization_order(&heap, &marks);
        let pos = |r: ValueRef| order.iter().position(|o| *o == r).unwrap();

        assert_eq!(order.len(), 4);
        assert!(pos(leaf_a) < pos(mid));
        assert!(pos(leaf_b) < pos(mid));
        assert!(pos(mid) < pos(root));
    }

    #[test]
    fn live_ancestor_is_not_ordered() {
        let mut heap = HostHeap::new();
        let parent = handle(&mut heap, 0x10, None);
        let child = handle(&mut heap, 0x20, Some(parent));
        heap.release(child).unwrap();

        let marks = mark(&heap);
        assert_eq!(finalization_order(&heap, &marks), vec![child]);
    }

    #[test]
    fn unregistered_owning_kind_is_leaked_not_destroyed() {
        let mut heap = HostHeap::new();
        let mut identity = IdentityTable::new();
        let kinds = KindRegistry::new();
        let r = handle(&mut heap, 0x10, None);
        heap.release(r).unwrap();

        let stats = collect(&mut heap, &mut identity, &kinds);
        assert_eq!(stats.leaked, 1);
        assert_eq!(stats.freed, 1);
        assert!(heap.is_empty());
    }
}
