//! The lifecycle bridge context.
//!
//! [`Bridge`] owns every piece of process-wide state the handle lifecycle
//! needs: the kind registry, the host heap, and the identity table. The
//! embedding application creates exactly one at startup and tears it down at
//! shutdown; there is no ambient global.
//!
//! ## Operations
//!
//! - [`Bridge::wrap`]: adopt a pointer a native constructor just returned.
//! - [`Bridge::wrap_by_pointer`]: expose a pointer the native layer still owns,
//!   reusing the existing proxy when there is one.
//! - [`Bridge::unwrap`]: checked access before every native call.
//! - [`Bridge::unwrap_for_destroy`]: the single check shared by explicit
//!   destroy and finalization.
//! - [`Bridge::invalidate`]: the only transition into the dead state.
//!
//! ## Example
//!
//! ```
//! use legato_core::{Bridge, NativePtr, ResourceKind};
//!
//! let mut bridge = Bridge::new();
//! let config = bridge.register_kind(ResourceKind::new("legato_config", |_| {})).unwrap();
//!
//! let handle = bridge.wrap(NativePtr::from_addr(0x1000), config, true, None).unwrap();
//! assert_eq!(bridge.unwrap(handle, config).unwrap().addr(), 0x1000);
//!
//! assert!(bridge.destroy(handle, config).unwrap());
//! assert!(!bridge.destroy(handle, config).unwrap());
//! assert!(bridge.unwrap(handle, config).is_err());
//! ```
//!
//! ## Thread Safety
//!
//! `Bridge` is single-threaded: it is neither `Send` nor `Sync`, and every
//! operation is synchronous. Native callbacks delivered on other threads must
//! be marshalled onto the owning thread before touching handles.

use std::any::Any;
use std::fmt;

use tracing::{debug, warn};

use crate::collector::{self, CollectionStats};
use crate::{
    AccessError, BridgeConfig, Handle, HostHeap, HostObject, IdentityTable, KindHash, KindRegistry,
    NativePtr, RegistrationError, ResourceKind, ValueRef, WrapError,
};

/// Cumulative counters over the lifetime of a bridge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BridgeStats {
    /// Handles created by `wrap` and `wrap_by_pointer`.
    pub handles_created: u64,
    /// `wrap_by_pointer` calls answered from the identity table.
    pub identity_hits: u64,
    /// Native destructors invoked by explicit destroy.
    pub destroyed: u64,
    /// Native destructors invoked by the collector.
    pub finalized: u64,
    /// Owning handles of explicit-only kinds collected without teardown.
    pub leaked: u64,
    /// Collection cycles run.
    pub collections: u64,
}

/// Process-wide handle lifecycle context.
pub struct Bridge {
    config: BridgeConfig,
    kinds: KindRegistry,
    heap: HostHeap,
    identity: IdentityTable,
    stats: BridgeStats,
    allocations_since_collect: u32,
}

impl Bridge {
    pub fn new() -> Self {
        Self::with_config(BridgeConfig::default())
    }

    pub fn with_config(config: BridgeConfig) -> Self {
        Self {
            kinds: KindRegistry::new(),
            heap: HostHeap::with_capacity(config.initial_capacity),
            identity: IdentityTable::with_capacity(config.initial_capacity),
            stats: BridgeStats::default(),
            allocations_since_collect: 0,
            config,
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn stats(&self) -> BridgeStats {
        self.stats
    }

    // =========================================================================
    // Kinds
    // =========================================================================

    /// Register a kind descriptor.
    pub fn register_kind(&mut self, kind: ResourceKind) -> Result<KindHash, RegistrationError> {
        let name = kind.name().to_string();
        let finalization = kind.finalization();
        let hash = self.kinds.register(kind)?;
        debug!(kind = %name, ?finalization, "registered resource kind");
        Ok(hash)
    }

    pub fn kind(&self, hash: KindHash) -> Option<&ResourceKind> {
        self.kinds.get(hash)
    }

    pub fn kinds(&self) -> &KindRegistry {
        &self.kinds
    }

    // =========================================================================
    // Lifetime operations
    // =========================================================================

    /// Adopt the result of a native constructor.
    ///
    /// `ptr` is `None` when the constructor failed; that is reported as
    /// [`WrapError::NullPointer`] for the caller to branch on, and nothing is
    /// allocated. Otherwise a new handle is created holding one script root,
    /// keeping `dependency` reachable for as long as the handle is, and
    /// registered in the identity table.
    pub fn wrap(
        &mut self,
        ptr: Option<NativePtr>,
        kind: KindHash,
        owns: bool,
        dependency: Option<ValueRef>,
    ) -> Result<ValueRef, WrapError> {
        let name = self
            .kinds
            .get(kind)
            .map(|k| k.name().to_string())
            .ok_or(WrapError::UnknownKind { hash: kind })?;
        let Some(ptr) = ptr else {
            return Err(WrapError::NullPointer { kind: name });
        };
        if let Some(dep) = dependency
            && !self.heap.contains(dep)
        {
            return Err(WrapError::DeadDependency {
                kind: name,
                index: dep.index,
                generation: dep.generation,
            });
        }

        let handle = self
            .heap
            .allocate(HostObject::Handle(Handle::new(ptr, kind, owns, dependency)));
        if let Some(previous) = self.identity.insert(ptr, kind, handle)
            && self.handle_ref(previous).is_ok_and(Handle::owns)
        {
            warn!(kind = %name, %ptr, replaced = %previous, "identity entry replaced while previous handle still owns the resource");
        }
        self.stats.handles_created += 1;
        debug!(kind = %name, %ptr, owns, dependency = ?dependency, handle = %handle, "new object");

        self.note_allocation();
        Ok(handle)
    }

    /// Expose a pointer the native layer still owns.
    ///
    /// Returns the existing live handle for `(ptr, kind)` when there is one,
    /// adding a script root for the caller. Otherwise creates a non-owning
    /// handle through [`Bridge::wrap`].
    pub fn wrap_by_pointer(
        &mut self,
        ptr: Option<NativePtr>,
        kind: KindHash,
        dependency: Option<ValueRef>,
    ) -> Result<ValueRef, WrapError> {
        if let Some(ptr) = ptr
            && let Some(existing) = self.identity.find_live(&self.heap, ptr, kind)
        {
            // A live identity entry always names a live slot.
            let retained = self.heap.retain(existing);
            debug_assert!(
                retained.is_ok(),
                "identity entry {existing} names a collected slot"
            );
            self.stats.identity_hits += 1;
            debug!(%ptr, handle = %existing, "reusing handle");
            return Ok(existing);
        }
        self.wrap(ptr, kind, false, dependency)
    }

    /// Checked access to a live handle's native pointer.
    pub fn unwrap(&self, handle: ValueRef, kind: KindHash) -> Result<NativePtr, AccessError> {
        let h = self.checked_handle(handle, kind)?;
        h.native_ptr().ok_or_else(|| AccessError::UseAfterFree {
            kind: self.kinds.name_of(kind),
        })
    }

    /// The pointer to destroy, if this handle is live and owning.
    ///
    /// `Ok(None)` is not an error: the handle was already destroyed, or it
    /// never owned its resource.
    pub fn unwrap_for_destroy(
        &self,
        handle: ValueRef,
        kind: KindHash,
    ) -> Result<Option<NativePtr>, AccessError> {
        Ok(self.checked_handle(handle, kind)?.destroy_target())
    }

    /// Move a handle into the dead state.
    ///
    /// Drops the keep-alive reference, clears the pointer and the ownership
    /// flag, and forgets the handle's identity entry. Idempotent.
    pub fn invalidate(&mut self, handle: ValueRef) -> Result<(), AccessError> {
        let h = self.handle_mut(handle)?;
        let kind = h.kind();
        let ptr = h.native_ptr();
        let dropped = h.invalidate();
        if let Some(ptr) = ptr {
            self.identity.remove_if(ptr.addr(), kind, handle);
            debug!(kind = %self.kinds.name_of(kind), %ptr, dependency = ?dropped, "clear object");
        }
        Ok(())
    }

    /// Destroy a handle explicitly.
    ///
    /// Runs the kind's native destructor only if [`Bridge::unwrap_for_destroy`]
    /// yields a pointer. The handle is invalidated before the destructor is
    /// called. Returns whether the destructor ran; destroying twice is a no-op.
    pub fn destroy(&mut self, handle: ValueRef, kind: KindHash) -> Result<bool, AccessError> {
        let Some(ptr) = self.unwrap_for_destroy(handle, kind)? else {
            return Ok(false);
        };
        if !self.kinds.contains(kind) {
            return Err(AccessError::UnknownKind { hash: kind });
        }
        self.invalidate(handle)?;
        let called = self.kinds.get(kind).is_some_and(|k| k.destroy_native(ptr));
        if called {
            self.stats.destroyed += 1;
        }
        Ok(called)
    }

    // =========================================================================
    // Script references
    // =========================================================================

    /// Allocate a plain script value (one root).
    pub fn alloc_value<T: Any>(&mut self, value: T) -> ValueRef {
        let r = self.heap.allocate(HostObject::Value(Box::new(value)));
        self.note_allocation();
        r
    }

    /// Borrow a plain script value.
    pub fn value<T: Any>(&self, r: ValueRef) -> Option<&T> {
        match self.heap.get(r).ok()? {
            HostObject::Value(value) => value.downcast_ref::<T>(),
            HostObject::Handle(_) => None,
        }
    }

    /// Add a script reference. Returns the new root count.
    pub fn retain(&mut self, r: ValueRef) -> Result<u32, AccessError> {
        self.heap.retain(r)
    }

    /// Drop a script reference. Returns the new root count.
    pub fn release(&mut self, r: ValueRef) -> Result<u32, AccessError> {
        self.heap.release(r)
    }

    pub fn root_count(&self, r: ValueRef) -> Option<u32> {
        self.heap.roots(r)
    }

    /// Returns true once the collector has reclaimed `r`.
    pub fn is_collected(&self, r: ValueRef) -> bool {
        !self.heap.contains(r)
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// Borrow the handle record behind `r`.
    pub fn handle_ref(&self, r: ValueRef) -> Result<&Handle, AccessError> {
        self.heap.get(r)?.as_handle().ok_or(AccessError::NotAHandle)
    }

    /// Returns true if `r` is a handle that has not been invalidated.
    pub fn is_alive(&self, r: ValueRef) -> bool {
        self.handle_ref(r).is_ok_and(Handle::is_alive)
    }

    pub fn owns(&self, r: ValueRef) -> Result<bool, AccessError> {
        Ok(self.handle_ref(r)?.owns())
    }

    pub fn kind_of(&self, r: ValueRef) -> Result<KindHash, AccessError> {
        Ok(self.handle_ref(r)?.kind())
    }

    pub fn dependency_of(&self, r: ValueRef) -> Result<Option<ValueRef>, AccessError> {
        Ok(self.handle_ref(r)?.keep_alive())
    }

    /// Find the live handle for a native pointer without adding a root.
    pub fn lookup(&mut self, ptr: NativePtr, kind: KindHash) -> Option<ValueRef> {
        self.identity.find_live(&self.heap, ptr, kind)
    }

    /// Diagnostic rendering: `"<kind>: 0x<addr>"`, or `"<kind>: (destroyed)"`.
    pub fn describe(&self, r: ValueRef) -> String {
        match self.heap.get(r) {
            Ok(HostObject::Handle(h)) => {
                let name = self.kinds.name_of(h.kind());
                match h.native_ptr() {
                    Some(ptr) => format!("{name}: {ptr}"),
                    None => format!("{name}: (destroyed)"),
                }
            }
            Ok(HostObject::Value(_)) => format!("value: {r}"),
            Err(_) => format!("collected: {r}"),
        }
    }

    /// Resource equality: same kind, both alive, same native address.
    ///
    /// A destroyed handle is not equal to anything, itself included.
    pub fn same_resource(&self, a: ValueRef, b: ValueRef) -> bool {
        match (self.handle_ref(a), self.handle_ref(b)) {
            (Ok(x), Ok(y)) => {
                x.kind() == y.kind() && x.native_ptr().is_some() && x.native_ptr() == y.native_ptr()
            }
            _ => false,
        }
    }

    /// Number of live (not invalidated, not collected) handles.
    pub fn live_handles(&self) -> usize {
        self.heap
            .iter()
            .filter(|(_, object, _)| object.as_handle().is_some_and(Handle::is_alive))
            .count()
    }

    /// Number of host objects in the heap, dead handles included.
    pub fn heap_len(&self) -> usize {
        self.heap.len()
    }

    pub fn identity_len(&self) -> usize {
        self.identity.len()
    }

    // =========================================================================
    // Collection
    // =========================================================================

    /// Run a full collection cycle.
    pub fn collect(&mut self) -> CollectionStats {
        let stats = collector::collect(&mut self.heap, &mut self.identity, &self.kinds);
        self.allocations_since_collect = 0;
        self.stats.collections += 1;
        self.stats.finalized += stats.finalized as u64;
        self.stats.leaked += stats.leaked as u64;
        stats
    }

    /// Tear down: drop every script root and collect everything.
    ///
    /// Each automatically finalized owning handle is destroyed exactly once,
    /// dependents before ancestors. The bridge stays usable afterwards.
    pub fn shutdown(&mut self) -> CollectionStats {
        self.heap.clear_roots();
        let stats = self.collect();
        self.identity.clear();
        debug!(
            finalized = stats.finalized,
            leaked = stats.leaked,
            "bridge shut down"
        );
        stats
    }

    fn note_allocation(&mut self) {
        self.allocations_since_collect += 1;
        if let Some(threshold) = self.config.auto_collect_threshold
            && self.allocations_since_collect >= threshold
        {
            self.collect();
        }
    }

    fn checked_handle(&self, r: ValueRef, expected: KindHash) -> Result<&Handle, AccessError> {
        let h = self.handle_ref(r)?;
        if h.kind() != expected {
            return Err(AccessError::TypeMismatch {
                expected: self.kinds.name_of(expected),
                found: self.kinds.name_of(h.kind()),
            });
        }
        Ok(h)
    }

    fn handle_mut(&mut self, r: ValueRef) -> Result<&mut Handle, AccessError> {
        self.heap
            .get_mut(r)?
            .as_handle_mut()
            .ok_or(AccessError::NotAHandle)
    }
}

impl Default for Bridge {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Bridge {
    fn drop(&mut self) {
        if self.config.finalize_on_drop && !self.heap.is_empty() {
            self.shutdown();
        }
    }
}

impl fmt::Debug for Bridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bridge")
            .field("kinds", &self.kinds)
            .field("heap", &self.heap)
            .field("identity_len", &self.identity.len())
            .field("stats", &self.stats)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::panic::{self, AssertUnwindSafe};
    use std::rc::Rc;

    use super::*;

    fn ptr(addr: usize) -> Option<NativePtr> {
        NativePtr::from_addr(addr)
    }

    fn bridge_with_log() -> (Bridge, KindHash, Rc<RefCell<Vec<usize>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let mut bridge = Bridge::with_config(BridgeConfig::new().manual_collection());
        let kind = bridge
            .register_kind(ResourceKind::new("legato_bitmap", move |p| {
                sink.borrow_mut().push(p.addr())
            }))
            .unwrap();
        (bridge, kind, log)
    }

    #[test]
    fn wrap_unknown_kind_fails() {
        let mut bridge = Bridge::new();
        let hash = KindHash::from_name("legato_font");
        assert_eq!(
            bridge.wrap(ptr(0x10), hash, true, None),
            Err(WrapError::UnknownKind { hash })
        );
    }

    #[test]
    fn wrap_null_creates_nothing() {
        let (mut bridge, kind, _) = bridge_with_log();
        let err = bridge.wrap(None, kind, true, None).unwrap_err();
        assert_eq!(
            err,
            WrapError::NullPointer {
                kind: "legato_bitmap".into()
            }
        );
        assert_eq!(bridge.heap_len(), 0);
        assert_eq!(bridge.identity_len(), 0);
    }

    #[test]
    fn wrap_rejects_collected_dependency() {
        let (mut bridge, kind, _) = bridge_with_log();
        let parent = bridge.alloc_value("parent");
        bridge.release(parent).unwrap();
        bridge.collect();

        let err = bridge
            .wrap(ptr(0x10), kind, true, Some(parent))
            .unwrap_err();
        assert!(matches!(err, WrapError::DeadDependency { .. }));
    }

    #[test]
    fn unwrap_checks_kind_then_liveness() {
        let (mut bridge, kind, _) = bridge_with_log();
        let font = bridge
            .register_kind(ResourceKind::borrowed("legato_font"))
            .unwrap();
        let h = bridge.wrap(ptr(0x10), kind, true, None).unwrap();

        assert_eq!(
            bridge.unwrap(h, kind),
            Ok(NativePtr::from_addr(0x10).unwrap())
        );
        assert_eq!(
            bridge.unwrap(h, font),
            Err(AccessError::TypeMismatch {
                expected: "legato_font".into(),
                found: "legato_bitmap".into()
            })
        );

        bridge.invalidate(h).unwrap();
        assert_eq!(
            bridge.unwrap(h, kind),
            Err(AccessError::UseAfterFree {
                kind: "legato_bitmap".into()
            })
        );
    }

    #[test]
    fn unwrap_for_destroy_requires_ownership() {
        let (mut bridge, kind, _) = bridge_with_log();
        let owned = bridge.wrap(ptr(0x10), kind, true, None).unwrap();
        let borrowed = bridge.wrap_by_pointer(ptr(0x20), kind, None).unwrap();

        assert_eq!(
            bridge.unwrap_for_destroy(owned, kind),
            Ok(NativePtr::from_addr(0x10))
        );
        assert_eq!(bridge.unwrap_for_destroy(borrowed, kind), Ok(None));
    }

    #[test]
    fn unwrap_plain_value_is_not_a_handle() {
        let (mut bridge, kind, _) = bridge_with_log();
        let v = bridge.alloc_value(42u32);
        assert_eq!(bridge.unwrap(v, kind), Err(AccessError::NotAHandle));
        assert_eq!(bridge.value::<u32>(v), Some(&42));
        assert_eq!(bridge.value::<i64>(v), None);
    }

    #[test]
    fn destroy_is_idempotent() {
        let (mut bridge, kind, log) = bridge_with_log();
        let h = bridge.wrap(ptr(0x10), kind, true, None).unwrap();

        assert_eq!(bridge.destroy(h, kind), Ok(true));
        assert_eq!(bridge.destroy(h, kind), Ok(false));
        assert_eq!(*log.borrow(), vec![0x10]);
        assert_eq!(bridge.stats().destroyed, 1);
    }

    #[test]
    fn invalidate_forgets_identity() {
        let (mut bridge, kind, _) = bridge_with_log();
        let first = bridge.wrap_by_pointer(ptr(0x10), kind, None).unwrap();
        bridge.invalidate(first).unwrap();

        let second = bridge.wrap_by_pointer(ptr(0x10), kind, None).unwrap();
        assert_ne!(first, second);
        assert!(bridge.is_alive(second));
        assert!(!bridge.is_alive(first));
    }

    #[test]
    fn invalidate_drops_dependency() {
        let (mut bridge, kind, _) = bridge_with_log();
        let parent = bridge.wrap(ptr(0x10), kind, true, None).unwrap();
        let child = bridge.wrap(ptr(0x20), kind, true, Some(parent)).unwrap();
        assert_eq!(bridge.dependency_of(child), Ok(Some(parent)));

        bridge.invalidate(child).unwrap();
        assert_eq!(bridge.dependency_of(child), Ok(None));
    }

    #[test]
    fn wrap_by_pointer_adds_a_root_on_reuse() {
        let (mut bridge, kind, _) = bridge_with_log();
        let a = bridge.wrap_by_pointer(ptr(0x10), kind, None).unwrap();
        let b = bridge.wrap_by_pointer(ptr(0x10), kind, None).unwrap();

        assert_eq!(a, b);
        assert_eq!(bridge.root_count(a), Some(2));
        assert_eq!(bridge.stats().identity_hits, 1);
        assert_eq!(bridge.owns(a), Ok(false));
    }

    #[test]
    fn wrap_by_pointer_null_is_an_error() {
        let (mut bridge, kind, _) = bridge_with_log();
        assert!(matches!(
            bridge.wrap_by_pointer(None, kind, None),
            Err(WrapError::NullPointer { .. })
        ));
    }

    #[test]
    fn describe_and_equality() {
        let (mut bridge, kind, _) = bridge_with_log();
        let a = bridge.wrap(ptr(0x1000), kind, true, None).unwrap();
        let b = bridge.wrap_by_pointer(ptr(0x1000), kind, None).unwrap();
        let c = bridge.wrap(ptr(0x2000), kind, true, None).unwrap();

        assert_eq!(bridge.describe(a), "legato_bitmap: 0x1000");
        assert!(bridge.same_resource(a, b));
        assert!(!bridge.same_resource(a, c));

        bridge.destroy(a, kind).unwrap();
        assert_eq!(bridge.describe(a), "legato_bitmap: (destroyed)");
        assert!(!bridge.same_resource(a, a));
    }

    #[test]
    fn auto_collection_runs_at_threshold() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let mut bridge = Bridge::with_config(BridgeConfig::new().auto_collect_threshold(Some(2)));
        let kind = bridge
            .register_kind(ResourceKind::new("legato_timer", move |p| {
                sink.borrow_mut().push(p.addr())
            }))
            .unwrap();

        let first = bridge.wrap(ptr(0x10), kind, true, None).unwrap();
        bridge.release(first).unwrap();
        bridge.wrap(ptr(0x20), kind, true, None).unwrap();

        assert_eq!(bridge.stats().collections, 1);
        assert_eq!(*log.borrow(), vec![0x10]);
        assert!(bridge.is_collected(first));
    }

    #[test]
    fn lookup_finds_live_handle_without_rooting_it() {
        let (mut bridge, kind, _) = bridge_with_log();
        let target = NativePtr::from_addr(0x10).unwrap();
        assert_eq!(bridge.lookup(target, kind), None);

        let h = bridge.wrap(Some(target), kind, true, None).unwrap();
        assert_eq!(bridge.lookup(target, kind), Some(h));
        assert_eq!(bridge.root_count(h), Some(1));

        bridge.release(h).unwrap();
        bridge.collect();
        assert_eq!(bridge.lookup(target, kind), None);
        assert_eq!(bridge.identity_len(), 0);
    }

    fn bridge_with_failing_destructor() -> (Bridge, KindHash, Rc<Cell<u32>>) {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let mut bridge = Bridge::with_config(BridgeConfig::new().manual_collection());
        let kind = bridge
            .register_kind(ResourceKind::new("legato_voice", move |_| {
                counter.set(counter.get() + 1);
                if counter.get() == 1 {
                    panic!("native teardown failed");
                }
            }))
            .unwrap();
        (bridge, kind, calls)
    }

    #[test]
    fn unwinding_destroy_never_reaches_the_destructor_twice() {
        let (mut bridge, kind, calls) = bridge_with_failing_destructor();
        let h = bridge.wrap(ptr(0x10), kind, true, None).unwrap();

        let unwound = panic::catch_unwind(AssertUnwindSafe(|| bridge.destroy(h, kind)));
        assert!(unwound.is_err());
        assert!(!bridge.is_alive(h));
        assert_eq!(bridge.destroy(h, kind), Ok(false));

        drop(bridge);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn unwinding_finalizer_never_reaches_the_destructor_twice() {
        let (mut bridge, kind, calls) = bridge_with_failing_destructor();
        let h = bridge.wrap(ptr(0x10), kind, true, None).unwrap();
        bridge.release(h).unwrap();

        let unwound = panic::catch_unwind(AssertUnwindSafe(|| bridge.collect()));
        assert!(unwound.is_err());

        let stats = bridge.collect();
        assert_eq!(stats.finalized, 0);
        assert!(bridge.is_collected(h));
        drop(bridge);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn drop_finalizes_remaining_handles() {
        let (mut bridge, kind, log) = bridge_with_log();
        bridge.wrap(ptr(0x10), kind, true, None).unwrap();
        bridge.wrap_by_pointer(ptr(0x20), kind, None).unwrap();
        drop(bridge);

        assert_eq!(*log.borrow(), vec![0x10]);
    }
}
