//! The per-resource handle record.
//!
//! A [`Handle`] is the host-visible stand-in for one native resource. It holds
//! the native pointer, the kind, whether it is responsible for the native
//! destructor, and at most one keep-alive reference to an ancestor host value.
//!
//! ## State machine
//!
//! ```text
//!   OwningLive ──(destroy / finalize: destructor runs once)──┐
//!                                                            ▼
//!   NonOwningLive ──────────(finalize: no native effect)──▶ Dead (terminal)
//! ```
//!
//! `owns` only ever goes from true to false, and once the pointer is cleared
//! nothing sets it again.

use crate::{KindHash, NativePtr, ResourceKind, ValueRef};

/// Lifecycle state of a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleState {
    /// Live, and responsible for the native destructor.
    OwningLive,
    /// Live, observing a resource the native layer owns.
    NonOwningLive,
    /// Invalidated.
    Dead,
}

/// One wrapped native resource.
#[derive(Debug)]
pub struct Handle {
    ptr: Option<NativePtr>,
    kind: KindHash,
    owns: bool,
    keep_alive: Option<ValueRef>,
}

impl Handle {
    pub(crate) fn new(
        ptr: NativePtr,
        kind: KindHash,
        owns: bool,
        keep_alive: Option<ValueRef>,
    ) -> Self {
        Self {
            ptr: Some(ptr),
            kind,
            owns,
            keep_alive,
        }
    }

    /// The native pointer, or `None` once invalidated.
    pub fn native_ptr(&self) -> Option<NativePtr> {
        self.ptr
    }

    pub fn kind(&self) -> KindHash {
        self.kind
    }

    pub fn owns(&self) -> bool {
        self.owns
    }

    /// The ancestor this handle keeps reachable.
    pub fn keep_alive(&self) -> Option<ValueRef> {
        self.keep_alive
    }

    pub fn is_alive(&self) -> bool {
        self.ptr.is_some()
    }

    pub fn state(&self) -> HandleState {
        match (self.ptr, self.owns) {
            (None, _) => HandleState::Dead,
            (Some(_), true) => HandleState::OwningLive,
            (Some(_), false) => HandleState::NonOwningLive,
        }
    }

    /// The pointer to pass to the native destructor, if this handle is the
    /// one that must call it.
    ///
    /// Explicit destroy and finalization both go through here, so a second
    /// destroy observes a cleared pointer and does nothing.
    pub(crate) fn destroy_target(&self) -> Option<NativePtr> {
        if self.owns { self.ptr } else { None }
    }

    /// Enter the dead state. Returns the dropped keep-alive reference.
    pub(crate) fn invalidate(&mut self) -> Option<ValueRef> {
        self.ptr = None;
        self.owns = false;
        self.keep_alive.take()
    }

    /// Run the destroy path: invalidate, then call the destructor with the
    /// pointer taken beforehand (if owning and live).
    ///
    /// The handle is already dead when the destructor runs, so a destructor
    /// that unwinds is never reached a second time through this handle.
    /// Returns true if the native destructor was invoked.
    pub(crate) fn destroy_with(&mut self, kind: &ResourceKind) -> bool {
        let Some(ptr) = self.destroy_target() else {
            return false;
        };
        self.invalidate();
        kind.destroy_native(ptr)
    }
}
