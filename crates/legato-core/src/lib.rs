//! Lifecycle bridge between natively-owned resources and a garbage-collected
//! script host.
//!
//! Every wrapper that exposes a native resource (display, bitmap, timer,
//! audio voice, file, network host or peer) goes through the same five
//! operations on a [`Bridge`]:
//!
//! - [`Bridge::wrap`] creates a [`Handle`] for a pointer a native constructor
//!   returned, optionally keeping an ancestor value alive.
//! - [`Bridge::wrap_by_pointer`] reuses the live handle for a pointer the
//!   native layer still owns, so repeated queries yield the same proxy.
//! - [`Bridge::unwrap`] turns use-after-free and wrong-kind access into a
//!   catchable [`AccessError`].
//! - [`Bridge::unwrap_for_destroy`] is the single check that makes explicit
//!   destroy and collector finalization safe to combine.
//! - [`Bridge::invalidate`] is the only way into the dead state.
//!
//! ## Key Types
//!
//! - [`ResourceKind`]: per-kind name, destructor, and finalization policy
//! - [`HostHeap`] / [`ValueRef`]: generational storage for host objects
//! - [`IdentityTable`]: weak pointer → handle map used for deduplication
//! - [`collector`]: mark & sweep with dependency-ordered finalization

pub mod collector;

mod bridge;
mod config;
mod error;
mod handle;
mod heap;
mod identity;
mod kind;
mod kind_hash;
mod native;
mod resource;

pub use bridge::{Bridge, BridgeStats};
pub use collector::CollectionStats;
pub use config::BridgeConfig;
pub use error::{AccessError, BridgeError, BridgeResult, RegistrationError, WrapError};
pub use handle::{Handle, HandleState};
pub use heap::{HostHeap, HostObject, ValueRef};
pub use identity::IdentityTable;
pub use kind::{Destructor, Finalization, KindRegistry, ResourceKind};
pub use kind_hash::KindHash;
pub use native::NativePtr;
pub use resource::NativeResource;
