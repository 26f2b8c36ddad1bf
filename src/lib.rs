//! Native resource handles for a garbage-collected script host.
//!
//! This crate re-exports the lifecycle bridge from `legato-core` and adds the
//! protected-call boundary that wrapper functions run behind.
//!
//! ```
//! use legato::prelude::*;
//!
//! let mut bridge = Bridge::new();
//! let bitmap = bridge.register_kind(ResourceKind::new("legato_bitmap", |_| {})).unwrap();
//!
//! // The native layer reports the current target bitmap twice.
//! let target = NativePtr::from_addr(0x2000);
//! let a = bridge.wrap_by_pointer(target, bitmap, None).unwrap();
//! let b = bridge.wrap_by_pointer(target, bitmap, None).unwrap();
//! assert_eq!(a, b);
//! ```

pub mod protected;

pub use legato_core::*;

pub use protected::{ScriptFault, protected_call};

pub mod prelude {
    pub use crate::protected::{ScriptFault, protected_call};
    pub use legato_core::{
        AccessError, Bridge, BridgeConfig, BridgeError, BridgeResult, CollectionStats,
        Finalization, HandleState, KindHash, NativePtr, NativeResource, ResourceKind, ValueRef,
        WrapError,
    };
}
