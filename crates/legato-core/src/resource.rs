//! Typed wrapper-module contract.
//!
//! A wrapper module describes its kind once by implementing
//! [`NativeResource`] and then uses the `*_as` methods on [`Bridge`], which
//! follow the wrapper contract:
//!
//! 1. `wrap_as` right after the native constructor; a null result comes back
//!    as a [`WrapError`] for the caller to branch on.
//! 2. `destroy_as` for the user-facing destroy operation.
//! 3. Collector finalization follows [`NativeResource::FINALIZATION`].
//! 4. `wrap_ptr_as` whenever returning a pointer the native layer still owns.
//!
//! ```
//! use legato_core::{Bridge, NativePtr, NativeResource};
//!
//! struct Config;
//!
//! impl NativeResource for Config {
//!     const NAME: &'static str = "legato_config";
//!
//!     fn destroy(ptr: NativePtr) {
//!         // al_destroy_config(ptr.cast())
//!         let _ = ptr;
//!     }
//! }
//!
//! let mut bridge = Bridge::new();
//! bridge.register::<Config>().unwrap();
//! let config = bridge.wrap_as::<Config>(NativePtr::from_addr(0x10), None).unwrap();
//! assert!(bridge.unwrap_as::<Config>(config).is_ok());
//! ```

use crate::{
    AccessError, Bridge, Finalization, KindHash, NativePtr, RegistrationError, ResourceKind,
    ValueRef, WrapError,
};

/// Static description of one native resource kind.
pub trait NativeResource: 'static {
    /// Diagnostic name, also the source of the kind hash.
    const NAME: &'static str;

    /// Whether the collector may destroy unreachable instances.
    const FINALIZATION: Finalization = Finalization::Automatic;

    /// The native destructor.
    fn destroy(ptr: NativePtr);

    fn kind_hash() -> KindHash {
        KindHash::from_name(Self::NAME)
    }

    fn descriptor() -> ResourceKind {
        ResourceKind::new(Self::NAME, Self::destroy).with_finalization(Self::FINALIZATION)
    }
}

impl Bridge {
    pub fn register<R: NativeResource>(&mut self) -> Result<KindHash, RegistrationError> {
        self.register_kind(R::descriptor())
    }

    /// Adopt a freshly constructed resource as an owning handle.
    pub fn wrap_as<R: NativeResource>(
        &mut self,
        ptr: Option<NativePtr>,
        dependency: Option<ValueRef>,
    ) -> Result<ValueRef, WrapError> {
        self.wrap(ptr, R::kind_hash(), true, dependency)
    }

    /// Expose a resource the native layer still owns.
    pub fn wrap_ptr_as<R: NativeResource>(
        &mut self,
        ptr: Option<NativePtr>,
        dependency: Option<ValueRef>,
    ) -> Result<ValueRef, WrapError> {
        self.wrap_by_pointer(ptr, R::kind_hash(), dependency)
    }

    pub fn unwrap_as<R: NativeResource>(&self, handle: ValueRef) -> Result<NativePtr, AccessError> {
        self.unwrap(handle, R::kind_hash())
    }

    pub fn destroy_as<R: NativeResource>(&mut self, handle: ValueRef) -> Result<bool, AccessError> {
        self.destroy(handle, R::kind_hash())
    }
}
