//! Resource kind descriptors and their registry.
//!
//! A [`ResourceKind`] is the static, per-kind metadata a wrapper module
//! supplies: a diagnostic name, the native destructor, and whether the host
//! collector may destroy the resource on its own. Descriptors are registered
//! once at startup in a [`KindRegistry`] and looked up by [`KindHash`].
//!
//! # Finalization policy
//!
//! Most kinds use [`Finalization::Automatic`]: an unreachable owning handle is
//! destroyed by the collector through the same path as an explicit destroy.
//! Kinds whose teardown must be caller-ordered (a network host that owns live
//! peers, for example) declare [`Finalization::ExplicitOnly`]; the collector
//! then reclaims the handle without calling the destructor.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::{KindHash, NativePtr, RegistrationError};

/// Native destructor for one resource kind.
pub type Destructor = Box<dyn Fn(NativePtr)>;

/// Whether the host collector may destroy a resource of this kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Finalization {
    /// The collector runs the destroy path for unreachable owning handles.
    #[default]
    Automatic,
    /// Only an explicit destroy releases the native resource.
    ExplicitOnly,
}

/// Static metadata for one kind of native resource.
pub struct ResourceKind {
    name: String,
    hash: KindHash,
    destructor: Option<Destructor>,
    finalization: Finalization,
}

impl ResourceKind {
    /// Create a descriptor with a native destructor and automatic finalization.
    pub fn new(name: impl Into<String>, destructor: impl Fn(NativePtr) + 'static) -> Self {
        let name = name.into();
        Self {
            hash: KindHash::from_name(&name),
            name,
            destructor: Some(Box::new(destructor)),
            finalization: Finalization::Automatic,
        }
    }

    /// Create a descriptor for resources the native layer always owns.
    ///
    /// Handles of such kinds are only ever produced by `wrap_by_pointer`.
    pub fn borrowed(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            hash: KindHash::from_name(&name),
            name,
            destructor: None,
            finalization: Finalization::Automatic,
        }
    }

    /// Set the finalization policy.
    pub fn with_finalization(mut self, finalization: Finalization) -> Self {
        self.finalization = finalization;
        self
    }

    /// Require caller-ordered teardown.
    pub fn explicit_only(self) -> Self {
        self.with_finalization(Finalization::ExplicitOnly)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hash(&self) -> KindHash {
        self.hash
    }

    pub fn finalization(&self) -> Finalization {
        self.finalization
    }

    /// Returns true if the collector may destroy resources of this kind.
    pub fn auto_finalize(&self) -> bool {
        self.finalization == Finalization::Automatic
    }

    pub fn has_destructor(&self) -> bool {
        self.destructor.is_some()
    }

    /// Invoke the native destructor, if the kind has one.
    pub(crate) fn destroy_native(&self, ptr: NativePtr) -> bool {
        match &self.destructor {
            Some(destructor) => {
                destructor(ptr);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceKind")
            .field("name", &self.name)
            .field("hash", &self.hash)
            .field("has_destructor", &self.destructor.is_some())
            .field("finalization", &self.finalization)
            .finish()
    }
}

/// Registered kind descriptors, indexed by hash.
#[derive(Default)]
pub struct KindRegistry {
    kinds: FxHashMap<KindHash, ResourceKind>,
}

impl KindRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor. Names must be unique.
    pub fn register(&mut self, kind: ResourceKind) -> Result<KindHash, RegistrationError> {
        if kind.name.is_empty() {
            return Err(RegistrationError::EmptyName);
        }
        let hash = kind.hash;
        if self.kinds.contains_key(&hash) {
            return Err(RegistrationError::DuplicateKind { name: kind.name });
        }
        self.kinds.insert(hash, kind);
        Ok(hash)
    }

    pub fn get(&self, hash: KindHash) -> Option<&ResourceKind> {
        self.kinds.get(&hash)
    }

    pub fn contains(&self, hash: KindHash) -> bool {
        self.kinds.contains_key(&hash)
    }

    /// Diagnostic name for a hash, falling back to the hash itself.
    pub fn name_of(&self, hash: KindHash) -> String {
        match self.kinds.get(&hash) {
            Some(kind) => kind.name.clone(),
            None => hash.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl fmt::Debug for KindRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KindRegistry")
            .field("kind_count", &self.kinds.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn register_and_lookup() {
        let mut registry = KindRegistry::new();
        let hash = registry
            .register(ResourceKind::new("legato_config", |_| {}))
            .unwrap();

        assert_eq!(hash, KindHash::from_name("legato_config"));
        let kind = registry.get(hash).unwrap();
        assert_eq!(kind.name(), "legato_config");
        assert!(kind.auto_finalize());
        assert!(kind.has_destructor());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut registry = KindRegistry::new();
        registry
            .register(ResourceKind::borrowed("legato_mixer"))
            .unwrap();
        let err = registry
            .register(ResourceKind::borrowed("legato_mixer"))
            .unwrap_err();
        assert_eq!(
            err,
            RegistrationError::DuplicateKind {
                name: "legato_mixer".into()
            }
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn empty_name_is_rejected() {
        let mut registry = KindRegistry::new();
        assert_eq!(
            registry.register(ResourceKind::borrowed("")),
            Err(RegistrationError::EmptyName)
        );
    }

    #[test]
    fn explicit_only_disables_auto_finalization() {
        let kind = ResourceKind::new("legato_host", |_| {}).explicit_only();
        assert_eq!(kind.finalization(), Finalization::ExplicitOnly);
        assert!(!kind.auto_finalize());
    }

    #[test]
    fn destroy_native_calls_destructor() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let kind = ResourceKind::new("legato_timer", move |_| counter.set(counter.get() + 1));
        let ptr = NativePtr::from_addr(0x40).unwrap();

        assert!(kind.destroy_native(ptr));
        assert_eq!(calls.get(), 1);
        assert!(!ResourceKind::borrowed("legato_voice").destroy_native(ptr));
    }

    #[test]
    fn unknown_hash_name_falls_back_to_hash() {
        let registry = KindRegistry::new();
        let hash = KindHash::from_name("legato_peer");
        assert_eq!(registry.name_of(hash), hash.to_string());
    }
}
