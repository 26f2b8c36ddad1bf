//! Deterministic identity for resource kinds.
//!
//! [`KindHash`] is a 64-bit hash of a kind's name. Wrapper modules can
//! compute the hash of the kind they expect before (or without) holding the
//! registered descriptor, and two registrations of the same name always agree.
//!
//! ```
//! use legato_core::KindHash;
//!
//! assert_eq!(KindHash::from_name("legato_bitmap"), KindHash::from_name("legato_bitmap"));
//! assert_ne!(KindHash::from_name("legato_bitmap"), KindHash::from_name("legato_font"));
//! ```

use std::fmt;
use xxhash_rust::xxh64::xxh64;

/// Domain marker mixed into every kind hash.
const KIND_DOMAIN: u64 = 0x2fac10b63a6cc57c;

/// A deterministic 64-bit hash identifying a resource kind.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct KindHash(pub u64);

impl KindHash {
    /// Hash a kind name.
    #[inline]
    pub fn from_name(name: &str) -> Self {
        KindHash(KIND_DOMAIN ^ xxh64(name.as_bytes(), 0))
    }
}

impl fmt::Debug for KindHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KindHash({:#018x})", self.0)
    }
}

impl fmt::Display for KindHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}
