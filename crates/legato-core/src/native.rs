//! Opaque native pointers.
//!
//! [`NativePtr`] is the address of a resource allocated and freed outside the
//! host collector. The bridge never dereferences it; the address is only
//! stored, compared, hashed, and handed back to the native layer.

use std::ffi::c_void;
use std::fmt;
use std::ptr::NonNull;

/// A non-null address of a natively-owned resource.
///
/// A null native result is represented as `None` at construction time, so a
/// `NativePtr` is always a real address.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct NativePtr(NonNull<c_void>);

impl NativePtr {
    /// Wrap a raw pointer returned by a native constructor.
    ///
    /// Returns `None` for a null pointer.
    pub fn new<T>(raw: *mut T) -> Option<Self> {
        NonNull::new(raw.cast::<c_void>()).map(Self)
    }

    /// Build a pointer from a plain address.
    ///
    /// Useful for native layers that hand out integer tokens instead of
    /// real pointers.
    pub fn from_addr(addr: usize) -> Option<Self> {
        Self::new(addr as *mut c_void)
    }

    /// The raw pointer, for passing back to the native layer.
    pub fn as_ptr(self) -> *mut c_void {
        self.0.as_ptr()
    }

    /// Cast to a typed raw pointer.
    pub fn cast<T>(self) -> *mut T {
        self.0.as_ptr().cast::<T>()
    }

    /// The numeric address, used as the identity key.
    pub fn addr(self) -> usize {
        self.0.as_ptr() as usize
    }
}

impl fmt::Debug for NativePtr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativePtr({:#x})", self.addr())
    }
}

impl fmt::Display for NativePtr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.addr())
    }
}
