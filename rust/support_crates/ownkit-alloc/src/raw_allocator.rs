//! The allocation pairing behind C-style owned memory: a zeroing allocator and
//! the one deallocation primitive that accepts its blocks.

use std::ffi::c_void;

use crate::sys;

/// A `calloc`/`free`-shaped allocator family.
///
/// # Safety
///
/// Implementors must guarantee that:
/// - A non-null pointer returned by `alloc_zeroed(count, size)` addresses at
///   least `count * size` bytes, all zero, aligned to at least `MAX_ALIGN`.
/// - `alloc_zeroed` returns null on failure (including `count * size`
///   overflow) rather than panicking or aborting.
/// - `free` accepts every pointer returned by `alloc_zeroed` of the same
///   allocator, and treats null as a no-op.
pub unsafe trait RawAllocator {
    /// The largest alignment every returned block satisfies.
    const MAX_ALIGN: usize;

    /// Allocates `count * size` zero-initialized bytes, or returns null.
    fn alloc_zeroed(&self, count: usize, size: usize) -> *mut c_void;

    /// Releases a block returned by [`RawAllocator::alloc_zeroed`].
    ///
    /// # Safety
    ///
    /// `ptr` must be null or come from `alloc_zeroed` on this allocator, and
    /// must not have been freed already.
    unsafe fn free(&self, ptr: *mut c_void);
}

/// The process C runtime allocator: `calloc` paired with `free`.
///
/// Zero-sized, so deleters built on it add nothing to a handle's size.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LibcAllocator;

unsafe impl RawAllocator for LibcAllocator {
    const MAX_ALIGN: usize = sys::MAX_ALIGN;

    #[inline]
    fn alloc_zeroed(&self, count: usize, size: usize) -> *mut c_void {
        sys::calloc(count, size)
    }

    #[inline]
    unsafe fn free(&self, ptr: *mut c_void) {
        unsafe { sys::free(ptr) }
    }
}

unsafe impl<A: RawAllocator> RawAllocator for &A {
    const MAX_ALIGN: usize = A::MAX_ALIGN;

    #[inline]
    fn alloc_zeroed(&self, count: usize, size: usize) -> *mut c_void {
        (**self).alloc_zeroed(count, size)
    }

    #[inline]
    unsafe fn free(&self, ptr: *mut c_void) {
        unsafe { (**self).free(ptr) }
    }
}
