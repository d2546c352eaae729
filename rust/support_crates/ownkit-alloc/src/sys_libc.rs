//! `calloc`/`free` from the platform C runtime.

use std::ffi::c_void;

/// Alignment guaranteed by `malloc`-family allocations on this target.
///
/// This is a lower bound: some 32-bit C runtimes align to 16 bytes, but 8 is
/// the value every supported C runtime honors.
pub const MAX_ALIGN: usize = if cfg!(target_pointer_width = "64") {
    16
} else {
    8
};

/// Allocates `count * size` zero-initialized bytes via `calloc`.
///
/// Returns null when the allocation fails, including when `count * size`
/// overflows.
#[inline]
pub fn calloc(count: usize, size: usize) -> *mut c_void {
    unsafe { libc::calloc(count, size) }
}

/// Releases a block obtained from [`calloc`].
///
/// # Safety
///
/// `ptr` must be null or a pointer returned by [`calloc`] that has not been
/// freed yet.
#[inline]
pub unsafe fn free(ptr: *mut c_void) {
    unsafe { libc::free(ptr) }
}
