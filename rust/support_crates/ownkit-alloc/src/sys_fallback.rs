//! `calloc`/`free` emulation on top of the Rust global allocator, for targets
//! without a C runtime.
//!
//! Every block carries a `MAX_ALIGN`-sized header holding the total allocation
//! size, so that `free` can rebuild the layout from the pointer alone.

use std::alloc::{Layout, alloc_zeroed, dealloc};
use std::ffi::c_void;

pub const MAX_ALIGN: usize = 16;

const HEADER: usize = MAX_ALIGN;

/// Allocates `count * size` zero-initialized bytes (emulated).
pub fn calloc(count: usize, size: usize) -> *mut c_void {
    let Some(total) = count
        .checked_mul(size)
        .and_then(|bytes| bytes.checked_add(HEADER))
    else {
        return std::ptr::null_mut();
    };
    let Ok(layout) = Layout::from_size_align(total, MAX_ALIGN) else {
        return std::ptr::null_mut();
    };

    let base = unsafe { alloc_zeroed(layout) };
    if base.is_null() {
        return std::ptr::null_mut();
    }
    unsafe {
        (base as *mut usize).write(total);
        base.add(HEADER) as *mut c_void
    }
}

/// Releases a block obtained from [`calloc`] (emulated).
///
/// # Safety
///
/// `ptr` must be null or a pointer returned by [`calloc`] that has not been
/// freed yet.
pub unsafe fn free(ptr: *mut c_void) {
    if ptr.is_null() {
        return;
    }
    unsafe {
        let base = (ptr as *mut u8).sub(HEADER);
        let total = (base as *const usize).read();
        dealloc(base, Layout::from_size_align_unchecked(total, MAX_ALIGN));
    }
}
