//! Zero-initialized plain-old-data allocations owned by a [`UniquePtr`] bound to
//! a [`FreeDeleter`].
//!
//! The element type must be [`PlainOldData`]; anything with drop logic is
//! rejected at compile time:
//!
//! ```compile_fail
//! let _ = ownkit::make_unique_pod_cleared::<String>();
//! ```
//!
//! So is a type whose alignment exceeds what the allocator guarantees:
//!
//! ```compile_fail
//! #[derive(Clone, Copy)]
//! #[repr(C, align(64))]
//! struct CacheLine([u8; 64]);
//!
//! unsafe impl bytemuck::Zeroable for CacheLine {}
//!
//! let _ = ownkit::make_unique_pod_cleared::<CacheLine>();
//! ```

use std::any::type_name;
use std::ptr::NonNull;

use ownkit_alloc::{LibcAllocator, RawAllocator};
use ownkit_common::{Result, error::Error, verify_arg};

use crate::deleter::{FreeDeleter, PlainOldData};
use crate::unique_ptr::UniquePtr;

/// A single `T` allocated by `A` and released with `A`'s `free`.
pub type UniquePodPtr<T, A = LibcAllocator> = UniquePtr<T, FreeDeleter<T, A>>;

/// `len` consecutive `T`s allocated by `A` and released with `A`'s `free`.
pub type UniquePodSlice<T, A = LibcAllocator> = UniquePtr<[T], FreeDeleter<[T], A>>;

/// Allocates one zero-initialized `T` with `calloc`, owned by a handle that
/// releases it with `free`.
///
/// Fixed-size arrays are plain-old-data too, so `make_unique_pod_cleared::<[i32; 10]>()`
/// allocates ten zeroed integers in one block.
///
/// # Errors
///
/// Returns `AllocationFailed` if `calloc` returns null.
///
/// # Examples
///
/// ```
/// #[derive(Clone, Copy, bytemuck::Zeroable)]
/// #[repr(C)]
/// struct Counter {
///     value: i32,
/// }
///
/// let counter = ownkit::make_unique_pod_cleared::<Counter>().unwrap();
/// assert_eq!(counter.as_ref().unwrap().value, 0);
/// ```
pub fn make_unique_pod_cleared<T: PlainOldData>() -> Result<UniquePodPtr<T>> {
    make_unique_pod_cleared_in(LibcAllocator)
}

/// Same as [`make_unique_pod_cleared`], allocating from `alloc`.
pub fn make_unique_pod_cleared_in<T, A>(alloc: A) -> Result<UniquePodPtr<T, A>>
where
    T: PlainOldData,
    A: RawAllocator,
{
    const {
        assert!(
            std::mem::align_of::<T>() <= A::MAX_ALIGN,
            "element alignment exceeds the allocator's guaranteed alignment"
        )
    };

    // Zero-sized types still get a real block, so the handle is never empty.
    let size = std::mem::size_of::<T>().max(1);
    let raw = alloc.alloc_zeroed(1, size);
    let Some(ptr) = NonNull::new(raw.cast::<T>()) else {
        log::debug!("calloc(1, {size}) failed for {}", type_name::<T>());
        return Err(Error::allocation_failed(type_name::<T>(), 1, size));
    };

    // SAFETY: fresh block from `alloc`, large enough and aligned for `T`; all-zero
    // bytes are a valid `T` because `T: Zeroable`.
    Ok(unsafe { UniquePtr::from_non_null(ptr, FreeDeleter::with_allocator(alloc)) })
}

/// Allocates `len` zero-initialized `T`s with `calloc`, owned by a handle that
/// releases them with `free`.
///
/// # Errors
///
/// Returns `InvalidArgument` if `len * size_of::<T>()` overflows, and
/// `AllocationFailed` if `calloc` returns null.
pub fn make_unique_pod_slice_cleared<T: PlainOldData>(len: usize) -> Result<UniquePodSlice<T>> {
    make_unique_pod_slice_cleared_in(len, LibcAllocator)
}

/// Same as [`make_unique_pod_slice_cleared`], allocating from `alloc`.
pub fn make_unique_pod_slice_cleared_in<T, A>(len: usize, alloc: A) -> Result<UniquePodSlice<T, A>>
where
    T: PlainOldData,
    A: RawAllocator,
{
    const {
        assert!(
            std::mem::align_of::<T>() <= A::MAX_ALIGN,
            "element alignment exceeds the allocator's guaranteed alignment"
        )
    };

    let elem_size = std::mem::size_of::<T>();
    verify_arg!(
        len,
        len.checked_mul(elem_size)
            .is_some_and(|bytes| bytes <= isize::MAX as usize)
    );

    // An empty slice or a slice of zero-sized elements still owns one byte.
    let (count, size) = if len == 0 || elem_size == 0 {
        (1, elem_size.max(1))
    } else {
        (len, elem_size)
    };
    let raw = alloc.alloc_zeroed(count, size);
    let slice = std::ptr::slice_from_raw_parts_mut(raw.cast::<T>(), len);
    let Some(ptr) = NonNull::new(slice) else {
        log::debug!("calloc({count}, {size}) failed for [{}]", type_name::<T>());
        return Err(Error::allocation_failed(type_name::<T>(), count, size));
    };

    // SAFETY: fresh block from `alloc` holding `len` zeroed, aligned `T`s.
    Ok(unsafe { UniquePtr::from_non_null(ptr, FreeDeleter::with_allocator(alloc)) })
}
