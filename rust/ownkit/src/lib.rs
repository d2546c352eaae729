//! Single-owner handles for resources that come from C-style allocators or
//! foreign create/destroy function pairs.
//!
//! A [`UniquePtr<T, D>`] owns at most one resource and releases it exactly once,
//! through its [`Deleter`] `D`, when it goes out of scope, including on early
//! return, `?` propagation and unwinding. Two deletion strategies are provided:
//!
//! - [`FreeDeleter`]: returns plain-old-data memory to the allocator it came from
//!   (`free` for `calloc`). Produced by [`make_unique_pod_cleared`] and
//!   [`make_unique_pod_slice_cleared`].
//! - [`FnDeleter`]: calls a foreign destructor captured at construction.
//!   Produced by [`make_unique_funcfree`].

pub mod deleter;
pub mod func_free;
pub mod pod;
pub mod unique_ptr;

pub use deleter::{Deleter, FnDeleter, FreeDeleter, PlainOldData, ReleaseFn};
pub use func_free::{UniqueFuncFreePtr, make_unique_funcfree, try_make_unique_funcfree};
pub use pod::{
    UniquePodPtr, UniquePodSlice, make_unique_pod_cleared, make_unique_pod_cleared_in,
    make_unique_pod_slice_cleared, make_unique_pod_slice_cleared_in,
};
pub use unique_ptr::UniquePtr;

pub use ownkit_alloc::{LibcAllocator, RawAllocator, TrackingAllocator};
pub use ownkit_common::{Result, error::Error, error::ErrorKind};
