//! Handles for resources from foreign create/destroy function pairs.

use ownkit_common::Result;

use crate::deleter::{FnDeleter, ReleaseFn};
use crate::unique_ptr::UniquePtr;

/// A `T` produced by a foreign constructor and released by its destructor.
pub type UniqueFuncFreePtr<T> = UniquePtr<T, FnDeleter<T>>;

/// Wraps `ptr`, obtained from a foreign constructor, in a handle that calls
/// `release_fn(ptr)` exactly once when dropped. Performs no allocation.
///
/// A null `ptr` yields an empty handle, and `release_fn` is then never called.
///
/// # Safety
///
/// - `ptr` must come from the same foreign API family as `release_fn`, and
///   `release_fn` must be the correct destructor for it.
/// - `ptr` must be valid for reads and writes of `T` while the handle owns it.
/// - Nothing else may release `ptr`.
///
/// # Examples
///
/// ```
/// use ownkit::{ReleaseFn, make_unique_funcfree};
///
/// #[repr(C)]
/// struct BigNum {
///     limbs: [u64; 4],
/// }
///
/// extern "C" fn bignum_new() -> *mut BigNum {
///     Box::into_raw(Box::new(BigNum { limbs: [1, 0, 0, 0] }))
/// }
///
/// unsafe extern "C" fn bignum_free(num: *mut BigNum) {
///     drop(unsafe { Box::from_raw(num) });
/// }
///
/// let num = unsafe { make_unique_funcfree(bignum_free as ReleaseFn<BigNum>, bignum_new()) };
/// assert_eq!(num.as_ref().unwrap().limbs[0], 1);
/// ```
pub unsafe fn make_unique_funcfree<T>(release_fn: ReleaseFn<T>, ptr: *mut T) -> UniqueFuncFreePtr<T> {
    unsafe { UniquePtr::from_raw(ptr, FnDeleter::new(release_fn)) }
}

/// Like [`make_unique_funcfree`], for a release function that may be null
/// (`None`), such as one looked up from a C vtable.
///
/// # Errors
///
/// Returns `NullReleaseFunction` if `release_fn` is `None`. The pointer is not
/// released in that case; with no destructor available it stays with the caller.
///
/// # Safety
///
/// Same requirements as [`make_unique_funcfree`].
pub unsafe fn try_make_unique_funcfree<T>(
    release_fn: Option<ReleaseFn<T>>,
    ptr: *mut T,
) -> Result<UniqueFuncFreePtr<T>> {
    let deleter = FnDeleter::try_new(release_fn)?;
    Ok(unsafe { UniquePtr::from_raw(ptr, deleter) })
}
