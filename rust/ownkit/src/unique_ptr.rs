//! `UniquePtr`: a single-owner handle that releases its resource exactly once,
//! through a bound [`Deleter`], when it goes out of scope.
//!
//! The handle is move-only. It implements neither `Clone` nor `Copy`, so
//! duplicating ownership does not compile:
//!
//! ```compile_fail
//! use ownkit::make_unique_pod_cleared;
//!
//! let a = make_unique_pod_cleared::<u32>().unwrap();
//! let b = a.clone();
//! ```
//!
//! ```compile_fail
//! use ownkit::make_unique_pod_cleared;
//!
//! let a = make_unique_pod_cleared::<u32>().unwrap();
//! let b = a;
//! let c = a;
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::mem::ManuallyDrop;
use std::ptr::NonNull;

use crate::deleter::Deleter;

/// Exclusively owns zero or one resource of type `T`, released through `D`.
///
/// - Dropping a handle that owns a resource calls `D::delete` exactly once;
///   dropping an empty handle calls nothing.
/// - The owned pointer is cleared *before* the deleter runs, so no path through
///   the handle can release the same pointer twice.
/// - Moving a handle transfers ownership; [`UniquePtr::take`] does the same
///   while leaving an empty handle behind.
///
/// A `UniquePtr` has no internal synchronization and is neither `Send` nor
/// `Sync`.
///
/// # Examples
///
/// ```
/// use ownkit::{FnDeleter, ReleaseFn, UniquePtr};
///
/// unsafe extern "C" fn release(ptr: *mut u64) {
///     drop(unsafe { Box::from_raw(ptr) });
/// }
///
/// let raw = Box::into_raw(Box::new(5u64));
/// let mut handle = unsafe { UniquePtr::from_raw(raw, FnDeleter::new(release as ReleaseFn<u64>)) };
/// assert_eq!(handle.as_ref(), Some(&5));
///
/// *handle.as_mut().unwrap() += 1;
/// assert_eq!(handle.as_ref(), Some(&6));
/// // `release` runs here.
/// ```
pub struct UniquePtr<T: ?Sized, D: Deleter<T>> {
    ptr: Option<NonNull<T>>,
    deleter: D,
    _owns: PhantomData<T>,
}

impl<T: ?Sized, D: Deleter<T>> UniquePtr<T, D> {
    /// Creates an empty handle bound to `deleter`.
    pub const fn null(deleter: D) -> Self {
        UniquePtr {
            ptr: None,
            deleter,
            _owns: PhantomData,
        }
    }

    /// Takes ownership of `ptr`; a null `ptr` yields an empty handle.
    ///
    /// # Safety
    ///
    /// If `ptr` is non-null:
    /// - it must be releasable by `deleter`, i.e. produced by the API family
    ///   `deleter` pairs with;
    /// - it must be valid for reads and writes of `T` for as long as the handle
    ///   owns it;
    /// - no other owner may release it. Adopting the same pointer into two
    ///   handles releases it twice.
    pub unsafe fn from_raw(ptr: *mut T, deleter: D) -> Self {
        UniquePtr {
            ptr: NonNull::new(ptr),
            deleter,
            _owns: PhantomData,
        }
    }

    /// Takes ownership of a non-null `ptr`.
    ///
    /// # Safety
    ///
    /// Same requirements as [`UniquePtr::from_raw`].
    pub unsafe fn from_non_null(ptr: NonNull<T>, deleter: D) -> Self {
        UniquePtr {
            ptr: Some(ptr),
            deleter,
            _owns: PhantomData,
        }
    }

    /// Returns the owned pointer without giving up ownership, or `None` if the
    /// handle is empty.
    #[inline]
    pub fn get(&self) -> Option<NonNull<T>> {
        self.ptr
    }

    /// Returns `true` if the handle owns nothing.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.ptr.is_none()
    }

    #[inline]
    pub fn as_ref(&self) -> Option<&T> {
        self.ptr.map(|ptr| unsafe { ptr.as_ref() })
    }

    #[inline]
    pub fn as_mut(&mut self) -> Option<&mut T> {
        self.ptr.map(|mut ptr| unsafe { ptr.as_mut() })
    }

    #[inline]
    pub fn deleter(&self) -> &D {
        &self.deleter
    }

    /// Mutable access to the bound deleter.
    ///
    /// Replacing the deleter from safe code would let the owned pointer reach a
    /// release function it did not come from, so this is `unsafe`:
    ///
    /// ```compile_fail
    /// use ownkit::{FnDeleter, ReleaseFn, make_unique_funcfree};
    ///
    /// unsafe extern "C" fn release(ptr: *mut u64) {
    ///     drop(unsafe { Box::from_raw(ptr) });
    /// }
    ///
    /// unsafe extern "C" fn leak(_ptr: *mut u64) {}
    ///
    /// let mut h = unsafe { make_unique_funcfree(release as ReleaseFn<u64>, Box::into_raw(Box::new(1u64))) };
    /// *h.deleter_mut() = FnDeleter::new(leak as ReleaseFn<u64>);
    /// ```
    ///
    /// # Safety
    ///
    /// Whatever deleter is left in place must be able to release the pointer
    /// the handle currently owns (and any pointer it adopts later), exactly as
    /// required by [`UniquePtr::from_raw`].
    #[inline]
    pub unsafe fn deleter_mut(&mut self) -> &mut D {
        &mut self.deleter
    }

    /// Gives up ownership without running the deleter.
    ///
    /// The handle is left empty; releasing the returned pointer becomes the
    /// caller's job.
    #[must_use = "the released pointer is no longer freed by the handle"]
    pub fn release(&mut self) -> Option<NonNull<T>> {
        self.ptr.take()
    }

    /// Releases the currently owned resource (if any), then adopts `ptr`.
    ///
    /// # Safety
    ///
    /// `ptr` must satisfy the requirements of [`UniquePtr::from_raw`], and must
    /// not be the pointer this handle currently owns.
    pub unsafe fn reset(&mut self, ptr: *mut T) {
        let old = std::mem::replace(&mut self.ptr, NonNull::new(ptr));
        if let Some(old) = old {
            unsafe { self.deleter.delete(old) };
        }
    }

    /// Releases the currently owned resource (if any), leaving the handle empty.
    pub fn reset_null(&mut self) {
        if let Some(old) = self.ptr.take() {
            unsafe { self.deleter.delete(old) };
        }
    }

    /// Moves ownership out into a new handle, leaving `self` empty and bound to
    /// a copy of the same deleter.
    pub fn take(&mut self) -> Self
    where
        D: Clone,
    {
        UniquePtr {
            ptr: self.ptr.take(),
            deleter: self.deleter.clone(),
            _owns: PhantomData,
        }
    }

    /// Exchanges the resources and deleters of two handles.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    /// Consumes the handle without running the deleter, returning the owned
    /// pointer and the deleter that would have released it.
    pub fn into_parts(self) -> (Option<NonNull<T>>, D) {
        let this = ManuallyDrop::new(self);
        // `this` is never dropped, so the deleter is read out exactly once.
        let deleter = unsafe { std::ptr::read(&this.deleter) };
        (this.ptr, deleter)
    }
}

impl<T, D: Deleter<T>> UniquePtr<T, D> {
    /// Returns the owned raw pointer, or null if the handle is empty.
    #[inline]
    pub fn as_ptr(&self) -> *mut T {
        self.ptr.map_or(std::ptr::null_mut(), NonNull::as_ptr)
    }

    /// Consumes the handle without running the deleter, returning the raw
    /// pointer (null if the handle was empty).
    #[must_use = "the returned pointer is no longer freed by the handle"]
    pub fn into_raw(self) -> *mut T {
        let (ptr, _) = self.into_parts();
        ptr.map_or(std::ptr::null_mut(), NonNull::as_ptr)
    }
}

impl<T: ?Sized, D: Deleter<T>> Drop for UniquePtr<T, D> {
    fn drop(&mut self) {
        self.reset_null();
    }
}

impl<T: ?Sized, D: Deleter<T> + Default> Default for UniquePtr<T, D> {
    fn default() -> Self {
        Self::null(D::default())
    }
}

impl<T: ?Sized, D: Deleter<T>> fmt::Debug for UniquePtr<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UniquePtr").field(&self.ptr).finish()
    }
}

impl<T: ?Sized, D: Deleter<T>> fmt::Pointer for UniquePtr<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ptr {
            Some(ptr) => fmt::Pointer::fmt(&ptr, f),
            None => fmt::Pointer::fmt(&std::ptr::null::<u8>(), f),
        }
    }
}
