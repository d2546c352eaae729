//! Deletion strategies: values that know how to release a resource of a given
//! element type.
//!
//! [`UniquePtr`](crate::UniquePtr) is generic over a [`Deleter`], so one handle
//! implementation serves both allocator-paired memory ([`FreeDeleter`]) and
//! resources from arbitrary create/destroy function pairs ([`FnDeleter`]).

use std::ffi::c_void;
use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

use ownkit_alloc::{LibcAllocator, RawAllocator};
use ownkit_common::{Result, error::Error};

/// Releases resources of element type `T`.
pub trait Deleter<T: ?Sized> {
    /// Releases the resource at `ptr`.
    ///
    /// # Safety
    ///
    /// - `ptr` must have been produced by the allocation or construction API
    ///   this deleter pairs with.
    /// - `delete` must be called at most once for each `ptr`, and `ptr` must not
    ///   be used afterwards.
    unsafe fn delete(&self, ptr: NonNull<T>);
}

/// Plain-old-data: types for which all-zero bytes form a valid value and which
/// carry no drop logic.
///
/// Only such types may live in memory obtained from `calloc` and be returned
/// with a bare `free`: nothing runs a constructor on the way in or a destructor
/// on the way out. `Copy` rules out `Drop`, and `bytemuck::Zeroable` vouches for
/// the zeroed representation.
pub trait PlainOldData: bytemuck::Zeroable + Copy + 'static {}

impl<T> PlainOldData for T where T: bytemuck::Zeroable + Copy + 'static {}

/// Releases memory through the deallocation primitive of the allocator it came
/// from (`free` for the default [`LibcAllocator`]).
///
/// Implements [`Deleter`] only for [`PlainOldData`] element types (and slices of
/// them), so binding it to anything with drop logic fails to compile:
///
/// ```compile_fail
/// use ownkit::{FreeDeleter, UniquePtr};
///
/// struct Named {
///     name: String,
/// }
///
/// let _handle: UniquePtr<Named, FreeDeleter<Named>> = UniquePtr::null(FreeDeleter::new());
/// ```
pub struct FreeDeleter<T: ?Sized, A = LibcAllocator> {
    alloc: A,
    _marker: PhantomData<fn(*mut T)>,
}

impl<T: ?Sized> FreeDeleter<T, LibcAllocator> {
    pub const fn new() -> Self {
        Self::with_allocator(LibcAllocator)
    }
}

impl<T: ?Sized, A> FreeDeleter<T, A> {
    pub const fn with_allocator(alloc: A) -> Self {
        FreeDeleter {
            alloc,
            _marker: PhantomData,
        }
    }

    pub fn allocator(&self) -> &A {
        &self.alloc
    }
}

impl<T, A> Deleter<T> for FreeDeleter<T, A>
where
    T: PlainOldData,
    A: RawAllocator,
{
    #[inline]
    unsafe fn delete(&self, ptr: NonNull<T>) {
        unsafe { self.alloc.free(ptr.cast::<c_void>().as_ptr()) }
    }
}

impl<T, A> Deleter<[T]> for FreeDeleter<[T], A>
where
    T: PlainOldData,
    A: RawAllocator,
{
    #[inline]
    unsafe fn delete(&self, ptr: NonNull<[T]>) {
        unsafe { self.alloc.free(ptr.cast::<c_void>().as_ptr()) }
    }
}

impl<T: ?Sized, A: Default> Default for FreeDeleter<T, A> {
    fn default() -> Self {
        Self::with_allocator(A::default())
    }
}

impl<T: ?Sized, A: Clone> Clone for FreeDeleter<T, A> {
    fn clone(&self) -> Self {
        Self::with_allocator(self.alloc.clone())
    }
}

impl<T: ?Sized, A: Copy> Copy for FreeDeleter<T, A> {}

impl<T: ?Sized, A: fmt::Debug> fmt::Debug for FreeDeleter<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FreeDeleter")
            .field("alloc", &self.alloc)
            .finish()
    }
}

/// A foreign destructor: takes back an object created by the same C API.
pub type ReleaseFn<T> = unsafe extern "C" fn(*mut T);

/// Releases a resource by calling a release function captured at construction.
///
/// A Rust function pointer is never null, so [`FnDeleter::new`] cannot be handed
/// a missing function. Pointers that come from C as possibly-null go through
/// [`FnDeleter::try_new`], which rejects `None` up front.
pub struct FnDeleter<T> {
    release_fn: ReleaseFn<T>,
}

impl<T> FnDeleter<T> {
    pub const fn new(release_fn: ReleaseFn<T>) -> Self {
        FnDeleter { release_fn }
    }

    /// Builds a deleter from a possibly-null release function.
    ///
    /// # Errors
    ///
    /// Returns `NullReleaseFunction` if `release_fn` is `None`.
    pub fn try_new(release_fn: Option<ReleaseFn<T>>) -> Result<Self> {
        match release_fn {
            Some(release_fn) => Ok(Self::new(release_fn)),
            None => {
                let type_name = std::any::type_name::<T>();
                log::debug!("rejecting null release function for {type_name}");
                Err(Error::null_release_function(type_name))
            }
        }
    }

    pub fn release_fn(&self) -> ReleaseFn<T> {
        self.release_fn
    }
}

impl<T> Deleter<T> for FnDeleter<T> {
    #[inline]
    unsafe fn delete(&self, ptr: NonNull<T>) {
        unsafe { (self.release_fn)(ptr.as_ptr()) }
    }
}

impl<T> Clone for FnDeleter<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FnDeleter<T> {}

impl<T> PartialEq for FnDeleter<T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::fn_addr_eq(self.release_fn, other.release_fn)
    }
}

impl<T> Eq for FnDeleter<T> {}

impl<T> fmt::Debug for FnDeleter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnDeleter")
            .field("release_fn", &(self.release_fn as *const ()))
            .finish()
    }
}
