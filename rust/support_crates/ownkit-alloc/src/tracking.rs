//! An instrumented allocator wrapper for leak and double-free accounting.

use std::collections::BTreeMap;
use std::ffi::c_void;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::raw_allocator::{LibcAllocator, RawAllocator};

/// Wraps a [`RawAllocator`] and counts every block it hands out and takes back.
///
/// Live blocks are recorded by address together with their byte size. A `free`
/// of a pointer that is not live (never allocated here, or already freed) is
/// counted in [`TrackingAllocator::unknown_frees`] and is *not* forwarded to the
/// inner allocator.
///
/// The constructor is `const`, so a tracker can back a `static`:
///
/// ```
/// use ownkit_alloc::{RawAllocator, TrackingAllocator};
///
/// static TRACKER: TrackingAllocator = TrackingAllocator::new();
///
/// let p = TRACKER.alloc_zeroed(4, 8);
/// assert!(!p.is_null());
/// assert_eq!(TRACKER.live_bytes(), 32);
/// unsafe { TRACKER.free(p) };
/// assert_eq!(TRACKER.outstanding(), 0);
/// ```
pub struct TrackingAllocator<A = LibcAllocator> {
    inner: A,
    live: Mutex<BTreeMap<usize, usize>>,
    allocations: AtomicUsize,
    frees: AtomicUsize,
    unknown_frees: AtomicUsize,
}

impl TrackingAllocator<LibcAllocator> {
    pub const fn new() -> Self {
        Self::with_inner(LibcAllocator)
    }
}

impl Default for TrackingAllocator<LibcAllocator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> TrackingAllocator<A> {
    pub const fn with_inner(inner: A) -> Self {
        TrackingAllocator {
            inner,
            live: Mutex::new(BTreeMap::new()),
            allocations: AtomicUsize::new(0),
            frees: AtomicUsize::new(0),
            unknown_frees: AtomicUsize::new(0),
        }
    }

    /// Number of successful allocations so far.
    pub fn allocations(&self) -> usize {
        self.allocations.load(Ordering::Acquire)
    }

    /// Number of live blocks released so far.
    pub fn frees(&self) -> usize {
        self.frees.load(Ordering::Acquire)
    }

    /// Number of `free` calls with a pointer that was not live.
    pub fn unknown_frees(&self) -> usize {
        self.unknown_frees.load(Ordering::Acquire)
    }

    /// Number of blocks currently allocated and not yet freed.
    pub fn outstanding(&self) -> usize {
        self.live_blocks().len()
    }

    /// Total byte size of all blocks currently outstanding.
    pub fn live_bytes(&self) -> usize {
        self.live_blocks().values().sum()
    }

    /// Returns `true` if `ptr` is a block currently handed out by this tracker.
    pub fn is_live(&self, ptr: *const c_void) -> bool {
        self.live_blocks().contains_key(&(ptr as usize))
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }

    fn live_blocks(&self) -> MutexGuard<'_, BTreeMap<usize, usize>> {
        self.live.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

unsafe impl<A: RawAllocator> RawAllocator for TrackingAllocator<A> {
    const MAX_ALIGN: usize = A::MAX_ALIGN;

    fn alloc_zeroed(&self, count: usize, size: usize) -> *mut c_void {
        let ptr = self.inner.alloc_zeroed(count, size);
        if !ptr.is_null() {
            self.live_blocks()
                .insert(ptr as usize, count.saturating_mul(size));
            self.allocations.fetch_add(1, Ordering::AcqRel);
        }
        ptr
    }

    unsafe fn free(&self, ptr: *mut c_void) {
        if ptr.is_null() {
            return;
        }
        if self.live_blocks().remove(&(ptr as usize)).is_none() {
            log::warn!("TrackingAllocator: free of unknown pointer {ptr:p}");
            self.unknown_frees.fetch_add(1, Ordering::AcqRel);
            return;
        }
        self.frees.fetch_add(1, Ordering::AcqRel);
        unsafe { self.inner.free(ptr) }
    }
}

impl<A> std::fmt::Debug for TrackingAllocator<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackingAllocator")
            .field("allocations", &self.allocations())
            .field("frees", &self.frees())
            .field("unknown_frees", &self.unknown_frees())
            .field("outstanding", &self.outstanding())
            .finish()
    }
}
