pub mod raw_allocator;
pub mod tracking;

#[cfg_attr(any(unix, windows), path = "sys_libc.rs")]
#[cfg_attr(not(any(unix, windows)), path = "sys_fallback.rs")]
pub mod sys;

pub use raw_allocator::{LibcAllocator, RawAllocator};
pub use tracking::TrackingAllocator;

#[cfg(all(test, any(unix, windows)))]
#[path = "sys_fallback.rs"]
mod sys_fallback;
