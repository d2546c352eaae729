//! Randomized reset/release/take/swap sequences must keep allocations and
//! frees balanced.

use ownkit::{RawAllocator, TrackingAllocator, UniquePodPtr, make_unique_pod_cleared_in};

type Handle<'a> = UniquePodPtr<u64, &'a TrackingAllocator>;

fn run_sequence(seed: u64, steps: usize) {
    fastrand::seed(seed);
    let tracker = TrackingAllocator::new();
    let mut handles: Vec<Handle<'_>> = Vec::new();
    let mut released: Vec<*mut u64> = Vec::new();

    for _ in 0..steps {
        match fastrand::u8(0..6) {
            0 => handles.push(make_unique_pod_cleared_in(&tracker).unwrap()),
            1 if !handles.is_empty() => {
                let i = fastrand::usize(0..handles.len());
                handles.swap_remove(i);
            }
            2 if !handles.is_empty() => {
                let i = fastrand::usize(0..handles.len());
                if let Some(ptr) = handles[i].release() {
                    released.push(ptr.as_ptr());
                }
            }
            3 if !handles.is_empty() => {
                let i = fastrand::usize(0..handles.len());
                let adopt = released.pop().unwrap_or(std::ptr::null_mut());
                unsafe { handles[i].reset(adopt) };
            }
            4 if !handles.is_empty() => {
                let i = fastrand::usize(0..handles.len());
                let moved = handles[i].take();
                assert!(handles[i].is_null());
                handles.push(moved);
            }
            5 if handles.len() >= 2 => {
                let (left, right) = handles.split_at_mut(1);
                left[0].swap(&mut right[0]);
            }
            _ => {}
        }

        for handle in &mut handles {
            if let Some(value) = handle.as_mut() {
                *value = value.wrapping_add(1);
            }
        }

        let owned = handles.iter().filter(|h| !h.is_null()).count();
        assert_eq!(tracker.outstanding(), owned + released.len());
    }

    drop(handles);
    for ptr in released {
        unsafe { tracker.free(ptr.cast()) };
    }
    assert_eq!(tracker.outstanding(), 0);
    assert_eq!(tracker.allocations(), tracker.frees());
    assert_eq!(tracker.unknown_frees(), 0);
}

#[test]
fn test_random_ownership_sequences() {
    for seed in [1u64, 7, 2985745485, 0xdead_beef] {
        run_sequence(seed, 500);
    }
}
