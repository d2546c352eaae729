use ownkit::{
    RawAllocator, TrackingAllocator, UniquePodPtr, make_unique_pod_cleared,
    make_unique_pod_cleared_in, make_unique_pod_slice_cleared_in,
};

#[derive(Clone, Copy, bytemuck::Zeroable)]
#[repr(C)]
struct Blaah {
    a: i32,
}

#[test]
fn test_pod_handle_end_to_end() {
    let tracker = TrackingAllocator::new();
    {
        let b = make_unique_pod_cleared_in::<Blaah, _>(&tracker).unwrap();
        assert_eq!(std::mem::size_of::<Blaah>(), 4);
        assert_eq!(b.as_ref().unwrap().a, 0);
        assert_eq!(tracker.allocations(), 1);
        assert_eq!(tracker.live_bytes(), 4);
        assert!(tracker.is_live(b.as_ptr().cast_const().cast()));
        assert_eq!(tracker.frees(), 0);
    }
    assert_eq!(tracker.allocations(), 1);
    assert_eq!(tracker.frees(), 1);
    assert_eq!(tracker.unknown_frees(), 0);
    assert_eq!(tracker.outstanding(), 0);
}

#[test]
fn test_pod_handle_default_allocator() {
    let mut b: UniquePodPtr<Blaah> = make_unique_pod_cleared().unwrap();
    b.as_mut().unwrap().a = 17;
    assert_eq!(b.as_ref().unwrap().a, 17);
}

#[test]
fn test_pod_handle_release_then_free_manually() {
    let tracker = TrackingAllocator::new();
    let mut b = make_unique_pod_cleared_in::<Blaah, _>(&tracker).unwrap();
    let raw = b.release().unwrap();
    drop(b);
    assert_eq!(tracker.frees(), 0);
    assert_eq!(tracker.outstanding(), 1);

    unsafe { tracker.free(raw.as_ptr().cast()) };
    assert_eq!(tracker.frees(), 1);
    assert_eq!(tracker.unknown_frees(), 0);
}

#[test]
fn test_pod_handle_reset_frees_previous_block() {
    let tracker = TrackingAllocator::new();
    let mut first = make_unique_pod_cleared_in::<Blaah, _>(&tracker).unwrap();
    let mut second = make_unique_pod_cleared_in::<Blaah, _>(&tracker).unwrap();
    let adopted = second.release().unwrap().as_ptr();

    unsafe { first.reset(adopted) };
    assert_eq!(first.as_ptr(), adopted);
    assert_eq!(tracker.frees(), 1);
    assert_eq!(tracker.outstanding(), 1);

    drop(second);
    drop(first);
    assert_eq!(tracker.frees(), 2);
    assert_eq!(tracker.outstanding(), 0);
}

#[test]
fn test_pod_handle_move_leaves_source_empty() {
    let tracker = TrackingAllocator::new();
    let mut source = make_unique_pod_cleared_in::<Blaah, _>(&tracker).unwrap();
    let addr = source.as_ptr();

    let dest = source.take();
    assert!(source.get().is_none());
    assert_eq!(dest.as_ptr(), addr);

    drop(source);
    assert_eq!(tracker.frees(), 0);
    drop(dest);
    assert_eq!(tracker.frees(), 1);
}

#[test]
fn test_pod_slices_returned_exactly_once() {
    let tracker = TrackingAllocator::new();
    let lens = [0usize, 1, 3, 64, 1000];
    let handles: Vec<_> = lens
        .iter()
        .map(|&len| make_unique_pod_slice_cleared_in::<u16, _>(len, &tracker).unwrap())
        .collect();

    for (handle, &len) in handles.iter().zip(&lens) {
        let values = handle.as_ref().unwrap();
        assert_eq!(values.len(), len);
        assert!(values.iter().all(|&v| v == 0));
    }
    assert_eq!(tracker.outstanding(), lens.len());

    drop(handles);
    assert_eq!(tracker.frees(), lens.len());
    assert_eq!(tracker.live_bytes(), 0);
}
