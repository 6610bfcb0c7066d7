use crate::HeapSpsc;
use alloc::vec::Vec;

#[test]
fn push_pop_slice() {
    let rb = HeapSpsc::<u32>::new(4);
    let (mut prod, mut cons) = rb.split();

    assert_eq!(prod.push_slice(&[1, 2, 3]), 3);
    let mut out = [0; 2];
    assert_eq!(cons.pop_slice(&mut out), 2);
    assert_eq!(out, [1, 2]);

    // The next batch straddles the physical end of the storage.
    assert_eq!(prod.push_slice(&[4, 5, 6]), 3);
    let (left, right) = cons.as_slices();
    assert_eq!(left.len() + right.len(), 4);

    let mut rest = [0; 8];
    assert_eq!(cons.pop_slice(&mut rest), 4);
    assert_eq!(&rest[..4], &[3, 4, 5, 6]);
}

#[test]
fn push_slice_over_capacity() {
    let rb = HeapSpsc::<u32>::new(4);
    let (mut prod, mut cons) = rb.split();
    assert_eq!(prod.push_slice(&[1, 2, 3, 4, 5, 6]), 4);
    assert!(prod.is_full());
    let mut out = [0; 6];
    assert_eq!(cons.pop_slice(&mut out), 4);
    assert_eq!(&out[..4], &[1, 2, 3, 4]);
}

#[test]
fn vacant_direct_write() {
    let rb = HeapSpsc::<u32>::new(4);
    let (mut prod, mut cons) = rb.split();
    {
        let (left, right) = prod.vacant_slices_mut();
        assert_eq!(left.len(), 4);
        assert_eq!(right.len(), 0);
        left[0].write(11);
        left[1].write(22);
    }
    unsafe { prod.advance_write(2) };

    assert_eq!(cons.try_pop(), Some(11));
    assert_eq!(cons.try_pop(), Some(22));
    assert_eq!(cons.try_pop(), None);
}

#[test]
fn occupied_direct_read() {
    let rb = HeapSpsc::<u32>::new(4);
    let (mut prod, mut cons) = rb.split();
    assert_eq!(prod.push_slice(&[7, 8, 9]), 3);

    let taken = {
        let (left, _) = cons.as_slices();
        let taken = left.len().min(2);
        assert_eq!(&left[..taken], &[7, 8]);
        taken
    };
    unsafe { cons.advance_read(taken) };

    assert_eq!(cons.try_pop(), Some(9));
    assert_eq!(cons.try_pop(), None);
}

#[test]
fn advance_read_resyncs_empty_check() {
    let rb = HeapSpsc::<u32>::new(4);
    let (mut prod, mut cons) = rb.split();
    assert_eq!(prod.push_slice(&[1, 2]), 2);

    // Consume the whole batch through the raw view.
    let (left, _) = cons.as_slices();
    assert_eq!(left, &[1, 2]);
    unsafe { cons.advance_read(2) };

    assert_eq!(cons.try_pop(), None);
    assert_eq!(cons.try_peek(), None);
    assert_eq!(prod.try_push(3), Ok(()));
    assert_eq!(cons.try_pop(), Some(3));
    assert_eq!(cons.try_pop(), None);
}

#[test]
fn raw_pop_then_checked_pop() {
    let rb = HeapSpsc::<u32>::new(2);
    let (mut prod, mut cons) = rb.split();

    // The consumer's cache was taken at split time and still says empty.
    assert_eq!(prod.try_push(1), Ok(()));
    assert!(!cons.is_empty());
    assert_eq!(unsafe { cons.pop_unchecked() }, 1);

    assert_eq!(cons.try_pop(), None);
    assert_eq!(prod.try_push(2), Ok(()));
    assert_eq!(cons.try_pop(), Some(2));
}

#[test]
fn raw_push_then_checked_push() {
    let rb = HeapSpsc::<u32>::new(1);
    let (mut prod, mut cons) = rb.split();

    assert_eq!(prod.try_push(1), Ok(()));
    assert_eq!(cons.try_pop(), Some(1));

    // The producer's cache still counts the popped slot as occupied.
    assert!(!prod.is_full());
    unsafe { prod.push_unchecked(2) };

    assert_eq!(prod.try_push(3), Err(3));
    assert_eq!(cons.try_pop(), Some(2));
    assert_eq!(prod.try_push(3), Ok(()));
    assert_eq!(cons.try_pop(), Some(3));
    assert_eq!(cons.try_pop(), None);
}

#[test]
fn push_iter_pop_iter() {
    let rb = HeapSpsc::<i32>::new(8);
    let (mut prod, mut cons) = rb.split();

    assert_eq!(prod.push_iter([1, 2, 3].into_iter()), 3);
    let collected: Vec<_> = cons.pop_iter().collect();
    assert_eq!(collected, [1, 2, 3]);
    assert!(cons.is_empty());

    // A too-long iterator stops at capacity and leaves the rest unconsumed.
    let mut source = 0..100;
    assert_eq!(prod.push_iter(source.by_ref()), 8);
    assert_eq!(source.next(), Some(8));
    let collected: Vec<_> = cons.into_iter().collect();
    assert_eq!(collected, (0..8).collect::<Vec<_>>());
}

#[test]
fn skip_clear() {
    let rb = HeapSpsc::<i32>::new(8);
    let (mut prod, mut cons) = rb.split();

    assert_eq!(prod.push_iter(0..8), 8);
    assert_eq!(cons.skip(4), 4);
    assert_eq!(cons.skip(8), 4);
    assert_eq!(cons.skip(4), 0);

    assert_eq!(prod.push_iter(0..3), 3);
    assert_eq!(cons.clear(), 3);
    assert!(cons.is_empty());
}

#[test]
fn iter_non_destructive() {
    let rb = HeapSpsc::<i32>::new(4);
    let (mut prod, mut cons) = rb.split();
    prod.push_slice(&[5, 6, 7]);

    assert!(cons.iter().copied().eq([5, 6, 7]));
    assert_eq!(cons.occupied_len(), 3);

    for value in cons.iter_mut() {
        *value += 1;
    }
    let collected: Vec<_> = cons.pop_iter().collect();
    assert_eq!(collected, [6, 7, 8]);
}
