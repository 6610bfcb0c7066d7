use crate::{storage::Storage, SpscRing, StaticSpsc};

fn cursors<S: Storage>(rb: &SpscRing<S>) -> (usize, usize) {
    (rb.read_cursor(), rb.write_cursor())
}

#[test]
fn capacity() {
    const CAP: usize = 16;
    let rb = StaticSpsc::<i32, CAP>::default();
    assert_eq!(rb.capacity(), CAP);
}

#[cfg(feature = "alloc")]
#[test]
#[should_panic]
fn capacity_not_power_of_two() {
    let _ = crate::HeapSpsc::<i32>::new(10);
}

#[cfg(feature = "alloc")]
#[test]
#[should_panic]
fn capacity_zero() {
    let _ = crate::HeapSpsc::<i32>::new(0);
}

#[test]
fn try_push() {
    let mut rb = StaticSpsc::<i32, 2>::default();
    let (mut prod, _cons) = rb.split_ref();
    assert_eq!(cursors(prod.ring()), (0, 0));

    assert_eq!(prod.try_push(123), Ok(()));
    assert_eq!(cursors(prod.ring()), (0, 1));

    assert_eq!(prod.try_push(234), Ok(()));
    assert_eq!(cursors(prod.ring()), (0, 2));

    assert_eq!(prod.try_push(345), Err(345));
    assert_eq!(cursors(prod.ring()), (0, 2));
}

#[test]
fn pop_empty() {
    let mut rb = StaticSpsc::<i32, 2>::default();
    let (_prod, mut cons) = rb.split_ref();
    assert_eq!(cursors(cons.ring()), (0, 0));

    assert_eq!(cons.try_pop(), None);
    assert_eq!(cursors(cons.ring()), (0, 0));
}

#[test]
fn push_pop_one() {
    let mut rb = StaticSpsc::<i32, 2>::default();
    let (mut prod, mut cons) = rb.split_ref();
    let values = [12, 34, 56, 78, 90];
    assert_eq!(cursors(cons.ring()), (0, 0));

    // The cursors are monotonic: they never reset, only run ahead.
    for (i, value) in values.iter().enumerate() {
        assert_eq!(prod.try_push(*value), Ok(()));
        assert_eq!(cursors(cons.ring()), (i, i + 1));

        assert_eq!(cons.try_pop().unwrap(), *value);
        assert_eq!(cursors(cons.ring()), (i + 1, i + 1));

        assert_eq!(cons.try_pop(), None);
    }
}

#[test]
fn empty_full() {
    let mut rb = StaticSpsc::<i32, 1>::default();
    let (mut prod, cons) = rb.split_ref();
    assert!(prod.is_empty());
    assert!(!prod.is_full());

    assert_eq!(prod.try_push(123), Ok(()));
    assert!(!prod.is_empty());
    assert!(prod.is_full());
    assert!(cons.is_full());

    assert_eq!(prod.try_push(456), Err(456));
}

#[test]
fn len_accounting() {
    let mut rb = StaticSpsc::<i32, 8>::default();
    let (mut prod, mut cons) = rb.split_ref();
    assert_eq!(prod.occupied_len(), 0);
    assert_eq!(prod.vacant_len(), 8);

    for value in 0..5 {
        prod.try_push(value).unwrap();
    }
    assert_eq!(prod.occupied_len(), 5);
    assert_eq!(cons.occupied_len(), 5);
    assert_eq!(prod.vacant_len(), 3);

    for _ in 0..2 {
        cons.try_pop().unwrap();
    }
    assert_eq!(cons.occupied_len(), 3);
    assert_eq!(cons.vacant_len(), 5);
    assert_eq!(prod.ring().occupied_len(), 3);
}

#[test]
fn fifo_order() {
    let mut rb = StaticSpsc::<u32, 8>::default();
    let (mut prod, mut cons) = rb.split_ref();
    for value in 0..6 {
        prod.try_push(value).unwrap();
    }
    assert_eq!(cons.try_pop(), Some(0));
    assert_eq!(cons.try_pop(), Some(1));
    for value in 6..10 {
        prod.try_push(value).unwrap();
    }
    for value in 2..10 {
        assert_eq!(cons.try_pop(), Some(value));
    }
    assert_eq!(cons.try_pop(), None);
}

#[test]
fn try_peek() {
    let mut rb = StaticSpsc::<i32, 4>::default();
    let (mut prod, mut cons) = rb.split_ref();
    assert_eq!(cons.try_peek(), None);

    prod.try_push(1).unwrap();
    prod.try_push(2).unwrap();
    assert_eq!(cons.try_peek(), Some(&1));
    assert_eq!(cons.try_peek(), Some(&1));

    assert_eq!(cons.try_pop(), Some(1));
    assert_eq!(cons.try_peek(), Some(&2));

    assert_eq!(cons.try_pop(), Some(2));
    assert_eq!(cons.try_peek(), None);
}

#[test]
fn unchecked_fast_path() {
    let mut rb = StaticSpsc::<u8, 4>::default();
    let (mut prod, mut cons) = rb.split_ref();
    unsafe {
        prod.push_unchecked(1);
        prod.push_unchecked(2);
    }
    assert_eq!(cons.occupied_len(), 2);
    unsafe {
        assert_eq!(cons.pop_unchecked(), 1);
        assert_eq!(cons.pop_unchecked(), 2);
    }
    assert!(cons.is_empty());
}

#[test]
fn unsplit_ops() {
    let mut rb = StaticSpsc::<i32, 2>::default();
    assert_eq!(rb.try_push(1), Ok(()));
    assert_eq!(rb.try_push(2), Ok(()));
    assert_eq!(rb.try_push(3), Err(3));
    assert_eq!(rb.try_pop(), Some(1));
    assert_eq!(rb.try_pop(), Some(2));
    assert_eq!(rb.try_pop(), None);
}

#[cfg(feature = "alloc")]
#[test]
fn push_overwrite() {
    let mut rb = crate::HeapSpsc::<i32>::new(2);
    assert_eq!(rb.push_overwrite(0), None);
    assert_eq!(rb.push_overwrite(1), None);
    assert_eq!(rb.push_overwrite(2), Some(0));
    assert_eq!(rb.try_pop(), Some(1));
    assert_eq!(rb.try_pop(), Some(2));
    assert_eq!(rb.try_pop(), None);
}

#[test]
fn split_ref_reuse() {
    let mut rb = StaticSpsc::<i32, 4>::default();
    {
        let (mut prod, _) = rb.split_ref();
        prod.try_push(7).unwrap();
    }
    {
        // Fresh halves pick the cursors up where the previous ones left off.
        let (_, mut cons) = rb.split_ref();
        assert_eq!(cons.try_pop(), Some(7));
        assert_eq!(cons.try_pop(), None);
    }
}

#[test]
fn raw_parts_round_trip() {
    let mut rb = StaticSpsc::<i32, 4>::default();
    rb.try_push(11).unwrap();
    rb.try_push(22).unwrap();

    let (storage, read, write) = unsafe { rb.into_raw_parts() };
    assert_eq!((read, write), (0, 2));

    let mut rb = unsafe { SpscRing::from_raw_parts(storage, read, write) };
    assert_eq!(rb.occupied_len(), 2);
    assert_eq!(rb.try_pop(), Some(11));
    assert_eq!(rb.try_pop(), Some(22));
}
