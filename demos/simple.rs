use ringpair::HeapSpsc;

fn main() {
    let rb = HeapSpsc::<i32>::new(2);
    let (mut prod, mut cons) = rb.split();

    prod.try_push(0).unwrap();
    prod.try_push(1).unwrap();
    assert_eq!(prod.try_push(2), Err(2));

    assert_eq!(cons.try_pop(), Some(0));

    prod.try_push(2).unwrap();

    assert_eq!(cons.try_pop(), Some(1));
    assert_eq!(cons.try_pop(), Some(2));
    assert_eq!(cons.try_pop(), None);
}
