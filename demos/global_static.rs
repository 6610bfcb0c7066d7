#![no_std]

use lock_free_static::OnceMut;
use ringpair::StaticSpsc;

static RB: OnceMut<StaticSpsc<i32, 2>> = OnceMut::new();

fn main() {
    RB.set(StaticSpsc::default()).ok().expect("RB already initialized");

    let (mut prod, mut cons) = RB
        .get_mut()
        .expect("Mutable reference to RB already taken")
        .split_ref();

    assert_eq!(prod.try_push(123), Ok(()));
    assert_eq!(prod.try_push(321), Ok(()));
    assert_eq!(prod.try_push(444), Err(444));

    assert_eq!(cons.try_pop(), Some(123));
    assert_eq!(cons.try_pop(), Some(321));
    assert_eq!(cons.try_pop(), None);
}
