//! Two-thread ordering stress. Run it on a weakly-ordered machine (e.g.
//! aarch64) to shake out an acquire/release mistake: producer and consumer
//! fold the same checksum independently and any loss, duplication or
//! reorder makes them diverge.

use ringpair::HeapSpsc;
use std::thread;

const COUNT: u64 = 10_000_000;

fn fold(hash: u64, value: u64) -> u64 {
    (hash ^ value).wrapping_mul(0x0100_0000_01b3)
}

fn main() {
    let rb = HeapSpsc::<u64>::new(1024);
    let (mut prod, mut cons) = rb.split();

    let pjh = thread::spawn(move || {
        let mut hash = 0xcbf2_9ce4_8422_2325u64;
        for value in 0..COUNT {
            while prod.try_push(value).is_err() {}
            hash = fold(hash, value);
        }
        hash
    });

    let cjh = thread::spawn(move || {
        let mut hash = 0xcbf2_9ce4_8422_2325u64;
        let mut next = 0;
        while next < COUNT {
            if let Some(value) = cons.try_pop() {
                assert_eq!(value, next);
                hash = fold(hash, value);
                next += 1;
                if next % (COUNT / 10) == 0 {
                    println!("... {}%", next / (COUNT / 100));
                }
            }
        }
        hash
    });

    let phash = pjh.join().unwrap();
    let chash = cjh.join().unwrap();
    assert_eq!(phash, chash);
    println!("Success, checksum {:#018x}", phash);
}
