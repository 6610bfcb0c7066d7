//! Moving average over a sliding window: the transform reads its last
//! `WINDOW` samples by logical offset while the stream advances.

use ringpair::HeapWindow;

const WINDOW: usize = 4;

fn main() {
    // One spare slot so a push never lands on a sample still in the window.
    let mut win = HeapWindow::<f32>::new(WINDOW + 1);
    let samples = [1.0f32, 4.0, 2.0, 8.0, 5.0, 7.0, 3.0, 6.0];

    let mut filled = 0;
    for (t, sample) in samples.iter().copied().enumerate() {
        win.push(sample);
        if filled < WINDOW {
            filled += 1;
        } else {
            win.pop();
        }
        if filled == WINDOW {
            let sum: f32 = (0..WINDOW).map(|k| win[k]).sum();
            println!("t={} avg={}", t, sum / WINDOW as f32);
        }
    }
}
