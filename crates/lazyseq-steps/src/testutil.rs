//! Shared helpers for step unit tests.

use lazyseq_core::step::Step;

pub fn drain<S: Step>(mut step: S) -> Vec<S::Item> {
    let mut out = Vec::new();
    while step.advance() {
        out.push(step.current());
    }
    // Exhaustion is sticky.
    assert!(!step.advance());
    assert!(!step.advance());
    out
}

pub fn copied<'a, S>(step: S) -> Vec<i32>
where
    S: Step<Item = &'a i32>,
{
    drain(step).into_iter().copied().collect()
}
