//! Type-erased steps: placement, downcasting and buffer hand-off.

use std::cell::Cell;
use std::rc::Rc;

use lazyseq::prelude::*;
use lazyseq::steps::{RangeSource, Sort};
use lazyseq::ErasedStep;

type Cmp = fn(&u32, &u32) -> std::cmp::Ordering;

fn descending(a: &u32, b: &u32) -> std::cmp::Ordering {
    b.cmp(a)
}

fn sorted_range(n: usize) -> Sort<RangeSource<u32>, Cmp> {
    Sort::new(RangeSource::new(0, n, 1), descending as Cmp, ReservePolicy::default())
}

#[test]
fn test_downcast_recovers_caching_step() {
    let mut erased: ErasedStep<'static, u32> = ErasedStep::new_tagged(sorted_range(4));
    assert!(erased.downcast_mut::<RangeSource<u32>>().is_none());

    let sort = erased
        .downcast_mut::<Sort<RangeSource<u32>, Cmp>>()
        .expect("tagged with its own type");
    assert!(!sort.is_computed());
    assert!(sort.advance());
    assert_eq!(sort.current(), 3);
    assert_eq!(sort.buffer(), Some(&[3, 2, 1, 0][..]));

    assert_eq!(erased.current(), 3);
    assert_eq!(erased.harvest(), Some(vec![2, 1, 0]));
    assert!(!erased.advance());
}

#[test]
fn test_untagged_steps_do_not_downcast() {
    let mut erased: ErasedStep<'_, u32> = ErasedStep::new(sorted_range(2));
    assert!(erased.downcast_mut::<Sort<RangeSource<u32>, Cmp>>().is_none());
    assert_eq!(erased.items().collect::<Vec<_>>(), vec![1, 0]);
}

struct Noisy {
    left: usize,
    drops: Rc<Cell<usize>>,
    _pad: [u64; 32],
}

impl Step for Noisy {
    type Item = usize;

    fn advance(&mut self) -> bool {
        if self.left == 0 {
            return false;
        }
        self.left -= 1;
        true
    }

    fn current(&self) -> usize {
        self.left
    }

    fn measure(&self) -> SizeHint {
        SizeHint::exact(self.left)
    }
}

impl Drop for Noisy {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

#[test]
fn test_large_steps_go_to_heap_and_drop_once() {
    let drops = Rc::new(Cell::new(0));
    let noisy = Noisy {
        left: 2,
        drops: Rc::clone(&drops),
        _pad: [0; 32],
    };
    assert!(!ErasedStep::<'_, usize>::fits::<Noisy>());
    let erased: ErasedStep<'_, usize> = ErasedStep::new(noisy);
    assert!(!erased.is_inline());
    assert_eq!(erased.measure(), SizeHint::exact(2));
    assert_eq!(erased.items().collect::<Vec<_>>(), vec![1, 0]);
    assert_eq!(drops.get(), 1);

    let wide: ErasedStep<'_, usize, 512> = ErasedStep::new(Noisy {
        left: 1,
        drops: Rc::clone(&drops),
        _pad: [0; 32],
    });
    assert!(wide.is_inline());
    drop(wide);
    assert_eq!(drops.get(), 2);
}

#[test]
fn test_inline_map_with_cell_counter() {
    let calls = Cell::new(0u32);
    let q = Query::range(0u32, 3, 1)
        .map(move |x| {
            calls.set(calls.get() + 1);
            x + calls.get()
        })
        .erase();
    assert!(q.steps().is_inline());
    assert_eq!(q.iter().collect::<Vec<_>>(), vec![1, 3, 5]);
    // Every build starts from a fresh copy of the closure.
    assert_eq!(q.iter().collect::<Vec<_>>(), vec![1, 3, 5]);
}
