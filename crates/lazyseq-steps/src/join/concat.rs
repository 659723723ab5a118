//! Concat: all of one sequence, then all of another.

use lazyseq_core::hint::SizeHint;
use lazyseq_core::step::Step;

pub struct Concat<A, B> {
    first: A,
    second: B,
    on_second: bool,
}

impl<A, B> Concat<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self {
            first,
            second,
            on_second: false,
        }
    }
}

impl<A, B> Step for Concat<A, B>
where
    A: Step,
    B: Step<Item = A::Item>,
{
    type Item = A::Item;

    fn advance(&mut self) -> bool {
        if !self.on_second {
            if self.first.advance() {
                return true;
            }
            // One-way switch; the first input is never polled again.
            self.on_second = true;
        }
        self.second.advance()
    }

    fn current(&self) -> A::Item {
        if self.on_second {
            self.second.current()
        } else {
            self.first.current()
        }
    }

    fn measure(&self) -> SizeHint {
        if self.on_second {
            self.second.measure()
        } else {
            self.first.measure() + self.second.measure()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{RepeatSource, SliceSource};
    use crate::take::{Skip, Take};
    use crate::testutil::copied;

    #[test]
    fn test_concat_of_take_and_skip_is_identity() {
        let data = [2, 3, 4, 5, 6, 7, 8, 9, 2, 0];
        let c = Concat::new(
            Take::new(SliceSource::new(&data), 3),
            Skip::new(SliceSource::new(&data), 3),
        );
        assert_eq!(c.measure(), SizeHint::exact(10));
        assert_eq!(copied(c), data);
    }

    #[test]
    fn test_concat_with_empty_sides() {
        let empty: [i32; 0] = [];
        let data = [1, 2];
        assert_eq!(
            copied(Concat::new(SliceSource::new(&empty), SliceSource::new(&data))),
            data
        );
        assert_eq!(
            copied(Concat::new(SliceSource::new(&data), SliceSource::new(&empty))),
            data
        );
    }

    #[test]
    fn test_concat_measure_unbounded() {
        let c = Concat::new(RepeatSource::times(1, 2), RepeatSource::forever(1));
        assert!(c.measure().is_unbounded());
    }
}
