//! CloseWithFirst: passes everything through, then repeats the first `n`
//! elements. Useful for closing a polygon or a cyclic window.

use lazyseq_core::hint::SizeHint;
use lazyseq_core::step::{Step, StepState};
use smallvec::SmallVec;

/// Inline capacity of the replay buffer; longer heads spill to the heap.
const INLINE_HEAD: usize = 4;

pub struct CloseWithFirst<S: Step> {
    upstream: S,
    head: SmallVec<[S::Item; INLINE_HEAD]>,
    count: usize,
    /// Position in `head` once replay has started.
    replay: Option<usize>,
    state: StepState,
}

impl<S: Step> CloseWithFirst<S> {
    pub fn new(upstream: S, count: usize) -> Self {
        Self {
            upstream,
            head: SmallVec::new(),
            count,
            replay: None,
            state: StepState::Fresh,
        }
    }
}

impl<S> Step for CloseWithFirst<S>
where
    S: Step,
    S::Item: Clone,
{
    type Item = S::Item;

    fn advance(&mut self) -> bool {
        if self.state.is_exhausted() {
            return false;
        }
        let advanced = match self.replay {
            None if self.upstream.advance() => {
                if self.head.len() < self.count {
                    self.head.push(self.upstream.current());
                }
                true
            }
            None => {
                self.replay = Some(0);
                !self.head.is_empty()
            }
            Some(i) if i + 1 < self.head.len() => {
                self.replay = Some(i + 1);
                true
            }
            Some(_) => false,
        };
        self.state.record(advanced)
    }

    fn current(&self) -> S::Item {
        self.state.ensure_active();
        match self.replay {
            None => self.upstream.current(),
            Some(i) => self.head[i].clone(),
        }
    }

    fn measure(&self) -> SizeHint {
        match self.replay {
            _ if self.state.is_exhausted() => SizeHint::exact(0),
            Some(i) => SizeHint::exact(self.head.len() - i - 1),
            None => {
                let up = self.upstream.measure();
                let replayed = (SizeHint::exact(self.head.len()) + up).limit_to(self.count);
                up + replayed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SliceSource;
    use crate::testutil::copied;

    #[test]
    fn test_closes_with_head() {
        let data = [1, 2, 3, 4];
        let c = CloseWithFirst::new(SliceSource::new(&data), 2);
        assert_eq!(c.measure(), SizeHint::exact(6));
        assert_eq!(copied(c), vec![1, 2, 3, 4, 1, 2]);
    }

    #[test]
    fn test_head_longer_than_input_and_spill() {
        let data = [7, 8];
        assert_eq!(copied(CloseWithFirst::new(SliceSource::new(&data), 5)), vec![7, 8, 7, 8]);

        let long: Vec<i32> = (0..10).collect();
        let c = CloseWithFirst::new(SliceSource::new(&long), 6);
        let got = copied(c);
        assert_eq!(got.len(), 16);
        assert_eq!(&got[10..], &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_empty_and_zero() {
        let empty: [i32; 0] = [];
        assert!(copied(CloseWithFirst::new(SliceSource::new(&empty), 3)).is_empty());
        let data = [1, 2];
        assert_eq!(copied(CloseWithFirst::new(SliceSource::new(&data), 0)), vec![1, 2]);
    }

    #[test]
    fn test_measure_during_replay() {
        let data = [1, 2, 3];
        let mut c = CloseWithFirst::new(SliceSource::new(&data), 2);
        for _ in 0..4 {
            assert!(c.advance());
        }
        assert_eq!(c.current(), &1);
        assert_eq!(c.measure(), SizeHint::exact(1));
    }
}
