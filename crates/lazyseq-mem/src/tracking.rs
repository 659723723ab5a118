//! Peak tracking for cache buffers.
//!
//! Keep this optional and cheap; terminals record the length of every buffer
//! they adopt or fill.

use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct PeakTracker {
    peak_len: AtomicUsize,
    recorded: AtomicUsize,
}

impl PeakTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a buffer length; updates the peak if higher.
    pub fn record_len(&self, len: usize) {
        self.recorded.fetch_add(1, Ordering::Relaxed);
        let mut cur = self.peak_len.load(Ordering::Relaxed);
        while len > cur {
            match self
                .peak_len
                .compare_exchange(cur, len, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => break,
                Err(observed) => cur = observed,
            }
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(
            len,
            peak = self.peak_len.load(Ordering::Relaxed),
            "buffer length"
        );
    }

    pub fn peak(&self) -> usize {
        self.peak_len.load(Ordering::Relaxed)
    }

    /// How many buffers were recorded.
    pub fn recorded(&self) -> usize {
        self.recorded.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peak_only_grows() {
        let t = PeakTracker::new();
        t.record_len(4);
        t.record_len(9);
        t.record_len(2);
        assert_eq!(t.peak(), 9);
        assert_eq!(t.recorded(), 3);
    }
}
