//! Container binding: the collections terminals can collect into.
//!
//! `adopt_vec` is the receiving end of a cache hand-off. A `Vec` (or anything
//! convertible from one without copying) takes the harvested buffer as a
//! whole; other containers move the elements in one by one.

use std::collections::{BTreeSet, HashSet, VecDeque};
use std::hash::{BuildHasher, Hash};

use lazyseq_core::hint::SizeHint;
use smallvec::{Array, SmallVec};

pub trait Buffer {
    type Item;

    /// Current element count, when the container knows it cheaply.
    fn len_hint(&self) -> Option<usize>;

    fn push_item(&mut self, item: Self::Item);

    /// Remove all elements, keeping allocated capacity where possible.
    fn clear_retaining(&mut self);

    /// Reserve for the incoming elements described by `hint`, never more
    /// than `max`.
    fn reserve_for(&mut self, hint: SizeHint, max: usize) {
        let _ = (hint, max);
    }

    /// Take ownership of a harvested buffer.
    fn adopt_vec(&mut self, items: Vec<Self::Item>) {
        for item in items {
            self.push_item(item);
        }
    }
}

impl<T> Buffer for Vec<T> {
    type Item = T;

    fn len_hint(&self) -> Option<usize> {
        Some(self.len())
    }

    fn push_item(&mut self, item: T) {
        Vec::push(self, item);
    }

    fn clear_retaining(&mut self) {
        self.clear();
    }

    fn reserve_for(&mut self, hint: SizeHint, max: usize) {
        self.reserve(hint.reserve_hint().min(max));
    }

    fn adopt_vec(&mut self, items: Vec<T>) {
        if self.is_empty() {
            *self = items;
        } else {
            self.extend(items);
        }
    }
}

impl<T> Buffer for VecDeque<T> {
    type Item = T;

    fn len_hint(&self) -> Option<usize> {
        Some(self.len())
    }

    fn push_item(&mut self, item: T) {
        self.push_back(item);
    }

    fn clear_retaining(&mut self) {
        self.clear();
    }

    fn reserve_for(&mut self, hint: SizeHint, max: usize) {
        self.reserve(hint.reserve_hint().min(max));
    }

    fn adopt_vec(&mut self, items: Vec<T>) {
        if self.is_empty() {
            // Reuses the vector's allocation.
            *self = VecDeque::from(items);
        } else {
            self.extend(items);
        }
    }
}

impl<T, S> Buffer for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Item = T;

    fn len_hint(&self) -> Option<usize> {
        Some(self.len())
    }

    fn push_item(&mut self, item: T) {
        self.insert(item);
    }

    fn clear_retaining(&mut self) {
        self.clear();
    }

    fn reserve_for(&mut self, hint: SizeHint, max: usize) {
        self.reserve(hint.reserve_hint().min(max));
    }
}

impl<T: Ord> Buffer for BTreeSet<T> {
    type Item = T;

    fn len_hint(&self) -> Option<usize> {
        Some(self.len())
    }

    fn push_item(&mut self, item: T) {
        self.insert(item);
    }

    fn clear_retaining(&mut self) {
        self.clear();
    }
}

impl<A: Array> Buffer for SmallVec<A> {
    type Item = A::Item;

    fn len_hint(&self) -> Option<usize> {
        Some(self.len())
    }

    fn push_item(&mut self, item: A::Item) {
        self.push(item);
    }

    fn clear_retaining(&mut self) {
        self.clear();
    }

    fn reserve_for(&mut self, hint: SizeHint, max: usize) {
        self.reserve(hint.reserve_hint().min(max));
    }

    fn adopt_vec(&mut self, items: Vec<A::Item>) {
        if self.is_empty() {
            *self = SmallVec::from_vec(items);
        } else {
            self.extend(items);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill<B: Buffer<Item = u32>>(buf: &mut B) {
        buf.reserve_for(SizeHint::exact(3), 16);
        for i in [3, 1, 2] {
            buf.push_item(i);
        }
    }

    #[test]
    fn test_vec_adopts_wholesale() {
        let items = vec![1, 2, 3];
        let ptr = items.as_ptr();
        let mut out: Vec<u32> = Vec::new();
        out.adopt_vec(items);
        assert_eq!(out.as_ptr(), ptr);
        out.adopt_vec(vec![4]);
        assert_eq!(out, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_containers_bind_alike() {
        let mut v = Vec::new();
        let mut d = VecDeque::new();
        let mut h = HashSet::new();
        let mut b = BTreeSet::new();
        let mut s: SmallVec<[u32; 2]> = SmallVec::new();
        fill(&mut v);
        fill(&mut d);
        fill(&mut h);
        fill(&mut b);
        fill(&mut s);
        assert_eq!(v, vec![3, 1, 2]);
        assert_eq!(d.iter().copied().collect::<Vec<_>>(), vec![3, 1, 2]);
        assert_eq!(h.len_hint(), Some(3));
        assert_eq!(b.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(s.as_slice(), &[3, 1, 2]);
    }

    #[test]
    fn test_clear_retaining_keeps_capacity() {
        let mut v: Vec<u32> = Vec::with_capacity(32);
        fill(&mut v);
        let cap = v.capacity();
        v.clear_retaining();
        assert_eq!(v.len_hint(), Some(0));
        assert_eq!(v.capacity(), cap);
    }

    #[test]
    fn test_set_adopt_moves_elements() {
        let mut h: HashSet<u32> = HashSet::new();
        h.adopt_vec(vec![1, 1, 2]);
        assert_eq!(h.len(), 2);
        let mut b: BTreeSet<u32> = BTreeSet::new();
        b.adopt_vec(vec![5, 4]);
        assert_eq!(b.into_iter().collect::<Vec<_>>(), vec![4, 5]);
    }
}
