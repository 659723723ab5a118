//! Set membership filters: `Except` and `Intersect`.
//!
//! The operand is turned into a `HashSet` once, when the step is built. An
//! operand that can hand off its buffer is moved into the set without being
//! iterated element by element; an existing set can be adopted through
//! `Stored` without copying it at all.

use std::borrow::Borrow;
use std::collections::HashSet;
use std::hash::Hash;

use lazyseq_core::config::ReservePolicy;
use lazyseq_core::hint::SizeHint;
use lazyseq_core::step::Step;
use lazyseq_mem::buffer::Buffer;
use lazyseq_mem::slot::Stored;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipMode {
    /// Elements not in the set.
    Except,
    /// Elements in the set, each distinct value once.
    Intersect,
}

pub struct Membership<'a, S, K> {
    upstream: S,
    set: Stored<'a, HashSet<K>>,
    mode: MembershipMode,
    yielded: HashSet<K>,
}

impl<'a, S, K> Membership<'a, S, K>
where
    S: Step,
    S::Item: Borrow<K>,
    K: Hash + Eq,
{
    /// Materialize `operand` into the lookup set.
    pub fn from_step<O>(
        upstream: S,
        mut operand: O,
        mode: MembershipMode,
        reserve: ReservePolicy,
    ) -> Self
    where
        O: Step<Item = K>,
    {
        let mut set = HashSet::new();
        match operand.harvest() {
            Some(items) => set.adopt_vec(items),
            None => {
                set.reserve_for(operand.measure(), reserve.max);
                while operand.advance() {
                    set.push_item(operand.current());
                }
            }
        }
        Self::with_set(upstream, Stored::owned(set), mode)
    }

    pub fn with_set(upstream: S, set: Stored<'a, HashSet<K>>, mode: MembershipMode) -> Self {
        Self {
            upstream,
            set,
            mode,
            yielded: HashSet::new(),
        }
    }

    pub fn set_len(&self) -> usize {
        self.set.len()
    }
}

impl<S, K> Step for Membership<'_, S, K>
where
    S: Step,
    S::Item: Borrow<K>,
    K: Hash + Eq + Clone,
{
    type Item = S::Item;

    fn advance(&mut self) -> bool {
        while self.upstream.advance() {
            let item = self.upstream.current();
            let key: &K = Borrow::<K>::borrow(&item);
            let hit = self.set.contains(key);
            match self.mode {
                MembershipMode::Except if !hit => return true,
                MembershipMode::Intersect if hit && !self.yielded.contains(key) => {
                    self.yielded.insert(key.clone());
                    return true;
                }
                _ => {}
            }
        }
        false
    }

    fn current(&self) -> S::Item {
        self.upstream.current()
    }

    fn measure(&self) -> SizeHint {
        let up = self.upstream.measure().filtered(false);
        match self.mode {
            MembershipMode::Except => up,
            MembershipMode::Intersect => up.limit_to(self.set.len() - self.yielded.len()),
        }
    }
}
