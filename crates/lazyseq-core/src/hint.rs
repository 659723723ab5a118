//! Size hints: what a step knows about how many elements remain.
//!
//! Every step reports a `SizeHint` from `measure()`. Hints are plain values,
//! built fresh on each call and combined functionally, so consumers can
//! preallocate (or answer `count()`) without running a pipeline.
//!
//! The kinds, from least to most informative:
//!
//! - `Unknown`: nothing is known.
//! - `Unbounded`: the sequence never ends.
//! - `Bounded(n)`: at most `n` remain.
//! - `KnownBound(n)`: exactly `n` remain upstream, a filter may drop some.
//! - `Exact(n)`: exactly `n` remain.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HintKind {
    Unknown,
    Unbounded,
    Bounded,
    KnownBound,
    Exact,
}

impl HintKind {
    /// Strength among the kinds that carry a value.
    fn strength(self) -> u8 {
        match self {
            HintKind::Exact => 3,
            HintKind::KnownBound => 2,
            HintKind::Bounded => 1,
            HintKind::Unknown | HintKind::Unbounded => 0,
        }
    }

    fn weaker(self, other: Self) -> Self {
        if self.strength() <= other.strength() {
            self
        } else {
            other
        }
    }

    fn has_value(self) -> bool {
        self.strength() > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "HintRepr", into = "HintRepr")]
pub struct SizeHint {
    kind: HintKind,
    value: usize,
}

/// Wire form; deserialization re-applies normalization.
#[derive(Serialize, Deserialize)]
struct HintRepr {
    kind: HintKind,
    #[serde(default)]
    value: usize,
}

impl From<HintRepr> for SizeHint {
    fn from(r: HintRepr) -> Self {
        SizeHint::with_kind(r.kind, r.value)
    }
}

impl From<SizeHint> for HintRepr {
    fn from(h: SizeHint) -> Self {
        HintRepr {
            kind: h.kind,
            value: h.value,
        }
    }
}

impl Default for SizeHint {
    fn default() -> Self {
        SizeHint::unknown()
    }
}

impl SizeHint {
    pub const fn unknown() -> Self {
        Self {
            kind: HintKind::Unknown,
            value: 0,
        }
    }

    pub const fn unbounded() -> Self {
        Self {
            kind: HintKind::Unbounded,
            value: 0,
        }
    }

    pub const fn bounded(n: usize) -> Self {
        Self {
            kind: HintKind::Bounded,
            value: n,
        }
    }

    /// A known bound of zero is an exact zero.
    pub const fn known_bound(n: usize) -> Self {
        if n == 0 {
            Self::exact(0)
        } else {
            Self {
                kind: HintKind::KnownBound,
                value: n,
            }
        }
    }

    pub const fn exact(n: usize) -> Self {
        Self {
            kind: HintKind::Exact,
            value: n,
        }
    }

    fn with_kind(kind: HintKind, value: usize) -> Self {
        match kind {
            HintKind::Unknown => Self::unknown(),
            HintKind::Unbounded => Self::unbounded(),
            HintKind::Bounded => Self::bounded(value),
            HintKind::KnownBound => Self::known_bound(value),
            HintKind::Exact => Self::exact(value),
        }
    }

    /// Interpret an `Iterator::size_hint` pair.
    pub fn from_iter_hint((lo, hi): (usize, Option<usize>)) -> Self {
        match hi {
            Some(hi) if hi == lo => Self::exact(lo),
            Some(hi) => Self::bounded(hi),
            None if lo == usize::MAX => Self::unbounded(),
            None => Self::unknown(),
        }
    }

    /// Lower/upper pair in `Iterator::size_hint` form.
    pub fn to_iter_hint(self) -> (usize, Option<usize>) {
        match self.kind {
            HintKind::Exact => (self.value, Some(self.value)),
            HintKind::KnownBound | HintKind::Bounded => (0, Some(self.value)),
            HintKind::Unbounded => (usize::MAX, None),
            HintKind::Unknown => (0, None),
        }
    }

    pub fn kind(self) -> HintKind {
        self.kind
    }

    /// The carried value, for the kinds that have one.
    pub fn value(self) -> Option<usize> {
        self.kind.has_value().then_some(self.value)
    }

    pub fn upper_bound(self) -> Option<usize> {
        self.value()
    }

    pub fn is_exact(self) -> bool {
        self.kind == HintKind::Exact
    }

    pub fn is_unbounded(self) -> bool {
        self.kind == HintKind::Unbounded
    }

    pub fn is_unknown(self) -> bool {
        self.kind == HintKind::Unknown
    }

    /// How many elements a consumer may reasonably reserve for.
    pub fn reserve_hint(self) -> usize {
        match self.kind {
            HintKind::Exact | HintKind::KnownBound => self.value,
            _ => 0,
        }
    }

    /// The shorter of two sequences, as when zipping.
    pub fn limit(self, other: Self) -> Self {
        use HintKind::*;
        match (self.kind, other.kind) {
            (Exact, Exact) => Self::exact(self.value.min(other.value)),
            (Unbounded, _) => other,
            (_, Unbounded) => self,
            (Unknown, Unknown) => Self::unknown(),
            (Unknown, _) => Self::bounded(other.value),
            (_, Unknown) => Self::bounded(self.value),
            (a, b) => Self::with_kind(a.weaker(b), self.value.min(other.value)),
        }
    }

    /// At most `n` of the remaining elements.
    pub fn limit_to(self, n: usize) -> Self {
        match self.kind {
            HintKind::Exact => Self::exact(self.value.min(n)),
            HintKind::Unbounded => Self::exact(n),
            HintKind::Unknown => Self::bounded(n),
            kind => Self::with_kind(kind, self.value.min(n)),
        }
    }

    /// The remaining elements after dropping `n`; never wraps.
    pub fn subtract(self, n: usize) -> Self {
        match self.kind {
            HintKind::Unknown | HintKind::Unbounded => self,
            kind => Self::with_kind(kind, self.value.saturating_sub(n)),
        }
    }

    /// The hint after an element filter. `terminable` marks filters that can
    /// end the sequence early (take-while and friends).
    pub fn filtered(self, terminable: bool) -> Self {
        match self.kind {
            HintKind::Exact | HintKind::KnownBound if self.value == 0 => Self::exact(0),
            HintKind::Exact | HintKind::KnownBound if terminable => Self::bounded(self.value),
            HintKind::Exact | HintKind::KnownBound => Self::known_bound(self.value),
            HintKind::Unbounded if terminable => Self::unknown(),
            _ => self,
        }
    }
}

/// Length of one sequence followed by another.
impl Add for SizeHint {
    type Output = SizeHint;

    fn add(self, other: SizeHint) -> SizeHint {
        use HintKind::*;
        match (self.kind, other.kind) {
            (Unbounded, _) | (_, Unbounded) => SizeHint::unbounded(),
            (Exact, Exact) => SizeHint::exact(self.value.saturating_add(other.value)),
            (Unknown, _) | (_, Unknown) => SizeHint::unknown(),
            (a, b) => SizeHint::with_kind(a.weaker(b), self.value.saturating_add(other.value)),
        }
    }
}

impl Sum for SizeHint {
    fn sum<I: Iterator<Item = SizeHint>>(iter: I) -> SizeHint {
        iter.fold(SizeHint::exact(0), Add::add)
    }
}

impl fmt::Display for SizeHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            HintKind::Unknown => write!(f, "unknown"),
            HintKind::Unbounded => write!(f, "unbounded"),
            HintKind::Bounded => write!(f, "<= {}", self.value),
            HintKind::KnownBound => write!(f, "<= {} (known)", self.value),
            HintKind::Exact => write!(f, "exactly {}", self.value),
        }
    }
}
