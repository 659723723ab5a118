//! Size-hint algebra laws over a grid of sample hints.

use lazyseq::{HintKind, SizeHint};

fn samples() -> Vec<SizeHint> {
    let mut out = vec![SizeHint::unknown(), SizeHint::unbounded()];
    for n in [0, 1, 7, usize::MAX] {
        out.push(SizeHint::bounded(n));
        out.push(SizeHint::known_bound(n));
        out.push(SizeHint::exact(n));
    }
    out
}

#[test]
fn test_add_is_commutative_with_exact_zero_identity() {
    for a in samples() {
        assert_eq!(a + SizeHint::exact(0), a, "identity for {a}");
        for b in samples() {
            assert_eq!(a + b, b + a, "{a} + {b}");
        }
    }
}

#[test]
fn test_unbounded_dominates_add() {
    for a in samples() {
        assert!((a + SizeHint::unbounded()).is_unbounded());
    }
}

#[test]
fn test_limit_is_commutative_and_never_grows() {
    for a in samples() {
        assert_eq!(a.limit(SizeHint::unbounded()), a);
        for b in samples() {
            let l = a.limit(b);
            assert_eq!(l, b.limit(a), "limit({a}, {b})");
            if let (Some(x), Some(y), Some(z)) = (a.value(), b.value(), l.value()) {
                assert!(z <= x.min(y));
            }
        }
    }
}

#[test]
fn test_known_bound_zero_is_exact() {
    assert_eq!(SizeHint::known_bound(0), SizeHint::exact(0));
    assert_eq!(SizeHint::known_bound(3).subtract(5), SizeHint::exact(0));
    assert_eq!(SizeHint::exact(0).filtered(true), SizeHint::exact(0));
    for a in samples() {
        assert!(!(a.kind() == HintKind::KnownBound && a.value() == Some(0)));
    }
}

#[test]
fn test_subtract_never_increases_uncertainty() {
    for a in samples() {
        let s = a.subtract(3);
        match a.kind() {
            HintKind::Exact => assert!(s.is_exact()),
            HintKind::Unknown | HintKind::Unbounded => assert_eq!(s, a),
            _ => assert!(s.value() <= a.value()),
        }
    }
}

#[test]
fn test_filtered_degrades_exact() {
    assert_eq!(SizeHint::exact(5).filtered(false), SizeHint::known_bound(5));
    assert_eq!(SizeHint::exact(5).filtered(true), SizeHint::bounded(5));
    assert!(SizeHint::unbounded().filtered(true).is_unknown());
    assert!(SizeHint::unbounded().filtered(false).is_unbounded());
}

#[test]
fn test_sum_and_iter_hint() {
    let total: SizeHint = [SizeHint::exact(2), SizeHint::exact(3)].into_iter().sum();
    assert_eq!(total, SizeHint::exact(5));
    assert_eq!(SizeHint::from_iter_hint((4, Some(4))), SizeHint::exact(4));
    assert_eq!(SizeHint::exact(4).to_iter_hint(), (4, Some(4)));
    assert_eq!(SizeHint::from_iter_hint((0, None)), SizeHint::unknown());
}
