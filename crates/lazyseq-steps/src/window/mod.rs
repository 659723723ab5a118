//! Steps that look at more than the current element: adjacent pairs,
//! running folds and a replayed head.

pub mod pairwise;
pub mod replay;
pub mod scan;
