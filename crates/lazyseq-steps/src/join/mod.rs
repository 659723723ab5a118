//! Two-input steps: concatenation, zipping and set membership.

pub mod concat;
pub mod membership;
pub mod zip;
