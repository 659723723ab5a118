//! Value slots used inside steps.
//!
//! `Deferred` holds a value that may not be constructed yet, `Reassignable`
//! one that is always present but replaced wholesale, and `Stored` a value
//! that is owned, borrowed or shared without the holder caring which.

use std::fmt;
use std::mem;
use std::ops::Deref;
use std::sync::Arc;

use lazyseq_core::error::{usage_violation, UsageError};

/// A slot that starts empty and is filled later, possibly many times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deferred<T> {
    slot: Option<T>,
}

impl<T> Default for Deferred<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deferred<T> {
    pub const fn new() -> Self {
        Self { slot: None }
    }

    pub fn with(value: T) -> Self {
        Self { slot: Some(value) }
    }

    pub fn is_set(&self) -> bool {
        self.slot.is_some()
    }

    /// Construct (or reconstruct) the value in place.
    pub fn set(&mut self, value: T) -> &mut T {
        self.slot.insert(value)
    }

    #[track_caller]
    pub fn get(&self) -> &T {
        match &self.slot {
            Some(v) => v,
            None => usage_violation(UsageError::SlotUnset),
        }
    }

    #[track_caller]
    pub fn get_mut(&mut self) -> &mut T {
        match &mut self.slot {
            Some(v) => v,
            None => usage_violation(UsageError::SlotUnset),
        }
    }

    pub fn try_get(&self) -> Option<&T> {
        self.slot.as_ref()
    }

    pub fn try_get_mut(&mut self) -> Option<&mut T> {
        self.slot.as_mut()
    }

    pub fn get_or_insert_with(&mut self, f: impl FnOnce() -> T) -> &mut T {
        self.slot.get_or_insert_with(f)
    }

    pub fn take(&mut self) -> Option<T> {
        self.slot.take()
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }
}

/// An always-initialized slot whose content is replaced as a whole.
///
/// Works for shared references and types without `Default`, where plain
/// assignment through a `&mut` would not express "rebind".
#[derive(Clone, PartialEq, Eq)]
pub struct Reassignable<T> {
    value: T,
}

impl<T> Reassignable<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    pub fn assign(&mut self, value: T) {
        self.value = value;
    }

    pub fn replace(&mut self, value: T) -> T {
        mem::replace(&mut self.value, value)
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T> Deref for Reassignable<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: fmt::Debug> fmt::Debug for Reassignable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

/// A value held by ownership, by borrow, or through a shared handle.
pub enum Stored<'a, T> {
    Owned(T),
    Borrowed(&'a T),
    Shared(Arc<T>),
}

impl<'a, T> Stored<'a, T> {
    pub fn owned(value: T) -> Self {
        Stored::Owned(value)
    }

    pub fn borrowed(value: &'a T) -> Self {
        Stored::Borrowed(value)
    }

    pub fn shared(value: Arc<T>) -> Self {
        Stored::Shared(value)
    }

    pub fn is_owned(&self) -> bool {
        matches!(self, Stored::Owned(_))
    }

    pub fn into_owned(self) -> T
    where
        T: Clone,
    {
        match self {
            Stored::Owned(v) => v,
            Stored::Borrowed(r) => r.clone(),
            Stored::Shared(a) => Arc::try_unwrap(a).unwrap_or_else(|a| (*a).clone()),
        }
    }
}

impl<T> Deref for Stored<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        match self {
            Stored::Owned(v) => v,
            Stored::Borrowed(r) => r,
            Stored::Shared(a) => a,
        }
    }
}

impl<T> Clone for Stored<'_, T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        match self {
            Stored::Owned(v) => Stored::Owned(v.clone()),
            Stored::Borrowed(r) => Stored::Borrowed(r),
            Stored::Shared(a) => Stored::Shared(Arc::clone(a)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Stored<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let how = match self {
            Stored::Owned(_) => "owned",
            Stored::Borrowed(_) => "borrowed",
            Stored::Shared(_) => "shared",
        };
        f.debug_tuple(how).field(&**self).finish()
    }
}
