//! Type-erased steps with small-buffer placement.
//!
//! `ErasedStep` hides a concrete step type behind a table of function
//! pointers. A step whose size and alignment fit the inline capacity is
//! written into an embedded, 16-byte aligned byte buffer; anything larger is
//! boxed. The placement is recorded at construction and decides how the step
//! is dropped.
//!
//! Erasure is opt-in. Generic pipelines keep full static types; erase when a
//! pipeline has to cross a non-generic boundary (a struct field, a return
//! type chosen at runtime, a collection of heterogeneous pipelines).

use std::any::{type_name, TypeId};
use std::cell::UnsafeCell;
use std::fmt;
use std::marker::PhantomData;
use std::mem::{align_of, size_of, MaybeUninit};
use std::ptr::{self, NonNull};

use lazyseq_core::hint::SizeHint;
use lazyseq_core::step::Step;

/// Default inline capacity in bytes.
pub const DEFAULT_INLINE_BYTES: usize = 128;

/// Alignment of the inline buffer.
pub const INLINE_ALIGN: usize = 16;

#[repr(C, align(16))]
struct InlineBuf<const N: usize>([MaybeUninit<u8>; N]);

impl<const N: usize> InlineBuf<N> {
    const fn uninit() -> Self {
        Self([MaybeUninit::uninit(); N])
    }
}

#[derive(Clone, Copy)]
enum Placement {
    Inline,
    Heap(NonNull<u8>),
}

/// Operations on the erased value. Every entry expects a pointer to a live
/// value of the type the table was built for.
struct VTable<T> {
    advance: unsafe fn(*mut u8) -> bool,
    current: unsafe fn(*const u8) -> T,
    measure: unsafe fn(*const u8) -> SizeHint,
    harvest: unsafe fn(*mut u8) -> Option<Vec<T>>,
    drop_inline: unsafe fn(*mut u8),
    drop_boxed: unsafe fn(*mut u8),
    type_name: fn() -> &'static str,
}

impl<T> Clone for VTable<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for VTable<T> {}

impl<T> VTable<T> {
    fn of<S: Step<Item = T>>() -> Self {
        Self {
            advance: advance_raw::<S>,
            current: current_raw::<S>,
            measure: measure_raw::<S>,
            harvest: harvest_raw::<S>,
            drop_inline: drop_inline_raw::<S>,
            drop_boxed: drop_boxed_raw::<S>,
            type_name: type_name::<S>,
        }
    }
}

unsafe fn advance_raw<S: Step>(p: *mut u8) -> bool {
    // SAFETY: caller passes a pointer to a live, exclusively borrowed `S`.
    unsafe { (*p.cast::<S>()).advance() }
}

unsafe fn current_raw<S: Step>(p: *const u8) -> S::Item {
    // SAFETY: caller passes a pointer to a live `S`.
    unsafe { (*p.cast::<S>()).current() }
}

unsafe fn measure_raw<S: Step>(p: *const u8) -> SizeHint {
    // SAFETY: caller passes a pointer to a live `S`.
    unsafe { (*p.cast::<S>()).measure() }
}

unsafe fn harvest_raw<S: Step>(p: *mut u8) -> Option<Vec<S::Item>> {
    // SAFETY: caller passes a pointer to a live, exclusively borrowed `S`.
    unsafe { (*p.cast::<S>()).harvest() }
}

unsafe fn drop_inline_raw<S>(p: *mut u8) {
    // SAFETY: caller passes the inline buffer holding a live `S`, which is
    // never touched again.
    unsafe { ptr::drop_in_place(p.cast::<S>()) }
}

unsafe fn drop_boxed_raw<S>(p: *mut u8) {
    // SAFETY: caller passes the pointer produced by `Box::into_raw` for `S`,
    // exactly once.
    unsafe { drop(Box::from_raw(p.cast::<S>())) }
}

/// A step of unknown concrete type yielding `T`, borrowing for at most `'a`.
///
/// Not `Send` or `Sync`: the erased step may hold anything.
pub struct ErasedStep<'a, T, const N: usize = DEFAULT_INLINE_BYTES> {
    // Steps may mutate through `&self` (cells in closures), so every pointer
    // into the buffer comes from `UnsafeCell::get`.
    inline: UnsafeCell<InlineBuf<N>>,
    placement: Placement,
    vtable: VTable<T>,
    type_id: Option<TypeId>,
    _owns: PhantomData<Box<dyn Step<Item = T> + 'a>>,
}

impl<'a, T, const N: usize> ErasedStep<'a, T, N> {
    /// Erase `step`, inline when it fits.
    pub fn new<S: Step<Item = T> + 'a>(step: S) -> Self {
        Self::place(step, None, true)
    }

    /// Erase `step` on the heap regardless of its size.
    pub fn new_boxed<S: Step<Item = T> + 'a>(step: S) -> Self {
        Self::place(step, None, false)
    }

    /// Erase a `'static` step and remember its type for [`Self::downcast_mut`].
    pub fn new_tagged<S: Step<Item = T> + 'static>(step: S) -> Self {
        Self::place(step, Some(TypeId::of::<S>()), true)
    }

    /// Whether a value of type `S` would be placed inline.
    pub const fn fits<S>() -> bool {
        size_of::<S>() <= N && align_of::<S>() <= INLINE_ALIGN
    }

    fn place<S: Step<Item = T> + 'a>(step: S, type_id: Option<TypeId>, allow_inline: bool) -> Self {
        let inline = UnsafeCell::new(InlineBuf::<N>::uninit());
        let placement = if allow_inline && Self::fits::<S>() {
            // SAFETY: the buffer is large and aligned enough for `S` (checked
            // above) and holds nothing yet.
            unsafe { ptr::write(inline.get().cast::<S>(), step) };
            Placement::Inline
        } else {
            Placement::Heap(NonNull::from(Box::leak(Box::new(step))).cast::<u8>())
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(
            step = type_name::<S>(),
            size = size_of::<S>(),
            inline = matches!(placement, Placement::Inline),
            "erased step placed"
        );

        Self {
            inline,
            placement,
            vtable: VTable::of::<S>(),
            type_id,
            _owns: PhantomData,
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self.placement, Placement::Inline)
    }

    /// Name of the erased concrete type.
    pub fn step_type_name(&self) -> &'static str {
        (self.vtable.type_name)()
    }

    /// Recover the concrete step, if it was erased through `new_tagged` as `C`.
    ///
    /// This is the cache hand-off fast path: a consumer that knows which
    /// caching step sits behind the erasure reads its buffer directly instead
    /// of paying one indirect call per element. It is not a general way to
    /// inspect erased pipelines; untagged steps always answer `None`, and
    /// [`Step::harvest`] already forwards through the table for them.
    pub fn downcast_mut<C: Step<Item = T> + 'static>(&mut self) -> Option<&mut C> {
        if self.type_id != Some(TypeId::of::<C>()) {
            return None;
        }
        let p = self.data_ptr().cast::<C>();
        // SAFETY: the recorded TypeId proves the stored value is a `C`; the
        // returned borrow is tied to `&mut self`.
        Some(unsafe { &mut *p })
    }

    fn data_ptr(&self) -> *mut u8 {
        match self.placement {
            Placement::Inline => self.inline.get().cast::<u8>(),
            Placement::Heap(p) => p.as_ptr(),
        }
    }
}

impl<T, const N: usize> Step for ErasedStep<'_, T, N> {
    type Item = T;

    fn advance(&mut self) -> bool {
        let p = self.data_ptr();
        // SAFETY: `p` points at the live step this table was built for.
        unsafe { (self.vtable.advance)(p) }
    }

    fn current(&self) -> T {
        // SAFETY: as above.
        unsafe { (self.vtable.current)(self.data_ptr()) }
    }

    fn measure(&self) -> SizeHint {
        // SAFETY: as above.
        unsafe { (self.vtable.measure)(self.data_ptr()) }
    }

    fn harvest(&mut self) -> Option<Vec<T>> {
        let p = self.data_ptr();
        // SAFETY: as above.
        unsafe { (self.vtable.harvest)(p) }
    }
}

impl<T, const N: usize> Drop for ErasedStep<'_, T, N> {
    fn drop(&mut self) {
        match self.placement {
            // SAFETY: the inline buffer holds the live step; it is dropped once.
            Placement::Inline => unsafe { (self.vtable.drop_inline)(self.data_ptr()) },
            // SAFETY: `p` came from `Box::leak` of the erased type.
            Placement::Heap(p) => unsafe { (self.vtable.drop_boxed)(p.as_ptr()) },
        }
    }
}

impl<T, const N: usize> fmt::Debug for ErasedStep<'_, T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErasedStep")
            .field("step", &self.step_type_name())
            .field("inline", &self.is_inline())
            .finish()
    }
}
