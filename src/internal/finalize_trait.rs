pub type FinalizationCallback = unsafe fn(*mut u8);

/// Finalization metadata of `Self`. Implemented for every sized type.
pub trait FinalizeTrait: Sized {
    const NON_TRIVIAL_DTOR: bool = core::mem::needs_drop::<Self>();
    /// `None` when dropping `Self` is a no-op.
    const CALLBACK: Option<FinalizationCallback>;

    /// Runs the destructor of the object at `obj`.
    ///
    /// # Safety
    ///
    /// `obj` must point to a live `Self` that is never used afterwards.
    unsafe fn finalize(obj: *mut u8) {
        core::ptr::drop_in_place(obj.cast::<Self>());
    }
}

impl<T> FinalizeTrait for T {
    const CALLBACK: Option<FinalizationCallback> = if <T as FinalizeTrait>::NON_TRIVIAL_DTOR {
        Some(<T as FinalizeTrait>::finalize)
    } else {
        None
    };
}
