use crate::{
    internal::type_traits::{
        GarbageCollected, GarbageCollectedMixin, MixinObject, ObjectKind, PlainObject, TypeTraits,
    },
    visitor::Visitor,
};

/// Callback for invoking tracing on a given object.
///
/// - `visitor`: The visitor to dispatch to.
/// - `object`: The object to invoke tracing on.
pub type TraceCallback = unsafe fn(&mut Visitor<'_>, *const u8);

/// Describes how to trace an object, i.e. how to visit all GC-relevant fields of an object.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TraceDescriptor {
    /// Adjusted base pointer, i.e. the pointer to the type implementing
    /// [`GarbageCollected`] of the object that is being traced.
    pub base_object_payload: *const u8,
    /// Callback for tracing the object.
    pub callback: TraceCallback,
}

/// Visits the GC-relevant fields of `self`.
///
/// This is the only thing a type has to provide to be traceable. Whether it is
/// allocated on its own or embedded as a mixin is declared separately through
/// [`TypeTraits`].
pub trait Trace {
    fn trace(&self, visitor: &mut Visitor<'_>);
}

/// Trait specifying how the garbage collector processes an object of type `T`.
///
/// Implemented for every type that is [`Trace`] and classified by [`TypeTraits`].
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be traced by the garbage collector",
    label = "`{Self}` has no trace descriptor",
    note = "implement `Trace` for `{Self}` and declare it with `garbage_collected!` or `garbage_collected_mixin!`"
)]
pub trait TraceTrait: Trace + Sized {
    /// Accessor for retrieving a [`TraceDescriptor`] to process an object of type `T`.
    ///
    /// # Safety
    ///
    /// `this` must point to a live instance of `Self`.
    unsafe fn get_trace_descriptor(this: *const u8) -> TraceDescriptor;

    /// Function invoking the tracing for an object of type `T`.
    ///
    /// # Safety
    ///
    /// `this` must point to a live instance of `Self`.
    unsafe fn trace_(visitor: &mut Visitor<'_>, this: *const u8);
}

impl<T> TraceTrait for T
where
    T: Trace + TypeTraits,
    T::Kind: TraceTraitImpl<T>,
{
    #[inline(always)]
    unsafe fn get_trace_descriptor(this: *const u8) -> TraceDescriptor {
        <T::Kind as TraceTraitImpl<T>>::get_trace_descriptor(this.cast::<T>())
    }

    unsafe fn trace_(visitor: &mut Visitor<'_>, this: *const u8) {
        (*this.cast::<T>()).trace(visitor);
    }
}

/// Returns the trace descriptor for a live object.
#[inline]
pub fn trace_descriptor_of<T: TraceTrait>(object: &T) -> TraceDescriptor {
    unsafe { T::get_trace_descriptor(object as *const T as *const u8) }
}

/// Per-kind descriptor resolution. Implemented by the [`ObjectKind`] markers only.
pub trait TraceTraitImpl<T>: ObjectKind {
    /// # Safety
    ///
    /// `this` must point to a live instance of `T`.
    unsafe fn get_trace_descriptor(this: *const T) -> TraceDescriptor;
}

impl<T: GarbageCollected> TraceTraitImpl<T> for PlainObject {
    #[inline(always)]
    unsafe fn get_trace_descriptor(this: *const T) -> TraceDescriptor {
        TraceDescriptor {
            base_object_payload: this.cast(),
            callback: <T as TraceTrait>::trace_,
        }
    }
}

impl<T: GarbageCollectedMixin> TraceTraitImpl<T> for MixinObject {
    #[inline(always)]
    unsafe fn get_trace_descriptor(this: *const T) -> TraceDescriptor {
        // Only the owner knows where the allocation starts.
        <T as GarbageCollectedMixin>::get_trace_descriptor(&*this)
    }
}
