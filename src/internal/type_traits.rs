//! Compile-time classification of traceable types.
//!
//! Every traceable type is either a plain object, whose address is its
//! allocation address, or a mixin, which lives embedded in some other
//! allocation and has to be asked where that allocation starts.

use super::trace_trait::{Trace, TraceCallback, TraceDescriptor, TraceTrait};

mod private {
    pub trait Sealed {}
}

/// Marker selecting how descriptors are resolved for a type.
pub trait ObjectKind: private::Sealed {
    const IS_MIXIN: bool;
}

/// Objects whose own address is the canonical allocation address.
pub enum PlainObject {}
/// Objects embedded into an allocation at some offset.
pub enum MixinObject {}

impl private::Sealed for PlainObject {}
impl private::Sealed for MixinObject {}

impl ObjectKind for PlainObject {
    const IS_MIXIN: bool = false;
}

impl ObjectKind for MixinObject {
    const IS_MIXIN: bool = true;
}

/// Declares which [`ObjectKind`] a type belongs to.
///
/// Usually implemented through [`garbage_collected!`](crate::garbage_collected) or
/// [`garbage_collected_mixin!`](crate::garbage_collected_mixin).
pub trait TypeTraits {
    type Kind: ObjectKind;
}

/// Returns `true` if `T` is a garbage collected mixin.
pub const fn is_garbage_collected_mixin<T: TypeTraits + ?Sized>() -> bool {
    <T::Kind as ObjectKind>::IS_MIXIN
}

/// Types allocated directly on the managed heap.
pub trait GarbageCollected: Trace + TypeTraits<Kind = PlainObject> {}

/// Types that are embedded into a [`GarbageCollected`] object and are traced through it.
pub trait GarbageCollectedMixin: Trace + TypeTraits<Kind = MixinObject> {
    /// Returns the descriptor of the object this mixin is embedded in.
    fn get_trace_descriptor(&self) -> TraceDescriptor;
}

/// Back reference from a mixin sub-object to the allocation that owns it.
///
/// Stored inside the mixin and filled in by the owner at construction time,
/// usually through [`mixin_anchor!`](crate::mixin_anchor).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MixinAnchor {
    offset: usize,
    callback: TraceCallback,
}

impl MixinAnchor {
    /// # Safety
    ///
    /// `offset` must be the byte offset of the mixin field inside `Owner`, and
    /// the mixin must only ever live inside an `Owner`.
    pub unsafe fn new<Owner: GarbageCollected>(offset: usize) -> Self {
        Self {
            offset,
            callback: <Owner as TraceTrait>::trace_,
        }
    }

    /// Offset of the mixin inside its owner.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Descriptor of the owner, given the address of the mixin sub-object.
    #[inline(always)]
    pub fn descriptor_for(&self, mixin: *const u8) -> TraceDescriptor {
        TraceDescriptor {
            base_object_payload: mixin.wrapping_sub(self.offset),
            callback: self.callback,
        }
    }
}
