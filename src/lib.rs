//! Trace descriptors for a precise, type-directed tracing GC.
//!
//! Given a pointer to a managed object, [`TraceTrait::get_trace_descriptor`]
//! returns the address the collector should treat as the object together with
//! the callback that traces it. Objects reached through an embedded mixin are
//! resolved to the allocation that owns the mixin, so mark bits are always
//! keyed by the same address.

pub mod gc_info_table;
pub mod internal;
pub mod logger;
pub mod member;
pub mod visitor;

pub use internal::{
    finalize_trait::{FinalizationCallback, FinalizeTrait},
    gc_info::{GCInfoIndex, GCInfoTrait},
    trace_trait::{trace_descriptor_of, Trace, TraceCallback, TraceDescriptor, TraceTrait},
    type_traits::{
        is_garbage_collected_mixin, GarbageCollected, GarbageCollectedMixin, MixinAnchor,
        MixinObject, ObjectKind, PlainObject, TypeTraits,
    },
};
pub use member::Member;
pub use visitor::{Visitor, VisitorTrait};

#[doc(hidden)]
pub mod __private {
    pub use memoffset::offset_of;
}

/// Declares types that are allocated directly on the managed heap.
///
/// ```ignore
/// garbage_collected!(Leaf, Node);
/// ```
#[macro_export]
macro_rules! garbage_collected {
    ($($t:ty),* $(,)?) => {
        $(
            impl $crate::TypeTraits for $t {
                type Kind = $crate::PlainObject;
            }
            impl $crate::GarbageCollected for $t {}
        )*
    };
}

/// Declares mixin types.
///
/// `garbage_collected_mixin!(Mixin => anchor)` also implements
/// [`GarbageCollectedMixin`] by resolving through the [`MixinAnchor`] stored in
/// field `anchor`. The plain form leaves that impl to the caller.
#[macro_export]
macro_rules! garbage_collected_mixin {
    ($t:ty => $anchor:ident) => {
        $crate::garbage_collected_mixin!($t);
        impl $crate::GarbageCollectedMixin for $t {
            #[inline(always)]
            fn get_trace_descriptor(&self) -> $crate::TraceDescriptor {
                self.$anchor.descriptor_for(self as *const Self as *const u8)
            }
        }
    };
    ($($t:ty),* $(,)?) => {
        $(
            impl $crate::TypeTraits for $t {
                type Kind = $crate::MixinObject;
            }
        )*
    };
}

/// Builds the [`MixinAnchor`] for the mixin stored in `$field` of `$owner`.
///
/// Must be used inside `unsafe`: the mixin it is stored in must never live
/// anywhere but in that field of an `$owner`.
#[macro_export]
macro_rules! mixin_anchor {
    ($owner:path, $field:tt) => {
        $crate::MixinAnchor::new::<$owner>($crate::__private::offset_of!($owner, $field))
    };
}
