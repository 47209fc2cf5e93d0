use std::any::{type_name, TypeId};

use crate::gc_info_table::{GCInfo, GC_TABLE};

use super::{finalize_trait::FinalizeTrait, trace_trait::TraceTrait, type_traits::GarbageCollected};

/// Index of a [`GCInfo`] inside the global [`GCInfoTable`](crate::gc_info_table::GCInfoTable).
///
/// Index `0` is never handed out and marks free memory.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct GCInfoIndex(pub u16);

/// Registers `Self` in the global GCInfo table.
///
/// Only available for directly allocated types: a mixin has no allocation of
/// its own and is traced through its owner.
pub trait GCInfoTrait: GarbageCollected + Sized + 'static {
    fn index() -> GCInfoIndex;

    /// The metadata registered for `Self`.
    fn gc_info() -> GCInfo {
        GCInfo {
            trace: <Self as TraceTrait>::trace_,
            finalize: <Self as FinalizeTrait>::CALLBACK,
            name: type_name::<Self>(),
        }
    }
}

impl<T: GarbageCollected + 'static> GCInfoTrait for T {
    fn index() -> GCInfoIndex {
        GC_TABLE.add_gc_info_type_id(TypeId::of::<T>(), Self::gc_info())
    }
}
