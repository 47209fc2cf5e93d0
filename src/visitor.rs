use crate::{
    gc_info_table::GC_TABLE,
    internal::{
        gc_info::GCInfoIndex,
        trace_trait::{Trace, TraceDescriptor, TraceTrait},
    },
    member::Member,
};

/// Collector side of tracing. Receives every object reachable from a traced field.
pub trait VisitorTrait {
    /// `this` is the pointer the object was reached through, `descriptor` tells
    /// where the object starts and how to trace it.
    fn visit(&mut self, this: *const u8, descriptor: TraceDescriptor);
}

static_assertions::assert_obj_safe!(VisitorTrait);

/// Handle passed to [`Trace::trace`] implementations.
pub struct Visitor<'a> {
    pub(crate) vis: &'a mut dyn VisitorTrait,
}

impl<'a> Visitor<'a> {
    pub fn new(vis: &'a mut dyn VisitorTrait) -> Self {
        Self { vis }
    }

    /// Trace method for raw pointers. Prefer the versions for managed pointers.
    ///
    /// # Safety
    ///
    /// `t` must be null or point to a live `T`.
    pub unsafe fn trace<T: TraceTrait>(&mut self, t: *const T) {
        if t.is_null() {
            return;
        }

        self.vis
            .visit(t.cast(), <T as TraceTrait>::get_trace_descriptor(t.cast()))
    }

    pub fn trace_member<T: TraceTrait>(&mut self, member: &Member<T>) {
        unsafe {
            self.trace(member.get());
        }
    }

    /// Trace method for inlined objects that are not allocated themselves but
    /// otherwise follow managed heap layout and have a trace() method.
    pub fn trace_ref<T: Trace + ?Sized>(&mut self, object: &T) {
        object.trace(self);
    }

    /// Traces an object whose type is only known through its registered GCInfo.
    ///
    /// # Safety
    ///
    /// `payload` must be the canonical address of a live object registered at `index`.
    pub unsafe fn trace_untyped(&mut self, payload: *const u8, index: GCInfoIndex) {
        if payload.is_null() {
            return;
        }
        let gc_info = GC_TABLE.get_gc_info(index);
        self.vis.visit(
            payload,
            TraceDescriptor {
                base_object_payload: payload,
                callback: gc_info.trace,
            },
        )
    }

    /// Forwards an already resolved descriptor.
    ///
    /// # Safety
    ///
    /// `descriptor` must describe a live object.
    pub unsafe fn trace_descriptor(&mut self, this: *const u8, descriptor: TraceDescriptor) {
        self.vis.visit(this, descriptor);
    }
}
