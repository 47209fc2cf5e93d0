pub mod finalize_trait;
pub mod gc_info;
pub mod trace_trait;
pub mod type_traits;
