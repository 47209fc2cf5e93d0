use std::{any::TypeId, collections::HashMap, fmt};

use lazy_static::lazy_static;
use log::debug;
use parking_lot::RwLock;

use crate::internal::{
    finalize_trait::FinalizationCallback, gc_info::GCInfoIndex, trace_trait::TraceCallback,
};

/// GCInfo contains metadata for objects.
#[derive(Clone, Copy)]
pub struct GCInfo {
    pub trace: TraceCallback,
    pub finalize: Option<FinalizationCallback>,
    pub name: &'static str,
}

impl fmt::Debug for GCInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GCInfo")
            .field("name", &self.name)
            .field("finalize", &self.finalize.is_some())
            .finish()
    }
}

pub struct GCInfoTable {
    table: RwLock<Vec<GCInfo>>,
    type_id_map: RwLock<HashMap<TypeId, GCInfoIndex>>,
}

lazy_static! {
    pub static ref GC_TABLE: GCInfoTable = GCInfoTable::new();
}

impl GCInfoTable {
    /// At maximum [`MAX_INDEX - 1`](GCInfoTable::MAX_INDEX) indices are supported.
    ///
    /// We assume that 14 bits are enough to represent all possible types.
    pub const MAX_INDEX: u16 = 1 << 14;
    /// Minimum index returned. Values smaller [`MIN_INDEX`](GCInfoTable::MIN_INDEX) may be used as
    /// sentinels.
    pub const MIN_INDEX: u16 = 1;

    pub const INITIAL_WANTED_LIMIT: u16 = 512;

    pub fn new() -> Self {
        Self {
            table: RwLock::new(Vec::with_capacity(Self::INITIAL_WANTED_LIMIT as usize)),
            type_id_map: RwLock::new(HashMap::new()),
        }
    }

    /// Registers `info` once per `type_id` and returns its index. Later calls
    /// with the same `type_id` return the first index and ignore `info`.
    ///
    /// Already registered types only take the shared lock.
    pub fn add_gc_info_type_id(&self, type_id: TypeId, info: GCInfo) -> GCInfoIndex {
        if let Some(index) = self.registered_index(type_id) {
            return index;
        }
        let mut map = self.type_id_map.write();
        // Another thread may have registered it while we waited.
        if let Some(index) = map.get(&type_id) {
            return *index;
        }
        let index = self.add_gc_info(info);
        map.insert(type_id, index);
        index
    }

    /// Index registered for `type_id`, if any.
    pub fn registered_index(&self, type_id: TypeId) -> Option<GCInfoIndex> {
        self.type_id_map.read().get(&type_id).copied()
    }

    pub fn add_gc_info(&self, info: GCInfo) -> GCInfoIndex {
        let mut table = self.table.write();
        let index = table.len() + Self::MIN_INDEX as usize;
        if index >= Self::MAX_INDEX as usize {
            panic!("GCInfoTable memory exhausted");
        }
        debug!("Registered {:?} at index {}", info, index);
        table.push(info);
        GCInfoIndex(index as u16)
    }

    pub fn try_get_gc_info(&self, index: GCInfoIndex) -> Option<GCInfo> {
        let slot = (index.0 as usize).checked_sub(Self::MIN_INDEX as usize)?;
        self.table.read().get(slot).copied()
    }

    pub fn get_gc_info(&self, index: GCInfoIndex) -> GCInfo {
        match self.try_get_gc_info(index) {
            Some(info) => info,
            None => panic!("No GCInfo registered at index {}", index.0),
        }
    }

    /// Number of registered infos.
    pub fn len(&self) -> usize {
        self.table.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for GCInfoTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{mpsc, Arc},
        thread,
        time::Duration,
    };

    use super::*;
    use crate::visitor::Visitor;

    unsafe fn noop(_vis: &mut Visitor<'_>, _this: *const u8) {}

    fn info(name: &'static str) -> GCInfo {
        GCInfo {
            trace: noop,
            finalize: None,
            name,
        }
    }

    #[test]
    fn indices_start_at_min_index() {
        let table = GCInfoTable::new();
        assert!(table.is_empty());
        let first = table.add_gc_info(info("a"));
        let second = table.add_gc_info(info("b"));
        assert_eq!(first, GCInfoIndex(GCInfoTable::MIN_INDEX));
        assert_eq!(second, GCInfoIndex(GCInfoTable::MIN_INDEX + 1));
        assert_eq!(table.get_gc_info(second).name, "b");
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn type_id_registration_is_idempotent() {
        let table = GCInfoTable::new();
        let a = table.add_gc_info_type_id(TypeId::of::<u8>(), info("u8"));
        let b = table.add_gc_info_type_id(TypeId::of::<u8>(), info("ignored"));
        assert_eq!(a, b);
        assert_eq!(table.get_gc_info(a).name, "u8");
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn sentinel_and_unknown_indices_have_no_info() {
        let table = GCInfoTable::new();
        table.add_gc_info(info("a"));
        assert!(table.try_get_gc_info(GCInfoIndex(0)).is_none());
        assert!(table.try_get_gc_info(GCInfoIndex(2)).is_none());
    }

    #[test]
    fn registered_lookup_shares_the_map_lock() {
        let table = Arc::new(GCInfoTable::new());
        let index = table.add_gc_info_type_id(TypeId::of::<u16>(), info("u16"));
        assert_eq!(table.registered_index(TypeId::of::<u16>()), Some(index));
        assert_eq!(table.registered_index(TypeId::of::<u32>()), None);

        let reader = table.type_id_map.read();
        let (tx, rx) = mpsc::channel();
        let remote = table.clone();
        thread::spawn(move || {
            let again = remote.add_gc_info_type_id(TypeId::of::<u16>(), info("ignored"));
            let _ = tx.send(again);
        });
        let again = rx.recv_timeout(Duration::from_millis(500));
        drop(reader);

        assert_eq!(again, Ok(index));
        assert_eq!(table.len(), 1);
    }

    #[test]
    #[should_panic(expected = "GCInfoTable memory exhausted")]
    fn exhausting_the_table_panics() {
        let table = GCInfoTable::new();
        for _ in GCInfoTable::MIN_INDEX..GCInfoTable::MAX_INDEX {
            table.add_gc_info(info("filler"));
        }
        assert_eq!(table.len(), (GCInfoTable::MAX_INDEX - 1) as usize);
        table.add_gc_info(info("one too many"));
    }

    #[test]
    #[should_panic(expected = "No GCInfo registered")]
    fn get_unknown_index_panics() {
        GCInfoTable::new().get_gc_info(GCInfoIndex(7));
    }
}
