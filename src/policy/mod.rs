pub mod params;
pub mod random;
pub mod watt;

pub use random::RandomPolicy;
pub use watt::WattPolicy;

use crate::object::CacheObject;
use crate::request::{LogicalTime, ObjId};
use crate::store::ObjectStore;

/// Eviction policy plugin contract.
///
/// All methods are called **single-threadedly** by the session, one request
/// at a time.  Policies mutate the per-object metadata they are handed and
/// draw samples through the store's sampling API, but never restructure the
/// store — insertion, deletion, and aggregate accounting belong to the
/// session.
pub trait EvictionPolicy: Send {
    /// Human-readable policy name, used in diagnostics.
    fn name(&self) -> &'static str;

    /// Simulated per-object metadata size in bytes, charged against capacity
    /// when the session is built with metadata accounting enabled.
    fn obj_metadata_size(&self) -> u64 {
        0
    }

    /// Lets the policy adjust the store's hash-power sizing hint.
    ///
    /// Sampling-based policies trade index size for sampling speed; policies
    /// that never sample keep the session-provided default.
    fn hashpower_hint(&self, requested: u8) -> u8 {
        requested
    }

    /// Called on a cache hit when the lookup requested a metadata update.
    /// This is the only mutation point for per-object metadata on a hit.
    fn on_hit(&mut self, obj: &mut CacheObject, now: LogicalTime);

    /// Seeds a freshly created object's metadata.  Runs before the object
    /// becomes visible in the store.
    fn on_insert(&mut self, obj: &mut CacheObject, now: LogicalTime);

    /// Selects the eviction victim.
    ///
    /// Returns `None` only when the store is empty; with live objects a
    /// policy must always produce a victim (the session treats anything else
    /// as a fatal invariant violation).
    fn select_victim(&mut self, store: &mut ObjectStore, now: LogicalTime) -> Option<ObjId>;

    /// Notification that `obj` was evicted for capacity.
    fn on_evict(&mut self, _obj: &CacheObject) {}

    /// Notification that `obj` was removed out-of-band (not an eviction).
    fn on_remove(&mut self, _obj: &CacheObject) {}
}
