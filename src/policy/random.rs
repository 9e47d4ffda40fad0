use super::EvictionPolicy;
use crate::object::CacheObject;
use crate::request::{LogicalTime, ObjId};
use crate::store::ObjectStore;

/// Uniform-random eviction.
///
/// Keeps no per-object metadata and evicts a single uniform draw from the
/// store.  Hot objects are as likely to go as cold ones, which makes this a
/// baseline for judging smarter policies rather than something to deploy.
#[derive(Default)]
pub struct RandomPolicy;

impl EvictionPolicy for RandomPolicy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn on_hit(&mut self, _obj: &mut CacheObject, _now: LogicalTime) {}

    fn on_insert(&mut self, _obj: &mut CacheObject, _now: LogicalTime) {}

    fn select_victim(&mut self, store: &mut ObjectStore, _now: LogicalTime) -> Option<ObjId> {
        if store.is_empty() {
            return None;
        }
        Some(store.sample_random_live().id)
    }
}
