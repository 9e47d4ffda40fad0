use log::warn;

use crate::metrics::{Metrics, StatsCounter};
use crate::object::CacheObject;
use crate::policy::EvictionPolicy;
use crate::request::{LogicalTime, ObjId, Request};
use crate::store::ObjectStore;

// ---------------------------------------------------------------------------
// Eviction candidate memo
// ---------------------------------------------------------------------------

/// Weak reference to the last computed victim: its identity plus the logical
/// time (generation stamp) at which it was selected.
///
/// Victim selection is randomized, so it is not free to redo; when a caller
/// peeks at the candidate and then evicts within the same request, the memo
/// lets `evict` skip the second sampling pass.  The memo must be revalidated
/// before use — both by stamp and by liveness — because the referenced object
/// may have been removed between selection and eviction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct EvictionCandidate {
    id: ObjId,
    selected_at: LogicalTime,
}

// ---------------------------------------------------------------------------
// CacheSession
// ---------------------------------------------------------------------------

/// The generic simulation engine: one instance per simulated cache
/// configuration.
///
/// The session owns the object store and all aggregate accounting, and
/// dispatches each request through the lifecycle primitives (`find`,
/// `insert`, `evict`, `remove`) plus the composite [`get`](Self::get).  All
/// selection logic is delegated to the bound [`EvictionPolicy`]; the policy
/// in turn never touches the aggregate counters.
///
/// # Example
/// ```
/// use simcache::{Request, SessionBuilder};
///
/// let mut session = SessionBuilder::new(100).seed(7).build();
/// assert!(!session.get(&Request::new(1, 40))); // cold miss
/// assert!(session.get(&Request::new(1, 40))); // hit
/// ```
pub struct CacheSession {
    store: ObjectStore,
    policy: Box<dyn EvictionPolicy>,
    capacity: u64,
    /// Advances by exactly one per processed request, hit or miss.
    logical_time: LogicalTime,
    occupied_size: u64,
    metadata_accounting: bool,
    retain_latest_size: bool,
    candidate: Option<EvictionCandidate>,
    stats: StatsCounter,
}

impl CacheSession {
    pub(crate) fn new(
        capacity: u64,
        hashpower: u8,
        seed: Option<u64>,
        metadata_accounting: bool,
        retain_latest_size: bool,
        policy: Box<dyn EvictionPolicy>,
    ) -> Self {
        let hashpower = policy.hashpower_hint(hashpower);
        CacheSession {
            store: ObjectStore::new(hashpower, seed),
            policy,
            capacity,
            logical_time: 0,
            occupied_size: 0,
            metadata_accounting,
            retain_latest_size,
            candidate: None,
            stats: StatsCounter::new(),
        }
    }

    /// Per-object metadata charge, as configured at build time.
    #[inline]
    fn md_size(&self) -> u64 {
        if self.metadata_accounting {
            self.policy.obj_metadata_size()
        } else {
            0
        }
    }

    // -----------------------------------------------------------------------
    // Composite entry point: get
    // -----------------------------------------------------------------------

    /// Processes one request.  Returns `true` on a hit.
    ///
    /// On a miss the session evicts until there is room for the object, then
    /// inserts it — unless the object cannot fit in the cache at all, in
    /// which case the miss is recorded and nothing is inserted.  The logical
    /// clock advances by one either way.
    pub fn get(&mut self, req: &Request) -> bool {
        let hit = self.process(req);
        self.logical_time += 1;
        hit
    }

    fn process(&mut self, req: &Request) -> bool {
        if self.find(req, true).is_some() {
            self.stats.record_hit();
            return true;
        }
        self.stats.record_miss();

        let charged = req.size + self.md_size();
        if charged > self.capacity {
            warn!(
                "object {} (size {}) cannot fit in a {}-byte cache, not inserted",
                req.id, req.size, self.capacity
            );
            return false;
        }

        while self.occupied_size + charged > self.capacity {
            self.evict();
        }
        self.insert(req);
        false
    }

    // -----------------------------------------------------------------------
    // Lifecycle primitives
    // -----------------------------------------------------------------------

    /// Pure lookup.  With `update` set and the object present, the bound
    /// policy records the access in the object's metadata — this is the only
    /// metadata mutation point on a hit — and, if the session retains the
    /// latest observed size, the object's size and the occupancy accounting
    /// are refreshed from the request.
    pub fn find(&mut self, req: &Request, update: bool) -> Option<&CacheObject> {
        let now = self.logical_time;
        let retain = self.retain_latest_size;
        let obj = self.store.find_mut(req.id)?;
        if update {
            self.policy.on_hit(obj, now);
            if retain && obj.size != req.size {
                self.occupied_size = self.occupied_size - obj.size + req.size;
                obj.size = req.size;
            }
        }
        Some(obj)
    }

    /// Creates and stores the object for `req`, seeding its policy metadata.
    ///
    /// Capacity enforcement is the caller's responsibility ([`get`](Self::get)
    /// evicts first); the object must not already be present.
    pub fn insert(&mut self, req: &Request) -> ObjId {
        debug_assert!(
            !self.store.contains(req.id),
            "insert of already-present object {}",
            req.id
        );
        let now = self.logical_time;
        let mut obj = CacheObject::new(req.id, req.size);
        self.policy.on_insert(&mut obj, now);
        self.occupied_size += req.size + self.md_size();
        self.store.insert(obj);
        req.id
    }

    /// Asks the bound policy for an eviction candidate and memoizes it
    /// together with the current logical time.  The object is **not**
    /// removed; an immediately following [`evict`](Self::evict) at the same
    /// logical time reuses the memo instead of sampling again.
    ///
    /// # Panics
    /// Panics if the store is empty, or if the policy produces no candidate
    /// while objects exist (both are invariant violations).
    pub fn eviction_candidate(&mut self) -> ObjId {
        assert!(
            !self.store.is_empty(),
            "eviction candidate requested from an empty store"
        );
        let now = self.logical_time;
        let Some(id) = self.policy.select_victim(&mut self.store, now) else {
            panic!(
                "policy {} found no eviction candidate with {} objects live",
                self.policy.name(),
                self.store.len()
            );
        };
        self.candidate = Some(EvictionCandidate {
            id,
            selected_at: now,
        });
        id
    }

    /// Evicts one object, selected by the bound policy.
    ///
    /// A memoized candidate is reused only if it was selected at the current
    /// logical time **and** still refers to a live object; otherwise the
    /// selection is recomputed.  The memo is consumed either way.
    ///
    /// # Panics
    /// Panics if the store is empty.
    pub fn evict(&mut self) {
        assert!(!self.store.is_empty(), "evict called on an empty store");
        let id = match self.candidate.take() {
            Some(c) if c.selected_at == self.logical_time && self.store.contains(c.id) => c.id,
            _ => self.eviction_candidate(),
        };
        self.candidate = None;

        let obj = match self.store.remove(id) {
            Some(obj) => obj,
            None => panic!("eviction candidate {id} vanished from the store"),
        };
        self.occupied_size -= obj.size + self.md_size();
        self.policy.on_evict(&obj);
        self.stats.record_eviction(1);
    }

    /// Out-of-band removal, distinct from eviction: returns `false` without
    /// side effects if `id` is unknown, otherwise detaches the object through
    /// the same aggregate-updating path eviction uses.  Not counted as an
    /// eviction in the statistics.
    pub fn remove(&mut self, id: ObjId) -> bool {
        let Some(obj) = self.store.remove(id) else {
            return false;
        };
        self.occupied_size -= obj.size + self.md_size();
        self.policy.on_remove(&obj);
        true
    }

    // -----------------------------------------------------------------------
    // Introspection
    // -----------------------------------------------------------------------

    pub fn contains(&self, id: ObjId) -> bool {
        self.store.contains(id)
    }

    /// Number of live objects.
    pub fn object_count(&self) -> usize {
        self.store.len()
    }

    /// Total bytes currently charged against capacity (object sizes plus any
    /// simulated metadata overhead).
    pub fn occupied_size(&self) -> u64 {
        self.occupied_size
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    pub fn logical_time(&self) -> LogicalTime {
        self.logical_time
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// Iterates over all live objects, in unspecified order.
    pub fn objects(&self) -> impl Iterator<Item = &CacheObject> {
        self.store.iter()
    }

    pub fn stats(&self) -> Metrics {
        self.stats.snapshot()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::SessionBuilder;

    fn session(capacity: u64) -> CacheSession {
        SessionBuilder::new(capacity).seed(0xC0FFEE).build()
    }

    #[test]
    fn clock_advances_once_per_request_hit_or_miss() {
        let mut s = session(100);
        s.get(&Request::new(1, 10)); // miss
        s.get(&Request::new(1, 10)); // hit
        s.get(&Request::new(2, 10)); // miss
        assert_eq!(s.logical_time(), 3);
    }

    #[test]
    fn oversized_object_is_a_miss_and_not_inserted() {
        let mut s = session(10);
        assert!(!s.get(&Request::new(1, 20)));
        assert_eq!(s.object_count(), 0);
        assert_eq!(s.occupied_size(), 0);
        assert_eq!(s.logical_time(), 1);
    }

    #[test]
    #[should_panic(expected = "empty store")]
    fn evict_on_an_empty_store_panics() {
        let mut s = session(100);
        s.evict();
    }

    #[test]
    fn stale_memo_is_discarded_after_the_clock_advances() {
        let mut s = session(100);
        s.get(&Request::new(1, 10));
        s.get(&Request::new(2, 10));
        let candidate = s.eviction_candidate();
        // An intervening request advances the clock; the memo must not be
        // trusted afterwards, but evicting must still succeed.
        s.get(&Request::new(3, 10));
        s.evict();
        assert_eq!(s.object_count(), 2);
        let _ = candidate;
    }

    #[test]
    fn memo_of_a_removed_object_is_not_reused() {
        let mut s = session(100);
        s.get(&Request::new(1, 10));
        s.get(&Request::new(2, 10));
        let candidate = s.eviction_candidate();
        assert!(s.remove(candidate));
        // Same logical time, but the memoized object is gone: evict must
        // recompute and take the survivor rather than panic.
        s.evict();
        assert_eq!(s.object_count(), 0);
    }

    #[test]
    fn metadata_accounting_charges_the_policy_overhead() {
        let mut s = SessionBuilder::new(1_000)
            .seed(1)
            .metadata_accounting(true)
            .build();
        s.get(&Request::new(1, 100));
        // WATT charges 16 bytes of simulated metadata per object.
        assert_eq!(s.occupied_size(), 116);
        s.remove(1);
        assert_eq!(s.occupied_size(), 0);
    }

    #[test]
    fn retained_size_updates_occupancy_on_hit() {
        let mut s = SessionBuilder::new(1_000)
            .seed(1)
            .retain_latest_size(true)
            .build();
        s.get(&Request::new(1, 100));
        s.get(&Request::new(1, 40)); // same object, smaller size observed
        assert_eq!(s.occupied_size(), 40);
        assert_eq!(s.object_count(), 1);
    }

    #[test]
    fn first_size_wins_by_default() {
        let mut s = session(1_000);
        s.get(&Request::new(1, 100));
        s.get(&Request::new(1, 40));
        assert_eq!(s.occupied_size(), 100);
    }
}
