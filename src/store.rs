use ahash::AHashMap;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::object::CacheObject;
use crate::request::ObjId;

/// Backing store for all live [`CacheObject`]s.
///
/// Objects live in a dense slot vector so that uniform random sampling is a
/// single array index; `index` maps an object id to its current slot.
/// Removal swap-removes the slot and patches the index of the displaced
/// object, keeping every operation O(1).
///
/// The store is the exclusive owner of all object records.  Policies and the
/// session's candidate memo refer to objects by id only, so a stale handle
/// degrades to a failed lookup rather than dangling.
pub struct ObjectStore {
    slots: Vec<CacheObject>,
    index: AHashMap<ObjId, usize>,
    rng: SmallRng,
}

impl ObjectStore {
    /// Creates a store whose index is pre-sized from a hash-power hint
    /// (`2^hashpower` slots).  Sampling-based policies request a smaller
    /// index than list-based ones; the builder applies the bound policy's
    /// hint before calling this.
    ///
    /// `seed` fixes the sampling RNG for reproducible simulation runs; with
    /// `None` the RNG is seeded from OS entropy.
    pub fn new(hashpower: u8, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => SmallRng::seed_from_u64(s),
            None => SmallRng::from_os_rng(),
        };
        ObjectStore {
            slots: Vec::new(),
            index: AHashMap::with_capacity(1usize << hashpower),
            rng,
        }
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    pub fn find(&self, id: ObjId) -> Option<&CacheObject> {
        self.index.get(&id).map(|&i| &self.slots[i])
    }

    pub fn find_mut(&mut self, id: ObjId) -> Option<&mut CacheObject> {
        let i = *self.index.get(&id)?;
        Some(&mut self.slots[i])
    }

    pub fn contains(&self, id: ObjId) -> bool {
        self.index.contains_key(&id)
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Adds `obj` to the store.  The id must not already be present.
    pub fn insert(&mut self, obj: CacheObject) {
        debug_assert!(!self.contains(obj.id), "duplicate insert of {}", obj.id);
        self.index.insert(obj.id, self.slots.len());
        self.slots.push(obj);
    }

    /// Detaches and returns the object for `id`, or `None` if absent.
    pub fn remove(&mut self, id: ObjId) -> Option<CacheObject> {
        let i = self.index.remove(&id)?;
        let obj = self.slots.swap_remove(i);
        // swap_remove moved the former last slot into position i.
        if i < self.slots.len() {
            self.index.insert(self.slots[i].id, i);
        }
        Some(obj)
    }

    // -----------------------------------------------------------------------
    // Sampling
    // -----------------------------------------------------------------------

    /// Returns one live object, uniformly at random.  Sampling is with
    /// replacement across calls.
    ///
    /// # Panics
    /// Panics if the store is empty.
    pub fn sample_random_live(&mut self) -> &CacheObject {
        assert!(!self.slots.is_empty(), "sampling from an empty store");
        let i = self.rng.random_range(0..self.slots.len());
        &self.slots[i]
    }

    // -----------------------------------------------------------------------
    // Introspection
    // -----------------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterates over all live objects, in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &CacheObject> {
        self.slots.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ObjectStore {
        ObjectStore::new(12, Some(42))
    }

    #[test]
    fn insert_find_remove_roundtrip() {
        let mut s = store();
        s.insert(CacheObject::new(7, 100));
        assert_eq!(s.find(7).map(|o| o.size), Some(100));
        assert_eq!(s.remove(7).map(|o| o.id), Some(7));
        assert!(s.find(7).is_none());
        assert!(s.is_empty());
    }

    #[test]
    fn remove_absent_returns_none() {
        let mut s = store();
        assert!(s.remove(99).is_none());
    }

    #[test]
    fn swap_remove_keeps_the_index_consistent() {
        let mut s = store();
        for id in 0..10u64 {
            s.insert(CacheObject::new(id, id + 1));
        }
        // Removing from the middle displaces the last slot.
        s.remove(3);
        assert_eq!(s.len(), 9);
        for id in (0..10u64).filter(|&id| id != 3) {
            assert_eq!(s.find(id).map(|o| o.id), Some(id), "id {id} lost");
        }
    }

    #[test]
    fn sampling_returns_only_live_objects() {
        let mut s = store();
        for id in 0..5u64 {
            s.insert(CacheObject::new(id, 1));
        }
        s.remove(2);
        for _ in 0..200 {
            let id = s.sample_random_live().id;
            assert!(id != 2 && id < 5, "sampled dead or unknown id {id}");
        }
    }

    #[test]
    fn sampling_is_reproducible_under_a_fixed_seed() {
        let mut a = ObjectStore::new(12, Some(7));
        let mut b = ObjectStore::new(12, Some(7));
        for id in 0..100u64 {
            a.insert(CacheObject::new(id, 1));
            b.insert(CacheObject::new(id, 1));
        }
        for _ in 0..50 {
            assert_eq!(a.sample_random_live().id, b.sample_random_live().id);
        }
    }

    #[test]
    #[should_panic(expected = "empty store")]
    fn sampling_an_empty_store_panics() {
        let mut s = store();
        s.sample_random_live();
    }
}
