use log::debug;

use super::params::{parse_positive, split_pairs};
use super::EvictionPolicy;
use crate::error::ConfigError;
use crate::object::{AccessHistory, CacheObject, HISTORY_LEN};
use crate::request::{LogicalTime, ObjId};
use crate::store::ObjectStore;

/// Number of candidates drawn per victim selection, unless configured.
const DEFAULT_SAMPLE_SIZE: usize = 64;

/// Scoring weight of the most recent access slot.
const RECENT_WEIGHT: f64 = 0.2;

/// Hash-power reduction applied to the store sizing hint, and its floor.
/// Victim sampling depends on fast random access rather than short collision
/// chains, so a smaller index table sustains the workload at lower memory
/// cost.
const HASHPOWER_SHRINK: u8 = 8;
const MIN_HASHPOWER: u8 = 12;

/// Simulated per-object metadata charge: a frequency word plus an age word.
const OBJ_METADATA_SIZE: u64 = 8 + 8;

// ---------------------------------------------------------------------------
// WATT policy
// ---------------------------------------------------------------------------

/// Sampling-based approximate-recency eviction ("WATT").
///
/// ## Algorithm
///
/// Each object carries a ring buffer of its 8 most recent access times.  On
/// a miss that requires space, the policy draws `sample_size` live objects
/// uniformly at random (with replacement) and computes a heat score for each:
///
/// ```text
/// score = max over offset in 0..8 of  weight(offset) / (now - access[offset])
///   weight(0) = 0.2          (most recent access)
///   weight(i) = i + 1        (older slots weigh more)
/// ```
///
/// An object accessed repeatedly across several tracked slots has a short
/// inter-access gap for some high-weight offset and therefore scores high;
/// an object with only isolated, stale accesses scores low regardless of the
/// recency weight.  The sampled object with the **minimum** score is the
/// victim — "coldest of N random samples", a constant-cost approximation to
/// full-population minimum search.  The same object may be drawn more than
/// once per selection; that is an accepted approximation cost.
///
/// An access recorded at the current instant makes a divisor zero; such a
/// term scores [`f64::INFINITY`] ("never evict what was touched this tick")
/// rather than dividing by zero.
pub struct WattPolicy {
    sample_size: usize,
}

impl Default for WattPolicy {
    fn default() -> Self {
        WattPolicy {
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }
}

impl WattPolicy {
    pub fn new(sample_size: usize) -> Self {
        assert!(sample_size > 0, "sample_size must be greater than 0");
        WattPolicy { sample_size }
    }

    /// Builds a policy from a `key=value[,key=value...]` configuration
    /// string.  Recognized keys (case-insensitive):
    ///
    /// - `n-sample` — positive integer, candidates drawn per selection;
    /// - `print` — diagnostic only: prints the resolved configuration and
    ///   terminates the process.
    ///
    /// Unknown keys and malformed values are fatal [`ConfigError`]s.
    pub fn from_params(config: &str) -> Result<Self, ConfigError> {
        let mut policy = WattPolicy::default();

        for (key, value) in split_pairs(config) {
            if key.eq_ignore_ascii_case("n-sample") {
                policy.sample_size = parse_positive(key, value)?;
            } else if key.eq_ignore_ascii_case("print") {
                println!("{} parameters: {}", policy.name(), policy.format_params());
                std::process::exit(0);
            } else {
                return Err(ConfigError::UnknownKey {
                    policy: policy.name(),
                    key: key.to_owned(),
                    supported: "n-sample, print",
                });
            }
        }

        Ok(policy)
    }

    /// The resolved configuration, formatted in the same `key=value` syntax
    /// the parser accepts.
    pub fn format_params(&self) -> String {
        format!("n-sample={}", self.sample_size)
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// Heat score of one object at logical time `now`.
    fn score(history: &AccessHistory, now: LogicalTime) -> f64 {
        let mut best = Self::term(RECENT_WEIGHT, now - history.nth_recent(0));
        for offset in 1..HISTORY_LEN {
            let value = Self::term((offset + 1) as f64, now - history.nth_recent(offset));
            if value > best {
                best = value;
            }
        }
        best
    }

    #[inline]
    fn term(weight: f64, age: LogicalTime) -> f64 {
        if age <= 0 {
            // Accessed at (or seeded beyond) the current instant: maximal
            // heat, never a victim.
            f64::INFINITY
        } else {
            weight / age as f64
        }
    }
}

impl EvictionPolicy for WattPolicy {
    fn name(&self) -> &'static str {
        "WATT"
    }

    fn obj_metadata_size(&self) -> u64 {
        OBJ_METADATA_SIZE
    }

    fn hashpower_hint(&self, requested: u8) -> u8 {
        requested.saturating_sub(HASHPOWER_SHRINK).max(MIN_HASHPOWER)
    }

    fn on_hit(&mut self, obj: &mut CacheObject, now: LogicalTime) {
        obj.history.record(now);
    }

    fn on_insert(&mut self, obj: &mut CacheObject, now: LogicalTime) {
        obj.history = AccessHistory::seeded(now);
    }

    fn select_victim(&mut self, store: &mut ObjectStore, now: LogicalTime) -> Option<ObjId> {
        if store.is_empty() {
            return None;
        }

        let mut victim: Option<ObjId> = None;
        let mut victim_score = f64::INFINITY;
        for _ in 0..self.sample_size {
            let sampled = store.sample_random_live();
            let score = Self::score(&sampled.history, now);
            // Strictly-less keeps the first minimum encountered; the first
            // draw seeds the running best so selection returns a live object
            // even when every sampled score is infinite.
            if victim.is_none() || score < victim_score {
                victim = Some(sampled.id);
                victim_score = score;
            }
        }

        debug!(
            "WATT victim {:?} score {victim_score:e} at t={now}",
            victim
        );
        victim
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
