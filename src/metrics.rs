/// Counters updated on every session operation.
///
/// Plain integers: the session is `&mut`-driven and strictly sequential, so
/// no atomicity is needed.
#[derive(Default)]
pub struct StatsCounter {
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl StatsCounter {
    pub fn new() -> Self {
        StatsCounter::default()
    }

    #[inline]
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    #[inline]
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    #[inline]
    pub fn record_eviction(&mut self, count: u64) {
        self.evictions += count;
    }

    /// Returns a point-in-time snapshot of the statistics.
    pub fn snapshot(&self) -> Metrics {
        let total = self.hits + self.misses;
        let hit_rate = if total == 0 {
            0.0_f64
        } else {
            self.hits as f64 / total as f64
        };
        Metrics {
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            hit_rate,
        }
    }
}

/// A point-in-time snapshot of session statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    /// Number of cache hits (object found).
    pub hits: u64,
    /// Number of cache misses (object absent).
    pub misses: u64,
    /// Number of objects evicted for capacity.  Out-of-band removals are
    /// not counted here.
    pub evictions: u64,
    /// `hits / (hits + misses)`, or `0.0` if no requests have been made.
    pub hit_rate: f64,
}

impl Metrics {
    pub fn request_count(&self) -> u64 {
        self.hits + self.misses
    }
}
