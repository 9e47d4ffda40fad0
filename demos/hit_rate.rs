//! Hit-rate comparison: WATT (several sample sizes) vs Random.
//!
//! Replays the same Zipf(s=1.0) access trace — the standard academic
//! benchmark for eviction policies — against each configuration so the
//! comparison is perfectly fair.
//!
//! Run with:
//!     cargo run --example hit_rate --release

use simcache::policy::{EvictionPolicy, RandomPolicy, WattPolicy};
use simcache::{Request, SessionBuilder};
use std::time::{Duration, Instant};

/// Object size in bytes.  Unit-sized objects make capacity = entry count.
const OBJ_SIZE: u64 = 1;
/// Cache capacity in objects.
const CAP: usize = 10_000;
/// Key universe size.  CAP is 10 % of POOL → moderately hard workload.
const POOL: usize = 100_000;
/// Number of accesses in the trace.
const TRACE: usize = 500_000;
/// RNG seed shared by every run.
const SEED: u64 = 0xDEAD_BEEF_1234_5678;

// ---------------------------------------------------------------------------
// Zipf(s=1.0) sampler — no external dependency required.
//
// Inverse-CDF derivation:
//   P(X ≤ k) ≈ ln(k) / ln(N)   for large N
//   ⟹  k = N^u  where u ~ Uniform[0,1]
//
// This gives P(X = k) ∝ 1/k, the classic rank-frequency law.
// ---------------------------------------------------------------------------

struct Xorshift64(u64);

impl Xorshift64 {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }

    /// Returns a uniform float in (0, 1].
    fn uniform(&mut self) -> f64 {
        // Use upper 53 bits for a full-precision f64 mantissa.
        let bits = self.next() >> 11;
        (bits + 1) as f64 / (1u64 << 53) as f64
    }

    /// Zipf(s=1) sample in [0, pool).
    fn zipf(&mut self, pool: usize) -> usize {
        let u = self.uniform();
        let k = (pool as f64).powf(u) as usize;
        k.saturating_sub(1).min(pool - 1)
    }
}

fn generate_trace(seed: u64, pool: usize, len: usize) -> Vec<u64> {
    let mut rng = Xorshift64(seed);
    (0..len).map(|_| rng.zipf(pool) as u64).collect()
}

// ---------------------------------------------------------------------------
// Replay
// ---------------------------------------------------------------------------

fn replay(trace: &[u64], policy: Box<dyn EvictionPolicy>) -> (u64, Duration) {
    let mut session = SessionBuilder::new(CAP as u64 * OBJ_SIZE)
        .seed(SEED)
        .policy(policy)
        .build();
    let start = Instant::now();
    for &id in trace {
        session.get(&Request::new(id, OBJ_SIZE));
    }
    (session.stats().hits, start.elapsed())
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    println!("Eviction policy hit-rate comparison");
    println!();
    println!("  Distribution : Zipf(s = 1.0)");
    println!("  Key universe : {POOL:>10} unique keys");
    println!(
        "  Capacity     : {CAP:>10} objects  ({:.0}% of universe)",
        CAP as f64 / POOL as f64 * 100.0
    );
    println!("  Trace length : {TRACE:>10} accesses");
    println!();
    println!("Generating trace…");
    let trace = generate_trace(SEED, POOL, TRACE);

    println!("Replaying (cold-start, no warm-up phase)…");
    println!();

    let col_policy = 18usize;
    let col_hits = 10usize;
    let col_rate = 10usize;
    let col_time = 12usize;

    println!(
        "{:<col_policy$} {:>col_hits$} {:>col_rate$} {:>col_time$}",
        "Policy", "Hits", "Hit Rate", "Time (ms)"
    );
    println!("{}", "─".repeat(col_policy + col_hits + col_rate + col_time + 3));

    let print_row = |name: &str, hits: u64, elapsed: Duration| {
        println!(
            "{:<col_policy$} {:>col_hits$} {:>9.2}% {:>col_time$.1}",
            name,
            hits,
            hits as f64 / TRACE as f64 * 100.0,
            elapsed.as_millis(),
        );
    };

    for n_sample in [8usize, 64, 128] {
        let (hits, elapsed) = replay(&trace, Box::new(WattPolicy::new(n_sample)));
        print_row(&format!("WATT n-sample={n_sample}"), hits, elapsed);
    }

    let (hits, elapsed) = replay(&trace, Box::new(RandomPolicy));
    print_row("Random", hits, elapsed);

    println!();
    println!("Notes:");
    println!("  • Hit rate is measured in 'online' mode: the cache starts cold");
    println!("    and misses insert the object before the next access.");
    println!("  • Larger sample sizes approximate full-population minimum");
    println!("    search more closely, at linear extra cost per eviction.");
}
