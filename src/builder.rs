use crate::policy::{EvictionPolicy, WattPolicy};
use crate::session::CacheSession;

/// Builder for configuring and constructing a [`CacheSession`].
///
/// # Example
/// ```
/// use simcache::policy::WattPolicy;
/// use simcache::SessionBuilder;
///
/// let session = SessionBuilder::new(1 << 20)
///     .seed(42)
///     .policy(Box::new(WattPolicy::new(32)))
///     .build();
/// assert_eq!(session.policy_name(), "WATT");
/// ```
pub struct SessionBuilder {
    capacity: u64,
    hashpower: u8,
    seed: Option<u64>,
    metadata_accounting: bool,
    retain_latest_size: bool,
    policy: Box<dyn EvictionPolicy>,
}

impl SessionBuilder {
    /// Starts a builder for a cache of `capacity` bytes.
    pub fn new(capacity: u64) -> Self {
        assert!(capacity > 0, "capacity must be greater than 0");
        SessionBuilder {
            capacity,
            hashpower: 20,
            seed: None,
            metadata_accounting: false,
            retain_latest_size: false,
            policy: Box::new(WattPolicy::default()),
        }
    }

    /// Hash-power sizing hint for the store index (`2^n` slots; default 20).
    /// The bound policy may adjust this before the store is built.
    pub fn hashpower(mut self, n: u8) -> Self {
        assert!(n > 0 && n < 48, "hashpower out of range");
        self.hashpower = n;
        self
    }

    /// Fixes the sampling RNG seed so runs are reproducible.  Without a seed
    /// the RNG is seeded from OS entropy.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Charge the policy's simulated per-object metadata size against
    /// capacity (default: off).
    pub fn metadata_accounting(mut self, on: bool) -> Self {
        self.metadata_accounting = on;
        self
    }

    /// On a hit whose request size differs from the stored size, adopt the
    /// latest observed size (default: off — the first observed size wins).
    pub fn retain_latest_size(mut self, on: bool) -> Self {
        self.retain_latest_size = on;
        self
    }

    /// Binds an eviction policy (default: [`WattPolicy`] with its default
    /// sample size).
    pub fn policy(mut self, policy: Box<dyn EvictionPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn build(self) -> CacheSession {
        CacheSession::new(
            self.capacity,
            self.hashpower,
            self.seed,
            self.metadata_accounting,
            self.retain_latest_size,
            self.policy,
        )
    }
}
