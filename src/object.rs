use crate::request::{LogicalTime, ObjId};

/// Number of access timestamps tracked per object.
pub const HISTORY_LEN: usize = 8;

/// How far in the past the non-primary slots are seeded at insertion.
///
/// Large enough that, immediately after insertion, the seed slots contribute
/// negligible score mass — the object's score is dominated by its single real
/// access without needing a separate valid-slot counter.
const SEED_AGE: LogicalTime = 3_000_000;

// ---------------------------------------------------------------------------
// AccessHistory
// ---------------------------------------------------------------------------

/// Fixed ring buffer of the most recent access timestamps.
///
/// `slots[last_pos]` is always the most recent recorded access.  Older
/// accesses are silently overwritten once the ring wraps; the scoring
/// policies only need a short recency window, not full history.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccessHistory {
    slots: [LogicalTime; HISTORY_LEN],
    /// Index of the most recently written slot (0..HISTORY_LEN).
    last_pos: usize,
}

impl AccessHistory {
    /// Seeds a fresh history at insertion time `now`.
    ///
    /// The insertion acts as the first access (`slots[0] = now`); every other
    /// slot is back-dated by [`SEED_AGE`] so it reads as very old.
    pub fn seeded(now: LogicalTime) -> Self {
        let mut slots = [now - SEED_AGE; HISTORY_LEN];
        slots[0] = now;
        AccessHistory { slots, last_pos: 0 }
    }

    /// Records an access at `now`, overwriting the oldest slot.
    pub fn record(&mut self, now: LogicalTime) {
        self.last_pos = (self.last_pos + 1) % HISTORY_LEN;
        self.slots[self.last_pos] = now;
    }

    /// The most recent recorded access time.
    #[inline]
    pub fn last(&self) -> LogicalTime {
        self.slots[self.last_pos]
    }

    /// The access `offset` steps back from the most recent one, in circular
    /// order.  `nth_recent(0) == last()`.
    #[inline]
    pub fn nth_recent(&self, offset: usize) -> LogicalTime {
        debug_assert!(offset < HISTORY_LEN);
        self.slots[(self.last_pos + HISTORY_LEN - offset) % HISTORY_LEN]
    }
}

// ---------------------------------------------------------------------------
// CacheObject
// ---------------------------------------------------------------------------

/// Per-object record, created on insertion and destroyed on eviction or
/// removal.  The bound policy is the only mutator of `history`; the session
/// owns `size` for capacity accounting.
#[derive(Clone, Copy, Debug)]
pub struct CacheObject {
    pub id: ObjId,
    /// Byte size.  May be refreshed on a hit when the session is configured
    /// to retain the latest observed size.
    pub size: u64,
    pub history: AccessHistory,
}

impl CacheObject {
    /// Creates a record with an unseeded history.  The policy's insert hook
    /// runs before the object becomes visible in the store, so the history is
    /// never read in this state.
    pub fn new(id: ObjId, size: u64) -> Self {
        CacheObject {
            id,
            size,
            history: AccessHistory::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
