/// Object identifier, stable for the object's lifetime in the store.
pub type ObjId = u64;

/// Logical time: the session's monotonic request counter.
///
/// This is the time base for all recency arithmetic — wall-clock time never
/// enters the simulation.  Signed, because policies may seed per-object
/// timestamps far in the "past" relative to time zero.
pub type LogicalTime = i64;

/// A single trace request, immutable once issued.
///
/// The logical arrival time is not carried in the request itself: the replay
/// loop issues requests in order and the session's clock supplies the
/// timestamp at processing time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Request {
    pub id: ObjId,
    /// Object size in bytes, as observed by this request.
    pub size: u64,
}

impl Request {
    pub fn new(id: ObjId, size: u64) -> Self {
        Request { id, size }
    }
}
