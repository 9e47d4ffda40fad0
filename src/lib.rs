mod builder;
mod error;
mod metrics;
mod object;
mod request;
mod session;
mod store;
pub mod policy;

pub use builder::SessionBuilder;
pub use error::ConfigError;
pub use metrics::Metrics;
pub use object::{AccessHistory, CacheObject, HISTORY_LEN};
pub use request::{LogicalTime, ObjId, Request};
pub use session::CacheSession;
pub use store::ObjectStore;
