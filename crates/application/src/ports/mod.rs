mod clock;
mod log_store;

pub use clock::{Clock, SystemClock};
pub use log_store::{LogBatchTransaction, LogStore, LogStoreConnection};
