#![allow(dead_code)]

mod mock_log_store;

pub use mock_log_store::MockLogStore;
