pub mod health;
pub mod retention;

pub use health::health_check;
pub use retention::run_retention;
