pub mod cli;
pub mod config;
pub mod errors;
pub mod kubernetes;
pub mod output;
pub mod pipeline;
pub mod types;

pub use config::LogsConfig;
pub use errors::{AppError, AppResult};
pub use pipeline::{Progress, collect_logs, run_logs};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
