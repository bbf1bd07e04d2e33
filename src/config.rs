pub mod config;
pub use config::{init_tracing, AppConfig, AppContext};
