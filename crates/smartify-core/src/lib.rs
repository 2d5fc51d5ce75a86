pub mod config;
pub mod error;
pub mod types;

pub use config::SmartifyConfig;
pub use error::{Result, SmartifyError};
pub use types::{Country, Query, DEFAULT_KEYWORD};
