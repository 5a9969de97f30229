mod config;
mod error;

pub use config::{ListerConfig, LogFormat, DEFAULT_REGION};
pub use error::{BoxError, ListerError, ListerResult};
