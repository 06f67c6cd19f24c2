pub mod config;
pub mod error;
pub mod types;

pub use config::RulesConfig;
pub use error::{DamageError, Result};
pub use types::LocationId;
