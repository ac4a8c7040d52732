pub mod errors;

pub use errors::ConfigError;

pub type Result<T> = std::result::Result<T, ConfigError>;
