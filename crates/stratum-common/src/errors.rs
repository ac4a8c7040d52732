use std::fmt::Display;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The mandatory base source is absent, unreadable, or not valid TOML.
    #[error("required config source {} could not be loaded: {reason}", path.display())]
    RequiredSource { path: PathBuf, reason: String },

    #[error("could not resolve working directory: {0}")]
    WorkingDirectory(#[source] std::io::Error),

    #[error("config decode error: {0}")]
    DecodeError(String),

    #[error("config watch error: {0}")]
    WatchError(String),
}

impl serde::de::Error for ConfigError {
    fn custom<T: Display>(msg: T) -> Self {
        ConfigError::DecodeError(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::Error as _;

    #[test]
    fn config_error_display() {
        let err = ConfigError::RequiredSource {
            path: PathBuf::from("/etc/app/config/default.toml"),
            reason: "file not found".into(),
        };
        assert_eq!(
            err.to_string(),
            "required config source /etc/app/config/default.toml could not be loaded: file not found"
        );

        let err = ConfigError::DecodeError("invalid type: string \"x\", expected u16".into());
        assert_eq!(
            err.to_string(),
            "config decode error: invalid type: string \"x\", expected u16"
        );

        let err = ConfigError::WatchError("inotify limit reached".into());
        assert_eq!(err.to_string(), "config watch error: inotify limit reached");
    }

    #[test]
    fn working_directory_error_keeps_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "cwd removed");
        let err = ConfigError::WorkingDirectory(io_err);
        assert!(err.to_string().contains("cwd removed"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn serde_custom_maps_to_decode_error() {
        let err = ConfigError::custom("missing field `port`");
        assert!(matches!(err, ConfigError::DecodeError(ref m) if m == "missing field `port`"));
    }
}
