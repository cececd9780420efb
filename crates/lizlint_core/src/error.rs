//! Error types for lizlint.

use thiserror::Error;

/// Errors that can occur while configuring or running a scan.
#[derive(Debug, Error)]
pub enum LizlintError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The scanner executable could not be launched.
    #[error("Failed to run {executable}: {source}")]
    Spawn {
        executable: String,
        #[source]
        source: std::io::Error,
    },

    /// The scanner was terminated before it reported an exit status.
    #[error("{executable} was terminated by a signal")]
    Terminated { executable: String },
}

impl LizlintError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_message() {
        let err = LizlintError::config("bad ccn");
        assert_eq!(err.to_string(), "Configuration error: bad ccn");
    }

    #[test]
    fn test_spawn_error_names_executable() {
        let err = LizlintError::Spawn {
            executable: "lizard".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().starts_with("Failed to run lizard"));
    }
}
