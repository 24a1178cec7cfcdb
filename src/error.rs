//! Error types and handling infrastructure for aimlink.
//!
//! Library code returns [`AimlinkError`] through the crate-wide [`Result`] alias.
//! The binary wraps these in `anyhow` for context on the way out.
//!
//! Only one error is part of the remapping contract itself: a rejected sensitivity
//! update ([`AimlinkError::InvalidConfig`]). Everything else here belongs to the
//! surrounding plumbing (config files, event scripts).

use thiserror::Error;

/// The main error type for aimlink operations.
#[derive(Error, Debug)]
pub enum AimlinkError {
    /// A sensitivity or key-binding update was rejected; the previous value is retained
    #[error("Invalid config: {field} = {value} ({reason})")]
    InvalidConfig {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    /// Malformed line in an event script
    #[error("Script error on line {line}: {message}")]
    ScriptError { line: usize, message: String },

    /// Configuration file could not be parsed or located
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// File system related errors
    #[error("File operation failed: {message}")]
    FileError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic error for cases not covered by specific variants
    #[error("Operation failed: {message}")]
    Other { message: String },
}

/// Standard Result type for aimlink operations.
pub type Result<T> = std::result::Result<T, AimlinkError>;

impl AimlinkError {
    /// Create an InvalidConfig error for a named field
    pub fn invalid_config(field: &'static str, value: impl ToString, reason: &'static str) -> Self {
        Self::InvalidConfig {
            field,
            value: value.to_string(),
            reason,
        }
    }

    /// Create a ScriptError pointing at a 1-based line number
    pub fn script(line: usize, message: impl Into<String>) -> Self {
        Self::ScriptError {
            line,
            message: message.into(),
        }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a FileError from an io::Error; `message` should name the path involved
    pub fn file_error(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileError {
            message: message.into(),
            source,
        }
    }

    /// Create a generic Other error with a descriptive message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// True for errors that leave the previous configuration in place
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let invalid = AimlinkError::invalid_config("baseXYSensitivity", 0.0, "must be > 0");
        assert_eq!(
            invalid.to_string(),
            "Invalid config: baseXYSensitivity = 0 (must be > 0)"
        );

        let script = AimlinkError::script(3, "unknown command `jump`");
        assert_eq!(
            script.to_string(),
            "Script error on line 3: unknown command `jump`"
        );
    }

    #[test]
    fn test_error_constructors() {
        assert!(AimlinkError::invalid_config("x", 1, "r").is_invalid_config());
        assert!(!AimlinkError::config("bad toml").is_invalid_config());
        assert!(matches!(
            AimlinkError::other("boom"),
            AimlinkError::Other { .. }
        ));
    }
}
