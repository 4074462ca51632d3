//! Crate error type.
//!
//! The simulation itself is total; only the boundaries that touch files or
//! external resource providers can fail, and those recover locally by falling
//! back to defaults.

use std::fmt;
use std::path::PathBuf;

/// Errors raised at the I/O boundary of the game.
#[derive(Debug)]
pub enum Error {
    /// Reading or writing a file failed.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A JSON document could not be parsed or produced.
    Parse {
        /// What was being parsed (e.g. "settings", "tuning").
        what: &'static str,
        source: serde_json::Error,
    },

    /// A document parsed but holds values the game cannot run with.
    Invalid {
        what: &'static str,
        reason: String,
    },

    /// A texture provider could not supply the named texture.
    MissingTexture { name: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io { path, source } => {
                write!(f, "i/o error on '{}': {}", path.display(), source)
            }
            Error::Parse { what, source } => write!(f, "invalid {} json: {}", what, source),
            Error::Invalid { what, reason } => write!(f, "invalid {}: {}", what, reason),
            Error::MissingTexture { name } => write!(f, "texture '{}' is not available", name),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            Error::Parse { source, .. } => Some(source),
            Error::Invalid { .. } | Error::MissingTexture { .. } => None,
        }
    }
}

/// Convenience alias: a `Result` using the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_texture() {
        let err = Error::MissingTexture {
            name: "boss".to_string(),
        };
        assert_eq!(err.to_string(), "texture 'boss' is not available");
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn test_invalid_names_the_reason() {
        let err = Error::Invalid {
            what: "tuning",
            reason: "flappy.gap: min 200 exceeds max 150".to_string(),
        };
        assert_eq!(err.to_string(), "invalid tuning: flappy.gap: min 200 exceeds max 150");
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn test_parse_error_keeps_source() {
        let source = serde_json::from_str::<u32>("not json").unwrap_err();
        let err = Error::Parse {
            what: "settings",
            source,
        };
        assert!(err.to_string().starts_with("invalid settings json"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
