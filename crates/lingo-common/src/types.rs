//! Common type definitions shared by every Lingo crate.

/// Common result type for Lingo operations.
pub type Result<T> = std::result::Result<T, LingoError>;

/// Workspace-wide error type.
///
/// Only configuration and loading problems are errors. Lookup misses never
/// surface here: they degrade to a best-effort string and a diagnostic.
#[derive(thiserror::Error, Debug)]
pub enum LingoError {
    /// An option key that the plugin does not recognize.
    #[error("`{0}` is an invalid option for the translate plugin.")]
    InvalidOption(String),

    /// The required translation catalog was not supplied.
    #[error("No translations available.")]
    MissingTranslations,

    /// Exactly one of the plural count and the plural form was supplied.
    #[error("`translate-n` and `translate-plural` attributes must be used together: {msgid}.")]
    PluralPairing {
        /// The message whose block was misconfigured.
        msgid: String,
    },

    /// The catalog does not have the expected shape.
    #[error("Malformed catalog: {0}")]
    Catalog(String),

    /// Other configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl LingoError {
    /// Whether this error is raised while setting the plugin up.
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidOption(_)
                | Self::MissingTranslations
                | Self::PluralPairing { .. }
                | Self::Config(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_option_message() {
        let err = LingoError::InvalidOption("colour".to_string());
        assert_eq!(
            err.to_string(),
            "`colour` is an invalid option for the translate plugin."
        );
        assert!(err.is_configuration());
    }

    #[test]
    fn test_plural_pairing_message() {
        let err = LingoError::PluralPairing {
            msgid: "%{ n } car".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "`translate-n` and `translate-plural` attributes must be used together: %{ n } car."
        );
    }

    #[test]
    fn test_io_error_is_not_configuration() {
        let err: LingoError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(!err.is_configuration());
        assert!(err.to_string().starts_with("I/O error"));
    }
}
