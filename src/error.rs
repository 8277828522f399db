use crate::types::version::VersionError;
use std::fmt::{Display, Formatter};

/// Errors raised while assembling an OpenAPI document.
///
/// A request for a document name that has no matching API version is not represented
/// here; generation returns `Ok(None)` for that case.
#[derive(Debug, Clone)]
pub enum DocumentError {
    /// A required configuration value or section is absent (or malformed). Carries the
    /// fully qualified, colon-separated configuration path.
    ConfigurationMissing(String),

    /// The configuration source could not be read or parsed.
    ConfigurationLoad(String),

    /// The assembled document does not have the shape of an OpenAPI document.
    InvalidDocument(String, String),

    /// The `openapi` field of the document names a format version that is not supported.
    UnsupportedVersion(String),

    /// The document could not be converted to JSON.
    Serialization(String),
}

impl DocumentError {
    pub(crate) fn configuration_missing<T>(path: &T) -> Self
    where
        T: ToString + ?Sized,
    {
        DocumentError::ConfigurationMissing(path.to_string())
    }

    pub(crate) fn configuration_load<T>(message: &T) -> Self
    where
        T: ToString + ?Sized,
    {
        DocumentError::ConfigurationLoad(message.to_string())
    }

    pub(crate) fn invalid_document<E, T>(error: E, document_name: &T) -> Self
    where
        E: ToString,
        T: ToString + ?Sized,
    {
        DocumentError::InvalidDocument(error.to_string(), document_name.to_string())
    }

    pub(crate) fn serialization<T>(message: &T) -> Self
    where
        T: ToString + ?Sized,
    {
        DocumentError::Serialization(message.to_string())
    }

    /// Returns the configuration path carried by a `ConfigurationMissing` error.
    pub fn missing_path(&self) -> Option<&str> {
        match self {
            DocumentError::ConfigurationMissing(path) => Some(path),
            _ => None,
        }
    }
}

impl From<VersionError> for DocumentError {
    fn from(value: VersionError) -> Self {
        match value {
            VersionError::UnsupportedVersion(version) => DocumentError::UnsupportedVersion(version),
            other => DocumentError::configuration_load(&other),
        }
    }
}

impl Display for DocumentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentError::ConfigurationMissing(path) => {
                write!(f, "Required configuration '{}' is missing", path)
            }
            DocumentError::ConfigurationLoad(msg) => {
                write!(f, "Loading configuration failed: {}", msg)
            }
            DocumentError::InvalidDocument(msg, document_name) => {
                write!(
                    f,
                    "Document '{}' failed structural validation: {}",
                    document_name, msg
                )
            }
            DocumentError::UnsupportedVersion(version) => {
                write!(f, "Unsupported OpenAPI version: {}", version)
            }
            DocumentError::Serialization(msg) => {
                write!(f, "Serializing document failed: {}", msg)
            }
        }
    }
}

impl PartialEq for DocumentError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (DocumentError::ConfigurationMissing(a), DocumentError::ConfigurationMissing(b)) => {
                a == b
            }
            (DocumentError::ConfigurationLoad(_), DocumentError::ConfigurationLoad(_)) => true,
            (DocumentError::InvalidDocument(_, a), DocumentError::InvalidDocument(_, b)) => a == b,
            (DocumentError::UnsupportedVersion(a), DocumentError::UnsupportedVersion(b)) => a == b,
            (DocumentError::Serialization(_), DocumentError::Serialization(_)) => true,
            (_, _) => false,
        }
    }
}

impl std::error::Error for DocumentError {}
