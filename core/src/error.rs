//! Error types for the value layer and the Braze API client.
//!
//! # Design
//! Value-layer errors are split by where they arise. `TypeMismatch` is raised
//! while decoding a single node and only knows its position relative to the
//! list being decoded. `ConversionError` is what the configuration-facing entry
//! point returns: the same mismatch anchored at the attribute path it was
//! found under. `UnsupportedSelector` covers path steps a list type cannot
//! resolve.
//!
//! `ApiError::NotFound` gets a dedicated variant because callers frequently
//! distinguish "the resource does not exist" from "the server returned an
//! unexpected status." A 422 lands in `Validation`. All other non-2xx
//! responses land in `HttpError` with the raw status code and body.

use thiserror::Error;

use crate::structural::{AttrPath, AttrType, PathStep};

/// A structural node's shape disagrees with the type it was decoded as.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected}, found {found}{}", at_suffix(.at))]
pub struct TypeMismatch {
    pub expected: AttrType,
    /// Rendering of the type (or payload shape) actually encountered.
    pub found: String,
    /// Location of the offending node, relative to the decoded value.
    pub at: AttrPath,
}

impl TypeMismatch {
    pub(crate) fn new(expected: AttrType, found: impl Into<String>) -> Self {
        Self {
            expected,
            found: found.into(),
            at: AttrPath::empty(),
        }
    }

    /// Re-anchor the mismatch underneath `step`.
    pub(crate) fn under(mut self, step: PathStep) -> Self {
        self.at = AttrPath::empty().with_step(step).join(&self.at);
        self
    }
}

fn at_suffix(at: &AttrPath) -> String {
    if at.is_empty() {
        String::new()
    } else {
        format!(" at {at}")
    }
}

/// Failure to materialize a value from the structured value protocol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot convert value at {}: {source}", full_path(.path, .source))]
pub struct ConversionError {
    /// Attribute path the conversion was requested for.
    pub path: AttrPath,
    #[source]
    pub source: TypeMismatch,
}

impl ConversionError {
    /// Full location of the offending node.
    pub fn full_path(&self) -> AttrPath {
        full_path(&self.path, &self.source)
    }
}

fn full_path(path: &AttrPath, source: &TypeMismatch) -> AttrPath {
    path.join(&source.at)
}

/// A path step that cannot be applied to the given type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot apply path step {step} to {ty}")]
pub struct UnsupportedSelector {
    pub step: PathStep,
    pub ty: String,
}

/// Errors returned by `BrazeClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404, the requested resource does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server rejected the payload with 422.
    #[error("validation failed: {body}")]
    Validation { body: String },

    /// The server returned a non-2xx status other than 404 or 422.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

impl ApiError {
    /// HTTP status carried by this error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound => Some(404),
            ApiError::Validation { .. } => Some(422),
            ApiError::HttpError { status, .. } => Some(*status),
            ApiError::DeserializationError(_) | ApiError::SerializationError(_) => None,
        }
    }
}

/// Invalid client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("no base URL configured; set BRAZE_BASE_URL or pass one explicitly")]
    MissingBaseUrl,

    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_mismatch_renders_relative_location() {
        let err = TypeMismatch::new(AttrType::String, "Number").under(PathStep::ElementKeyInt(2));
        assert_eq!(err.to_string(), "expected String, found Number at [2]");
    }

    #[test]
    fn conversion_error_renders_full_path() {
        let err = ConversionError {
            path: AttrPath::root("tags"),
            source: TypeMismatch::new(AttrType::String, "Bool").under(PathStep::ElementKeyInt(0)),
        };
        assert_eq!(err.full_path().to_string(), "tags[0]");
        assert_eq!(
            err.to_string(),
            "cannot convert value at tags[0]: expected String, found Bool at [0]"
        );
    }

    #[test]
    fn api_error_exposes_status() {
        assert_eq!(ApiError::NotFound.status(), Some(404));
        assert_eq!(ApiError::Validation { body: String::new() }.status(), Some(422));
        assert_eq!(
            ApiError::HttpError {
                status: 500,
                body: String::new()
            }
            .status(),
            Some(500)
        );
        assert_eq!(ApiError::DeserializationError("x".into()).status(), None);
    }
}
