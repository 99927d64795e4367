//! ACESclip error types.
//!
//! Decoding is fail-fast: every section of the document maps to one
//! variant here, and the first one hit ends the decode.

use thiserror::Error;

/// Result type for ACESclip operations.
pub type ClipResult<T> = Result<T, ClipError>;

/// Errors that can occur while reading or writing ACESclip metadata.
#[derive(Debug, Error)]
pub enum ClipError {
    /// I/O error opening, reading or writing a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The XML itself is malformed.
    #[error("XML error: {0}")]
    Xml(String),

    /// Document root is not `aces:ACESmetadata`.
    #[error("not an ACES clip file")]
    NotAnAcesFile,

    /// A mandatory element or its text is missing or unreadable.
    #[error("error parsing element: {0}")]
    ParseElement(&'static str),

    /// Declared version is newer than this implementation supports.
    #[error("unsupported {element}: {version} (supported: <= 1.0)")]
    UnsupportedVersion {
        /// Element carrying the version.
        element: &'static str,
        /// Declared version value.
        version: f32,
    },

    /// `aces:Info` block is absent.
    #[error("no aces:Info")]
    MissingInfo,

    /// `aces:ClipID` block is absent.
    #[error("no aces:ClipID")]
    MissingClipId,

    /// `aces:Config` block is absent.
    #[error("no aces:Config")]
    MissingConfig,

    /// `aces:GradeRef` lacks one of its workspace conversions.
    #[error("missing color space conversion: {0}")]
    MissingSpaceConversion(&'static str),

    /// Input transform list is absent.
    #[error("no InputTransformList")]
    MissingInputTransformList,

    /// Preview transform list is absent.
    #[error("no PreviewTransformList")]
    MissingPreviewTransformList,
}

impl ClipError {
    /// Wraps a serializer failure as an I/O error.
    pub(crate) fn write<E: std::fmt::Display>(err: E) -> Self {
        ClipError::Io(std::io::Error::other(format!("write error: {}", err)))
    }
}
