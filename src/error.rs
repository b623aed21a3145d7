//! Defines [`WkxError`], representing all errors returned by this crate.

use std::borrow::Cow;
use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum WkxError {
    /// The input does not follow the WKT grammar or the WKB layout.
    ///
    /// `position` is the character offset into WKT text or the byte offset into a WKB stream
    /// where the problem was detected.
    #[error("Malformed input at offset {position}: {message}")]
    MalformedInput {
        position: usize,
        message: Cow<'static, str>,
    },

    /// A geometry type this crate does not know how to decode or encode.
    #[error("Unsupported geometry type: {0}")]
    UnsupportedGeometryType(String),

    /// Incorrect type was passed to an operation.
    #[error("Incorrect geometry type for operation: {0}")]
    IncorrectGeometryType(Cow<'static, str>),

    /// [std::io::Error]
    #[error(transparent)]
    IOError(#[from] std::io::Error),
}

impl WkxError {
    pub(crate) fn malformed(position: usize, message: impl Into<Cow<'static, str>>) -> Self {
        WkxError::MalformedInput {
            position,
            message: message.into(),
        }
    }

    /// The offset attached to a [`WkxError::MalformedInput`].
    pub fn position(&self) -> Option<usize> {
        match self {
            WkxError::MalformedInput { position, .. } => Some(*position),
            _ => None,
        }
    }
}

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, WkxError>;
