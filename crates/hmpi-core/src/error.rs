//! Shared error type across HMPI crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Upload with an unsupported file extension or encoding.
    InvalidFileFormat,
    /// Tabular data without any known metal column.
    NoRecognizedColumns,
    /// No usable concentration value in a request or file.
    EmptySample,
    /// Non-numeric or negative concentration.
    MalformedValue,
    /// Invalid input / malformed request.
    BadRequest,
    /// Upload exceeds the configured size limit.
    PayloadTooLarge,
    /// Reference tables failed validation.
    InvalidReference,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::InvalidFileFormat => "INVALID_FILE_FORMAT",
            ClientCode::NoRecognizedColumns => "NO_RECOGNIZED_COLUMNS",
            ClientCode::EmptySample => "EMPTY_SAMPLE",
            ClientCode::MalformedValue => "MALFORMED_VALUE",
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            ClientCode::InvalidReference => "INVALID_REFERENCE",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, HmpiError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum HmpiError {
    #[error("invalid file format: {0}")]
    InvalidFileFormat(String),
    #[error("no recognized metal columns found, expected one of: {}", expected.join(", "))]
    NoRecognizedColumns { expected: Vec<String> },
    #[error("no usable concentration values")]
    EmptySample,
    #[error("malformed value: {0}")]
    MalformedValue(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("payload too large")]
    PayloadTooLarge,
    #[error("invalid reference tables: {0}")]
    InvalidReference(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl HmpiError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            HmpiError::InvalidFileFormat(_) => ClientCode::InvalidFileFormat,
            HmpiError::NoRecognizedColumns { .. } => ClientCode::NoRecognizedColumns,
            HmpiError::EmptySample => ClientCode::EmptySample,
            HmpiError::MalformedValue(_) => ClientCode::MalformedValue,
            HmpiError::BadRequest(_) => ClientCode::BadRequest,
            HmpiError::PayloadTooLarge => ClientCode::PayloadTooLarge,
            HmpiError::InvalidReference(_) => ClientCode::InvalidReference,
            HmpiError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            HmpiError::Internal(_) => ClientCode::Internal,
        }
    }
}
