/// Convenience result type for payload encoding and decoding.
pub type CoreResult<T> = Result<T, CoreError>;

/// Failures while moving a document in or out of its persisted form.
#[derive(thiserror::Error, Debug)]
pub enum CoreError {
    /// The payload is not valid JSON or doesn't match the template shape.
    #[error("template decode error: {0}")]
    Decode(#[source] serde_json::Error),

    /// The document could not be serialized.
    #[error("template encode error: {0}")]
    Encode(#[source] serde_json::Error),

    /// Written by a newer format revision than this build understands.
    #[error("unsupported template version {found} (newest supported is {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
}
