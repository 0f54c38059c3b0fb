use thiserror::Error;

/// Errors that can occur while decoding or rewriting disc metadata.
#[derive(Debug, Error)]
pub enum XgdError {
    /// I/O error while reading or writing an artifact
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The security sector marker bytes match no known generation
    #[error("Unrecognized security sector marker: 0x{marker:06X}")]
    Classification { marker: u32 },

    /// Input has the wrong shape (length, row width, region size)
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// The input is shorter than the format requires
    #[error("Input too small: expected at least {expected} bytes, got {actual}")]
    TooSmall { expected: u64, actual: u64 },

    /// The operation does not apply to this disc generation
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// Expected text or fields could not be located or decoded
    #[error("Parse failure: {0}")]
    Parse(String),
}

impl XgdError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
