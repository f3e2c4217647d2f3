use thiserror::Error;

/// Failures raised by the codec. None of them are retried internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Construction argument is empty or not a sequence of single symbols.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Bitstream carries a token other than '0' or '1'.
    #[error("malformed bitstream: unexpected {found:?} at bit {position}")]
    MalformedBitstream { position: usize, found: char },

    /// Bitstream does not end on a codeword boundary.
    #[error("truncated bitstream: codeword starting at bit {position} never reaches a leaf")]
    TruncatedBitstream { position: usize },

    #[error("unsupported sum-check policy {0:?}")]
    UnsupportedPolicy(String),

    #[error("malformed tree: {0}")]
    MalformedTree(String),

    /// Symbol was not part of the input the codec was built from.
    #[error("unknown symbol {0:?}")]
    UnknownSymbol(char),
}

pub type Result<T> = std::result::Result<T, CodecError>;
