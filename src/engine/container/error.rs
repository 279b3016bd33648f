use thiserror::Error;

/// Failures of buffer construction and access.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContainerError {
    /// Element access past the end.
    #[error("vertex index {index} is out of bounds for buffer of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// `first + count` past the end, or overflowing.
    #[error("range [{first}, {first} + {count}) is out of bounds for buffer of length {len}")]
    RangeOutOfBounds { first: usize, count: usize, len: usize },

    /// Cell or byte count does not fit in `usize`.
    #[error("overflow calculating {what} size for a {width}x{height} grid")]
    SizeOverflow { what: &'static str, width: u32, height: u32 },
}
