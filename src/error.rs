//! The error type shared by every container in this crate.

/// The broad category of an [`Error`].
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum ErrorKind {
    /// The number of indices differs from the order of the container.
    RankMismatch,

    /// An index lies outside its extent or stride.
    IndexOutOfBounds,

    /// An offset table was built from a bad size sequence, or appended to
    /// out of order.
    OffsetTableInconsistency,

    /// A shape or buffer was rejected at construction time.
    InvalidShape,
}

/// Everything that can go wrong when constructing or indexing a container.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("rank mismatch: container has order {expected}, got {got} indices")]
    RankMismatch { expected: usize, got: usize },

    #[error("index {index} on axis {axis} is out of bounds for extent {extent}")]
    IndexOutOfBounds { axis: usize, index: usize, extent: usize },

    #[error("index {index} is out of bounds for stride {stride} of line {line}")]
    StrideOutOfBounds { line: usize, index: usize, stride: usize },

    #[error("order {order} is not in 1..={}", crate::MAX_ORDER)]
    InvalidOrder { order: usize },

    #[error("product of extents {dims:?} overflows usize")]
    LengthOverflow { dims: Vec<usize> },

    #[error("expected {expected} elements, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    #[error("buffer of length {got} is too small for {needed} elements")]
    BufferTooSmall { needed: usize, got: usize },

    #[error("size {value} at position {position} is not a valid extent")]
    InvalidExtent { position: usize, value: String },

    #[error("offset table overflows usize at position {position}")]
    TableOverflow { position: usize },

    #[error("append to line {line} after line {last}")]
    OutOfOrderAppend { line: usize, last: usize },

    #[error("line {line} is already at its capacity of {capacity}")]
    CapacityExceeded { line: usize, capacity: usize },

    #[error("extent {extent} of line {line} exceeds capacity {capacity}")]
    ExtentTooLarge { line: usize, extent: usize, capacity: usize },

    #[error("vectors must have at least one component")]
    ZeroVectorDim,
}

impl Error {
    /// Returns the category of `self`.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::RankMismatch { .. } => ErrorKind::RankMismatch,
            Error::IndexOutOfBounds { .. } |
            Error::StrideOutOfBounds { .. } => ErrorKind::IndexOutOfBounds,
            Error::InvalidExtent { .. } |
            Error::TableOverflow { .. } |
            Error::OutOfOrderAppend { .. } |
            Error::CapacityExceeded { .. } => ErrorKind::OffsetTableInconsistency,
            Error::InvalidOrder { .. } |
            Error::LengthOverflow { .. } |
            Error::LengthMismatch { .. } |
            Error::BufferTooSmall { .. } |
            Error::ExtentTooLarge { .. } |
            Error::ZeroVectorDim => ErrorKind::InvalidShape,
        }
    }
}

/// Shorthand for results whose error type is [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Panics with the message of `error`. Used by the panicking accessors.
#[cold]
#[track_caller]
pub(crate) fn fail(error: Error) -> ! {
    panic!("{}", error)
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(Error::RankMismatch { expected: 2, got: 3 }.kind(), ErrorKind::RankMismatch);
        assert_eq!(Error::StrideOutOfBounds { line: 0, index: 4, stride: 4 }.kind(), ErrorKind::IndexOutOfBounds);
        assert_eq!(Error::OutOfOrderAppend { line: 1, last: 2 }.kind(), ErrorKind::OffsetTableInconsistency);
        assert_eq!(Error::InvalidOrder { order: 8 }.kind(), ErrorKind::InvalidShape);
    }

    #[test]
    fn messages() {
        let e = Error::IndexOutOfBounds { axis: 1, index: 5, extent: 3 };
        assert_eq!(e.to_string(), "index 5 on axis 1 is out of bounds for extent 3");
        let e = Error::InvalidOrder { order: 0 };
        assert_eq!(e.to_string(), "order 0 is not in 1..=7");
    }
}
