use thiserror::Error;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum ReadError {
    #[error("expected fixed-size value of {expected} bytes, found {actual} bytes")]
    FixedSizeMismatch { expected: usize, actual: usize },
    #[error("empty slice is not a valid bit list")]
    BitListEmptySlice,
    #[error("last byte of slice has no delimiting bit")]
    BitListNoDelimitingBit,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum BitListError {
    #[error("bit lists have different lengths ({left} and {right} bits)")]
    LengthMismatch { left: usize, right: usize },
}
