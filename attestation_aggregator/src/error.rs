use ssz::BitListError;
use thiserror::Error;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum Error {
    #[error("aggregation bits have different lengths ({left} and {right} bits)")]
    DifferentLengths { left: usize, right: usize },
    #[error("aggregation bits overlap")]
    BitsOverlap,
}

impl From<BitListError> for Error {
    fn from(error: BitListError) -> Self {
        match error {
            BitListError::LengthMismatch { left, right } => Self::DifferentLengths { left, right },
        }
    }
}
