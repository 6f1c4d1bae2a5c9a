use thiserror::Error;
use types::phase0::primitives::ValidatorIndex;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum Error {
    #[error("epoch store length is not a multiple of span size (actual: {actual})")]
    WrongSize { actual: usize },
    #[error("validator index {index} is too large for an epoch store")]
    ValidatorIndexTooLarge { index: ValidatorIndex },
    #[error("span distance {distance} does not fit in 16 bits")]
    SpanDistanceTooLarge { distance: u64 },
}
