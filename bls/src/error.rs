use blst::BLST_ERROR;
use thiserror::Error;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum Error {
    #[error("invalid secret key material: {0:?}")]
    InvalidSecretKey(BLST_ERROR),
    #[error("invalid signature: {0:?}")]
    InvalidSignature(BLST_ERROR),
}
