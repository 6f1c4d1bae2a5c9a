pub use crate::{
    error::Error,
    public_key::PublicKey,
    secret_key::SecretKey,
    signature::Signature,
    signature_bytes::SignatureBytes,
};

pub mod consts;
pub mod traits;

mod error;
mod public_key;
mod secret_key;
mod signature;
mod signature_bytes;
