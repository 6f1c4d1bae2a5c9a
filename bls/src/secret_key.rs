use blst::min_pk::SecretKey as RawSecretKey;

use crate::{
    consts::DOMAIN_SEPARATION_TAG, error::Error, public_key::PublicKey, signature::Signature,
};

// `RawSecretKey` already implements `Zeroize` (with `zeroize(drop)`).
pub struct SecretKey(RawSecretKey);

impl SecretKey {
    /// Derives a key from input keying material as described in EIP-2333.
    ///
    /// `ikm` must be at least 32 bytes long.
    pub fn key_gen(ikm: impl AsRef<[u8]>) -> Result<Self, Error> {
        RawSecretKey::key_gen(ikm.as_ref(), &[])
            .map(Self)
            .map_err(Error::InvalidSecretKey)
    }

    #[must_use]
    pub fn to_public_key(&self) -> PublicKey {
        self.0.sk_to_pk().into()
    }

    #[must_use]
    pub fn sign(&self, message: impl AsRef<[u8]>) -> Signature {
        self.0
            .sign(message.as_ref(), DOMAIN_SEPARATION_TAG, &[])
            .into()
    }
}
