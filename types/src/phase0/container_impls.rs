use bls::{Error, Signature, SignatureBytes};

use crate::phase0::containers::Attestation;

impl<S> Attestation<S> {
    /// Number of seats in the committee the attestation was produced by.
    #[inline]
    #[must_use]
    pub fn committee_size(&self) -> usize {
        self.aggregation_bits.len()
    }

    #[inline]
    #[must_use]
    pub fn participant_count(&self) -> usize {
        self.aggregation_bits.count_ones()
    }
}

impl TryFrom<Attestation> for Attestation<Signature> {
    type Error = Error;

    fn try_from(attestation: Attestation) -> Result<Self, Self::Error> {
        let Attestation {
            aggregation_bits,
            data,
            signature,
        } = attestation;

        Ok(Self {
            aggregation_bits,
            data,
            signature: signature.try_into()?,
        })
    }
}

impl From<Attestation<Signature>> for Attestation<SignatureBytes> {
    fn from(attestation: Attestation<Signature>) -> Self {
        let Attestation {
            aggregation_bits,
            data,
            signature,
        } = attestation;

        Self {
            aggregation_bits,
            data,
            signature: signature.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};
    use ssz::BitList;

    use crate::phase0::containers::{AttestationData, Checkpoint};

    use super::*;

    #[test]
    fn attestation_reports_committee_size_and_participants() {
        let attestation = Attestation {
            aggregation_bits: BitList::from_indices(6, [1, 2, 4]),
            data: AttestationData::default(),
            signature: (),
        };

        assert_eq!(attestation.committee_size(), 6);
        assert_eq!(attestation.participant_count(), 3);
    }

    #[test]
    fn attestation_json_carries_bits_as_ssz_hex() -> Result<(), serde_json::Error> {
        let attestation = Attestation {
            aggregation_bits: BitList::from_indices(8, [0, 3]),
            data: AttestationData {
                slot: 65,
                target: Checkpoint {
                    epoch: 2,
                    ..Checkpoint::default()
                },
                ..AttestationData::default()
            },
            signature: (),
        };

        let json = serde_json::to_value(&attestation)?;

        assert_eq!(json["aggregation_bits"], json!("0x0901"));
        assert_eq!(json["data"]["slot"], json!(65));
        assert_eq!(json["data"]["target"]["epoch"], json!(2));
        assert_eq!(json["signature"], Value::Null);

        assert_eq!(serde_json::from_value::<Attestation<()>>(json)?, attestation);

        Ok(())
    }
}
