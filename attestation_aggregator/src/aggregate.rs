use std::collections::BTreeSet;

use bls::traits::Signature as SignatureTrait;
use ssz::BitList;
use types::phase0::containers::{Attestation, AttestationData};

use crate::error::Error;

/// Running aggregate built from attestations with pairwise disjoint aggregation bits.
pub struct Aggregate<S> {
    pub aggregation_bits: BitList,
    pub signature: S,
    // Positions of the merged attestations in the batch they came from.
    pub members: BTreeSet<usize>,
}

impl<S: SignatureTrait> Aggregate<S> {
    pub fn new(member: usize, attestation: Attestation<S>) -> Self {
        let Attestation {
            aggregation_bits,
            signature,
            ..
        } = attestation;

        Self {
            aggregation_bits,
            signature,
            members: BTreeSet::from([member]),
        }
    }

    pub fn admits(&self, attestation: &Attestation<S>) -> Result<bool, Error> {
        let overlaps = self
            .aggregation_bits
            .overlaps(&attestation.aggregation_bits)?;

        Ok(!overlaps)
    }

    pub fn absorb(&mut self, member: usize, attestation: &Attestation<S>) -> Result<(), Error> {
        if !self.admits(attestation)? {
            return Err(Error::BitsOverlap);
        }

        self.aggregation_bits
            .bitwise_or_assign(&attestation.aggregation_bits)?;

        self.signature.aggregate_in_place(&attestation.signature);
        self.members.insert(member);

        Ok(())
    }

    pub fn into_attestation(self, data: AttestationData) -> Attestation<S> {
        Attestation {
            aggregation_bits: self.aggregation_bits,
            data,
            signature: self.signature,
        }
    }
}

/// Combines two attestations with disjoint aggregation bits into one.
///
/// The caller is responsible for only passing attestations with equal `data`.
/// The result carries the `data` of `first`.
pub fn aggregate_pair<S: SignatureTrait>(
    first: &Attestation<S>,
    second: &Attestation<S>,
) -> Result<Attestation<S>, Error> {
    let mut aggregate = Aggregate::new(0, first.clone());
    aggregate.absorb(1, second)?;
    Ok(aggregate.into_attestation(first.data))
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use ssz::SszRead as _;
    use test_case::test_case;
    use types::phase0::{containers::Checkpoint, primitives::H256};

    use crate::test_utils::{attestation, attestation_from_bits, Signers};

    use super::*;

    fn bits(bytes: &[u8]) -> BitList {
        BitList::from_ssz(bytes).expect("fixture is a valid bit list")
    }

    #[test]
    fn aggregate_pair_of_disjoint_attestations() -> Result<(), Error> {
        let first = attestation(6, &[0, 3]);
        let second = attestation(6, &[1, 2, 4]);

        let aggregate = aggregate_pair(&first, &second)?;

        assert_eq!(
            aggregate.aggregation_bits,
            BitList::from_indices(6, [0, 1, 2, 3, 4]),
        );
        assert_eq!(aggregate.participant_count(), 5);
        assert_eq!(aggregate.signature, Signers([0, 1, 2, 3, 4].into()));

        Ok(())
    }

    #[test_case(&hex!("01"), &hex!("01") => hex!("01").to_vec())]
    #[test_case(&hex!("03"), &hex!("02") => hex!("03").to_vec())]
    #[test_case(&hex!("02"), &hex!("03") => hex!("03").to_vec())]
    #[test_case(&hex!("0901"), &hex!("1601") => hex!("1f01").to_vec())]
    fn aggregate_pair_produces_union(first: &[u8], second: &[u8]) -> Vec<u8> {
        let first = attestation_from_bits(bits(first));
        let second = attestation_from_bits(bits(second));

        aggregate_pair(&first, &second)
            .expect("aggregation bits are disjoint")
            .aggregation_bits
            .into()
    }

    #[test_case(&hex!("1f"), &hex!("11"))]
    #[test_case(&hex!("ff85"), &hex!("138f"))]
    #[test_case(&hex!("0501"), &hex!("0601"))]
    fn aggregate_pair_rejects_overlapping_bits(first: &[u8], second: &[u8]) {
        let first = attestation_from_bits(bits(first));
        let second = attestation_from_bits(bits(second));

        assert_eq!(
            aggregate_pair(&first, &second).map(|_| ()),
            Err(Error::BitsOverlap),
        );
    }

    #[test]
    fn aggregate_pair_rejects_different_lengths() {
        let first = attestation_from_bits(bits(&hex!("0f")));
        let second = attestation_from_bits(bits(&hex!("11")));

        assert_eq!(
            aggregate_pair(&first, &second).map(|_| ()),
            Err(Error::DifferentLengths { left: 3, right: 4 }),
        );
    }

    #[test]
    fn aggregate_pair_checks_lengths_before_overlap() {
        let first = attestation(4, &[0]);
        let second = attestation(5, &[0]);

        assert_eq!(
            aggregate_pair(&first, &second).map(|_| ()),
            Err(Error::DifferentLengths { left: 4, right: 5 }),
        );
    }

    #[test]
    fn aggregate_pair_keeps_data_of_first_attestation() -> Result<(), Error> {
        let data = AttestationData {
            slot: 3,
            index: 1,
            beacon_block_root: H256::repeat_byte(7),
            source: Checkpoint::default(),
            target: Checkpoint {
                epoch: 1,
                root: H256::repeat_byte(9),
            },
        };

        let mut first = attestation(4, &[0]);
        let mut second = attestation(4, &[1]);

        first.data = data;
        second.data = data;

        assert_eq!(aggregate_pair(&first, &second)?.data, data);

        Ok(())
    }

    #[test]
    fn aggregate_tracks_members_and_rejects_overlap() -> Result<(), Error> {
        let mut aggregate = Aggregate::new(0, attestation(8, &[0, 3]));

        aggregate.absorb(2, &attestation(8, &[1, 2]))?;

        assert_eq!(
            aggregate.absorb(5, &attestation(8, &[2, 7])),
            Err(Error::BitsOverlap),
        );

        assert_eq!(aggregate.members, BTreeSet::from([0, 2]));
        assert_eq!(
            aggregate.aggregation_bits,
            BitList::from_indices(8, [0, 1, 2, 3]),
        );
        assert_eq!(aggregate.signature, Signers([0, 1, 2, 3].into()));

        Ok(())
    }
}
