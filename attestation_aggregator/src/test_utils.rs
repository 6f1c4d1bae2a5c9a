use std::collections::BTreeSet;

use bls::traits::Signature as SignatureTrait;
use itertools::Itertools as _;
use ssz::BitList;
use types::phase0::containers::{Attestation, AttestationData};

/// Stands in for a BLS signature by recording which committee seats contributed to it.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct Signers(pub BTreeSet<usize>);

impl SignatureTrait for Signers {
    fn aggregate_in_place(&mut self, other: &Self) {
        self.0.extend(other.0.iter().copied());
    }
}

pub fn attestation(length: usize, indices: &[usize]) -> Attestation<Signers> {
    attestation_with_data(AttestationData::default(), length, indices)
}

pub fn attestation_with_data(
    data: AttestationData,
    length: usize,
    indices: &[usize],
) -> Attestation<Signers> {
    Attestation {
        aggregation_bits: BitList::from_indices(length, indices.iter().copied()),
        data,
        signature: Signers(indices.iter().copied().collect()),
    }
}

pub fn attestation_from_bits(aggregation_bits: BitList) -> Attestation<Signers> {
    let signers = aggregation_bits.iter_ones().collect();

    Attestation {
        aggregation_bits,
        data: AttestationData::default(),
        signature: Signers(signers),
    }
}

pub fn sorted_indices<S>(attestations: &[Attestation<S>]) -> Vec<Vec<usize>> {
    attestations
        .iter()
        .map(|attestation| attestation.aggregation_bits.iter_ones().collect_vec())
        .sorted()
        .collect()
}
