use bls::traits::Signature as SignatureTrait;
use itertools::Itertools as _;
use types::phase0::containers::Attestation;

use crate::{aggregate::Aggregate, aggregator::AggregationPolicy, error::Error};

/// Greedy first-fit aggregation.
///
/// Every attestation is merged into the first accumulator it does not overlap.
/// Accumulators covered by another accumulator are then dropped.
#[derive(Clone, Copy, Default, Debug)]
pub struct NaiveAggregation;

impl<S: SignatureTrait> AggregationPolicy<S> for NaiveAggregation {
    fn aggregate_partition(
        &self,
        attestations: Vec<Attestation<S>>,
    ) -> Result<Vec<Attestation<S>>, Error> {
        let Some(data) = attestations.first().map(|attestation| attestation.data) else {
            return Ok(vec![]);
        };

        let mut accumulators = Vec::<Aggregate<S>>::new();

        for (member, attestation) in attestations.into_iter().enumerate() {
            match first_admitting(&accumulators, &attestation)? {
                Some(position) => accumulators[position].absorb(member, &attestation)?,
                None => accumulators.push(Aggregate::new(member, attestation)),
            }
        }

        let maximal = discard_subsumed(accumulators)?;

        Ok(maximal
            .into_iter()
            .unique_by(|aggregate| aggregate.aggregation_bits.clone())
            .map(|aggregate| aggregate.into_attestation(data))
            .collect())
    }
}

fn first_admitting<S: SignatureTrait>(
    accumulators: &[Aggregate<S>],
    attestation: &Attestation<S>,
) -> Result<Option<usize>, Error> {
    for (position, accumulator) in accumulators.iter().enumerate() {
        if accumulator.admits(attestation)? {
            return Ok(Some(position));
        }
    }

    Ok(None)
}

fn discard_subsumed<S>(accumulators: Vec<Aggregate<S>>) -> Result<Vec<Aggregate<S>>, Error> {
    let mut subsumed = vec![false; accumulators.len()];

    for (position, accumulator) in accumulators.iter().enumerate() {
        for other in &accumulators {
            let bits = &accumulator.aggregation_bits;
            let other_bits = &other.aggregation_bits;

            if bits != other_bits && bits.is_subset_of(other_bits)? {
                subsumed[position] = true;
                break;
            }
        }
    }

    Ok(core::iter::zip(accumulators, subsumed)
        .filter(|(_, subsumed)| !subsumed)
        .map(|(accumulator, _)| accumulator)
        .collect())
}

#[cfg(test)]
mod tests {
    use ssz::BitList;

    use crate::test_utils::{attestation, sorted_indices, Signers};

    use super::*;

    fn aggregate(attestations: Vec<Attestation<Signers>>) -> Vec<Attestation<Signers>> {
        NaiveAggregation
            .aggregate_partition(attestations)
            .expect("partition holds attestations of one committee size")
    }

    #[test]
    fn empty_partition_produces_nothing() {
        assert_eq!(aggregate(vec![]), vec![]);
    }

    #[test]
    fn first_fit_merges_into_earliest_accumulator() {
        let output = aggregate(vec![
            attestation(6, &[0, 3]),
            attestation(6, &[1, 2, 4]),
            attestation(6, &[1, 3]),
            attestation(6, &[0, 4, 5]),
        ]);

        assert_eq!(
            sorted_indices(&output),
            [vec![0, 1, 2, 3, 4], vec![0, 1, 3, 4, 5]],
        );

        for aggregate in &output {
            assert_eq!(aggregate.participant_count(), 5);
            assert_eq!(
                aggregate.signature,
                Signers(aggregate.aggregation_bits.iter_ones().collect()),
            );
        }
    }

    #[test]
    fn subsumed_accumulator_is_discarded() {
        let output = aggregate(vec![attestation(4, &[0]), attestation(4, &[0, 1])]);

        assert_eq!(sorted_indices(&output), [vec![0, 1]]);
    }

    #[test]
    fn identical_accumulators_are_deduplicated() {
        let output = aggregate(vec![
            attestation(4, &[0, 1]),
            attestation(4, &[0, 1]),
            attestation(4, &[2, 3]),
            attestation(4, &[2, 3]),
        ]);

        assert_eq!(output.len(), 1);
        assert_eq!(
            output[0].aggregation_bits,
            BitList::from_indices(4, [0, 1, 2, 3]),
        );
    }

    #[test]
    fn attestation_joins_first_accumulator_it_does_not_overlap() {
        let output = aggregate(vec![
            attestation(8, &[0, 1]),
            attestation(8, &[1, 2]),
            attestation(8, &[3]),
            attestation(8, &[0, 4]),
        ]);

        assert_eq!(sorted_indices(&output), [vec![0, 1, 2, 4], vec![0, 1, 3]]);
    }
}
