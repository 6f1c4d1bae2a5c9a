use std::collections::BTreeMap;

use bls::traits::Signature as SignatureTrait;
use log::debug;
use types::phase0::containers::{Attestation, AttestationData};

use crate::{
    config::{AggregationStrategy, AggregatorConfig},
    error::Error,
    naive::NaiveAggregation,
};

/// Strategy used to aggregate attestations sharing both `data` and committee size.
pub trait AggregationPolicy<S> {
    fn aggregate_partition(
        &self,
        attestations: Vec<Attestation<S>>,
    ) -> Result<Vec<Attestation<S>>, Error>;
}

pub struct Aggregator<S> {
    policy: Box<dyn AggregationPolicy<S> + Send + Sync>,
}

impl<S: SignatureTrait> Default for Aggregator<S> {
    fn default() -> Self {
        Self::new(AggregatorConfig::default())
    }
}

impl<S: SignatureTrait> Aggregator<S> {
    #[must_use]
    pub fn new(config: AggregatorConfig) -> Self {
        match config.strategy {
            AggregationStrategy::Naive => Self::with_policy(NaiveAggregation),
        }
    }

    #[must_use]
    pub fn with_policy(policy: impl AggregationPolicy<S> + Send + Sync + 'static) -> Self {
        Self {
            policy: Box::new(policy),
        }
    }

    /// Aggregates a batch of attestations into as few non-overlapping aggregates as the policy
    /// finds.
    ///
    /// Attestations are only ever combined with others sharing their `data` and committee size.
    /// The order of the output is deterministic but carries no meaning.
    pub fn aggregate_all(
        &self,
        attestations: Vec<Attestation<S>>,
    ) -> Result<Vec<Attestation<S>>, Error> {
        if attestations.len() < 2 {
            return Ok(attestations);
        }

        let input_count = attestations.len();
        let mut partitions = BTreeMap::<_, Vec<_>>::new();

        for attestation in attestations {
            partitions
                .entry((attestation.data, attestation.committee_size()))
                .or_default()
                .push(attestation);
        }

        let partition_count = partitions.len();
        let mut output = vec![];

        for partition in partitions.into_values() {
            output.extend(self.policy.aggregate_partition(partition)?);
        }

        debug!(
            "aggregated attestations \
             (input_count: {input_count}, partition_count: {partition_count}, \
              output_count: {})",
            output.len(),
        );

        Ok(output)
    }
}

/// Selects the aggregate for `data` with the most participants.
///
/// Ties are resolved in favor of the last candidate in `aggregates`.
pub fn best_aggregate<'attestations, S>(
    aggregates: impl IntoIterator<Item = &'attestations Attestation<S>>,
    data: AttestationData,
) -> Option<&'attestations Attestation<S>>
where
    S: 'attestations,
{
    aggregates
        .into_iter()
        .filter(|aggregate| aggregate.data == data)
        .max_by_key(|aggregate| aggregate.participant_count())
}
