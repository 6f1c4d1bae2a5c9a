pub use crate::{
    aggregate::aggregate_pair,
    aggregator::{best_aggregate, AggregationPolicy, Aggregator},
    config::{AggregationStrategy, AggregatorConfig},
    error::Error,
    naive::NaiveAggregation,
};

mod aggregate;
mod aggregator;
mod config;
mod error;
mod naive;

#[cfg(test)]
mod test_utils;
