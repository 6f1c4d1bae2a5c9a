pub use crate::{
    epoch_spans::EpochSpans,
    epoch_store::EpochStore,
    error::Error,
    slasher_config::SlasherConfig,
    span::{Span, SPAN_SIZE},
};

mod epoch_spans;
mod epoch_store;
mod error;
mod slasher_config;
mod span;
