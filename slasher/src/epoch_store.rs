use std::collections::BTreeMap;

use log::debug;
use types::phase0::primitives::ValidatorIndex;

use crate::{
    error::Error,
    span::{Span, SPAN_SIZE},
};

// Vectors may not hold more than `isize::MAX` bytes.
const MAX_CAPACITY: usize = isize::MAX.unsigned_abs() / SPAN_SIZE;

/// Spans of all validators for a single epoch, stored back to back in their encoded form.
///
/// The span of validator `i` occupies bytes `7 * i..7 * (i + 1)`.
/// Validators past the end of the store have zero spans.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct EpochStore {
    spans: Vec<[u8; SPAN_SIZE]>,
    highest_observed_index: ValidatorIndex,
}

impl TryFrom<Vec<u8>> for EpochStore {
    type Error = Error;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        Self::new(&bytes)
    }
}

impl From<EpochStore> for Vec<u8> {
    fn from(store: EpochStore) -> Self {
        store.into_bytes()
    }
}

impl EpochStore {
    /// Wraps spans previously produced by [`EpochStore::as_bytes`].
    ///
    /// The highest observed index is not part of the encoding and starts at 0.
    pub fn new(bytes: &[u8]) -> Result<Self, Error> {
        let chunks = bytes.chunks_exact(SPAN_SIZE);

        if !chunks.remainder().is_empty() {
            return Err(Error::WrongSize {
                actual: bytes.len(),
            });
        }

        let spans = chunks
            .map(<[u8; SPAN_SIZE]>::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| Error::WrongSize {
                actual: bytes.len(),
            })?;

        Ok(Self {
            spans,
            highest_observed_index: 0,
        })
    }

    pub fn from_span_map(spans: &BTreeMap<ValidatorIndex, Span>) -> Result<Self, Error> {
        let Some(highest_index) = spans.keys().next_back().copied() else {
            return Ok(Self::default());
        };

        let capacity = Self::position(highest_index)? + 1;
        let mut encoded = vec![[0; SPAN_SIZE]; capacity];

        for (index, span) in spans {
            // Every key is at most `highest_index`.
            encoded[Self::position(*index)?] = span.to_array();
        }

        Ok(Self {
            spans: encoded,
            highest_observed_index: highest_index,
        })
    }

    #[must_use]
    pub fn get_validator_span(&self, validator_index: ValidatorIndex) -> Span {
        Self::position(validator_index)
            .ok()
            .and_then(|position| self.spans.get(position))
            .copied()
            .map(Span::from_array)
            .unwrap_or_default()
    }

    /// Writes `span` for `validator_index`, growing the store if needed.
    ///
    /// Spans of all other validators are left unchanged.
    pub fn set_validator_span(
        mut self,
        validator_index: ValidatorIndex,
        span: Span,
    ) -> Result<Self, Error> {
        let position = Self::position(validator_index)?;
        let encoded = span.to_array();

        if let Some(slot) = self.spans.get_mut(position) {
            *slot = encoded;
        } else {
            debug!(
                "growing epoch store (old capacity: {}, new capacity: {})",
                self.spans.len(),
                position + 1,
            );

            self.spans.resize(position, [0; SPAN_SIZE]);
            self.spans.push(encoded);
        }

        self.highest_observed_index = self.highest_observed_index.max(validator_index);

        Ok(self)
    }

    #[must_use]
    pub const fn highest_observed_index(&self) -> ValidatorIndex {
        self.highest_observed_index
    }

    /// Number of validators the store has room for without growing.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.spans.len()
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.spans.as_flattened()
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.spans.into_flattened()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ValidatorIndex, Span)> + '_ {
        (0..).zip(self.spans.iter().copied().map(Span::from_array))
    }

    /// Collects the nonzero spans in the store.
    #[must_use]
    pub fn to_span_map(&self) -> BTreeMap<ValidatorIndex, Span> {
        self.iter().filter(|(_, span)| !span.is_zero()).collect()
    }

    fn position(validator_index: ValidatorIndex) -> Result<usize, Error> {
        usize::try_from(validator_index)
            .ok()
            .filter(|position| *position < MAX_CAPACITY)
            .ok_or(Error::ValidatorIndexTooLarge {
                index: validator_index,
            })
    }
}
