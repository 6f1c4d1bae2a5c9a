use bls::SignatureBytes;
use serde::{Deserialize, Serialize};
use ssz::BitList;

use crate::phase0::primitives::{CommitteeIndex, Epoch, Slot, H256};

// Signatures are kept as `SignatureBytes` on the wire and only decompressed when they need to be
// aggregated or verified. The aggregator works with any signature type through `bls::traits`.

#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Attestation<S = SignatureBytes> {
    pub aggregation_bits: BitList,
    pub data: AttestationData,
    pub signature: S,
}

#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug, Deserialize, Serialize,
)]
#[serde(deny_unknown_fields)]
pub struct AttestationData {
    pub slot: Slot,
    pub index: CommitteeIndex,
    pub beacon_block_root: H256,
    pub source: Checkpoint,
    pub target: Checkpoint,
}

#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug, Deserialize, Serialize,
)]
#[serde(deny_unknown_fields)]
pub struct Checkpoint {
    pub epoch: Epoch,
    pub root: H256,
}
