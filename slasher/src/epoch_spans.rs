use anyhow::{ensure, Result};
use database::Database;
use log::info;
use types::phase0::primitives::{Epoch, ValidatorIndex};

use crate::{epoch_store::EpochStore, slasher_config::SlasherConfig, span::Span};

const EPOCH_KEY_LENGTH: usize = size_of::<Epoch>();

// Epoch -> EpochStore
// Keys are big-endian so that ordering them as bytes orders them by epoch.
type EpochKey = [u8; EPOCH_KEY_LENGTH];

pub struct EpochSpans {
    db: Database,
    config: SlasherConfig,
}

impl EpochSpans {
    #[must_use]
    pub const fn new(db: Database, config: SlasherConfig) -> Self {
        Self { db, config }
    }

    const fn key(epoch: Epoch) -> EpochKey {
        epoch.to_be_bytes()
    }

    pub fn find(&self, epoch: Epoch) -> Result<Option<EpochStore>> {
        let Some(bytes) = self.db.get(Self::key(epoch))? else {
            return Ok(None);
        };

        Ok(Some(EpochStore::new(&bytes)?))
    }

    /// Returns the spans stored for `epoch` or an empty store if there are none.
    pub fn load(&self, epoch: Epoch) -> Result<EpochStore> {
        Ok(self.find(epoch)?.unwrap_or_default())
    }

    pub fn store(&self, epoch: Epoch, store: &EpochStore) -> Result<()> {
        self.db.put(Self::key(epoch), store.as_bytes())
    }

    pub fn update_span(
        &self,
        epoch: Epoch,
        validator_index: ValidatorIndex,
        span: Span,
    ) -> Result<EpochStore> {
        let store = self.load(epoch)?.set_validator_span(validator_index, span)?;
        self.store(epoch, &store)?;
        Ok(store)
    }

    #[must_use]
    pub fn contains(&self, epoch: Epoch) -> bool {
        self.db.contains_key(Self::key(epoch))
    }

    /// Returns all epochs with stored spans in ascending order.
    pub fn epochs(&self) -> Result<Vec<Epoch>> {
        self.db
            .iterator_ascending(Self::key(0)..)
            .map(|result| {
                let (key, _) = result?;

                ensure!(
                    key.len() == EPOCH_KEY_LENGTH,
                    "epoch span key has wrong length: {key:?}",
                );

                let mut bytes = [0; EPOCH_KEY_LENGTH];
                bytes.copy_from_slice(&key);
                Ok(Epoch::from_be_bytes(bytes))
            })
            .collect()
    }

    /// Deletes spans of epochs that are more than `slashing_history_limit` epochs old.
    pub fn cleanup(&self, current_epoch: Epoch) {
        let oldest_kept = current_epoch.saturating_sub(self.config.slashing_history_limit);
        let deleted = self.db.delete_range(Self::key(0)..Self::key(oldest_kept));

        if deleted > 0 {
            info!("pruned epoch spans before epoch {oldest_kept} (epochs deleted: {deleted})");
        }
    }
}
