use core::ops::{Range, RangeFrom};
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Result;
use im::OrdMap;
use snap::raw::{Decoder, Encoder};
use unwrap_none::UnwrapNone as _;

// Keys and values are shared between snapshots of the map, so they should be cheap to clone.
// This disqualifies `Vec<u8>` and `Box<[u8]>`.
type Map = OrdMap<Arc<[u8]>, Arc<[u8]>>;

/// Ordered key-value store with Snappy-compressed values.
///
/// Every mutation builds a new version of the map and swaps it in once complete,
/// so iterators keep seeing the version they were created from.
#[derive(Default)]
pub struct Database {
    map: Mutex<Map>,
}

impl Database {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains_key(&self, key: impl AsRef<[u8]>) -> bool {
        self.map().contains_key(key.as_ref())
    }

    pub fn get(&self, key: impl AsRef<[u8]>) -> Result<Option<Vec<u8>>> {
        self.map()
            .get(key.as_ref())
            .map(|compressed| decompress(compressed))
            .transpose()
    }

    pub fn put(&self, key: impl AsRef<[u8]>, value: impl AsRef<[u8]>) -> Result<()> {
        self.put_batch(core::iter::once((key, value)))
    }

    pub fn put_batch(
        &self,
        pairs: impl IntoIterator<Item = (impl AsRef<[u8]>, impl AsRef<[u8]>)>,
    ) -> Result<()> {
        let mut map = self.map();
        let mut new_map = map.clone();

        for (key, value) in pairs {
            let compressed = compress(value.as_ref())?;
            new_map.insert(key.as_ref().into(), compressed.into());
        }

        *map = new_map;

        Ok(())
    }

    pub fn delete(&self, key: impl AsRef<[u8]>) {
        self.map().remove(key.as_ref());
    }

    /// Deletes all keys in `range` and returns the number of deleted keys.
    pub fn delete_range(&self, range: Range<impl AsRef<[u8]>>) -> usize {
        let start = range.start.as_ref();
        let end = range.end.as_ref();

        let mut map = self.map();

        // `OrdMap::split` discards the key it splits on.
        // The start of the range is deleted along with it, but the end must be kept.
        let end_pair = map.get_key_value(end);
        let (below, _) = map.split(start);
        let (_, above) = map.split(end);

        let mut new_map = below.union(above);

        if let Some((key, value)) = end_pair {
            new_map
                .insert(Arc::clone(key), Arc::clone(value))
                .expect_none("end_pair should have been discarded by OrdMap::split");
        }

        let deleted = map.len() - new_map.len();

        *map = new_map;

        deleted
    }

    /// Returns pairs with keys in `range` in ascending order of keys.
    ///
    /// The iterator is not affected by mutations made after this returns.
    pub fn iterator_ascending(
        &self,
        range: RangeFrom<impl AsRef<[u8]>>,
    ) -> impl Iterator<Item = Result<(Vec<u8>, Vec<u8>)>> {
        let start = range.start.as_ref();

        let map = self.map();
        let start_pair = map.get_key_value(start);
        let (_, mut above) = map.split(start);

        if let Some((key, value)) = start_pair {
            above
                .insert(Arc::clone(key), Arc::clone(value))
                .expect_none("start_pair should have been discarded by OrdMap::split");
        }

        above
            .into_iter()
            .map(|(key, value)| Ok((key.to_vec(), decompress(&value)?)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map().is_empty()
    }

    fn map(&self) -> MutexGuard<'_, Map> {
        self.map.lock().expect("in-memory database mutex is poisoned")
    }
}

fn compress(data: &[u8]) -> Result<Vec<u8>> {
    Encoder::new().compress_vec(data).map_err(Into::into)
}

fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    Decoder::new().decompress_vec(data).map_err(Into::into)
}
