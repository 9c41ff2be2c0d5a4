//! # Record Cache
//!
//! Maps numeric ids to creature records fetched during this session. Entries are added
//! lazily and never evicted or refreshed: a record is immutable once fetched, so the
//! first copy stays for the lifetime of the session.
//!
//! ## Join Semantics
//!
//! [`CreatureCache::resolve_many`] fetches every missing id concurrently and only
//! commits results once all of them resolved. If any fetch fails the call fails as a
//! whole and nothing from that call is cached or returned.
//!
//! [`CreatureCache::resolve_batched`] runs `resolve_many` over fixed-size chunks, one
//! chunk after another, which bounds the number of requests in flight.

use crate::error::{DexError, Result};
use crate::model::CreatureRecord;
use crate::provider::DataProvider;
use futures::future::try_join_all;
use std::collections::{HashMap, HashSet};
use tracing::debug;

#[derive(Debug, Default)]
pub struct CreatureCache {
    records: HashMap<u32, CreatureRecord>,
}

impl CreatureCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&CreatureRecord> {
        self.records.get(&id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.records.contains_key(&id)
    }

    /// Adds a record unless one with the same id is already cached.
    pub fn insert(&mut self, record: CreatureRecord) {
        self.records.entry(record.id).or_insert(record);
    }

    pub fn seed(&mut self, records: impl IntoIterator<Item = CreatureRecord>) {
        for record in records {
            self.insert(record);
        }
    }

    fn find(&self, id_or_name: &str) -> Option<&CreatureRecord> {
        match id_or_name.parse::<u32>() {
            Ok(id) => self.records.get(&id),
            Err(_) => self.records.values().find(|r| r.name == id_or_name),
        }
    }

    /// Cache-or-fetch for a single id or name.
    pub async fn fetch<P>(&mut self, provider: &P, id_or_name: &str) -> Result<CreatureRecord>
    where
        P: DataProvider + ?Sized,
    {
        if let Some(record) = self.find(id_or_name) {
            debug!(key = id_or_name, "cache hit");
            return Ok(record.clone());
        }
        let record = provider.creature(id_or_name).await?;
        self.insert(record.clone());
        Ok(record)
    }

    /// Resolves `ids` to records, in input order.
    pub async fn resolve_many<P>(&mut self, provider: &P, ids: &[u32]) -> Result<Vec<CreatureRecord>>
    where
        P: DataProvider + ?Sized,
    {
        let mut seen = HashSet::new();
        let missing: Vec<u32> = ids
            .iter()
            .copied()
            .filter(|id| !self.records.contains_key(id) && seen.insert(*id))
            .collect();

        debug!(
            requested = ids.len(),
            missing = missing.len(),
            "resolving records"
        );

        if !missing.is_empty() {
            let fetched = try_join_all(missing.iter().map(|id| async move {
                let key = id.to_string();
                provider.creature(&key).await.map(|record| (*id, record))
            }))
            .await?;

            for (requested, record) in fetched {
                if record.id != requested {
                    // Keep the requested id resolvable even if the provider redirects.
                    self.records.entry(requested).or_insert_with(|| record.clone());
                }
                self.insert(record);
            }
        }

        ids.iter()
            .map(|id| {
                self.records
                    .get(id)
                    .cloned()
                    .ok_or_else(|| DexError::not_found("Pokémon", id.to_string()))
            })
            .collect()
    }

    /// Like [`resolve_many`](Self::resolve_many), but in sequential chunks of `chunk_size`.
    pub async fn resolve_batched<P>(
        &mut self,
        provider: &P,
        ids: &[u32],
        chunk_size: usize,
    ) -> Result<Vec<CreatureRecord>>
    where
        P: DataProvider + ?Sized,
    {
        let mut out = Vec::with_capacity(ids.len());
        for (n, chunk) in ids.chunks(chunk_size.max(1)).enumerate() {
            debug!(batch = n, size = chunk.len(), "fetching detail batch");
            out.extend(self.resolve_many(provider, chunk).await?);
        }
        Ok(out)
    }
}
