//! Persistence layer for the Set Store

use crate::error::StorageError;
use crate::store::id::{compute_card_id, compute_set_id};
use crate::store::{SetQuery, SetStore};
use crate::types::{Card, CardId, CardRecord, CardSet, NewCardSet, SetId};
use chrono::Utc;
use std::path::Path;
use tracing::debug;

const SET_PREFIX: &str = "set:";
const CARD_PREFIX: &str = "card:";

fn set_key(set_id: &SetId) -> String {
    format!("{}{}", SET_PREFIX, set_id)
}

fn card_prefix(set_id: &SetId) -> String {
    format!("{}{}:", CARD_PREFIX, set_id)
}

// Zero-padded so lexicographic key order is position order
fn card_key(set_id: &SetId, position: u32) -> String {
    format!("{}{:010}", card_prefix(set_id), position)
}

/// Sled-based implementation of SetStore
pub struct SledSetStore {
    db: sled::Db,
}

impl SledSetStore {
    /// Open (or create) a store at the given directory.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = sled::open(path)
            .map_err(|e| StorageError::Backend(format!("Failed to open sled database: {}", e)))?;
        Ok(Self { db })
    }

    /// A store that lives only as long as this value.
    pub fn temporary() -> Result<Self, StorageError> {
        let db = sled::Config::new().temporary(true).open()?;
        Ok(Self { db })
    }

    /// Flush all pending writes to disk
    pub fn flush(&self) -> Result<(), StorageError> {
        self.db.flush()?;
        Ok(())
    }

    fn card_keys(&self, set_id: &SetId) -> Result<Vec<sled::IVec>, StorageError> {
        self.db
            .scan_prefix(card_prefix(set_id).as_bytes())
            .keys()
            .map(|key| key.map_err(StorageError::from))
            .collect()
    }
}

impl SetStore for SledSetStore {
    fn insert_set(&self, set: NewCardSet) -> Result<SetId, StorageError> {
        let created_at = Utc::now();
        let nonce = self.db.generate_id()?;
        let id = compute_set_id(&set, created_at, nonce);

        let record = CardSet {
            id: id.clone(),
            title: set.title,
            description: set.description,
            is_public: set.is_public,
            owner_id: set.owner_id,
            created_at,
        };
        let value = bincode::serialize(&record)?;
        self.db.insert(set_key(&id).as_bytes(), value)?;
        debug!(set_id = %id, "Inserted set");
        Ok(id)
    }

    fn insert_cards(&self, set_id: &SetId, cards: &[Card]) -> Result<Vec<CardId>, StorageError> {
        if !self.db.contains_key(set_key(set_id).as_bytes())? {
            return Err(StorageError::SetNotFound(set_id.clone()));
        }

        let start = self.card_keys(set_id)?.len() as u32;
        let mut batch = sled::Batch::default();
        let mut ids = Vec::with_capacity(cards.len());

        for (offset, card) in cards.iter().enumerate() {
            let position = start + offset as u32;
            let id = compute_card_id(set_id, position, card);
            let record = CardRecord {
                id: id.clone(),
                set_id: set_id.clone(),
                position,
                front: card.front.clone(),
                back: card.back.clone(),
            };
            batch.insert(card_key(set_id, position).as_bytes(), bincode::serialize(&record)?);
            ids.push(id);
        }

        self.db.apply_batch(batch)?;
        debug!(set_id = %set_id, count = ids.len(), "Inserted cards");
        Ok(ids)
    }

    fn select_sets(&self, query: &SetQuery) -> Result<Vec<CardSet>, StorageError> {
        let sets = self
            .db
            .scan_prefix(SET_PREFIX.as_bytes())
            .values()
            .map(|value| {
                let value = value?;
                Ok(bincode::deserialize::<CardSet>(&value)?)
            })
            .collect::<Result<Vec<_>, StorageError>>()?;
        Ok(query.apply(sets))
    }

    fn select_set_by_id(&self, set_id: &SetId) -> Result<Option<CardSet>, StorageError> {
        match self.db.get(set_key(set_id).as_bytes())? {
            Some(value) => Ok(Some(bincode::deserialize(&value)?)),
            None => Ok(None),
        }
    }

    fn select_cards_by_set(&self, set_id: &SetId) -> Result<Vec<CardRecord>, StorageError> {
        self.db
            .scan_prefix(card_prefix(set_id).as_bytes())
            .values()
            .map(|value| {
                let value = value?;
                Ok(bincode::deserialize::<CardRecord>(&value)?)
            })
            .collect()
    }

    fn delete_set(&self, set_id: &SetId) -> Result<bool, StorageError> {
        let key = set_key(set_id);
        let existed = self.db.contains_key(key.as_bytes())?;

        let mut batch = sled::Batch::default();
        batch.remove(key.as_bytes());
        for card_key in self.card_keys(set_id)? {
            batch.remove(card_key);
        }
        self.db.apply_batch(batch)?;
        debug!(set_id = %set_id, existed, "Deleted set");
        Ok(existed)
    }
}
