//! Set Store
//!
//! Persistence for card sets and their cards. The creation workflow, the
//! catalog and the CLI only see the `SetStore` trait; `SledSetStore` is the
//! on-disk implementation.

pub mod id;
pub mod persistence;

pub use persistence::SledSetStore;

use crate::error::StorageError;
use crate::types::{Card, CardId, CardRecord, CardSet, NewCardSet, SetId, UserId};

/// Ordering by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    OldestFirst,
    #[default]
    NewestFirst,
}

/// Filter, order and limit for set listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetQuery {
    pub owner: Option<UserId>,
    pub exclude_owner: Option<UserId>,
    pub public_only: bool,
    pub order: SortOrder,
    pub limit: Option<usize>,
}

impl SetQuery {
    pub fn owned_by(owner: UserId) -> Self {
        Self {
            owner: Some(owner),
            ..Self::default()
        }
    }

    pub fn public() -> Self {
        Self {
            public_only: true,
            ..Self::default()
        }
    }

    pub fn excluding(mut self, owner: UserId) -> Self {
        self.exclude_owner = Some(owner);
        self
    }

    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, set: &CardSet) -> bool {
        if self.public_only && !set.is_public {
            return false;
        }
        if let Some(owner) = &self.owner {
            if &set.owner_id != owner {
                return false;
            }
        }
        if let Some(excluded) = &self.exclude_owner {
            if &set.owner_id == excluded {
                return false;
            }
        }
        true
    }

    /// Filter, sort and truncate an unordered collection of sets.
    pub fn apply(&self, sets: impl IntoIterator<Item = CardSet>) -> Vec<CardSet> {
        let mut selected: Vec<CardSet> = sets.into_iter().filter(|s| self.matches(s)).collect();
        selected.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        if self.order == SortOrder::NewestFirst {
            selected.reverse();
        }
        if let Some(limit) = self.limit {
            selected.truncate(limit);
        }
        selected
    }
}

/// Storage collaborator for sets and cards.
pub trait SetStore: Send + Sync {
    /// Create a set with no cards and return its id.
    fn insert_set(&self, set: NewCardSet) -> Result<SetId, StorageError>;

    /// Append cards to an existing set, all or nothing.
    fn insert_cards(&self, set_id: &SetId, cards: &[Card]) -> Result<Vec<CardId>, StorageError>;

    fn select_sets(&self, query: &SetQuery) -> Result<Vec<CardSet>, StorageError>;

    fn select_set_by_id(&self, set_id: &SetId) -> Result<Option<CardSet>, StorageError>;

    /// Cards of a set in insertion order.
    fn select_cards_by_set(&self, set_id: &SetId) -> Result<Vec<CardRecord>, StorageError>;

    /// Remove a set and its cards. Returns whether the set existed.
    fn delete_set(&self, set_id: &SetId) -> Result<bool, StorageError>;
}

impl<S: SetStore + ?Sized> SetStore for std::sync::Arc<S> {
    fn insert_set(&self, set: NewCardSet) -> Result<SetId, StorageError> {
        (**self).insert_set(set)
    }

    fn insert_cards(&self, set_id: &SetId, cards: &[Card]) -> Result<Vec<CardId>, StorageError> {
        (**self).insert_cards(set_id, cards)
    }

    fn select_sets(&self, query: &SetQuery) -> Result<Vec<CardSet>, StorageError> {
        (**self).select_sets(query)
    }

    fn select_set_by_id(&self, set_id: &SetId) -> Result<Option<CardSet>, StorageError> {
        (**self).select_set_by_id(set_id)
    }

    fn select_cards_by_set(&self, set_id: &SetId) -> Result<Vec<CardRecord>, StorageError> {
        (**self).select_cards_by_set(set_id)
    }

    fn delete_set(&self, set_id: &SetId) -> Result<bool, StorageError> {
        (**self).delete_set(set_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn set(n: u8, owner: &str, is_public: bool) -> CardSet {
        CardSet {
            id: SetId::from_digest(&[n; 32]),
            title: format!("Set {}", n),
            description: String::new(),
            is_public,
            owner_id: UserId::new(owner),
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
                + Duration::minutes(i64::from(n)),
        }
    }

    #[test]
    fn test_owner_query_newest_first() {
        let sets = vec![set(1, "alice", false), set(2, "bob", true), set(3, "alice", true)];
        let result = SetQuery::owned_by(UserId::new("alice")).apply(sets);
        let titles: Vec<_> = result.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Set 3", "Set 1"]);
    }

    #[test]
    fn test_public_excluding_owner_with_limit() {
        let sets = vec![
            set(1, "bob", true),
            set(2, "carol", true),
            set(3, "alice", true),
            set(4, "dave", false),
            set(5, "erin", true),
        ];
        let result = SetQuery::public()
            .excluding(UserId::new("alice"))
            .limit(2)
            .apply(sets);
        let titles: Vec<_> = result.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Set 5", "Set 2"]);
    }

    #[test]
    fn test_oldest_first_order() {
        let sets = vec![set(2, "a", true), set(1, "a", true)];
        let result = SetQuery::public().order(SortOrder::OldestFirst).apply(sets);
        assert_eq!(result[0].title, "Set 1");
    }
}
