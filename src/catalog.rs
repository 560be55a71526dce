//! Catalog: read-side queries behind the dashboard, the public listing and the viewer.

use crate::access;
use crate::error::{FlashgenError, StorageError, ValidationError};
use crate::review::ReviewSession;
use crate::store::{SetQuery, SetStore, SortOrder};
use crate::types::{Card, CardSet, SetId, UserId};

/// How many public sets the dashboard shows next to the user's own.
pub const RECENT_PUBLIC_LIMIT: usize = 5;

/// A set opened for viewing. `session` is `None` when the set has no cards.
#[derive(Debug, Clone)]
pub struct OpenedSet {
    pub set: CardSet,
    pub session: Option<ReviewSession>,
    pub can_edit: bool,
}

pub struct Catalog<S> {
    store: S,
}

impl<S: SetStore> Catalog<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The user's own sets, newest first.
    pub fn my_sets(&self, user: &UserId) -> Result<Vec<CardSet>, StorageError> {
        self.store.select_sets(&SetQuery::owned_by(user.clone()))
    }

    /// Newest public sets from other users.
    pub fn recent_public(
        &self,
        exclude: Option<&UserId>,
        limit: usize,
    ) -> Result<Vec<CardSet>, StorageError> {
        let mut query = SetQuery::public().limit(limit);
        if let Some(user) = exclude {
            query = query.excluding(user.clone());
        }
        self.store.select_sets(&query)
    }

    /// Public sets whose title or description contains `needle`, ignoring case.
    pub fn search_public(&self, needle: &str) -> Result<Vec<CardSet>, StorageError> {
        let sets = self
            .store
            .select_sets(&SetQuery::public().order(SortOrder::NewestFirst))?;
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(sets);
        }
        Ok(sets
            .into_iter()
            .filter(|set| {
                set.title.to_lowercase().contains(&needle)
                    || set.description.to_lowercase().contains(&needle)
            })
            .collect())
    }

    /// Load a set and its cards for review.
    ///
    /// Private sets of other users are reported as not found.
    pub fn open(&self, set_id: &SetId, viewer: Option<&UserId>) -> Result<OpenedSet, FlashgenError> {
        let set = self
            .store
            .select_set_by_id(set_id)?
            .filter(|set| access::can_view(set, viewer))
            .ok_or_else(|| StorageError::SetNotFound(set_id.clone()))?;
        let cards: Vec<Card> = self
            .store
            .select_cards_by_set(set_id)?
            .iter()
            .map(|record| record.card())
            .collect();
        let can_edit = access::can_edit(&set, viewer);
        Ok(OpenedSet {
            set,
            session: ReviewSession::new(cards),
            can_edit,
        })
    }

    /// Resolve a full id or a unique prefix among the sets `viewer` can see.
    pub fn resolve_id(&self, raw: &str, viewer: Option<&UserId>) -> Result<SetId, FlashgenError> {
        if let Some(id) = SetId::parse(raw) {
            return Ok(id);
        }
        let prefix = raw.trim().to_ascii_lowercase();
        if prefix.is_empty() {
            return Err(ValidationError::UnknownSetId(raw.to_string()).into());
        }
        let mut candidates = self
            .store
            .select_sets(&SetQuery::default())?
            .into_iter()
            .filter(|set| access::can_view(set, viewer))
            .filter(|set| set.id.as_str().starts_with(&prefix))
            .map(|set| set.id);
        match (candidates.next(), candidates.next()) {
            (Some(id), None) => Ok(id),
            (None, _) => Err(ValidationError::UnknownSetId(prefix).into()),
            (Some(_), Some(_)) => Err(ValidationError::AmbiguousSetId(prefix).into()),
        }
    }

    /// Delete a set. Only its owner may do so.
    pub fn delete(&self, set_id: &SetId, user: Option<&UserId>) -> Result<(), FlashgenError> {
        let set = self
            .store
            .select_set_by_id(set_id)?
            .ok_or_else(|| StorageError::SetNotFound(set_id.clone()))?;
        if !access::can_edit(&set, user) {
            return Err(ValidationError::NotOwner(set_id.clone()).into());
        }
        self.store.delete_set(set_id)?;
        Ok(())
    }
}
