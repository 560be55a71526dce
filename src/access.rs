//! Ownership checks.

use crate::types::{CardSet, UserId};

/// True only when a user is signed in and owns the set.
pub fn can_edit(set: &CardSet, current_user: Option<&UserId>) -> bool {
    current_user.is_some_and(|user| *user == set.owner_id)
}

/// A set is visible to its owner and, when public, to everyone.
pub fn can_view(set: &CardSet, current_user: Option<&UserId>) -> bool {
    set.is_public || can_edit(set, current_user)
}
