//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{FlashgenError, PersistenceError, ProviderError, ValidationError};

/// Map domain errors to the text printed on stderr.
///
/// Generation failures print only their stable message; the cause is logged
/// where the failure happened.
pub fn map_error(e: &FlashgenError) -> String {
    let hint = match e {
        FlashgenError::Validation(ValidationError::NotSignedIn) => {
            Some("Sign in with `flashgen login <USER_ID>`.")
        }
        FlashgenError::Validation(ValidationError::AmbiguousSetId(_)) => {
            Some("Use more characters of the id.")
        }
        FlashgenError::Validation(ValidationError::NotOwner(_)) => {
            Some("Run `flashgen whoami` to check which user is signed in.")
        }
        FlashgenError::Persistence(PersistenceError::PartialCommit { .. }) => {
            Some("Delete the empty set with `flashgen delete <SET_ID>` and try again.")
        }
        FlashgenError::Provider(ProviderError::NotConfigured(_))
        | FlashgenError::Provider(ProviderError::AuthFailed(_)) => {
            Some("Check the [provider] section of your config and the API key environment variable.")
        }
        _ => None,
    };
    match hint {
        Some(hint) => format!("Error: {}\n{}", e, hint),
        None => format!("Error: {}", e),
    }
}
