//! Create a set from generated cards, persist it, find it again and review it.

use super::test_utils::ScriptedCompletion;
use flashgen::buffer::ApplyOutcome;
use flashgen::catalog::{Catalog, RECENT_PUBLIC_LIMIT};
use flashgen::cli::{Commands, OutputFormat, RunContext};
use flashgen::config::FlashgenConfig;
use flashgen::error::{FlashgenError, StorageError, ValidationError};
use flashgen::generation::Generator;
use flashgen::identity::{IdentityProvider, LocalIdentity, StaticIdentity};
use flashgen::store::{SetStore, SledSetStore};
use flashgen::types::{Card, UserId};
use flashgen::workflow::{CreationWorkflow, SetDetails};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

const CELLS: &str = r#"[{"front":"Powerhouse of the cell?","back":"Mitochondria"},{"front":"Site of photosynthesis?","back":"Chloroplast"}]"#;

fn details(title: &str, is_public: bool) -> SetDetails {
    SetDetails {
        title: title.to_string(),
        description: format!("{} description", title),
        is_public,
    }
}

#[tokio::test]
async fn test_generate_edit_commit_then_review() {
    let temp = TempDir::new().unwrap();
    let store = Arc::new(SledSetStore::new(temp.path().join("sets.db")).unwrap());
    let generator = Generator::new(ScriptedCompletion::replying(CELLS));
    let mut workflow = CreationWorkflow::new(
        Arc::clone(&store),
        StaticIdentity::signed_in("alice"),
        Duration::from_secs(5),
    );

    let attempt = workflow.generate(&generator, "Cell biology", 2).await.unwrap();
    assert_eq!(attempt.outcome, ApplyOutcome::Applied(2));

    workflow
        .buffer_mut()
        .edit_back(1, "Chloroplasts (in plant cells)")
        .unwrap();
    let set_id = workflow.commit(details("Cells", false)).unwrap();
    assert!(workflow.buffer().is_empty());

    let catalog = Catalog::new(Arc::clone(&store));
    let alice = UserId::new("alice");
    let opened = catalog.open(&set_id, Some(&alice)).unwrap();
    assert!(opened.can_edit);
    assert_eq!(opened.set.title, "Cells");

    let session = opened.session.unwrap();
    assert_eq!(session.current().text(), "Powerhouse of the cell?");
    let session = session.advance().flip();
    assert_eq!(session.current().text(), "Chloroplasts (in plant cells)");
}

#[tokio::test]
async fn test_failed_generation_keeps_buffer_and_commit_needs_cards() {
    let temp = TempDir::new().unwrap();
    let store = SledSetStore::new(temp.path().join("sets.db")).unwrap();
    let generator = Generator::new(ScriptedCompletion::replying("not json"));
    let mut workflow =
        CreationWorkflow::new(store, StaticIdentity::signed_in("alice"), Duration::from_secs(5));

    let attempt = workflow.generate(&generator, "Rome", 3).await.unwrap();
    assert!(matches!(attempt.outcome, ApplyOutcome::Failed(_)));
    assert!(attempt.into_result().is_err());

    let err = workflow.commit(details("Rome", true)).unwrap_err();
    assert!(matches!(
        err,
        FlashgenError::Validation(ValidationError::EmptyBuffer)
    ));
    assert!(workflow
        .store()
        .select_sets(&Default::default())
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_anonymous_user_cannot_commit() {
    let temp = TempDir::new().unwrap();
    let store = SledSetStore::new(temp.path().join("sets.db")).unwrap();
    let generator = Generator::new(ScriptedCompletion::replying(CELLS));
    let mut workflow =
        CreationWorkflow::new(store, StaticIdentity::anonymous(), Duration::from_secs(5));

    workflow.generate(&generator, "Cells", 2).await.unwrap();
    let err = workflow.commit(details("Cells", false)).unwrap_err();
    assert!(matches!(
        err,
        FlashgenError::Validation(ValidationError::NotSignedIn)
    ));
    // Nothing was written and the draft survives
    assert_eq!(workflow.buffer().len(), 2);
}

#[test]
fn test_public_listing_and_privacy() {
    let temp = TempDir::new().unwrap();
    let store = Arc::new(SledSetStore::new(temp.path().join("sets.db")).unwrap());

    let mut alice = CreationWorkflow::new(
        Arc::clone(&store),
        StaticIdentity::signed_in("alice"),
        Duration::from_secs(5),
    );
    alice.buffer_mut().replace_all(vec![Card::new("Q", "A")]);
    let private_id = alice.commit(details("Alice private", false)).unwrap();
    alice.buffer_mut().replace_all(vec![Card::new("Q", "A")]);
    alice.commit(details("Alice shared", true)).unwrap();

    let catalog = Catalog::new(Arc::clone(&store));
    let bob = UserId::new("bob");

    let public = catalog.recent_public(Some(&bob), RECENT_PUBLIC_LIMIT).unwrap();
    assert_eq!(public.len(), 1);
    assert_eq!(public[0].title, "Alice shared");
    assert!(catalog
        .recent_public(Some(&UserId::new("alice")), RECENT_PUBLIC_LIMIT)
        .unwrap()
        .is_empty());

    let err = catalog.open(&private_id, Some(&bob)).unwrap_err();
    assert!(matches!(
        err,
        FlashgenError::Storage(StorageError::SetNotFound(_))
    ));
    assert_eq!(catalog.my_sets(&UserId::new("alice")).unwrap().len(), 2);
}

#[test]
fn test_run_context_commands_share_data_dir() {
    let temp = TempDir::new().unwrap();
    let data_dir = temp.path().join("data");
    let ctx = RunContext::from_parts(FlashgenConfig::default(), data_dir.clone()).unwrap();

    ctx.execute(&Commands::Login {
        user_id: "carol".to_string(),
    })
    .unwrap();
    assert_eq!(
        LocalIdentity::new(&data_dir).current_user_id(),
        Some(UserId::new("carol"))
    );

    let listing = ctx
        .execute(&Commands::List {
            format: OutputFormat::Json,
        })
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&listing).unwrap();
    assert_eq!(value["mine"].as_array().unwrap().len(), 0);

    let public = ctx
        .execute(&Commands::Public {
            search: Some("anything".to_string()),
            limit: None,
            format: OutputFormat::Text,
        })
        .unwrap();
    assert_eq!(public, "No matching public sets.");
}
