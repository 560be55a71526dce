//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::catalog::{Catalog, RECENT_PUBLIC_LIMIT};
use crate::cli::output::map_error;
use crate::cli::parse::{Commands, OutputFormat};
use crate::cli::presentation::{
    format_cards_json, format_cards_text, format_dashboard_json, format_dashboard_text,
    format_generation_notice, format_review_card, format_set_detail_json, format_set_detail_text,
    format_sets_json, format_sets_text,
};
use crate::cli::{command_name, needs_provider};
use crate::config::{ConfigLoader, FlashgenConfig, StorageConfig};
use crate::error::{FlashgenError, PersistenceError, ValidationError};
use crate::generation::{GenerationRequest, Generator};
use crate::identity::{IdentityProvider, LocalIdentity};
use crate::provider::{provider_type_slug, CompletionService};
use crate::review::ReviewSession;
use crate::store::{SetStore, SledSetStore};
use crate::types::{Card, SetId, UserId};
use crate::workflow::{generate_with_timeout, CreationWorkflow, SetDetails};
use dialoguer::{Confirm, Input, Select};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::{debug, info};

type SetWorkflow = CreationWorkflow<Arc<SledSetStore>, LocalIdentity>;
type BoxedGenerator = Generator<Box<dyn CompletionService>>;

/// One step of the interactive review loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReviewAction {
    Next,
    Previous,
    Flip,
    Quit,
}

impl ReviewAction {
    const LABELS: [&'static str; 4] = ["Next", "Previous", "Flip", "Quit"];

    fn from_index(index: usize) -> Self {
        match index {
            0 => ReviewAction::Next,
            1 => ReviewAction::Previous,
            2 => ReviewAction::Flip,
            _ => ReviewAction::Quit,
        }
    }

    /// Apply to a session; `None` ends the review.
    fn apply(self, session: ReviewSession) -> Option<ReviewSession> {
        match self {
            ReviewAction::Next => Some(session.advance()),
            ReviewAction::Previous => Some(session.retreat()),
            ReviewAction::Flip => Some(session.flip()),
            ReviewAction::Quit => None,
        }
    }
}

/// Choices offered after cards are generated in `create`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DraftAction {
    Save,
    Edit,
    Regenerate,
    Cancel,
}

impl DraftAction {
    const LABELS: [&'static str; 4] = ["Save set", "Edit a card", "Regenerate all", "Cancel"];

    fn from_index(index: usize) -> Self {
        match index {
            0 => DraftAction::Save,
            1 => DraftAction::Edit,
            2 => DraftAction::Regenerate,
            _ => DraftAction::Cancel,
        }
    }
}

fn input_error(e: dialoguer::Error) -> FlashgenError {
    FlashgenError::Input(e.to_string())
}

fn runtime() -> Result<Runtime, FlashgenError> {
    Runtime::new()
        .map_err(|e| FlashgenError::Config(format!("Failed to create async runtime: {}", e)))
}

/// Runtime context for CLI execution: resolved config, data directory and the set store.
pub struct RunContext {
    config: FlashgenConfig,
    data_dir: PathBuf,
    store: Arc<SledSetStore>,
}

impl RunContext {
    /// Create run context from workspace root, optional config path and
    /// optional data directory override. Uses ConfigLoader only.
    pub fn new(
        workspace_root: &Path,
        config_path: Option<&Path>,
        data_dir: Option<PathBuf>,
    ) -> Result<Self, FlashgenError> {
        let mut config = ConfigLoader::resolve(workspace_root, config_path)?;
        if data_dir.is_some() {
            config.storage.data_dir = data_dir;
        }
        let data_dir = config.storage.resolve_data_dir(workspace_root);
        Self::from_parts(config, data_dir)
    }

    /// Open the store under `data_dir` with an already-loaded config.
    pub fn from_parts(config: FlashgenConfig, data_dir: PathBuf) -> Result<Self, FlashgenError> {
        config.ensure_valid()?;
        std::fs::create_dir_all(&data_dir).map_err(crate::error::StorageError::from)?;
        let store = SledSetStore::new(StorageConfig::database_path(&data_dir))?;
        debug!(data_dir = %data_dir.display(), "Opened set store");
        Ok(Self {
            config,
            data_dir,
            store: Arc::new(store),
        })
    }

    pub fn config(&self) -> &FlashgenConfig {
        &self.config
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn identity(&self) -> LocalIdentity {
        LocalIdentity::new(&self.data_dir)
    }

    fn catalog(&self) -> Catalog<Arc<SledSetStore>> {
        Catalog::new(Arc::clone(&self.store))
    }

    fn generator(&self) -> Result<BoxedGenerator, FlashgenError> {
        Ok(Generator::new(self.config.completion_client()?))
    }

    fn requested_count(&self, count: Option<i64>) -> i64 {
        count.unwrap_or(i64::from(self.config.generation.default_count))
    }

    fn require_user(&self) -> Result<UserId, FlashgenError> {
        Ok(self
            .identity()
            .current_user_id()
            .ok_or(ValidationError::NotSignedIn)?)
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, FlashgenError> {
        info!(command = command_name(command), "Executing command");
        if needs_provider(command) {
            debug!(
                provider = provider_type_slug(self.config.provider.provider_type),
                model = %self.config.provider.model,
                "Using provider"
            );
        }
        let result = self.execute_inner(command);
        self.store.flush()?;
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, FlashgenError> {
        match command {
            Commands::Generate {
                topic,
                count,
                format,
            } => self.handle_generate(topic, *count, *format),
            Commands::Create {
                title,
                description,
                public,
                topic,
                count,
                yes,
            } => self.handle_create(
                SetDetails {
                    title: title.clone(),
                    description: description.clone(),
                    is_public: *public,
                },
                topic,
                *count,
                *yes,
            ),
            Commands::List { format } => self.handle_list(*format),
            Commands::Public {
                search,
                limit,
                format,
            } => self.handle_public(search.as_deref(), *limit, *format),
            Commands::Show { set_id, format } => self.handle_show(set_id, *format),
            Commands::Review { set_id } => self.handle_review(set_id),
            Commands::Delete { set_id, force } => self.handle_delete(set_id, *force),
            Commands::Login { user_id } => {
                let user = self.identity().sign_in(user_id)?;
                Ok(format!("Signed in as {}", user))
            }
            Commands::Logout => {
                self.identity().sign_out()?;
                Ok("Signed out".to_string())
            }
            Commands::Whoami => Ok(match self.identity().current_user_id() {
                Some(user) => format!("Signed in as {}", user),
                None => "Not signed in".to_string(),
            }),
        }
    }

    fn handle_generate(
        &self,
        topic: &str,
        count: Option<i64>,
        format: OutputFormat,
    ) -> Result<String, FlashgenError> {
        let request = GenerationRequest::new(topic, self.requested_count(count))?;
        let generator = self.generator()?;
        let cards = runtime()?.block_on(generate_with_timeout(
            &generator,
            &request,
            self.config.generation.timeout(),
        ))?;

        match format {
            OutputFormat::Json => format_cards_json(&request, &cards),
            OutputFormat::Text => Ok(format!(
                "{}\n{}",
                format_generation_notice(&request, cards.len()),
                format_cards_text(&cards)
            )),
        }
    }

    fn handle_create(
        &self,
        details: SetDetails,
        topic: &str,
        count: Option<i64>,
        yes: bool,
    ) -> Result<String, FlashgenError> {
        if details.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        // Fail before spending a generation call
        self.require_user()?;

        let count = self.requested_count(count);
        let generator = self.generator()?;
        let rt = runtime()?;
        let mut workflow: SetWorkflow = CreationWorkflow::new(
            Arc::clone(&self.store),
            self.identity(),
            self.config.generation.timeout(),
        );

        let attempt = rt.block_on(workflow.generate(&generator, topic, count))?;
        let request = attempt.request.clone();
        let received = attempt.into_result()?;
        eprintln!("{}", format_generation_notice(&request, received));

        let title = details.title.trim().to_string();
        let committed = if yes {
            let cards = workflow.buffer().len();
            workflow.commit(details).map(|set_id| (set_id, cards))
        } else {
            match self.draft_loop(&mut workflow, &generator, &rt, topic, count, &details) {
                Ok(Some(saved)) => Ok(saved),
                Ok(None) => return Ok("Cancelled; nothing was saved".to_string()),
                Err(e) => Err(e),
            }
        };

        match committed {
            Ok((set_id, cards)) => Ok(saved_message(&title, cards, &set_id)),
            Err(FlashgenError::Persistence(PersistenceError::PartialCommit { set_id, source }))
                if !yes =>
            {
                eprintln!("Set {} was created but its cards were not saved: {}", set_id.short(), source);
                let retry = Confirm::new()
                    .with_prompt("Retry saving the cards?")
                    .default(true)
                    .interact()
                    .map_err(input_error)?;
                if retry {
                    let cards = workflow.buffer().len();
                    workflow.retry_cards(&set_id)?;
                    Ok(saved_message(&title, cards, &set_id))
                } else {
                    workflow.abandon(&set_id)?;
                    Ok("Removed the incomplete set; nothing was saved".to_string())
                }
            }
            Err(e) => Err(e),
        }
    }

    /// Show the draft until the user saves it or cancels.
    ///
    /// Returns the saved set id and card count, or `None` on cancel.
    fn draft_loop(
        &self,
        workflow: &mut SetWorkflow,
        generator: &BoxedGenerator,
        rt: &Runtime,
        topic: &str,
        count: i64,
        details: &SetDetails,
    ) -> Result<Option<(SetId, usize)>, FlashgenError> {
        loop {
            println!("{}", format_cards_text(workflow.buffer().cards()));
            let choice = Select::new()
                .with_prompt("What next?")
                .items(&DraftAction::LABELS[..])
                .default(0)
                .interact()
                .map_err(input_error)?;

            match DraftAction::from_index(choice) {
                DraftAction::Save => match try_save(workflow, details)? {
                    SaveOutcome::Saved { set_id, cards } => return Ok(Some((set_id, cards))),
                    SaveOutcome::Editable(e) => eprintln!("{}", map_error(&e)),
                },
                DraftAction::Cancel => return Ok(None),
                DraftAction::Edit => edit_card(workflow)?,
                DraftAction::Regenerate => {
                    let attempt = rt.block_on(workflow.generate(generator, topic, count))?;
                    let request = attempt.request.clone();
                    match attempt.into_result() {
                        Ok(received) => {
                            eprintln!("{}", format_generation_notice(&request, received))
                        }
                        // Previous cards stay in the draft
                        Err(e) => eprintln!("{}", map_error(&e)),
                    }
                }
            }
        }
    }

    fn handle_list(&self, format: OutputFormat) -> Result<String, FlashgenError> {
        let user = self.require_user()?;
        let catalog = self.catalog();
        let mine = catalog.my_sets(&user)?;
        let recent = catalog.recent_public(Some(&user), RECENT_PUBLIC_LIMIT)?;
        match format {
            OutputFormat::Json => format_dashboard_json(&mine, &recent),
            OutputFormat::Text => Ok(format_dashboard_text(&mine, &recent)),
        }
    }

    fn handle_public(
        &self,
        search: Option<&str>,
        limit: Option<usize>,
        format: OutputFormat,
    ) -> Result<String, FlashgenError> {
        let catalog = self.catalog();
        let sets = match search {
            Some(needle) => {
                let mut found = catalog.search_public(needle)?;
                if let Some(limit) = limit {
                    found.truncate(limit);
                }
                found
            }
            None => {
                let viewer = self.identity().current_user_id();
                catalog.recent_public(viewer.as_ref(), limit.unwrap_or(RECENT_PUBLIC_LIMIT))?
            }
        };
        match format {
            OutputFormat::Json => format_sets_json(&sets),
            OutputFormat::Text => Ok(format_sets_text(&sets, "No matching public sets.")),
        }
    }

    fn handle_show(&self, raw_id: &str, format: OutputFormat) -> Result<String, FlashgenError> {
        let viewer = self.identity().current_user_id();
        let catalog = self.catalog();
        let set_id = catalog.resolve_id(raw_id, viewer.as_ref())?;
        let opened = catalog.open(&set_id, viewer.as_ref())?;
        let cards: Vec<Card> = opened
            .session
            .as_ref()
            .map(|session| session.cards().to_vec())
            .unwrap_or_default();
        match format {
            OutputFormat::Json => format_set_detail_json(&opened.set, &cards, opened.can_edit),
            OutputFormat::Text => Ok(format_set_detail_text(&opened.set, &cards, opened.can_edit)),
        }
    }

    fn handle_review(&self, raw_id: &str) -> Result<String, FlashgenError> {
        let viewer = self.identity().current_user_id();
        let catalog = self.catalog();
        let set_id = catalog.resolve_id(raw_id, viewer.as_ref())?;
        let opened = catalog.open(&set_id, viewer.as_ref())?;
        let Some(mut session) = opened.session else {
            return Ok(format!("\"{}\" has no cards to review", opened.set.title));
        };

        loop {
            println!("{}", format_review_card(&session));
            // Flip is the natural next step on a front face, Next on a back face
            let default = if session.showing_front() { 2 } else { 0 };
            let choice = Select::new()
                .items(&ReviewAction::LABELS[..])
                .default(default)
                .interact()
                .map_err(input_error)?;
            match ReviewAction::from_index(choice).apply(session.clone()) {
                Some(next) => session = next,
                None => break,
            }
        }
        Ok(format!(
            "Finished reviewing \"{}\" at card {}",
            opened.set.title,
            session.progress_label()
        ))
    }

    fn handle_delete(&self, raw_id: &str, force: bool) -> Result<String, FlashgenError> {
        let user = self.require_user()?;
        let catalog = self.catalog();
        let set_id = catalog.resolve_id(raw_id, Some(&user))?;
        let title = self
            .store
            .select_set_by_id(&set_id)?
            .map(|set| set.title)
            .unwrap_or_default();

        if !force {
            let confirmed = Confirm::new()
                .with_prompt(format!("Delete \"{}\" and all of its cards?", title))
                .interact()
                .map_err(input_error)?;
            if !confirmed {
                return Ok("Deletion cancelled".to_string());
            }
        }

        catalog.delete(&set_id, Some(&user))?;
        Ok(format!("Deleted \"{}\"", title))
    }
}

/// Pick one draft card and replace both of its sides.
fn edit_card(workflow: &mut SetWorkflow) -> Result<(), FlashgenError> {
    let labels: Vec<String> = workflow
        .buffer()
        .cards()
        .iter()
        .enumerate()
        .map(|(i, card)| format!("{}. {}", i + 1, card.front))
        .collect();
    let index = Select::new()
        .with_prompt("Card to edit")
        .items(&labels[..])
        .default(0)
        .interact()
        .map_err(input_error)?;

    let current = workflow.buffer().cards()[index].clone();
    let front: String = Input::new()
        .with_prompt("Front")
        .with_initial_text(current.front)
        .interact_text()
        .map_err(input_error)?;
    let back: String = Input::new()
        .with_prompt("Back")
        .with_initial_text(current.back)
        .interact_text()
        .map_err(input_error)?;

    workflow.buffer_mut().replace(index, Card::new(front, back))?;
    Ok(())
}

/// Result of a save attempt from the draft loop.
#[derive(Debug)]
enum SaveOutcome {
    Saved { set_id: SetId, cards: usize },
    /// The draft failed validation and stays open for editing.
    Editable(FlashgenError),
}

/// Commit the draft. Validation failures keep the draft; other errors propagate.
fn try_save<S: SetStore, I: IdentityProvider>(
    workflow: &mut CreationWorkflow<S, I>,
    details: &SetDetails,
) -> Result<SaveOutcome, FlashgenError> {
    let cards = workflow.buffer().len();
    match workflow.commit(details.clone()) {
        Ok(set_id) => Ok(SaveOutcome::Saved { set_id, cards }),
        Err(e @ FlashgenError::Validation(_)) => Ok(SaveOutcome::Editable(e)),
        Err(e) => Err(e),
    }
}

fn saved_message(title: &str, cards: usize, set_id: &SetId) -> String {
    format!("Saved \"{}\" with {} cards\nID: {}", title, cards, set_id)
}
