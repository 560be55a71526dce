//! Shared test utilities for integration tests
//!
//! A scripted completion service, and serialized access to the environment
//! variables the config loader reads.

use async_trait::async_trait;
use flashgen::error::ProviderError;
use flashgen::provider::CompletionService;
use std::collections::VecDeque;
use std::sync::Mutex;
use tempfile::TempDir;

/// Completion service answering from a fixed script, recording every prompt.
pub struct ScriptedCompletion {
    replies: Mutex<VecDeque<Result<String, String>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedCompletion {
    pub fn new(replies: Vec<Result<&str, &str>>) -> Self {
        Self {
            replies: Mutex::new(
                replies
                    .into_iter()
                    .map(|r| r.map(str::to_string).map_err(str::to_string))
                    .collect(),
            ),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::new(vec![Ok(text)])
    }

    pub fn failing(message: &str) -> Self {
        Self::new(vec![Err(message)])
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionService for ScriptedCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(ProviderError::RequestFailed(message)),
            None => Err(ProviderError::Other("script exhausted".to_string())),
        }
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }
}

/// Global mutex to serialize environment variable access across all tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const TOUCHED_VARS: &[&str] = &[
    "HOME",
    "XDG_CONFIG_HOME",
    "XDG_DATA_HOME",
    "FLASHGEN_ENV",
    "FLASHGEN__GENERATION__DEFAULT_COUNT",
    "FLASHGEN__PROVIDER__MODEL",
];

/// Run `f` with HOME and XDG directories pointed into `test_dir`, restoring
/// every touched variable afterwards. `extra` sets additional variables.
pub fn with_isolated_env<F, R>(test_dir: &TempDir, extra: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let saved: Vec<(&str, Option<String>)> = TOUCHED_VARS
        .iter()
        .map(|name| (*name, std::env::var(name).ok()))
        .collect();

    let config_home = test_dir.path().join("xdg-config");
    let data_home = test_dir.path().join("xdg-data");
    let home = test_dir.path().join("home");
    std::fs::create_dir_all(&config_home).unwrap();
    std::fs::create_dir_all(&data_home).unwrap();
    std::fs::create_dir_all(&home).unwrap();

    for name in TOUCHED_VARS {
        std::env::remove_var(name);
    }
    std::env::set_var("HOME", &home);
    std::env::set_var("XDG_CONFIG_HOME", &config_home);
    std::env::set_var("XDG_DATA_HOME", &data_home);
    for (name, value) in extra {
        std::env::set_var(name, value);
    }

    let result = f();

    for (name, value) in saved {
        match value {
            Some(v) => std::env::set_var(name, v),
            None => std::env::remove_var(name),
        }
    }
    result
}
