
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use textra_config::Preferences;
use textra_overlay::{MemorySurface, SurfaceUpdate};
use textra_translator::{
    LanguageCode, ProviderMetadata, TranslateError, Translation, TranslationPipeline, Translator,
};
use tokio::time::{sleep, timeout};

use crate::preferences::PreferenceStore;

/// Answers `to:text`, or refuses every call when `fail` is set.
/// A paragraph equal to `stall_on` never gets an answer.
#[derive(Default)]
pub struct TaggingTranslator {
    pub fail: bool,
    pub stall_on: Option<&'static str>,
    pub calls: Mutex<Vec<(String, LanguageCode, LanguageCode)>>,
}

#[async_trait]
impl Translator for TaggingTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), from.clone(), to.clone()));
        if self.stall_on.is_some_and(|stall| stall == text) {
            std::future::pending::<()>().await;
        }
        if self.fail {
            return Err(TranslateError::MissingCredentials);
        }
        Ok(Translation {
            text: format!("{to}:{text}"),
            from,
            to,
            provider: "tagging".to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Tagging".to_string(),
            requires_api_key: false,
        }
    }
}

pub fn pipeline(translator: Arc<TaggingTranslator>) -> TranslationPipeline {
    TranslationPipeline::new(translator)
}

#[derive(Default)]
pub struct MemoryPreferences {
    stored: Mutex<Option<Preferences>>,
}

impl MemoryPreferences {
    pub fn with(preferences: Preferences) -> Self {
        Self {
            stored: Mutex::new(Some(preferences)),
        }
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferences {
    async fn load(&self) -> anyhow::Result<Preferences> {
        Ok(self.stored.lock().unwrap().clone().unwrap_or_default())
    }

    async fn save(&self, preferences: &Preferences) -> anyhow::Result<()> {
        *self.stored.lock().unwrap() = Some(preferences.clone());
        Ok(())
    }
}

/// Polls the surface until `count` updates match, panics after two seconds
pub async fn wait_for<F>(surface: &MemorySurface, count: usize, matches: F) -> Vec<SurfaceUpdate>
where
    F: Fn(&SurfaceUpdate) -> bool,
{
    timeout(Duration::from_secs(2), async {
        loop {
            let found: Vec<_> = surface.updates().into_iter().filter(|u| matches(u)).collect();
            if found.len() >= count {
                return found;
            }
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("timed out waiting for surface updates")
}

/// A controller running every host task except the stdin reader
pub struct Host {
    pub controller: crate::controller::AppController,
    pub surface: MemorySurface,
    pub translator: Arc<TaggingTranslator>,
    pub tasks: tokio::task::JoinSet<anyhow::Result<()>>,
}

impl Host {
    pub async fn start(translator: TaggingTranslator, preferences: MemoryPreferences) -> Self {
        let translator = Arc::new(translator);
        let state = Arc::new(crate::state::AppState::new(
            textra_config::Config::default(),
            Arc::new(preferences),
        ));
        let controller = crate::controller::AppController::new(state);
        let surface = MemorySurface::new();
        let tasks = controller
            .spawn_tasks(pipeline(translator.clone()), surface.clone())
            .await;

        Self {
            controller,
            surface,
            translator,
            tasks,
        }
    }

    /// Stops the host and waits for every task
    pub async fn stop(mut self) {
        self.controller.shutdown();
        timeout(Duration::from_secs(2), async {
            while let Some(joined) = self.tasks.join_next().await {
                joined.unwrap().unwrap();
            }
        })
        .await
        .expect("host tasks did not stop");
    }
}
