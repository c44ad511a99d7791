use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use textra_overlay::{OverlaySurface, RelayBridge, RelayClient, RelayServer, UiContext};
use textra_translator::TranslationPipeline;
use textra_types::AppEvent;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::events::retranslate::relay_loop;
use crate::state::AppState;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub relay: (RelayClient, RelayServer),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app_to_ui: kanal::bounded_async(256), // overlay events and pointer bursts
            ui_to_app: kanal::bounded_async(64),  // menu clicks
            relay: RelayBridge::new(64),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Sender for menu clicks and shutdown
    pub fn app_sender(&self) -> AsyncSender<AppEvent> {
        self.channels.ui_to_app.0.clone()
    }

    /// Sender for overlay interaction
    pub fn ui_sender(&self) -> AsyncSender<AppEvent> {
        self.channels.app_to_ui.0.clone()
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    pub async fn spawn_tasks<S>(
        &self,
        pipeline: TranslationPipeline,
        surface: S,
    ) -> JoinSet<anyhow::Result<()>>
    where
        S: OverlaySurface + 'static,
    {
        let mut tasks = JoinSet::new();

        // Event loop
        tasks.spawn(event_loop(
            self.state.clone(),
            pipeline.clone(),
            self.channels.ui_to_app.1.clone(),
            self.channels.app_to_ui.0.clone(),
            self.cancel_token.child_token(),
        ));

        let languages = pipeline.translator().supported_languages();

        // Relay server
        tasks.spawn(relay_loop(
            self.channels.relay.1.clone(),
            pipeline,
            self.cancel_token.child_token(),
        ));

        // Overlay loop, everything else winds down once it returns
        let context = UiContext {
            relay: Arc::new(self.channels.relay.0.clone()),
            ui_tx: self.channels.app_to_ui.0.clone(),
            languages,
            config: self.state.config.read().await.overlay.clone(),
        };
        let rx = self.channels.app_to_ui.1.clone();
        let cancel = self.cancel_token.clone();
        tasks.spawn(async move {
            let result = textra_overlay::ui_loop(rx, context, surface).await;
            cancel.cancel();
            result
        });

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
        if let Err(e) = self.channels.app_to_ui.0.try_send(AppEvent::Shutdown) {
            tracing::debug!("Overlay loop already gone: {}", e);
        }
    }
}
