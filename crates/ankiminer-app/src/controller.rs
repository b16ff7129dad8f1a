use ankiminer_core::Storage;
use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::{AppEvent, event_loop};
use crate::input::spawn_input_reader;
use crate::state::AppState;
use crate::ui::{UiEvent, ui_loop};

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<UiEvent>, AsyncReceiver<UiEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new(capacity: usize) -> Self {
        Self {
            app_to_ui: kanal::bounded_async(capacity),
            ui_to_app: kanal::bounded_async(capacity),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(capacity: usize) -> Self {
        Self {
            channels: ChannelSet::new(capacity),
            cancel_token: CancellationToken::new(),
        }
    }

    /// Event loop (sole owner of `state`) and output loop
    pub fn spawn_tasks<S: Storage + 'static>(
        &self,
        state: AppState<S>,
    ) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Event loop
        tasks.spawn(event_loop(
            state,
            self.channels.ui_to_app.1.clone(),
            self.channels.ui_to_app.0.clone(),
            self.channels.app_to_ui.0.clone(),
            self.cancel_token.child_token(),
        ));

        // Output
        tasks.spawn(ui_loop(self.channels.app_to_ui.1.clone()));

        tasks
    }

    /// Stdin reader. Runs on its own thread so a pending read never holds up
    /// shutdown.
    pub fn spawn_input(&self) {
        spawn_input_reader(
            self.channels.ui_to_app.0.clone(),
            self.channels.app_to_ui.0.clone(),
            self.cancel_token.child_token(),
        );
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
