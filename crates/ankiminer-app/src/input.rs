use std::io::BufRead;
use std::thread::{self, JoinHandle};

use kanal::AsyncSender;
use tokio_util::sync::CancellationToken;

use crate::events::{AppEvent, Command};
use crate::ui::UiEvent;

/// Read commands from stdin on a dedicated thread
///
/// End of input is sent as [`AppEvent::Quit`].
pub fn spawn_input_reader(
    ui_to_app_tx: AsyncSender<AppEvent>,
    app_to_ui_tx: AsyncSender<UiEvent>,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        read_commands(stdin.lock(), &ui_to_app_tx, &app_to_ui_tx, &cancel);
        tracing::info!("Input reader stopping");
    })
}

pub fn read_commands<R: BufRead>(
    reader: R,
    ui_to_app_tx: &AsyncSender<AppEvent>,
    app_to_ui_tx: &AsyncSender<UiEvent>,
    cancel: &CancellationToken,
) {
    for line in reader.lines() {
        if cancel.is_cancelled() {
            return;
        }

        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::error!("Failed to read input: {}", e);
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let event = match line.parse::<Command>() {
            Ok(command) => AppEvent::Command(command),
            Err(e) => {
                if let Err(e) = app_to_ui_tx.as_sync().send(UiEvent::Message(e.to_string())) {
                    tracing::error!("Failed to send input error to ui: {}", e);
                }
                continue;
            }
        };

        // Blocks while the app is busy; typed input is never dropped
        if let Err(e) = ui_to_app_tx.as_sync().send(event) {
            tracing::error!("Failed to send input to app: {}", e);
            return;
        }
    }

    if let Err(e) = ui_to_app_tx.as_sync().send(AppEvent::Quit) {
        tracing::error!("Failed to send end of input to app: {}", e);
    }
}
