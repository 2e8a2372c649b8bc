use std::io::BufRead;
use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use qraso_config::Config;
use qraso_types::{AppEvent, Notice, UiEvent};
use tokio::sync::RwLock;

pub mod commands;
pub mod events;
pub mod render;
pub mod state;

use self::commands::Action;
use self::state::UiState;

/// Bridge blocking stdin reads onto an async channel.
///
/// The reader lives on its own thread so a pending read never holds up runtime shutdown.
fn stdin_lines() -> AsyncReceiver<String> {
    let (tx, rx) = kanal::bounded(16);
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx.to_async()
}

fn print_error(message: impl Into<String>) {
    println!("{}", render::render_notice(&Notice::error(message)));
}

/// Terminal front-end: reads commands from stdin, prints whatever the app sends back
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    config: Arc<RwLock<Config>>,
) -> anyhow::Result<()> {
    let max_rows = config.read().await.ui.max_rows;
    let mut state = UiState::new();
    let lines = stdin_lines();

    loop {
        tokio::select! {
            line = lines.recv() => {
                let Ok(line) = line else {
                    tracing::info!("[UI] stdin closed");
                    break;
                };

                let command = match commands::parse(&line) {
                    Ok(Some(command)) => command,
                    Ok(None) => continue,
                    Err(e) => {
                        print_error(e.to_string());
                        continue;
                    }
                };

                match commands::apply(command, &mut state, max_rows) {
                    Ok(Action::Send(event)) => ui_to_app_tx.send(event).await?,
                    Ok(Action::Render(text)) => println!("{text}"),
                    Ok(Action::Quit) => break,
                    Err(e) => print_error(e.to_string()),
                }
            }
            event = app_to_ui_rx.recv() => {
                let event = event?;
                if event == AppEvent::UiEvent(UiEvent::Close) {
                    break;
                }
                if let Some(text) = events::handle_events(event, &mut state, max_rows) {
                    println!("{text}");
                }
            }
        }
    }

    // Tell the backend we're gone
    if let Err(e) = ui_to_app_tx.send(AppEvent::UiEvent(UiEvent::Close)).await {
        tracing::error!("Failed to send close to app: {}", e);
    }
    Ok(())
}
