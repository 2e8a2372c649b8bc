use qraso_types::{CaptureCommand, Notice};

use crate::scan_context::ScanContext;

pub async fn handle_capture_command(
    ctx: &ScanContext,
    command: CaptureCommand,
) -> anyhow::Result<()> {
    match command {
        CaptureCommand::Start => {
            let enabled = ctx.state.config.read().await.capture.enabled;
            if !enabled {
                ctx.notify(Notice::error("Scanning is disabled in this profile."))
                    .await;
                return Ok(());
            }
            ctx.capture.start();
        }
        CaptureCommand::Stop => ctx.capture.stop(),
        CaptureCommand::Flip => {
            let facing = ctx.capture.toggle_facing();
            tracing::info!("Camera facing {}", facing.constraint());
        }
    }

    ctx.event_tx.send(ctx.capture.status()).await?;
    Ok(())
}
