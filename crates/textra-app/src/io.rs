use std::io::Write;

use kanal::AsyncSender;
use textra_overlay::{OverlaySurface, SurfaceUpdate};
use textra_types::{AppEvent, HostInput};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::sync::CancellationToken;

/// Reads host input lines and routes them: menu clicks to the event loop,
/// overlay interaction straight to the overlay loop. EOF requests shutdown.
pub async fn input_io<R>(
    reader: R,
    app_tx: AsyncSender<AppEvent>,
    ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();

    loop {
        let line = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Input reader stopping");
                return Ok(());
            }
            line = lines.next_line() => line?,
        };

        let Some(line) = line else {
            tracing::info!("Input closed, shutting down");
            app_tx.send(AppEvent::Shutdown).await?;
            return Ok(());
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let input: HostInput = match serde_json::from_str(line) {
            Ok(input) => input,
            Err(e) => {
                tracing::warn!("Skipping unreadable input line: {}", e);
                continue;
            }
        };

        let for_app = matches!(input, HostInput::MenuClick(_));
        let event = AppEvent::from(input);
        if for_app {
            app_tx.send(event).await?;
        } else {
            ui_tx.send(event).await?;
        }
    }
}

/// Writes surface updates as JSON lines
pub struct JsonLinesSurface<W> {
    out: W,
}

impl<W: Write + Send> JsonLinesSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl JsonLinesSurface<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> OverlaySurface for JsonLinesSurface<W> {
    fn apply(&mut self, update: SurfaceUpdate) -> anyhow::Result<()> {
        serde_json::to_writer(&mut self.out, &update)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}
