use async_trait::async_trait;
use kanal::{AsyncReceiver, AsyncSender};
use textra_types::{RelayError, RelayMessage};
use tokio::sync::oneshot;

/// Round trip from an overlay to whoever owns the translation pipeline
#[async_trait]
pub trait Relay: Send + Sync {
    async fn request(&self, message: RelayMessage) -> Result<String, RelayError>;
}

/// A relay message waiting for its answer
pub struct RelayRequest {
    pub message: RelayMessage,
    reply: oneshot::Sender<String>,
}

impl RelayRequest {
    pub fn respond(self, text: String) {
        if self.reply.send(text).is_err() {
            tracing::debug!("Relay caller went away before the reply");
        }
    }
}

/// Overlay side of the bridge
#[derive(Clone)]
pub struct RelayClient {
    tx: AsyncSender<RelayRequest>,
}

/// Background side of the bridge
#[derive(Clone)]
pub struct RelayServer {
    rx: AsyncReceiver<RelayRequest>,
}

pub struct RelayBridge;

impl RelayBridge {
    pub fn new(capacity: usize) -> (RelayClient, RelayServer) {
        let (tx, rx) = kanal::bounded_async(capacity);
        (RelayClient { tx }, RelayServer { rx })
    }
}

#[async_trait]
impl Relay for RelayClient {
    async fn request(&self, message: RelayMessage) -> Result<String, RelayError> {
        let (reply, answer) = oneshot::channel();
        self.tx
            .send(RelayRequest { message, reply })
            .await
            .map_err(|_| RelayError::Closed)?;
        answer.await.map_err(|_| RelayError::NoReply)
    }
}

impl RelayServer {
    /// Next pending request, `None` once every client is gone
    pub async fn recv(&self) -> Option<RelayRequest> {
        self.rx.recv().await.ok()
    }

    pub fn close(&self) {
        if let Err(e) = self.rx.close() {
            tracing::debug!("Relay channel already closed: {:?}", e);
        }
    }
}
