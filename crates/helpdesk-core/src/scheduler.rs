//! Delayed bot replies — one tokio timer task per submission.
//!
//! The task sleeps for the typing delay, resolves the query and sends the
//! reply back over a channel. The owner applies it to the session, so the
//! session itself is only ever touched from one place.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::resolver::Resolver;
use crate::types::{BotReply, PendingReply};

/// Typing delay used when nothing else is configured.
pub const DEFAULT_TYPING_DELAY: Duration = Duration::from_millis(1500);

pub struct ReplyScheduler {
    delay: Duration,
    resolver: Arc<Resolver>,
    reply_tx: mpsc::UnboundedSender<BotReply>,
    reply_rx: mpsc::UnboundedReceiver<BotReply>,
    task: Option<JoinHandle<()>>,
}

impl ReplyScheduler {
    pub fn new(resolver: Arc<Resolver>, delay: Duration) -> Self {
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        Self {
            delay,
            resolver,
            reply_tx,
            reply_rx,
            task: None,
        }
    }

    /// Start the delayed reply. Must be called from within a tokio runtime.
    pub fn schedule(&mut self, pending: PendingReply) {
        let delay = self.delay;
        let resolver = Arc::clone(&self.resolver);
        let tx = self.reply_tx.clone();

        debug!(ticket = pending.ticket, ?delay, "scheduling bot reply");
        self.task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let text = resolver.resolve(&pending.query);
            let _ = tx.send(BotReply {
                ticket: pending.ticket,
                text,
            });
        }));
    }

    /// A reply whose delay has already elapsed, if any.
    pub fn try_next(&mut self) -> Option<BotReply> {
        self.reply_rx.try_recv().ok()
    }

    /// Wait for the next reply.
    pub async fn next(&mut self) -> Option<BotReply> {
        self.reply_rx.recv().await
    }

    /// Whether a scheduled reply has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Abort the outstanding reply, if any.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("cancelled pending bot reply");
        }
    }
}

impl Drop for ReplyScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
