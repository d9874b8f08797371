// web_app/components/confirm.rs - Confirmation prompts
//
// The controller asks a `ConfirmationService` before deleting anything.
// `ChannelConfirmation` forwards prompts to whoever draws the dialog and
// waits for the answer.

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::web_app::model::Confirmation;

/// Blocking yes/no interaction gating an irreversible action
#[async_trait]
pub trait ConfirmationService: Send + Sync {
    /// Resolve to `true` only when the user explicitly accepts
    async fn confirm(&self, prompt: &Confirmation) -> bool;
}

/// A prompt waiting for the user's answer
#[derive(Debug)]
pub struct PromptRequest {
    pub prompt: Confirmation,
    reply: oneshot::Sender<bool>,
}

impl PromptRequest {
    pub fn accept(self) {
        self.answer(true);
    }

    pub fn reject(self) {
        self.answer(false);
    }

    pub fn answer(self, accepted: bool) {
        if self.reply.send(accepted).is_err() {
            tracing::debug!("Confirmation answered after the caller went away");
        }
    }
}

/// Confirmation service backed by a channel to the rendering layer
#[derive(Clone, Debug)]
pub struct ChannelConfirmation {
    tx: mpsc::Sender<PromptRequest>,
}

/// Create a confirmation service and the receiving end the UI listens on
pub fn confirmation_channel(buffer: usize) -> (ChannelConfirmation, mpsc::Receiver<PromptRequest>) {
    let (tx, rx) = mpsc::channel(buffer.max(1));
    (ChannelConfirmation { tx }, rx)
}

#[async_trait]
impl ConfirmationService for ChannelConfirmation {
    async fn confirm(&self, prompt: &Confirmation) -> bool {
        let (reply, answer) = oneshot::channel();
        let request = PromptRequest {
            prompt: prompt.clone(),
            reply,
        };

        if self.tx.send(request).await.is_err() {
            tracing::warn!("No confirmation listener, treating '{}' as declined", prompt.message);
            return false;
        }

        // A dropped prompt counts as a decline
        answer.await.unwrap_or(false)
    }
}
