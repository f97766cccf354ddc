use std::io::Write;

use async_trait::async_trait;
use clientnotes_core::services::{ClearConfirmer, ConfirmPrompt};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};
use tokio::sync::Mutex;

/// Asks on stderr and reads the answer from a line-based input.
///
/// Only an explicit `y`/`yes` (any case) confirms; anything else, including
/// end of input, cancels.
pub struct LineConfirmer<R> {
    input: Mutex<R>,
}

impl LineConfirmer<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R> LineConfirmer<R> {
    pub fn new(input: R) -> Self {
        Self {
            input: Mutex::new(input),
        }
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> ClearConfirmer for LineConfirmer<R> {
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        eprint!(
            "{}: {}? [{}/{}] ",
            prompt.title,
            prompt.message,
            prompt.confirm_label.to_lowercase().chars().next().unwrap_or('y'),
            prompt.cancel_label.to_uppercase().chars().next().unwrap_or('N'),
        );
        if let Err(e) = std::io::stderr().flush() {
            tracing::warn!("Failed to flush confirmation prompt: {}", e);
        }

        let mut answer = String::new();
        let mut input = self.input.lock().await;
        match input.read_line(&mut answer).await {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                tracing::warn!("Failed to read confirmation: {}", e);
                false
            }
        }
    }
}
