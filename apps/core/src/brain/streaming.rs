//! Streaming Adapter.
//!
//! Re-emits a finished response word by word with a fixed pause between
//! chunks so a UI can render it progressively. Each chunk is a word plus the
//! single space that followed it in the original text; the last chunk has
//! no trailing space unless the text ended with one. Concatenating the
//! chunks in order gives back the original text byte for byte.
//!
//! There is no cancellation token: a caller stops the stream by dropping it
//! or by closing the receiving end of its channel.

use crate::actors::messages::ActorError;
use crate::error::AppError;
use futures::stream::{self, Stream};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::debug;

/// Lazy iterator over the word chunks of a text.
///
/// Cheap to recreate: call [`word_chunks`] again on the same text to restart.
#[derive(Debug, Clone)]
pub struct WordChunks<'a> {
    text: &'a str,
    pos: usize,
}

/// Splits `text` into word chunks, each keeping its trailing space.
pub fn word_chunks(text: &str) -> WordChunks<'_> {
    WordChunks { text, pos: 0 }
}

impl<'a> Iterator for WordChunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let rest = &self.text[self.pos..];
        if rest.is_empty() {
            return None;
        }
        let end = rest.find(' ').map(|i| i + 1).unwrap_or(rest.len());
        self.pos += end;
        Some(&rest[..end])
    }
}

/// Emits chunks with a fixed delay between them.
#[derive(Debug, Clone, Copy)]
pub struct StreamingAdapter {
    delay: Duration,
}

impl StreamingAdapter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Feeds each chunk to `sink`, pausing between chunks.
    ///
    /// Returns the number of chunks emitted.
    pub async fn emit<F>(&self, text: &str, mut sink: F) -> usize
    where
        F: FnMut(String),
    {
        let mut count = 0;
        for chunk in word_chunks(text) {
            if count > 0 && !self.delay.is_zero() {
                sleep(self.delay).await;
            }
            sink(chunk.to_string());
            count += 1;
        }
        count
    }

    /// Sends each chunk down `chunk_sender`, pausing between chunks.
    ///
    /// Stops early with `ActorError::ChannelClosed` if the receiver is gone.
    pub async fn emit_to_channel(
        &self,
        text: &str,
        chunk_sender: &mpsc::Sender<Result<String, AppError>>,
    ) -> Result<usize, AppError> {
        let mut count = 0;
        for chunk in word_chunks(text) {
            if count > 0 && !self.delay.is_zero() {
                sleep(self.delay).await;
            }
            if chunk_sender.send(Ok(chunk.to_string())).await.is_err() {
                debug!(sent = count, "Chunk receiver dropped, stopping stream");
                return Err(ActorError::ChannelClosed("chunk receiver dropped".to_string()).into());
            }
            count += 1;
        }
        Ok(count)
    }

    /// Owned async stream of chunks with the same pacing as [`emit`](Self::emit).
    pub fn stream(&self, text: String) -> impl Stream<Item = String> + Send + 'static {
        let delay = self.delay;
        stream::unfold((text, 0usize), move |(text, pos)| async move {
            if pos >= text.len() {
                return None;
            }
            if pos > 0 && !delay.is_zero() {
                sleep(delay).await;
            }
            let chunk = word_chunks(&text[pos..]).next()?.to_string();
            let next = pos + chunk.len();
            Some((chunk, (text, next)))
        })
    }
}
