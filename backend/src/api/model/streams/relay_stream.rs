use crate::utils::debug_if_enabled;
use bytes::Bytes;
use futures::Stream;
use log::warn;
use shared::utils::{sanitize_sensitive_info, truncate_string};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::time::{Instant, Sleep};

pub type BoxedUpstream = Pin<Box<dyn Stream<Item=Result<Bytes, reqwest::Error>> + Send>>;

const LOG_URL_LEN: usize = 50;

/// Forwards an upstream body chunk by chunk.
///
/// Chunks larger than `chunk_size` are split without copying. Every wait for upstream data is
/// bounded by `read_timeout`. Upstream errors and timeouts end the stream, the client sees a
/// truncated body. The upstream response is owned here, dropping the stream closes it.
pub struct RelayStream {
    upstream: Option<BoxedUpstream>,
    pending: Bytes,
    chunk_size: usize,
    read_timeout: Duration,
    read_deadline: Pin<Box<Sleep>>,
    waiting: bool,
    bytes_sent: u64,
    url: String,
}

impl RelayStream {
    pub fn new<S>(upstream: S, chunk_size: usize, read_timeout: Duration, url: &str) -> Self
    where
        S: Stream<Item=Result<Bytes, reqwest::Error>> + Send + 'static,
    {
        Self {
            upstream: Some(Box::pin(upstream)),
            pending: Bytes::new(),
            chunk_size: chunk_size.max(1),
            read_timeout,
            read_deadline: Box::pin(tokio::time::sleep(read_timeout)),
            waiting: false,
            bytes_sent: 0,
            url: truncate_string(&sanitize_sensitive_info(url), LOG_URL_LEN),
        }
    }

    pub const fn bytes_sent(&self) -> u64 {
        self.bytes_sent
    }

    fn next_chunk(&mut self) -> Bytes {
        let len = self.pending.len().min(self.chunk_size);
        let chunk = self.pending.split_to(len);
        self.bytes_sent += chunk.len() as u64;
        chunk
    }

    fn release(&mut self) {
        if self.upstream.take().is_some() {
            debug_if_enabled!("Relay {} released after {} bytes", self.url, self.bytes_sent);
        }
    }
}

impl Stream for RelayStream {
    type Item = Result<Bytes, std::io::Error>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        if !this.pending.is_empty() {
            return Poll::Ready(Some(Ok(this.next_chunk())));
        }

        loop {
            let Some(upstream) = this.upstream.as_mut() else {
                return Poll::Ready(None);
            };

            if !this.waiting {
                this.waiting = true;
                let deadline = Instant::now() + this.read_timeout;
                this.read_deadline.as_mut().reset(deadline);
            }

            match upstream.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(bytes))) => {
                    this.waiting = false;
                    if bytes.is_empty() {
                        continue;
                    }
                    this.pending = bytes;
                    return Poll::Ready(Some(Ok(this.next_chunk())));
                }
                Poll::Ready(Some(Err(err))) => {
                    warn!("Relay {} aborted after {} bytes: {}", this.url, this.bytes_sent,
                        sanitize_sensitive_info(&err.to_string()));
                    this.release();
                    return Poll::Ready(None);
                }
                Poll::Ready(None) => {
                    this.release();
                    return Poll::Ready(None);
                }
                Poll::Pending => {
                    if this.read_deadline.as_mut().poll(cx).is_ready() {
                        warn!("Relay {} read timeout after {} bytes", this.url, this.bytes_sent);
                        this.release();
                        return Poll::Ready(None);
                    }
                    return Poll::Pending;
                }
            }
        }
    }
}

impl Drop for RelayStream {
    fn drop(&mut self) {
        if self.upstream.is_some() {
            debug_if_enabled!("Client left, closing relay {} after {} bytes", self.url, self.bytes_sent);
        }
    }
}
