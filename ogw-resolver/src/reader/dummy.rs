use std::collections::HashMap;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;

use alloy_primitives::Bytes;
use alloy_primitives::B256;
use anyhow::anyhow;
use async_trait::async_trait;

use super::RecordReader;

/// Record reader serving canned values from memory.
///
/// Used in tests and for running the gateway without an RPC endpoint. Keys
/// are matched regardless of the node. Every read attempt is counted, and
/// individual keys can be delayed to exercise completion-order handling.
#[derive(Default)]
pub struct DummyReader {
    texts: HashMap<String, String>,
    blobs: HashMap<String, Bytes>,
    delays: HashMap<String, Duration>,
    calls: AtomicUsize,
}

impl DummyReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(
        mut self,
        key: &str,
        value: &str,
    ) -> Self {
        self.texts.insert(key.to_owned(), value.to_owned());
        self
    }

    pub fn with_data(
        mut self,
        key: &str,
        value: impl Into<Bytes>,
    ) -> Self {
        self.blobs.insert(key.to_owned(), value.into());
        self
    }

    /// Delays every read of `key` by `delay`.
    pub fn with_delay(
        mut self,
        key: &str,
        delay: Duration,
    ) -> Self {
        self.delays.insert(key.to_owned(), delay);
        self
    }

    /// Number of reads attempted so far, successful or not.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn stall(&self, key: &str) {
        if let Some(delay) = self.delays.get(key) {
            tokio::time::sleep(*delay).await;
        }
    }
}

#[async_trait]
impl RecordReader for DummyReader {
    async fn text(&self, _node: B256, key: &str) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.stall(key).await;
        self.texts
            .get(key)
            .cloned()
            .ok_or_else(|| anyhow!("no text record for key {key}"))
    }

    async fn data(&self, _node: B256, key: &str) -> anyhow::Result<Bytes> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.stall(key).await;
        self.blobs
            .get(key)
            .cloned()
            .ok_or_else(|| anyhow!("no data record for key {key}"))
    }
}
