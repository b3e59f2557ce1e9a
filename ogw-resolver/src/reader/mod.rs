use alloy_primitives::Bytes;
use alloy_primitives::B256;
use async_trait::async_trait;

mod dummy;
mod onchain;

pub use dummy::DummyReader;
pub use onchain::OnchainReader;

/// Read-only access to the authoritative resolver records.
///
/// Implementations perform view calls only; a failure is a revert or a
/// transport error and carries no side effects.
#[async_trait]
pub trait RecordReader: Send + Sync {
    /// Reads the text record stored under `key` for `node`.
    async fn text(&self, node: B256, key: &str) -> anyhow::Result<String>;

    /// Reads the raw data record stored under `key` for `node`.
    async fn data(&self, node: B256, key: &str) -> anyhow::Result<Bytes>;
}
