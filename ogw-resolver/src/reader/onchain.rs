use std::sync::Arc;

use alloy_primitives::Bytes;
use alloy_primitives::B256;
use anyhow::Context;
use async_trait::async_trait;
use ethers::prelude::abigen;
use ethers::providers::Http;
use ethers::providers::Provider;
use ethers::types::Address;

use super::RecordReader;

abigen!(
    OffchainResolver,
    r#"[
        function text(bytes32 node, string key) external view returns (string)
        function data(bytes32 node, string key) external view returns (bytes)
    ]"#
);

/// Record reader backed by the resolver contract over JSON-RPC.
pub struct OnchainReader {
    contract: OffchainResolver<Provider<Http>>,
}

impl OnchainReader {
    /// Connects to `rpc_url` and binds the resolver deployed at
    /// `resolver_address`.
    pub fn new(rpc_url: &str, resolver_address: &str) -> anyhow::Result<Self> {
        let provider = Provider::<Http>::try_from(rpc_url).context("creating JSON-RPC provider")?;
        let address: Address = resolver_address
            .parse()
            .context("parsing resolver contract address")?;

        Ok(Self {
            contract: OffchainResolver::new(address, Arc::new(provider)),
        })
    }
}

#[async_trait]
impl RecordReader for OnchainReader {
    async fn text(&self, node: B256, key: &str) -> anyhow::Result<String> {
        let value = self
            .contract
            .text(node.0, key.to_owned())
            .call()
            .await
            .context("text view call")?;
        Ok(value)
    }

    async fn data(&self, node: B256, key: &str) -> anyhow::Result<Bytes> {
        let value = self
            .contract
            .data(node.0, key.to_owned())
            .call()
            .await
            .context("data view call")?;
        Ok(Bytes::from(value.to_vec()))
    }
}
