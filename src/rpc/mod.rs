//! Ethereum JSON-RPC access.
//!
//! [`EthRpc`] is the capability set the dashboard needs from a node. The
//! production implementation is [`RpcClient`]; tests use the generated `MockEthRpc`.

pub mod client;
pub mod error;
pub mod quantity;
pub mod types;

pub use client::RpcClient;
pub use error::RpcError;
pub use types::{Block, SyncStatus};

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait EthRpc: Send + Sync {
    /// `eth_blockNumber`: the current chain height.
    async fn block_number(&self) -> Result<u64, RpcError>;

    /// `eth_getBlockByNumber`.
    async fn block_by_number(
        &self,
        number: u64,
        full_transactions: bool,
    ) -> Result<Block, RpcError>;

    /// `eth_gasPrice`, in wei.
    async fn gas_price(&self) -> Result<u128, RpcError>;

    /// `eth_chainId`.
    async fn chain_id(&self) -> Result<u64, RpcError>;

    /// `eth_syncing`, normalized.
    async fn syncing(&self) -> Result<SyncStatus, RpcError>;

    /// `net_peerCount`.
    async fn peer_count(&self) -> Result<u64, RpcError>;
}
