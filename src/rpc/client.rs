//! JSON-RPC over HTTP client for Ethereum-compatible nodes.

use super::error::RpcError;
use super::quantity::{self, parse_u64, parse_u128};
use super::types::{Block, SyncStatus};
use super::EthRpc;
use crate::consts::cli_consts::rpc;
use crate::environment::Environment;
use log::{debug, trace};
use reqwest::{Client, ClientBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicU64, Ordering};

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("chainwatch/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct JsonRpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<JsonRpcErrorObject>,
}

#[derive(Debug)]
pub struct RpcClient {
    client: Client,
    environment: Environment,
    next_id: AtomicU64,
}

impl RpcClient {
    pub fn new(environment: Environment) -> Result<Self, RpcError> {
        let client = ClientBuilder::new()
            .connect_timeout(rpc::connect_timeout())
            .timeout(rpc::request_timeout())
            .build()?;
        Ok(Self {
            client,
            environment,
            next_id: AtomicU64::new(1),
        })
    }

    async fn handle_response_status(response: Response) -> Result<Response, RpcError> {
        if !response.status().is_success() {
            return Err(RpcError::from_response(response).await);
        }
        Ok(response)
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &'static str,
        params: Value,
    ) -> Result<T, RpcError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };
        trace!("rpc request #{}: {} {}", id, method, request.params);

        let response = self
            .client
            .post(self.environment.rpc_url())
            .header("User-Agent", USER_AGENT)
            .json(&request)
            .send()
            .await?;
        let response = Self::handle_response_status(response).await?;
        let body = response.bytes().await?;

        let envelope: JsonRpcResponse = serde_json::from_slice(&body)
            .map_err(|source| RpcError::Decode { method, source })?;
        if let Some(error) = envelope.error {
            debug!("rpc request #{} failed: {} {}", id, error.code, error.message);
            return Err(RpcError::Rpc {
                method,
                code: error.code,
                message: error.message,
            });
        }
        serde_json::from_value(envelope.result)
            .map_err(|source| RpcError::Decode { method, source })
    }
}

#[async_trait::async_trait]
impl EthRpc for RpcClient {
    async fn block_number(&self) -> Result<u64, RpcError> {
        let raw: String = self.call("eth_blockNumber", json!([])).await?;
        parse_u64(&raw)
    }

    async fn block_by_number(
        &self,
        number: u64,
        full_transactions: bool,
    ) -> Result<Block, RpcError> {
        let block: Option<Block> = self
            .call(
                "eth_getBlockByNumber",
                json!([quantity::to_hex(number), full_transactions]),
            )
            .await?;
        block.ok_or(RpcError::BlockNotFound(number))
    }

    async fn gas_price(&self) -> Result<u128, RpcError> {
        let raw: String = self.call("eth_gasPrice", json!([])).await?;
        parse_u128(&raw)
    }

    async fn chain_id(&self) -> Result<u64, RpcError> {
        let raw: String = self.call("eth_chainId", json!([])).await?;
        parse_u64(&raw)
    }

    async fn syncing(&self) -> Result<SyncStatus, RpcError> {
        let raw: Value = self.call("eth_syncing", json!([])).await?;
        Ok(SyncStatus::from_value(&raw))
    }

    async fn peer_count(&self) -> Result<u64, RpcError> {
        let raw: String = self.call("net_peerCount", json!([])).await?;
        parse_u64(&raw)
    }
}
