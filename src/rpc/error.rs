//! Error handling for the JSON-RPC client

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RpcError {
    /// Reqwest error, typically related to network issues or request failures.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The node answered with a non-success HTTP status.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },

    /// The node answered with a JSON-RPC error object.
    #[error("{method} failed with code {code}: {message}")]
    Rpc {
        method: &'static str,
        code: i64,
        message: String,
    },

    /// The response body or its result could not be decoded.
    #[error("Decoding error in {method} response: {source}")]
    Decode {
        method: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A hex-encoded quantity could not be parsed.
    #[error("Invalid hex quantity '{value}'")]
    InvalidQuantity { value: String },

    /// `eth_getBlockByNumber` returned `null`.
    #[error("Block {0} not found")]
    BlockNotFound(u64),

    /// A fetch task panicked before producing a result.
    #[error("Fetch task failed: {0}")]
    Task(String),
}

impl RpcError {
    pub async fn from_response(response: reqwest::Response) -> RpcError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        RpcError::Http { status, message }
    }
}
