use crate::logging::LogLevel;
use crate::rpc::RpcError;

#[derive(Debug, Clone, Default)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Log level for a failed snapshot or block-list refresh.
    pub fn classify_refresh_error(&self, error: &RpcError) -> LogLevel {
        match error {
            // Rate limiting - the next height will retry anyway
            RpcError::Http { status, .. } if *status == 429 => LogLevel::Warn,
            RpcError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Node is reachable but rejects the request: misconfiguration
            RpcError::Http { status, .. } if *status == 401 || *status == 403 => LogLevel::Error,
            RpcError::Rpc { .. } => LogLevel::Error,
            RpcError::Decode { .. } | RpcError::InvalidQuantity { .. } => LogLevel::Error,

            // Node behind or mid-reorg
            RpcError::BlockNotFound(_) => LogLevel::Warn,

            RpcError::Task(_) => LogLevel::Error,

            _ => LogLevel::Warn,
        }
    }

    /// Log level for a failed height poll. Poll failures are retried on the next
    /// tick and stay out of the activity log unless debugging.
    pub fn classify_poll_error(&self, _error: &RpcError) -> LogLevel {
        LogLevel::Debug
    }
}
