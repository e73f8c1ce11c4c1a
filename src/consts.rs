pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! Defaults for polling, window sizes and the UI loop, grouped by area.

    // =============================================================================
    // CHAIN CONFIGURATION
    // =============================================================================

    /// Chain defaults used when neither the config file nor the CLI override them.
    pub mod chain {
        /// Expected block time in seconds; also the height polling period.
        pub const BLOCK_TIME_SECS: u64 = 15;

        /// Number of blocks charted on the dashboard.
        pub const BLOCK_HISTORY_LENGTH: u64 = 16;

        /// Number of blocks in the dashboard's "Last 10 blocks" list.
        pub const BLOCK_LIST_LENGTH: u64 = 12;

        /// Number of blocks shown by the node view.
        pub const NODE_LIST_LENGTH: u64 = 16;
    }

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    pub mod rpc {
        use std::time::Duration;

        /// Connect timeout for the JSON-RPC HTTP client (seconds)
        pub const CONNECT_TIMEOUT_SECS: u64 = 10;

        /// Whole-request timeout for the JSON-RPC HTTP client (seconds)
        pub const REQUEST_TIMEOUT_SECS: u64 = 10;

        pub const fn connect_timeout() -> Duration {
            Duration::from_secs(CONNECT_TIMEOUT_SECS)
        }

        pub const fn request_timeout() -> Duration {
            Duration::from_secs(REQUEST_TIMEOUT_SECS)
        }
    }

    // =============================================================================
    // UI CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Capacity of the worker event channel
    pub const EVENT_QUEUE_SIZE: usize = 100;

    /// How long the UI loop waits for a key press before redrawing (milliseconds)
    pub const UI_TICK_MS: u64 = 100;

    /// Height of each chart panel in terminal rows
    pub const CHART_HEIGHT: u16 = 10;
}
