//! Background workers that poll the node and publish results over watch channels.

pub mod aggregator;
pub mod core;
pub mod refresh;
pub mod watcher;

pub use aggregator::{spawn_block_list_loader, spawn_dashboard_aggregator};
pub use self::core::{EventSender, ScopedTask};
pub use refresh::RefreshOutput;
pub use watcher::BlockNumberWatcher;
