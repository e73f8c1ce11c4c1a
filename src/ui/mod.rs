// Module declarations
mod activity;
mod app;
pub mod blocks;
pub mod dashboard;
mod feed;

// Re-exports for external use
pub use app::{App, View, run};
