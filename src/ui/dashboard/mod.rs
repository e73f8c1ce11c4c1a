//! Dashboard screen
//!
//! Split into state, per-tick updates, the top-level renderer and one module per panel.

pub mod components;
pub mod renderer;
pub mod state;
pub mod updaters;
pub mod utils;

// Re-export main types and functions for external use
pub use renderer::{Branch, render_dashboard, select_branch};
pub use state::DashboardState;
