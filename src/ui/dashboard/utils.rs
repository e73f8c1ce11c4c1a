//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::events::Worker;
use ratatui::prelude::Color;

/// Get a ratatui color for a worker based on its type
pub fn get_worker_color(worker: &Worker) -> Color {
    match worker {
        Worker::BlockWatcher => Color::Cyan,
        Worker::Aggregator => Color::Green,
        Worker::BlockList => Color::Yellow,
    }
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // "YYYY-MM-DD HH:MM:SS" -> "MM-DD HH:MM"
    let mut parts = timestamp.split(' ');
    if let (Some(date_part), Some(time_part)) = (parts.next(), parts.next()) {
        if let (Some(month_day), Some(hour_min)) = (date_part.get(5..10), time_part.get(0..5)) {
            return format!("{} {}", month_day, hour_min);
        }
    }
    timestamp.to_string()
}

/// Clean HTTP error messages
pub fn clean_http_error_message(msg: &str) -> String {
    if msg.contains("Reqwest error") && msg.contains("timed out") {
        return "Node request timed out - retrying...".to_string();
    }
    if msg.contains("Reqwest error") && msg.contains("error sending request") {
        return "Node unreachable - retrying...".to_string();
    }
    msg.to_string()
}
