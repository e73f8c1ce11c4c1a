//! Console messages for commands that run outside the TUI
//!
//! `config-init`, `config-show` and headless mode print through these helpers so
//! every line carries a colored status prefix.

pub fn print_info(title: &str, details: &str) {
    println!("{}", with_details("\x1b[1;33m[INFO]\x1b[0m", title, details));
}

pub fn print_warn(title: &str, details: &str) {
    println!("{}", with_details("\x1b[1;91m[WARN]\x1b[0m", title, details));
}

/// Print an error; errors go to stderr.
pub fn print_error(title: &str, details: Option<&str>) {
    eprintln!("\x1b[1;31m[ERROR]\x1b[0m {}", title);
    if let Some(details) = details {
        eprintln!("\x1b[1;31m[ERROR]\x1b[0m Details: {}", details);
    }
}

pub fn print_success(title: &str, details: &str) {
    println!("{}", with_details("\x1b[1;32m[SUCCESS]\x1b[0m", title, details));
}

fn with_details(prefix: &str, title: &str, details: &str) -> String {
    if details.is_empty() {
        format!("{} {}", prefix, title)
    } else {
        format!("{} {}\t {}", prefix, title, details)
    }
}

#[macro_export]
macro_rules! print_cmd_info {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_info($title, &format!($($details)*))
    };
}

#[macro_export]
macro_rules! print_cmd_warn {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_warn($title, &format!($($details)*))
    };
}

#[macro_export]
macro_rules! print_cmd_error {
    ($title:expr) => {
        $crate::cli_messages::print_error($title, None)
    };
    ($title:expr, $details:expr) => {
        $crate::cli_messages::print_error($title, Some($details))
    };
}

#[macro_export]
macro_rules! print_cmd_success {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_success($title, &format!($($details)*))
    };
}
