mod chain;
mod cli_messages;
mod config;
mod consts;
mod environment;
mod error_classifier;
mod events;
mod format;
mod logging;
mod rpc;
mod session;
mod ui;
mod workers;

use crate::config::{Config, Overrides, RPC_URL_ENV, Settings, get_config_path};
use crate::session::{run_headless_mode, run_tui_mode, setup_session};
use crate::ui::View;
use clap::{Parser, Subcommand};
use std::error::Error;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start watching a node
    Start {
        /// JSON-RPC endpoint of the node, or "local"
        #[arg(long, value_name = "URL")]
        rpc_url: Option<String>,

        /// Expected block time in seconds; also the polling interval
        #[arg(long, value_name = "SECONDS")]
        block_time: Option<u64>,

        /// Number of blocks shown in the charts
        #[arg(long, value_name = "BLOCKS")]
        history_length: Option<u64>,

        /// Screen to open first
        #[arg(long, value_enum, default_value_t = View::Dashboard)]
        view: View,

        /// Print events and snapshot summaries instead of running the dashboard
        #[arg(long, default_value_t = false)]
        headless: bool,

        /// Enable background colors in the dashboard
        #[arg(long = "with-background", action = clap::ArgAction::SetTrue)]
        with_background: bool,
    },
    /// Write a config file with the default settings
    ConfigInit {
        /// Overwrite an existing config file
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Print the settings a `start` without flags would use
    ConfigShow,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    log::set_max_level(logging::get_rust_log_level().into());

    let config_path = get_config_path()?;
    let args = Args::parse();
    match args.command {
        Command::Start {
            rpc_url,
            block_time,
            history_length,
            view,
            headless,
            with_background,
        } => {
            let file = Config::load_or_default(&config_path)?;
            let overrides = Overrides {
                rpc_url,
                block_time_secs: block_time,
                history_length,
                with_background_color: with_background,
            };
            let settings = Settings::resolve(overrides, std::env::var(RPC_URL_ENV).ok(), &file)
                .map_err(|e| {
                    print_cmd_error!("Invalid settings", e.to_string().as_str());
                    e
                })?;
            start(settings, view, headless).await
        }
        Command::ConfigInit { force } => {
            if config_path.exists() && !force {
                print_cmd_warn!(
                    "Config file already exists",
                    "{} (use --force to overwrite)",
                    config_path.display()
                );
                return Ok(());
            }
            Config::with_defaults().save(&config_path)?;
            print_cmd_success!("Config file written", "{}", config_path.display());
            Ok(())
        }
        Command::ConfigShow => {
            let file = Config::load_or_default(&config_path)?;
            let settings =
                Settings::resolve(Overrides::default(), std::env::var(RPC_URL_ENV).ok(), &file)?;
            print_cmd_info!("Config file", "{}", config_path.display());
            println!("{}", describe(&settings));
            Ok(())
        }
    }
}

/// Starts a session in the requested mode.
async fn start(settings: Settings, view: View, headless: bool) -> Result<(), Box<dyn Error>> {
    let session = setup_session(settings).await.map_err(|e| {
        print_cmd_error!("Failed to start session", e.to_string().as_str());
        e
    })?;

    if headless {
        run_headless_mode(session).await
    } else {
        run_tui_mode(session, view).await
    }
}

fn describe(settings: &Settings) -> String {
    format!(
        "rpc_url: {}\nblock_time_secs: {}\nhistory_length: {}\nblock_list_length: {}\nnode_list_length: {}",
        settings.environment.rpc_url(),
        settings.block_time_secs,
        settings.history_length,
        settings.block_list_length,
        settings.node_list_length,
    )
}
