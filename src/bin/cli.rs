//! coldreach CLI
//!
//! Drives the tool system from the terminal: scrape a profile, generate an
//! outreach message, parse and store your own profile, and manage settings.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::json;

use coldreach::backend::DEFAULT_BACKEND_URL;
use coldreach::storage::{FileStore, SettingsStore};
use coldreach::tools::{ToolContext, ToolRegistry};
use coldreach::{BackendClient, BrowserSession, LaunchOptions, SelectorConfig};

#[derive(Parser)]
#[command(
    name = "coldreach",
    version,
    about = "Scrape profile pages and draft personalized outreach messages"
)]
struct Cli {
    /// Launch the browser with a visible window (default: headless)
    #[arg(long, global = true)]
    headed: bool,

    /// Backend base URL (overrides the stored setting)
    #[arg(long, global = true)]
    backend: Option<String>,

    /// Path to a selector configuration file (default: bundled config)
    #[arg(long, global = true)]
    selectors: Option<PathBuf>,

    /// Path to the settings file (default: platform config directory)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scrape a profile and print the structured record as JSON
    Scrape {
        /// Profile URL or handle
        url: String,
    },

    /// Scrape a target profile and generate an outreach message
    Generate {
        /// Profile URL or handle of the target
        url: String,

        /// Tone of the message
        #[arg(long, default_value = "friendly")]
        tone: String,

        /// Length of the message
        #[arg(long, default_value = "short")]
        length: String,

        /// Call to action to close the message with
        #[arg(long, default_value = "")]
        call_to_action: String,

        /// Extra instruction for the backend
        #[arg(long, default_value = "")]
        extra: String,
    },

    /// Parse your own profile and store it as sender context
    ParseMe {
        /// Profile URL (default: your own profile page)
        #[arg(long)]
        url: Option<String>,
    },

    /// Manage stored settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Store the backend API key
    SetKey { key: String },

    /// Print the current settings (API key redacted)
    Show,

    /// Print the most recently generated message
    LastMessage,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let Cli { headed, backend, selectors, settings, command } = Cli::parse();

    let mut store = match settings {
        Some(path) => FileStore::new(path),
        None => FileStore::at_default_path()?,
    };

    match command {
        Command::Config { action } => run_config(action, &mut store),
        command => run_browser_command(command, headed, backend, selectors, &mut store),
    }
}

fn run_config(action: ConfigAction, store: &mut FileStore) -> anyhow::Result<()> {
    match action {
        ConfigAction::SetKey { key } => {
            store.set_api_key(&key)?;
            println!("API key stored in {}", store.path().display());
        }
        ConfigAction::Show => {
            let settings = store.load()?;
            println!("settings file:    {}", store.path().display());
            println!("api key:          {}", if settings.api_key.is_some() { "(set)" } else { "(not set)" });
            println!(
                "backend url:      {}",
                settings.backend_url.as_deref().unwrap_or(DEFAULT_BACKEND_URL)
            );
            match settings.user_profile {
                Some(profile) => println!(
                    "user profile:     {} (parsed {})",
                    profile.name,
                    settings.user_profile_parsed_at.as_deref().unwrap_or("unknown")
                ),
                None => println!("user profile:     (not parsed)"),
            }
        }
        ConfigAction::LastMessage => match store.load()?.last_message {
            Some(message) => println!("{}", message),
            None => println!("No message generated yet."),
        },
    }
    Ok(())
}

fn run_browser_command(
    command: Command,
    headed: bool,
    backend_override: Option<String>,
    selectors: Option<PathBuf>,
    store: &mut FileStore,
) -> anyhow::Result<()> {
    let config = match selectors {
        Some(path) => SelectorConfig::from_path(path)?,
        None => SelectorConfig::bundled()?,
    };

    let backend_url = backend_override
        .or(store.load()?.backend_url)
        .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
    let backend = BackendClient::new(backend_url);

    let session = BrowserSession::launch(LaunchOptions::new().headless(!headed))
        .context("Failed to launch browser - is Chrome/Chromium installed?")?;

    let registry = ToolRegistry::with_defaults();
    let mut context = ToolContext::new(&session, &config, &backend, store);

    let outcome = match command {
        Command::Scrape { url } => {
            let result = registry.execute("scrape_profile", json!({ "url": url }), &mut context)?;
            println!("{}", serde_json::to_string_pretty(&result.data)?);
            Ok(())
        }
        Command::Generate { url, tone, length, call_to_action, extra } => {
            let result = registry.execute(
                "generate_message",
                json!({
                    "url": url,
                    "tone": tone,
                    "length": length,
                    "call_to_action": call_to_action,
                    "extra_instruction": extra,
                }),
                &mut context,
            )?;

            let message = result
                .data
                .as_ref()
                .and_then(|d| d["message"].as_str())
                .unwrap_or_default()
                .to_string();
            println!("{}", message);
            Ok(())
        }
        Command::ParseMe { url } => {
            let result = registry.execute("parse_my_profile", json!({ "url": url }), &mut context)?;
            println!("{}", serde_json::to_string_pretty(&result.data)?);
            Ok(())
        }
        Command::Config { .. } => Ok(()), // handled before the browser launches
    };

    let _ = session.close();
    outcome
}
