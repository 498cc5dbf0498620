use std::path::PathBuf;

use anyhow::Context;
use botcmd_core::{
    Command as _, CommandMessage, CommandRegistry, Config, ServiceId, User, builtin_commands,
};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "botcmd", version, about = "Run chat-bot commands locally")]
pub struct Cli {
    /// Read configuration from this file instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key for an upstream service.
    Configure {
        /// Service short name, e.g. "openweather".
        service: String,
    },

    /// Show current weather and a per-day forecast.
    #[command(visible_alias = "w")]
    Weather {
        /// Place name, optionally followed by a unit token `c` or `f`.
        args: Vec<String>,

        /// Mark the request as private.
        #[arg(long)]
        private: bool,
    },

    /// Show the current local time at a place.
    #[command(visible_alias = "t")]
    Time {
        /// Place name.
        args: Vec<String>,

        #[arg(long)]
        private: bool,
    },

    /// List registered commands and their aliases.
    Commands,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };

        match self.command {
            Command::Configure { service } => {
                let id = ServiceId::try_from(service.as_str())?;
                let api_key = Password::new(&format!("API key for {id}:"))
                    .with_display_mode(PasswordDisplayMode::Masked)
                    .without_confirmation()
                    .prompt()
                    .context("Failed to read API key")?;

                config.upsert_api_key(id, api_key.trim().to_string());
                match &self.config {
                    Some(path) => config.save_to(path)?,
                    None => config.save()?,
                }
                println!("Saved API key for {id}.");
            }
            Command::Weather { args, private } => {
                run_command(&config, "weather", args, private).await?;
            }
            Command::Time { args, private } => {
                run_command(&config, "time", args, private).await?;
            }
            Command::Commands => {
                let registry = CommandRegistry::new(&config, builtin_commands())?;
                for command in registry.commands() {
                    println!("{} ({})", command.name(), command.aliases().join(", "));
                }
            }
        }

        Ok(())
    }
}

async fn run_command(
    config: &Config,
    name: &str,
    args: Vec<String>,
    private: bool,
) -> anyhow::Result<()> {
    let registry = CommandRegistry::new(config, builtin_commands())?;
    let message = CommandMessage::new(name, args, local_user(), private);

    let replies = registry
        .dispatch(&message)
        .await
        .with_context(|| format!("`{name}` command failed"))?;

    for reply in replies {
        print!("{}", reply.message);
        if !reply.message.ends_with('\n') {
            println!();
        }
    }

    Ok(())
}

fn local_user() -> User {
    let nick = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "local".to_string());
    User::new(nick.clone(), nick)
}
