use crate::{
    ClientMessage, CommandMessage,
    commands::{TimeCommand, WeatherCommand},
    config::{Endpoints, ServiceId},
    error::{CommandError, Result},
};
use async_trait::async_trait;
use std::{collections::HashMap, fmt::Debug, time::Duration};

/// Process-wide settings a command may read during `init`.
pub trait Executor: Send + Sync {
    fn api_key(&self, service: ServiceId) -> Option<&str>;
    fn endpoints(&self) -> &Endpoints;
    fn request_timeout(&self) -> Duration;
}

/// A chat command the host can dispatch to.
#[async_trait]
pub trait Command: Send + Sync + Debug {
    fn name(&self) -> &'static str;

    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Called once before the command is registered.
    fn init(&mut self, executor: &dyn Executor) -> Result<()>;

    async fn execute(&self, command: &CommandMessage) -> Result<Vec<ClientMessage>>;
}

/// The commands shipped by this crate, uninitialised.
pub fn builtin_commands() -> Vec<Box<dyn Command>> {
    vec![Box::new(WeatherCommand::new()), Box::new(TimeCommand::new())]
}

/// Command table assembled from an explicit list.
#[derive(Debug)]
pub struct CommandRegistry {
    commands: Vec<Box<dyn Command>>,
    index: HashMap<String, usize>,
}

impl CommandRegistry {
    /// Initialise every command and index it by name and aliases.
    pub fn new(executor: &dyn Executor, commands: Vec<Box<dyn Command>>) -> Result<Self> {
        let mut registry =
            Self { commands: Vec::with_capacity(commands.len()), index: HashMap::new() };

        for mut command in commands {
            command.init(executor)?;

            let slot = registry.commands.len();
            let keys = std::iter::once(command.name()).chain(command.aliases().iter().copied());
            for key in keys {
                let key = key.to_lowercase();
                if registry.index.insert(key.clone(), slot).is_some() {
                    return Err(CommandError::DuplicateCommand(key));
                }
            }

            tracing::debug!(command = command.name(), "registered command");
            registry.commands.push(command);
        }

        Ok(registry)
    }

    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.index.get(&name.to_lowercase()).map(|&slot| self.commands[slot].as_ref())
    }

    pub fn commands(&self) -> impl Iterator<Item = &dyn Command> {
        self.commands.iter().map(|c| c.as_ref())
    }

    /// Route `message` to the command named by it.
    pub async fn dispatch(&self, message: &CommandMessage) -> Result<Vec<ClientMessage>> {
        let command = self
            .get(message.command())
            .ok_or_else(|| CommandError::UnknownCommand(message.command().to_string()))?;

        tracing::info!(
            command = command.name(),
            sender = %message.sender().nick,
            "executing command"
        );
        command.execute(message).await
    }
}
