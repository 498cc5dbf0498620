use async_trait::async_trait;

use crate::{
    ClientMessage, CommandMessage,
    command::{Command, Executor},
    error::{CommandError, Result},
    format::render_time,
    http::build_client,
    resolver::LocationTimeResolver,
};

/// `time <place>`: current local time at a place.
#[derive(Debug, Default)]
pub struct TimeCommand {
    resolver: Option<LocationTimeResolver>,
}

impl TimeCommand {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Command for TimeCommand {
    fn name(&self) -> &'static str {
        "time"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["t"]
    }

    fn init(&mut self, executor: &dyn Executor) -> Result<()> {
        let http = build_client(executor.request_timeout())?;
        self.resolver = Some(LocationTimeResolver::new(http, executor.endpoints()));
        Ok(())
    }

    async fn execute(&self, command: &CommandMessage) -> Result<Vec<ClientMessage>> {
        if command.args().is_empty() {
            return Err(CommandError::MissingArguments);
        }

        let resolver = self.resolver.as_ref().ok_or(CommandError::NotInitialized("time"))?;
        let located = resolver.resolve(command.arg_string()).await?;

        let text = render_time(&located.local_time.now, &located.location);
        Ok(vec![ClientMessage::reply_to(text, command)])
    }
}
