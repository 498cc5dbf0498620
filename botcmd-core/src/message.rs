use serde::{Deserialize, Serialize};

/// Chat user that issued a command or receives a reply.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct User {
    pub nick: String,
    pub id: String,
    pub is_mod: bool,
    pub is_admin: bool,
}

impl User {
    pub fn new(nick: impl Into<String>, id: impl Into<String>) -> Self {
        Self { nick: nick.into(), id: id.into(), ..Self::default() }
    }
}

/// A parsed command as handed over by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMessage {
    command: String,
    args: Vec<String>,
    arg_string: String,
    sender: User,
    private: bool,
}

impl CommandMessage {
    pub fn new(command: impl Into<String>, args: Vec<String>, sender: User, private: bool) -> Self {
        let arg_string = args.join(" ");
        Self { command: command.into(), args, arg_string, sender, private }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Arguments as the user typed them, space separated.
    pub fn arg_string(&self) -> &str {
        &self.arg_string
    }

    pub fn sender(&self) -> &User {
        &self.sender
    }

    pub fn private(&self) -> bool {
        self.private
    }
}

/// A reply produced by a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientMessage {
    pub message: String,
    pub recipient: User,
    pub private: bool,
}

impl ClientMessage {
    /// Reply addressed to the sender of `request`, mirroring its privacy flag.
    pub fn reply_to(message: String, request: &CommandMessage) -> Self {
        Self { message, recipient: request.sender().clone(), private: request.private() }
    }
}
