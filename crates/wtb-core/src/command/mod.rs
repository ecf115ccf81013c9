//! Command parsing and dispatch.
//!
//! Incoming chat text is parsed into a command name plus quote-aware
//! arguments, then routed through an explicit name -> handler registry built
//! at startup. Handler failures are rendered as user-facing text here; no
//! per-command error escapes to the transport layer.

pub mod handlers;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::{errors::Error, weather::WeatherDisplay, Result};

/// One reply per command invocation.
#[derive(Clone, Debug, PartialEq)]
pub enum Response {
    Text(String),
    Weather(WeatherDisplay),
}

/// A single chat command.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    fn name(&self) -> &'static str;
    /// Argument synopsis, without the prefix.
    fn usage(&self) -> &'static str;
    fn description(&self) -> &'static str;

    async fn handle(&self, args: &CommandArgs) -> Result<Response>;
}

/// Ordered argument tokens of one invocation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CommandArgs {
    tokens: Vec<String>,
}

impl CommandArgs {
    pub fn positional(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    /// Value of a `name value` flag pair anywhere in the token list. A flag
    /// name with no following token counts as absent.
    pub fn flag(&self, name: &str) -> Option<&str> {
        let at = self.tokens.iter().position(|t| t == name)?;
        self.tokens.get(at + 1).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// A parsed `<prefix><name> <args...>` line.
#[derive(Clone, Debug, PartialEq)]
pub struct CommandInvocation {
    pub name: String,
    pub args: CommandArgs,
}

/// `None` means the text does not start with the prefix (or carries nothing
/// after it) and is not a command at all.
pub fn parse_invocation(text: &str, prefix: char) -> Option<CommandInvocation> {
    let rest = text.trim_start().strip_prefix(prefix)?;

    let mut tokens = tokenize(rest);
    if tokens.is_empty() {
        return None;
    }

    let name = tokens.remove(0).to_lowercase();
    Some(CommandInvocation {
        name,
        args: CommandArgs { tokens },
    })
}

/// Whitespace split honoring double-quoted substrings, so region names with
/// spaces and quoted datetime strings arrive as single tokens. Quotes are
/// stripped; an unterminated quote runs to the end of the line.
fn tokenize(input: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in input.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        out.push(current);
    }

    out
}

/// Routes parsed invocations to registered handlers.
///
/// The registry is built explicitly at startup; there is no global
/// registration state.
pub struct CommandDispatcher {
    prefix: char,
    handlers: HashMap<&'static str, Box<dyn CommandHandler>>,
}

impl CommandDispatcher {
    pub fn new(prefix: char) -> Self {
        Self {
            prefix,
            handlers: HashMap::new(),
        }
    }

    pub fn prefix(&self) -> char {
        self.prefix
    }

    pub fn register(&mut self, handler: Box<dyn CommandHandler>) {
        self.handlers.insert(handler.name(), handler);
    }

    /// Handle one incoming message. `None` means the text is not a command
    /// and no reply should be sent; `Some` is always exactly one reply.
    pub async fn dispatch(&self, text: &str) -> Option<Response> {
        let invocation = parse_invocation(text, self.prefix)?;

        if invocation.name == "help" {
            return Some(self.help(&invocation.args));
        }

        let Some(handler) = self.handlers.get(invocation.name.as_str()) else {
            return Some(Response::Text(format!(
                "Command not found: {}",
                invocation.name
            )));
        };

        match handler.handle(&invocation.args).await {
            Ok(response) => Some(response),
            Err(err) => {
                tracing::warn!(command = %invocation.name, error = %err, "command failed");
                Some(Response::Text(user_message(&err)))
            }
        }
    }

    /// Built-in `help`: list registered commands, or detail one of them.
    fn help(&self, args: &CommandArgs) -> Response {
        if let Some(name) = args.positional(0) {
            let name = name.to_lowercase();
            return match self.handlers.get(name.as_str()) {
                Some(handler) => Response::Text(format!(
                    "{}{}\n{}",
                    self.prefix,
                    handler.usage(),
                    handler.description()
                )),
                None => Response::Text(format!("Command not found: {name}")),
            };
        }

        let mut names: Vec<&'static str> = self.handlers.keys().copied().collect();
        names.sort_unstable();

        let mut out = String::from("Available commands:\n");
        for name in names {
            let handler = &self.handlers[name];
            out.push_str(&format!(
                "{}{} - {}\n",
                self.prefix,
                handler.usage(),
                handler.description()
            ));
        }
        out.push_str(&format!("{}help <command> shows detailed usage.", self.prefix));
        Response::Text(out)
    }
}

/// Map an error kind to the text shown in chat. Provider payload problems
/// stay vague for the user; the full detail goes to the log at the dispatch
/// site.
fn user_message(err: &Error) -> String {
    match err {
        Error::UnknownRegion(_) | Error::InvalidUnit(_) => err.to_string(),
        Error::MalformedPayload(_) => {
            "The weather service returned an unexpected response. Please try again later."
                .to_string()
        }
        Error::ProviderStatus { status, .. } => format!(
            "The weather service rejected the request (status {status}). \
             Check the city name and try again."
        ),
        Error::Http(_) => "Could not reach the weather service. Please try again later.".to_string(),
        _ => "Something went wrong handling that command.".to_string(),
    }
}
