//! Line-oriented command shell
//!
//! ```text
//! create <name> <text...>
//! connect <parent> <child>
//! remove <name>
//! show <name>
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use std::io::{self, BufRead, Write};
use std::str::FromStr;
use tombgraph_core::{GraphConfig, GraphError, Registry};

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Register a node
    Create {
        /// Node name
        name: String,
        /// Text payload, rest of the line
        text: String,
    },

    /// Link `child` under `parent`
    Connect {
        /// Parent name
        parent: String,
        /// Child name
        child: String,
    },

    /// Remove a node
    Remove {
        /// Node name
        name: String,
    },

    /// Render a node and its live children
    Show {
        /// Node name
        name: String,
    },
}

/// Malformed command line
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Line is blank
    #[error("empty command")]
    Empty,

    /// First word is not a known verb
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Required argument absent
    #[error("{command}: missing {argument}")]
    MissingArgument {
        /// Verb being parsed
        command: &'static str,
        /// Name of the absent argument
        argument: &'static str,
    },

    /// Extra words after the last argument
    #[error("{command}: unexpected argument {extra}")]
    UnexpectedArgument {
        /// Verb being parsed
        command: &'static str,
        /// First surplus word
        extra: String,
    },
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(verb, rest)| (verb, rest.trim_start()));

        match verb {
            "" => Err(ParseError::Empty),
            "create" => {
                let (name, text) = rest
                    .split_once(char::is_whitespace)
                    .map_or((rest, ""), |(name, text)| (name, text.trim()));
                let name = required("create", "name", name)?;
                let text = required("create", "text", text)?;
                Ok(Self::Create { name, text })
            }
            "connect" => {
                let mut words = rest.split_whitespace();
                let parent = required("connect", "parent", words.next().unwrap_or(""))?;
                let child = required("connect", "child", words.next().unwrap_or(""))?;
                no_more("connect", words)?;
                Ok(Self::Connect { parent, child })
            }
            "remove" | "show" => {
                let command = if verb == "remove" { "remove" } else { "show" };
                let mut words = rest.split_whitespace();
                let name = required(command, "name", words.next().unwrap_or(""))?;
                no_more(command, words)?;
                Ok(if command == "remove" {
                    Self::Remove { name }
                } else {
                    Self::Show { name }
                })
            }
            other => Err(ParseError::UnknownCommand(other.to_string())),
        }
    }
}

fn required(command: &'static str, argument: &'static str, value: &str) -> Result<String, ParseError> {
    if value.is_empty() {
        Err(ParseError::MissingArgument { command, argument })
    } else {
        Ok(value.to_string())
    }
}

fn no_more<'a>(command: &'static str, mut words: impl Iterator<Item = &'a str>) -> Result<(), ParseError> {
    match words.next() {
        Some(extra) => Err(ParseError::UnexpectedArgument {
            command,
            extra: extra.to_string(),
        }),
        None => Ok(()),
    }
}

/// Parse one script line; `None` for blank lines and comments
///
/// # Errors
/// Returns [`ParseError`] for malformed commands
pub fn parse_line(line: &str) -> Result<Option<Command>, ParseError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    trimmed.parse().map(Some)
}

/// Counts from a script run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Commands parsed and executed
    pub commands: usize,
    /// Lines that failed to parse or execute
    pub failures: usize,
}

/// Command dispatcher over an owned registry
#[derive(Debug, Default)]
pub struct Shell {
    registry: Registry,
}

impl Shell {
    /// Shell over an empty registry with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shell over an empty registry with custom configuration
    #[must_use]
    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            registry: Registry::with_config(config),
        }
    }

    /// Underlying registry
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Execute one command. `show` yields its rendering; other commands
    /// yield nothing on success.
    ///
    /// # Errors
    /// Propagates [`GraphError`] from the registry
    pub fn execute(&self, command: &Command) -> Result<Option<String>, GraphError> {
        match command {
            Command::Create { name, text } => self.registry.create(name, text).map(|_| None),
            Command::Connect { parent, child } => self.registry.connect(parent, child).map(|()| None),
            Command::Remove { name } => self.registry.remove(name).map(|_| None),
            Command::Show { name } => Ok(Some(self.registry.show(name).to_string())),
        }
    }

    /// Run a script, writing `show` output and `error: ...` lines to `output`
    ///
    /// Failures do not stop the run.
    ///
    /// # Errors
    /// Returns I/O errors from reading `input` or writing `output`
    pub fn run<R: BufRead, W: Write>(&self, input: R, mut output: W) -> io::Result<RunSummary> {
        let mut summary = RunSummary::default();

        for (index, line) in input.lines().enumerate() {
            let line = line?;
            let command = match parse_line(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    tracing::warn!(line = index + 1, error = %e, "rejected command");
                    summary.failures += 1;
                    writeln!(output, "error: {e}")?;
                    continue;
                }
            };

            summary.commands += 1;
            match self.execute(&command) {
                Ok(Some(rendered)) => writeln!(output, "{rendered}")?,
                Ok(None) => {}
                Err(e) => {
                    tracing::debug!(line = index + 1, error = %e, "command failed");
                    summary.failures += 1;
                    writeln!(output, "error: {e}")?;
                }
            }
        }

        output.flush()?;
        Ok(summary)
    }
}
