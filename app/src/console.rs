//! Line-oriented presentation layer.

use std::io::{BufRead, Write};

use thiserror::Error;
use tracing::{debug, warn};

use livestream_ipc::{ClientRole, ParticipantId, SessionEvent, SessionState};
use livestream_session::{ChannelDirectory, SessionHandle};

use crate::config::parse_role;
use crate::loopback::LoopbackRemote;

const HELP: &str = "\
commands:
  channels            list joinable channels
  join <n>            join channel n (1-based, as listed)
  leave               leave the current channel
  role host|audience  choose the role for the next join
  state               print the session state as JSON
  peer-join <uid>     simulate a remote participant joining
  peer-leave <uid>    simulate a remote participant leaving
  confirm             confirm a pending join (manual loopback mode)
  help                show this text
  quit                leave and exit";

/// A parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Channels,
    Join(usize),
    Leave,
    Role(ClientRole),
    State,
    PeerJoin(ParticipantId),
    PeerLeave(ParticipantId),
    Confirm,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("{command} expects {expected}")]
    BadArgument {
        command: &'static str,
        expected: &'static str,
    },
}

impl ConsoleCommand {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let arg = words.next();

        let command = match verb {
            "channels" => Self::Channels,
            "join" => {
                let number: usize = arg
                    .and_then(|a| a.parse().ok())
                    .filter(|&n| n >= 1)
                    .ok_or(ParseError::BadArgument {
                        command: "join",
                        expected: "a channel number starting at 1",
                    })?;
                Self::Join(number - 1)
            }
            "leave" => Self::Leave,
            "role" => Self::Role(arg.and_then(parse_role).ok_or(ParseError::BadArgument {
                command: "role",
                expected: "host or audience",
            })?),
            "state" => Self::State,
            "peer-join" => Self::PeerJoin(parse_participant("peer-join", arg)?),
            "peer-leave" => Self::PeerLeave(parse_participant("peer-leave", arg)?),
            "confirm" => Self::Confirm,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(ParseError::UnknownCommand(other.to_string())),
        };

        Ok(Some(command))
    }
}

fn parse_participant(command: &'static str, arg: Option<&str>) -> Result<ParticipantId, ParseError> {
    arg.and_then(|a| a.parse().ok())
        .map(ParticipantId)
        .ok_or(ParseError::BadArgument {
            command,
            expected: "a numeric uid",
        })
}

/// Render the state the way the original screen lays it out.
pub fn render_state(state: &SessionState, local: Option<ParticipantId>) -> String {
    let mut lines = vec![format!(
        "[{}] role: {}",
        state.phase().name(),
        state.role.name()
    )];

    if let Some(local) = local {
        lines.extend(
            state
                .video_surfaces(local)
                .into_iter()
                .map(|surface| format!("  {}", surface.caption)),
        );
    }

    if !state.status_message.is_empty() {
        lines.push(format!("status: {}", state.status_message));
    }

    lines.join("\n")
}

/// Console front end over a running session.
pub struct Console<'a> {
    handle: &'a SessionHandle,
    remote: &'a LoopbackRemote,
    last_selector: Option<usize>,
}

impl<'a> Console<'a> {
    pub fn new(handle: &'a SessionHandle, remote: &'a LoopbackRemote) -> Self {
        Self {
            handle,
            remote,
            last_selector: None,
        }
    }

    /// Read commands until `quit` or end of input.
    pub fn run(&mut self, input: impl BufRead, mut output: impl Write) -> anyhow::Result<()> {
        writeln!(output, "{HELP}")?;

        for line in input.lines() {
            let line = line?;
            let command = match ConsoleCommand::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    writeln!(output, "{e}")?;
                    continue;
                }
            };

            debug!(?command, "Console command");
            if command == ConsoleCommand::Quit {
                break;
            }

            self.execute(command, &mut output)?;
            self.print_events(&mut output)?;
        }

        Ok(())
    }

    fn execute(&mut self, command: ConsoleCommand, output: &mut impl Write) -> anyhow::Result<()> {
        match command {
            ConsoleCommand::Channels => {
                for (index, channel) in self.handle.directory().iter().enumerate() {
                    writeln!(
                        output,
                        "{}: {} (uid {})",
                        ChannelDirectory::label(index),
                        channel.channel_name,
                        channel.local_participant_id
                    )?;
                }
            }
            ConsoleCommand::Join(selector) => match self.handle.join(selector) {
                Ok(()) => self.last_selector = Some(selector),
                Err(e) => writeln!(output, "{e}")?,
            },
            ConsoleCommand::Leave => self.handle.leave()?,
            ConsoleCommand::Role(role) => {
                if let Err(e) = self.handle.set_role(role) {
                    writeln!(output, "{e}")?;
                }
            }
            ConsoleCommand::State => {
                let state = self.handle.snapshot();
                writeln!(output, "{}", serde_json::to_string_pretty(&state)?)?;
                writeln!(output, "{}", render_state(&state, self.local_participant()))?;
            }
            ConsoleCommand::PeerJoin(id) => self.remote.participant_joined(id),
            ConsoleCommand::PeerLeave(id) => self.remote.participant_left(id),
            ConsoleCommand::Confirm => self.remote.confirm_join(),
            ConsoleCommand::Help => writeln!(output, "{HELP}")?,
            ConsoleCommand::Quit => {}
        }

        Ok(())
    }

    fn print_events(&self, output: &mut impl Write) -> anyhow::Result<()> {
        let events = match self.handle.poll_events() {
            Ok(events) => events,
            Err(e) => {
                warn!("Event poll failed: {}", e);
                return Ok(());
            }
        };

        for event in events {
            match event {
                SessionEvent::StateChanged { current, .. } => {
                    writeln!(output, "{}", render_state(&current, self.local_participant()))?;
                }
                SessionEvent::LeaveConfirmed => writeln!(output, "leave confirmed")?,
                SessionEvent::Ready | SessionEvent::Shutdown => {}
            }
        }

        Ok(())
    }

    fn local_participant(&self) -> Option<ParticipantId> {
        let selector = self.last_selector?;
        self.handle
            .directory()
            .get(selector)
            .ok()
            .map(|channel| channel.local_participant_id)
    }
}
