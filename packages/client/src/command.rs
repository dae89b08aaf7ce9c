//! Parsing of lines typed at the prompt.

use crate::error::CommandError;

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/join <username> <room>`
    Join { username: String, room: String },
    /// `/leave`
    Leave,
    /// `/quit`
    Quit,
    /// Any line not starting with `/`
    Say(String),
}

/// Parse one trimmed, non-empty input line.
///
/// Usernames are single words; everything after the username is the room
/// name, so `/join alice my room` joins the room `my room`.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let Some(rest) = line.strip_prefix('/') else {
        return Ok(Command::Say(line.to_string()));
    };

    let (name, args) = match rest.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (rest, ""),
    };

    match name {
        "join" => {
            let (username, room) = args
                .split_once(char::is_whitespace)
                .ok_or(CommandError::JoinUsage)?;
            let room = room.trim();
            if username.is_empty() || room.is_empty() {
                return Err(CommandError::JoinUsage);
            }
            Ok(Command::Join {
                username: username.to_string(),
                room: room.to_string(),
            })
        }
        "leave" => Ok(Command::Leave),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(format!("/{}", other))),
    }
}
