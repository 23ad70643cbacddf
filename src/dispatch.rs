use thiserror::Error;

/// A controller operation decoded from free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play,
    Pause,
    Resume,
    Stop,
    Shuffle,
    Add,
    Next,
    Previous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("command not recognized")]
    Unrecognized,
}

/// Keyword groups in priority order. The first group with any keyword
/// contained in the input wins, so "play next" dispatches to Play.
const KEYWORD_GROUPS: &[(&[&str], Command)] = &[
    (&["play"], Command::Play),
    (&["pause"], Command::Pause),
    (&["resume"], Command::Resume),
    (&["stop"], Command::Stop),
    (&["shuffle"], Command::Shuffle),
    (&["add", "load"], Command::Add),
    (&["next"], Command::Next),
    (&["back"], Command::Previous),
];

/// Map a lowercased free-text string to a command by first-match-wins
/// substring test over the priority-ordered keyword groups.
pub fn parse_command(text: &str) -> Result<Command, DispatchError> {
    for (keywords, command) in KEYWORD_GROUPS {
        if keywords.iter().any(|keyword| text.contains(keyword)) {
            return Ok(*command);
        }
    }
    Err(DispatchError::Unrecognized)
}
