/// Reserved input literal that restarts the session instead of being
/// submitted as a message.
pub const RESTART_COMMAND: &str = "!restart";

/// Returns true when the trimmed input is exactly the restart command.
/// Anything else, including other `!`-prefixed text, is a normal submission.
pub fn is_restart_command(input: &str) -> bool {
    input.trim() == RESTART_COMMAND
}
