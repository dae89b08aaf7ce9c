//! UI utilities for the client.

use std::io::Write;

/// Prompt shown by the line editor
pub const PROMPT: &str = "> ";

/// Redisplay the prompt after printing output
pub fn redisplay_prompt() {
    print!("{}", PROMPT);
    std::io::stdout().flush().ok();
}
