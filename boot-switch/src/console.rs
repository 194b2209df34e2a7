//! Talking to the person at the keyboard.

use std::io::{self, BufRead, Write};

/// Confirmation prompts and plain text notices.
pub trait Console {
    /// Asks a yes/no question. Only `y` and `yes` count as yes.
    fn confirm(&mut self, question: &str) -> io::Result<bool>;

    fn say(&mut self, line: &str);
}

/// Whether `answer` is an affirmative reply to a `(y/N)` prompt.
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// stdin and stdout.
#[derive(Debug, Default)]
pub struct Terminal;

impl Console for Terminal {
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{question} (y/N): ")?;
        stdout.flush()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;

        Ok(is_yes(&answer))
    }

    fn say(&mut self, line: &str) {
        println!("{line}");
    }
}
