//! Confirmation prompts for destructive commands.

use std::io::{self, BufRead, Write};

pub trait Confirm {
    /// Returns true when the user chose to proceed.
    fn confirm(&mut self, message: &str) -> io::Result<bool>;
}

/// Always proceeds. Used for `--yes`.
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _message: &str) -> io::Result<bool> {
        Ok(true)
    }
}

/// Asks on `output` and reads a y/N answer from `input`.
pub struct TerminalConfirm<R, W> {
    input: R,
    output: W,
}

impl TerminalConfirm<io::StdinLock<'static>, io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> TerminalConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Confirm for TerminalConfirm<R, W> {
    fn confirm(&mut self, message: &str) -> io::Result<bool> {
        write!(self.output, "{} [y/N] ", message)?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        Ok(matches!(
            answer.trim().to_lowercase().as_str(),
            "y" | "yes"
        ))
    }
}

/// Picks the prompt for a command's `--yes` flag.
pub fn confirmer(assume_yes: bool) -> Box<dyn Confirm> {
    if assume_yes {
        Box::new(AssumeYes)
    } else {
        Box::new(TerminalConfirm::stdio())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn answer(input: &str) -> (bool, String) {
        let mut output = Vec::new();
        let proceeded = TerminalConfirm::new(Cursor::new(input.to_string()), &mut output)
            .confirm("Delete it?")
            .unwrap();
        (proceeded, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_yes_answers() {
        assert!(answer("y\n").0);
        assert!(answer("YES\n").0);
        assert!(answer("  yes  \n").0);
    }

    #[test]
    fn test_other_answers_cancel() {
        assert!(!answer("n\n").0);
        assert!(!answer("\n").0);
        assert!(!answer("").0);
        assert!(!answer("maybe\n").0);
    }

    #[test]
    fn test_prompt_written() {
        let (_, output) = answer("n\n");
        assert_eq!(output, "Delete it? [y/N] ");
    }

    #[test]
    fn test_assume_yes() {
        assert!(AssumeYes.confirm("anything").unwrap());
    }
}
