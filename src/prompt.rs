//! Interactive confirmation for destinations that are already present.
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Operator's answer to "replace the existing destination?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Delete the destination and create the symlink.
    Replace,
    /// Leave the destination alone and move on.
    Skip,
}

/// Source of replace/skip decisions.
///
/// The terminal implementation is [`TerminalConfirm`]; tests substitute a
/// mock.
#[cfg_attr(test, mockall::automock)]
pub trait Confirm {
    /// Ask whether the destination may be replaced by a link to `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if the answer cannot be read or the question cannot
    /// be written.
    fn confirm_replace(&mut self, source: &Path, destination: &Path) -> io::Result<Decision>;
}

/// Line-based y/n prompt over any reader and writer.
///
/// Re-asks until the trimmed, case-insensitive answer is `y` or `n`.
/// End of input counts as `n`.
#[derive(Debug)]
pub struct TerminalConfirm<R, W> {
    input: R,
    output: W,
}

impl TerminalConfirm<io::StdinLock<'static>, io::Stdout> {
    /// Prompt on the process's standard input and output.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalConfirm<R, W> {
    /// Prompt over the given reader and writer.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the prompt and return the writer (for inspecting output).
    pub fn into_output(self) -> W {
        self.output
    }

    fn read_answer(&mut self) -> io::Result<Option<Decision>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(Some(Decision::Skip));
        }
        Ok(parse_answer(&line))
    }
}

impl<R: BufRead, W: Write> Confirm for TerminalConfirm<R, W> {
    fn confirm_replace(&mut self, source: &Path, destination: &Path) -> io::Result<Decision> {
        writeln!(
            self.output,
            "Oops! I was trying to create a symlink, but the destination already exists!"
        )?;
        writeln!(self.output, " - from: {}", source.display())?;
        writeln!(self.output, " - to: {}", destination.display())?;
        write!(
            self.output,
            "Do you want to remove its contents and create the symlink? [y/N]: "
        )?;
        self.output.flush()?;

        loop {
            if let Some(decision) = self.read_answer()? {
                return Ok(decision);
            }
            write!(
                self.output,
                "I could not understand that. Do you want to remove the contents? [y/N]: "
            )?;
            self.output.flush()?;
        }
    }
}

/// Interpret one line of input; `None` means "ask again".
fn parse_answer(line: &str) -> Option<Decision> {
    match line.trim().to_lowercase().as_str() {
        "y" => Some(Decision::Replace),
        "n" => Some(Decision::Skip),
        _ => None,
    }
}
