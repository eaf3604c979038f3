use anyhow::{Context, Result};
use std::fmt::Display;
use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

/// Line-oriented operator I/O: print, prompt, block on one line of input.
///
/// Reads are plain blocking calls made from the async flow. The operator is
/// the only producer and nothing else runs while a prompt waits, so the
/// runtime thread is allowed to block there.
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

/// Stdin is taken per read rather than locked for the whole run, which keeps
/// futures holding a `Terminal` `Send`
pub type StdTerminal = Terminal<BufReader<Stdin>, Stdout>;

impl StdTerminal {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, line: impl Display) -> Result<()> {
        writeln!(self.output, "{line}").context("Failed to write to terminal")
    }

    /// Shows `prompt` and waits for one line; `None` once input is closed
    pub fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}").context("Failed to write to terminal")?;
        self.output.flush().context("Failed to flush terminal")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read from terminal")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.output
    }
}
