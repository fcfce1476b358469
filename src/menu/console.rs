//! Line-oriented console I/O
//!
//! Wraps an input reader and an output writer, adding prompts and optional
//! crossterm colors.

use std::io::{self, BufRead, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{Clear, ClearType},
};

/// Console used by the interactive menu
pub struct Console<R, W> {
    input: R,
    output: W,
    color: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Create a console; `color` enables styling and screen clearing
    pub fn new(input: R, output: W, color: bool) -> Self {
        Self {
            input,
            output,
            color,
        }
    }

    /// Clear the screen (only when colors are enabled)
    pub fn clear(&mut self) -> io::Result<()> {
        if self.color {
            queue!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }

    /// Write plain text followed by a newline
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    /// Write a bold section heading
    pub fn heading(&mut self, text: &str) -> io::Result<()> {
        if self.color {
            queue!(
                self.output,
                SetAttribute(Attribute::Bold),
                SetForegroundColor(Color::Blue),
                Print(text),
                ResetColor,
                SetAttribute(Attribute::Reset),
                Print("\n")
            )
        } else {
            self.line(text)
        }
    }

    /// Write a message reporting a completed operation (green)
    pub fn success(&mut self, text: &str) -> io::Result<()> {
        self.colored(Color::Green, text)
    }

    /// Write a message reporting a rejected operation (red)
    pub fn failure(&mut self, text: &str) -> io::Result<()> {
        self.colored(Color::Red, text)
    }

    fn colored(&mut self, color: Color, text: &str) -> io::Result<()> {
        if self.color {
            queue!(
                self.output,
                SetForegroundColor(color),
                Print(text),
                ResetColor,
                Print("\n")
            )
        } else {
            self.line(text)
        }
    }

    /// Show a prompt and read one trimmed line
    ///
    /// Returns `None` at end of input.
    pub fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        if self.color {
            queue!(
                self.output,
                SetForegroundColor(Color::Yellow),
                Print(label),
                ResetColor
            )?;
        } else {
            write!(self.output, "{}", label)?;
        }
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Flush queued output
    pub fn flush(&mut self) -> io::Result<()> {
        self.output.flush()
    }

    /// Give back the output writer
    pub fn into_output(self) -> W {
        self.output
    }
}
