//! The crossterm-backed key source and screen.

use std::io::{self, stdout, IsTerminal, Stdout, Write};

use crossterm::cursor::{Hide, MoveDown, MoveToColumn, MoveUp, Show};
use crossterm::event;
use crossterm::style::{Print, PrintStyledContent, StyledContent};
use crossterm::terminal::{self, disable_raw_mode, enable_raw_mode, Clear, ClearType};
use crossterm::{execute, queue};
use log::debug;

use crate::error::{Error, Result};
use crate::key::{Key, KeySource};
use crate::render::{Erase, Frame, Screen};

/// Reads keys from the terminal, skipping events no prompt uses.
#[derive(Debug, Default)]
pub struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn read_key(&mut self) -> Result<Key> {
        loop {
            if let Some(key) = Key::decode(&event::read()?) {
                return Ok(key);
            }
        }
    }
}

/// Writes frames as ANSI sequences to any writer.
///
/// Rows are cut to one column less than `width` so that none of them wraps and
/// the number of physical rows always equals the number of lines drawn.
#[derive(Debug)]
pub struct AnsiScreen<W: Write> {
    out: W,
    width: usize,
}

impl<W: Write> AnsiScreen<W> {
    pub fn new(out: W, width: u16) -> Self {
        Self {
            out,
            width: usize::from(width),
        }
    }

    pub fn set_width(&mut self, width: u16) {
        self.width = usize::from(width);
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn max_columns(&self) -> usize {
        self.width.saturating_sub(1).max(1)
    }
}

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

impl<W: Write> Screen for AnsiScreen<W> {
    fn redraw(&mut self, erase: Erase, frame: &Frame) -> io::Result<()> {
        queue!(self.out, MoveToColumn(0))?;
        if erase.cursor_row > 0 {
            queue!(self.out, MoveUp(to_u16(erase.cursor_row)))?;
        }
        queue!(self.out, Clear(ClearType::FromCursorDown))?;

        let max_columns = self.max_columns();
        for (index, line) in frame.lines.iter().enumerate() {
            if index > 0 {
                queue!(self.out, Print("\r\n"))?;
            }

            let mut remaining = max_columns;
            for span in &line.spans {
                if remaining == 0 {
                    break;
                }
                let text: String = span.text.chars().take(remaining).collect();
                remaining -= text.chars().count();
                queue!(self.out, PrintStyledContent(StyledContent::new(span.style, text)))?;
            }
        }

        match frame.cursor {
            Some(cursor) => {
                let up = frame.lines.len().saturating_sub(1).saturating_sub(cursor.row);
                if up > 0 {
                    queue!(self.out, MoveUp(to_u16(up)))?;
                }
                queue!(
                    self.out,
                    MoveToColumn(to_u16(cursor.column.min(max_columns))),
                    Show
                )?;
            }
            None => queue!(self.out, Hide)?,
        }

        self.out.flush()
    }

    fn finish(&mut self, drawn: Erase) -> io::Result<()> {
        if drawn.lines > 0 {
            let down = drawn.lines.saturating_sub(1).saturating_sub(drawn.cursor_row);
            if down > 0 {
                queue!(self.out, MoveDown(to_u16(down)))?;
            }
            queue!(self.out, Print("\r\n"))?;
        }
        queue!(self.out, MoveToColumn(0))?;
        self.out.flush()
    }
}

struct RawModeGuard;

impl RawModeGuard {
    fn acquire() -> io::Result<Self> {
        enable_raw_mode()?;
        debug!("Raw mode enabled");
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        // Restore the terminal on every exit path, including unwinding
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), Show);
        debug!("Raw mode disabled");
    }
}

/// Stdout in raw mode. Dropping it restores the terminal.
pub struct TerminalScreen {
    inner: AnsiScreen<Stdout>,
    _guard: RawModeGuard,
}

impl Screen for TerminalScreen {
    fn redraw(&mut self, erase: Erase, frame: &Frame) -> io::Result<()> {
        if let Ok((width, _)) = terminal::size() {
            self.inner.set_width(width);
        }
        self.inner.redraw(erase, frame)
    }

    fn finish(&mut self, drawn: Erase) -> io::Result<()> {
        self.inner.finish(drawn)
    }
}

/// The controlling terminal, split into its input and output halves.
pub struct Terminal {
    pub keys: TerminalKeys,
    pub screen: TerminalScreen,
}

impl Terminal {
    /// Enters raw mode. The mode is left when the returned screen is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotATerminal`] when stdin or stdout is redirected, or a
    /// terminal error if raw mode cannot be enabled.
    pub fn open() -> Result<Self> {
        if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
            return Err(Error::NotATerminal);
        }

        let guard = RawModeGuard::acquire()?;
        let (width, _) = terminal::size()?;

        Ok(Self {
            keys: TerminalKeys,
            screen: TerminalScreen {
                inner: AnsiScreen::new(stdout(), width),
                _guard: guard,
            },
        })
    }
}
