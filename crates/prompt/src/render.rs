//! Styled lines, frames and the erase-and-redraw renderer.
//!
//! Prompt states map to a [`Frame`] without touching the terminal. A
//! [`Renderer`] remembers how many rows the previous frame of the current
//! prompt occupied and hands that to the [`Screen`], which erases exactly
//! those rows before writing the new frame.

use std::io;
use std::ops::Range;

use crossterm::style::ContentStyle;

use crate::theme::Theme;

/// A run of text with one style.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub style: ContentStyle,
}

/// One terminal row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn styled(text: impl Into<String>, style: ContentStyle) -> Self {
        Self::new().push(text, style)
    }

    #[must_use]
    pub fn push(mut self, text: impl Into<String>, style: ContentStyle) -> Self {
        self.spans.push(Span {
            text: text.into(),
            style,
        });
        self
    }

    /// The unstyled text of the row.
    #[must_use]
    pub fn text(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }

    /// Width in characters.
    #[must_use]
    pub fn width(&self) -> usize {
        self.spans.iter().map(|span| span.text.chars().count()).sum()
    }
}

/// Where the terminal cursor should rest after a frame is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPosition {
    pub row: usize,
    pub column: usize,
}

/// Everything a prompt wants on screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub lines: Vec<Line>,
    /// `None` leaves the cursor hidden at the end of the last row.
    pub cursor: Option<CursorPosition>,
}

impl Frame {
    #[must_use]
    pub fn new(lines: Vec<Line>) -> Self {
        Self { lines, cursor: None }
    }

    #[must_use]
    pub fn with_cursor(mut self, row: usize, column: usize) -> Self {
        self.cursor = Some(CursorPosition { row, column });
        self
    }

    /// Row the terminal cursor ends up on after drawing.
    #[must_use]
    pub fn cursor_row(&self) -> usize {
        self.cursor
            .map_or(self.lines.len().saturating_sub(1), |cursor| cursor.row)
    }

    /// Unstyled rows, mostly for assertions.
    #[must_use]
    pub fn texts(&self) -> Vec<String> {
        self.lines.iter().map(Line::text).collect()
    }
}

/// The region drawn by the previous frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Erase {
    /// Rows drawn.
    pub lines: usize,
    /// Row (within those lines) the cursor was left on.
    pub cursor_row: usize,
}

/// Sink for rendered frames.
pub trait Screen {
    /// Erases the `erase` region, then writes `frame` in its place.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output fails.
    fn redraw(&mut self, erase: Erase, frame: &Frame) -> io::Result<()>;

    /// Moves below the `drawn` region so later output starts on a fresh row.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output fails.
    fn finish(&mut self, drawn: Erase) -> io::Result<()>;
}

/// Per-prompt redraw bookkeeping.
#[derive(Debug, Default)]
pub struct Renderer {
    previous: Erase,
}

impl Renderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the previously drawn rows with `frame`.
    ///
    /// # Errors
    ///
    /// Returns an error if the screen fails to write.
    pub fn draw<S: Screen + ?Sized>(&mut self, screen: &mut S, frame: &Frame) -> io::Result<()> {
        screen.redraw(self.previous, frame)?;
        self.previous = Erase {
            lines: frame.lines.len(),
            cursor_row: frame.cursor_row(),
        };
        Ok(())
    }

    /// Leaves the drawn rows in place and resets for the next prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if the screen fails to write.
    pub fn finish<S: Screen + ?Sized>(&mut self, screen: &mut S) -> io::Result<()> {
        screen.finish(self.previous)?;
        self.previous = Erase::default();
        Ok(())
    }

    #[must_use]
    pub fn drawn(&self) -> Erase {
        self.previous
    }
}

/// The slice of a list of `total` rows to show so that `cursor` stays visible.
///
/// The window is centred on the cursor and clamped to the list bounds.
#[must_use]
pub fn page_window(total: usize, cursor: usize, page_size: Option<usize>) -> Range<usize> {
    let Some(page_size) = page_size.filter(|&size| size > 0 && size < total) else {
        return 0..total;
    };

    let start = cursor
        .saturating_sub(page_size / 2)
        .min(total - page_size);
    start..start + page_size
}

/// Appends the rows of `window` (with "more" indicators) to `lines`.
pub(crate) fn push_window(
    lines: &mut Vec<Line>,
    theme: &Theme,
    total: usize,
    window: &Range<usize>,
    mut row: impl FnMut(usize) -> Line,
) {
    if window.start > 0 {
        lines.push(Line::styled(
            format!("  {}", theme.more_above),
            theme.instruction_style,
        ));
    }

    lines.extend(window.clone().map(&mut row));

    if window.end < total {
        lines.push(Line::styled(
            format!("  {}", theme.more_below),
            theme.instruction_style,
        ));
    }
}

/// `? message` followed by any extra spans.
#[must_use]
pub fn question_line(theme: &Theme, message: &str) -> Line {
    Line::new()
        .push(theme.question_mark.clone(), theme.question_mark_style)
        .push(" ", theme.plain_style)
        .push(message.to_string(), theme.message_style)
        .push(" ", theme.plain_style)
}

/// The single line left on screen once a prompt has been answered.
#[must_use]
pub fn answered_frame(theme: &Theme, message: &str, answer: &str) -> Frame {
    Frame::new(vec![
        question_line(theme, message).push(answer.to_string(), theme.answer_style)
    ])
}

/// Optional inline error shown below the prompt.
pub(crate) fn push_error(lines: &mut Vec<Line>, theme: &Theme, error: Option<&str>) {
    if let Some(error) = error {
        lines.push(Line::styled(format!("✗ {error}"), theme.error_style));
    }
}
