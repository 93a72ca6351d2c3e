//! Glyphs and colours used when rendering prompts.

use crossterm::style::{Attribute, Color, ContentStyle};

use crate::error::{Error, Result};

/// Visual configuration shared by every prompt of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub question_mark: String,
    pub pointer: String,
    pub checked: String,
    pub unchecked: String,
    pub more_above: String,
    pub more_below: String,
    pub question_mark_style: ContentStyle,
    pub message_style: ContentStyle,
    pub instruction_style: ContentStyle,
    pub pointer_style: ContentStyle,
    pub selected_style: ContentStyle,
    pub disabled_style: ContentStyle,
    pub separator_style: ContentStyle,
    pub answer_style: ContentStyle,
    pub error_style: ContentStyle,
    pub plain_style: ContentStyle,
}

fn style(foreground: Option<Color>, attributes: &[Attribute]) -> ContentStyle {
    let mut style = ContentStyle::new();
    style.foreground_color = foreground;
    for attribute in attributes {
        style.attributes.set(*attribute);
    }
    style
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            question_mark: "?".to_string(),
            pointer: "»".to_string(),
            checked: "●".to_string(),
            unchecked: "○".to_string(),
            more_above: "↑ more".to_string(),
            more_below: "↓ more".to_string(),
            question_mark_style: style(Some(Color::Green), &[Attribute::Bold]),
            message_style: style(None, &[Attribute::Bold]),
            instruction_style: style(Some(Color::DarkGrey), &[]),
            pointer_style: style(Some(Color::Cyan), &[Attribute::Bold]),
            selected_style: style(Some(Color::Cyan), &[]),
            disabled_style: style(Some(Color::DarkGrey), &[Attribute::Italic]),
            separator_style: style(Some(Color::DarkGrey), &[]),
            answer_style: style(Some(Color::DarkYellow), &[Attribute::Bold]),
            error_style: style(Some(Color::Red), &[]),
            plain_style: ContentStyle::new(),
        }
    }
}

impl Theme {
    /// Colour for the pointer, highlighted and checked choices.
    #[must_use]
    pub fn with_accent(mut self, color: Color) -> Self {
        self.pointer_style.foreground_color = Some(color);
        self.selected_style.foreground_color = Some(color);
        self
    }

    #[must_use]
    pub fn with_answer_color(mut self, color: Color) -> Self {
        self.answer_style.foreground_color = Some(color);
        self
    }

    #[must_use]
    pub fn with_disabled_color(mut self, color: Color) -> Self {
        self.disabled_style.foreground_color = Some(color);
        self
    }

    #[must_use]
    pub fn with_error_color(mut self, color: Color) -> Self {
        self.error_style.foreground_color = Some(color);
        self
    }

    /// Plain ASCII glyphs for terminals without unicode support.
    #[must_use]
    pub fn ascii(mut self) -> Self {
        self.pointer = ">".to_string();
        self.checked = "[x]".to_string();
        self.unchecked = "[ ]".to_string();
        self.more_above = "^ more".to_string();
        self.more_below = "v more".to_string();
        self
    }
}

/// Parses a colour name as accepted in configuration files.
///
/// # Errors
///
/// Returns [`Error::UnknownColorName`] for names outside the crossterm palette.
pub fn parse_color(name: &str) -> Result<Color> {
    Ok(match name.to_lowercase().as_str() {
        "black" => Color::Black,
        "darkgrey" => Color::DarkGrey,
        "red" => Color::Red,
        "darkred" => Color::DarkRed,
        "green" => Color::Green,
        "darkgreen" => Color::DarkGreen,
        "yellow" => Color::Yellow,
        "darkyellow" => Color::DarkYellow,
        "blue" => Color::Blue,
        "darkblue" => Color::DarkBlue,
        "magenta" => Color::Magenta,
        "darkmagenta" => Color::DarkMagenta,
        "cyan" => Color::Cyan,
        "darkcyan" => Color::DarkCyan,
        "white" => Color::White,
        "grey" => Color::Grey,
        _ => return Err(Error::UnknownColorName(name.to_string())),
    })
}

/// Whether the locale advertises UTF-8, so emoji and box glyphs can be printed.
#[must_use]
pub fn supports_emoji() -> bool {
    ["LC_ALL", "LC_CTYPE", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.is_empty())
        .is_some_and(|value| {
            let value = value.to_lowercase();
            value.contains("utf-8") || value.contains("utf8")
        })
}
