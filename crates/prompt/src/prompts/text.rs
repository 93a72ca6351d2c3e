//! Free text entry: `text`, `password` and `path` prompts.

use crate::answer::Answer;
use crate::key::Key;
use crate::render::{push_error, question_line, Frame, Line};
use crate::theme::Theme;
use crate::validation::{self, Validation, Validator};

use super::buffer::LineBuffer;
use super::path::{common_prefix, EntryLister, PathConfig};
use super::{PromptState, Step};

const MULTILINE_INSTRUCTION: &str = "(Finish with Esc then Enter)";

/// Default glyph shown for every password character.
pub const DEFAULT_MASK: char = '*';

#[derive(Debug, Default)]
pub struct TextConfig {
    pub(crate) default: Option<String>,
    pub(crate) validate: Option<Validator<str>>,
    pub(crate) multiline: bool,
    pub(crate) instruction: Option<String>,
}

impl TextConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Submitted when the buffer is left empty.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    #[must_use]
    pub fn with_validator(mut self, validator: Validator<str>) -> Self {
        self.validate = Some(validator);
        self
    }

    /// Enter inserts a newline; Escape followed by Enter submits.
    #[must_use]
    pub fn multiline(mut self) -> Self {
        self.multiline = true;
        self
    }

    #[must_use]
    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = Some(instruction.into());
        self
    }
}

#[derive(Debug)]
pub struct PasswordConfig {
    pub(crate) validate: Option<Validator<str>>,
    pub(crate) mask: char,
    pub(crate) instruction: Option<String>,
}

impl PasswordConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            validate: None,
            mask: DEFAULT_MASK,
            instruction: None,
        }
    }

    #[must_use]
    pub fn with_validator(mut self, validator: Validator<str>) -> Self {
        self.validate = Some(validator);
        self
    }

    #[must_use]
    pub fn with_mask(mut self, mask: char) -> Self {
        self.mask = mask;
        self
    }

    #[must_use]
    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = Some(instruction.into());
        self
    }

    #[must_use]
    pub fn mask(&self) -> char {
        self.mask
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
enum Mode<'a> {
    Plain,
    Masked(char),
    Path {
        lister: &'a dyn EntryLister,
        only_directories: bool,
    },
}

/// Buffer state shared by the text, password and path prompts.
#[derive(Clone)]
pub struct TextState<'a> {
    message: &'a str,
    default: Option<&'a str>,
    validate: Option<&'a Validator<str>>,
    instruction: Option<&'a str>,
    multiline: bool,
    mode: Mode<'a>,
    buffer: LineBuffer,
    error: Option<String>,
    escape_pending: bool,
    completions: Vec<String>,
}

impl<'a> TextState<'a> {
    #[must_use]
    pub fn text(message: &'a str, config: &'a TextConfig) -> Self {
        Self::start(
            message,
            config.default.as_deref(),
            config.validate.as_ref(),
            config.instruction.as_deref(),
            config.multiline,
            Mode::Plain,
        )
    }

    #[must_use]
    pub fn password(message: &'a str, config: &'a PasswordConfig) -> Self {
        Self::start(
            message,
            None,
            config.validate.as_ref(),
            config.instruction.as_deref(),
            false,
            Mode::Masked(config.mask),
        )
    }

    #[must_use]
    pub fn path(message: &'a str, config: &'a PathConfig) -> Self {
        Self::start(
            message,
            config.default.as_deref(),
            config.validate.as_ref(),
            config.instruction.as_deref(),
            false,
            Mode::Path {
                lister: config.lister.as_ref(),
                only_directories: config.only_directories,
            },
        )
    }

    fn start(
        message: &'a str,
        default: Option<&'a str>,
        validate: Option<&'a Validator<str>>,
        instruction: Option<&'a str>,
        multiline: bool,
        mode: Mode<'a>,
    ) -> Self {
        Self {
            message,
            default,
            validate,
            instruction,
            multiline,
            mode,
            buffer: LineBuffer::new(),
            error: None,
            escape_pending: false,
            completions: Vec::new(),
        }
    }

    #[must_use]
    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn completions(&self) -> &[String] {
        &self.completions
    }

    /// The value Enter would submit.
    fn pending_value(&self) -> String {
        if self.buffer.is_empty() {
            self.default.unwrap_or_default().to_string()
        } else {
            self.buffer.text()
        }
    }

    fn submit(mut self) -> Step<Self> {
        let value = self.pending_value();
        match validation::run(self.validate, value.as_str()) {
            Validation::Valid => Step::Submit(Answer::Text(value)),
            Validation::Invalid(message) => {
                self.error = Some(message);
                Step::Continue(self)
            }
        }
    }

    fn complete(&mut self) {
        let Mode::Path {
            lister,
            only_directories,
        } = self.mode
        else {
            return;
        };

        let candidates = lister.list_entries(&self.buffer.text(), only_directories);
        match candidates.len() {
            0 => self.completions.clear(),
            1 => {
                self.buffer.replace(&candidates[0]);
                self.completions.clear();
            }
            _ => {
                let prefix = common_prefix(&candidates);
                if prefix.chars().count() > self.buffer.len() {
                    self.buffer.replace(&prefix);
                }
                self.completions = candidates;
            }
        }
    }

    fn displayed(&self, text: &str) -> String {
        match self.mode {
            Mode::Masked(mask) => text
                .chars()
                .map(|c| if c == '\n' { c } else { mask })
                .collect(),
            Mode::Plain | Mode::Path { .. } => text.to_string(),
        }
    }
}

impl PromptState for TextState<'_> {
    fn handle_key(mut self, key: Key) -> Step<Self> {
        let escape_pending = std::mem::take(&mut self.escape_pending);

        match key {
            Key::CtrlC => return Step::Cancel,
            Key::Enter if self.multiline && !escape_pending => {
                self.buffer.insert('\n');
                self.error = None;
            }
            Key::Enter => return self.submit(),
            Key::Escape => self.escape_pending = self.multiline,
            Key::Tab => self.complete(),
            key => {
                if self.buffer.apply(key) == Some(true) {
                    self.error = None;
                    self.completions.clear();
                }
            }
        }
        Step::Continue(self)
    }

    fn render(&self, theme: &Theme) -> Frame {
        let mut header = question_line(theme, self.message);

        let instruction = self
            .instruction
            .or(self.multiline.then_some(MULTILINE_INSTRUCTION));
        if let Some(instruction) = instruction {
            header = header.push(format!("{instruction} "), theme.instruction_style);
        }
        if let Some(default) = self.default.filter(|_| self.buffer.is_empty()) {
            header = header.push(format!("({default}) "), theme.instruction_style);
        }

        let prefix_width = header.width();
        let shown = self.displayed(&self.buffer.text());
        let mut rows = shown.split('\n');

        let first_row = rows.next().unwrap_or_default().to_string();
        let mut lines = vec![header.push(first_row, theme.plain_style)];
        lines.extend(rows.map(|row| Line::styled(row.to_string(), theme.plain_style)));

        // Cursor row and column follow the text before the cursor
        let before = self.displayed(&self.buffer.before_cursor());
        let cursor_row = before.matches('\n').count();
        let column_in_row = before.rsplit('\n').next().unwrap_or_default().chars().count();
        let cursor_column = if cursor_row == 0 {
            prefix_width + column_in_row
        } else {
            column_in_row
        };

        for completion in &self.completions {
            lines.push(Line::styled(format!("  {completion}"), theme.instruction_style));
        }
        push_error(&mut lines, theme, self.error.as_deref());

        Frame::new(lines).with_cursor(cursor_row, cursor_column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::ScriptedKeys;
    use crate::validation::required;

    fn submitted<S>(step: Step<S>) -> Answer {
        match step {
            Step::Submit(answer) => answer,
            Step::Continue(_) => panic!("prompt is still active"),
            Step::Cancel => panic!("prompt was cancelled"),
        }
    }

    #[test]
    fn test_typing_and_editing() {
        let config = TextConfig::new();
        let state = TextState::text("Name", &config);
        let mut keys = ScriptedKeys::typed("helo");
        keys.extend([Key::Left, Key::Char('l'), Key::End, Key::Char('!'), Key::Enter]);
        assert_eq!(submitted(state.feed(keys)), Answer::Text("hello!".to_string()));
    }

    #[test]
    fn test_empty_buffer_submits_default() {
        let config = TextConfig::new().with_default("world");
        let state = TextState::text("Name", &config);
        assert_eq!(
            submitted(state.handle_key(Key::Enter)),
            Answer::Text("world".to_string())
        );
    }

    #[test]
    fn test_validator_rejection_keeps_buffer() {
        let config = TextConfig::new().with_validator(required());
        let state = TextState::text("Name", &config);

        let state = state.handle_key(Key::Enter).into_state().unwrap();
        assert_eq!(state.error(), Some("required"));
        assert!(state.buffer().is_empty());

        let state = state.handle_key(Key::Char('x')).into_state().unwrap();
        assert_eq!(state.error(), None);
        assert_eq!(
            submitted(state.handle_key(Key::Enter)),
            Answer::Text("x".to_string())
        );
    }

    #[test]
    fn test_validator_rejection_preserves_text() {
        let config = TextConfig::new().with_validator(Validator::from_predicate(
            "digits only",
            |value: &str| value.chars().all(|c| c.is_ascii_digit()),
        ));
        let state = TextState::text("Port", &config);
        let state = state.feed(ScriptedKeys::typed("80a")).into_state().unwrap();
        let before = state.buffer().clone();

        let state = state.handle_key(Key::Enter).into_state().unwrap();
        assert_eq!(state.buffer(), &before);
        assert_eq!(state.error(), Some("digits only"));
    }

    #[test]
    fn test_ctrl_c_mid_edit_cancels() {
        let config = TextConfig::new();
        let state = TextState::text("Name", &config);
        let mut keys = ScriptedKeys::typed("half");
        keys.push(Key::CtrlC);
        assert!(matches!(state.feed(keys), Step::Cancel));
    }

    #[test]
    fn test_multiline_needs_escape_enter() {
        let config = TextConfig::new().multiline();
        let state = TextState::text("Notes", &config);
        let keys = [
            Key::Char('a'),
            Key::Enter,
            Key::Char('b'),
            Key::Escape,
            Key::Enter,
        ];
        assert_eq!(submitted(state.feed(keys)), Answer::Text("a\nb".to_string()));
    }

    #[test]
    fn test_password_masks_render() {
        let config = PasswordConfig::new();
        let state = TextState::password("Key", &config);
        let state = state.feed(ScriptedKeys::typed("sk-123")).into_state().unwrap();

        let frame = state.render(&Theme::default());
        assert_eq!(frame.texts(), vec!["? Key ******"]);
        assert!(!frame.texts()[0].contains("sk-123"));
        assert_eq!(
            submitted(state.handle_key(Key::Enter)),
            Answer::Text("sk-123".to_string())
        );
    }

    #[test]
    fn test_render_cursor_follows_offset() {
        let config = TextConfig::new();
        let state = TextState::text("Name", &config);
        let state = state.feed([Key::Char('a'), Key::Char('b'), Key::Left]).into_state().unwrap();
        let frame = state.render(&Theme::default());
        // "? Name " is seven columns wide
        assert_eq!(frame.cursor.map(|c| (c.row, c.column)), Some((0, 8)));
    }

    #[test]
    fn test_render_default_hint_and_error() {
        let config = TextConfig::new()
            .with_default("x")
            .with_validator(Validator::from_predicate("nope", |_: &str| false));
        let state = TextState::text("Name", &config);
        let state = state.handle_key(Key::Enter).into_state().unwrap();
        assert_eq!(state.render(&Theme::default()).texts(), vec!["? Name (x) ", "✗ nope"]);
    }

    #[test]
    fn test_path_tab_completion() {
        let lister = |prefix: &str, _only_directories: bool| -> Vec<String> {
            ["src/lib.rs", "src/main.rs", "Cargo.toml"]
                .iter()
                .filter(|candidate| candidate.starts_with(prefix))
                .map(ToString::to_string)
                .collect()
        };
        let config = PathConfig::new().with_lister(lister);
        let state = TextState::path("File", &config);

        let state = state.feed([Key::Char('s'), Key::Tab]).into_state().unwrap();
        assert_eq!(state.buffer().text(), "src/");
        assert_eq!(state.completions().len(), 2);

        let state = state.feed([Key::Char('m'), Key::Tab]).into_state().unwrap();
        assert_eq!(state.buffer().text(), "src/main.rs");
        assert!(state.completions().is_empty());

        assert_eq!(
            submitted(state.handle_key(Key::Enter)),
            Answer::Text("src/main.rs".to_string())
        );
    }

    #[test]
    fn test_tab_is_ignored_by_plain_text() {
        let config = TextConfig::new();
        let state = TextState::text("Name", &config);
        let state = state.handle_key(Key::Tab).into_state().unwrap();
        assert!(state.buffer().is_empty());
    }
}
