//! Generation screen state

use ragimage_core::{AppConfig, GenerateRequest, GenerationSession, RequestError};
use std::path::PathBuf;

/// Single-line editable field. The cursor counts characters, not bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    pub value: String,
    pub cursor_pos: usize,
}

impl TextField {
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor_pos = value.chars().count();
        Self { value, cursor_pos }
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Insert character at cursor position
    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor_pos);
        self.value.insert(at, c);
        self.cursor_pos += 1;
    }

    /// Delete character before cursor (backspace)
    pub fn delete_char(&mut self) {
        if self.cursor_pos > 0 {
            let at = self.byte_index(self.cursor_pos - 1);
            self.value.remove(at);
            self.cursor_pos -= 1;
        }
    }

    /// Delete character at cursor (delete key)
    pub fn delete_char_forward(&mut self) {
        if self.cursor_pos < self.len() {
            let at = self.byte_index(self.cursor_pos);
            self.value.remove(at);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_pos = self.cursor_pos.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_pos < self.len() {
            self.cursor_pos += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_pos = self.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor_pos = 0;
    }
}

/// Which form field receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Prompt,
    NumImages,
}

impl Field {
    pub fn next(self) -> Self {
        match self {
            Field::Prompt => Field::NumImages,
            Field::NumImages => Field::Prompt,
        }
    }
}

/// Full screen state
pub struct GenerateState {
    pub prompt: TextField,
    pub num_images: TextField,
    pub focus: Field,
    pub session: GenerationSession,
    /// Scroll offset for the log panel; `u16::MAX` follows the newest line
    pub log_scroll: u16,
    /// Largest log offset that still fills the panel, recorded on each draw
    pub log_max_scroll: u16,
    /// Loading animation frame
    pub loading_frame: usize,
    /// Validation or download message shown under the form
    pub notice: Option<String>,
    /// Where the last successful image was written
    pub saved_image: Option<PathBuf>,
    /// Resolved URL of the last successful image
    pub image_url: Option<String>,
}

impl GenerateState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            prompt: TextField::with_value(config.default_prompt.clone()),
            num_images: TextField::with_value(config.num_images.to_string()),
            focus: Field::Prompt,
            session: GenerationSession::new(),
            log_scroll: 0,
            log_max_scroll: 0,
            loading_frame: 0,
            notice: None,
            saved_image: None,
            image_url: None,
        }
    }

    /// Field that currently has focus
    pub fn focused_mut(&mut self) -> &mut TextField {
        match self.focus {
            Field::Prompt => &mut self.prompt,
            Field::NumImages => &mut self.num_images,
        }
    }

    pub fn cycle_focus(&mut self) {
        self.focus = self.focus.next();
    }

    /// Validate the form and start a new request. Returns the request to send.
    pub fn submit(&mut self) -> Result<GenerateRequest, RequestError> {
        let request = GenerateRequest::from_form(&self.prompt.value, &self.num_images.value)
            .inspect_err(|err| self.notice = Some(err.to_string()))?;
        self.session.begin(&request);
        self.notice = None;
        self.saved_image = None;
        self.image_url = None;
        self.loading_frame = 0;
        self.scroll_to_bottom();
        Ok(request)
    }

    pub fn is_loading(&self) -> bool {
        self.session.is_in_flight()
    }

    pub fn scroll_up(&mut self) {
        self.log_scroll = self.log_scroll.min(self.log_max_scroll).saturating_sub(1);
    }

    /// Scrolling past the last row resumes following new lines
    pub fn scroll_down(&mut self) {
        if self.log_scroll == u16::MAX {
            return;
        }
        if self.log_scroll.saturating_add(1) >= self.log_max_scroll {
            self.scroll_to_bottom();
        } else {
            self.log_scroll += 1;
        }
    }

    /// Follow new log lines; resolved against content height during render
    pub fn scroll_to_bottom(&mut self) {
        self.log_scroll = u16::MAX;
    }

    /// Update loading animation frame
    pub fn tick_loading(&mut self) {
        if self.is_loading() {
            self.loading_frame = (self.loading_frame + 1) % 4;
        }
    }
}
