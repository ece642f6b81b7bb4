//! Generation screen input handling

use super::state::{Field, GenerateState};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Input action result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// No action needed
    None,
    /// Submit the form
    Submit,
    /// Exit the screen
    Exit,
    ScrollUp,
    ScrollDown,
    ScrollBottom,
}

/// Handle terminal input and update state
pub fn handle_input(state: &mut GenerateState, event: Event) -> InputAction {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(state, key),
        _ => InputAction::None,
    }
}

fn handle_key(state: &mut GenerateState, key: KeyEvent) -> InputAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c')) {
        return InputAction::Exit;
    }

    // Scrolling is the only thing allowed while a request is running
    match key.code {
        KeyCode::PageUp | KeyCode::Up => return InputAction::ScrollUp,
        KeyCode::PageDown | KeyCode::Down => return InputAction::ScrollDown,
        KeyCode::Char('d') if ctrl => return InputAction::ScrollBottom,
        _ => {}
    }
    if state.is_loading() {
        return InputAction::None;
    }

    match key.code {
        KeyCode::Esc => InputAction::Exit,
        KeyCode::Enter => InputAction::Submit,
        KeyCode::Tab | KeyCode::BackTab => {
            state.cycle_focus();
            InputAction::None
        }
        KeyCode::Char('u') if ctrl => {
            state.focused_mut().clear();
            InputAction::None
        }
        KeyCode::Backspace => {
            state.focused_mut().delete_char();
            InputAction::None
        }
        KeyCode::Delete => {
            state.focused_mut().delete_char_forward();
            InputAction::None
        }
        KeyCode::Left => {
            state.focused_mut().move_cursor_left();
            InputAction::None
        }
        KeyCode::Right => {
            state.focused_mut().move_cursor_right();
            InputAction::None
        }
        KeyCode::Home => {
            state.focused_mut().move_cursor_home();
            InputAction::None
        }
        KeyCode::End => {
            state.focused_mut().move_cursor_end();
            InputAction::None
        }
        KeyCode::Char(c) => {
            if state.focus == Field::NumImages && !c.is_ascii_digit() {
                return InputAction::None;
            }
            state.focused_mut().insert_char(c);
            InputAction::None
        }
        _ => InputAction::None,
    }
}
