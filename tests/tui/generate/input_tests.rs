//! Key handling tests

use super::fresh_state;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ragimage_cli::tui::screens::generate::{Field, InputAction, handle_input};

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    })
}

fn ctrl(code: KeyCode) -> Event {
    Event::Key(KeyEvent {
        code,
        modifiers: KeyModifiers::CONTROL,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    })
}

#[test]
fn test_typing_edits_focused_field() {
    let mut state = fresh_state();
    state.prompt.clear();

    for c in "cat".chars() {
        assert_eq!(handle_input(&mut state, key(KeyCode::Char(c))), InputAction::None);
    }
    assert_eq!(state.prompt.value, "cat");

    handle_input(&mut state, key(KeyCode::Tab));
    assert_eq!(state.focus, Field::NumImages);
    handle_input(&mut state, key(KeyCode::Backspace));
    handle_input(&mut state, key(KeyCode::Char('7')));
    assert_eq!(state.num_images.value, "7");
    assert_eq!(state.prompt.value, "cat");
}

#[test]
fn test_image_count_accepts_digits_only() {
    let mut state = fresh_state();
    state.focus = Field::NumImages;

    handle_input(&mut state, key(KeyCode::Char('x')));
    handle_input(&mut state, key(KeyCode::Char('-')));
    assert_eq!(state.num_images.value, "3");
}

#[test]
fn test_enter_submits_when_idle() {
    let mut state = fresh_state();
    assert_eq!(handle_input(&mut state, key(KeyCode::Enter)), InputAction::Submit);
}

#[test]
fn test_input_locked_while_generating() {
    let mut state = fresh_state();
    state.submit().unwrap();
    let before = state.prompt.value.clone();

    assert_eq!(handle_input(&mut state, key(KeyCode::Enter)), InputAction::None);
    assert_eq!(handle_input(&mut state, key(KeyCode::Char('z'))), InputAction::None);
    assert_eq!(handle_input(&mut state, key(KeyCode::Esc)), InputAction::None);
    assert_eq!(state.prompt.value, before);

    assert_eq!(handle_input(&mut state, key(KeyCode::PageUp)), InputAction::ScrollUp);
    assert_eq!(handle_input(&mut state, key(KeyCode::PageDown)), InputAction::ScrollDown);
    assert_eq!(handle_input(&mut state, ctrl(KeyCode::Char('q'))), InputAction::Exit);
}

#[test]
fn test_escape_and_ctrl_exit() {
    let mut state = fresh_state();
    assert_eq!(handle_input(&mut state, key(KeyCode::Esc)), InputAction::Exit);
    assert_eq!(handle_input(&mut state, ctrl(KeyCode::Char('c'))), InputAction::Exit);
}

#[test]
fn test_ctrl_u_clears_field() {
    let mut state = fresh_state();
    handle_input(&mut state, ctrl(KeyCode::Char('u')));
    assert!(state.prompt.is_empty());
    assert_eq!(state.prompt.cursor_pos, 0);
}

#[test]
fn test_release_events_ignored() {
    let mut state = fresh_state();
    let release = Event::Key(KeyEvent {
        code: KeyCode::Enter,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Release,
        state: KeyEventState::NONE,
    });
    assert_eq!(handle_input(&mut state, release), InputAction::None);
}
