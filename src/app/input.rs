use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::Message;
use crate::app::focus::Pane;
use crate::editor::Direction;

/// Lines scrolled per mouse wheel notch.
const WHEEL_LINES: usize = 3;

/// Translate a terminal event into a message for the pane that has focus.
pub fn handle_event(event: &Event, active: Pane) -> Option<Message> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(*key, active),
        Event::Mouse(mouse) => handle_mouse(*mouse),
        Event::Resize(width, height) => Some(Message::Resize(*width, *height)),
        _ => None,
    }
}

pub fn handle_key(key: KeyEvent, active: Pane) -> Option<Message> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Global bindings
    match key.code {
        KeyCode::Tab | KeyCode::BackTab => return Some(Message::SwitchFocus),
        KeyCode::F(2) => return Some(Message::CycleLayout),
        KeyCode::Char('c') if ctrl => return Some(Message::RequestCopyOrQuit),
        KeyCode::Char('v') if ctrl => return Some(Message::Paste),
        KeyCode::Char('x') if ctrl => return Some(Message::Cut),
        KeyCode::Char('q') if ctrl => return Some(Message::Quit),
        _ => {}
    }

    match active {
        Pane::Editor => editor_key(key, ctrl),
        Pane::Preview => preview_key(key),
    }
}

fn editor_key(key: KeyEvent, ctrl: bool) -> Option<Message> {
    match key.code {
        KeyCode::Up => Some(Message::MoveCursor(Direction::Up)),
        KeyCode::Down => Some(Message::MoveCursor(Direction::Down)),
        KeyCode::Left => Some(Message::MoveCursor(Direction::Left)),
        KeyCode::Right => Some(Message::MoveCursor(Direction::Right)),
        KeyCode::Home if ctrl => Some(Message::MoveToStart),
        KeyCode::End if ctrl => Some(Message::MoveToEnd),
        KeyCode::Home => Some(Message::MoveHome),
        KeyCode::End => Some(Message::MoveEnd),
        KeyCode::PageUp => Some(Message::MoveToStart),
        KeyCode::PageDown => Some(Message::MoveToEnd),
        KeyCode::Enter => Some(Message::InsertNewline),
        KeyCode::Backspace => Some(Message::DeleteBack),
        KeyCode::Delete => Some(Message::DeleteForward),
        KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
            Some(Message::InsertChar(c))
        }
        _ => None,
    }
}

fn preview_key(key: KeyEvent) -> Option<Message> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Message::ScrollUp(1)),
        KeyCode::Down | KeyCode::Char('j') => Some(Message::ScrollDown(1)),
        KeyCode::PageUp | KeyCode::Char('b') => Some(Message::PageUp),
        KeyCode::PageDown | KeyCode::Char(' ') => Some(Message::PageDown),
        KeyCode::Home | KeyCode::Char('g') => Some(Message::GoToTop),
        KeyCode::End | KeyCode::Char('G') => Some(Message::GoToBottom),
        _ => None,
    }
}

pub fn handle_mouse(mouse: MouseEvent) -> Option<Message> {
    match mouse.kind {
        MouseEventKind::ScrollUp => Some(Message::ScrollUp(WHEEL_LINES)),
        MouseEventKind::ScrollDown => Some(Message::ScrollDown(WHEEL_LINES)),
        _ => None,
    }
}
