use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseEvent,
    MouseEventKind,
};

use crate::app::focus::{FocusController, Pane, SplitMode};
use crate::clipboard::{Clipboard, ClipboardBridge, ClipboardError, ClipboardOp, MemoryClipboard};
use crate::editor::{Direction, Document};
use crate::markdown::{MarkdownRenderer, RenderError, Renderer};

use super::{App, EditorSession, Message, Model, handle_event, handle_key, update};

#[derive(Debug, Clone, PartialEq, Eq)]
enum ClipboardCall {
    Write(String),
    Read,
}

/// Clipboard that records every call and serves a fixed paste value.
#[derive(Clone, Default)]
struct SpyClipboard {
    calls: Rc<RefCell<Vec<ClipboardCall>>>,
    paste: Rc<RefCell<Option<String>>>,
}

impl Clipboard for SpyClipboard {
    fn write_all(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.calls
            .borrow_mut()
            .push(ClipboardCall::Write(text.to_string()));
        *self.paste.borrow_mut() = Some(text.to_string());
        Ok(())
    }

    fn read_all(&mut self) -> Result<String, ClipboardError> {
        self.calls.borrow_mut().push(ClipboardCall::Read);
        self.paste
            .borrow()
            .clone()
            .ok_or_else(|| ClipboardError::Unavailable("empty".to_string()))
    }
}

struct BrokenClipboard;

impl Clipboard for BrokenClipboard {
    fn write_all(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable("no display".to_string()))
    }

    fn read_all(&mut self) -> Result<String, ClipboardError> {
        Err(ClipboardError::Unavailable("no display".to_string()))
    }
}

/// Echoes its input and counts invocations.
#[derive(Clone, Default)]
struct CountingRenderer {
    calls: Rc<Cell<usize>>,
}

impl Renderer for CountingRenderer {
    fn render(&self, markdown: &str) -> Result<String, RenderError> {
        self.calls.set(self.calls.get() + 1);
        Ok(format!("rendered:{markdown}"))
    }
}

/// Renders once, then fails on every later call.
#[derive(Clone, Default)]
struct FailingRenderer {
    calls: Rc<Cell<usize>>,
}

impl Renderer for FailingRenderer {
    fn render(&self, markdown: &str) -> Result<String, RenderError> {
        let calls = self.calls.get();
        self.calls.set(calls + 1);
        if calls == 0 {
            Ok(format!("rendered:{markdown}"))
        } else {
            Err(RenderError::Failed("renderer crashed".to_string()))
        }
    }
}

fn model_at(text: &str, cursor: usize) -> Model {
    let mut doc = Document::from_text(text);
    doc.set_cursor(cursor);
    let mut model = Model::new(doc, FocusController::default());
    model.resize(100, 30);
    model
}

fn spy_session(text: &str, cursor: usize) -> (EditorSession, SpyClipboard) {
    let spy = SpyClipboard::default();
    let session = EditorSession::new(
        model_at(text, cursor),
        ClipboardBridge::new(Box::new(spy.clone())),
        Box::new(MarkdownRenderer::default()),
    );
    (session, spy)
}

fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent::new(code, modifiers)
}

#[test]
fn test_copy_in_editor_writes_cursor_line() {
    let (mut session, spy) = spy_session("alpha\nbeta\ngamma", 7);

    session.dispatch(Message::RequestCopyOrQuit);

    assert_eq!(
        *spy.calls.borrow(),
        vec![ClipboardCall::Write("beta".to_string())]
    );
    assert_eq!(session.model().clipboard.last_operation, ClipboardOp::Copied);
    assert_eq!(session.model().clipboard.last_selection, "beta");
    assert!(!session.should_quit());
}

#[test]
fn test_copy_in_preview_quits_without_touching_clipboard() {
    let (mut session, spy) = spy_session("alpha\nbeta\ngamma", 7);

    session.dispatch(Message::SwitchFocus);
    session.dispatch(Message::RequestCopyOrQuit);

    assert!(session.should_quit());
    assert!(spy.calls.borrow().is_empty());
    assert_eq!(session.model().clipboard.last_operation, ClipboardOp::None);
}

#[test]
fn test_paste_and_cut_are_ignored_in_preview() {
    let (mut session, spy) = spy_session("alpha\nbeta", 0);

    session.dispatch(Message::SwitchFocus);
    session.dispatch(Message::Paste);
    session.dispatch(Message::Cut);

    assert!(spy.calls.borrow().is_empty());
    assert_eq!(session.model().document.text(), "alpha\nbeta");
    assert!(!session.should_quit());
}

#[test]
fn test_cut_removes_line_and_paste_reinserts_it() {
    let (mut session, spy) = spy_session("alpha\nbeta\ngamma", 7);

    session.dispatch(Message::Cut);
    assert_eq!(session.model().document.text(), "alpha\ngamma");
    assert_eq!(session.model().clipboard.last_operation, ClipboardOp::Cut);
    assert_eq!(session.model().clipboard.last_selection, "beta");

    session.dispatch(Message::MoveToStart);
    session.dispatch(Message::Paste);
    assert_eq!(session.model().document.text(), "betaalpha\ngamma");
    assert_eq!(session.model().clipboard.last_operation, ClipboardOp::Pasted);
    assert_eq!(
        *spy.calls.borrow(),
        vec![
            ClipboardCall::Write("beta".to_string()),
            ClipboardCall::Read
        ]
    );
}

#[test]
fn test_cut_only_line_empties_document() {
    let (mut session, _spy) = spy_session("only", 2);

    session.dispatch(Message::Cut);

    assert_eq!(session.model().document.text(), "");
    assert_eq!(session.model().clipboard.last_selection, "only");
}

#[test]
fn test_failed_copy_is_reported_not_raised() {
    let mut session = EditorSession::new(
        model_at("alpha", 0),
        ClipboardBridge::new(Box::new(BrokenClipboard)),
        Box::new(MarkdownRenderer::default()),
    );

    session.dispatch(Message::RequestCopyOrQuit);
    session.dispatch(Message::Cut);

    assert_eq!(session.model().clipboard.last_operation, ClipboardOp::CutFailed);
    assert_eq!(session.model().document.text(), "alpha");
    assert!(!session.should_quit());
}

#[test]
fn test_edits_reach_document_only_in_editor() {
    let model = model_at("abc", 3);

    let model = update(model, Message::InsertChar('d'));
    assert_eq!(model.document.text(), "abcd");

    let model = update(model, Message::SwitchFocus);
    let model = update(model, Message::InsertChar('e'));
    let model = update(model, Message::DeleteBack);
    assert_eq!(model.document.text(), "abcd");
}

#[test]
fn test_scrolling_moves_preview_only_in_preview() {
    let mut model = model_at("x", 0);
    let long: Vec<String> = (0..200).map(|i| format!("line {i}")).collect();
    model.set_preview_text(long.join("\n"));

    let model = update(model, Message::ScrollDown(5));
    assert_eq!(model.preview_viewport.offset(), 0);

    let model = update(model, Message::SwitchFocus);
    let model = update(model, Message::ScrollDown(5));
    assert_eq!(model.preview_viewport.offset(), 5);

    let model = update(model, Message::GoToBottom);
    assert!(!model.preview_viewport.can_scroll_down());
    let model = update(model, Message::GoToTop);
    assert_eq!(model.preview_viewport.offset(), 0);
}

const EDIT_MESSAGES: [Message; 12] = [
    Message::InsertChar('z'),
    Message::InsertNewline,
    Message::DeleteBack,
    Message::DeleteForward,
    Message::MoveCursor(Direction::Up),
    Message::MoveCursor(Direction::Down),
    Message::MoveCursor(Direction::Left),
    Message::MoveCursor(Direction::Right),
    Message::MoveHome,
    Message::MoveEnd,
    Message::MoveToStart,
    Message::MoveToEnd,
];

const SCROLL_MESSAGES: [Message; 6] = [
    Message::ScrollUp(3),
    Message::ScrollDown(3),
    Message::PageUp,
    Message::PageDown,
    Message::GoToTop,
    Message::GoToBottom,
];

#[test]
fn test_every_edit_message_is_ignored_in_preview() {
    let model = update(model_at("ab\ncd\nef", 4), Message::SwitchFocus);

    for msg in EDIT_MESSAGES {
        let after = update(model.clone(), msg);
        assert_eq!(after.document.text(), "ab\ncd\nef", "{msg:?}");
        assert_eq!(after.document.cursor(), 4, "{msg:?}");
        assert_eq!(after.editor_viewport, model.editor_viewport, "{msg:?}");
    }
}

#[test]
fn test_every_scroll_message_is_ignored_in_editor() {
    let mut model = model_at("x", 0);
    let long: Vec<String> = (0..200).map(|i| format!("line {i}")).collect();
    model.set_preview_text(long.join("\n"));
    model.preview_viewport.scroll_down(50);

    for msg in SCROLL_MESSAGES {
        let after = update(model.clone(), msg);
        assert_eq!(after.preview_viewport.offset(), 50, "{msg:?}");
        assert_eq!(after.document.text(), "x", "{msg:?}");
    }
}

#[test]
fn test_cursor_moves_do_not_rerender() {
    let renderer = CountingRenderer::default();
    let calls = Rc::clone(&renderer.calls);
    let mut session = EditorSession::new(
        model_at("alpha\nbeta", 0),
        ClipboardBridge::new(Box::new(MemoryClipboard::new())),
        Box::new(renderer),
    );
    assert_eq!(calls.get(), 1);

    session.dispatch(Message::MoveCursor(Direction::Down));
    session.dispatch(Message::MoveEnd);
    session.dispatch(Message::Tick);
    assert_eq!(calls.get(), 1);

    session.dispatch(Message::InsertChar('!'));
    assert_eq!(calls.get(), 2);
    assert_eq!(session.model().preview_text, "rendered:alpha\nbeta!");
}

#[test]
fn test_preview_is_frozen_while_preview_focused() {
    let renderer = CountingRenderer::default();
    let calls = Rc::clone(&renderer.calls);
    let mut model = model_at("alpha", 5);
    model.focus = FocusController::new(SplitMode::SideBySide, false);
    let mut session = EditorSession::new(
        model,
        ClipboardBridge::new(Box::new(MemoryClipboard::new())),
        Box::new(renderer),
    );

    session.dispatch(Message::SwitchFocus);
    session.dispatch(Message::ScrollDown(1));
    session.dispatch(Message::SwitchFocus);

    assert_eq!(calls.get(), 1);
    assert_eq!(session.model().preview_text, "rendered:alpha");
}

#[test]
fn test_resize_marks_model_ready() {
    let model = Model::new(Document::from_text("# hi"), FocusController::default());
    assert!(!model.is_ready());

    let model = update(model, Message::Tick);
    assert_eq!(model.spinner_frame, 1);

    let model = update(model, Message::Resize(80, 24));
    assert!(model.is_ready());
    assert_eq!(model.terminal_size, (80, 24));

    let model = update(model, Message::Tick);
    assert_eq!(model.spinner_frame, 1);
}

#[test]
fn test_switch_focus_with_fullscreen_toggles_split_mode() {
    let mut model = model_at("x", 0);
    model.focus = FocusController::new(SplitMode::SideBySide, true);

    let model = update(model, Message::SwitchFocus);
    assert_eq!(model.active_pane(), Pane::Preview);
    assert_eq!(model.focus.split_mode(), SplitMode::Fullscreen);

    let model = update(model, Message::SwitchFocus);
    assert_eq!(model.active_pane(), Pane::Editor);
    assert_eq!(model.focus.split_mode(), SplitMode::SideBySide);
}

#[test]
fn test_cycle_layout_recomputes_panes() {
    let model = model_at("x", 0);
    assert_eq!(model.layout.map(|m| m.pane_count), Some(2));

    let model = update(model, Message::CycleLayout);
    assert_eq!(model.focus.split_mode(), SplitMode::Sequential);

    let model = update(model, Message::CycleLayout);
    assert_eq!(model.focus.split_mode(), SplitMode::Fullscreen);
    assert_eq!(model.layout.map(|m| m.pane_count), Some(1));
}

#[test]
fn test_quit_message() {
    let model = update(model_at("x", 0), Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_global_keys_map_regardless_of_focus() {
    for pane in [Pane::Editor, Pane::Preview] {
        assert_eq!(
            handle_key(key(KeyCode::Char('c'), KeyModifiers::CONTROL), pane),
            Some(Message::RequestCopyOrQuit)
        );
        assert_eq!(
            handle_key(key(KeyCode::Tab, KeyModifiers::NONE), pane),
            Some(Message::SwitchFocus)
        );
        assert_eq!(
            handle_key(key(KeyCode::F(2), KeyModifiers::NONE), pane),
            Some(Message::CycleLayout)
        );
    }
}

#[test]
fn test_keys_map_by_focus() {
    let j = key(KeyCode::Char('j'), KeyModifiers::NONE);
    assert_eq!(handle_key(j, Pane::Editor), Some(Message::InsertChar('j')));
    assert_eq!(handle_key(j, Pane::Preview), Some(Message::ScrollDown(1)));

    let up = key(KeyCode::Up, KeyModifiers::NONE);
    assert_eq!(
        handle_key(up, Pane::Editor),
        Some(Message::MoveCursor(Direction::Up))
    );
    assert_eq!(handle_key(up, Pane::Preview), Some(Message::ScrollUp(1)));

    let enter = key(KeyCode::Enter, KeyModifiers::NONE);
    assert_eq!(handle_key(enter, Pane::Editor), Some(Message::InsertNewline));
    assert_eq!(handle_key(enter, Pane::Preview), None);
}

#[test]
fn test_key_release_and_ctrl_chars_are_ignored() {
    let release = KeyEvent {
        code: KeyCode::Char('a'),
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Release,
        state: KeyEventState::NONE,
    };
    assert_eq!(handle_event(&Event::Key(release), Pane::Editor), None);
    assert_eq!(
        handle_key(key(KeyCode::Char('a'), KeyModifiers::CONTROL), Pane::Editor),
        None
    );
}

#[test]
fn test_mouse_wheel_and_resize_events() {
    let wheel = MouseEvent {
        kind: MouseEventKind::ScrollDown,
        column: 0,
        row: 0,
        modifiers: KeyModifiers::NONE,
    };
    assert_eq!(
        handle_event(&Event::Mouse(wheel), Pane::Preview),
        Some(Message::ScrollDown(3))
    );
    assert_eq!(
        handle_event(&Event::Resize(120, 40), Pane::Editor),
        Some(Message::Resize(120, 40))
    );
}

#[test]
fn test_app_session_starts_on_welcome_document() {
    let session = App::new()
        .with_internal_clipboard(true)
        .with_split_mode(SplitMode::Sequential)
        .session();

    let model = session.model();
    assert!(model.document.text().starts_with("# Welcome"));
    assert!(model.preview_text.starts_with("# Welcome"));
    assert_eq!(model.focus.split_mode(), SplitMode::Sequential);
    assert!(!model.is_ready());
}

#[test]
fn test_app_session_internal_clipboard_round_trip() {
    let mut session = App::new().with_internal_clipboard(true).session();
    session.dispatch(Message::Resize(100, 30));

    session.dispatch(Message::RequestCopyOrQuit);
    session.dispatch(Message::MoveToEnd);
    session.dispatch(Message::InsertNewline);
    session.dispatch(Message::Paste);

    let text = session.model().document.text();
    assert!(text.ends_with("\n# Welcome to My Markdown Document"));
}

#[test]
fn test_render_failure_keeps_previous_preview_silently() {
    let renderer = FailingRenderer::default();
    let mut session = EditorSession::new(
        model_at("# Title", 7),
        ClipboardBridge::new(Box::new(MemoryClipboard::default())),
        Box::new(renderer.clone()),
    );
    assert_eq!(session.model().preview_text, "rendered:# Title");

    session.dispatch(Message::InsertChar('!'));

    let model = session.model();
    assert_eq!(renderer.calls.get(), 2);
    assert_eq!(model.document.text(), "# Title!");
    assert_eq!(model.preview_text, "rendered:# Title");
    assert_eq!(model.cache.source(), "# Title");
    assert_eq!(model.clipboard.last_operation, ClipboardOp::None);
    assert!(!session.should_quit());
}
