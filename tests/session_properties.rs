use proptest::prelude::*;

use screenmd::app::focus::{FocusController, SplitMode};
use screenmd::app::{EditorSession, Message, Model};
use screenmd::clipboard::{ClipboardBridge, MemoryClipboard};
use screenmd::editor::{Direction, Document, delete_line};
use screenmd::markdown::{MarkdownRenderer, Renderer};
use screenmd::preview::normalize_blank_lines;
use screenmd::ui::frame_text;
use screenmd::ui::style::Theme;

fn message() -> impl Strategy<Value = Message> {
    prop_oneof![
        prop::char::range('a', 'e').prop_map(Message::InsertChar),
        Just(Message::InsertChar('#')),
        Just(Message::InsertNewline),
        Just(Message::DeleteBack),
        Just(Message::DeleteForward),
        Just(Message::MoveCursor(Direction::Up)),
        Just(Message::MoveCursor(Direction::Down)),
        Just(Message::MoveCursor(Direction::Left)),
        Just(Message::MoveCursor(Direction::Right)),
        Just(Message::MoveHome),
        Just(Message::MoveEnd),
        Just(Message::ScrollDown(2)),
        Just(Message::PageUp),
        Just(Message::Paste),
        Just(Message::Cut),
        Just(Message::SwitchFocus),
        Just(Message::CycleLayout),
        (1u16..140, 1u16..50).prop_map(|(w, h)| Message::Resize(w, h)),
        Just(Message::Tick),
    ]
}

fn new_session(text: &str, fullscreen_switch: bool) -> EditorSession {
    EditorSession::new(
        Model::new(
            Document::from_text(text),
            FocusController::new(SplitMode::SideBySide, fullscreen_switch),
        ),
        ClipboardBridge::new(Box::new(MemoryClipboard::new())),
        Box::new(MarkdownRenderer::default()),
    )
}

proptest! {
    #[test]
    fn prop_session_keeps_cursor_valid_and_preview_current(
        text in "[a-c#\\- \\n]{0,60}",
        messages in proptest::collection::vec(message(), 0..60),
        fullscreen_switch in any::<bool>(),
    ) {
        let mut session = new_session(&text, fullscreen_switch);
        for msg in messages {
            session.dispatch(msg);
            let model = session.model();
            let doc = &model.document;
            prop_assert!(doc.cursor() <= doc.text().len());
            prop_assert!(doc.text().is_char_boundary(doc.cursor()));
            prop_assert!(!session.should_quit());

            if model.focus.editor_receptive() {
                let expected = MarkdownRenderer::default().render(doc.text()).unwrap();
                prop_assert_eq!(&model.preview_text, &normalize_blank_lines(&expected));
            }
            if model.is_ready() {
                let frame = frame_text(model, &Theme::default());
                prop_assert_eq!(frame.split('\n').count(), usize::from(model.terminal_size.1));
            }
        }
    }

    #[test]
    fn prop_delete_line_removes_exactly_one_matching_line(
        lines in proptest::collection::vec("[ab]{0,2}", 1..8),
        pick in any::<prop::sample::Index>(),
    ) {
        let text = lines.join("\n");
        let target = pick.get(&lines).clone();
        let result = delete_line(&text, &target);

        let before = text.split('\n').filter(|l| *l == target).count();
        let after = if result.is_empty() && lines.len() == 1 {
            0
        } else {
            result.split('\n').filter(|l| *l == target).count()
        };
        prop_assert_eq!(after, before - 1);
    }
}

#[test]
fn copy_from_preview_quits_and_leaves_state_alone() {
    let mut session = new_session("alpha\nbeta\ngamma", false);
    session.dispatch(Message::Resize(80, 24));
    session.dispatch(Message::SwitchFocus);
    let before = session.model().document.clone();

    session.dispatch(Message::RequestCopyOrQuit);

    assert!(session.should_quit());
    assert_eq!(session.model().document, before);
    assert!(session.model().clipboard.last_selection.is_empty());
}
