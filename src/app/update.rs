use crate::app::Model;
use crate::app::focus::FocusTransition;
use crate::editor::{Direction, Document};
use crate::ui::viewport::Viewport;

/// Everything that can happen to a session.
///
/// Edits reach the document only while the editor is focused; navigation
/// reaches the preview only while the preview is focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Insert a character at the cursor
    InsertChar(char),
    /// Split the line at the cursor (Enter)
    InsertNewline,
    /// Delete the character before the cursor (Backspace)
    DeleteBack,
    /// Delete the character at the cursor (Delete)
    DeleteForward,
    MoveCursor(Direction),
    /// Start of line (Home)
    MoveHome,
    /// End of line (End)
    MoveEnd,
    /// Start of document (Ctrl+Home)
    MoveToStart,
    /// End of document (Ctrl+End)
    MoveToEnd,

    // Preview navigation
    /// Scroll up by n lines
    ScrollUp(usize),
    /// Scroll down by n lines
    ScrollDown(usize),
    PageUp,
    PageDown,
    GoToTop,
    GoToBottom,

    // Clipboard
    /// Copy the cursor line in the editor; quit from the preview
    RequestCopyOrQuit,
    /// Paste at the cursor (editor only)
    Paste,
    /// Cut the cursor line (editor only)
    Cut,

    // Focus
    /// Move the keyboard to the other pane
    SwitchFocus,
    /// Next split mode
    CycleLayout,

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Animation tick
    Tick,

    /// Quit the application
    Quit,
}

/// Pure state transition.
///
/// Every variant is matched here. Edits reach the document only while the
/// editor is focused and navigation reaches the preview only while the
/// preview is focused. Clipboard I/O and preview rendering are not done
/// here; see [`crate::app::EditorSession::dispatch`].
pub fn update(mut model: Model, msg: Message) -> Model {
    let editing = model.focus.editor_receptive();

    match msg {
        Message::InsertChar(ch) => edit(&mut model, editing, |doc| doc.insert_char(ch)),
        Message::InsertNewline => edit(&mut model, editing, Document::insert_newline),
        Message::DeleteBack => edit(&mut model, editing, |doc| {
            doc.delete_back();
        }),
        Message::DeleteForward => edit(&mut model, editing, |doc| {
            doc.delete_forward();
        }),
        Message::MoveCursor(direction) => {
            edit(&mut model, editing, |doc| doc.move_cursor(direction));
        }
        Message::MoveHome => edit(&mut model, editing, Document::move_home),
        Message::MoveEnd => edit(&mut model, editing, Document::move_end),
        Message::MoveToStart => edit(&mut model, editing, Document::move_to_start),
        Message::MoveToEnd => edit(&mut model, editing, Document::move_to_end),

        Message::ScrollUp(n) => navigate(&mut model, editing, |view| view.scroll_up(n)),
        Message::ScrollDown(n) => navigate(&mut model, editing, |view| view.scroll_down(n)),
        Message::PageUp => navigate(&mut model, editing, Viewport::page_up),
        Message::PageDown => navigate(&mut model, editing, Viewport::page_down),
        Message::GoToTop => navigate(&mut model, editing, Viewport::go_to_top),
        Message::GoToBottom => navigate(&mut model, editing, Viewport::go_to_bottom),

        Message::RequestCopyOrQuit => {
            // the copy itself is a side effect; only the preview branch is state
            if !editing {
                tracing::debug!("copy requested from preview, quitting");
                model.should_quit = true;
            }
        }
        Message::Paste | Message::Cut => {}
        Message::SwitchFocus => {
            let transition = model.focus.switch_focus();
            match transition {
                FocusTransition::Acquired => tracing::debug!("editor focus acquired"),
                FocusTransition::Released => tracing::debug!("editor focus released"),
            }
            model.reflow_layout();
        }
        Message::CycleLayout => {
            let mode = model.focus.cycle_split_mode();
            tracing::debug!(mode = mode.label(), "split mode changed");
            model.reflow_layout();
        }
        Message::Resize(width, height) => {
            tracing::debug!(width, height, "resize");
            model.resize(width, height);
        }
        Message::Tick => {
            if !model.is_ready() {
                model.spinner_frame = model.spinner_frame.wrapping_add(1);
            }
        }
        Message::Quit => model.should_quit = true,
    }
    model
}

fn edit(model: &mut Model, editing: bool, apply: impl FnOnce(&mut Document)) {
    if editing {
        apply(&mut model.document);
        model.sync_editor_viewport();
    }
}

fn navigate(model: &mut Model, editing: bool, apply: impl FnOnce(&mut Viewport)) {
    if !editing {
        apply(&mut model.preview_viewport);
    }
}
