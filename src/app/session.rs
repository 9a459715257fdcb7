use crate::app::{Message, Model, update};
use crate::clipboard::{ClipboardBridge, ClipboardError};
use crate::markdown::Renderer;

/// A running editor: the model plus the collaborators its side effects
/// talk to.
///
/// Every message goes through [`EditorSession::dispatch`], which applies the
/// pure [`update`], then the clipboard effect the message asks for, then
/// brings the preview up to date.
pub struct EditorSession {
    model: Model,
    clipboard: ClipboardBridge,
    renderer: Box<dyn Renderer>,
}

impl EditorSession {
    /// Start a session. The preview is rendered for the initial document
    /// right away.
    pub fn new(model: Model, clipboard: ClipboardBridge, renderer: Box<dyn Renderer>) -> Self {
        let mut session = Self {
            model,
            clipboard,
            renderer,
        };
        session.sync_preview();
        session
    }

    pub const fn model(&self) -> &Model {
        &self.model
    }

    pub const fn should_quit(&self) -> bool {
        self.model.should_quit
    }

    /// Process one message to completion.
    pub fn dispatch(&mut self, msg: Message) {
        self.model = update(std::mem::take(&mut self.model), msg);
        self.handle_message_side_effects(msg);
        self.sync_preview();
    }

    fn handle_message_side_effects(&mut self, msg: Message) {
        if !self.model.focus.editor_receptive() {
            return;
        }
        let model = &mut self.model;
        let result: Result<(), ClipboardError> = match msg {
            Message::RequestCopyOrQuit => self
                .clipboard
                .copy_line(&model.document, &mut model.clipboard),
            Message::Paste => self
                .clipboard
                .paste_at_cursor(&mut model.document, &mut model.clipboard),
            Message::Cut => self
                .clipboard
                .cut_line(&mut model.document, &mut model.clipboard),
            _ => return,
        };

        match result {
            Ok(()) => tracing::debug!(op = ?model.clipboard.last_operation, "clipboard"),
            Err(err) => tracing::debug!(%err, op = ?model.clipboard.last_operation, "clipboard"),
        }
        model.sync_editor_viewport();
    }

    /// Re-render the preview if the editor is focused and the text changed.
    fn sync_preview(&mut self) {
        if !self.model.focus.editor_receptive() {
            return;
        }
        let model = &mut self.model;
        let refresh = model
            .cache
            .refresh(self.renderer.as_ref(), model.document.text());
        let rendered = refresh.changed.then(|| refresh.output.to_string());
        if let Some(output) = rendered {
            model.set_preview_text(output);
        }
    }
}

impl std::fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("model", &self.model)
            .field("clipboard", &self.clipboard)
            .finish_non_exhaustive()
    }
}
