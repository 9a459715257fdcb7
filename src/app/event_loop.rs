use std::io::stdout;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::input::handle_event;
use crate::app::{App, EditorSession, Message};
use crate::ui::style::Theme;

/// Poll timeout; each timeout without input becomes a `Tick`.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

impl App {
    /// Run the editor until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be initialized or an I/O
    /// error occurs while reading events or drawing.
    pub fn run(&self) -> Result<()> {
        let _run_scope = crate::perf::scope("app.run.total");

        let theme = Theme::detect(self.theme_mode);
        let mut session = self.session();

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal; screenmd requires an interactive terminal")?;

        let result = execute!(stdout(), EnableMouseCapture)
            .context("Failed to enable mouse capture")
            .and_then(|()| Self::event_loop(&mut terminal, &mut session, &theme));

        let _ = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();

        result
    }

    fn event_loop(
        terminal: &mut DefaultTerminal,
        session: &mut EditorSession,
        theme: &Theme,
    ) -> Result<()> {
        // crossterm reports no initial size event
        let size = terminal.size().context("Failed to query terminal size")?;
        session.dispatch(Message::Resize(size.width, size.height));

        let mut needs_render = true;
        let mut frame_idx: u64 = 0;

        loop {
            if session.should_quit() {
                tracing::debug!(frames = frame_idx, "quit");
                return Ok(());
            }

            if needs_render {
                frame_idx += 1;
                let _draw_scope = crate::perf::scope("frame.draw");
                terminal.draw(|frame| crate::ui::render(session.model(), theme, frame))?;
                needs_render = false;
            }

            if !event::poll(TICK_INTERVAL)? {
                if !session.model().is_ready() {
                    session.dispatch(Message::Tick);
                    needs_render = true;
                }
                continue;
            }

            let mut handled = 0_u32;
            loop {
                let active = session.model().active_pane();
                if let Some(msg) = handle_event(&event::read()?, active) {
                    session.dispatch(msg);
                    handled += 1;
                }
                if session.should_quit() || !event::poll(Duration::ZERO)? {
                    break;
                }
            }
            if handled > 1 {
                tracing::trace!(frame = frame_idx, handled, "drained event burst");
            }
            needs_render |= handled > 0;
        }
    }
}
