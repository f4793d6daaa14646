//! Read-eval loop driving the app from typed commands.

use crate::commands::{HELP_TEXT, Input, parse};
use crate::error::SubwayError;
use crate::terminal_view::TerminalView;

use client_core::app::{App, UiEvent};
use client_core::config::ClientConfig;
use client_core::router::{HOME_PATH, History, MemoryHistory};
use client_core::session::{MemoryStorage, SessionStorage};
use client_core::view::View;

use std::sync::Arc;

use log::{debug, info, warn};

const PROMPT: &str = "subway> ";

/// Whether the loop keeps reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Console {
    app: App,
    history: Arc<MemoryHistory>,
    view: Arc<TerminalView>,
}

impl Console {
    /// The session lives as long as the process, like a browser tab's
    /// session storage.
    pub fn new(config: &ClientConfig, view: Arc<TerminalView>) -> Result<Self, SubwayError> {
        let history = Arc::new(MemoryHistory::starting_at(HOME_PATH));
        let storage: Arc<dyn SessionStorage> = Arc::new(MemoryStorage::new());
        let app = App::new(
            config,
            Arc::clone(&view) as Arc<dyn View>,
            Arc::clone(&history) as Arc<dyn History>,
            storage,
        )?;

        Ok(Self { app, history, view })
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub async fn execute(&self, input: Input) -> Flow {
        match input {
            Input::Event(event) => self.app.handle_event(event).await,
            Input::Back => self.traverse(self.history.back(), "No earlier page").await,
            Input::Forward => self.traverse(self.history.forward(), "No later page").await,
            Input::Help => self.view.notice(HELP_TEXT),
            Input::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    async fn traverse(&self, path: Option<String>, empty: &str) {
        match path {
            Some(path) => self.app.handle_event(UiEvent::PopState { path }).await,
            None => self.view.notice(empty),
        }
    }

    /// Render the start page, then read commands until `quit` or end of input.
    pub async fn run(&self) -> Result<(), SubwayError> {
        self.app.start().await;
        self.view.notice("Type 'help' for commands.");

        while let Some(line) = self.view.read_line(PROMPT)? {
            if line.trim().is_empty() {
                continue;
            }
            debug!("Command: {line}");
            match parse(&line) {
                Ok(input) => {
                    if self.execute(input).await == Flow::Quit {
                        break;
                    }
                }
                Err(error) => {
                    warn!("{error}");
                    self.view.notice(error.message());
                }
            }
        }

        info!("Console loop finished");
        Ok(())
    }
}
