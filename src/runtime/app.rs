//! Application driver: owns the session and keymap, runs messages through
//! `update`, and performs the side effects that come back.

use std::collections::VecDeque;
use std::time::Duration;

use crate::commands::Cmd;
use crate::keymap::{Keymap, Keystroke};
use crate::messages::{Msg, SessionMsg};
use crate::model::Session;
use crate::replace::QueryReplaceState;
use crate::update::update;

use super::input::map_keystroke;

#[derive(Debug)]
pub struct App {
    pub session: Session,
    pub keymap: Keymap,
    /// Text typed into the query-replace prompt so far
    prompt_input: String,
    running: bool,
}

impl App {
    pub fn new(session: Session, keymap: Keymap) -> Self {
        Self {
            session,
            keymap,
            prompt_input: String::new(),
            running: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Route one keystroke through input handling and update
    pub fn handle_keystroke(&mut self, keystroke: Keystroke) {
        let msgs = map_keystroke(&self.session, &self.keymap, &mut self.prompt_input, keystroke);
        for msg in msgs {
            self.dispatch(msg);
        }
        self.show_prompt_input();
    }

    /// Run a message and any messages its side effects produce
    pub fn dispatch(&mut self, msg: Msg) {
        let mut queue = VecDeque::from([msg]);
        while let Some(msg) = queue.pop_front() {
            if let Some(cmd) = update(&mut self.session, msg) {
                self.process_cmd(cmd, &mut queue);
            }
        }
    }

    /// Advance animations; returns `true` while anything is still moving
    pub fn tick(&mut self, dt: Duration) -> bool {
        matches!(
            update(&mut self.session, Msg::Session(SessionMsg::Tick(dt))),
            Some(Cmd::Animate)
        )
    }

    fn process_cmd(&mut self, cmd: Cmd, queue: &mut VecDeque<Msg>) {
        match cmd {
            Cmd::Redraw | Cmd::Animate => {}
            Cmd::SaveFile { id, path } => {
                let result = match self.session.document_mut(id) {
                    Some(doc) => {
                        let saved = match path {
                            Some(path) => doc.save_as(path),
                            None => doc.save(),
                        };
                        saved.map_err(|e| e.to_string())
                    }
                    None => Err(format!("unknown document {:?}", id)),
                };
                if let Err(e) = &result {
                    tracing::error!("Save failed: {}", e);
                }
                queue.push_back(Msg::Session(SessionMsg::SaveCompleted { id, result }));
            }
            Cmd::Quit => {
                tracing::info!("Quit requested");
                self.running = false;
            }
        }
    }

    /// Echo the prompt and typed text while query-replace collects input
    fn show_prompt_input(&mut self) {
        let Some(qr) = &self.session.query_replace else {
            self.prompt_input.clear();
            return;
        };
        if matches!(
            qr.state(),
            QueryReplaceState::CollectQuery | QueryReplaceState::CollectReplacement { .. }
        ) {
            self.session.message = Some(format!("{}{}", qr.prompt(), self.prompt_input));
        }
    }
}
