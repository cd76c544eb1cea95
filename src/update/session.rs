//! Session message handlers (buffers, panels, file operations, lifecycle)

use crate::commands::Cmd;
use crate::messages::SessionMsg;
use crate::model::{OpenOutcome, Session};

use super::search::with_query_replace;

/// Handle session messages
pub fn update_session(session: &mut Session, msg: SessionMsg) -> Option<Cmd> {
    match msg {
        SessionMsg::OpenFile(path) => {
            session.message = match session.open_file(&path) {
                Ok(OpenOutcome::Created) => Some("(New file)".to_string()),
                Ok(OpenOutcome::Loaded | OpenOutcome::Switched) => None,
                Err(e) => {
                    let name = path.display().to_string();
                    Some(e.user_message(&name))
                }
            };
            Some(Cmd::Redraw)
        }

        SessionMsg::SaveFile => {
            let id = session.active_id();
            if session.active_document().file_path.is_some() {
                session.message = Some("Saving...".to_string());
                Some(Cmd::SaveFile { id, path: None })
            } else {
                session.message = Some("No file path - cannot save".to_string());
                Some(Cmd::Redraw)
            }
        }

        SessionMsg::SaveFileAs(path) => {
            let id = session.active_id();
            session.message = Some("Saving...".to_string());
            Some(Cmd::SaveFile {
                id,
                path: Some(path),
            })
        }

        SessionMsg::SaveCompleted { id, result } => {
            let name = session
                .document(id)
                .map(|doc| doc.name.clone())
                .unwrap_or_default();
            session.message = Some(match result {
                Ok(()) => format!("Wrote {}", name),
                Err(e) => format!("Error: {}", e),
            });
            Some(Cmd::Redraw)
        }

        SessionMsg::SwitchTo(name) => {
            if !session.switch_to(&name) {
                session.message = Some(format!("No buffer named {}", name));
            }
            Some(Cmd::Redraw)
        }

        SessionMsg::SwitchToPrevious => {
            if !session.switch_to_previous() {
                session.message = Some("No previous buffer".to_string());
            }
            Some(Cmd::Redraw)
        }

        SessionMsg::KillBuffer => {
            if !session.kill_active() {
                session.message = Some("Cannot kill the last buffer".to_string());
            }
            Some(Cmd::Redraw)
        }

        SessionMsg::Split => {
            session.split();
            Some(Cmd::Redraw)
        }

        SessionMsg::Unsplit => {
            session.unsplit();
            Some(Cmd::Redraw)
        }

        SessionMsg::SwapFocus => {
            session.swap_focus();
            Some(Cmd::Redraw)
        }

        SessionMsg::Cancel => {
            let slot = session.active_slot();
            if session.query_replace.is_some() {
                with_query_replace(session, |qr, doc| qr.abort(doc));
            } else {
                let doc = session.active_document_mut();
                if doc.view(slot).search.is_searching() {
                    doc.abort_search(slot);
                } else {
                    doc.unset_mark(slot);
                }
                session.message = Some("Quit".to_string());
            }
            Some(Cmd::Redraw)
        }

        SessionMsg::Tick(dt) => {
            let fading = session.tick(dt);
            if fading > 0 || session.is_scrolling() {
                Some(Cmd::Animate)
            } else {
                None
            }
        }

        SessionMsg::Resize(width, height) => {
            session.resize(width, height);
            Some(Cmd::Redraw)
        }

        SessionMsg::Quit => {
            for doc in session.documents().iter().filter(|d| d.is_dirty()) {
                tracing::warn!("Quitting with unsaved changes in {}", doc.name);
            }
            Some(Cmd::Quit)
        }
    }
}
