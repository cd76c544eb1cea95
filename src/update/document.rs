//! Document update functions for text editing and undo

use crate::commands::Cmd;
use crate::messages::DocumentMsg;
use crate::model::Session;

/// Handle document messages (text editing, clipboard, undo)
pub fn update_document(session: &mut Session, msg: DocumentMsg) -> Option<Cmd> {
    let (doc, slot, clipboard) = session.active_parts();

    match msg {
        DocumentMsg::InsertChar(ch) => {
            doc.insert_char(slot, ch);
            doc.record_keystroke(slot);
        }

        DocumentMsg::InsertText(text) => {
            doc.flush_keystrokes(slot);
            doc.insert_text(slot, &text);
            doc.reveal_cursor(slot);
            doc.capture_snapshot(slot);
        }

        DocumentMsg::InsertNewline => {
            doc.split_line_at(slot);
            doc.reveal_cursor(slot);
            doc.record_keystroke(slot);
        }

        DocumentMsg::InsertTab => {
            doc.insert_tab(slot);
            doc.record_keystroke(slot);
        }

        DocumentMsg::DeleteBackward => {
            if doc.backspace(slot) {
                doc.reveal_cursor(slot);
                doc.record_keystroke(slot);
            }
        }

        DocumentMsg::DeleteForward => {
            if doc.delete_forward(slot) {
                doc.record_keystroke(slot);
            }
        }

        DocumentMsg::Copy => {
            if doc.copy_selection(slot, clipboard) {
                doc.unset_mark(slot);
                session.message = Some("Copied".to_string());
            }
        }

        DocumentMsg::Cut => {
            doc.flush_keystrokes(slot);
            if doc.cut_selection(slot, clipboard) {
                doc.reveal_cursor(slot);
                doc.capture_snapshot(slot);
            }
        }

        DocumentMsg::Paste => {
            doc.flush_keystrokes(slot);
            if doc.paste(slot, clipboard) {
                doc.capture_snapshot(slot);
            }
        }

        DocumentMsg::Undo => {
            doc.flush_keystrokes(slot);
            if doc.undo(slot) {
                doc.reveal_cursor(slot);
            } else {
                session.message = Some("No further undo information".to_string());
            }
        }
    }

    Some(Cmd::Redraw)
}
