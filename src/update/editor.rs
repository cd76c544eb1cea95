//! Editor update functions for cursor movement and the mark.

use crate::commands::Cmd;
use crate::messages::{Direction, EditorMsg, Motion};
use crate::model::{Document, Session, ViewSlot};

/// Handle editor messages (cursor movement, mark)
pub fn update_editor(session: &mut Session, msg: EditorMsg) -> Option<Cmd> {
    let slot = session.active_slot();
    let doc = session.active_document_mut();

    match msg {
        EditorMsg::Move(motion) => {
            // A plain motion ends a selection that Shift started
            if doc.view(slot).mark.is_shift_extend() {
                doc.unset_mark(slot);
            }
            apply_motion(doc, slot, motion);
        }

        EditorMsg::MoveWithSelection(motion) => {
            if !doc.view(slot).mark.is_active() {
                doc.set_mark(slot, true);
            }
            apply_motion(doc, slot, motion);
        }

        EditorMsg::GotoLine(line_number) => {
            doc.goto_line(slot, line_number);
        }

        EditorMsg::SetCursorPosition { line, column } => {
            doc.set_cursor(slot, line, column);
            doc.reveal_cursor(slot);
        }

        EditorMsg::SetMark => {
            doc.set_mark(slot, false);
            session.message = Some("Mark set".to_string());
        }

        EditorMsg::ClearMark => {
            doc.unset_mark(slot);
        }
    }

    Some(Cmd::Redraw)
}

pub(super) fn apply_motion(doc: &mut Document, slot: ViewSlot, motion: Motion) {
    match motion {
        Motion::Char(Direction::Up) => doc.move_up(slot),
        Motion::Char(Direction::Down) => doc.move_down(slot),
        Motion::Char(Direction::Left) => doc.move_left(slot),
        Motion::Char(Direction::Right) => doc.move_right(slot),
        Motion::Word(Direction::Left | Direction::Up) => doc.move_word_backward(slot),
        Motion::Word(Direction::Right | Direction::Down) => doc.move_word_forward(slot),
        Motion::LineStart => doc.move_line_start(slot),
        Motion::LineEnd => doc.move_line_end(slot),
        Motion::DocumentStart => doc.move_document_start(slot),
        Motion::DocumentEnd => doc.move_document_end(slot),
        Motion::PageUp => doc.page_up(slot),
        Motion::PageDown => doc.page_down(slot),
    }
}
