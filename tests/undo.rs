//! Undo tests - keystroke coalescing, snapshot restore, limits

mod common;

use ame::config::EditorConfig;
use ame::messages::{DocumentMsg, Msg, SearchMsg};
use ame::model::{Document, ViewSlot};
use ame::update::update;
use common::{
    buffer_to_string, cursor, press, session_with_config, test_app, test_session, type_text,
};

fn undo() -> Msg {
    Msg::Document(DocumentMsg::Undo)
}

// ========================================================================
// Snapshot Restore Tests
// ========================================================================

#[test]
fn test_undo_restores_previous_capture() {
    let mut doc = Document::with_text("v0");
    let mut expected = Vec::new();
    for i in 1..=4 {
        doc.insert_text(ViewSlot::Left, &format!("\nv{}", i));
        doc.capture_snapshot(ViewSlot::Left);
        expected.push((doc.text(), doc.cursor_position(ViewSlot::Left)));
    }

    for i in (0..3).rev() {
        assert!(doc.undo(ViewSlot::Left));
        assert_eq!(doc.text(), expected[i].0);
        assert_eq!(doc.cursor_position(ViewSlot::Left), expected[i].1);
        assert!(doc.validate().is_ok());
    }

    assert!(doc.undo(ViewSlot::Left));
    assert_eq!(doc.text(), "v0");
    assert!(!doc.undo(ViewSlot::Left));
}

#[test]
fn test_undo_with_single_snapshot_is_noop() {
    let mut session = test_session("untouched", 0, 3);
    update(&mut session, undo());
    assert_eq!(buffer_to_string(&session), "untouched");
    assert_eq!(
        session.message.as_deref(),
        Some("No further undo information")
    );
}

#[test]
fn test_undo_after_typing_restores_text_before_typing() {
    let mut session = test_session("abc", 0, 3);
    type_text(&mut session, "def");
    assert_eq!(buffer_to_string(&session), "abcdef");

    update(&mut session, undo());
    assert_eq!(buffer_to_string(&session), "abc");
    // cursor as it was when the document was created
    assert_eq!(cursor(&session), (0, 0));
}

#[test]
fn test_typing_is_coalesced_every_interval() {
    let config = EditorConfig {
        undo_interval: 3,
        ..EditorConfig::default()
    };
    let mut session = session_with_config("", config);
    type_text(&mut session, "abcdefg");

    // snapshots after "abc" and "abcdef"; "g" is pending
    update(&mut session, undo());
    assert_eq!(buffer_to_string(&session), "abcdef");
    update(&mut session, undo());
    assert_eq!(buffer_to_string(&session), "abc");
    update(&mut session, undo());
    assert_eq!(buffer_to_string(&session), "");
}

#[test]
fn test_paste_is_its_own_undo_step() {
    let mut session = test_session("", 0, 0);
    type_text(&mut session, "ab");
    update(
        &mut session,
        Msg::Document(DocumentMsg::InsertText("PASTED".to_string())),
    );
    assert_eq!(buffer_to_string(&session), "abPASTED");

    update(&mut session, undo());
    assert_eq!(buffer_to_string(&session), "ab");
    assert_eq!(cursor(&session), (0, 2));
}

#[test]
fn test_undo_replace_restores_cursor_too() {
    let mut session = test_session("cat cat", 0, 0);
    update(
        &mut session,
        Msg::Search(SearchMsg::ReplaceNext {
            query: "cat".to_string(),
            replacement: "dog".to_string(),
        }),
    );
    assert_eq!(buffer_to_string(&session), "cat dog");
    update(&mut session, undo());
    assert_eq!(buffer_to_string(&session), "cat cat");
}

#[test]
fn test_undo_keeps_other_view_cursor_clamped() {
    let mut doc = Document::with_text("a\nb\nc");
    doc.insert_text(ViewSlot::Left, "x\ny\n");
    doc.capture_snapshot(ViewSlot::Left);
    doc.set_cursor(ViewSlot::Right, 4, 1);

    assert!(doc.undo(ViewSlot::Left));
    assert_eq!(doc.text(), "a\nb\nc");
    assert_eq!(doc.cursor_position(ViewSlot::Right), (2, 1));
    assert!(doc.validate().is_ok());
}

// ========================================================================
// History Limit Tests
// ========================================================================

#[test]
fn test_history_is_capped() {
    let config = EditorConfig {
        max_undo_snapshots: 3,
        ..EditorConfig::default()
    };
    let mut session = session_with_config("", config);
    for i in 0..6 {
        update(
            &mut session,
            Msg::Document(DocumentMsg::InsertText(i.to_string())),
        );
    }
    assert_eq!(session.active_document().undo.len(), 3);

    update(&mut session, undo());
    update(&mut session, undo());
    assert_eq!(buffer_to_string(&session), "0123");
    update(&mut session, undo());
    assert_eq!(buffer_to_string(&session), "0123");
}

// ========================================================================
// Keyboard Tests
// ========================================================================

#[test]
fn test_ctrl_z_undoes_typing() {
    let mut app = test_app("keep", 0, 4);
    press(&mut app, "space m o r e");
    assert_eq!(app.session.active_document().text(), "keep more");
    press(&mut app, "ctrl+z");
    assert_eq!(app.session.active_document().text(), "keep");
}
