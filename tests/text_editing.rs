//! Text editing tests - insert, delete, newline, tab, paste
//!
//! Every edit goes through `update` so the invariant check in debug builds
//! runs after each message.

mod common;

use ame::messages::{Direction, DocumentMsg, EditorMsg, Motion, Msg};
use ame::model::Document;
use ame::update::update;
use common::{buffer_to_string, cursor, lines, send, test_session, type_text};

// ========================================================================
// Insert Character Tests
// ========================================================================

#[test]
fn test_insert_char_at_start() {
    let mut session = test_session("hello", 0, 0);
    update(&mut session, Msg::insert_char('X'));
    assert_eq!(buffer_to_string(&session), "Xhello");
    assert_eq!(cursor(&session), (0, 1));
}

#[test]
fn test_insert_char_in_middle() {
    let mut session = test_session("hello", 0, 2);
    update(&mut session, Msg::insert_char('X'));
    assert_eq!(buffer_to_string(&session), "heXllo");
    assert_eq!(cursor(&session), (0, 3));
}

#[test]
fn test_insert_char_past_initial_capacity() {
    let mut session = test_session("", 0, 0);
    let text = "the line grows well past its first sixteen slots";
    type_text(&mut session, text);
    assert_eq!(buffer_to_string(&session), text);
    assert_eq!(cursor(&session), (0, text.chars().count()));
}

#[test]
fn test_typing_marks_document_dirty() {
    let mut session = test_session("abc", 0, 0);
    assert!(!session.active_document().is_dirty());
    update(&mut session, Msg::insert_char('x'));
    assert!(session.active_document().is_dirty());
}

// ========================================================================
// Newline Tests
// ========================================================================

#[test]
fn test_split_hello_world() {
    let mut session = test_session("hello world", 0, 5);
    update(&mut session, Msg::Document(DocumentMsg::InsertNewline));
    assert_eq!(lines(&session), vec!["hello", " world"]);
    assert_eq!(cursor(&session), (1, 0));
}

#[test]
fn test_newline_at_end_of_last_line_appends_empty_line() {
    let mut session = test_session("abc", 0, 3);
    update(&mut session, Msg::Document(DocumentMsg::InsertNewline));
    assert_eq!(lines(&session), vec!["abc", ""]);
    assert_eq!(cursor(&session), (1, 0));
}

#[test]
fn test_newline_in_middle_of_document_renumbers_following_lines() {
    let mut session = test_session("one\ntwo\nthree", 1, 1);
    update(&mut session, Msg::Document(DocumentMsg::InsertNewline));
    assert_eq!(lines(&session), vec!["one", "t", "wo", "three"]);
    assert_eq!(cursor(&session), (2, 0));

    let doc = session.active_document();
    let ordinals: Vec<usize> = doc.lines().iter().map(|(_, line)| line.y()).collect();
    assert_eq!(ordinals, vec![0, 1, 2, 3]);
    assert_eq!(doc.text_of_line(3).as_deref(), Some("three"));
}

// ========================================================================
// Backspace / Delete Tests
// ========================================================================

#[test]
fn test_backspace_deletes_previous_char() {
    let mut session = test_session("hello", 0, 3);
    update(&mut session, Msg::Document(DocumentMsg::DeleteBackward));
    assert_eq!(buffer_to_string(&session), "helo");
    assert_eq!(cursor(&session), (0, 2));
}

#[test]
fn test_backspace_at_column_zero_merges_with_previous() {
    let mut session = test_session("abc\ndef", 1, 0);
    update(&mut session, Msg::Document(DocumentMsg::DeleteBackward));
    assert_eq!(lines(&session), vec!["abcdef"]);
    assert_eq!(cursor(&session), (0, 3));
}

#[test]
fn test_backspace_at_document_start_is_noop() {
    let mut session = test_session("abc", 0, 0);
    update(&mut session, Msg::Document(DocumentMsg::DeleteBackward));
    assert_eq!(buffer_to_string(&session), "abc");
    assert!(!session.active_document().is_dirty());
}

#[test]
fn test_delete_forward_at_end_of_line_merges_with_next() {
    let mut session = test_session("abc\ndef\nghi", 0, 3);
    update(&mut session, Msg::Document(DocumentMsg::DeleteForward));
    assert_eq!(lines(&session), vec!["abcdef", "ghi"]);
    assert_eq!(cursor(&session), (0, 3));
}

#[test]
fn test_delete_forward_at_document_end_is_noop() {
    let mut session = test_session("abc\ndef", 1, 3);
    update(&mut session, Msg::Document(DocumentMsg::DeleteForward));
    assert_eq!(lines(&session), vec!["abc", "def"]);
}

#[test]
fn test_split_then_merge_restores_line() {
    let mut session = test_session("split me here", 0, 6);
    update(&mut session, Msg::Document(DocumentMsg::InsertNewline));
    update(&mut session, Msg::Document(DocumentMsg::DeleteBackward));
    assert_eq!(lines(&session), vec!["split me here"]);
    assert_eq!(cursor(&session), (0, 6));
}

// ========================================================================
// Tab Tests
// ========================================================================

#[test]
fn test_tab_inserts_spaces_by_default() {
    let mut session = test_session("x", 0, 0);
    update(&mut session, Msg::Document(DocumentMsg::InsertTab));
    assert_eq!(buffer_to_string(&session), "    x");
    assert_eq!(cursor(&session), (0, 4));
}

#[test]
fn test_tab_inserts_tab_in_tab_indented_document() {
    let mut session = ame::model::Session::with_document(Document::with_text("\tfirst\nsecond"));
    update(
        &mut session,
        Msg::Editor(EditorMsg::SetCursorPosition { line: 1, column: 0 }),
    );
    update(&mut session, Msg::Document(DocumentMsg::InsertTab));
    assert_eq!(lines(&session), vec!["\tfirst", "\tsecond"]);
}

// ========================================================================
// Insert Text (paste semantics) Tests
// ========================================================================

#[test]
fn test_insert_text_splits_on_every_line_ending() {
    let mut session = test_session("<>", 0, 1);
    update(
        &mut session,
        Msg::Document(DocumentMsg::InsertText("a\nb\r\nc\rd".to_string())),
    );
    assert_eq!(lines(&session), vec!["<a", "b", "c", "d>"]);
    assert_eq!(cursor(&session), (3, 1));
}

#[test]
fn test_insert_then_delete_round_trip() {
    let original = "first line\nsecond line";
    let mut session = test_session(original, 1, 6);
    let inserted = "XYZ\nuvw";
    update(
        &mut session,
        Msg::Document(DocumentMsg::InsertText(inserted.to_string())),
    );
    assert_ne!(buffer_to_string(&session), original);

    send(
        &mut session,
        (0..inserted.chars().count()).map(|_| Msg::Document(DocumentMsg::DeleteBackward)),
    );
    assert_eq!(buffer_to_string(&session), original);
    assert_eq!(cursor(&session), (1, 6));
}

// ========================================================================
// Cursor Motion Tests
// ========================================================================

fn mv(motion: Motion) -> Msg {
    Msg::Editor(EditorMsg::Move(motion))
}

#[test]
fn test_left_right_do_not_cross_lines() {
    let mut session = test_session("ab\ncd", 1, 0);
    update(&mut session, Msg::move_cursor(Direction::Left));
    assert_eq!(cursor(&session), (1, 0));

    update(
        &mut session,
        Msg::Editor(EditorMsg::SetCursorPosition { line: 0, column: 2 }),
    );
    update(&mut session, Msg::move_cursor(Direction::Right));
    assert_eq!(cursor(&session), (0, 2));
}

#[test]
fn test_down_clamps_offset_to_shorter_line() {
    let mut session = test_session("a long line\nab", 0, 8);
    update(&mut session, Msg::move_cursor(Direction::Down));
    assert_eq!(cursor(&session), (1, 2));
}

#[test]
fn test_word_motion_crosses_lines_at_edges() {
    let mut session = test_session("foo, bar\nbaz", 0, 0);
    let forward = || mv(Motion::Word(Direction::Right));
    let backward = || mv(Motion::Word(Direction::Left));

    update(&mut session, forward());
    assert_eq!(cursor(&session), (0, 3));
    update(&mut session, forward());
    assert_eq!(cursor(&session), (0, 8));
    update(&mut session, forward());
    assert_eq!(cursor(&session), (1, 0));

    update(&mut session, backward());
    assert_eq!(cursor(&session), (0, 8));
    update(&mut session, backward());
    assert_eq!(cursor(&session), (0, 5));
}

#[test]
fn test_document_start_and_end() {
    let mut session = test_session("one\ntwo\nthree", 1, 1);
    update(&mut session, mv(Motion::DocumentEnd));
    assert_eq!(cursor(&session), (2, 5));
    update(&mut session, mv(Motion::DocumentStart));
    assert_eq!(cursor(&session), (0, 0));
}

#[test]
fn test_goto_line_is_one_based_and_clamped() {
    let mut session = test_session("a\nb\nc", 0, 0);
    update(&mut session, Msg::Editor(EditorMsg::GotoLine(2)));
    assert_eq!(cursor(&session), (1, 0));
    update(&mut session, Msg::Editor(EditorMsg::GotoLine(99)));
    assert_eq!(cursor(&session), (2, 0));
    update(&mut session, Msg::Editor(EditorMsg::GotoLine(0)));
    assert_eq!(cursor(&session), (0, 0));
}
