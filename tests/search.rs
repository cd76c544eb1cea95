//! Incremental search tests - matching, highlights, search sessions

mod common;

use std::time::Duration;

use ame::messages::{Msg, SearchMsg};
use ame::model::{Document, HighlightTone, ViewSlot};
use ame::update::update;
use common::{app_cursor, cursor, press, test_app, test_session, type_keys};

fn highlights_on(doc: &Document, line: usize) -> Vec<(usize, usize, HighlightTone)> {
    let id = doc.lines().id_at(line).unwrap();
    doc.line(id)
        .highlights()
        .iter()
        .map(|hl| (hl.offset, hl.len, hl.tone))
        .collect()
}

// ========================================================================
// Go To Next Match Tests
// ========================================================================

#[test]
fn test_go_to_next_match_is_case_insensitive() {
    let mut doc = Document::with_text("foo BAR baz");
    assert!(doc.go_to_next_match(ViewSlot::Left, "bar"));
    assert_eq!(doc.cursor_position(ViewSlot::Left), (0, 4));

    let id = doc.lines().id_at(0).unwrap();
    let highlights = doc.line(id).highlights();
    assert_eq!(highlights.len(), 1);
    assert_eq!((highlights[0].offset, highlights[0].len), (4, 3));
    assert!(highlights[0].is_transient());
}

#[test]
fn test_match_at_cursor_is_skipped() {
    let mut doc = Document::with_text("abab");
    assert!(doc.go_to_next_match(ViewSlot::Left, "ab"));
    assert_eq!(doc.cursor_position(ViewSlot::Left), (0, 2));
    assert!(!doc.go_to_next_match(ViewSlot::Left, "ab"));
    assert_eq!(doc.cursor_position(ViewSlot::Left), (0, 2));
}

#[test]
fn test_search_continues_on_later_lines_from_offset_zero() {
    let mut doc = Document::with_text("xx needle\nneedle\nnone");
    doc.set_cursor(ViewSlot::Left, 0, 3);
    assert!(doc.go_to_next_match(ViewSlot::Left, "NEEDLE"));
    assert_eq!(doc.cursor_position(ViewSlot::Left), (1, 0));
}

#[test]
fn test_search_does_not_wrap() {
    let mut doc = Document::with_text("target\nplain");
    doc.set_cursor(ViewSlot::Left, 1, 0);
    assert!(!doc.go_to_next_match(ViewSlot::Left, "target"));
    assert_eq!(doc.cursor_position(ViewSlot::Left), (1, 0));
}

#[test]
fn test_empty_query_is_noop() {
    let mut doc = Document::with_text("abc");
    assert!(!doc.go_to_next_match(ViewSlot::Left, ""));
    assert_eq!(doc.mark_all_matches(ViewSlot::Left, ""), 0);
}

#[test]
fn test_next_match_replaces_previous_flash() {
    let mut doc = Document::with_text("cat cat cat");
    doc.go_to_next_match(ViewSlot::Left, "cat");
    doc.go_to_next_match(ViewSlot::Left, "cat");
    assert_eq!(
        highlights_on(&doc, 0),
        vec![(8, 3, HighlightTone::Match)]
    );
}

#[test]
fn test_match_flash_fades_with_ticks() {
    let mut doc = Document::with_text("one two");
    doc.go_to_next_match(ViewSlot::Left, "two");
    assert_eq!(doc.animated_highlights(), 1);

    doc.tick(Duration::from_millis(400));
    let id = doc.lines().id_at(0).unwrap();
    let opacity = doc.line(id).highlights()[0].opacity();
    assert!(opacity > 0.0 && opacity < 1.0);

    doc.tick(Duration::from_secs(5));
    assert_eq!(doc.animated_highlights(), 0);
    assert!(highlights_on(&doc, 0).is_empty());
}

#[test]
fn test_offscreen_match_requests_scroll() {
    let text = (0..500).map(|i| format!("line {}", i)).collect::<Vec<_>>().join("\n");
    let mut doc = Document::with_text(&format!("{}\nfar away", text));
    assert!(doc.go_to_next_match(ViewSlot::Left, "far away"));
    let scroll = doc.view(ViewSlot::Left).scroll;
    assert!(scroll.target_y < 0.0, "expected a scroll target, got {:?}", scroll);
}

// ========================================================================
// Mark All Tests
// ========================================================================

#[test]
fn test_mark_all_marks_first_primary_rest_secondary() {
    let mut doc = Document::with_text("a-a\na");
    let count = doc.mark_all_matches(ViewSlot::Left, "A");
    // the match at the cursor is excluded
    assert_eq!(count, 2);
    assert_eq!(doc.cursor_position(ViewSlot::Left), (0, 0));
    assert_eq!(highlights_on(&doc, 0), vec![(2, 1, HighlightTone::Primary)]);
    assert_eq!(highlights_on(&doc, 1), vec![(0, 1, HighlightTone::Secondary)]);
}

#[test]
fn test_mark_all_replaces_previous_marks() {
    let mut doc = Document::with_text("xay bay");
    doc.mark_all_matches(ViewSlot::Left, "a");
    doc.mark_all_matches(ViewSlot::Left, "bay");
    assert_eq!(highlights_on(&doc, 0), vec![(4, 3, HighlightTone::Primary)]);
}

#[test]
fn test_mark_all_only_touches_its_own_view() {
    let mut doc = Document::with_text("xa xa");
    doc.mark_all_matches(ViewSlot::Right, "a");
    doc.clear_highlights(ViewSlot::Left);
    assert_eq!(highlights_on(&doc, 0).len(), 2);
    doc.clear_highlights(ViewSlot::Right);
    assert!(highlights_on(&doc, 0).is_empty());
}

#[test]
fn test_mark_all_message_reports_count() {
    let mut session = test_session("o o o", 0, 0);
    update(&mut session, Msg::Search(SearchMsg::MarkAll("o".to_string())));
    assert_eq!(session.message.as_deref(), Some("2 matches"));
}

// ========================================================================
// Incremental Search Session Tests
// ========================================================================

#[test]
fn test_isearch_typing_moves_to_match() {
    let mut app = test_app("foo BAR baz bar", 0, 0);
    press(&mut app, "ctrl+f");
    assert_eq!(app.session.message.as_deref(), Some("I-search: "));

    type_keys(&mut app, "ba");
    assert_eq!(app_cursor(&app), (0, 4));
    type_keys(&mut app, "z");
    assert_eq!(app_cursor(&app), (0, 8));
    assert_eq!(app.session.message.as_deref(), Some("I-search: baz"));
}

#[test]
fn test_isearch_backspace_searches_again_from_origin() {
    let mut app = test_app("foo BAR baz bar", 0, 0);
    press(&mut app, "ctrl+f");
    type_keys(&mut app, "baz");
    assert_eq!(app_cursor(&app), (0, 8));
    press(&mut app, "backspace");
    assert_eq!(app_cursor(&app), (0, 4));
    assert_eq!(app.session.message.as_deref(), Some("I-search: ba"));
}

#[test]
fn test_isearch_ctrl_f_advances_and_enter_keeps_cursor() {
    let mut app = test_app("bar bar bar", 0, 0);
    press(&mut app, "ctrl+f");
    type_keys(&mut app, "bar");
    assert_eq!(app_cursor(&app), (0, 4));
    press(&mut app, "ctrl+f");
    assert_eq!(app_cursor(&app), (0, 8));
    press(&mut app, "enter");

    let slot = app.session.active_slot();
    assert!(!app.session.active_document().view(slot).search.is_searching());
    assert_eq!(app_cursor(&app), (0, 8));
    assert_eq!(app.session.active_document().text(), "bar bar bar");
}

#[test]
fn test_isearch_failure_is_reported() {
    let mut app = test_app("abc", 0, 0);
    press(&mut app, "ctrl+f");
    type_keys(&mut app, "zz");
    assert_eq!(app.session.message.as_deref(), Some("Failing I-search: zz"));
    assert_eq!(app_cursor(&app), (0, 0));
}

#[test]
fn test_isearch_abort_restores_origin_and_clears_highlights() {
    let mut app = test_app("one two\nthree two", 0, 1);
    press(&mut app, "ctrl+f");
    type_keys(&mut app, "two");
    press(&mut app, "ctrl+f");
    assert_eq!(app_cursor(&app), (1, 6));

    press(&mut app, "ctrl+g");
    assert_eq!(app_cursor(&app), (0, 1));
    let doc = app.session.active_document();
    assert!(highlights_on(doc, 0).is_empty());
    assert!(highlights_on(doc, 1).is_empty());
    assert_eq!(app.session.message.as_deref(), Some("Quit"));
}

#[test]
fn test_other_command_ends_search_then_runs() {
    let mut app = test_app("find me here", 0, 0);
    press(&mut app, "ctrl+f");
    type_keys(&mut app, "me");
    press(&mut app, "end");

    let slot = app.session.active_slot();
    assert!(!app.session.active_document().view(slot).search.is_searching());
    assert_eq!(app_cursor(&app), (0, 12));
}

#[test]
fn test_search_in_one_view_leaves_other_view_alone() {
    let mut session = test_session("alpha beta alpha", 0, 0);
    update(&mut session, Msg::Search(SearchMsg::Begin));
    for ch in "beta".chars() {
        update(&mut session, Msg::Search(SearchMsg::Input(ch)));
    }
    assert_eq!(cursor(&session), (0, 6));
    assert_eq!(
        session.active_document().cursor_position(ViewSlot::Right),
        (0, 0)
    );
}
