//! Keymap tests - keystrokes through the command table into the editor

mod common;

use ame::keymap::{default_bindings, load_keymap_file, merge_bindings, Keymap};
use common::{app_cursor, app_lines, press, test_app};

#[test]
fn test_numpad_home_end_without_numlock() {
    let mut app = test_app("one\ntwo words", 1, 4);
    press(&mut app, "num7");
    assert_eq!(app_cursor(&app), (1, 0));
    press(&mut app, "num1");
    assert_eq!(app_cursor(&app), (1, 9));
}

#[test]
fn test_ctrl_numpad_goes_to_document_ends() {
    let mut app = test_app("one\ntwo\nthree", 1, 1);
    press(&mut app, "ctrl+num1");
    assert_eq!(app_cursor(&app), (2, 5));
    press(&mut app, "ctrl+num7");
    assert_eq!(app_cursor(&app), (0, 0));
}

#[test]
fn test_numpad_digits_type_with_numlock() {
    let mut app = test_app("", 0, 0);
    press(&mut app, "numlock+num7 numlock+num1 numlock+numdot");
    assert_eq!(app_lines(&app), vec!["71."]);
}

#[test]
fn test_numpad_arrows_and_numenter() {
    let mut app = test_app("ab\ncd", 0, 0);
    press(&mut app, "num2 num6 numenter");
    assert_eq!(app_lines(&app), vec!["ab", "c", "d"]);
}

#[test]
fn test_shift_home_selects_to_line_start() {
    let mut app = test_app("say hello", 0, 9);
    press(&mut app, "ctrl+shift+left ctrl+x");
    assert_eq!(app_lines(&app), vec!["say "]);
    press(&mut app, "shift+home ctrl+x");
    assert_eq!(app_lines(&app), vec![""]);
}

#[test]
fn test_user_keymap_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keymap.yaml");
    std::fs::write(
        &path,
        "bindings:\n  - key: \"ctrl+e\"\n    command: MoveCursorLineEnd\n  - key: \"end\"\n    command: Unbound\n",
    )
    .unwrap();

    let user = load_keymap_file(&path).unwrap();
    let mut app = test_app("abc", 0, 0);
    app.keymap = Keymap::with_bindings(merge_bindings(default_bindings(), user));

    press(&mut app, "end");
    assert_eq!(app_cursor(&app), (0, 0));
    press(&mut app, "ctrl+e");
    assert_eq!(app_cursor(&app), (0, 3));
}
