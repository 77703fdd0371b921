use super::*;

fn field_with_text(text: &str) -> FieldEditor {
    let mut field = FieldEditor::new();
    field.insert_at_caret(text);
    field
}

#[test]
fn new_field_is_empty_with_collapsed_caret() {
    let field = FieldEditor::new();
    assert_eq!(field.text(), "");
    assert_eq!(field.caret(), Some(CaretSpan::collapsed(0)));
    assert!(!field.show_slash());
}

#[test]
fn insert_at_collapsed_caret_splices_and_advances() {
    let mut field = field_with_text("Hello ");
    assert_eq!(field.caret(), Some(CaretSpan::collapsed(6)));

    field.insert_at_caret("Opt2");
    assert_eq!(field.text(), "Hello Opt2");
    assert_eq!(field.caret(), Some(CaretSpan::collapsed(10)));
}

#[test]
fn insert_at_caret_replaces_selection_span() {
    let mut field = field_with_text("Hello world");
    field.set_caret(Some(CaretSpan { start: 6, end: 11 }));

    field.insert_at_caret("there");
    assert_eq!(field.text(), "Hello there");
    assert_eq!(field.caret(), Some(CaretSpan::collapsed(11)));
}

#[test]
fn insert_at_caret_in_the_middle() {
    let mut field = field_with_text("ad");
    field.set_caret(Some(CaretSpan::collapsed(1)));

    field.insert_at_caret("bc");
    assert_eq!(field.text(), "abcd");
    assert_eq!(field.caret(), Some(CaretSpan::collapsed(3)));
}

#[test]
fn insert_without_caret_is_a_no_op() {
    let mut field = FieldEditor::new();
    field.set_caret(None);

    assert!(!field.insert_at_caret("Opt1"));
    assert_eq!(field.text(), "");
    assert_eq!(field.caret(), None);
}

#[test]
fn insert_at_caret_clears_trailing_slash() {
    let mut field = field_with_text("Hello ");
    field.set_show_slash(true);

    field.insert_at_caret("Opt1");
    assert!(!field.show_slash());
    assert_eq!(field.display_text(), "Hello Opt1");
}

#[test]
fn insert_without_caret_keeps_trailing_slash() {
    let mut field = FieldEditor::new();
    field.set_caret(None);
    field.set_show_slash(true);

    field.insert_at_caret("Opt1");
    assert!(field.show_slash());
}

#[test]
fn display_text_overlays_trigger_without_committing() {
    let mut field = field_with_text("note");
    assert_eq!(field.display_text(), "note");

    field.set_show_slash(true);
    assert_eq!(field.display_text(), "note/");
    assert_eq!(field.text(), "note");
}

#[test]
fn splice_is_character_based_not_byte_based() {
    let mut field = field_with_text("héllo");
    field.set_caret(Some(CaretSpan { start: 1, end: 2 }));

    field.insert_at_caret("e");
    assert_eq!(field.text(), "hello");
    assert_eq!(field.caret(), Some(CaretSpan::collapsed(2)));
}

#[test]
fn set_caret_clamps_to_text_length() {
    let mut field = field_with_text("ab");
    field.set_caret(Some(CaretSpan { start: 5, end: 9 }));
    assert_eq!(field.caret(), Some(CaretSpan { start: 2, end: 2 }));

    field.set_caret(Some(CaretSpan { start: 1, end: 9 }));
    assert_eq!(field.caret(), Some(CaretSpan { start: 1, end: 2 }));
}

#[test]
fn insert_char_keeps_trailing_slash_visible() {
    let mut field = field_with_text("a");
    field.set_show_slash(true);

    field.insert_char('b');
    assert_eq!(field.text(), "ab");
    assert!(field.show_slash());
}

#[test]
fn backspace_removes_char_before_caret() {
    let mut field = field_with_text("abc");

    assert!(field.backspace());
    assert_eq!(field.text(), "ab");
    assert_eq!(field.caret(), Some(CaretSpan::collapsed(2)));
}

#[test]
fn backspace_at_start_does_nothing() {
    let mut field = field_with_text("abc");
    field.caret_to(0);

    assert!(!field.backspace());
    assert_eq!(field.text(), "abc");
}

#[test]
fn backspace_collapses_selection() {
    let mut field = field_with_text("abcd");
    field.set_caret(Some(CaretSpan { start: 1, end: 3 }));

    assert!(field.backspace());
    assert_eq!(field.text(), "ad");
    assert_eq!(field.caret(), Some(CaretSpan::collapsed(1)));
}

#[test]
fn delete_removes_char_after_caret() {
    let mut field = field_with_text("abc");
    field.caret_to(1);

    assert!(field.delete());
    assert_eq!(field.text(), "ac");
    assert_eq!(field.caret(), Some(CaretSpan::collapsed(1)));
}

#[test]
fn delete_at_end_does_nothing() {
    let mut field = field_with_text("abc");

    assert!(!field.delete());
    assert_eq!(field.text(), "abc");
}

#[test]
fn caret_moves_clamp_at_buffer_edges() {
    let mut field = field_with_text("ab");
    field.caret_to(0);

    assert!(!field.move_left());
    assert!(field.move_right());
    assert!(field.move_right());
    assert!(!field.move_right());
    assert_eq!(field.caret(), Some(CaretSpan::collapsed(2)));
}

#[test]
fn horizontal_moves_collapse_selection_to_its_edges() {
    let mut field = field_with_text("abcd");
    field.set_caret(Some(CaretSpan { start: 1, end: 3 }));
    field.move_left();
    assert_eq!(field.caret(), Some(CaretSpan::collapsed(1)));

    field.set_caret(Some(CaretSpan { start: 1, end: 3 }));
    field.move_right();
    assert_eq!(field.caret(), Some(CaretSpan::collapsed(3)));
}

#[test]
fn line_start_and_end_respect_newlines() {
    let mut field = field_with_text("one\ntwo\nthree");
    field.caret_to(5);

    field.move_line_start();
    assert_eq!(field.caret(), Some(CaretSpan::collapsed(4)));

    field.move_line_end();
    assert_eq!(field.caret(), Some(CaretSpan::collapsed(7)));
}

#[test]
fn char_to_byte_idx_handles_multibyte_text() {
    assert_eq!(char_to_byte_idx("héllo", 0), 0);
    assert_eq!(char_to_byte_idx("héllo", 1), 1);
    assert_eq!(char_to_byte_idx("héllo", 2), 3);
    assert_eq!(char_to_byte_idx("héllo", 5), 6);
    assert_eq!(char_to_byte_idx("héllo", 9), 6);
}
