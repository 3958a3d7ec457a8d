//! Edit reconciliation scenarios
//!
//! Each case describes one keystroke as the input widget reports it: the
//! selection before the edit, the new plain text and the caret after it.

use mentions::mentions::{apply_change_to_value, get_plain_text, SelectionChange, Template};
use rstest::rstest;

const VALUE: &str = "Hi @[John](u1), how are you?";

fn template() -> Template {
    Template::parse("@[__display__](__id__)").unwrap()
}

#[rstest]
#[case::type_at_start("XHi John, how are you?", (0, 0, 1), "XHi @[John](u1), how are you?")]
#[case::type_before_mention("Hi dear John, how are you?", (3, 3, 8), "Hi dear @[John](u1), how are you?")]
#[case::type_after_mention("Hi John!, how are you?", (7, 7, 8), "Hi @[John](u1)!, how are you?")]
#[case::backspace_before_mention("HiJohn, how are you?", (3, 3, 2), "Hi@[John](u1), how are you?")]
#[case::backspace_at_mention_end("Hi Joh, how are you?", (7, 7, 6), "Hi , how are you?")]
#[case::delete_at_mention_start("Hi ohn, how are you?", (3, 3, 3), "Hi , how are you?")]
#[case::select_inside_mention("Hi Jn, how are you?", (4, 6, 4), "Hi , how are you?")]
#[case::type_inside_mention("Hi Joxhn, how are you?", (5, 5, 6), "Hi x, how are you?")]
#[case::replace_across_mention("Hi there, how are you?", (3, 7, 8), "Hi there, how are you?")]
#[case::retype_selected_mention("Hi John, how are you?", (3, 7, 7), "Hi John, how are you?")]
#[case::select_all_and_type("Yo", (0, 21, 2), "Yo")]
#[case::clear_everything("", (0, 21, 0), "")]
fn keystroke(
    #[case] new_plain_text: &str,
    #[case] selection: (usize, usize, usize),
    #[case] expected: &str,
) {
    let template = template();
    let (start_before, end_before, end_after) = selection;
    let result = apply_change_to_value(
        VALUE,
        &template,
        new_plain_text,
        SelectionChange::new(start_before, end_before, end_after),
    );
    assert_eq!(result, expected);
}

#[rstest]
#[case::paste_without_selection_info("Hi John, how are you? Fine.", 27, "Hi @[John](u1), how are you? Fine.")]
#[case::programmatic_truncate("Hi John, how", 12, "Hi @[John](u1), how")]
fn caret_only(#[case] new_plain_text: &str, #[case] end_after: usize, #[case] expected: &str) {
    let template = template();
    let result = apply_change_to_value(
        VALUE,
        &template,
        new_plain_text,
        SelectionChange::caret_after(end_after),
    );
    assert_eq!(result, expected);
}

#[test]
fn typed_text_survives_projection() {
    let template = template();
    let mut value = VALUE.to_string();
    let mut plain = get_plain_text(&value, &template);

    for ch in " Great!".chars() {
        let caret = plain.chars().count();
        plain.push(ch);
        value = apply_change_to_value(
            &value,
            &template,
            &plain,
            SelectionChange::new(caret, caret, caret + 1),
        );
        assert_eq!(get_plain_text(&value, &template), plain);
    }

    assert_eq!(value, "Hi @[John](u1), how are you? Great!");
}

#[test]
fn display_transform_is_respected() {
    let template = template().with_display_transform(|_, display, _| format!("@{display}"));
    let value = "Hi @[John](u1)";
    assert_eq!(get_plain_text(value, &template), "Hi @John");

    // Type after the five-char display "@John"
    let result = apply_change_to_value(value, &template, "Hi @John!", SelectionChange::new(8, 8, 9));
    assert_eq!(result, "Hi @[John](u1)!");

    // Backspace inside the transformed display removes the mention
    let result = apply_change_to_value(value, &template, "Hi @Joh", SelectionChange::new(8, 8, 7));
    assert_eq!(result, "Hi ");
}

#[test]
fn autocorrect_before_the_caret() {
    let template = template();
    let value = "@[Ann](1) i think teh";
    // typing "." triggers the widget to correct "teh" and "i"
    let result = apply_change_to_value(
        value,
        &template,
        "Ann I think the.",
        SelectionChange::new(15, 15, 16),
    );
    assert_eq!(result, "@[Ann](1) I think the.");
}
