use super::*;

#[test]
fn parses_cards_in_order() {
    let cards = parse_deck_text("7*7|49\n3+3|6").expect("cards");
    assert_eq!(cards, vec![Card::new("7*7", "49"), Card::new("3+3", "6")]);
}

#[test]
fn tolerates_one_trailing_newline_and_crlf() {
    let cards = parse_deck_text("hola|hello\r\nadios|bye\r\n").expect("cards");
    assert_eq!(
        cards,
        vec![Card::new("hola", "hello"), Card::new("adios", "bye")]
    );
}

#[test]
fn empty_input_has_no_cards() {
    assert_eq!(parse_deck_text(""), Err(AuthoringError::NoCards));
    assert_eq!(parse_deck_text("\n"), Err(AuthoringError::NoCards));
}

#[test]
fn blank_lines_are_rejected() {
    assert_eq!(parse_deck_text("a|b\n\nc|d"), Err(AuthoringError::BlankLine));
    assert_eq!(parse_deck_text("a|b\n\n"), Err(AuthoringError::BlankLine));
}

#[test]
fn separator_count_must_be_exactly_one() {
    let err = parse_deck_text("no separator").expect_err("format");
    assert_eq!(
        err.to_string(),
        "Wrong format for \"no separator\" question & answer pair"
    );
    assert_eq!(
        parse_deck_text("a|b|c"),
        Err(AuthoringError::WrongFormat("a|b|c".into()))
    );
}

#[test]
fn both_sides_need_text() {
    let err = parse_deck_text("|49").expect_err("blank front");
    assert_eq!(
        err.to_string(),
        "Blank question or answer in \"|49\" question & answer pair"
    );
    assert_eq!(
        parse_deck_text("7*7|"),
        Err(AuthoringError::BlankSide("7*7|".into()))
    );
}

#[test]
fn deck_name_must_not_be_empty() {
    assert_eq!(validate_deck_name(""), Err(AuthoringError::EmptyName));
    assert!(validate_deck_name("Math").is_ok());
}
