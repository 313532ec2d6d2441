//! Tests for question parsing and the quiz deck.

use crate::csv::{parse_line, parse_questions, split_fields};
use crate::deck::{QuizDeck, QuizError};

const SAMPLE: &str = r#"question,A,B,C,D,correct,tag
# range estimation
"Max range of the tube?","20 m","40 m","60 m","80 m",B,range
// comment row
"Which round slows infantry?",HE,"HE+",Smoke,None,c
"He said ""fire""; what next?",Wait,Load,Duck,Run,x,drill

too,few,fields
"#;

#[test]
fn test_parse_skips_header_comments_and_short_rows() {
    let questions = parse_questions(SAMPLE);
    assert_eq!(questions.len(), 3);
    assert_eq!(questions[0].prompt, "Max range of the tube?");
    assert_eq!(questions[0].options[1], "40 m");
    assert_eq!(questions[0].correct, 'B');
    assert_eq!(questions[0].tag.as_deref(), Some("range"));
}

#[test]
fn test_parse_lowercase_and_invalid_letters() {
    let questions = parse_questions(SAMPLE);
    assert_eq!(questions[1].correct, 'C');
    assert_eq!(questions[1].tag, None);
    // 'x' is not A-D, so it falls back to A.
    assert_eq!(questions[2].correct, 'A');
}

#[test]
fn test_escaped_quotes_inside_field() {
    let questions = parse_questions(SAMPLE);
    assert_eq!(questions[2].prompt, "He said \"fire\"; what next?");
}

#[test]
fn test_split_keeps_commas_inside_quotes() {
    let fields = split_fields(r#""a, b", c ,"d""e""#);
    assert_eq!(fields, vec!["a, b", "c", "d\"e"]);
}

#[test]
fn test_parse_line_ignores_blank() {
    assert!(parse_line("   ", 1).is_none());
    assert!(parse_line("QUESTION,a,b,c,d,A", 1).is_none());
}

#[test]
fn test_deck_cycles() {
    let mut deck = QuizDeck::from_csv(SAMPLE);
    assert!(deck.current().is_none());

    let first = deck.next_question().unwrap().prompt.clone();
    deck.next_question().unwrap();
    deck.next_question().unwrap();
    let wrapped = deck.next_question().unwrap().prompt.clone();
    assert_eq!(first, wrapped, "deck should wrap to the first question");
}

#[test]
fn test_submit_answer() {
    let mut deck = QuizDeck::from_csv(SAMPLE);
    assert_eq!(deck.submit_answer('B'), Err(QuizError::NoActiveQuestion));

    deck.next_question().unwrap();
    assert_eq!(deck.submit_answer('b'), Ok(true));
    assert_eq!(deck.submit_answer('A'), Ok(false));
    assert_eq!(deck.submit_answer('z'), Err(QuizError::InvalidChoice('Z')));
}

#[test]
fn test_empty_deck() {
    let mut deck = QuizDeck::default();
    assert!(deck.is_empty());
    assert_eq!(deck.next_question().unwrap_err(), QuizError::EmptyDeck);
}
