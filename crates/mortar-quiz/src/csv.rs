//! Question parsing.
//!
//! One question per line: `question, A, B, C, D, correctLetter[, tag]`.
//! Fields may be wrapped in double quotes, with `""` for a literal quote.
//! Blank lines, `#` and `//` comment lines, and a `question` header row are ignored.

use tracing::warn;

use crate::deck::QuizQuestion;

/// Minimum number of fields in a question row.
const REQUIRED_FIELDS: usize = 6;

/// Parse a whole question file. Malformed rows are skipped with a warning.
pub fn parse_questions(text: &str) -> Vec<QuizQuestion> {
    text.lines()
        .enumerate()
        .filter_map(|(idx, line)| parse_line(line, idx + 1))
        .collect()
}

/// Parse a single row. Returns `None` for rows that carry no question.
pub fn parse_line(line: &str, line_number: usize) -> Option<QuizQuestion> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
        return None;
    }

    let mut fields = split_fields(trimmed);
    if fields
        .first()
        .is_some_and(|f| f.eq_ignore_ascii_case("question"))
    {
        return None;
    }

    if fields.len() < REQUIRED_FIELDS {
        warn!(
            line = line_number,
            fields = fields.len(),
            "skipping quiz row with too few fields"
        );
        return None;
    }

    let tag = if fields.len() > REQUIRED_FIELDS {
        Some(fields.swap_remove(REQUIRED_FIELDS)).filter(|t| !t.is_empty())
    } else {
        None
    };
    let correct = parse_correct_letter(&fields[5]);
    let mut fields = fields.into_iter();
    let prompt = fields.next().unwrap_or_default();
    let options = [
        fields.next().unwrap_or_default(),
        fields.next().unwrap_or_default(),
        fields.next().unwrap_or_default(),
        fields.next().unwrap_or_default(),
    ];

    Some(QuizQuestion {
        prompt,
        options,
        correct,
        tag,
    })
}

/// First letter of the field, uppercased. Anything outside A-D becomes 'A'.
fn parse_correct_letter(field: &str) -> char {
    match field.trim().chars().next().map(|c| c.to_ascii_uppercase()) {
        Some(c @ 'A'..='D') => c,
        _ => 'A',
    }
}

/// Split a row on commas outside double quotes.
pub fn split_fields(input: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(trim_field(&current));
                current.clear();
            }
            _ => current.push(c),
        }
    }
    fields.push(trim_field(&current));
    fields
}

fn trim_field(field: &str) -> String {
    let f = field.trim();
    if f.len() >= 2 && f.starts_with('"') && f.ends_with('"') {
        f[1..f.len() - 1].to_string()
    } else {
        f.to_string()
    }
}
