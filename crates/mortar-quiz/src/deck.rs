//! Cyclic question deck.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::csv::parse_questions;

/// A four-option multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub prompt: String,
    /// Options A through D.
    pub options: [String; 4],
    /// Correct letter, always one of 'A'..='D'.
    pub correct: char,
    pub tag: Option<String>,
}

/// Errors from driving the deck.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    /// The deck holds no questions.
    #[error("quiz deck is empty")]
    EmptyDeck,

    /// An answer was submitted before any question was drawn.
    #[error("no active question to answer")]
    NoActiveQuestion,

    /// The answer is not a letter A-D.
    #[error("invalid answer choice {0:?}")]
    InvalidChoice(char),
}

/// Questions served in order, wrapping back to the first after the last.
#[derive(Debug, Clone, Default)]
pub struct QuizDeck {
    questions: Vec<QuizQuestion>,
    current: Option<usize>,
}

impl QuizDeck {
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        Self {
            questions,
            current: None,
        }
    }

    /// Build a deck from question-file text.
    pub fn from_csv(text: &str) -> Self {
        Self::new(parse_questions(text))
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// The question most recently drawn, if any.
    pub fn current(&self) -> Option<&QuizQuestion> {
        self.current.and_then(|idx| self.questions.get(idx))
    }

    /// Draw the next question, cycling past the end.
    pub fn next_question(&mut self) -> Result<&QuizQuestion, QuizError> {
        if self.questions.is_empty() {
            return Err(QuizError::EmptyDeck);
        }
        let next = match self.current {
            Some(idx) => (idx + 1) % self.questions.len(),
            None => 0,
        };
        self.current = Some(next);
        Ok(&self.questions[next])
    }

    /// Check an answer letter against the current question (case-insensitive).
    pub fn submit_answer(&self, choice: char) -> Result<bool, QuizError> {
        let choice = choice.to_ascii_uppercase();
        if !('A'..='D').contains(&choice) {
            return Err(QuizError::InvalidChoice(choice));
        }
        let question = self.current().ok_or(QuizError::NoActiveQuestion)?;
        Ok(question.correct == choice)
    }
}
