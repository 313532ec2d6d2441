//! Quiz provider for the mortar simulation.
//!
//! Parses multiple-choice questions from comma-separated text and serves them
//! from a cyclic deck. Correct and incorrect answers feed the scoring economy
//! in `mortar-sim`.

pub mod csv;
pub mod deck;

pub use deck::{QuizDeck, QuizError, QuizQuestion};

#[cfg(test)]
mod tests;
