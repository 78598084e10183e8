//! Tokenizer adapter
//!
//! The single seam through which the decoration engine reaches a lexical
//! tokenizer. Anything that can turn `(text, grammar name)` into a token
//! sequence can be plugged in, including closures wrapping an external
//! tokenizer.

use tracing::debug;

use super::registry::GrammarRegistry;
use super::tokens::Token;

/// A pure function from text and grammar name to tokens
pub trait Tokenizer {
    /// Tokenize `text` with the named grammar
    ///
    /// Returns `None` when the grammar is not known. Callers treat that as
    /// "no annotations", never as an error.
    fn tokenize(&self, text: &str, grammar: &str) -> Option<Vec<Token>>;
}

impl Tokenizer for GrammarRegistry {
    fn tokenize(&self, text: &str, grammar: &str) -> Option<Vec<Token>> {
        match self.get(grammar) {
            Some(resolved) => Some(resolved.tokenize(text)),
            None => {
                debug!(grammar, "unsupported grammar");
                None
            }
        }
    }
}

impl<F> Tokenizer for F
where
    F: Fn(&str, &str) -> Option<Vec<Token>>,
{
    fn tokenize(&self, text: &str, grammar: &str) -> Option<Vec<Token>> {
        self(text, grammar)
    }
}
