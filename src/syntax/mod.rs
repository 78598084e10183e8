//! Lexical tokenization
//!
//! This module provides the token model and everything that produces it:
//! - Grammars and the rule-based tokenizer
//! - Built-in grammars for common languages
//! - Name, alias and extension resolution
//! - The `Tokenizer` seam used by the decoration engine

mod builtin;
mod grammar;
mod registry;
mod rules;
mod tokenizer;
mod tokens;

pub use grammar::Grammar;
pub use registry::GrammarRegistry;
pub use rules::{PatternRule, TOKEN_GROUP};
pub use tokenizer::Tokenizer;
pub use tokens::{parse_tokens, tokens_text, Content, Token, TypedToken};
