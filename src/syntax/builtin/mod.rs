//! Built-in grammars
//!
//! This module provides tokenization grammars for common
//! programming languages.

mod c;
mod javascript;
mod markup;
mod python;
mod rust;
mod toml_lang;

use super::grammar::Grammar;

/// Get all built-in grammars
pub fn all_grammars() -> Vec<Grammar> {
    vec![
        javascript::javascript_grammar(),
        markup::markup_grammar(),
        rust::rust_grammar(),
        python::python_grammar(),
        c::c_grammar(),
        toml_lang::toml_grammar(),
    ]
}
