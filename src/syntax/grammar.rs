//! Grammars and the built-in tokenizer
//!
//! A grammar is an ordered list of rules. Tokenization starts from the
//! whole string as a single text piece; each rule in turn carves tokens out
//! of the pieces that are still plain text. Earlier rules therefore win,
//! except that a greedy rule may swallow tokens claimed earlier when its
//! match starts inside plain text (a string literal containing `//` beats
//! the comment rule that ran before it).

use std::ops::Range;

use tracing::warn;

use super::rules::{PatternRule, Rule};
use super::tokens::Token;

/// A named set of lexical rules for one language
#[derive(Debug)]
pub struct Grammar {
    /// Grammar name (e.g. "javascript")
    pub name: String,
    /// Alternative names (e.g. ["js"])
    pub aliases: Vec<String>,
    /// File extensions (e.g. ["js", "mjs"])
    pub extensions: Vec<String>,
    /// Rules in application order
    rules: Vec<Rule>,
}

/// A span of the tokenized string: still text, or already a token
enum Piece {
    Text(Range<usize>),
    Token(Range<usize>, Token),
}

impl Piece {
    fn range(&self) -> &Range<usize> {
        match self {
            Piece::Text(range) | Piece::Token(range, _) => range,
        }
    }
}

impl Grammar {
    /// Create a new empty grammar
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            aliases: Vec::new(),
            extensions: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Add an alternative name
    pub fn add_alias(&mut self, alias: &str) -> &mut Self {
        self.aliases.push(alias.to_string());
        self
    }

    /// Add a file extension
    pub fn add_extension(&mut self, ext: &str) -> &mut Self {
        self.extensions.push(ext.to_string());
        self
    }

    /// Add a rule for a category
    ///
    /// A pattern that fails to compile is logged and skipped.
    pub fn add(&mut self, category: &str, rule: PatternRule) -> &mut Self {
        match rule.compile(category) {
            Ok(rule) => self.rules.push(rule),
            Err(e) => warn!(grammar = %self.name, category, error = %e, "skipping invalid pattern"),
        }
        self
    }

    /// Number of compiled rules
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Tokenize text
    ///
    /// The returned tokens partition `text` exactly.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        if text.is_empty() {
            return Vec::new();
        }

        let mut pieces = vec![Piece::Text(0..text.len())];
        for rule in &self.rules {
            if rule.greedy {
                match_greedy(rule, text, &mut pieces);
            } else {
                match_isolated(rule, text, &mut pieces);
            }
        }

        pieces
            .into_iter()
            .map(|piece| match piece {
                Piece::Text(range) => Token::Literal(text[range].to_string()),
                Piece::Token(_, token) => token,
            })
            .collect()
    }
}

/// Match a rule inside each text piece on its own
fn match_isolated(rule: &Rule, text: &str, pieces: &mut Vec<Piece>) {
    let mut i = 0;
    while i < pieces.len() {
        let range = match &pieces[i] {
            Piece::Text(range) => range.clone(),
            Piece::Token(..) => {
                i += 1;
                continue;
            }
        };

        let Some(found) = rule.find_at(&text[range.clone()], 0) else {
            i += 1;
            continue;
        };
        let token_range = range.start + found.start..range.start + found.end;
        i += splice_token(rule, text, pieces, i..i + 1, token_range, range.end);
    }
}

/// Match a rule against the whole string from each text piece onwards
fn match_greedy(rule: &Rule, text: &str, pieces: &mut Vec<Piece>) {
    let mut i = 0;
    while i < pieces.len() {
        let range = match &pieces[i] {
            Piece::Text(range) => range.clone(),
            Piece::Token(..) => {
                i += 1;
                continue;
            }
        };

        let Some(found) = rule.find_at(text, range.start) else {
            // Nothing further along the string can match either
            break;
        };
        if found.start >= range.end {
            i += 1;
            continue;
        }

        let mut last = i;
        while pieces[last].range().end < found.end {
            last += 1;
        }
        let span_end = pieces[last].range().end;
        i += splice_token(rule, text, pieces, i..last + 1, found, span_end);
    }
}

/// Replace `replaced` pieces with before/token/after pieces
///
/// Returns the index offset of the first piece after the token.
fn splice_token(
    rule: &Rule,
    text: &str,
    pieces: &mut Vec<Piece>,
    replaced: Range<usize>,
    token_range: Range<usize>,
    span_end: usize,
) -> usize {
    let span_start = pieces[replaced.start].range().start;
    let has_before = span_start < token_range.start;
    let mut replacement = Vec::with_capacity(3);
    if has_before {
        replacement.push(Piece::Text(span_start..token_range.start));
    }
    let token = rule.token(&text[token_range.clone()]);
    let after_start = token_range.end;
    replacement.push(Piece::Token(token_range, token));
    if after_start < span_end {
        replacement.push(Piece::Text(after_start..span_end));
    }

    pieces.splice(replaced, replacement);
    usize::from(has_before) + 1
}
