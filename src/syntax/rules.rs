//! Pattern rules for tokenization
//!
//! A `PatternRule` describes how one lexical category is recognized: a
//! regex plus matching options. Rules are compiled into a `Rule` when they
//! are added to a grammar.

use std::ops::Range;
use std::sync::Arc;

use regex::Regex;

use super::grammar::Grammar;
use super::tokens::{Content, Token, TypedToken};

/// Name of the capture group that narrows a match to the token proper
pub const TOKEN_GROUP: &str = "token";

/// Uncompiled pattern rule
///
/// When the pattern defines a `token` capture group and that group takes
/// part in a match, only the group becomes the token. Text matched outside
/// the group is context and stays available to later rules.
#[derive(Clone)]
pub struct PatternRule {
    pattern: String,
    greedy: bool,
    alias: Option<String>,
    inside: Option<Arc<Grammar>>,
}

impl PatternRule {
    /// Create a rule from a regex source
    pub fn new(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            greedy: false,
            alias: None,
            inside: None,
        }
    }

    /// Builder: match against the whole string so the match may span
    /// pieces already claimed by earlier rules
    pub fn greedy(mut self) -> Self {
        self.greedy = true;
        self
    }

    /// Builder: set the alias folded into the lexical path
    pub fn alias(mut self, alias: &str) -> Self {
        self.alias = Some(alias.to_string());
        self
    }

    /// Builder: tokenize matched text with a nested grammar
    pub fn inside(mut self, grammar: Arc<Grammar>) -> Self {
        self.inside = Some(grammar);
        self
    }

    /// Compile this rule for a category
    pub fn compile(self, category: &str) -> Result<Rule, regex::Error> {
        Ok(Rule {
            category: category.to_string(),
            regex: Regex::new(&self.pattern)?,
            greedy: self.greedy,
            alias: self.alias,
            inside: self.inside,
        })
    }
}

/// A compiled rule, ready to match
pub struct Rule {
    /// Lexical category assigned to matches
    pub category: String,
    regex: Regex,
    /// Whether the rule matches across pieces
    pub greedy: bool,
    alias: Option<String>,
    inside: Option<Arc<Grammar>>,
}

impl Rule {
    /// Find the first non-empty token range at or after `start`
    ///
    /// Assertions such as `\b` and `(?m)^` see the text before `start`.
    /// Matches whose token is empty are stepped over, one character at a
    /// time, so they never hide a later non-empty match.
    pub fn find_at(&self, haystack: &str, start: usize) -> Option<Range<usize>> {
        let mut at = start;
        while at < haystack.len() {
            let caps = self.regex.captures_at(haystack, at)?;
            let whole = caps.get(0)?;
            let found = caps.name(TOKEN_GROUP).unwrap_or(whole);
            if !found.is_empty() {
                return Some(found.range());
            }
            let step = haystack[whole.start()..].chars().next()?.len_utf8();
            at = whole.start() + step;
        }
        None
    }

    /// Build the token for matched text
    pub fn token(&self, matched: &str) -> Token {
        let content = match &self.inside {
            Some(grammar) => Content::Nested(grammar.tokenize(matched)),
            None => Content::Text(matched.to_string()),
        };
        Token::Typed(TypedToken {
            category: self.category.clone(),
            alias: self.alias.clone(),
            content,
        })
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("category", &self.category)
            .field("pattern", &self.regex.as_str())
            .field("greedy", &self.greedy)
            .finish()
    }
}
