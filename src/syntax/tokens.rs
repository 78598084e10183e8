//! Token tree produced by a tokenizer
//!
//! A tokenization is an ordered sequence of tokens that partitions the
//! tokenized string exactly: concatenating every leaf substring, in order,
//! reproduces the input. Tokens are either unclassified text or a labeled
//! span whose content is raw text or a further sequence of tokens.
//!
//! The serde representation follows the JSON shape emitted by Prism-style
//! tokenizers, so an external tokenizer can hand its output over as JSON:
//!
//! ```text
//! ["var", " ", {"type": "keyword", "content": "x"}]
//! ```

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;

/// One unit of tokenizer output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Token {
    /// Ordinary text with no lexical category
    Literal(String),
    /// A span labeled with a lexical category
    Typed(TypedToken),
}

/// A categorized token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedToken {
    /// Lexical category (e.g. "keyword", "string")
    #[serde(rename = "type")]
    pub category: String,
    /// Secondary name folded into the lexical path after the category
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_alias"
    )]
    pub alias: Option<String>,
    /// Raw text or nested tokens
    pub content: Content,
}

/// Content of a typed token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    Nested(Vec<Token>),
}

impl Token {
    /// Create an unclassified token
    pub fn literal(text: impl Into<String>) -> Self {
        Token::Literal(text.into())
    }

    /// Create a typed token over raw text
    pub fn typed(category: impl Into<String>, text: impl Into<String>) -> Self {
        Token::Typed(TypedToken {
            category: category.into(),
            alias: None,
            content: Content::Text(text.into()),
        })
    }

    /// Create a typed token over a nested sequence
    pub fn nested(category: impl Into<String>, children: Vec<Token>) -> Self {
        Token::Typed(TypedToken {
            category: category.into(),
            alias: None,
            content: Content::Nested(children),
        })
    }

    /// Builder: set the alias of a typed token (no-op on literals)
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        if let Token::Typed(typed) = &mut self {
            typed.alias = Some(alias.into());
        }
        self
    }

    /// The substring this token covers
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        match self {
            Token::Literal(text) => out.push_str(text),
            Token::Typed(typed) => match &typed.content {
                Content::Text(text) => out.push_str(text),
                Content::Nested(children) => {
                    for child in children {
                        child.push_text(out);
                    }
                }
            },
        }
    }

    /// Length of the covered substring in characters
    pub fn char_len(&self) -> usize {
        match self {
            Token::Literal(text) => text.chars().count(),
            Token::Typed(typed) => match &typed.content {
                Content::Text(text) => text.chars().count(),
                Content::Nested(children) => children.iter().map(Token::char_len).sum(),
            },
        }
    }

    /// Category of a typed token
    pub fn category(&self) -> Option<&str> {
        match self {
            Token::Literal(_) => None,
            Token::Typed(typed) => Some(&typed.category),
        }
    }
}

/// Concatenate the text of a token sequence
pub fn tokens_text(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        token.push_text(&mut out);
    }
    out
}

/// Parse a token sequence from its JSON form
///
/// Content that is neither a string nor an array of tokens is rejected
/// rather than guessed at.
pub fn parse_tokens(json: &str) -> Result<Vec<Token>> {
    Ok(serde_json::from_str(json)?)
}

/// Aliases may arrive as a single name or a list of names
fn deserialize_alias<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Alias {
        One(String),
        Many(Vec<String>),
    }

    let alias = Option::<Alias>::deserialize(deserializer)?;
    Ok(alias
        .map(|alias| match alias {
            Alias::One(name) => name,
            Alias::Many(names) => names.join(" "),
        })
        .filter(|name| !name.is_empty()))
}
