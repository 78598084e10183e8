//! Token tree flattening
//!
//! Walks a token tree depth-first, left to right, and yields one leaf
//! descriptor per text-carrying token: its absolute range in the tokenized
//! string and its lexical path. Leaves come out contiguous and in
//! increasing offset order, so a single running cursor tracks positions.

use super::annotation::Label;
use crate::document::SEPARATOR;
use crate::syntax::{Content, Token};

/// How leaf lengths are measured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Each fragment tokenized on its own; lengths are verbatim
    Plain,
    /// One tokenization per block over the joined text; separators are
    /// not counted, so offsets live in fragment-content space
    BlockJoin,
}

impl Mode {
    /// Characters a leaf consumes
    pub fn leaf_len(self, text: &str) -> usize {
        match self {
            Mode::Plain => text.chars().count(),
            Mode::BlockJoin => text.chars().filter(|&c| c != SEPARATOR).count(),
        }
    }
}

/// One leaf of the token tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    /// Start offset (inclusive)
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
    /// Lexical path; `None` for text outside any typed token
    pub label: Option<Label>,
}

struct Frame<'a> {
    tokens: std::slice::Iter<'a, Token>,
    label: Option<Label>,
}

/// Lazy pre-order iterator over the leaves of a token tree
pub struct Leaves<'a> {
    mode: Mode,
    cursor: usize,
    stack: Vec<Frame<'a>>,
}

/// Walk a token sequence
pub fn walk(tokens: &[Token], mode: Mode) -> Leaves<'_> {
    Leaves {
        mode,
        cursor: 0,
        stack: vec![Frame {
            tokens: tokens.iter(),
            label: None,
        }],
    }
}

impl Leaves<'_> {
    /// Characters consumed so far
    pub fn consumed(&self) -> usize {
        self.cursor
    }

    fn leaf(&mut self, text: &str, label: Option<Label>) -> Leaf {
        let start = self.cursor;
        self.cursor += self.mode.leaf_len(text);
        Leaf {
            start,
            end: self.cursor,
            label,
        }
    }
}

impl Iterator for Leaves<'_> {
    type Item = Leaf;

    fn next(&mut self) -> Option<Leaf> {
        loop {
            let frame = self.stack.last_mut()?;
            let Some(token) = frame.tokens.next() else {
                self.stack.pop();
                continue;
            };
            let parent = frame.label.clone();

            match token {
                // Plain text nested in a typed token inherits the path
                Token::Literal(text) => return Some(self.leaf(text, parent)),
                Token::Typed(typed) => {
                    let label = Label::extend(parent.as_ref(), &typed.category, typed.alias.as_deref());
                    match &typed.content {
                        Content::Text(text) => return Some(self.leaf(text, Some(label))),
                        Content::Nested(children) => self.stack.push(Frame {
                            tokens: children.iter(),
                            label: Some(label),
                        }),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(leaves: &[Leaf]) -> Vec<Option<&str>> {
        leaves
            .iter()
            .map(|l| l.label.as_ref().map(Label::as_str))
            .collect()
    }

    #[test]
    fn test_flat_sequence() {
        let tokens = vec![
            Token::typed("keyword", "var"),
            Token::literal(" msg = "),
            Token::typed("string", "'Hello world'"),
            Token::literal(";"),
        ];
        let leaves: Vec<_> = walk(&tokens, Mode::Plain).collect();
        let ranges: Vec<_> = leaves.iter().map(|l| (l.start, l.end)).collect();
        assert_eq!(ranges, vec![(0, 3), (3, 10), (10, 23), (23, 24)]);
        assert_eq!(labels(&leaves), vec![Some("keyword"), None, Some("string"), None]);
    }

    #[test]
    fn test_nested_paths() {
        let tokens = vec![Token::nested(
            "tag",
            vec![
                Token::nested("tag", vec![Token::typed("punctuation", "<"), Token::literal("b")]),
                Token::typed("punctuation", ">").with_alias("end"),
            ],
        )];
        let leaves: Vec<_> = walk(&tokens, Mode::Plain).collect();
        assert_eq!(
            labels(&leaves),
            vec![
                Some("tag tag punctuation"),
                Some("tag tag"),
                Some("tag punctuation end"),
            ]
        );
        assert_eq!(leaves[2].start, 2);
        assert_eq!(leaves[2].end, 3);
    }

    #[test]
    fn test_empty_nested_token() {
        let tokens = vec![
            Token::nested("empty", Vec::new()),
            Token::typed("keyword", "if"),
        ];
        let leaves: Vec<_> = walk(&tokens, Mode::Plain).collect();
        assert_eq!(leaves.len(), 1);
        assert_eq!((leaves[0].start, leaves[0].end), (0, 2));
    }

    #[test]
    fn test_block_join_skips_separators() {
        let tokens = vec![
            Token::typed("keyword", "var"),
            Token::literal(" x\n"),
            Token::typed("operator", "="),
        ];
        let leaves: Vec<_> = walk(&tokens, Mode::BlockJoin).collect();
        let ranges: Vec<_> = leaves.iter().map(|l| (l.start, l.end)).collect();
        assert_eq!(ranges, vec![(0, 3), (3, 5), (5, 6)]);

        let plain: Vec<_> = walk(&tokens, Mode::Plain).map(|l| l.end).collect();
        assert_eq!(plain, vec![3, 6, 7]);
    }

    #[test]
    fn test_consumed_matches_text_length() {
        let tokens = vec![
            Token::nested("a", vec![Token::literal("é"), Token::typed("b", "cd")]),
            Token::literal("\nxyz"),
        ];
        let mut leaves = walk(&tokens, Mode::Plain);
        leaves.by_ref().for_each(drop);
        assert_eq!(leaves.consumed(), 7);

        let mut joined = walk(&tokens, Mode::BlockJoin);
        joined.by_ref().for_each(drop);
        assert_eq!(joined.consumed(), 6);
    }

    #[test]
    fn test_leaves_are_contiguous() {
        let source = r#"<a href="x">link</a> &amp; <br/>"#;
        let tokens = crate::syntax::GrammarRegistry::new()
            .get("markup")
            .unwrap()
            .tokenize(source);
        let leaves: Vec<_> = walk(&tokens, Mode::Plain).collect();
        let mut cursor = 0;
        for leaf in &leaves {
            assert_eq!(leaf.start, cursor);
            cursor = leaf.end;
        }
        assert_eq!(cursor, source.chars().count());
    }
}
