//! Document representation - blocks of text fragments
//!
//! A `Block` is a logical unit of source code made of one or more
//! `Fragment`s (usually lines). Its full text is the fragments' text joined
//! with `\n`. Every mutation draws a fresh revision from a process-wide
//! counter, so a block key plus revision identifies one exact state of its
//! text, even across clones that are edited independently.

use std::collections::HashMap;
use std::fmt;
use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::decorate::{AnnotationBuffer, Mark, DEFAULT_CODE_BLOCK};
use crate::error::{DecorError, Result};

/// Separator inserted between fragments in a block's full text
pub const SEPARATOR: char = '\n';

static NEXT_KEY: AtomicU64 = AtomicU64::new(1);

fn next_key() -> u64 {
    NEXT_KEY.fetch_add(1, Ordering::Relaxed)
}

/// Process-unique block identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockKey(u64);

/// Process-unique fragment identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FragmentKey(u64);

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block-{}", self.0)
    }
}

impl fmt::Display for FragmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fragment-{}", self.0)
    }
}

/// A contiguous span of text rendered as one unit (e.g. a line)
#[derive(Debug, Clone)]
pub struct Fragment {
    key: FragmentKey,
    /// Text content (never contains the separator)
    text: String,
    /// Marks owned by other concerns (bold, comments, ...)
    marks: Vec<(Range<usize>, Mark)>,
}

impl Fragment {
    /// Create a fragment
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        check_text(&text)?;
        Ok(Self {
            key: FragmentKey(next_key()),
            text,
            marks: Vec::new(),
        })
    }

    /// Get the fragment key
    pub fn key(&self) -> FragmentKey {
        self.key
    }

    /// Get the text content
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Check if the fragment is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Attach a mark to a character range
    pub fn add_mark(&mut self, range: Range<usize>, mark: Mark) {
        let end = range.end.min(self.char_len());
        self.marks.push((range.start.min(end)..end, mark));
    }

    /// Characters with their marks, before any syntax decoration
    pub fn characters(&self) -> AnnotationBuffer {
        let mut buffer = AnnotationBuffer::from_text(&self.text);
        for (range, mark) in &self.marks {
            buffer.write(range.clone(), mark);
        }
        buffer
    }
}

fn check_text(text: &str) -> Result<()> {
    if text.contains(SEPARATOR) {
        return Err(DecorError::LineBreakInFragment);
    }
    Ok(())
}

/// A logical block of fragments sharing one tokenization context
#[derive(Debug, Clone)]
pub struct Block {
    key: BlockKey,
    /// Block type (e.g. "code_block", "paragraph")
    kind: String,
    /// Block attributes (e.g. "syntax" -> "javascript")
    data: HashMap<String, String>,
    /// Fragments in order
    fragments: Vec<Fragment>,
    /// Replaced with a process-unique value on every mutation
    revision: u64,
}

impl Block {
    /// Create a new empty block
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            key: BlockKey(next_key()),
            kind: kind.into(),
            data: HashMap::new(),
            fragments: Vec::new(),
            revision: next_key(),
        }
    }

    /// Create a block with one fragment per line of `source`
    ///
    /// Lines end at `\n`; a `\r` right before it is dropped. A trailing
    /// newline gives a trailing empty fragment, so `full_text()` gives the
    /// source back with CRLF endings normalized.
    pub fn from_lines(kind: impl Into<String>, source: &str) -> Self {
        let mut block = Self::new(kind);
        for line in source.split(SEPARATOR) {
            block.fragments.push(Fragment {
                key: FragmentKey(next_key()),
                text: line.strip_suffix('\r').unwrap_or(line).to_string(),
                marks: Vec::new(),
            });
        }
        block
    }

    /// Create a code block in the given syntax
    pub fn code(syntax: &str, source: &str) -> Self {
        Self::from_lines(DEFAULT_CODE_BLOCK, source).with_data("syntax", syntax)
    }

    /// Builder: set a data attribute
    pub fn with_data(mut self, key: &str, value: &str) -> Self {
        self.data.insert(key.to_string(), value.to_string());
        self
    }

    /// Get the block key
    pub fn key(&self) -> BlockKey {
        self.key
    }

    /// Get the block type
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Get a data attribute
    pub fn data(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(|s| s.as_str())
    }

    /// Set a data attribute
    pub fn set_data(&mut self, key: &str, value: &str) {
        self.data.insert(key.to_string(), value.to_string());
        self.revision = next_key();
    }

    /// Current revision
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Get all fragments
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Get a fragment by key
    pub fn fragment(&self, key: FragmentKey) -> Option<&Fragment> {
        self.fragments.iter().find(|f| f.key == key)
    }

    /// Position of a fragment within the block
    pub fn fragment_index(&self, key: FragmentKey) -> Option<usize> {
        self.fragments.iter().position(|f| f.key == key)
    }

    /// Character offset of a fragment within the full text
    ///
    /// Counts the lengths of preceding fragments plus one separator each.
    pub fn fragment_offset(&self, key: FragmentKey) -> Option<usize> {
        let index = self.fragment_index(key)?;
        let preceding: usize = self.fragments[..index].iter().map(Fragment::char_len).sum();
        Some(preceding + index)
    }

    /// Fragments' text joined by the separator
    pub fn full_text(&self) -> String {
        let mut text = String::new();
        for (i, fragment) in self.fragments.iter().enumerate() {
            if i > 0 {
                text.push(SEPARATOR);
            }
            text.push_str(&fragment.text);
        }
        text
    }

    /// Total fragment characters, separators excluded
    pub fn content_len(&self) -> usize {
        self.fragments.iter().map(Fragment::char_len).sum()
    }

    /// Append a fragment, returning its key
    pub fn push_fragment(&mut self, text: &str) -> Result<FragmentKey> {
        let fragment = Fragment::new(text)?;
        let key = fragment.key;
        self.fragments.push(fragment);
        self.revision = next_key();
        Ok(key)
    }

    /// Insert a fragment at a position, returning its key
    pub fn insert_fragment(&mut self, index: usize, text: &str) -> Result<FragmentKey> {
        let fragment = Fragment::new(text)?;
        let key = fragment.key;
        self.fragments.insert(index.min(self.fragments.len()), fragment);
        self.revision = next_key();
        Ok(key)
    }

    /// Remove a fragment
    pub fn remove_fragment(&mut self, key: FragmentKey) -> Option<Fragment> {
        let index = self.fragment_index(key)?;
        self.revision = next_key();
        Some(self.fragments.remove(index))
    }

    /// Replace a fragment's text
    ///
    /// Marks from other concerns are dropped along with the old text.
    pub fn set_fragment_text(&mut self, key: FragmentKey, text: &str) -> Result<()> {
        check_text(text)?;
        let block = self.key;
        let fragment = self
            .fragments
            .iter_mut()
            .find(|f| f.key == key)
            .ok_or(DecorError::FragmentNotInBlock { fragment: key, block })?;
        fragment.text = text.to_string();
        fragment.marks.clear();
        self.revision = next_key();
        Ok(())
    }
}

/// An ordered collection of blocks
#[derive(Debug, Clone, Default)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block, returning its key
    pub fn push(&mut self, block: Block) -> BlockKey {
        let key = block.key;
        self.blocks.push(block);
        key
    }

    /// Get all blocks
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Get a block by key
    pub fn block(&self, key: BlockKey) -> Option<&Block> {
        self.blocks.iter().find(|b| b.key == key)
    }

    /// Get mutable access to a block
    pub fn block_mut(&mut self, key: BlockKey) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| b.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_block_lines() {
        let block = Block::code("javascript", "// Some javascript\nvar msg = 'Hello world';");
        assert_eq!(block.kind(), "code_block");
        assert_eq!(block.data("syntax"), Some("javascript"));
        assert_eq!(block.fragments().len(), 2);
        assert_eq!(block.fragments()[1].text(), "var msg = 'Hello world';");
        assert_eq!(block.full_text(), "// Some javascript\nvar msg = 'Hello world';");
    }

    #[test]
    fn test_from_lines_keeps_trailing_newline() {
        let block = Block::from_lines("snippet", "a\r\nb\r\n");
        assert_eq!(block.kind(), "snippet");
        assert_eq!(block.data("syntax"), None);
        assert_eq!(block.fragments().len(), 3);
        assert_eq!(block.full_text(), "a\nb\n");

        let block = Block::from_lines("snippet", "a\n");
        assert_eq!(block.full_text(), "a\n");
    }

    #[test]
    fn test_from_lines_keeps_stray_carriage_return() {
        let block = Block::from_lines("snippet", "a\rb\nc");
        assert_eq!(block.fragments()[0].text(), "a\rb");
        assert_eq!(block.content_len(), 4);
    }

    #[test]
    fn test_divergent_clones_get_distinct_revisions() {
        let original = Block::code("javascript", "x");
        let key = original.fragments()[0].key();
        let mut a = original.clone();
        let mut b = original.clone();
        a.set_fragment_text(key, "var a = 1").unwrap();
        b.set_fragment_text(key, "'hello'").unwrap();

        assert_eq!(a.key(), b.key());
        assert_ne!(a.revision(), b.revision());
        assert_eq!(original.revision(), original.clone().revision());
    }

    #[test]
    fn test_code_block_empty_source() {
        let block = Block::code("c", "");
        assert_eq!(block.fragments().len(), 1);
        assert!(block.fragments()[0].is_empty());
    }

    #[test]
    fn test_fragment_offset() {
        let block = Block::code("javascript", "var x\n= 1;\n\nend");
        let keys: Vec<_> = block.fragments().iter().map(Fragment::key).collect();
        assert_eq!(block.fragment_offset(keys[0]), Some(0));
        assert_eq!(block.fragment_offset(keys[1]), Some(6));
        assert_eq!(block.fragment_offset(keys[2]), Some(11));
        assert_eq!(block.fragment_offset(keys[3]), Some(12));
        assert_eq!(block.content_len(), 5 + 4 + 0 + 3);
    }

    #[test]
    fn test_offset_counts_chars() {
        let block = Block::code("python", "é = 1\nx");
        let second = block.fragments()[1].key();
        assert_eq!(block.fragment_offset(second), Some(6));
    }

    #[test]
    fn test_mutations_bump_revision() {
        let mut block = Block::new("code_block");
        let r0 = block.revision();
        let key = block.push_fragment("a").unwrap();
        assert!(block.revision() > r0);

        let r1 = block.revision();
        block.set_fragment_text(key, "b").unwrap();
        assert!(block.revision() > r1);
        assert_eq!(block.fragment(key).map(Fragment::text), Some("b"));

        let r2 = block.revision();
        block.insert_fragment(0, "first").unwrap();
        assert!(block.revision() > r2);
        assert_eq!(block.fragment_index(key), Some(1));

        let r3 = block.revision();
        assert!(block.remove_fragment(key).is_some());
        assert!(block.revision() > r3);
        assert!(block.remove_fragment(key).is_none());
    }

    #[test]
    fn test_rejects_line_breaks() {
        let mut block = Block::new("code_block");
        assert!(matches!(
            block.push_fragment("a\nb"),
            Err(DecorError::LineBreakInFragment)
        ));
        let key = block.push_fragment("a").unwrap();
        assert!(block.set_fragment_text(key, "x\n").is_err());
        assert_eq!(block.fragment(key).map(Fragment::text), Some("a"));
    }

    #[test]
    fn test_set_text_unknown_fragment() {
        let mut block = Block::new("code_block");
        let other = Fragment::new("x").unwrap();
        assert!(matches!(
            block.set_fragment_text(other.key(), "y"),
            Err(DecorError::FragmentNotInBlock { .. })
        ));
    }

    #[test]
    fn test_characters_carry_existing_marks() {
        let mut fragment = Fragment::new("bold text").unwrap();
        fragment.add_mark(0..4, Mark::new("bold", "bold"));
        let chars = fragment.characters();
        assert_eq!(chars.len(), 9);
        assert!(chars.get(0).unwrap().marks.contains(&Mark::new("bold", "bold")));
        assert!(chars.get(4).unwrap().marks.is_empty());
    }

    #[test]
    fn test_document_lookup() {
        let mut doc = Document::new();
        let key = doc.push(Block::code("rust", "fn main() {}"));
        doc.push(Block::new("paragraph"));
        assert_eq!(doc.blocks().len(), 2);
        assert_eq!(doc.block(key).map(Block::kind), Some("code_block"));
        doc.block_mut(key).unwrap().set_data("syntax", "c");
        assert_eq!(doc.block(key).and_then(|b| b.data("syntax")), Some("c"));
    }
}
