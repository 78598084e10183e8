//! Per-character annotation buffer
//!
//! One entry per character of a fragment, each holding the set of marks
//! that apply to it. Writing only ever adds marks; marks placed by other
//! concerns survive decoration untouched.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::Range;

/// Mark kind of syntax-highlighting annotations
pub const TOKEN_MARK: &str = "syntax-token";

/// A style label attached to a character
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Mark {
    /// Concern owning the mark (e.g. "syntax-token", "bold")
    pub kind: String,
    /// Class name handed to the renderer
    pub class_name: String,
}

impl Mark {
    /// Create a mark
    pub fn new(kind: &str, class_name: &str) -> Self {
        Self {
            kind: kind.to_string(),
            class_name: class_name.to_string(),
        }
    }

    /// Create a syntax-token mark for a lexical path
    pub fn token(prefix: &str, label: &Label) -> Self {
        let class_name = if prefix.is_empty() {
            label.to_string()
        } else {
            format!("{} {}", prefix, label)
        };
        Self {
            kind: TOKEN_MARK.to_string(),
            class_name,
        }
    }

    /// Check if this is a syntax-token mark
    pub fn is_token(&self) -> bool {
        self.kind == TOKEN_MARK
    }
}

/// Lexical path from the root of a token tree to a leaf
///
/// Category and alias names, space-joined, ancestors first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label(String);

impl Label {
    /// Extend a parent path with a token's category and alias
    pub fn extend(parent: Option<&Label>, category: &str, alias: Option<&str>) -> Self {
        let mut path = parent.map(|p| p.0.clone()).unwrap_or_default();
        for name in std::iter::once(category).chain(alias) {
            if name.is_empty() {
                continue;
            }
            if !path.is_empty() {
                path.push(' ');
            }
            path.push_str(name);
        }
        Label(path)
    }

    /// The path as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A character and its marks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedChar {
    pub ch: char,
    pub marks: BTreeSet<Mark>,
}

/// A maximal run of consecutive characters sharing one mark set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run<'a> {
    /// Character range within the fragment
    pub range: Range<usize>,
    pub text: String,
    pub marks: &'a BTreeSet<Mark>,
}

impl Run<'_> {
    /// The syntax-token mark of this run, if any
    pub fn token_mark(&self) -> Option<&Mark> {
        self.marks.iter().find(|m| m.is_token())
    }
}

/// Mutable per-character annotation buffer for one fragment
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnnotationBuffer {
    chars: Vec<AnnotatedChar>,
}

impl AnnotationBuffer {
    /// Unannotated buffer for a text
    pub fn from_text(text: &str) -> Self {
        Self {
            chars: text
                .chars()
                .map(|ch| AnnotatedChar {
                    ch,
                    marks: BTreeSet::new(),
                })
                .collect(),
        }
    }

    /// Number of characters
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Get a character entry
    pub fn get(&self, index: usize) -> Option<&AnnotatedChar> {
        self.chars.get(index)
    }

    /// Iterate over character entries
    pub fn iter(&self) -> std::slice::Iter<'_, AnnotatedChar> {
        self.chars.iter()
    }

    /// The buffer's text
    pub fn text(&self) -> String {
        self.chars.iter().map(|c| c.ch).collect()
    }

    /// Add a mark to every character in `range`
    ///
    /// The range is clipped to the buffer.
    pub fn write(&mut self, range: Range<usize>, mark: &Mark) {
        let end = range.end.min(self.chars.len());
        let start = range.start.min(end);
        for entry in &mut self.chars[start..end] {
            if !entry.marks.contains(mark) {
                entry.marks.insert(mark.clone());
            }
        }
    }

    /// Class names of syntax-token marks per character
    pub fn token_classes(&self) -> Vec<Option<&str>> {
        self.chars
            .iter()
            .map(|c| {
                c.marks
                    .iter()
                    .find(|m| m.is_token())
                    .map(|m| m.class_name.as_str())
            })
            .collect()
    }

    /// Group characters into maximal runs of equal mark sets
    pub fn runs(&self) -> Vec<Run<'_>> {
        let mut runs: Vec<Run<'_>> = Vec::new();
        for (i, entry) in self.chars.iter().enumerate() {
            match runs.last_mut() {
                Some(run) if *run.marks == entry.marks => {
                    run.range.end = i + 1;
                    run.text.push(entry.ch);
                }
                _ => runs.push(Run {
                    range: i..i + 1,
                    text: entry.ch.to_string(),
                    marks: &entry.marks,
                }),
            }
        }
        runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_extend() {
        let root = Label::extend(None, "tag", None);
        assert_eq!(root.as_str(), "tag");
        let child = Label::extend(Some(&root), "punctuation", Some("attr-equals"));
        assert_eq!(child.as_str(), "tag punctuation attr-equals");
        assert_eq!(root.as_str(), "tag");
        assert_eq!(Label::extend(None, "keyword", Some("")).as_str(), "keyword");
    }

    #[test]
    fn test_token_mark_class_name() {
        let label = Label::extend(None, "keyword", None);
        assert_eq!(Mark::token("token", &label).class_name, "token keyword");
        assert_eq!(Mark::token("", &label).class_name, "keyword");
        assert!(Mark::token("token", &label).is_token());
        assert!(!Mark::new("bold", "bold").is_token());
    }

    #[test]
    fn test_write_adds_without_removing() {
        let mut buffer = AnnotationBuffer::from_text("abcd");
        let bold = Mark::new("bold", "bold");
        let keyword = Mark::token("token", &Label::extend(None, "keyword", None));
        buffer.write(0..2, &bold);
        buffer.write(1..3, &keyword);

        assert_eq!(buffer.get(0).unwrap().marks.len(), 1);
        assert_eq!(buffer.get(1).unwrap().marks.len(), 2);
        assert!(buffer.get(2).unwrap().marks.contains(&keyword));
        assert!(buffer.get(3).unwrap().marks.is_empty());
    }

    #[test]
    fn test_write_clips_range() {
        let mut buffer = AnnotationBuffer::from_text("ab");
        buffer.write(1..10, &Mark::new("x", "x"));
        buffer.write(5..9, &Mark::new("y", "y"));
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.get(1).unwrap().marks.len(), 1);
    }

    #[test]
    fn test_runs() {
        let mut buffer = AnnotationBuffer::from_text("var x;");
        let keyword = Mark::token("token", &Label::extend(None, "keyword", None));
        buffer.write(0..3, &keyword);

        let runs = buffer.runs();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].range, 0..3);
        assert_eq!(runs[0].text, "var");
        assert_eq!(runs[0].token_mark(), Some(&keyword));
        assert_eq!(runs[1].text, " x;");
        assert!(runs[1].token_mark().is_none());
    }

    #[test]
    fn test_runs_empty_buffer() {
        assert!(AnnotationBuffer::from_text("").runs().is_empty());
    }

    #[test]
    fn test_token_classes() {
        let mut buffer = AnnotationBuffer::from_text("ab");
        buffer.write(1..2, &Mark::token("token", &Label::extend(None, "string", None)));
        assert_eq!(buffer.token_classes(), vec![None, Some("token string")]);
    }
}
