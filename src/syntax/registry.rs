//! Grammar registry
//!
//! This module provides the GrammarRegistry that resolves grammar names,
//! aliases and file extensions to loaded grammars.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use super::builtin;
use super::grammar::Grammar;

/// Named grammars available for tokenization
pub struct GrammarRegistry {
    /// Loaded grammars by canonical name
    grammars: HashMap<String, Arc<Grammar>>,
    /// Alias to canonical name
    aliases: HashMap<String, String>,
    /// Extension to canonical name
    extension_map: HashMap<String, String>,
}

impl GrammarRegistry {
    /// Create a registry with the built-in grammars
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for grammar in builtin::all_grammars() {
            registry.add_grammar(grammar);
        }
        registry
    }

    /// Create a registry with no grammars
    pub fn empty() -> Self {
        Self {
            grammars: HashMap::new(),
            aliases: HashMap::new(),
            extension_map: HashMap::new(),
        }
    }

    /// Add a grammar, replacing any grammar of the same name
    pub fn add_grammar(&mut self, grammar: Grammar) {
        let name = grammar.name.to_lowercase();
        for alias in &grammar.aliases {
            self.aliases.insert(alias.to_lowercase(), name.clone());
        }
        for ext in &grammar.extensions {
            self.extension_map.insert(ext.to_lowercase(), name.clone());
        }
        self.grammars.insert(name, Arc::new(grammar));
    }

    /// Resolve a grammar by name or alias (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&Arc<Grammar>> {
        let name = name.to_lowercase();
        let canonical = self.aliases.get(&name).unwrap_or(&name);
        self.grammars.get(canonical)
    }

    /// Detect grammar name from a filename
    pub fn detect_grammar(&self, filename: &Path) -> Option<&str> {
        let ext = filename.extension()?.to_str()?.to_lowercase();
        self.extension_map.get(&ext).map(|s| s.as_str())
    }

    /// List available grammar names
    pub fn list_grammars(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.grammars.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }
}

impl Default for GrammarRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::rules::PatternRule;

    #[test]
    fn test_detect_grammar() {
        let registry = GrammarRegistry::new();

        assert_eq!(registry.detect_grammar(Path::new("main.rs")), Some("rust"));
        assert_eq!(registry.detect_grammar(Path::new("app.JS")), Some("javascript"));
        assert_eq!(registry.detect_grammar(Path::new("test.py")), Some("python"));
        assert_eq!(registry.detect_grammar(Path::new("Cargo.toml")), Some("toml"));
        assert_eq!(registry.detect_grammar(Path::new("index.html")), Some("markup"));
        assert_eq!(registry.detect_grammar(Path::new("main.c")), Some("c"));
        assert_eq!(registry.detect_grammar(Path::new("no_extension")), None);
    }

    #[test]
    fn test_get_by_alias() {
        let registry = GrammarRegistry::new();
        assert_eq!(registry.get("js").map(|g| g.name.as_str()), Some("javascript"));
        assert_eq!(registry.get("HTML").map(|g| g.name.as_str()), Some("markup"));
        assert_eq!(registry.get("Rust").map(|g| g.name.as_str()), Some("rust"));
        assert!(registry.get("cobol").is_none());
    }

    #[test]
    fn test_add_grammar_replaces() {
        let mut registry = GrammarRegistry::empty();
        assert!(registry.list_grammars().is_empty());

        let mut grammar = Grammar::new("plain");
        grammar.add("word", PatternRule::new(r"\w+"));
        registry.add_grammar(grammar);
        registry.add_grammar(Grammar::new("plain"));

        assert_eq!(registry.list_grammars(), vec!["plain"]);
        assert_eq!(registry.get("plain").map(|g| g.rule_count()), Some(0));
    }

    #[test]
    fn test_list_grammars_sorted() {
        let registry = GrammarRegistry::new();
        assert_eq!(
            registry.list_grammars(),
            vec!["c", "javascript", "markup", "python", "rust", "toml"]
        );
    }
}
