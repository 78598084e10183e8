//! Single-entry block tokenization cache
//!
//! Remembers the token tree of the last block requested so that every
//! fragment of that block reuses one tokenization pass. Any request for a
//! different block, another revision of the same block or another grammar
//! replaces the entry.
//!
//! The cache is owned by one `Decorator` and shares its tree through `Rc`,
//! so it is confined to the thread driving decoration. Hosts decorating
//! blocks in parallel need one decorator per thread.

use std::rc::Rc;

use tracing::trace;

use crate::document::{Block, BlockKey};
use crate::syntax::Token;

struct Entry {
    block: BlockKey,
    revision: u64,
    grammar: String,
    /// `None` records an unsupported grammar
    tokens: Option<Rc<[Token]>>,
}

impl Entry {
    fn matches(&self, block: &Block, grammar: &str) -> bool {
        self.block == block.key() && self.revision == block.revision() && self.grammar == grammar
    }
}

/// Block cache
pub struct BlockCache {
    enabled: bool,
    entry: Option<Entry>,
}

impl BlockCache {
    /// Create an empty cache
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            entry: None,
        }
    }

    /// Check if the cache is active
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turn caching on or off; turning it off drops the entry
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.entry = None;
        }
    }

    /// Token tree for a block's full text, tokenizing only on a miss
    pub fn get_tokens<F>(&mut self, block: &Block, grammar: &str, tokenize: F) -> Option<Rc<[Token]>>
    where
        F: FnOnce(&str) -> Option<Vec<Token>>,
    {
        if !self.enabled {
            return tokenize(&block.full_text()).map(Rc::from);
        }

        if let Some(entry) = self.entry.as_ref().filter(|e| e.matches(block, grammar)) {
            trace!(block = %block.key(), revision = block.revision(), "block cache hit");
            return entry.tokens.clone();
        }

        trace!(block = %block.key(), revision = block.revision(), grammar, "block cache miss");
        let tokens: Option<Rc<[Token]>> = tokenize(&block.full_text()).map(Rc::from);
        self.entry = Some(Entry {
            block: block.key(),
            revision: block.revision(),
            grammar: grammar.to_string(),
            tokens: tokens.clone(),
        });
        tokens
    }
}

impl Default for BlockCache {
    fn default() -> Self {
        Self::new(true)
    }
}
