//! Syntax decoration engine
//!
//! Turns a token tree into per-character annotations for one fragment:
//! - Tokenize the fragment (plain mode) or its whole block (block-join mode)
//! - Walk the tree, intersecting each leaf with the fragment's bounds
//! - Add a syntax-token mark to the characters of every overlapping leaf
//!
//! In block-join mode all fragments of a block share one tokenization pass
//! through the single-entry block cache.

mod annotation;
mod cache;
mod intersect;
mod walker;

pub use annotation::{AnnotatedChar, AnnotationBuffer, Label, Mark, Run, TOKEN_MARK};
pub use cache::BlockCache;
pub use intersect::FragmentBounds;
pub use walker::{walk, Leaf, Leaves, Mode};

use std::rc::Rc;

use tracing::trace;

use crate::config::Config;
use crate::document::{Block, BlockKey, Document, Fragment};
use crate::error::{DecorError, Result};
use crate::render::{render_buffer, HtmlRenderer, TokenRenderer};
use crate::syntax::{GrammarRegistry, Token, Tokenizer};

/// Block kind highlighted by default
pub const DEFAULT_CODE_BLOCK: &str = "code_block";
/// Grammar used when a block names none
pub const DEFAULT_SYNTAX: &str = "javascript";
/// Prefix of every emitted class name
pub const DEFAULT_CLASS_PREFIX: &str = "token";

/// Selects the blocks eligible for highlighting
pub type BlockPredicate = Box<dyn Fn(&Block) -> bool>;
/// Maps a block to a grammar name
pub type SyntaxResolver = Box<dyn Fn(&Block) -> String>;

/// Host configuration of the engine
pub struct DecorateOptions {
    /// Blocks whose fragments get decorated
    pub only_in: BlockPredicate,
    /// Grammar name for a block
    pub get_syntax: SyntaxResolver,
    /// Visual wrapper for marked text
    pub render_token: Box<dyn TokenRenderer>,
    /// Tokenize each fragment on its own instead of the joined block
    pub block_per_line: bool,
    /// Prefix of mark class names
    pub class_prefix: String,
    /// Reuse a block's tokens across its fragments
    pub cache: bool,
}

impl Default for DecorateOptions {
    fn default() -> Self {
        Self {
            only_in: Box::new(|block| block.kind() == DEFAULT_CODE_BLOCK),
            get_syntax: Box::new(|block| block.data("syntax").unwrap_or(DEFAULT_SYNTAX).to_string()),
            render_token: Box::new(HtmlRenderer),
            block_per_line: false,
            class_prefix: DEFAULT_CLASS_PREFIX.to_string(),
            cache: true,
        }
    }
}

impl DecorateOptions {
    /// Options from the configuration file
    pub fn from_config(config: &Config) -> Self {
        let kind = config.code_block.clone();
        let default_syntax = config.default_syntax.clone();
        Self {
            only_in: Box::new(move |block| block.kind() == kind),
            get_syntax: Box::new(move |block| {
                block.data("syntax").unwrap_or(&default_syntax).to_string()
            }),
            render_token: Box::new(HtmlRenderer),
            block_per_line: config.block_per_line,
            class_prefix: config.class_prefix.clone(),
            cache: config.cache,
        }
    }

    /// Builder: set the block predicate
    pub fn only_in(mut self, predicate: impl Fn(&Block) -> bool + 'static) -> Self {
        self.only_in = Box::new(predicate);
        self
    }

    /// Builder: set the grammar resolver
    pub fn get_syntax(mut self, resolver: impl Fn(&Block) -> String + 'static) -> Self {
        self.get_syntax = Box::new(resolver);
        self
    }

    /// Builder: set the renderer
    pub fn render_token(mut self, renderer: impl TokenRenderer + 'static) -> Self {
        self.render_token = Box::new(renderer);
        self
    }

    /// Builder: select plain (`true`) or block-join (`false`) mode
    pub fn block_per_line(mut self, per_line: bool) -> Self {
        self.block_per_line = per_line;
        self
    }

    /// Builder: set the class prefix
    pub fn class_prefix(mut self, prefix: &str) -> Self {
        self.class_prefix = prefix.to_string();
        self
    }

    /// Builder: enable or disable the block cache
    pub fn cache(mut self, enabled: bool) -> Self {
        self.cache = enabled;
        self
    }

    fn mode(&self) -> Mode {
        if self.block_per_line {
            Mode::Plain
        } else {
            Mode::BlockJoin
        }
    }
}

/// The decoration engine
///
/// Owns the block cache, so one decorator serves one thread of requests.
pub struct Decorator<T: Tokenizer = GrammarRegistry> {
    tokenizer: T,
    options: DecorateOptions,
    cache: BlockCache,
}

impl Decorator<GrammarRegistry> {
    /// Decorator over the built-in grammars
    pub fn with_builtins(options: DecorateOptions) -> Self {
        Self::new(GrammarRegistry::new(), options)
    }
}

impl<T: Tokenizer> Decorator<T> {
    /// Create a decorator
    pub fn new(tokenizer: T, options: DecorateOptions) -> Self {
        let cache = BlockCache::new(options.cache);
        Self {
            tokenizer,
            options,
            cache,
        }
    }

    /// Get the tokenizer
    pub fn tokenizer(&self) -> &T {
        &self.tokenizer
    }

    /// Get the options
    pub fn options(&self) -> &DecorateOptions {
        &self.options
    }

    /// Current mode
    pub fn mode(&self) -> Mode {
        self.options.mode()
    }

    /// Enable or disable the block cache
    pub fn set_cache_enabled(&mut self, enabled: bool) {
        self.options.cache = enabled;
        self.cache.set_enabled(enabled);
    }

    /// Check if a block is eligible for highlighting
    pub fn matches(&self, block: &Block) -> bool {
        (self.options.only_in)(block)
    }

    /// Grammar name for a block
    pub fn syntax(&self, block: &Block) -> String {
        (self.options.get_syntax)(block)
    }

    /// Wrap marked text; `None` for marks owned by other concerns
    pub fn render(&self, mark: &Mark, children: &str) -> Option<String> {
        if mark.is_token() {
            Some(self.options.render_token.render(mark, children))
        } else {
            None
        }
    }

    /// Render a decorated buffer with the configured renderer
    pub fn render_buffer(&self, buffer: &AnnotationBuffer) -> String {
        render_buffer(buffer, self.options.render_token.as_ref())
    }

    /// Annotate one fragment of a block
    ///
    /// Returns the fragment's characters with a syntax-token mark added to
    /// every character covered by a typed token. Marks already on the
    /// fragment are kept. Ineligible blocks and unsupported grammars give
    /// the characters back unchanged.
    pub fn decorate(&mut self, fragment: &Fragment, block: &Block) -> Result<AnnotationBuffer> {
        let mut buffer = fragment.characters();

        let not_in_block = || DecorError::FragmentNotInBlock {
            fragment: fragment.key(),
            block: block.key(),
        };
        let index = block.fragment_index(fragment.key()).ok_or_else(not_in_block)?;

        if !self.matches(block) {
            return Ok(buffer);
        }

        let grammar = self.syntax(block);
        let mode = self.mode();
        trace!(
            block = %block.key(),
            fragment = %fragment.key(),
            grammar = %grammar,
            ?mode,
            "decorate"
        );

        let tokenizer = &self.tokenizer;
        let (tokens, bounds, expected): (Option<Rc<[Token]>>, _, _) = match mode {
            Mode::Plain => {
                let len = fragment.char_len();
                let tokens = tokenizer.tokenize(fragment.text(), &grammar);
                (tokens.map(Rc::from), FragmentBounds::whole(len), len)
            }
            Mode::BlockJoin => {
                let offset = block.fragment_offset(fragment.key()).ok_or_else(not_in_block)?;
                let bounds = FragmentBounds::in_block(offset, index, fragment.char_len());
                let tokens = self
                    .cache
                    .get_tokens(block, &grammar, |text| tokenizer.tokenize(text, &grammar));
                (tokens, bounds, block.content_len())
            }
        };

        let Some(tokens) = tokens else {
            return Ok(buffer);
        };

        let mut leaves = walk(&tokens, mode);
        for leaf in leaves.by_ref() {
            let Some(label) = leaf.label else {
                continue;
            };
            if let Some(range) = bounds.intersect(leaf.start, leaf.end) {
                buffer.write(range, &Mark::token(&self.options.class_prefix, &label));
            }
        }

        let actual = leaves.consumed();
        if actual != expected {
            return Err(DecorError::TokenLengthMismatch { expected, actual });
        }

        Ok(buffer)
    }

    /// Annotate every fragment of a block, in order
    pub fn decorate_block(&mut self, block: &Block) -> Result<Vec<AnnotationBuffer>> {
        block
            .fragments()
            .iter()
            .map(|fragment| self.decorate(fragment, block))
            .collect()
    }

    /// Annotate every eligible block of a document
    pub fn decorate_document(
        &mut self,
        document: &Document,
    ) -> Result<Vec<(BlockKey, Vec<AnnotationBuffer>)>> {
        let mut decorated = Vec::new();
        for block in document.blocks() {
            if self.matches(block) {
                decorated.push((block.key(), self.decorate_block(block)?));
            }
        }
        Ok(decorated)
    }
}
