//! syntax-decor - syntax-highlighting decorations for rich-text code blocks
//!
//! A host document made of blocks of text fragments asks a `Decorator` to
//! annotate one fragment at a time. The decorator tokenizes the fragment,
//! or its whole block, with a pluggable tokenizer and returns the
//! fragment's characters with a syntax-token mark on every character that
//! belongs to a typed token. Rendering marks into HTML or terminal output
//! is left to a `TokenRenderer`.

pub mod config;
pub mod decorate;
pub mod document;
pub mod error;
pub mod render;
pub mod syntax;
pub mod theme;

pub use config::Config;
pub use decorate::{AnnotationBuffer, DecorateOptions, Decorator, Mark, Mode, TOKEN_MARK};
pub use document::{Block, BlockKey, Document, Fragment, FragmentKey};
pub use error::{DecorError, Result};
pub use render::{render_buffer, AnsiRenderer, HtmlRenderer, TokenRenderer};
pub use syntax::{GrammarRegistry, Token, Tokenizer};
