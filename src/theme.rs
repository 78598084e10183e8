//! Terminal styles for token categories
//!
//! A theme maps category names (the segments of a mark's class name) to
//! text styles. The most specific segment with a style wins, so
//! `token tag punctuation` is styled as punctuation when punctuation has a
//! style and as a tag otherwise.

use std::collections::HashMap;

use crossterm::style::{Attribute, Attributes, Color as TermColor, ContentStyle};

use crate::decorate::Mark;

/// Terminal colors (ANSI 16-color palette for compatibility)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl Color {
    fn to_crossterm(self) -> Option<TermColor> {
        let color = match self {
            Color::Default => return None,
            Color::Black => TermColor::Black,
            Color::Red => TermColor::DarkRed,
            Color::Green => TermColor::DarkGreen,
            Color::Yellow => TermColor::DarkYellow,
            Color::Blue => TermColor::DarkBlue,
            Color::Magenta => TermColor::DarkMagenta,
            Color::Cyan => TermColor::DarkCyan,
            Color::White => TermColor::Grey,
            Color::BrightBlack => TermColor::DarkGrey,
            Color::BrightRed => TermColor::Red,
            Color::BrightGreen => TermColor::Green,
            Color::BrightYellow => TermColor::Yellow,
            Color::BrightBlue => TermColor::Blue,
            Color::BrightMagenta => TermColor::Magenta,
            Color::BrightCyan => TermColor::Cyan,
            Color::BrightWhite => TermColor::White,
        };
        Some(color)
    }
}

/// Text style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color
    pub fg: Color,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
    /// Underlined text
    pub underline: bool,
}

impl Style {
    /// Create a style with just foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            fg: color,
            ..Default::default()
        }
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Builder: set italic
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Builder: set underline
    pub fn with_underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Convert to a crossterm style
    pub fn to_content_style(self) -> ContentStyle {
        let mut attributes = Attributes::default();
        if self.bold {
            attributes.set(Attribute::Bold);
        }
        if self.italic {
            attributes.set(Attribute::Italic);
        }
        if self.underline {
            attributes.set(Attribute::Underlined);
        }
        ContentStyle {
            foreground_color: self.fg.to_crossterm(),
            attributes,
            ..ContentStyle::default()
        }
    }
}

/// Category name to style table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    styles: HashMap<String, Style>,
}

impl Theme {
    /// A theme with no styles
    pub fn empty() -> Self {
        Self {
            styles: HashMap::new(),
        }
    }

    /// Set the style of a category
    pub fn set(&mut self, category: &str, style: Style) -> &mut Self {
        self.styles.insert(category.to_string(), style);
        self
    }

    /// Style of a single category
    pub fn get(&self, category: &str) -> Option<Style> {
        self.styles.get(category).copied()
    }

    /// Style for a mark, from the most specific styled segment of its class
    pub fn style_for(&self, mark: &Mark) -> Option<Style> {
        mark.class_name
            .split(' ')
            .rev()
            .find_map(|segment| self.get(segment))
    }
}

impl Default for Theme {
    fn default() -> Self {
        let comment = Style::fg(Color::BrightBlack).with_italic();
        let string = Style::fg(Color::Green);
        let constant = Style::fg(Color::BrightRed);

        let mut theme = Self::empty();
        theme
            .set("comment", comment)
            .set("prolog", comment)
            .set("doctype", comment)
            .set("cdata", comment)
            .set("string", string)
            .set("char", string)
            .set("template-string", string)
            .set("attr-value", string)
            .set("number", Style::fg(Color::Cyan))
            .set("date", Style::fg(Color::Cyan))
            .set("keyword", Style::fg(Color::Magenta).with_bold())
            .set("class-name", Style::fg(Color::Yellow))
            .set("builtin", Style::fg(Color::Yellow))
            .set("function", Style::fg(Color::Blue))
            .set("operator", Style::fg(Color::BrightWhite))
            .set("punctuation", Style::default())
            .set("directive", Style::fg(Color::BrightMagenta))
            .set("macro", Style::fg(Color::BrightCyan))
            .set("boolean", constant)
            .set("constant", constant)
            .set("entity", Style::fg(Color::BrightYellow))
            .set("attribute", Style::fg(Color::BrightBlue))
            .set("decorator", Style::fg(Color::BrightBlue))
            .set("attr-name", Style::fg(Color::BrightBlue))
            .set("tag", Style::fg(Color::BrightBlue))
            .set("lifetime-annotation", Style::fg(Color::BrightMagenta))
            .set("namespace", Style::fg(Color::BrightBlue))
            .set("table", Style::fg(Color::Yellow).with_underline())
            .set("key", Style::fg(Color::Blue));
        theme
    }
}
