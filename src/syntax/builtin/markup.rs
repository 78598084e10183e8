//! Markup grammar (HTML, XML, SVG)

use std::sync::Arc;

use crate::syntax::grammar::Grammar;
use crate::syntax::rules::PatternRule;

/// Grammar for the inside of a single tag
fn tag_grammar() -> Grammar {
    let mut name = Grammar::new("markup-tag-name");
    name.add("punctuation", PatternRule::new(r"^</?"))
        .add("namespace", PatternRule::new(r"^[^\s>/:]+:"));

    let mut value = Grammar::new("markup-attr-value");
    value
        .add("punctuation", PatternRule::new(r"^=").alias("attr-equals"))
        .add("punctuation", PatternRule::new(r#"^\s*(?P<token>["'])|["']$"#));

    let mut tag = Grammar::new("markup-tag");
    tag.add("tag", PatternRule::new(r"^</?[^\s>/]+").inside(Arc::new(name)))
        .add(
            "attr-value",
            PatternRule::new(r#"=\s*(?:"[^"]*"|'[^']*'|[^\s'">=]+)"#).inside(Arc::new(value)),
        )
        .add("punctuation", PatternRule::new(r"/?>"))
        .add("attr-name", PatternRule::new(r"[^\s>/=]+"));
    tag
}

/// Create markup grammar
pub fn markup_grammar() -> Grammar {
    let mut grammar = Grammar::new("markup");
    grammar
        .add_alias("html")
        .add_alias("xml")
        .add_alias("svg");
    grammar
        .add_extension("html")
        .add_extension("htm")
        .add_extension("xml")
        .add_extension("svg");

    grammar
        .add("comment", PatternRule::new(r"<!--[\s\S]*?(?:-->|$)").greedy())
        .add("prolog", PatternRule::new(r"<\?[\s\S]+?\?>").greedy())
        .add("doctype", PatternRule::new(r"(?i)<!DOCTYPE[^>]*>").greedy())
        .add("cdata", PatternRule::new(r"(?i)<!\[CDATA\[[\s\S]*?\]\]>").greedy())
        .add(
            "tag",
            PatternRule::new(
                r#"</?[^\s>/=!?]+(?:\s+[^\s>/=]+(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s'">=]+))?)*\s*/?>"#,
            )
            .greedy()
            .inside(Arc::new(tag_grammar())),
        )
        .add(
            "entity",
            PatternRule::new(r"(?i)&[\da-z]{1,8};|&#x?[\da-f]{1,8};").alias("named-entity"),
        );

    grammar
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::tokens::{tokens_text, Token};

    #[test]
    fn test_markup_comment() {
        let tokens = markup_grammar().tokenize("<!-- Some HTML -->");
        assert_eq!(tokens, vec![Token::typed("comment", "<!-- Some HTML -->")]);
    }

    #[test]
    fn test_markup_simple_tags() {
        let source = "<b>Hello World</b>";
        let tokens = markup_grammar().tokenize(source);
        assert_eq!(tokens_text(&tokens), source);
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1], Token::literal("Hello World"));
        assert_eq!(
            tokens[0],
            Token::nested(
                "tag",
                vec![
                    Token::nested(
                        "tag",
                        vec![Token::typed("punctuation", "<"), Token::literal("b")]
                    ),
                    Token::typed("punctuation", ">"),
                ]
            )
        );
    }

    #[test]
    fn test_markup_attributes() {
        let source = r#"<a href="x.html" hidden>"#;
        let tokens = markup_grammar().tokenize(source);
        assert_eq!(tokens_text(&tokens), source);
        let Token::Typed(tag) = &tokens[0] else {
            panic!("expected a tag token");
        };
        let crate::syntax::tokens::Content::Nested(parts) = &tag.content else {
            panic!("expected nested tag content");
        };
        let names: Vec<_> = parts.iter().filter_map(Token::category).collect();
        assert_eq!(names, vec!["tag", "attr-name", "attr-value", "attr-name", "punctuation"]);
    }

    #[test]
    fn test_markup_entity() {
        let tokens = markup_grammar().tokenize("a &amp; b");
        assert_eq!(tokens[1], Token::typed("entity", "&amp;").with_alias("named-entity"));
    }
}
