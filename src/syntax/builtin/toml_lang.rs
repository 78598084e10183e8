//! TOML grammar

use crate::syntax::grammar::Grammar;
use crate::syntax::rules::PatternRule;

/// Create TOML grammar
pub fn toml_grammar() -> Grammar {
    let mut grammar = Grammar::new("toml");
    grammar.add_extension("toml");

    grammar
        .add("comment", PatternRule::new(r"#.*").greedy())
        .add(
            "table",
            PatternRule::new(r"(?m)^[\t ]*(?P<token>\[\[?[\t ]*[\w\-.]+(?:[\t ]*\.[\t ]*[\w\-.]+)*[\t ]*\]\]?)")
                .greedy()
                .alias("class-name"),
        )
        .add(
            "key",
            PatternRule::new(r"(?m)^[\t ]*(?P<token>[\w\-.]+)[\t ]*=")
                .greedy()
                .alias("property"),
        )
        .add(
            "string",
            PatternRule::new(r#""""[\s\S]*?"""|'''[\s\S]*?'''|'[^'\r\n]*'|"(?:\\.|[^\\"\r\n])*""#).greedy(),
        )
        .add(
            "date",
            PatternRule::new(r"(?i)\b\d{4}-\d{2}-\d{2}(?:[T\s]\d{2}:\d{2}:\d{2}(?:\.\d+)?(?:Z|[+-]\d{2}:\d{2})?)?\b|\b\d{2}:\d{2}:\d{2}(?:\.\d+)?\b")
                .alias("number"),
        )
        .add(
            "number",
            PatternRule::new(r"(?:\b0(?:x[\da-zA-Z]+(?:_[\da-zA-Z]+)*|o[0-7]+(?:_[0-7]+)*|b[10]+(?:_[10]+)*))\b|[-+]?\b\d+(?:_\d+)*(?:\.\d+(?:_\d+)*)?(?:[eE][+-]?\d+(?:_\d+)*)?\b|[-+]?\b(?:inf|nan)\b"),
        )
        .add("boolean", PatternRule::new(r"\b(?:true|false)\b"))
        .add("punctuation", PatternRule::new(r"[.,=\[\]{}]"));

    grammar
}
