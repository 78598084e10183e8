//! Rust grammar

use crate::syntax::grammar::Grammar;
use crate::syntax::rules::PatternRule;

const KEYWORDS: &str = r"\b(?:Self|abstract|as|async|await|become|box|break|const|continue|crate|do|dyn|else|enum|extern|final|fn|for|if|impl|in|let|loop|macro|match|mod|move|mut|override|priv|pub|ref|return|self|static|struct|super|trait|try|type|typeof|union|unsafe|unsized|use|virtual|where|while|yield)\b";

/// Create Rust grammar
pub fn rust_grammar() -> Grammar {
    let mut grammar = Grammar::new("rust");
    grammar.add_alias("rs");
    grammar.add_extension("rs");

    grammar
        .add("comment", PatternRule::new(r"/\*[\s\S]*?(?:\*/|$)").greedy())
        .add("comment", PatternRule::new(r"//.*").greedy())
        .add(
            "string",
            PatternRule::new(r##"\bb?r#*"[\s\S]*?"#*|b?"(?:\\[\s\S]|[^\\"])*""##).greedy(),
        )
        .add(
            "char",
            PatternRule::new(r"b?'(?:\\(?:x[0-7][\da-fA-F]|u\{[\da-fA-F_]{1,6}\}|.)|[^\\\r\n\t'])'")
                .greedy()
                .alias("string"),
        )
        .add(
            "attribute",
            PatternRule::new(r#"#!?\[(?:[^\[\]"]|"(?:\\[\s\S]|[^\\"])*")*\]"#)
                .greedy()
                .alias("attr-name"),
        );

    grammar
        .add("lifetime-annotation", PatternRule::new(r"'\w+").alias("symbol"))
        .add(
            "function-definition",
            PatternRule::new(r"\bfn\s+(?P<token>\w+)").alias("function"),
        )
        .add(
            "type-definition",
            PatternRule::new(r"\b(?:enum|struct|trait|type|union)\s+(?P<token>\w+)").alias("class-name"),
        )
        .add("macro", PatternRule::new(r"\b\w+!").alias("property"))
        .add("keyword", PatternRule::new(KEYWORDS))
        .add("boolean", PatternRule::new(r"\b(?:true|false)\b"))
        .add(
            "function",
            PatternRule::new(r"\b(?P<token>[a-z_]\w*)\s*(?:::\s*<|\()"),
        )
        .add("class-name", PatternRule::new(r"\b[A-Z]\w*\b"))
        .add(
            "number",
            PatternRule::new(r"\b(?:0x[\dA-Fa-f](?:_?[\dA-Fa-f])*|0o[0-7](?:_?[0-7])*|0b[01](?:_?[01])*|(?:\d(?:_?\d)*)?\.?\d(?:_?\d)*(?:[Ee][+-]?\d+)?)(?:_?(?:[iu](?:8|16|32|64|128|size)?|f32|f64))?\b"),
        )
        .add(
            "operator",
            PatternRule::new(r"[-+*/%!^]=?|=[=>]?|&[&=]?|\|[|=]?|<<?=?|>>?=?|[@?]"),
        )
        .add("punctuation", PatternRule::new(r"->|\.\.=|\.{1,3}|::|[{}\[\];(),:]"));

    grammar
}
