//! JavaScript grammar

use std::sync::Arc;

use crate::syntax::grammar::Grammar;
use crate::syntax::rules::PatternRule;

const KEYWORDS: &str = r"\b(?:as|async|await|break|case|catch|class|const|continue|debugger|default|delete|do|else|export|extends|finally|for|from|function|get|if|import|in|instanceof|let|new|null|of|return|set|static|super|switch|this|throw|try|typeof|undefined|var|void|while|with|yield)\b";

/// Template literal interior: punctuation, `${...}` interpolations and text
fn template_grammar() -> Grammar {
    let mut interpolation = Grammar::new("javascript-interpolation");
    interpolation.add(
        "interpolation-punctuation",
        PatternRule::new(r"^\$\{|\}$").alias("punctuation"),
    );

    let mut template = Grammar::new("javascript-template");
    template
        .add(
            "template-punctuation",
            PatternRule::new(r"^`|`$").alias("string"),
        )
        .add(
            "interpolation",
            PatternRule::new(r"\$\{[^}]*\}").inside(Arc::new(interpolation)),
        )
        .add("string", PatternRule::new(r"[\s\S]+"));
    template
}

/// Create JavaScript grammar
pub fn javascript_grammar() -> Grammar {
    let mut grammar = Grammar::new("javascript");
    grammar.add_alias("js");
    grammar.add_extension("js").add_extension("mjs").add_extension("cjs");

    // Comments and strings first; greedy so each can contain the other's delimiters
    grammar
        .add("comment", PatternRule::new(r"/\*[\s\S]*?(?:\*/|$)").greedy())
        .add("comment", PatternRule::new(r"//.*").greedy())
        .add(
            "template-string",
            PatternRule::new(r"`(?:\\[\s\S]|\$\{[^}]*\}|[^\\`$]|\$[^{])*`")
                .greedy()
                .inside(Arc::new(template_grammar())),
        )
        .add(
            "string",
            PatternRule::new(r#""(?:\\.|[^\\"\r\n])*"|'(?:\\.|[^\\'\r\n])*'"#).greedy(),
        );

    // Names following a declaration keyword
    grammar.add(
        "class-name",
        PatternRule::new(r"\b(?:class|extends|implements|instanceof|interface|new)\s+(?P<token>[\w.]+)"),
    );

    grammar
        .add("keyword", PatternRule::new(KEYWORDS))
        .add("boolean", PatternRule::new(r"\b(?:true|false)\b"))
        .add(
            "function",
            PatternRule::new(r"(?P<token>#?[_$a-zA-Z][$\w]*)\s*\("),
        )
        .add(
            "number",
            PatternRule::new(r"\b0[xX][\dA-Fa-f]+\b|(?:\b\d+(?:\.\d*)?|\B\.\d+)(?:[Ee][+-]?\d+)?"),
        )
        .add(
            "operator",
            PatternRule::new(r"--|\+\+|\*\*=?|=>|&&=?|\|\|=?|[!=]==|<<=?|>>>?=?|[-+*/%&|^!=<>]=?|\.{3}|\?\?=?|\?\.?|[~:]"),
        )
        .add("punctuation", PatternRule::new(r"[{}\[\];(),.]"));

    grammar
}
