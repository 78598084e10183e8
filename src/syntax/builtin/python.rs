//! Python grammar

use crate::syntax::grammar::Grammar;
use crate::syntax::rules::PatternRule;

const KEYWORDS: &str = r"\b(?:_(?:_debug__|_import__)|and|as|assert|async|await|break|case|class|continue|def|del|elif|else|except|exec|finally|for|from|global|if|import|in|is|lambda|match|nonlocal|not|or|pass|print|raise|return|try|while|with|yield)\b";

const BUILTINS: &str = r"\b(?:abs|all|any|ascii|bin|bool|bytearray|bytes|callable|chr|classmethod|compile|complex|delattr|dict|dir|divmod|enumerate|eval|filter|float|format|frozenset|getattr|globals|hasattr|hash|help|hex|id|input|int|isinstance|issubclass|iter|len|list|locals|map|max|memoryview|min|next|object|oct|open|ord|pow|property|range|repr|reversed|round|set|setattr|slice|sorted|staticmethod|str|sum|super|tuple|type|vars|zip)\b";

/// Create Python grammar
pub fn python_grammar() -> Grammar {
    let mut grammar = Grammar::new("python");
    grammar.add_alias("py");
    grammar
        .add_extension("py")
        .add_extension("pyw")
        .add_extension("pyi");

    // Triple-quoted strings before single-line strings so docstrings stay whole
    grammar
        .add("comment", PatternRule::new(r"#.*").greedy())
        .add(
            "triple-quoted-string",
            PatternRule::new(r#"(?i:[rub]|br|rb)?(?:"""[\s\S]*?"""|'''[\s\S]*?''')"#)
                .greedy()
                .alias("string"),
        )
        .add(
            "string",
            PatternRule::new(r#"(?i:[rub]|br|rb|f|fr|rf)?(?:"(?:\\.|[^"\\\r\n])*"|'(?:\\.|[^'\\\r\n])*')"#)
                .greedy(),
        );

    grammar
        .add(
            "function",
            PatternRule::new(r"\bdef\s+(?P<token>[a-zA-Z_]\w*)"),
        )
        .add(
            "class-name",
            PatternRule::new(r"\bclass\s+(?P<token>\w+)"),
        )
        .add(
            "decorator",
            PatternRule::new(r"(?m)^\s*(?P<token>@\w+(?:\.\w+)*)").alias("annotation"),
        )
        .add("keyword", PatternRule::new(KEYWORDS))
        .add("builtin", PatternRule::new(BUILTINS))
        .add("boolean", PatternRule::new(r"\b(?:False|None|True)\b"))
        .add(
            "number",
            PatternRule::new(r"(?i)\b0(?:b(?:_?[01])+|o(?:_?[0-7])+|x(?:_?[a-f0-9])+)\b|(?:\b\d+(?:_\d+)*(?:\.(?:\d+(?:_\d+)*)?)?|\B\.\d+(?:_\d+)*)(?:e[+-]?\d+(?:_\d+)*)?j?\b"),
        )
        .add(
            "operator",
            PatternRule::new(r"[-+%=]=?|!=|:=|\*\*?=?|//?=?|<[<=>]?|>[=>]?|[&|^~]"),
        )
        .add("punctuation", PatternRule::new(r"[{}\[\];(),.:]"));

    grammar
}
