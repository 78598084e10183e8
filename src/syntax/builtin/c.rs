//! C grammar

use std::sync::Arc;

use crate::syntax::grammar::Grammar;
use crate::syntax::rules::PatternRule;

const KEYWORDS: &str = r"\b(?:_Alignas|_Alignof|_Atomic|_Bool|_Complex|_Generic|_Imaginary|_Noreturn|_Static_assert|_Thread_local|__attribute__|asm|auto|break|case|char|const|continue|default|do|double|else|enum|extern|float|for|goto|if|inline|int|long|register|return|short|signed|sizeof|static|struct|switch|typedef|typeof|union|unsigned|void|volatile|while)\b";

/// Create C grammar
pub fn c_grammar() -> Grammar {
    let mut grammar = Grammar::new("c");
    grammar.add_alias("h");
    grammar.add_extension("c").add_extension("h");

    let mut directive = Grammar::new("c-directive");
    directive
        .add("directive", PatternRule::new(r"^#\s*\w+").alias("keyword"))
        .add("string", PatternRule::new(r#"<[^>\r\n]+>|"[^"\r\n]*""#).alias("import-file"));

    grammar
        .add("comment", PatternRule::new(r"/\*[\s\S]*?(?:\*/|$)").greedy())
        .add("comment", PatternRule::new(r"//.*").greedy())
        .add(
            "macro",
            PatternRule::new(r"(?m)^[\t ]*(?P<token>#\s*[a-z][^\r\n]*)")
                .greedy()
                .alias("property")
                .inside(Arc::new(directive)),
        )
        .add("string", PatternRule::new(r#""(?:\\.|[^\\"\r\n])*""#).greedy())
        .add(
            "char",
            PatternRule::new(r"'(?:\\.|[^'\\\r\n]){0,32}'").greedy(),
        );

    grammar
        .add(
            "class-name",
            PatternRule::new(r"\b(?:enum|struct|union)\s+(?P<token>\w+)"),
        )
        .add("keyword", PatternRule::new(KEYWORDS))
        .add(
            "constant",
            PatternRule::new(r"\b(?:EOF|NULL|SEEK_CUR|SEEK_END|SEEK_SET|stderr|stdin|stdout|__FILE__|__LINE__|__DATE__|__TIME__|__func__)\b"),
        )
        .add(
            "function",
            PatternRule::new(r"\b(?P<token>[a-z_]\w*)\s*\("),
        )
        .add(
            "number",
            PatternRule::new(r"(?i)\b0x[\da-f]+[ul]*\b|(?:\b\d+(?:\.\d*)?|\B\.\d+)(?:e[+-]?\d+)?[fflu]*\b"),
        )
        .add(
            "operator",
            PatternRule::new(r">>=?|<<=?|->|--|\+\+|&&|\|\||::|[?:~]|[-+*/%&|^!=<>]=?"),
        )
        .add("punctuation", PatternRule::new(r"[{}\[\];(),.]"));

    grammar
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::tokens::{tokens_text, Token};

    #[test]
    fn test_c_include() {
        let source = "#include <stdio.h>";
        let tokens = c_grammar().tokenize(source);
        assert_eq!(tokens_text(&tokens), source);
        assert_eq!(
            tokens,
            vec![Token::nested(
                "macro",
                vec![
                    Token::typed("directive", "#include").with_alias("keyword"),
                    Token::literal(" "),
                    Token::typed("string", "<stdio.h>").with_alias("import-file"),
                ]
            )
            .with_alias("property")]
        );
    }

    #[test]
    fn test_c_function() {
        let tokens = c_grammar().tokenize("int main(void) { return 0; }");
        assert_eq!(tokens[0], Token::typed("keyword", "int"));
        assert!(tokens.contains(&Token::typed("function", "main")));
        assert!(tokens.contains(&Token::typed("number", "0")));
    }
}
