//! Identifier checks and literal escaping for generated Java source.

/// Reserved words that can never be used as identifiers.
const KEYWORDS: &[&str] = &[
    "abstract",
    "assert",
    "boolean",
    "break",
    "byte",
    "case",
    "catch",
    "char",
    "class",
    "const",
    "continue",
    "default",
    "do",
    "double",
    "else",
    "enum",
    "extends",
    "false",
    "final",
    "finally",
    "float",
    "for",
    "goto",
    "if",
    "implements",
    "import",
    "instanceof",
    "int",
    "interface",
    "long",
    "native",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "short",
    "static",
    "strictfp",
    "super",
    "switch",
    "synchronized",
    "this",
    "throw",
    "throws",
    "transient",
    "true",
    "try",
    "void",
    "volatile",
    "while",
    "_",
];

/// Returns `true` if `s` is a reserved word of the target language.
pub fn is_keyword(s: &str) -> bool {
    KEYWORDS.contains(&s)
}

/// Returns `true` if `s` is a bare identifier: a letter, `_` or `$` followed
/// by letters, digits, `_` or `$`, and not a reserved word.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_alphabetic() || first == '_' || first == '$') {
        return false;
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$') && !is_keyword(s)
}

/// Wrap `s` in double quotes, escaping it the way a string literal requires.
///
/// # Example
///
/// ```
/// use listing_core::string_literal;
///
/// assert_eq!(string_literal("say \"hi\"\n"), r#""say \"hi\"\n""#);
/// ```
pub fn string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\'' => out.push('\''),
            c => escape_into(&mut out, c),
        }
    }
    out.push('"');
    out
}

fn escape_into(out: &mut String, c: char) {
    match c {
        '\\' => out.push_str("\\\\"),
        '\u{8}' => out.push_str("\\b"),
        '\t' => out.push_str("\\t"),
        '\n' => out.push_str("\\n"),
        '\u{c}' => out.push_str("\\f"),
        '\r' => out.push_str("\\r"),
        c if c.is_control() => {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                out.push_str(&format!("\\u{:04x}", unit));
            }
        }
        c => out.push(c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("Foo"));
        assert!(is_identifier("_bar"));
        assert!(is_identifier("$x1"));
        assert!(is_identifier("élan"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("1abc"));
        assert!(!is_identifier("a.b"));
        assert!(!is_identifier("a-b"));
    }

    #[test]
    fn test_keywords_are_not_identifiers() {
        assert!(is_keyword("class"));
        assert!(!is_identifier("class"));
        assert!(!is_identifier("int"));
        assert!(is_identifier("Class"));
    }

    #[test]
    fn test_string_literal() {
        assert_eq!(string_literal(""), "\"\"");
        assert_eq!(string_literal("abc"), "\"abc\"");
        assert_eq!(string_literal("a\"b"), "\"a\\\"b\"");
        assert_eq!(string_literal("it's"), "\"it's\"");
        assert_eq!(string_literal("a\\b"), "\"a\\\\b\"");
        assert_eq!(string_literal("\t\r\n"), "\"\\t\\r\\n\"");
        assert_eq!(string_literal("\u{0}"), "\"\\u0000\"");
    }
}
