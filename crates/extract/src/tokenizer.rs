//! Source tokenization
//!
//! [`JavaTokenizer`] walks the leaves of a tree-sitter Java parse and files
//! each leaf under a lexical category. Syntax errors are tolerated (hunks
//! are statement fragments, rarely complete programs); text that no token
//! covers is a lexer error, as are unterminated literals and comments.

use sstubs_core::Token;
use thiserror::Error;
use tree_sitter::{Node, Parser};

/// Tokenization failure for one snippet
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unrecognized input {fragment:?} at byte {offset}")]
    Unrecognized { offset: usize, fragment: String },

    #[error("tokenizer unavailable: {0}")]
    Unavailable(String),
}

/// Turns source text into `(type, value)` tokens
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, source: &str) -> Result<Vec<Token>, LexError>;
}

const MODIFIERS: &[&str] = &[
    "abstract", "default", "final", "native", "non-sealed", "private", "protected", "public",
    "sealed", "static", "strictfp", "synchronized", "transient", "volatile",
];

const BASIC_TYPES: &[&str] = &[
    "boolean", "byte", "char", "double", "float", "int", "long", "short",
];

const KEYWORDS: &[&str] = &[
    "assert", "break", "case", "catch", "class", "const", "continue", "do", "else", "enum",
    "extends", "finally", "for", "goto", "if", "implements", "import", "instanceof",
    "interface", "new", "package", "return", "super", "switch", "this", "throw", "throws",
    "try", "void", "while",
];

const SEPARATORS: &[&str] = &["(", ")", "{", "}", "[", "]", ";", ",", ".", "..."];

/// Node kinds emitted whole instead of descending into their children
fn literal_category(kind: &str) -> Option<&'static str> {
    let category = match kind {
        "decimal_integer_literal" => "DecimalInteger",
        "hex_integer_literal" => "HexInteger",
        "octal_integer_literal" => "OctalInteger",
        "binary_integer_literal" => "BinaryInteger",
        "decimal_floating_point_literal" => "DecimalFloatingPoint",
        "hex_floating_point_literal" => "HexFloatingPoint",
        "character_literal" => "Character",
        "string_literal" | "text_block" => "String",
        _ => return None,
    };
    Some(category)
}

fn leaf_category(text: &str) -> &'static str {
    if MODIFIERS.contains(&text) {
        "Modifier"
    } else if BASIC_TYPES.contains(&text) {
        "BasicType"
    } else if text == "true" || text == "false" {
        "Boolean"
    } else if text == "null" {
        "Null"
    } else if KEYWORDS.contains(&text) {
        "Keyword"
    } else if SEPARATORS.contains(&text) {
        "Separator"
    } else if text == "@" {
        "Annotation"
    } else if text
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
    {
        "Identifier"
    } else {
        "Operator"
    }
}

fn is_comment(kind: &str) -> bool {
    kind.ends_with("comment")
}

/// Java tokenizer backed by the tree-sitter Java grammar
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaTokenizer;

impl JavaTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for JavaTokenizer {
    fn tokenize(&self, source: &str) -> Result<Vec<Token>, LexError> {
        // Parsers are not Sync, so each call gets its own.
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_java::language())
            .map_err(|e| LexError::Unavailable(e.to_string()))?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| LexError::Unavailable("parser returned no tree".into()))?;

        let mut tokens = Vec::new();
        let mut stack = vec![tree.root_node()];

        while let Some(node) = stack.pop() {
            if node.is_missing() || is_comment(node.kind()) {
                continue;
            }

            if let Some(category) = literal_category(node.kind()) {
                // Unterminated literals come back with a MISSING delimiter.
                if node.has_error() {
                    return Err(unrecognized(source, node.start_byte(), node.end_byte()));
                }
                tokens.push(Token::new(category, node_text(node, source)?));
                continue;
            }

            if node.child_count() == 0 {
                if node.is_error() {
                    return Err(unrecognized(source, node.start_byte(), node.end_byte()));
                }
                let text = node_text(node, source)?;
                if text.is_empty() {
                    continue;
                }
                let category = leaf_category(text);
                let rest = source.get(node.start_byte()..).unwrap_or_default();
                if is_malformed_leaf(text, category, rest) {
                    return Err(unrecognized(source, node.start_byte(), node.end_byte()));
                }
                tokens.push(Token::new(category, text));
                continue;
            }

            let children: Vec<Node> = (0..node.child_count())
                .filter_map(|i| node.child(i))
                .collect();
            check_gaps(node, &children, source)?;
            stack.extend(children.into_iter().rev());
        }

        Ok(tokens)
    }
}

/// Leaves that error recovery produced from text no Java token matches
///
/// A quote outside a literal opens an unterminated string or char, `/*`
/// outside a comment opens an unterminated comment, and an identifier-like
/// leaf must be made of identifier characters only.
fn is_malformed_leaf(text: &str, category: &str, rest: &str) -> bool {
    text.starts_with(['"', '\''])
        || rest.starts_with("/*")
        || (category == "Identifier" && !is_java_identifier(text))
}

fn is_java_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

fn node_text<'s>(node: Node, source: &'s str) -> Result<&'s str, LexError> {
    node.utf8_text(source.as_bytes())
        .map_err(|_| unrecognized(source, node.start_byte(), node.end_byte()))
}

/// Text between children that no child covers must be whitespace
fn check_gaps(parent: Node, children: &[Node], source: &str) -> Result<(), LexError> {
    let mut cursor = parent.start_byte();
    let bounds = children
        .iter()
        .map(|c| (c.start_byte(), c.end_byte()))
        .chain(std::iter::once((parent.end_byte(), parent.end_byte())));

    for (start, end) in bounds {
        if start > cursor {
            let gap = source.get(cursor..start).unwrap_or_default();
            if let Some(offset) = gap.find(|c: char| !c.is_whitespace()) {
                return Err(unrecognized(source, cursor + offset, start));
            }
        }
        cursor = cursor.max(end);
    }
    Ok(())
}

fn unrecognized(source: &str, start: usize, end: usize) -> LexError {
    let fragment = source
        .get(start..end.max(start))
        .unwrap_or_default()
        .chars()
        .take(16)
        .collect();
    LexError::Unrecognized {
        offset: start,
        fragment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(tokens: &[Token]) -> Vec<(&str, &str)> {
        tokens
            .iter()
            .map(|t| (t.token_type.as_str(), t.value.as_str()))
            .collect()
    }

    #[test]
    fn test_local_variable() {
        let tokens = JavaTokenizer::new().tokenize("int x = 1;").unwrap();

        assert_eq!(
            pairs(&tokens),
            [
                ("BasicType", "int"),
                ("Identifier", "x"),
                ("Operator", "="),
                ("DecimalInteger", "1"),
                ("Separator", ";"),
            ]
        );
    }

    #[test]
    fn test_method_call_with_string() {
        let tokens = JavaTokenizer::new()
            .tokenize("log.info(\"hello world\");")
            .unwrap();

        assert_eq!(
            pairs(&tokens),
            [
                ("Identifier", "log"),
                ("Separator", "."),
                ("Identifier", "info"),
                ("Separator", "("),
                ("String", "\"hello world\""),
                ("Separator", ")"),
                ("Separator", ";"),
            ]
        );
    }

    #[test]
    fn test_keywords_and_literals() {
        let tokens = JavaTokenizer::new()
            .tokenize("if (flag == null) { return true; }")
            .unwrap();
        let types: Vec<&str> = tokens.iter().map(|t| t.token_type.as_str()).collect();

        assert_eq!(types[0], "Keyword");
        assert!(types.contains(&"Null"));
        assert!(types.contains(&"Boolean"));
        assert_eq!(tokens.last().unwrap().value, "}");
    }

    #[test]
    fn test_comments_dropped() {
        let tokens = JavaTokenizer::new()
            .tokenize("x = 1; // reset\n/* block */ y = 2;")
            .unwrap();

        assert!(tokens.iter().all(|t| !t.value.contains("reset")));
        assert!(tokens.iter().all(|t| !t.value.contains("block")));
        assert_eq!(tokens.len(), 8);
    }

    #[test]
    fn test_fragment_with_unbalanced_brace() {
        let tokens = JavaTokenizer::new().tokenize("} else {").unwrap();

        assert_eq!(
            pairs(&tokens),
            [("Separator", "}"), ("Keyword", "else"), ("Separator", "{")]
        );
    }

    #[test]
    fn test_empty_source() {
        assert!(JavaTokenizer::new().tokenize("").unwrap().is_empty());
        assert!(JavaTokenizer::new().tokenize("  \n\t").unwrap().is_empty());
    }

    #[test]
    fn test_unrecognized_character() {
        let err = JavaTokenizer::new().tokenize("int a = b # c;").unwrap_err();

        assert!(matches!(err, LexError::Unrecognized { .. }));
    }

    #[test]
    fn test_unterminated_string() {
        let err = JavaTokenizer::new().tokenize("s = \"abc;").unwrap_err();

        assert!(matches!(err, LexError::Unrecognized { .. }));
    }

    #[test]
    fn test_unterminated_char() {
        assert!(JavaTokenizer::new().tokenize("c = 'a;").is_err());
    }

    #[test]
    fn test_unterminated_block_comment() {
        let err = JavaTokenizer::new()
            .tokenize("/* open comment x = 1;")
            .unwrap_err();

        assert!(matches!(err, LexError::Unrecognized { .. }));
    }

    #[test]
    fn test_identifier_shape() {
        assert!(is_java_identifier("count"));
        assert!(is_java_identifier("_$tmp2"));
        assert!(!is_java_identifier("abc;"));
        assert!(!is_java_identifier("a\"b"));
        assert!(is_malformed_leaf("abc;", "Identifier", "abc;"));
        assert!(is_malformed_leaf("\"", "Operator", "\"abc;"));
        assert!(is_malformed_leaf("/", "Operator", "/* open"));
        assert!(!is_malformed_leaf("/", "Operator", "/ 2;"));
        assert!(!is_malformed_leaf("non-sealed", "Modifier", "non-sealed class"));
    }

    #[test]
    fn test_leaf_categories() {
        assert_eq!(leaf_category("public"), "Modifier");
        assert_eq!(leaf_category("long"), "BasicType");
        assert_eq!(leaf_category("while"), "Keyword");
        assert_eq!(leaf_category("&&"), "Operator");
        assert_eq!(leaf_category("@"), "Annotation");
        assert_eq!(leaf_category("$tmp"), "Identifier");
    }
}
