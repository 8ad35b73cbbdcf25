//! Language-specific declaration parsers.

mod java;

pub use java::JavaParser;

use super::DeclarationParser;
use once_cell::sync::OnceCell;

/// Static storage for the Java parser.
static JAVA_PARSER: OnceCell<JavaParser> = OnceCell::new();

/// Register all available declaration parsers.
///
/// Idempotent; lookups call it on demand.
pub fn register_parsers() {
    JAVA_PARSER.get_or_init(JavaParser::new);
}

/// Get a parser for the given file extension (without dot).
pub fn parser_for_extension(ext: &str) -> Option<&'static dyn DeclarationParser> {
    register_parsers();

    match ext {
        "java" => JAVA_PARSER.get().map(|p| p as &'static dyn DeclarationParser),
        _ => None,
    }
}

/// All file extensions with a registered parser.
pub fn registered_extensions() -> Vec<&'static str> {
    register_parsers();

    let mut exts = Vec::new();
    if let Some(p) = JAVA_PARSER.get() {
        exts.extend_from_slice(p.file_extensions());
    }
    exts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_extension() {
        let parser = parser_for_extension("java").expect("java parser");
        assert_eq!(parser.language_id(), "java");
        assert!(parser.handles_extension("java"));
        assert!(parser_for_extension("kt").is_none());
    }

    #[test]
    fn test_registered_extensions() {
        assert_eq!(registered_extensions(), vec!["java"]);
    }
}
