//! Line patterns shared by the heuristic scans.
//!
//! Every pattern is matched against a trimmed line.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Handler mapping spanning the whole line: `@GetMapping("/{id}")`.
    pub static ref HANDLER_MAPPING: Regex =
        Regex::new(r"^@(Get|Post|Put|Delete)Mapping\(.*\)$").unwrap();

    /// Type declaration line: `public class Foo`, `public final class Foo<T>`.
    pub static ref CLASS_DECLARATION: Regex = Regex::new(
        r"^public\s+(?:(?:abstract|final|static|sealed|strictfp)\s+)*class\s+([A-Za-z_$][A-Za-z0-9_$]*)"
    ).unwrap();

    /// Persistent-entity marker, word-bounded so `@EntityScan` does not count.
    pub static ref ENTITY_MARKER: Regex = Regex::new(r"@Entity\b").unwrap();

    /// First double-quoted literal.
    static ref QUOTED_LITERAL: Regex = Regex::new(r#""([^"]*)""#).unwrap();

    /// Markers that identify an application entry point.
    pub static ref APPLICATION_ENTRY: Regex =
        Regex::new(r"@SpringBootApplication\b|\bSpringApplication\.run\s*\(").unwrap();
}

/// Network-facing controller marker.
pub const NETWORK_FACING_MARKER: &str = "@RestController";

/// Base path declaration prefix.
pub const BASE_PATH_PREFIX: &str = "@RequestMapping(";

/// Table name marker, matched anywhere on a line.
pub const TABLE_MARKER: &str = "@Table(";

/// Manifest text that marks a framework starter dependency.
pub const STARTER_MARKER: &str = "spring-boot-starter";

/// First double-quoted literal inside the marker's parentheses.
///
/// `@Table(name = "users")` → `users`, `@RequestMapping("/api")` → `/api`.
/// A line without parentheses or without a literal yields an empty string.
pub fn extract_literal(line: &str) -> String {
    let Some(open) = line.find('(') else {
        return String::new();
    };
    let inner = &line[open + 1..];
    let inner = match inner.rfind(')') {
        Some(close) => &inner[..close],
        None => inner,
    };

    QUOTED_LITERAL
        .captures(inner)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_literal() {
        assert_eq!(extract_literal(r#"@RequestMapping("/api/users")"#), "/api/users");
        assert_eq!(extract_literal(r#"@Table(name = "users")"#), "users");
        assert_eq!(
            extract_literal(r#"@GetMapping(value = "/{id}", produces = "application/json")"#),
            "/{id}"
        );
        assert_eq!(extract_literal("@GetMapping()"), "");
        assert_eq!(extract_literal("@Table"), "");
    }

    #[test]
    fn test_handler_mapping_spans_line() {
        let caps = HANDLER_MAPPING.captures(r#"@PostMapping("/login")"#).unwrap();
        assert_eq!(&caps[1], "Post");
        assert!(HANDLER_MAPPING.is_match("@DeleteMapping()"));
        assert!(!HANDLER_MAPPING.is_match("@GetMapping"));
        assert!(!HANDLER_MAPPING.is_match("@PatchMapping(\"/x\")"));
        assert!(!HANDLER_MAPPING.is_match("// @GetMapping(\"/x\")"));
    }

    #[test]
    fn test_class_declaration() {
        let name = |l: &str| CLASS_DECLARATION.captures(l).map(|c| c[1].to_string());
        assert_eq!(name("public class UserController {"), Some("UserController".into()));
        assert_eq!(name("public final class Money<T> implements X"), Some("Money".into()));
        assert_eq!(name("class Hidden {"), None);
        assert_eq!(name("public interface Api {"), None);
    }

    #[test]
    fn test_entity_marker_word_bounded() {
        assert!(ENTITY_MARKER.is_match("@Entity"));
        assert!(ENTITY_MARKER.is_match("@Entity(name = \"x\")"));
        assert!(!ENTITY_MARKER.is_match("@EntityScan(\"com.shop\")"));
    }

    #[test]
    fn test_application_entry() {
        assert!(APPLICATION_ENTRY.is_match("@SpringBootApplication"));
        assert!(APPLICATION_ENTRY.is_match("SpringApplication.run(App.class, args);"));
        assert!(!APPLICATION_ENTRY.is_match("@SpringBootApplicationFoo"));
    }
}
