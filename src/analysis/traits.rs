//! Core traits for declaration parsing.

use std::path::Path;

use super::TypeDeclaration;

/// Holds a parsed tree-sitter tree and associated metadata.
pub struct ParsedFile {
    /// The tree-sitter parse tree.
    pub tree: tree_sitter::Tree,
    /// File contents, kept for node text extraction.
    pub source: Vec<u8>,
    /// The file path (for error reporting).
    pub path: String,
}

impl ParsedFile {
    /// Get text for a tree-sitter node.
    pub fn node_text(&self, node: tree_sitter::Node) -> &str {
        node.utf8_text(&self.source).unwrap_or("")
    }

    /// Whether the tree contains syntax error nodes.
    pub fn has_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }
}

/// Language-specific declaration parser.
///
/// Each source language plugs in by implementing this trait and registering
/// in `languages/mod.rs`; graph assembly only sees `TypeDeclaration`s.
///
/// # Thread Safety
///
/// tree_sitter::Parser is not Sync, so implementations create a parser per
/// call.
pub trait DeclarationParser: Send + Sync {
    /// Returns the language identifier (e.g., "java").
    fn language_id(&self) -> &'static str;

    /// Returns file extensions this parser handles (without dot).
    fn file_extensions(&self) -> &'static [&'static str];

    /// Parse a source file into a tree-sitter tree.
    fn parse(&self, path: &Path, source: &[u8]) -> anyhow::Result<ParsedFile>;

    /// Extract type declarations from a parsed file.
    ///
    /// Returns an error when the file is not syntactically valid; callers
    /// treat that as a file with no declarations.
    fn extract_declarations(&self, parsed: &ParsedFile) -> anyhow::Result<Vec<TypeDeclaration>>;

    /// Parse and extract in one step.
    fn declarations(&self, path: &Path, source: &[u8]) -> anyhow::Result<Vec<TypeDeclaration>> {
        let parsed = self.parse(path, source)?;
        self.extract_declarations(&parsed)
    }

    /// Check if this parser handles the given file extension.
    fn handles_extension(&self, ext: &str) -> bool {
        self.file_extensions().contains(&ext)
    }
}
