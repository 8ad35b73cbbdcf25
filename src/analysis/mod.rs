//! AST-backed declaration parsing.
//!
//! This module turns source files into `TypeDeclaration`s: the declared type
//! name, its markers (annotations), fields with their declared types, and its
//! supertypes. The graph assembler consumes nothing else, so languages plug
//! in without touching it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐     ┌──────────────────┐
//! │ Source Files    │────▶│ DeclarationParser│────▶│ FileDeclarations │
//! └─────────────────┘     │ (Java)           │     │ (TypeDeclaration)│
//!                         └──────────────────┘     └──────────────────┘
//! ```
//!
//! # Adding a New Language
//!
//! 1. Create a new module in `src/analysis/languages/`
//! 2. Implement the `DeclarationParser` trait
//! 3. Register the parser in `languages/mod.rs`

mod facts;
mod languages;
mod traits;

use std::fs;
use std::path::Path;

pub use facts::{DeclarationKind, FieldDecl, FileDeclarations, TypeDeclaration};
pub use languages::{parser_for_extension, register_parsers, registered_extensions, JavaParser};
pub use traits::{DeclarationParser, ParsedFile};

/// Read and parse one file into declarations.
///
/// Never fails: unreadable files, files without a registered parser and
/// files with syntax errors all yield an empty declaration list.
pub fn declarations_for_file(root: &Path, path: &Path) -> FileDeclarations {
    let rel_path = path
        .strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string();

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let Some(parser) = parser_for_extension(ext) else {
        return FileDeclarations::empty(&rel_path, "unknown");
    };

    let source = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!(file = %rel_path, error = %e, "skipping unreadable file");
            return FileDeclarations::empty(&rel_path, parser.language_id());
        }
    };

    match parser.declarations(path, &source) {
        Ok(declarations) => FileDeclarations {
            path: rel_path,
            language: parser.language_id().to_string(),
            declarations,
        },
        Err(e) => {
            tracing::debug!(file = %rel_path, error = %e, "no declarations from unparseable file");
            FileDeclarations::empty(&rel_path, parser.language_id())
        }
    }
}
