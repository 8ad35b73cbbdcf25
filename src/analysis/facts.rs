//! Declaration facts extracted from source files.

use std::fmt;

/// Kind of type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

impl DeclarationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationKind::Class => "class",
            DeclarationKind::Interface => "interface",
            DeclarationKind::Enum => "enum",
            DeclarationKind::Record => "record",
            DeclarationKind::Annotation => "annotation",
        }
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A field declared directly in a type body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: String,
    /// The type exactly as written, e.g. `List<Order>` or `com.shop.User`.
    pub declared_type: String,
}

/// A type declaration with the structural facts the graph needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclaration {
    pub name: String,
    pub kind: DeclarationKind,
    /// Simple names of the markers (annotations) on the declaration.
    pub markers: Vec<String>,
    pub fields: Vec<FieldDecl>,
    /// Supertypes and implemented interfaces, as written.
    pub super_types: Vec<String>,
    /// 1-indexed line of the declaration.
    pub line: usize,
}

impl TypeDeclaration {
    pub fn has_marker(&self, marker: &str) -> bool {
        self.markers.iter().any(|m| m == marker)
    }
}

/// All declarations found in a single file.
#[derive(Debug, Clone)]
pub struct FileDeclarations {
    /// File path, relative to the project root when known.
    pub path: String,
    pub language: String,
    pub declarations: Vec<TypeDeclaration>,
}

impl FileDeclarations {
    /// Facts for a file that yielded nothing (unreadable or unparseable).
    pub fn empty(path: &str, language: &str) -> Self {
        Self {
            path: path.to_string(),
            language: language.to_string(),
            declarations: Vec::new(),
        }
    }

    pub fn find(&self, name: &str) -> Option<&TypeDeclaration> {
        self.declarations.iter().find(|d| d.name == name)
    }
}
