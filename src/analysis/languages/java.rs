//! Java declaration parser using tree-sitter.

use std::collections::HashSet;
use std::path::Path;

use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Node, Parser, Query, QueryCursor};

use crate::analysis::{
    DeclarationKind, DeclarationParser, FieldDecl, ParsedFile, TypeDeclaration,
};

/// Type declarations at any nesting depth.
const DECLARATION_QUERY: &str = r#"
; Class declarations
(class_declaration
  name: (identifier) @class_name
) @class

; Interface declarations
(interface_declaration
  name: (identifier) @interface_name
) @interface

; Enum declarations
(enum_declaration
  name: (identifier) @enum_name
) @enum

; Record declarations
(record_declaration
  name: (identifier) @record_name
) @record

; Annotation type declarations
(annotation_type_declaration
  name: (identifier) @annotation_name
) @annotation
"#;

/// Declaration children that list supertypes.
const SUPERTYPE_CLAUSES: &[&str] = &["superclass", "super_interfaces", "extends_interfaces"];

pub struct JavaParser {
    language: Language,
}

impl JavaParser {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_java::LANGUAGE.into(),
        }
    }

    fn create_parser(&self) -> anyhow::Result<Parser> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;
        Ok(parser)
    }

    fn declaration_at(
        &self,
        parsed: &ParsedFile,
        node: Node,
        name: String,
        kind: DeclarationKind,
    ) -> TypeDeclaration {
        TypeDeclaration {
            name,
            kind,
            markers: markers(parsed, node),
            fields: fields(parsed, node),
            super_types: super_types(parsed, node),
            line: node.start_position().row + 1,
        }
    }
}

impl Default for JavaParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Simple names of the annotations in a declaration's modifiers.
fn markers(parsed: &ParsedFile, decl: Node) -> Vec<String> {
    let mut cursor = decl.walk();
    let Some(modifiers) = decl.children(&mut cursor).find(|n| n.kind() == "modifiers") else {
        return Vec::new();
    };

    let mut cursor = modifiers.walk();
    modifiers
        .children(&mut cursor)
        .filter(|n| matches!(n.kind(), "marker_annotation" | "annotation"))
        .filter_map(|n| n.child_by_field_name("name"))
        .map(|n| {
            let text = parsed.node_text(n);
            text.rsplit('.').next().unwrap_or(text).to_string()
        })
        .collect()
}

/// Record components followed by the fields declared directly in the body.
fn fields(parsed: &ParsedFile, decl: Node) -> Vec<FieldDecl> {
    let mut out = record_components(parsed, decl);

    let Some(body) = decl.child_by_field_name("body") else {
        return out;
    };

    let mut members = Vec::new();
    let mut cursor = body.walk();
    for child in body.named_children(&mut cursor) {
        match child.kind() {
            "field_declaration" | "constant_declaration" => members.push(child),
            // enum constants come first, regular members live in this node
            "enum_body_declarations" => {
                let mut inner = child.walk();
                members.extend(
                    child
                        .named_children(&mut inner)
                        .filter(|n| n.kind() == "field_declaration"),
                );
            }
            _ => {}
        }
    }

    out.extend(members.into_iter().flat_map(|member| field_decls(parsed, member)));
    out
}

/// `record Point(int x, int y)` declares the fields `x` and `y`.
fn record_components(parsed: &ParsedFile, decl: Node) -> Vec<FieldDecl> {
    let Some(params) = decl.child_by_field_name("parameters") else {
        return Vec::new();
    };

    let mut cursor = params.walk();
    params
        .named_children(&mut cursor)
        .filter(|n| n.kind() == "formal_parameter")
        .filter_map(|p| {
            let ty = p.child_by_field_name("type")?;
            let name = p.child_by_field_name("name")?;
            Some(FieldDecl {
                name: parsed.node_text(name).to_string(),
                declared_type: parsed.node_text(ty).to_string(),
            })
        })
        .collect()
}

/// One `FieldDecl` per declarator: `User a, b;` declares two fields.
fn field_decls(parsed: &ParsedFile, member: Node) -> Vec<FieldDecl> {
    let Some(ty) = member.child_by_field_name("type") else {
        return Vec::new();
    };
    let declared_type = parsed.node_text(ty).to_string();

    let mut cursor = member.walk();
    member
        .children_by_field_name("declarator", &mut cursor)
        .filter_map(|d| d.child_by_field_name("name"))
        .map(|n| FieldDecl {
            name: parsed.node_text(n).to_string(),
            declared_type: declared_type.clone(),
        })
        .collect()
}

/// Supertype text from `extends` and `implements` clauses.
fn super_types(parsed: &ParsedFile, decl: Node) -> Vec<String> {
    let mut out = Vec::new();
    let mut cursor = decl.walk();

    for clause in decl
        .children(&mut cursor)
        .filter(|n| SUPERTYPE_CLAUSES.contains(&n.kind()))
    {
        let mut inner = clause.walk();
        for child in clause.named_children(&mut inner) {
            if child.kind().ends_with("comment") {
                continue;
            }
            if child.kind() == "type_list" {
                let mut list = child.walk();
                out.extend(
                    child
                        .named_children(&mut list)
                        .filter(|t| !t.kind().ends_with("comment"))
                        .map(|t| parsed.node_text(t).to_string()),
                );
            } else {
                out.push(parsed.node_text(child).to_string());
            }
        }
    }

    out
}

impl DeclarationParser for JavaParser {
    fn language_id(&self) -> &'static str {
        "java"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["java"]
    }

    fn parse(&self, path: &Path, source: &[u8]) -> anyhow::Result<ParsedFile> {
        let mut parser = self.create_parser()?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| anyhow::anyhow!("failed to parse Java source: {}", path.display()))?;

        Ok(ParsedFile {
            tree,
            source: source.to_vec(),
            path: path.to_string_lossy().to_string(),
        })
    }

    fn extract_declarations(&self, parsed: &ParsedFile) -> anyhow::Result<Vec<TypeDeclaration>> {
        // tree-sitter recovers from anything; a strict parser would not.
        if parsed.has_errors() {
            anyhow::bail!("syntax errors in {}", parsed.path);
        }

        let query = Query::new(&self.language, DECLARATION_QUERY)?;
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, parsed.tree.root_node(), &parsed.source[..]);

        let mut declarations = Vec::new();
        let mut seen_positions = HashSet::new();

        while let Some(m) = matches.next() {
            let mut name_node = None;
            let mut kind = DeclarationKind::Class;
            let mut decl_node = None;

            for capture in m.captures {
                let capture_name = query.capture_names()[capture.index as usize];
                match capture_name {
                    "class_name" => {
                        name_node = Some(capture.node);
                        kind = DeclarationKind::Class;
                    }
                    "interface_name" => {
                        name_node = Some(capture.node);
                        kind = DeclarationKind::Interface;
                    }
                    "enum_name" => {
                        name_node = Some(capture.node);
                        kind = DeclarationKind::Enum;
                    }
                    "record_name" => {
                        name_node = Some(capture.node);
                        kind = DeclarationKind::Record;
                    }
                    "annotation_name" => {
                        name_node = Some(capture.node);
                        kind = DeclarationKind::Annotation;
                    }
                    "class" | "interface" | "enum" | "record" | "annotation" => {
                        decl_node = Some(capture.node);
                    }
                    _ => {}
                }
            }

            if let (Some(name_node), Some(node)) = (name_node, decl_node) {
                if !seen_positions.insert(node.start_byte()) {
                    continue;
                }
                let name = parsed.node_text(name_node).to_string();
                declarations.push((
                    node.start_byte(),
                    self.declaration_at(parsed, node, name, kind),
                ));
            }
        }

        declarations.sort_by_key(|(start, _)| *start);
        Ok(declarations.into_iter().map(|(_, d)| d).collect())
    }
}
