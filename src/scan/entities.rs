//! Persistent-entity extraction.

use super::patterns::{extract_literal, CLASS_DECLARATION, ENTITY_MARKER, TABLE_MARKER};
use super::EntityInfo;

/// The entity declared in one source file, if the file carries the entity
/// marker anywhere.
///
/// The name is the first `public class` declaration, or `fallback_name`
/// (normally the file stem) when there is none. The table name comes from
/// the first `@Table(...)` marker, wherever it sits on its line, and is
/// empty without one.
pub fn scan_entity(text: &str, fallback_name: &str) -> Option<EntityInfo> {
    if !text.lines().any(|l| ENTITY_MARKER.is_match(l)) {
        return None;
    }

    let mut name = None;
    let mut table_name = None;

    for line in text.lines().map(str::trim) {
        if table_name.is_none() {
            if let Some(at) = line.find(TABLE_MARKER) {
                table_name = Some(extract_literal(&line[at..]));
            }
        }
        if name.is_none() {
            name = CLASS_DECLARATION.captures(line).map(|c| c[1].to_string());
        }
        if name.is_some() && table_name.is_some() {
            break;
        }
    }

    Some(EntityInfo {
        name: name.unwrap_or_else(|| fallback_name.to_string()),
        table_name: table_name.unwrap_or_default(),
    })
}
