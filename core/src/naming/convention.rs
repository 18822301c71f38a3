//! Base naming conventions the PostgreSQL strategy is layered on.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static CAMEL_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])([A-Z])").expect("valid regex"));

/// Convert a PascalCase/camelCase name to snake_case.
///
/// An underscore is inserted between every lowercase letter followed by an
/// uppercase letter, then the whole name is lowercased. Runs of capitals are
/// not split (`HTTPServer` becomes `httpserver`).
pub fn underscore(name: &str) -> String {
    CAMEL_BOUNDARY
        .replace_all(name, "${1}_${2}")
        .to_lowercase()
}

/// Kind of index or constraint an index name is derived for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexKind {
    Primary,
    Unique,
    Index,
    Foreign,
    Sequence,
    Check,
}

impl IndexKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexKind::Primary => "primary",
            IndexKind::Unique => "unique",
            IndexKind::Index => "index",
            IndexKind::Foreign => "foreign",
            IndexKind::Sequence => "sequence",
            IndexKind::Check => "check",
        }
    }

    /// Suffix appended to derived index names.
    pub fn suffix(&self) -> &'static str {
        match self {
            IndexKind::Primary => "pkey",
            IndexKind::Unique => "unique",
            IndexKind::Index => "index",
            IndexKind::Foreign => "foreign",
            IndexKind::Sequence => "seq",
            IndexKind::Check => "check",
        }
    }
}

impl std::fmt::Display for IndexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A naming convention maps entity and property names onto database names.
///
/// Only the casing hooks are required; the join and index derivations are
/// built from them and can be overridden individually.
pub trait NamingConvention {
    /// Table name for an entity class.
    fn class_to_table_name(&self, class_name: &str) -> String;

    /// Column name for a scalar property.
    fn property_to_column_name(&self, property_name: &str) -> String;

    /// Column referenced by foreign keys when none is given.
    fn reference_column_name(&self) -> String {
        "id".to_string()
    }

    /// Foreign-key column on the owning side of a to-one relation.
    fn join_column_name(&self, property_name: &str) -> String {
        format!(
            "{}_{}",
            self.property_to_column_name(property_name),
            self.reference_column_name()
        )
    }

    /// Column of a pivot table pointing back at `entity_name`.
    fn join_key_column_name(
        &self,
        entity_name: &str,
        referenced_column_name: Option<&str>,
    ) -> String {
        let referenced = match referenced_column_name {
            Some(col) if !col.is_empty() => col.to_string(),
            _ => self.reference_column_name(),
        };
        let table = self.class_to_table_name(entity_name);
        format!("{}_{}", strip_schema(&table), referenced)
    }

    /// Pivot table of a many-to-many relation. The target entity is not
    /// part of the name.
    fn join_table_name(
        &self,
        source_entity: &str,
        _target_entity: &str,
        property_name: &str,
    ) -> String {
        format!(
            "{}_{}",
            self.class_to_table_name(source_entity),
            self.class_to_table_name(property_name)
        )
    }

    /// Index or constraint name for `table_name`.
    fn index_name(&self, table_name: &str, columns: &[&str], kind: IndexKind) -> String {
        let table = strip_schema(table_name);

        if kind == IndexKind::Primary {
            return format!("{table}_{}", kind.suffix());
        }

        let columns: Vec<String> = columns.iter().map(|c| c.replace('.', "_")).collect();
        if columns.is_empty() {
            format!("{table}_{}", kind.suffix())
        } else {
            format!("{table}_{}_{}", columns.join("_"), kind.suffix())
        }
    }
}

/// Drop a `schema.` prefix from a table name.
fn strip_schema(table_name: &str) -> &str {
    match table_name.split_once('.') {
        Some((_schema, name)) => name,
        None => table_name,
    }
}

/// Underscore-case convention: `UserOrder` → `user_order`, `createdAt` → `created_at`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnderscoreConvention;

impl NamingConvention for UnderscoreConvention {
    fn class_to_table_name(&self, class_name: &str) -> String {
        underscore(class_name)
    }

    fn property_to_column_name(&self, property_name: &str) -> String {
        underscore(property_name)
    }
}
