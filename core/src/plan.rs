//! Naming plan: every identifier derived for a manifest.

use serde::Serialize;

use crate::naming::IndexKind;

/// All identifiers derived for a manifest, in manifest order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NamingPlan {
    pub tables: Vec<TablePlan>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub join_tables: Vec<JoinTablePlan>,
}

impl NamingPlan {
    /// Total number of identifiers in the plan.
    pub fn identifier_count(&self) -> usize {
        let tables: usize = self
            .tables
            .iter()
            .map(|t| 1 + t.columns.len() + t.indexes.len())
            .sum();
        // name, two key columns, primary key
        tables + self.join_tables.len() * 4
    }
}

/// Table backing one entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TablePlan {
    pub entity: String,
    pub name: String,
    pub columns: Vec<ColumnPlan>,
    pub indexes: Vec<IndexPlan>,
}

impl TablePlan {
    /// Column derived for `property`, if any.
    pub fn column_for(&self, property: &str) -> Option<&ColumnPlan> {
        self.columns.iter().find(|c| c.property == property)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnPlan {
    pub property: String,
    pub name: String,
    /// Target entity when this is a foreign-key column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub references: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexPlan {
    pub name: String,
    pub kind: IndexKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<String>,
}

/// Pivot table of a many-to-many relation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinTablePlan {
    pub owner: String,
    pub property: String,
    pub target: String,
    pub name: String,
    pub owner_column: String,
    pub target_column: String,
    pub primary_key: String,
}
