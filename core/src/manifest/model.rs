/// Entity manifest types: the ORM metadata the naming strategy is run against.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A set of entities, keyed by class name in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub entities: IndexMap<String, EntityDef>,
}

/// One entity class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntityDef {
    /// Scalar properties, each mapped to a column.
    #[serde(default)]
    pub properties: Vec<String>,
    #[serde(default)]
    pub relations: Vec<RelationDef>,
    #[serde(default)]
    pub indexes: Vec<IndexDef>,
}

/// A relation property pointing at another entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelationDef {
    pub property: String,
    pub target: String,
    pub kind: RelationKind,
    /// Column referenced on the target; defaults to the convention's reference column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referenced_column: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    ManyToOne,
    OneToOne,
    OneToMany,
    ManyToMany,
}

impl RelationKind {
    /// Whether this side of the relation stores a foreign-key column.
    pub fn owns_join_column(&self) -> bool {
        matches!(self, RelationKind::ManyToOne | RelationKind::OneToOne)
    }
}

/// A secondary index over one or more properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexDef {
    pub properties: Vec<String>,
    #[serde(default)]
    pub unique: bool,
}
