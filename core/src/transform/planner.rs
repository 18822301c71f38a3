/// Planner: derive every table, column, join and index name a manifest needs.
use crate::diagnostics::warning::{self, Severity, Warning};
use crate::manifest::{EntityDef, Manifest, RelationDef, RelationKind};
use crate::naming::{
    IdentifierTooLong, IndexKind, NamingConvention, PgNamingStrategy, is_reserved,
};
use crate::plan::{ColumnPlan, IndexPlan, JoinTablePlan, NamingPlan, TablePlan};

/// Run the naming strategy over every entity of the manifest.
///
/// The first identifier that exceeds the length limit aborts the whole plan.
pub fn plan<C: NamingConvention>(
    manifest: &Manifest,
    strategy: &PgNamingStrategy<C>,
    warnings: &mut Vec<Warning>,
) -> Result<NamingPlan, IdentifierTooLong> {
    let mut plan = NamingPlan::default();

    for (entity_name, entity) in &manifest.entities {
        let mut ctx = EntityPlanner {
            manifest,
            strategy,
            warnings: &mut *warnings,
            entity_name,
            entity,
        };
        let table = ctx.plan_table()?;
        let join_tables = ctx.plan_join_tables()?;
        plan.tables.push(table);
        plan.join_tables.extend(join_tables);
    }

    log::info!(
        "planned {} table(s), {} join table(s), {} identifier(s)",
        plan.tables.len(),
        plan.join_tables.len(),
        plan.identifier_count()
    );
    Ok(plan)
}

struct EntityPlanner<'a, C> {
    manifest: &'a Manifest,
    strategy: &'a PgNamingStrategy<C>,
    warnings: &'a mut Vec<Warning>,
    entity_name: &'a str,
    entity: &'a EntityDef,
}

impl<C: NamingConvention> EntityPlanner<'_, C> {
    fn plan_table(&mut self) -> Result<TablePlan, IdentifierTooLong> {
        let name = self.strategy.class_to_table_name(self.entity_name)?;
        let base = self.strategy.convention().class_to_table_name(self.entity_name);
        if name != base {
            self.warnings.push(
                Warning::new(
                    warning::RESERVED_ESCAPED,
                    Severity::Info,
                    format!("table '{base}' is a reserved word, renamed to '{name}'"),
                )
                .with_object(self.entity_name),
            );
        }

        let mut table = TablePlan {
            entity: self.entity_name.to_string(),
            name,
            columns: Vec::new(),
            indexes: Vec::new(),
        };

        let entity = self.entity;
        for property in &entity.properties {
            let column = self.strategy.property_to_column_name(property)?;
            let base = self.strategy.convention().property_to_column_name(property);
            if column != base {
                let w = Warning::new(
                    warning::RESERVED_ESCAPED,
                    Severity::Info,
                    format!("column '{base}' is a reserved word, renamed to '{column}'"),
                )
                .with_object(self.object(property));
                self.warnings.push(w);
            }
            table.columns.push(ColumnPlan {
                property: property.clone(),
                name: column,
                references: None,
            });
        }

        table.indexes.push(IndexPlan {
            name: self
                .strategy
                .index_name(&table.name, &[], IndexKind::Primary)?,
            kind: IndexKind::Primary,
            columns: Vec::new(),
        });

        for relation in &entity.relations {
            self.check_target(relation);
            if !relation.kind.owns_join_column() {
                continue;
            }

            let column = self.strategy.join_column_name(&relation.property)?;
            self.check_join_name(&relation.property, "join column", &column);
            let index = self
                .strategy
                .index_name(&table.name, &[column.as_str()], IndexKind::Foreign)?;
            table.indexes.push(IndexPlan {
                name: index,
                kind: IndexKind::Foreign,
                columns: vec![column.clone()],
            });
            table.columns.push(ColumnPlan {
                property: relation.property.clone(),
                name: column,
                references: Some(relation.target.clone()),
            });
        }

        for index in &entity.indexes {
            let mut columns = Vec::with_capacity(index.properties.len());
            for property in &index.properties {
                columns.push(self.index_column(&table, property)?);
            }
            let kind = if index.unique {
                IndexKind::Unique
            } else {
                IndexKind::Index
            };
            let refs: Vec<&str> = columns.iter().map(String::as_str).collect();
            let name = self.strategy.index_name(&table.name, &refs, kind)?;
            table.indexes.push(IndexPlan {
                name,
                kind,
                columns,
            });
        }

        Ok(table)
    }

    fn plan_join_tables(&mut self) -> Result<Vec<JoinTablePlan>, IdentifierTooLong> {
        let entity = self.entity;
        let mut join_tables = Vec::new();
        for relation in &entity.relations {
            if relation.kind != RelationKind::ManyToMany {
                continue;
            }
            let referenced = relation.referenced_column.as_deref();

            let name = self.strategy.join_table_name(
                self.entity_name,
                &relation.target,
                &relation.property,
            )?;
            let owner_column = self
                .strategy
                .join_key_column_name(self.entity_name, referenced)?;
            let target_column = self
                .strategy
                .join_key_column_name(&relation.target, referenced)?;
            let primary_key = self.strategy.index_name(&name, &[], IndexKind::Primary)?;

            self.check_join_name(&relation.property, "join table", &name);
            self.check_join_name(&relation.property, "join key column", &owner_column);
            self.check_join_name(&relation.property, "join key column", &target_column);

            join_tables.push(JoinTablePlan {
                owner: self.entity_name.to_string(),
                property: relation.property.clone(),
                target: relation.target.clone(),
                name,
                owner_column,
                target_column,
                primary_key,
            });
        }
        Ok(join_tables)
    }

    /// Resolve an indexed property to its column: scalar and join columns
    /// already planned take precedence.
    fn index_column(
        &mut self,
        table: &TablePlan,
        property: &str,
    ) -> Result<String, IdentifierTooLong> {
        if let Some(column) = table.column_for(property) {
            return Ok(column.name.clone());
        }
        let w = Warning::new(
            warning::UNKNOWN_INDEX_PROPERTY,
            Severity::Lossy,
            format!("indexed property '{property}' is not declared on the entity"),
        )
        .with_object(self.object(property));
        self.warnings.push(w);
        self.strategy.property_to_column_name(property)
    }

    fn check_target(&mut self, relation: &RelationDef) {
        if !self.manifest.entities.contains_key(&relation.target) {
            let w = Warning::new(
                warning::TARGET_MISSING,
                Severity::Lossy,
                format!("relation target '{}' is not in the manifest", relation.target),
            )
            .with_object(self.object(&relation.property));
            self.warnings.push(w);
        }
    }

    /// Join names are never escaped; flag the ones that need quoting.
    fn check_join_name(&mut self, property: &str, what: &str, name: &str) {
        if is_reserved(name) {
            let w = Warning::new(
                warning::JOIN_NAME_RESERVED,
                Severity::Lossy,
                format!("{what} '{name}' is a reserved word and must be quoted"),
            )
            .with_object(self.object(property));
            self.warnings.push(w);
        }
    }

    fn object(&self, property: &str) -> String {
        format!("{}.{}", self.entity_name, property)
    }
}
