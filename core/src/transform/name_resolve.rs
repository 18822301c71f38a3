/// Name collision detection across the derived plan.
use std::collections::HashMap;

use crate::diagnostics::warning::{self, Severity, Warning};
use crate::plan::NamingPlan;

/// Report identifiers that would clash in the generated DDL.
///
/// Tables, join tables and indexes share one namespace per schema in
/// PostgreSQL, so they are checked together. Columns are checked per table.
pub fn detect_collisions(plan: &NamingPlan, warnings: &mut Vec<Warning>) {
    // relation name -> objects that derived it, in plan order
    let mut relations: HashMap<&str, Vec<String>> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for table in &plan.tables {
        push(&mut relations, &mut order, &table.name, format!("table of {}", table.entity));
        for index in &table.indexes {
            push(
                &mut relations,
                &mut order,
                &index.name,
                format!("{} index of {}", index.kind.as_str(), table.entity),
            );
        }
    }
    for jt in &plan.join_tables {
        let source = format!("{}.{}", jt.owner, jt.property);
        push(&mut relations, &mut order, &jt.name, format!("join table of {source}"));
        push(
            &mut relations,
            &mut order,
            &jt.primary_key,
            format!("primary key of {source}"),
        );
    }

    for name in order {
        let owners = &relations[name];
        if owners.len() > 1 {
            warnings.push(
                Warning::new(
                    warning::NAME_COLLISION,
                    Severity::Error,
                    format!("relation name '{name}' used by: {}", owners.join(", ")),
                )
                .with_object(name),
            );
        }
    }

    for table in &plan.tables {
        let mut columns: HashMap<&str, Vec<&str>> = HashMap::new();
        let mut order: Vec<&str> = Vec::new();
        for col in &table.columns {
            let owners = columns.entry(col.name.as_str()).or_default();
            if owners.is_empty() {
                order.push(col.name.as_str());
            }
            owners.push(col.property.as_str());
        }
        for name in order {
            let owners = &columns[name];
            if owners.len() > 1 {
                warnings.push(
                    Warning::new(
                        warning::NAME_COLLISION,
                        Severity::Error,
                        format!(
                            "column '{name}' derived from properties: {}",
                            owners.join(", ")
                        ),
                    )
                    .with_object(&table.entity),
                );
            }
        }
    }

    for jt in &plan.join_tables {
        if jt.owner_column == jt.target_column {
            warnings.push(
                Warning::new(
                    warning::NAME_COLLISION,
                    Severity::Error,
                    format!(
                        "join table '{}' uses '{}' for both sides",
                        jt.name, jt.owner_column
                    ),
                )
                .with_object(format!("{}.{}", jt.owner, jt.property)),
            );
        }
    }
}

fn push<'a>(
    relations: &mut HashMap<&'a str, Vec<String>>,
    order: &mut Vec<&'a str>,
    name: &'a str,
    object: String,
) {
    let owners = relations.entry(name).or_default();
    if owners.is_empty() {
        order.push(name);
    }
    owners.push(object);
}
