//! Plan output: tab-separated listing or YAML.

use crate::plan::NamingPlan;

/// Output format for a rendered plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One `kind<TAB>source<TAB>identifier` line per identifier.
    #[default]
    Text,
    Yaml,
}

pub fn render(plan: &NamingPlan, format: OutputFormat) -> Result<String, serde_yaml::Error> {
    match format {
        OutputFormat::Text => Ok(render_text(plan)),
        OutputFormat::Yaml => serde_yaml::to_string(plan),
    }
}

fn render_text(plan: &NamingPlan) -> String {
    let mut out = String::new();

    for table in &plan.tables {
        line(&mut out, "table", &table.entity, &table.name);
        for col in &table.columns {
            let kind = if col.references.is_some() {
                "join_column"
            } else {
                "column"
            };
            line(
                &mut out,
                kind,
                &format!("{}.{}", table.entity, col.property),
                &col.name,
            );
        }
        for index in &table.indexes {
            line(&mut out, "index", &table.entity, &index.name);
        }
    }

    for jt in &plan.join_tables {
        let source = format!("{}.{}", jt.owner, jt.property);
        line(&mut out, "join_table", &source, &jt.name);
        line(&mut out, "join_key", &source, &jt.owner_column);
        line(&mut out, "join_key", &source, &jt.target_column);
        line(&mut out, "index", &source, &jt.primary_key);
    }

    out
}

fn line(out: &mut String, kind: &str, source: &str, identifier: &str) {
    out.push_str(&format!("{kind}\t{source}\t{identifier}\n"));
}
