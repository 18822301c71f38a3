use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use pgnaming_core::diagnostics::{WarningDestination, report_warnings};
use pgnaming_core::naming::PG_IDENT_MAX;
use pgnaming_core::render::{OutputFormat, render};
use pgnaming_core::{PlanOptions, plan_paths};

#[derive(Parser, Debug)]
#[command(
    name = "pgnaming",
    about = "Derive PostgreSQL-safe table, column and join names"
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Derive every identifier for one or more entity manifests
    Plan {
        /// Manifest files or directories of *.yml/*.yaml files
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Plan output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Fail on names that need quoting and on collisions instead of warning
        #[arg(long)]
        strict: bool,

        /// Warning output destination: file path or "stderr" (default: stderr)
        #[arg(long)]
        emit_warnings: Option<String>,

        /// Longest identifier accepted, in bytes
        #[arg(long, default_value_t = PG_IDENT_MAX)]
        max_identifier_length: usize,
    },

    /// Derive a single identifier
    Name {
        /// Which naming operation to run
        #[arg(value_enum)]
        kind: NameKind,

        /// Operation inputs (e.g. `join-table <source> <target> <property>`)
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Longest identifier accepted, in bytes
        #[arg(long, default_value_t = PG_IDENT_MAX)]
        max_identifier_length: usize,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Text,
    Yaml,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => OutputFormat::Text,
            Format::Yaml => OutputFormat::Yaml,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum NameKind {
    /// <class>
    Table,
    /// <property>
    Column,
    /// <property>
    JoinColumn,
    /// <entity> [referenced-column]
    JoinKey,
    /// <source-entity> <target-entity> <property>
    JoinTable,
}

impl NameKind {
    fn arity(&self) -> (usize, usize) {
        match self {
            NameKind::Table | NameKind::Column | NameKind::JoinColumn => (1, 1),
            NameKind::JoinKey => (1, 2),
            NameKind::JoinTable => (3, 3),
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    colored::control::set_override(std::io::stderr().is_terminal());

    let cli = Cli::parse();
    match cli.command {
        Command::Plan {
            input,
            output,
            format,
            strict,
            emit_warnings,
            max_identifier_length,
        } => run_plan(
            &input,
            output,
            format,
            PlanOptions {
                max_identifier_length,
                strict,
                emit_warnings: emit_warnings.as_ref().map(PathBuf::from),
            },
        ),
        Command::Name {
            kind,
            inputs,
            max_identifier_length,
        } => {
            let name = derive_name(kind, &inputs, max_identifier_length)?;
            println!("{name}");
            Ok(())
        }
    }
}

fn run_plan(
    input: &[PathBuf],
    output: Option<PathBuf>,
    format: Format,
    opts: PlanOptions,
) -> Result<()> {
    // Plan
    let result = plan_paths(input, &opts).context("Naming failed")?;

    // Output warnings
    let warn_dest = WarningDestination::from_option(opts.emit_warnings.as_deref());
    report_warnings(&result.warnings, &warn_dest).context("Failed to write warnings")?;

    // Write output
    let rendered = render(&result.plan, format.into()).context("Failed to render plan")?;
    match &output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
        }
        None => {
            print!("{rendered}");
        }
    }

    Ok(())
}

fn derive_name(kind: NameKind, inputs: &[String], max_identifier_length: usize) -> Result<String> {
    let (min, max) = kind.arity();
    if inputs.len() < min || inputs.len() > max {
        anyhow::bail!(
            "{kind:?} takes {} input(s), got {}",
            if min == max {
                min.to_string()
            } else {
                format!("{min}-{max}")
            },
            inputs.len()
        );
    }

    let strategy = PlanOptions {
        max_identifier_length,
        ..Default::default()
    }
    .strategy();

    let name = match kind {
        NameKind::Table => strategy.class_to_table_name(&inputs[0]),
        NameKind::Column => strategy.property_to_column_name(&inputs[0]),
        NameKind::JoinColumn => strategy.join_column_name(&inputs[0]),
        NameKind::JoinKey => {
            strategy.join_key_column_name(&inputs[0], inputs.get(1).map(String::as_str))
        }
        NameKind::JoinTable => strategy.join_table_name(&inputs[0], &inputs[1], &inputs[2]),
    };
    Ok(name?)
}
