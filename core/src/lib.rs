//! pgnaming-core: PostgreSQL identifier naming strategy.
//!
//! [`naming::PgNamingStrategy`] turns entity and property names into
//! underscore-case identifiers, escapes reserved key words in table and column
//! names, and rejects identifiers longer than PostgreSQL's 63-byte limit. The
//! rest of the crate runs the strategy over YAML entity manifests.

pub mod diagnostics;
pub mod manifest;
pub mod naming;
pub mod plan;
pub mod render;
pub mod transform;

use std::path::PathBuf;

use diagnostics::warning::Warning;
use diagnostics::{StrictViolation, check_strict};
use manifest::{Manifest, ManifestError};
use naming::{IdentifierTooLong, PG_IDENT_MAX, PgNamingStrategy};
use plan::NamingPlan;

/// Options for planning a manifest.
#[derive(Debug, Clone)]
pub struct PlanOptions {
    /// Longest identifier accepted, in bytes (default: 63).
    pub max_identifier_length: usize,
    /// If true, fail on lossy names and collisions instead of emitting warnings.
    pub strict: bool,
    /// Path for warning output (None = stderr).
    pub emit_warnings: Option<PathBuf>,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            max_identifier_length: PG_IDENT_MAX,
            strict: false,
            emit_warnings: None,
        }
    }
}

impl PlanOptions {
    pub fn strategy(&self) -> PgNamingStrategy {
        PgNamingStrategy::default().with_max_identifier_length(self.max_identifier_length)
    }
}

/// Result of a successful planning run.
#[derive(Debug)]
pub struct PlanResult {
    /// Every identifier derived for the manifest.
    pub plan: NamingPlan,
    /// Warnings emitted while loading and planning.
    pub warnings: Vec<Warning>,
}

/// Errors that can occur during planning.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("Identifier too long: {0}")]
    IdentifierTooLong(#[from] IdentifierTooLong),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("Invalid manifest: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Strict mode violation:\n{0}")]
    StrictViolation(#[from] StrictViolation),
}

/// Derive every identifier for a parsed manifest.
///
/// This is the primary public API for the library.
pub fn plan_manifest(manifest: &Manifest, opts: &PlanOptions) -> Result<PlanResult, PlanError> {
    plan_with_warnings(manifest, opts, Vec::new())
}

/// Parse a YAML manifest and derive its identifiers.
pub fn plan_yaml(input: &str, opts: &PlanOptions) -> Result<PlanResult, PlanError> {
    let manifest = manifest::parse_manifest(input)?;
    plan_manifest(&manifest, opts)
}

/// Load manifests from files and directories, merge them, and derive identifiers.
pub fn plan_paths(inputs: &[PathBuf], opts: &PlanOptions) -> Result<PlanResult, PlanError> {
    let mut warnings = Vec::new();
    let paths = manifest::collect_manifest_paths(inputs)?;
    let manifest = manifest::load_manifests(&paths, &mut warnings)?;
    plan_with_warnings(&manifest, opts, warnings)
}

fn plan_with_warnings(
    manifest: &Manifest,
    opts: &PlanOptions,
    mut warnings: Vec<Warning>,
) -> Result<PlanResult, PlanError> {
    // 1. Derive names; the first over-long identifier aborts
    let plan = transform::planner::plan(manifest, &opts.strategy(), &mut warnings)?;

    // 2. Detect collisions
    transform::name_resolve::detect_collisions(&plan, &mut warnings);

    // 3. Check strict mode
    if opts.strict {
        check_strict(&warnings)?;
    }

    Ok(PlanResult { plan, warnings })
}
