/// Manifest loading: YAML parsing, directory walking and merging.
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::model::Manifest;
use crate::diagnostics::warning::{self, Severity, Warning};

/// Errors raised while reading manifests.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("invalid manifest {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Parse a single YAML manifest.
pub fn parse_manifest(input: &str) -> Result<Manifest, serde_yaml::Error> {
    // An empty document deserializes to unit, not an empty map.
    if input.trim().is_empty() {
        return Ok(Manifest::default());
    }
    serde_yaml::from_str(input)
}

/// Expand files and directories into the list of manifest files to load.
///
/// Files are taken as given. Directories are walked recursively for
/// `.yml`/`.yaml` files, in file-name order.
pub fn collect_manifest_paths(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, ManifestError> {
    let mut paths = Vec::new();
    for input in inputs {
        if !input.is_dir() {
            paths.push(input.clone());
            continue;
        }
        for entry in WalkDir::new(input).sort_by_file_name() {
            let entry = entry.map_err(|source| ManifestError::Walk {
                path: input.clone(),
                source,
            })?;
            if entry.file_type().is_file() && is_manifest_file(entry.path()) {
                paths.push(entry.into_path());
            }
        }
    }
    Ok(paths)
}

fn is_manifest_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yml") | Some("yaml")
    )
}

/// Load and merge manifests in order.
///
/// A later definition of an entity replaces the earlier one in place and is
/// reported as `ENTITY_REDEFINED`.
pub fn load_manifests(
    paths: &[PathBuf],
    warnings: &mut Vec<Warning>,
) -> Result<Manifest, ManifestError> {
    let mut merged = Manifest::default();
    for path in paths {
        let input = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.clone(),
            source,
        })?;
        let manifest = parse_manifest(&input).map_err(|source| ManifestError::Parse {
            path: path.clone(),
            source,
        })?;
        log::debug!(
            "loaded {} entities from {}",
            manifest.entities.len(),
            path.display()
        );
        merge(&mut merged, manifest, path, warnings);
    }
    Ok(merged)
}

fn merge(into: &mut Manifest, from: Manifest, path: &Path, warnings: &mut Vec<Warning>) {
    for (name, entity) in from.entities {
        if into.entities.insert(name.clone(), entity).is_some() {
            warnings.push(
                Warning::new(
                    warning::ENTITY_REDEFINED,
                    Severity::Lossy,
                    format!("entity redefined in {}, earlier definition replaced", path.display()),
                )
                .with_object(&name),
            );
        }
    }
}
