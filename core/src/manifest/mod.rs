pub mod loader;
pub mod model;

pub use loader::{ManifestError, collect_manifest_paths, load_manifests, parse_manifest};
pub use model::{EntityDef, IndexDef, Manifest, RelationDef, RelationKind};
