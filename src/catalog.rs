//! Catalog construction.
//!
//! Walks the config store and turns every readable `manifest.json` into a
//! `MapService`. One bad manifest never aborts the scan: unsupported
//! manifests are skipped silently, unreadable or malformed ones are reported
//! on stderr and skipped.

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::manifest::{self, ManifestOutcome};
use crate::service::MapService;

/// Canonical file name of a service manifest.
const MANIFEST_NAME: &str = "manifest.json";

/// Build the full service catalog for the tree rooted at `root`.
///
/// Directory entries are visited in file-name order, so the catalog order is
/// deterministic for a given tree.
pub fn build_catalog(root: &Path) -> Vec<MapService> {
    let mut services = Vec::new();
    let walker = WalkDir::new(root).sort_by_file_name();
    for entry in walker.into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() || entry.file_name() != OsStr::new(MANIFEST_NAME) {
            continue;
        }
        let raw = match fs::read_to_string(entry.path()) {
            Ok(raw) => raw,
            Err(err) => {
                eprintln!("warning: {}: {}", entry.path().display(), err);
                continue;
            }
        };
        match manifest::parse_manifest(&raw) {
            Ok(ManifestOutcome::Service(service)) => services.push(service),
            Ok(ManifestOutcome::Unsupported) => {}
            Err(err) => eprintln!("warning: {}: {}", entry.path().display(), err),
        }
    }
    services
}
