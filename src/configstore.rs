//! Config-store discovery.
//!
//! ArcGIS Server keeps its service definitions under a fixed subpath of one
//! of the machine's volumes. When the operator does not pass an explicit
//! path, each local volume root is probed for that subpath and the first hit
//! wins.

use std::path::PathBuf;

/// Canonical location of the config store below a volume root.
const CONFIG_SUBPATH: [&str; 4] = ["arcgisserver", "directories", "arcgissystem", "arcgisinput"];

/// Locate the ArcGIS Server config store by probing local volumes.
pub fn find_config_store() -> Option<PathBuf> {
    volume_roots()
        .into_iter()
        .map(config_path)
        .find(|path| path.is_dir())
}

fn config_path(root: PathBuf) -> PathBuf {
    CONFIG_SUBPATH
        .iter()
        .fold(root, |path, piece| path.join(piece))
}

#[cfg(windows)]
fn volume_roots() -> Vec<PathBuf> {
    (b'A'..=b'Z')
        .map(|letter| PathBuf::from(format!("{}:\\", letter as char)))
        .collect()
}

#[cfg(not(windows))]
fn volume_roots() -> Vec<PathBuf> {
    let mut roots = vec![PathBuf::from("/")];
    for base in ["/mnt", "/media", "/Volumes"] {
        if let Ok(entries) = std::fs::read_dir(base) {
            roots.extend(entries.filter_map(|e| e.ok()).map(|e| e.path()));
        }
    }
    roots
}
