//! Manifest parsing.
//!
//! Every published service keeps a `manifest.json` under the server's config
//! store describing the source document, the server-side path of the service
//! definition, and the data sources the service reads from. Only the fields
//! the catalog needs are deserialized.

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

use crate::service::MapService;

/// Path segment substring identifying a map-rendering service definition.
const SERVICE_MARKER: &str = "MapServer";

/// Path segment marking the root of the config store inside a server path.
const INPUT_ROOT: &str = "arcgisinput";

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("invalid manifest JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("manifest has no resources")]
    NoResources,
    #[error("manifest lists no databases")]
    NoDatabases,
    #[error("server path has no arcgisinput segment")]
    NoAnchor,
    #[error("connection string has no {0} key")]
    MissingKey(&'static str),
}

/// Result of parsing one manifest.
#[derive(Debug)]
pub enum ManifestOutcome {
    /// The manifest describes a map service.
    Service(MapService),
    /// The manifest describes some other service type; skipped.
    Unsupported,
}

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    resources: Vec<Resource>,
    #[serde(default)]
    databases: Vec<DatabaseSource>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Resource {
    on_premise_path: String,
    server_path: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DatabaseSource {
    on_premise_connection_string: String,
    #[serde(default)]
    datasets: Vec<Dataset>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Dataset {
    on_server_name: String,
}

/// Parse the raw content of one `manifest.json`.
///
/// A manifest whose server path does not contain exactly one `MapServer`
/// segment is `Unsupported`, which is expected and not an error. Errors mean
/// the manifest could not be read as a service definition at all; the caller
/// decides whether that aborts anything.
pub fn parse_manifest(raw: &str) -> Result<ManifestOutcome, ManifestError> {
    let manifest: Manifest = serde_json::from_str(raw)?;
    let resource = manifest
        .resources
        .first()
        .ok_or(ManifestError::NoResources)?;

    let segments: Vec<&str> = resource.server_path.split('\\').collect();
    let mut marked = segments
        .iter()
        .enumerate()
        .filter(|(_, segment)| segment.contains(SERVICE_MARKER));
    let (service_index, service_segment) = match (marked.next(), marked.next()) {
        (Some((index, segment)), None) => (index, *segment),
        _ => return Ok(ManifestOutcome::Unsupported),
    };
    let name = service_segment
        .split('.')
        .next()
        .unwrap_or(service_segment);

    if manifest.databases.is_empty() {
        return Err(ManifestError::NoDatabases);
    }
    let mut databases = BTreeMap::new();
    for source in &manifest.databases {
        let key = database_key(&source.on_premise_connection_string)?;
        let features = source
            .datasets
            .iter()
            .map(|dataset| dataset.on_server_name.clone())
            .collect();
        // Last database entry with a given key wins.
        databases.insert(key, features);
    }

    let url = url_path(&segments, service_index, name)?;
    Ok(ManifestOutcome::Service(MapService::new(
        resource.on_premise_path.clone(),
        name,
        url,
        databases,
    )))
}

/// Derive the catalog key for a database connection string.
///
/// `DATABASE=GIS;INSTANCE=sde:sql1` keys as `GIS:sde:sql1`; without an
/// INSTANCE entry the bare database name is used. Pieces without a `=` are
/// ignored; for repeated keys the last value wins.
fn database_key(connection: &str) -> Result<String, ManifestError> {
    let mut database = None;
    let mut instance = None;
    for piece in connection.split(';') {
        if let Some((key, value)) = piece.split_once('=') {
            match key {
                "DATABASE" => database = Some(value),
                "INSTANCE" => instance = Some(value),
                _ => {}
            }
        }
    }
    let database = database.ok_or(ManifestError::MissingKey("DATABASE"))?;
    Ok(match instance {
        Some(instance) => format!("{}:{}", database, instance),
        None => database.to_string(),
    })
}

/// Join the segments strictly between the `arcgisinput` anchor and the
/// service definition segment, then the service name, with `/`.
fn url_path(segments: &[&str], service_index: usize, name: &str) -> Result<String, ManifestError> {
    let anchor = segments
        .iter()
        .position(|segment| *segment == INPUT_ROOT)
        .ok_or(ManifestError::NoAnchor)?;
    let mut pieces: Vec<&str> = segments
        .iter()
        .skip(anchor + 1)
        .take(service_index.saturating_sub(anchor + 1))
        .copied()
        .collect();
    pieces.push(name);
    Ok(pieces.join("/"))
}
