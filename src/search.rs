//! Catalog search.

use std::collections::BTreeSet;

use crate::service::{MapService, Verbosity};

/// Scan `services` for `query` and return the deduplicated renderings of
/// every match at the requested verbosity.
///
/// A service matches when the query occurs, case-insensitively, in any
/// feature class name, database key, the source document path, or the
/// service name. Two matches that render identically collapse to one entry;
/// results come back sorted.
pub fn search_services(services: &[MapService], query: &str, verbosity: Verbosity) -> Vec<String> {
    let needle = query.to_uppercase();
    let mut cards = BTreeSet::new();
    for service in services {
        if service.uses_feature(query)
            || service.uses_database(query)
            || service.document.to_uppercase().contains(&needle)
            || service.name.to_uppercase().contains(&needle)
        {
            cards.insert(service.render(verbosity));
        }
    }
    cards.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn service(name: &str, url: &str, document: &str, db: &str, features: &[&str]) -> MapService {
        let mut databases = BTreeMap::new();
        databases.insert(
            db.to_string(),
            features.iter().map(|f| f.to_string()).collect(),
        );
        MapService::new(document, name, url, databases)
    }

    fn sample_catalog() -> Vec<MapService> {
        vec![
            service(
                "Parks",
                "Rec/Parks",
                r"C:\GIS\Maps\Parks.mxd",
                "GISDATA:sde:sql1",
                &["Parcels", "Trails"],
            ),
            service(
                "Utilities",
                "Infra/Utilities",
                r"C:\GIS\Maps\Utilities.mxd",
                "UTILDB",
                &["WaterLines"],
            ),
        ]
    }

    #[test]
    fn test_matches_by_feature_name() {
        let hits = search_services(&sample_catalog(), "trails", Verbosity::Quiet);
        assert_eq!(hits, vec!["Parks (Rec/Parks)"]);
    }

    #[test]
    fn test_matches_by_database_key() {
        let hits = search_services(&sample_catalog(), "utildb", Verbosity::VeryQuiet);
        assert_eq!(hits, vec!["Infra/Utilities"]);
    }

    #[test]
    fn test_matches_by_document_path() {
        let hits = search_services(&sample_catalog(), r"maps\parks", Verbosity::Quiet);
        assert_eq!(hits, vec!["Parks (Rec/Parks)"]);
    }

    #[test]
    fn test_matches_by_service_name() {
        let hits = search_services(&sample_catalog(), "UTIL", Verbosity::Quiet);
        assert_eq!(hits, vec!["Utilities (Infra/Utilities)"]);
    }

    #[test]
    fn test_no_match_returns_empty() {
        assert!(search_services(&sample_catalog(), "nothere", Verbosity::Full).is_empty());
    }

    #[test]
    fn test_identical_renderings_collapse() {
        let twin_a = service("Parks", "Rec/Parks", r"C:\a.mxd", "DB1", &["Parcels"]);
        let twin_b = service("Parks", "Rec/Parks", r"C:\b.mxd", "DB2", &["Parcels"]);
        let hits = search_services(&[twin_a, twin_b], "Parcels", Verbosity::Quiet);
        assert_eq!(hits, vec!["Parks (Rec/Parks)"]);
    }

    #[test]
    fn test_results_are_sorted() {
        let hits = search_services(&sample_catalog(), "mxd", Verbosity::Quiet);
        assert_eq!(
            hits,
            vec!["Parks (Rec/Parks)", "Utilities (Infra/Utilities)"]
        );
    }
}
