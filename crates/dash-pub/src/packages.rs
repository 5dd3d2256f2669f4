use std::collections::BTreeMap;

use serde::Deserialize;

/// Package name to root URI, as declared by the package config.
pub type PackageMap = BTreeMap<String, String>;

#[derive(Debug, Deserialize)]
struct PackageConfig {
    #[serde(default)]
    packages: Vec<PackageConfigEntry>,
}

#[derive(Debug, Deserialize)]
struct PackageConfigEntry {
    name: String,
    #[serde(rename = "rootUri")]
    root_uri: String,
}

/// Parses a `.dart_tool/package_config.json` document.
///
/// Returns `None` when the document is not valid JSON of the expected shape.
pub fn parse_package_config(text: &str) -> Option<PackageMap> {
    let config: PackageConfig = match serde_json::from_str(text) {
        Ok(config) => config,
        Err(err) => {
            tracing::debug!(target: "dash.pub", error = %err, "malformed package_config.json");
            return None;
        }
    };
    Some(
        config
            .packages
            .into_iter()
            .map(|entry| (entry.name, entry.root_uri))
            .collect(),
    )
}

/// Parses a legacy `.packages` file: one `name:uri` entry per line, with `#`
/// comment lines. Malformed lines are skipped.
pub fn parse_dot_packages(text: &str) -> PackageMap {
    let mut map = PackageMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        // The URI may itself contain colons (`file:///...`); only the first
        // one separates the package name.
        let Some((name, uri)) = line.split_once(':') else {
            continue;
        };
        if name.is_empty() {
            continue;
        }
        map.insert(name.to_owned(), uri.to_owned());
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn package_config_entries_are_mapped_by_name() {
        let map = parse_package_config(
            r#"{
                "configVersion": 2,
                "packages": [
                    { "name": "demo", "rootUri": "../", "packageUri": "lib/" },
                    { "name": "collection", "rootUri": "file:///pub/collection-1.19.0" }
                ],
                "generated": "2026-01-05T10:00:00Z"
            }"#,
        )
        .unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("demo").map(String::as_str), Some("../"));
        assert_eq!(
            map.get("collection").map(String::as_str),
            Some("file:///pub/collection-1.19.0")
        );
    }

    #[test]
    fn package_config_without_packages_is_empty() {
        assert_eq!(
            parse_package_config(r#"{ "configVersion": 2 }"#).unwrap(),
            PackageMap::new()
        );
    }

    #[test]
    fn malformed_package_config_is_absent() {
        assert_eq!(parse_package_config("not json"), None);
        assert_eq!(parse_package_config(r#"{ "packages": 3 }"#), None);
    }

    #[test]
    fn dot_packages_splits_on_the_first_colon_only() {
        let map = parse_dot_packages(
            "# Generated by pub on 2020-01-01.\n\
             demo:lib/\n\
             collection:file:///pub/collection-1.19.0/lib/\n\
             \n\
             malformed-line\n",
        );

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("demo").map(String::as_str), Some("lib/"));
        assert_eq!(
            map.get("collection").map(String::as_str),
            Some("file:///pub/collection-1.19.0/lib/")
        );
    }
}
