use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use stubsmith_generate::GeneratorRegistry;

use super::RunResult;
use crate::config::write_bytes_atomic;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratorEntry {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

/// Canonical generator names with their alternatives.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratorListing {
    pub locale: String,
    pub generators: Vec<GeneratorEntry>,
}

pub fn list_generators(registry: &GeneratorRegistry) -> GeneratorListing {
    let aliases = registry.aliases();
    let generators = registry
        .generator_ids()
        .into_iter()
        .map(|id| GeneratorEntry {
            name: id.to_string(),
            aliases: aliases
                .aliases_for(id)
                .into_iter()
                .map(str::to_string)
                .collect(),
        })
        .collect();
    GeneratorListing {
        locale: registry.locale().to_string(),
        generators,
    }
}

/// Pretty JSON to `out`, or to stdout when no path is given.
pub fn write_json<T: Serialize>(value: &T, out: Option<&Path>) -> RunResult<()> {
    let mut encoded = serde_json::to_vec_pretty(value)?;
    encoded.push(b'\n');
    match out {
        Some(path) => {
            write_bytes_atomic(path, &encoded)?;
            tracing::info!(path = %path.display(), bytes = encoded.len(), "output written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&encoded)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use stubsmith_generate::AliasTable;

    use super::*;

    #[test]
    fn listing_groups_aliases_under_canonical_names() {
        let registry =
            GeneratorRegistry::new("en", Arc::new(AliasTable::default())).expect("registry");
        let listing = list_generators(&registry);

        assert_eq!(listing.locale, "en_US");
        let uuid4 = listing
            .generators
            .iter()
            .find(|entry| entry.name == "uuid4")
            .expect("uuid4 listed");
        assert_eq!(uuid4.aliases, vec!["uuidv4".to_string()]);
        assert!(listing.generators.iter().all(|entry| entry.name != "uuidv4"));
    }

    #[test]
    fn writes_json_to_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("listing.json");
        write_json(&serde_json::json!({"ok": true}), Some(&path)).expect("write");

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).expect("read")).expect("json");
        assert_eq!(written["ok"], true);
    }
}
