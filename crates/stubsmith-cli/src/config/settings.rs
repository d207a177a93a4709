use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use stubsmith_core::{InvalidFlag, StubMode};
use stubsmith_generate::AliasTable;

use super::{ConfigError, ConfigResult};

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "stubsmith.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub locale: Option<String>,
    pub mode: Vec<InvalidFlag>,
    pub join_collections: bool,
    /// Canonical generator name to extra alternative names.
    pub aliases: BTreeMap<String, Vec<String>>,
}

impl Settings {
    pub fn stub_mode(&self) -> StubMode {
        self.mode.iter().copied().collect()
    }

    /// Built-in aliases plus the configured ones.
    pub fn alias_table(&self) -> AliasTable {
        let mut table = AliasTable::default();
        for (canonical, alternatives) in &self.aliases {
            table.register(canonical, alternatives);
        }
        table
    }
}

/// Load settings from `explicit`, else from [`DEFAULT_CONFIG_FILE`] when it
/// exists, else defaults. An explicit path must exist.
pub fn load_settings(explicit: Option<&Path>) -> ConfigResult<Settings> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::Missing(path.display().to_string()));
            }
            path
        }
        None => {
            let path = Path::new(DEFAULT_CONFIG_FILE);
            if !path.exists() {
                return Ok(Settings::default());
            }
            path
        }
    };

    let content = std::fs::read_to_string(path)?;
    let settings: Settings = toml::from_str(&content)?;
    tracing::debug!(path = %path.display(), aliases = settings.aliases.len(), "config loaded");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn parses_full_config() {
        let settings: Settings = toml::from_str(
            r#"
locale = "pt_BR"
mode = ["max-length", "pattern"]
join_collections = true

[aliases]
user-name = ["handle", "screen-name"]
"#,
        )
        .expect("parse settings");

        assert_eq!(settings.locale.as_deref(), Some("pt_BR"));
        assert_eq!(settings.stub_mode(), StubMode::MAX_LENGTH | StubMode::PATTERN);
        assert!(settings.join_collections);

        let table = settings.alias_table();
        assert_eq!(table.resolve("Handle"), "user-name");
        assert_eq!(table.resolve("uuidv4"), "uuid4");
    }

    #[test]
    fn empty_config_uses_defaults() {
        let settings: Settings = toml::from_str("").expect("parse settings");
        assert_eq!(settings, Settings::default());
        assert!(settings.stub_mode().is_valid());
    }

    #[test]
    fn rejects_unknown_flags_and_keys() {
        assert!(toml::from_str::<Settings>(r#"mode = ["too-long"]"#).is_err());
        assert!(toml::from_str::<Settings>(r#"colour = "blue""#).is_err());
    }

    #[test]
    fn loads_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "locale = \"fr\"").expect("write config");

        let settings = load_settings(Some(file.path())).expect("load settings");
        assert_eq!(settings.locale.as_deref(), Some("fr"));

        let missing = file.path().with_extension("absent");
        let err = load_settings(Some(&missing)).expect_err("missing file");
        assert!(matches!(err, ConfigError::Missing(_)));
    }
}
