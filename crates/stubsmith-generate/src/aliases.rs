use std::collections::HashMap;

use heck::ToKebabCase;
use tracing::warn;

/// Built-in alternative names, grouped by canonical name.
const BUILTIN_ALIASES: &[(&str, &[&str])] = &[
    ("state", &["state-code"]),
    ("country", &["country-name"]),
    ("latitude", &["lat"]),
    ("longitude", &["lon"]),
    ("company", &["company-name"]),
    ("company-slogan", &["company-catch-phrase"]),
    ("company-bs", &["company-mission"]),
    ("landline", &["phone-number"]),
    (
        "mobile",
        &["mobile-number", "cell", "cell-phone", "gsm", "gsm-number"],
    ),
    ("user-name", &["username", "login", "nickname", "nick-name"]),
    (
        "hostname",
        &["domainword", "domain-word", "host", "host-name"],
    ),
    ("domain", &["domain-name"]),
    ("credit-card", &["creditcard"]),
    (
        "ssn",
        &["socialsecurity", "social-security", "social-security-number"],
    ),
    ("hexcolor", &["hex-color", "hexcolour", "hex-colour"]),
    ("rgbcolor", &["rgb-color", "rgbcolour", "rgb-colour"]),
    ("mac-address", &["mac", "macaddress"]),
    ("ipv4", &["ip4"]),
    ("ipv6", &["ip6"]),
    ("isbn10", &["isbnv10"]),
    ("isbn13", &["isbnv13"]),
    ("uuid4", &["uuidv4"]),
    ("uuid3", &["uuidv3"]),
    ("uuid5", &["uuidv5"]),
    ("bool", &["boolean"]),
    ("date-time", &["datetime", "timestamp"]),
    ("integer", &["int", "int32", "int64"]),
    ("number", &["float", "double", "decimal"]),
];

/// Alternative name to canonical name mapping.
///
/// Keys are case-folded and always map straight to a canonical name, so a
/// single lookup resolves any alias.
#[derive(Debug, Clone)]
pub struct AliasTable {
    aliases: HashMap<String, String>,
}

impl Default for AliasTable {
    /// Table holding the built-in aliases.
    fn default() -> Self {
        let mut table = Self::empty();
        for (canonical, alternatives) in BUILTIN_ALIASES {
            table.register(canonical, alternatives.iter());
        }
        table
    }
}

impl AliasTable {
    pub fn empty() -> Self {
        Self {
            aliases: HashMap::new(),
        }
    }

    /// Register alternatives for `canonical`. When `canonical` is itself an
    /// alias the alternatives collapse onto its target. Re-registering an
    /// alternative under a different canonical name replaces it.
    pub fn register<I, S>(&mut self, canonical: &str, alternatives: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let canonical = self.resolve(canonical);
        if canonical.is_empty() {
            return;
        }
        for alternative in alternatives {
            let alternative = fold(alternative.as_ref());
            if alternative.is_empty() || alternative == canonical {
                continue;
            }
            if let Some(previous) = self
                .aliases
                .insert(alternative.clone(), canonical.clone())
                && previous != canonical
            {
                warn!(
                    alias = %alternative,
                    previous = %previous,
                    canonical = %canonical,
                    "alias re-registered; last registration wins"
                );
            }
            // Aliases pointing at the name just demoted follow it.
            for target in self.aliases.values_mut() {
                if *target == alternative {
                    target.clone_from(&canonical);
                }
            }
        }
    }

    /// Canonical name for `name`; unknown names resolve to themselves.
    pub fn resolve(&self, name: &str) -> String {
        let folded = fold(name);
        match self.aliases.get(&folded) {
            Some(canonical) => canonical.clone(),
            None => folded,
        }
    }

    /// Alternatives registered for a canonical name, sorted.
    pub fn aliases_for(&self, canonical: &str) -> Vec<&str> {
        let canonical = fold(canonical);
        let mut names: Vec<&str> = self
            .aliases
            .iter()
            .filter(|(_, target)| **target == canonical)
            .map(|(alias, _)| alias.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    /// `(alias, canonical)` pairs, sorted by alias.
    pub fn entries(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .aliases
            .iter()
            .map(|(alias, canonical)| (alias.as_str(), canonical.as_str()))
            .collect();
        entries.sort_unstable();
        entries
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

/// Kebab-case form of an identifier, used as the fallback generator name.
pub fn command_name(field: &str) -> String {
    field.to_kebab_case()
}

fn fold(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_resolve_case_insensitively() {
        let table = AliasTable::default();
        assert_eq!(table.resolve("UUIDv4"), "uuid4");
        assert_eq!(table.resolve("Boolean"), "bool");
        assert_eq!(table.resolve("city"), "city");
    }

    #[test]
    fn chains_collapse_onto_final_canonical() {
        let mut table = AliasTable::empty();
        table.register("user-name", ["login"]);
        table.register("login", ["handle"]);
        assert_eq!(table.resolve("handle"), "user-name");

        table.register("account", ["user-name"]);
        assert_eq!(table.resolve("login"), "account");
        assert_eq!(table.resolve("handle"), "account");
    }

    #[test]
    fn converts_identifiers_to_command_names() {
        assert_eq!(command_name("userName"), "user-name");
        assert_eq!(command_name("X_Request_Id"), "x-request-id");
        assert_eq!(command_name("email"), "email");
    }
}
