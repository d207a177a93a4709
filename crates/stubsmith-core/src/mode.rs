use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One constraint dimension a generated value can be asked to violate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum InvalidFlag {
    /// Violate any one defined constraint.
    Invalid,
    /// Omit a required value.
    Required,
    /// Exceed `maximum`.
    Maximum,
    /// Fall below `minimum`.
    Minimum,
    /// Exceed `maxLength`.
    MaxLength,
    /// Fall below `minLength`.
    MinLength,
    /// Fail to match `pattern`.
    Pattern,
    /// Exceed `maxItems`.
    MaxItems,
    /// Fall below `minItems`.
    MinItems,
    /// Repeat an element despite `uniqueItems`.
    UniqueItems,
    /// Miss the `multipleOf` step.
    MultipleOf,
    /// Use a value outside `enum`.
    Enum,
}

impl InvalidFlag {
    pub const ALL: [InvalidFlag; 12] = [
        InvalidFlag::Invalid,
        InvalidFlag::Required,
        InvalidFlag::Maximum,
        InvalidFlag::Minimum,
        InvalidFlag::MaxLength,
        InvalidFlag::MinLength,
        InvalidFlag::Pattern,
        InvalidFlag::MaxItems,
        InvalidFlag::MinItems,
        InvalidFlag::UniqueItems,
        InvalidFlag::MultipleOf,
        InvalidFlag::Enum,
    ];

    /// Returns the bitflag for this dimension.
    pub const fn as_set(self) -> StubMode {
        match self {
            Self::Invalid => StubMode::INVALID,
            Self::Required => StubMode::REQUIRED,
            Self::Maximum => StubMode::MAXIMUM,
            Self::Minimum => StubMode::MINIMUM,
            Self::MaxLength => StubMode::MAX_LENGTH,
            Self::MinLength => StubMode::MIN_LENGTH,
            Self::Pattern => StubMode::PATTERN,
            Self::MaxItems => StubMode::MAX_ITEMS,
            Self::MinItems => StubMode::MIN_ITEMS,
            Self::UniqueItems => StubMode::UNIQUE_ITEMS,
            Self::MultipleOf => StubMode::MULTIPLE_OF,
            Self::Enum => StubMode::ENUM,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Invalid => "invalid",
            Self::Required => "required",
            Self::Maximum => "maximum",
            Self::Minimum => "minimum",
            Self::MaxLength => "max-length",
            Self::MinLength => "min-length",
            Self::Pattern => "pattern",
            Self::MaxItems => "max-items",
            Self::MinItems => "min-items",
            Self::UniqueItems => "unique-items",
            Self::MultipleOf => "multiple-of",
            Self::Enum => "enum",
        }
    }

    /// Parses a flag name; case and `_`/`-` insensitive.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|flag| flag.as_str() == normalized)
    }
}

impl fmt::Display for InvalidFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags::bitflags! {
    /// Set of constraint dimensions to violate. Empty means "generate a
    /// valid value".
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StubMode: u64 {
        const INVALID = 1 << 0;
        const REQUIRED = 1 << 1;
        const MAXIMUM = 1 << 2;
        const MINIMUM = 1 << 3;
        const MAX_LENGTH = 1 << 4;
        const MIN_LENGTH = 1 << 5;
        const PATTERN = 1 << 6;
        const MAX_ITEMS = 1 << 7;
        const MIN_ITEMS = 1 << 8;
        const UNIQUE_ITEMS = 1 << 9;
        const MULTIPLE_OF = 1 << 10;
        const ENUM = 1 << 11;
    }
}

impl StubMode {
    /// The valid mode.
    pub const VALID: StubMode = StubMode::empty();

    /// Flags that describe the collection itself rather than its elements.
    pub const COLLECTION: StubMode = StubMode::REQUIRED
        .union(StubMode::MAX_ITEMS)
        .union(StubMode::MIN_ITEMS)
        .union(StubMode::UNIQUE_ITEMS);

    pub fn is_valid(self) -> bool {
        self.is_empty()
    }

    pub fn has(self, flag: InvalidFlag) -> bool {
        self.contains(flag.as_set())
    }

    /// Flags in this set, in declaration order.
    pub fn flags(self) -> Vec<InvalidFlag> {
        InvalidFlag::ALL
            .into_iter()
            .filter(|flag| self.has(*flag))
            .collect()
    }
}

impl From<InvalidFlag> for StubMode {
    fn from(flag: InvalidFlag) -> Self {
        flag.as_set()
    }
}

impl FromIterator<InvalidFlag> for StubMode {
    fn from_iter<I: IntoIterator<Item = InvalidFlag>>(iter: I) -> Self {
        let mut mode = StubMode::empty();
        for flag in iter {
            mode |= flag.as_set();
        }
        mode
    }
}

impl fmt::Display for StubMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("valid");
        }
        let names: Vec<&str> = self.flags().into_iter().map(InvalidFlag::as_str).collect();
        f.write_str(&names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_combine_and_list_in_order() {
        let mode: StubMode = [InvalidFlag::Pattern, InvalidFlag::MaxLength]
            .into_iter()
            .collect();
        assert!(mode.has(InvalidFlag::Pattern));
        assert!(!mode.has(InvalidFlag::Enum));
        assert_eq!(mode.flags(), vec![InvalidFlag::MaxLength, InvalidFlag::Pattern]);
        assert_eq!(mode.to_string(), "max-length, pattern");
    }

    #[test]
    fn parses_flag_names() {
        assert_eq!(InvalidFlag::parse("MAX_ITEMS"), Some(InvalidFlag::MaxItems));
        assert_eq!(InvalidFlag::parse("multiple-of"), Some(InvalidFlag::MultipleOf));
        assert_eq!(InvalidFlag::parse("bogus"), None);
        assert_eq!(StubMode::VALID.to_string(), "valid");
    }
}
