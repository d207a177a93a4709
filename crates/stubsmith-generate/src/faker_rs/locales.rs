use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LocaleKey {
    #[default]
    EnUs,
    FrFr,
    PtBr,
    ZhCn,
    ZhTw,
}

impl LocaleKey {
    pub const ALL: [LocaleKey; 5] = [
        LocaleKey::EnUs,
        LocaleKey::FrFr,
        LocaleKey::PtBr,
        LocaleKey::ZhCn,
        LocaleKey::ZhTw,
    ];

    /// Parses a language/region tag; case-insensitive, `-` or `_`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "en" | "en_us" => Some(Self::EnUs),
            "fr" | "fr_fr" => Some(Self::FrFr),
            "pt" | "pt_br" => Some(Self::PtBr),
            "zh_cn" => Some(Self::ZhCn),
            "zh_tw" => Some(Self::ZhTw),
            _ => None,
        }
    }

    /// Like [`LocaleKey::parse`], with an empty tag meaning `en`.
    pub fn parse_or_default(value: &str) -> Option<Self> {
        if value.trim().is_empty() {
            return Some(Self::default());
        }
        Self::parse(value)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::EnUs => "en_US",
            Self::FrFr => "fr_FR",
            Self::PtBr => "pt_BR",
            Self::ZhCn => "zh_CN",
            Self::ZhTw => "zh_TW",
        }
    }
}

impl fmt::Display for LocaleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_language_and_region_tags() {
        assert_eq!(LocaleKey::parse("en"), Some(LocaleKey::EnUs));
        assert_eq!(LocaleKey::parse("pt-BR"), Some(LocaleKey::PtBr));
        assert_eq!(LocaleKey::parse("ZH_tw"), Some(LocaleKey::ZhTw));
        assert_eq!(LocaleKey::parse("zh"), None);
        assert_eq!(LocaleKey::parse_or_default(""), Some(LocaleKey::EnUs));
        assert_eq!(LocaleKey::parse_or_default("xx"), None);
    }
}
