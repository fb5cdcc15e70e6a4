use serde::{Deserialize, Serialize};

/// Display languages with built-in label tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ko,
    Ja,
    Zh,
}

impl Locale {
    pub const ALL: [Locale; 4] = [Locale::En, Locale::Ko, Locale::Ja, Locale::Zh];

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ko => "ko",
            Self::Ja => "ja",
            Self::Zh => "zh",
        }
    }

    /// Resolves a browser-style language tag (`en-US`, `ko`, `zh_CN`).
    ///
    /// Only the primary subtag is considered; unsupported languages fall back
    /// to English.
    #[must_use]
    pub fn from_language_tag(tag: &str) -> Self {
        let primary = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|locale| locale.code() == primary)
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
