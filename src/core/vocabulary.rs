use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::labels::{candle_label, comparison_label};
use crate::core::{CandleType, ComparisonKeyword, Locale};
use crate::error::{RuleError, RuleResult};

/// Which of the two vocabulary tables a lookup went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VocabularyTable {
    Comparison,
    Candle,
}

/// Outcome of translating a display label into a wire keyword.
///
/// Unmapped labels pass through unchanged; callers decide whether to report
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordLookup<'a> {
    Mapped(&'a str),
    Unmapped(&'a str),
}

impl<'a> KeywordLookup<'a> {
    #[must_use]
    pub fn keyword(self) -> &'a str {
        match self {
            Self::Mapped(keyword) | Self::Unmapped(keyword) => keyword,
        }
    }

    #[must_use]
    pub fn is_mapped(self) -> bool {
        matches!(self, Self::Mapped(_))
    }
}

/// Invertible label <-> keyword table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct LabelMap {
    by_label: IndexMap<String, String>,
    by_keyword: IndexMap<String, String>,
}

impl LabelMap {
    fn from_pairs<L, K>(
        table: VocabularyTable,
        pairs: impl IntoIterator<Item = (L, K)>,
    ) -> RuleResult<Self>
    where
        L: Into<String>,
        K: Into<String>,
    {
        let mut map = Self::default();
        for (label, keyword) in pairs {
            let label = label.into();
            let keyword = keyword.into();
            if label.is_empty() || keyword.is_empty() {
                return Err(RuleError::InvalidData(format!(
                    "{table:?} vocabulary entries must not be empty"
                )));
            }
            if map.by_label.contains_key(&label) {
                return Err(RuleError::InvalidData(format!(
                    "{table:?} vocabulary label `{label}` is mapped twice"
                )));
            }
            if map.by_keyword.contains_key(&keyword) {
                return Err(RuleError::InvalidData(format!(
                    "{table:?} vocabulary keyword `{keyword}` is mapped twice"
                )));
            }
            map.by_label.insert(label.clone(), keyword.clone());
            map.by_keyword.insert(keyword, label);
        }
        Ok(map)
    }

    fn to_keyword<'a>(&'a self, label: &'a str) -> KeywordLookup<'a> {
        match self.by_label.get(label) {
            Some(keyword) => KeywordLookup::Mapped(keyword.as_str()),
            None => KeywordLookup::Unmapped(label),
        }
    }

    fn to_label(&self, keyword: &str) -> Option<&str> {
        self.by_keyword.get(keyword).map(String::as_str)
    }
}

/// Bidirectional comparison and candle vocabularies for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonVocabulary {
    locale: Locale,
    comparison: LabelMap,
    candle: LabelMap,
}

impl ComparisonVocabulary {
    /// Builds the built-in tables for `locale`.
    pub fn builtin(locale: Locale) -> RuleResult<Self> {
        Self::from_pairs(
            locale,
            ComparisonKeyword::ALL
                .into_iter()
                .map(|keyword| (comparison_label(keyword, locale), keyword.as_str())),
            CandleType::ALL
                .into_iter()
                .map(|candle| (candle_label(candle, locale), candle.as_str())),
        )
    }

    /// Builds a vocabulary from explicit `(label, keyword)` pairs.
    ///
    /// Fails when either table is not invertible.
    pub fn from_pairs<L1, K1, L2, K2>(
        locale: Locale,
        comparison: impl IntoIterator<Item = (L1, K1)>,
        candle: impl IntoIterator<Item = (L2, K2)>,
    ) -> RuleResult<Self>
    where
        L1: Into<String>,
        K1: Into<String>,
        L2: Into<String>,
        K2: Into<String>,
    {
        Ok(Self {
            locale,
            comparison: LabelMap::from_pairs(VocabularyTable::Comparison, comparison)?,
            candle: LabelMap::from_pairs(VocabularyTable::Candle, candle)?,
        })
    }

    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    #[must_use]
    pub fn to_keyword<'a>(&'a self, label: &'a str) -> KeywordLookup<'a> {
        self.comparison.to_keyword(label)
    }

    #[must_use]
    pub fn to_label(&self, keyword: &str) -> Option<&str> {
        self.comparison.to_label(keyword)
    }

    #[must_use]
    pub fn candle_to_keyword<'a>(&'a self, label: &'a str) -> KeywordLookup<'a> {
        self.candle.to_keyword(label)
    }

    #[must_use]
    pub fn candle_to_label(&self, keyword: &str) -> Option<&str> {
        self.candle.to_label(keyword)
    }

    #[must_use]
    pub fn lookup_keyword<'a>(
        &'a self,
        table: VocabularyTable,
        label: &'a str,
    ) -> KeywordLookup<'a> {
        match table {
            VocabularyTable::Comparison => self.to_keyword(label),
            VocabularyTable::Candle => self.candle_to_keyword(label),
        }
    }

    #[must_use]
    pub fn lookup_label(&self, table: VocabularyTable, keyword: &str) -> Option<&str> {
        match table {
            VocabularyTable::Comparison => self.to_label(keyword),
            VocabularyTable::Candle => self.candle_to_label(keyword),
        }
    }

    /// Candle labels in table order.
    pub fn candle_labels(&self) -> impl Iterator<Item = &str> {
        self.candle.by_label.keys().map(String::as_str)
    }

    /// Number of `(comparison, candle)` entries.
    #[must_use]
    pub fn table_sizes(&self) -> (usize, usize) {
        (self.comparison.by_label.len(), self.candle.by_label.len())
    }
}
