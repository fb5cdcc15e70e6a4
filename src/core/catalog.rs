use indexmap::IndexMap;
use serde::Serialize;
use smallvec::SmallVec;

use crate::core::labels::{comparison_label, indicator_label};
use crate::core::{ArgKey, ComparisonKeyword, IndicatorKind, Locale};
use crate::error::{RuleError, RuleResult};

/// Named numeric argument of an indicator, with its catalog default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndicatorArg {
    pub name: &'static str,
    pub default_value: &'static str,
}

/// Comparison option as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonOption {
    pub keyword: ComparisonKeyword,
    pub label: &'static str,
}

/// One catalog entry, localized for the catalog's locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndicatorDefinition {
    pub kind: IndicatorKind,
    pub value: &'static str,
    pub label: &'static str,
    pub args: SmallVec<[IndicatorArg; 4]>,
    pub options: SmallVec<[ComparisonOption; 4]>,
    pub show_constant: bool,
}

impl IndicatorDefinition {
    #[must_use]
    pub fn new(kind: IndicatorKind, locale: Locale) -> Self {
        Self {
            kind,
            value: kind.value(),
            label: indicator_label(kind, locale),
            args: kind
                .arg_specs()
                .iter()
                .map(|&(name, default_value)| IndicatorArg {
                    name,
                    default_value,
                })
                .collect(),
            options: kind
                .option_keywords()
                .iter()
                .map(|&keyword| ComparisonOption {
                    keyword,
                    label: comparison_label(keyword, locale),
                })
                .collect(),
            show_constant: kind.show_constant(),
        }
    }

    #[must_use]
    pub fn arg_count(&self) -> usize {
        self.args.len()
    }

    #[must_use]
    pub fn arg(&self, key: ArgKey) -> Option<&IndicatorArg> {
        self.args.get(key.position())
    }

    /// Label of the first option, used for freshly created settings.
    #[must_use]
    pub fn default_option_label(&self) -> &'static str {
        self.options.first().map_or("", |option| option.label)
    }

    #[must_use]
    pub fn supports_keyword(&self, keyword: &str) -> bool {
        self.options
            .iter()
            .any(|option| option.keyword.as_str() == keyword)
    }
}

/// Indicator catalog for one locale.
///
/// Entries keep display order; lookups by wire value are constant time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorCatalog {
    locale: Locale,
    definitions: IndexMap<&'static str, IndicatorDefinition>,
}

impl IndicatorCatalog {
    #[must_use]
    pub fn for_locale(locale: Locale) -> Self {
        let definitions = IndicatorKind::ALL
            .into_iter()
            .map(|kind| (kind.value(), IndicatorDefinition::new(kind, locale)))
            .collect();
        Self {
            locale,
            definitions,
        }
    }

    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    #[must_use]
    pub fn get(&self, value: &str) -> Option<&IndicatorDefinition> {
        self.definitions.get(value)
    }

    pub fn definition(&self, kind: IndicatorKind) -> RuleResult<&IndicatorDefinition> {
        self.get(kind.value())
            .ok_or_else(|| RuleError::UnknownIndicator(kind.value().to_owned()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndicatorDefinition> {
        self.definitions.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// First selectable indicator other than the `None` sentinel.
    #[must_use]
    pub fn first_selectable(&self) -> IndicatorKind {
        self.iter()
            .map(|definition| definition.kind)
            .find(|kind| *kind != IndicatorKind::None)
            .unwrap_or_default()
    }
}
