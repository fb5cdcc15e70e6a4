use std::sync::Arc;

use tracing::debug;

use crate::core::{ComparisonVocabulary, IndicatorCatalog, Locale};
use crate::error::{RuleError, RuleResult};

/// Catalog and vocabulary built together for one locale.
///
/// Snapshots are immutable; a locale switch produces a new one, so a codec
/// holding an `Arc<LocaleSnapshot>` never sees a half-rebuilt table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSnapshot {
    catalog: IndicatorCatalog,
    vocabulary: ComparisonVocabulary,
}

impl LocaleSnapshot {
    pub fn new(catalog: IndicatorCatalog, vocabulary: ComparisonVocabulary) -> RuleResult<Self> {
        if catalog.locale() != vocabulary.locale() {
            return Err(RuleError::InvalidData(format!(
                "catalog locale `{}` does not match vocabulary locale `{}`",
                catalog.locale(),
                vocabulary.locale()
            )));
        }
        Ok(Self {
            catalog,
            vocabulary,
        })
    }

    pub fn builtin(locale: Locale) -> RuleResult<Self> {
        Self::new(
            IndicatorCatalog::for_locale(locale),
            ComparisonVocabulary::builtin(locale)?,
        )
    }

    #[must_use]
    pub fn locale(&self) -> Locale {
        self.catalog.locale()
    }

    #[must_use]
    pub fn catalog(&self) -> &IndicatorCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn vocabulary(&self) -> &ComparisonVocabulary {
        &self.vocabulary
    }

    /// Label of the first candle entry, used for freshly created settings.
    #[must_use]
    pub fn default_candle_label(&self) -> &str {
        self.vocabulary.candle_labels().next().unwrap_or_default()
    }
}

/// Source of locale snapshots.
///
/// Implementations load labels however they like; `rebuild` must return a
/// complete snapshot or an error, never a partially updated one.
pub trait VocabularyProvider {
    fn rebuild(&self, locale: Locale) -> RuleResult<Arc<LocaleSnapshot>>;
}

/// Provider backed by the built-in label tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinVocabularyProvider;

impl VocabularyProvider for BuiltinVocabularyProvider {
    fn rebuild(&self, locale: Locale) -> RuleResult<Arc<LocaleSnapshot>> {
        let snapshot = LocaleSnapshot::builtin(locale)?;
        let (comparison_len, candle_len) = snapshot.vocabulary().table_sizes();
        debug!(
            %locale,
            indicators = snapshot.catalog().len(),
            comparison_len,
            candle_len,
            "rebuilt locale snapshot"
        );
        Ok(Arc::new(snapshot))
    }
}
