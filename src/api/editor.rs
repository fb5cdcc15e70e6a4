use std::sync::Arc;

use tracing::{debug, info};

use crate::api::{InstanceRequest, InstanceStore};
use crate::codec::{CodecConfig, DecodeOutcome, EncodedRuleSet, RuleCodec};
use crate::core::{
    ArgKey, BuiltinVocabularyProvider, IndicatorKind, IndicatorSlot, Locale, LocaleSnapshot,
    Position, RuleSet, TradeSetting, VocabularyProvider,
};
use crate::error::{RuleError, RuleResult};

/// Owner of the rule set being edited.
///
/// Holds the active locale snapshot and the codec built on it, and moves
/// rule sets in and out of an [`InstanceStore`].
#[derive(Debug)]
pub struct RuleEditor<S, P = BuiltinVocabularyProvider> {
    store: S,
    provider: P,
    codec: RuleCodec,
    rule_set: RuleSet,
}

impl<S: InstanceStore> RuleEditor<S> {
    /// Editor over the built-in label tables.
    pub fn with_builtin(store: S, config: CodecConfig) -> RuleResult<Self> {
        Self::new(store, BuiltinVocabularyProvider, config)
    }
}

impl<S: InstanceStore, P: VocabularyProvider> RuleEditor<S, P> {
    pub fn new(store: S, provider: P, config: CodecConfig) -> RuleResult<Self> {
        let snapshot = provider.rebuild(config.locale)?;
        let codec = RuleCodec::new(snapshot, config)?;
        let rule_set = codec.default_rule_set();
        Ok(Self {
            store,
            provider,
            codec,
            rule_set,
        })
    }

    #[must_use]
    pub fn locale(&self) -> Locale {
        self.codec.snapshot().locale()
    }

    #[must_use]
    pub fn snapshot(&self) -> &Arc<LocaleSnapshot> {
        self.codec.snapshot()
    }

    #[must_use]
    pub fn codec(&self) -> &RuleCodec {
        &self.codec
    }

    #[must_use]
    pub fn rule_set(&self) -> &RuleSet {
        &self.rule_set
    }

    pub fn rule_set_mut(&mut self) -> &mut RuleSet {
        &mut self.rule_set
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Appends a default setting on `position`, returning its index.
    pub fn add_setting(&mut self, position: Position) -> usize {
        let default_constant = self.codec.config().default_constant;
        self.rule_set.add_setting(position, self.codec.snapshot(), default_constant)
    }

    pub fn remove_setting(&mut self, position: Position, index: usize) -> Option<TradeSetting> {
        self.rule_set.remove_setting(position, index)
    }

    pub fn select_indicator(
        &mut self,
        slot: IndicatorSlot,
        kind: IndicatorKind,
    ) -> RuleResult<()> {
        self.rule_set.select_indicator(slot, kind, self.codec.snapshot())?;
        debug!(?slot, indicator = kind.value(), "selected indicator");
        Ok(())
    }

    /// Sets one argument of the indicator in `slot`.
    ///
    /// A value equal to the catalog default removes the override.
    pub fn set_indicator_arg(
        &mut self,
        slot: IndicatorSlot,
        key: ArgKey,
        value: impl Into<String>,
    ) -> RuleResult<()> {
        let value = value.into();
        let selection = self.rule_set.indicator_mut(slot);
        let definition = self.codec.snapshot().catalog().definition(selection.kind())?;
        let arg = definition.arg(key).ok_or_else(|| {
            RuleError::InvalidData(format!(
                "{} has no argument `{}`",
                definition.value,
                key.wire_key()
            ))
        })?;
        if arg.default_value == value {
            selection.clear_override(key);
            Ok(())
        } else {
            selection.set_override(key, value)
        }
    }

    /// Switches the active locale.
    ///
    /// The new snapshot is built before anything changes; on error the editor
    /// keeps its previous locale.
    pub fn set_locale(&mut self, locale: Locale) -> RuleResult<()> {
        if locale == self.locale() {
            return Ok(());
        }
        let next = self.provider.rebuild(locale)?;
        self.rule_set.relabel(self.codec.snapshot(), &next);
        self.codec = self.codec.with_snapshot(next);
        info!(%locale, "switched rule editor locale");
        Ok(())
    }

    /// Loads the stored rule set of `instance_id` into the editor.
    ///
    /// Store failures are errors; unreadable blobs are not, they produce a
    /// fallback outcome.
    pub fn load(&mut self, instance_id: &str) -> RuleResult<DecodeOutcome> {
        let blob = self.store.read_blob(instance_id)?.unwrap_or_default();
        let outcome = self.codec.decode_into(&blob, &self.rule_set);
        debug!(
            instance_id,
            status = ?outcome.status,
            warnings = outcome.warnings.len(),
            "loaded rule set"
        );
        self.rule_set = outcome.rule_set.clone();
        Ok(outcome)
    }

    pub fn save(&mut self, instance_id: &str) -> RuleResult<EncodedRuleSet> {
        let encoded = self.codec.encode(&self.rule_set)?;
        self.store.write_blob(instance_id, &encoded.payload)?;
        Ok(encoded)
    }

    /// `post` request carrying the current rule set.
    pub fn post_request(&self, instance_id: &str, name: &str) -> RuleResult<InstanceRequest> {
        let encoded = self.codec.encode(&self.rule_set)?;
        Ok(InstanceRequest::post(instance_id, name, encoded.payload))
    }
}
