use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, trace};

use crate::core::{
    ChainLink, ChainNode, IndicatorSlot, KeywordLookup, RuleChain, RuleSet, TradeSetting,
    VocabularyTable,
};
use crate::error::{RuleError, RuleResult};

use super::RuleCodec;
use super::warning::{CodecWarning, WarningLog};
use super::wire::{
    ConditionOperation, NUM_OF_CONDS, WireBasic, WireCondition, WireElement, WireIndexEntry,
    WireNode, WireSetting, encode_blob,
};

/// Result of encoding a rule set.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedRuleSet {
    /// Base64 transport/persistence string.
    pub payload: String,
    /// JSON text the payload was built from.
    pub json: String,
    pub chain: RuleChain,
    pub warnings: Vec<CodecWarning>,
}

impl RuleCodec {
    /// Encodes `rule_set` into the wire payload.
    ///
    /// Deterministic: equal inputs and snapshot give byte-identical output.
    /// Fails only on non-finite numbers or indicators missing from the catalog.
    pub fn encode(&self, rule_set: &RuleSet) -> RuleResult<EncodedRuleSet> {
        let mut log = WarningLog::default();
        let (elements, chain) = self.encode_elements(rule_set, &mut log)?;
        let json = serde_json::to_string(&elements)
            .map_err(|e| RuleError::InvalidData(format!("failed to serialize rule set: {e}")))?;
        let payload = encode_blob(&json);
        let warnings = log.into_inner();
        debug!(
            nodes = chain.len(),
            long = rule_set.long.len(),
            short = rule_set.short.len(),
            warnings = warnings.len(),
            payload_len = payload.len(),
            "encoded rule set"
        );
        Ok(EncodedRuleSet {
            payload,
            json,
            chain,
            warnings,
        })
    }

    /// Wire elements in chain order, before JSON serialization.
    pub fn encode_document(
        &self,
        rule_set: &RuleSet,
    ) -> RuleResult<(Vec<WireElement>, Vec<CodecWarning>)> {
        let mut log = WarningLog::default();
        let (elements, _) = self.encode_elements(rule_set, &mut log)?;
        Ok((elements, log.into_inner()))
    }

    fn encode_elements(
        &self,
        rule_set: &RuleSet,
        log: &mut WarningLog,
    ) -> RuleResult<(Vec<WireElement>, RuleChain)> {
        let chain = RuleChain::build(rule_set.long.len(), rule_set.short.len());
        let mut elements = Vec::with_capacity(chain.len());
        for node in chain.nodes() {
            let element = match node.link {
                ChainLink::Basic => WireElement::Basic(self.encode_basic(node, rule_set)?),
                ChainLink::Setting { position, index } => {
                    let setting = rule_set.settings(position).get(index).ok_or_else(|| {
                        RuleError::InvalidData(format!(
                            "chain references missing {} setting {index}",
                            position.as_str()
                        ))
                    })?;
                    trace!(
                        id = node.id.value(),
                        output = node.output(),
                        position = position.as_str(),
                        "encode setting"
                    );
                    WireElement::Setting(WireNode {
                        id: node.id.value(),
                        output: node.output(),
                        contents: self.encode_setting(
                            position.as_str(),
                            setting,
                            rule_set,
                            log,
                        )?,
                    })
                }
            };
            elements.push(element);
        }
        Ok((elements, chain))
    }

    fn encode_basic(
        &self,
        node: &ChainNode,
        rule_set: &RuleSet,
    ) -> RuleResult<WireNode<WireBasic>> {
        let basic = &rule_set.basic;
        if !basic.quantity.is_finite() {
            return Err(RuleError::InvalidData("quantity must be finite".to_owned()));
        }

        let catalog = self.snapshot.catalog();
        let mut index = Vec::with_capacity(IndicatorSlot::BOTH.len());
        for slot in IndicatorSlot::BOTH {
            let selection = rule_set.indicator(slot);
            let definition = catalog.definition(selection.kind())?;
            let args: IndexMap<String, Value> = selection
                .effective_args(definition)?
                .into_iter()
                .map(|(key, value)| (key.wire_key(), Value::String(value)))
                .collect();
            let mut entry = WireIndexEntry::with_capacity(1);
            entry.insert(definition.value.to_owned(), args);
            index.push(entry);
        }

        Ok(WireNode {
            id: node.id.value(),
            output: node.output(),
            contents: WireBasic {
                cross_close: basic.cross_close,
                interval: basic.interval.clone(),
                quantity: basic.quantity,
                symbol: basic.symbol.clone(),
                index,
            },
        })
    }

    fn encode_setting(
        &self,
        position: &str,
        setting: &TradeSetting,
        rule_set: &RuleSet,
        log: &mut WarningLog,
    ) -> RuleResult<WireSetting> {
        let candle_label = self.label_or_default(
            VocabularyTable::Candle,
            &setting.candle_type,
            self.snapshot.default_candle_label(),
            log,
        );
        let candle_type = self.keyword_or_warn(VocabularyTable::Candle, &candle_label, log);
        Ok(WireSetting {
            position: position.to_owned(),
            candle_type,
            num_of_conds: NUM_OF_CONDS,
            cond_1: self.encode_condition(IndicatorSlot::First, setting, rule_set, log)?,
            cond_2: self.encode_condition(IndicatorSlot::Second, setting, rule_set, log)?,
            operation: setting.bot_operation.as_str().to_owned(),
        })
    }

    fn encode_condition(
        &self,
        slot: IndicatorSlot,
        setting: &TradeSetting,
        rule_set: &RuleSet,
        log: &mut WarningLog,
    ) -> RuleResult<WireCondition> {
        let selection = rule_set.indicator(slot);
        let definition = self.snapshot.catalog().definition(selection.kind())?;
        // The index segment only tells repeated indicators apart.
        let index_to_use = if rule_set.has_repeated_indicator() {
            slot.index()
        } else {
            0
        };
        let label = self.label_or_default(
            VocabularyTable::Comparison,
            setting.selected_option(slot),
            definition.default_option_label(),
            log,
        );
        let keyword = self.keyword_or_warn(VocabularyTable::Comparison, &label, log);

        let constant = if definition.show_constant {
            let constant = setting.constant(slot);
            if !constant.is_finite() {
                return Err(RuleError::InvalidData(format!(
                    "constant for {} must be finite",
                    definition.value
                )));
            }
            Some(constant)
        } else {
            None
        };

        Ok(WireCondition {
            operation: ConditionOperation::format(definition.value, index_to_use, &keyword),
            constant,
        })
    }

    /// An empty selection stands for the first entry of its list.
    fn label_or_default(
        &self,
        table: VocabularyTable,
        label: &str,
        default_label: &str,
        log: &mut WarningLog,
    ) -> String {
        if !label.is_empty() {
            return label.to_owned();
        }
        log.push(CodecWarning::EmptySelection {
            table,
            label: default_label.to_owned(),
        });
        default_label.to_owned()
    }

    fn keyword_or_warn(
        &self,
        table: VocabularyTable,
        label: &str,
        log: &mut WarningLog,
    ) -> String {
        match self.snapshot.vocabulary().lookup_keyword(table, label) {
            KeywordLookup::Mapped(keyword) => keyword.to_owned(),
            KeywordLookup::Unmapped(label) => {
                log.push(CodecWarning::UnmappedLabel {
                    table,
                    label: label.to_owned(),
                });
                label.to_owned()
            }
        }
    }
}
