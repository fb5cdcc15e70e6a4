use tracing::{debug, trace, warn};

use crate::core::{
    ArgKey, BotOperation, IndicatorSelection, IndicatorSlot, Position, RuleSet, TradeSetting,
    VocabularyTable,
};
use crate::error::{RuleError, RuleResult};

use super::RuleCodec;
use super::warning::{CodecWarning, WarningLog};
use super::wire::{
    ConditionOperation, NUM_OF_CONDS, WireBasic, WireCondition, WireIndexEntry, WireNode,
    WireSetting, arg_value_text, decode_document,
};

/// How a lenient decode ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeStatus {
    Decoded,
    /// No configuration was stored.
    Empty,
    /// The stored payload could not be read; the fallback rule set was used.
    Invalid { reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodeOutcome {
    pub rule_set: RuleSet,
    pub status: DecodeStatus,
    pub warnings: Vec<CodecWarning>,
}

impl DecodeOutcome {
    #[must_use]
    pub fn is_decoded(&self) -> bool {
        self.status == DecodeStatus::Decoded
    }
}

impl RuleCodec {
    /// Decodes a stored payload starting from the default rule set.
    ///
    /// Never fails: empty or unreadable payloads yield the fallback rule set
    /// with the matching [`DecodeStatus`].
    #[must_use]
    pub fn decode(&self, payload: &str) -> DecodeOutcome {
        self.decode_into(payload, &self.default_rule_set())
    }

    /// Decodes a stored payload on top of the editor's current state.
    ///
    /// Indicator slots that already hold the stored indicator keep their
    /// existing overrides for arguments the payload does not mention.
    #[must_use]
    pub fn decode_into(&self, payload: &str, current: &RuleSet) -> DecodeOutcome {
        if payload.trim().is_empty() {
            debug!("no stored rule set, using fallback");
            return DecodeOutcome {
                rule_set: self.default_rule_set(),
                status: DecodeStatus::Empty,
                warnings: Vec::new(),
            };
        }

        match self.try_decode_into(payload, current) {
            Ok((rule_set, warnings)) => DecodeOutcome {
                rule_set,
                status: DecodeStatus::Decoded,
                warnings,
            },
            Err(err) => {
                warn!(error = %err, "stored rule set is unreadable, using fallback");
                DecodeOutcome {
                    rule_set: self.default_rule_set(),
                    status: DecodeStatus::Invalid {
                        reason: err.to_string(),
                    },
                    warnings: Vec::new(),
                }
            }
        }
    }

    /// Strict variant of [`RuleCodec::decode`].
    pub fn try_decode(&self, payload: &str) -> RuleResult<(RuleSet, Vec<CodecWarning>)> {
        self.try_decode_into(payload, &self.default_rule_set())
    }

    /// Strict variant of [`RuleCodec::decode_into`]; `current` is left untouched.
    pub fn try_decode_into(
        &self,
        payload: &str,
        current: &RuleSet,
    ) -> RuleResult<(RuleSet, Vec<CodecWarning>)> {
        if payload.trim().is_empty() {
            return Err(RuleError::MalformedPayload("payload is empty".to_owned()));
        }

        let document = decode_document(payload)?;
        let (basic_value, setting_values) = document
            .split_first()
            .ok_or_else(|| RuleError::MalformedPayload("missing basic record".to_owned()))?;
        let basic: WireNode<WireBasic> = serde_json::from_value(basic_value.clone())
            .map_err(|e| RuleError::MalformedPayload(format!("invalid basic record: {e}")))?;

        let mut log = WarningLog::default();
        let mut rule_set = current.clone();

        rule_set.basic.cross_close = basic.contents.cross_close;
        rule_set.basic.interval = basic.contents.interval;
        rule_set.basic.quantity = basic.contents.quantity;
        rule_set.basic.symbol = basic.contents.symbol;

        for (slot, entry) in IndicatorSlot::BOTH.into_iter().zip(&basic.contents.index) {
            self.restore_indicator(&mut rule_set, slot, entry, &mut log);
        }

        let mut long = Vec::new();
        let mut short = Vec::new();
        for (offset, value) in setting_values.iter().enumerate() {
            let element = offset + 1;
            let node: WireNode<WireSetting> = match serde_json::from_value(value.clone()) {
                Ok(node) => node,
                Err(e) => {
                    log.push(CodecWarning::MalformedEntry {
                        element,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };
            match Position::parse(&node.contents.position) {
                Some(Position::Long) => long.push(node.contents),
                Some(Position::Short) => short.push(node.contents),
                None => log.push(CodecWarning::UnknownPosition {
                    element,
                    position: node.contents.position,
                }),
            }
        }

        let indicators = IndicatorSlot::BOTH.map(|slot| rule_set.indicator(slot).value());
        rule_set.long = self.restore_settings(Position::Long, long, indicators, &mut log);
        rule_set.short = self.restore_settings(Position::Short, short, indicators, &mut log);

        let warnings = log.into_inner();
        debug!(
            long = rule_set.long.len(),
            short = rule_set.short.len(),
            warnings = warnings.len(),
            "decoded rule set"
        );
        Ok((rule_set, warnings))
    }

    fn restore_indicator(
        &self,
        rule_set: &mut RuleSet,
        slot: IndicatorSlot,
        entry: &WireIndexEntry,
        log: &mut WarningLog,
    ) {
        let Some((value, args)) = entry.first() else {
            return;
        };
        let Some(definition) = self.snapshot.catalog().get(value) else {
            log.push(CodecWarning::UnknownIndicator {
                slot,
                value: value.clone(),
            });
            return;
        };

        let mut selection = if rule_set.indicator(slot).kind() == definition.kind {
            rule_set.indicator(slot).clone()
        } else {
            IndicatorSelection::new(definition)
        };

        for (key, raw) in args {
            let Some(arg) = ArgKey::parse(key).and_then(|arg| definition.arg(arg).map(|_| arg))
            else {
                log.push(CodecWarning::UnknownArgument {
                    slot,
                    key: key.clone(),
                });
                continue;
            };
            let text = arg_value_text(raw);
            let is_default = definition
                .arg(arg)
                .is_some_and(|spec| spec.default_value == text);
            if is_default {
                selection.clear_override(arg);
            } else if let Err(err) = selection.set_override(arg, text) {
                debug!(error = %err, key = %key, "argument override rejected");
                log.push(CodecWarning::UnknownArgument {
                    slot,
                    key: key.clone(),
                });
            }
        }

        *rule_set.indicator_mut(slot) = selection;
    }

    fn restore_settings(
        &self,
        position: Position,
        mut entries: Vec<WireSetting>,
        indicators: [&str; 2],
        log: &mut WarningLog,
    ) -> Vec<TradeSetting> {
        let cap = self.config.max_settings_per_side;
        if entries.len() > cap {
            log.push(CodecWarning::SettingsTruncated {
                position,
                kept: cap,
                discarded: entries.len() - cap,
            });
            entries.truncate(cap);
        }

        entries
            .into_iter()
            .map(|entry| {
                trace!(position = position.as_str(), "restore setting");
                self.restore_setting(entry, indicators, log)
            })
            .collect()
    }

    fn restore_setting(
        &self,
        entry: WireSetting,
        indicators: [&str; 2],
        log: &mut WarningLog,
    ) -> TradeSetting {
        if entry.num_of_conds != NUM_OF_CONDS {
            log.push(CodecWarning::ConditionCount {
                count: entry.num_of_conds,
            });
        }

        let vocabulary = self.snapshot.vocabulary();
        let candle_type = match vocabulary.candle_to_label(&entry.candle_type) {
            Some(label) => label.to_owned(),
            None => {
                log.push(CodecWarning::UnmappedKeyword {
                    table: VocabularyTable::Candle,
                    keyword: entry.candle_type.clone(),
                });
                String::new()
            }
        };

        let bot_operation = BotOperation::parse(&entry.operation).unwrap_or_else(|| {
            log.push(CodecWarning::UnknownBotOperation {
                value: entry.operation.clone(),
            });
            BotOperation::Open
        });

        TradeSetting {
            candle_type,
            selected_option_1: self.restore_option(
                IndicatorSlot::First,
                &entry.cond_1,
                indicators[0],
                log,
            ),
            selected_option_2: self.restore_option(
                IndicatorSlot::Second,
                &entry.cond_2,
                indicators[1],
                log,
            ),
            constant_1: entry.cond_1.constant.unwrap_or(self.config.default_constant),
            constant_2: entry.cond_2.constant.unwrap_or(self.config.default_constant),
            bot_operation,
        }
    }

    fn restore_option(
        &self,
        slot: IndicatorSlot,
        condition: &WireCondition,
        expected: &str,
        log: &mut WarningLog,
    ) -> String {
        let Some(operation) = ConditionOperation::parse(&condition.operation) else {
            log.push(CodecWarning::MalformedOperation {
                operation: condition.operation.clone(),
            });
            return String::new();
        };
        // The keyword is still restored; only the mismatch is reported.
        if operation.indicator != expected {
            log.push(CodecWarning::MismatchedIndicator {
                slot,
                expected: expected.to_owned(),
                operation: condition.operation.clone(),
            });
        }
        match self.snapshot.vocabulary().to_label(operation.keyword) {
            Some(label) => label.to_owned(),
            None => {
                log.push(CodecWarning::UnmappedKeyword {
                    table: VocabularyTable::Comparison,
                    keyword: operation.keyword.to_owned(),
                });
                String::new()
            }
        }
    }
}

