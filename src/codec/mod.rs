//! Rule codec: in-memory rule sets to the Base64 wire document and back.

use std::sync::Arc;

use crate::core::{LocaleSnapshot, RuleSet};
use crate::error::RuleResult;

mod config;
mod decode;
mod encode;
mod warning;
pub mod wire;

pub use config::CodecConfig;
pub use decode::{DecodeOutcome, DecodeStatus};
pub use encode::EncodedRuleSet;
pub use warning::CodecWarning;
pub use wire::{
    ConditionOperation, NUM_OF_CONDS, WireBasic, WireCondition, WireElement, WireNode,
    WireSetting, decode_blob, decode_document, encode_blob,
};

/// Encoder/decoder bound to one locale snapshot.
///
/// Both directions are pure: the codec holds no mutable state, and a locale
/// switch means building a new codec around a new snapshot.
#[derive(Debug, Clone)]
pub struct RuleCodec {
    snapshot: Arc<LocaleSnapshot>,
    config: CodecConfig,
}

impl RuleCodec {
    pub fn new(snapshot: Arc<LocaleSnapshot>, config: CodecConfig) -> RuleResult<Self> {
        Ok(Self {
            snapshot,
            config: config.validate()?,
        })
    }

    #[must_use]
    pub fn with_snapshot(&self, snapshot: Arc<LocaleSnapshot>) -> Self {
        Self {
            snapshot,
            config: self.config.clone(),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> &Arc<LocaleSnapshot> {
        &self.snapshot
    }

    #[must_use]
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    #[must_use]
    pub fn default_rule_set(&self) -> RuleSet {
        self.config.default_rule_set(&self.snapshot)
    }
}
