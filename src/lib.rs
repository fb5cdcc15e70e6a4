//! autocoin-rules: trading-bot rule sets and their persisted wire form.
//!
//! A rule set (basic record, two indicator slots, long and short trade
//! settings) is encoded into a JSON array of chained nodes, then Base64 for
//! storage on the bot instance. Decoding reverses the trip and tolerates
//! damaged or partial payloads by reporting [`codec::CodecWarning`]s.

pub mod api;
pub mod codec;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{InstanceStore, MemoryInstanceStore, RuleEditor};
pub use codec::{CodecConfig, DecodeOutcome, DecodeStatus, EncodedRuleSet, RuleCodec};
pub use error::{RuleError, RuleResult};
