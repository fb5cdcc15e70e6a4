//! Wire structures of the persisted rule document.
//!
//! The document is a JSON array: element 0 is the basic record, the rest are
//! trade settings in chain order. Field names are fixed by the backend.

use base64::Engine as _;
use base64::alphabet;
use base64::engine::general_purpose::STANDARD;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::error::{RuleError, RuleResult};

/// Every setting carries exactly two conditions.
pub const NUM_OF_CONDS: u32 = 2;

/// Standard alphabet, padding optional on decode.
const LENIENT_STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Largest magnitude written as a JSON integer; beyond it `f64` loses integer precision.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// `{ "<indicator>": { "arg1": "...", ... } }`
pub type WireIndexEntry = IndexMap<String, IndexMap<String, Value>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireNode<C> {
    pub id: u32,
    pub output: u32,
    pub contents: C,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireBasic {
    #[serde(default)]
    pub cross_close: bool,
    #[serde(default)]
    pub interval: String,
    #[serde(default, serialize_with = "serialize_number")]
    pub quantity: f64,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub index: Vec<WireIndexEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireCondition {
    #[serde(default)]
    pub operation: String,
    #[serde(
        rename = "const",
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_optional_number"
    )]
    pub constant: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireSetting {
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub candle_type: String,
    #[serde(default = "default_num_of_conds")]
    pub num_of_conds: u32,
    #[serde(default = "empty_condition")]
    pub cond_1: WireCondition,
    #[serde(default = "empty_condition")]
    pub cond_2: WireCondition,
    #[serde(default)]
    pub operation: String,
}

/// One element of the serialized array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WireElement {
    Basic(WireNode<WireBasic>),
    Setting(WireNode<WireSetting>),
}

/// Parsed `"<indicator>.<index>.<keyword>"` condition operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionOperation<'a> {
    pub indicator: &'a str,
    pub index: &'a str,
    pub keyword: &'a str,
}

impl<'a> ConditionOperation<'a> {
    #[must_use]
    pub fn format(indicator: &str, index: usize, keyword: &str) -> String {
        format!("{indicator}.{index}.{keyword}")
    }

    /// Splits on the first two dots; the keyword segment must be present.
    #[must_use]
    pub fn parse(operation: &'a str) -> Option<Self> {
        let mut parts = operation.splitn(3, '.');
        let indicator = parts.next()?;
        let index = parts.next()?;
        let keyword = parts.next()?;
        Some(Self {
            indicator,
            index,
            keyword,
        })
    }
}

/// Base64 (standard alphabet, padded) of the UTF-8 JSON text.
#[must_use]
pub fn encode_blob(json: &str) -> String {
    STANDARD.encode(json.as_bytes())
}

/// Inverse of [`encode_blob`]; blobs that lost their `=` padding are accepted.
pub fn decode_blob(blob: &str) -> RuleResult<String> {
    let bytes = LENIENT_STANDARD
        .decode(blob.trim())
        .map_err(|e| RuleError::MalformedPayload(format!("invalid base64: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| RuleError::MalformedPayload(format!("payload is not utf-8: {e}")))
}

/// Decodes a blob into the raw JSON array, without interpreting elements.
pub fn decode_document(blob: &str) -> RuleResult<Vec<Value>> {
    let json = decode_blob(blob)?;
    serde_json::from_str(&json)
        .map_err(|e| RuleError::MalformedPayload(format!("payload is not a json array: {e}")))
}

/// Wire text of a stored argument value; the backend sends strings but
/// numbers are accepted too.
#[must_use]
pub fn arg_value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Integral values are written without a fractional part (`70`, not `70.0`).
fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

fn serialize_optional_number<S: Serializer>(
    value: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(value) => serialize_number(value, serializer),
        None => serializer.serialize_none(),
    }
}

fn default_num_of_conds() -> u32 {
    NUM_OF_CONDS
}

fn empty_condition() -> WireCondition {
    WireCondition {
        operation: String::new(),
        constant: None,
    }
}
