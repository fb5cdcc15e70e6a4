use serde::Serialize;
use tracing::warn;

use crate::core::{IndicatorSlot, Position, VocabularyTable};

use super::wire::NUM_OF_CONDS;

/// Non-fatal findings reported by encode and decode.
///
/// The codec recovers from every one of these; they are returned so callers
/// can surface them instead of losing them in a silent fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CodecWarning {
    /// Label without a keyword; written to the wire unchanged.
    UnmappedLabel {
        table: VocabularyTable,
        label: String,
    },
    /// Keyword without a label; the selection becomes empty.
    UnmappedKeyword {
        table: VocabularyTable,
        keyword: String,
    },
    /// Empty selection written as the first entry of its list.
    EmptySelection {
        table: VocabularyTable,
        label: String,
    },
    MalformedOperation {
        operation: String,
    },
    /// Condition names a different indicator than its slot holds.
    MismatchedIndicator {
        slot: IndicatorSlot,
        expected: String,
        operation: String,
    },
    /// `num_of_conds` other than the two conditions every setting carries.
    ConditionCount {
        count: u32,
    },
    UnknownIndicator {
        slot: IndicatorSlot,
        value: String,
    },
    UnknownArgument {
        slot: IndicatorSlot,
        key: String,
    },
    SettingsTruncated {
        position: Position,
        kept: usize,
        discarded: usize,
    },
    UnknownPosition {
        element: usize,
        position: String,
    },
    UnknownBotOperation {
        value: String,
    },
    MalformedEntry {
        element: usize,
        reason: String,
    },
}

impl std::fmt::Display for CodecWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnmappedLabel { table, label } => {
                write!(f, "{table:?} label `{label}` has no keyword")
            }
            Self::UnmappedKeyword { table, keyword } => {
                write!(f, "{table:?} keyword `{keyword}` has no label")
            }
            Self::EmptySelection { table, label } => {
                write!(f, "empty {table:?} selection written as `{label}`")
            }
            Self::MalformedOperation { operation } => {
                write!(f, "condition operation `{operation}` has no keyword segment")
            }
            Self::MismatchedIndicator {
                slot,
                expected,
                operation,
            } => write!(
                f,
                "condition `{operation}` does not match {slot:?} slot indicator `{expected}`"
            ),
            Self::ConditionCount { count } => {
                write!(f, "setting declares {count} conditions, expected {NUM_OF_CONDS}")
            }
            Self::UnknownIndicator { slot, value } => {
                write!(f, "indicator `{value}` for {slot:?} slot is not in the catalog")
            }
            Self::UnknownArgument { slot, key } => {
                write!(f, "argument `{key}` is not valid for the {slot:?} slot indicator")
            }
            Self::SettingsTruncated {
                position,
                kept,
                discarded,
            } => write!(
                f,
                "kept {kept} {} setting(s), discarded {discarded}",
                position.as_str()
            ),
            Self::UnknownPosition { element, position } => {
                write!(f, "element {element} has unknown position `{position}`")
            }
            Self::UnknownBotOperation { value } => {
                write!(f, "bot operation `{value}` is unknown, using `open`")
            }
            Self::MalformedEntry { element, reason } => {
                write!(f, "element {element} skipped: {reason}")
            }
        }
    }
}

/// Logs and collects warnings for one codec call.
#[derive(Debug, Default)]
pub(crate) struct WarningLog {
    warnings: Vec<CodecWarning>,
}

impl WarningLog {
    pub(crate) fn push(&mut self, warning: CodecWarning) {
        warn!(warning = %warning, "rule codec fallback");
        self.warnings.push(warning);
    }

    pub(crate) fn into_inner(self) -> Vec<CodecWarning> {
        self.warnings
    }
}
