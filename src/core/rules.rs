use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::{ArgKey, IndicatorDefinition, IndicatorKind, LocaleSnapshot, VocabularyTable};
use crate::error::{RuleError, RuleResult};

/// Side a trade setting belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Long,
    Short,
}

impl Position {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Long => "long",
            Self::Short => "short",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "long" => Some(Self::Long),
            "short" => Some(Self::Short),
            _ => None,
        }
    }
}

/// What the bot does when a setting's conditions hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BotOperation {
    #[default]
    Open,
    Close,
}

impl BotOperation {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Close => "close",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "open" => Some(Self::Open),
            "close" => Some(Self::Close),
            _ => None,
        }
    }
}

/// One of the two indicator slots of a rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorSlot {
    First,
    Second,
}

impl IndicatorSlot {
    pub const BOTH: [IndicatorSlot; 2] = [IndicatorSlot::First, IndicatorSlot::Second];

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }
}

/// Chosen indicator plus per-argument overrides of the catalog defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndicatorSelection {
    kind: IndicatorKind,
    arg_count: usize,
    overrides: BTreeMap<usize, String>,
}

impl IndicatorSelection {
    #[must_use]
    pub fn new(definition: &IndicatorDefinition) -> Self {
        Self {
            kind: definition.kind,
            arg_count: definition.arg_count(),
            overrides: BTreeMap::new(),
        }
    }

    /// Selection of the `None` sentinel.
    #[must_use]
    pub fn none() -> Self {
        Self {
            kind: IndicatorKind::None,
            arg_count: 0,
            overrides: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> IndicatorKind {
        self.kind
    }

    #[must_use]
    pub fn value(&self) -> &'static str {
        self.kind.value()
    }

    #[must_use]
    pub fn arg_count(&self) -> usize {
        self.arg_count
    }

    /// Overrides one argument; positions past the indicator's argument list are rejected.
    pub fn set_override(&mut self, key: ArgKey, value: impl Into<String>) -> RuleResult<()> {
        if key.position() >= self.arg_count {
            return Err(RuleError::InvalidData(format!(
                "{} has {} argument(s), `{}` is out of range",
                self.kind.value(),
                self.arg_count,
                key.wire_key()
            )));
        }
        self.overrides.insert(key.position(), value.into());
        Ok(())
    }

    pub fn with_override(mut self, key: ArgKey, value: impl Into<String>) -> RuleResult<Self> {
        self.set_override(key, value)?;
        Ok(self)
    }

    pub fn clear_override(&mut self, key: ArgKey) -> Option<String> {
        self.overrides.remove(&key.position())
    }

    #[must_use]
    pub fn override_value(&self, key: ArgKey) -> Option<&str> {
        self.overrides.get(&key.position()).map(String::as_str)
    }

    #[must_use]
    pub fn has_overrides(&self) -> bool {
        !self.overrides.is_empty()
    }

    /// Effective argument values: override when present, catalog default otherwise.
    pub fn effective_args(
        &self,
        definition: &IndicatorDefinition,
    ) -> RuleResult<Vec<(ArgKey, String)>> {
        if definition.kind != self.kind || definition.arg_count() != self.arg_count {
            return Err(RuleError::InvalidData(format!(
                "selection `{}` does not match catalog entry `{}`",
                self.kind.value(),
                definition.value
            )));
        }
        Ok(definition
            .args
            .iter()
            .enumerate()
            .map(|(position, arg)| {
                let value = self
                    .overrides
                    .get(&position)
                    .cloned()
                    .unwrap_or_else(|| arg.default_value.to_owned());
                (ArgKey::new(position), value)
            })
            .collect())
    }
}

/// One entry/exit rule as edited in the UI.
///
/// Candle type and selected options hold display labels of the active locale;
/// they become wire keywords only when encoded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeSetting {
    pub candle_type: String,
    pub selected_option_1: String,
    pub selected_option_2: String,
    pub constant_1: f64,
    pub constant_2: f64,
    pub bot_operation: BotOperation,
}

impl TradeSetting {
    /// Fresh setting using the first candle label and each indicator's first option.
    #[must_use]
    pub fn for_indicators(
        snapshot: &LocaleSnapshot,
        indicators: &[IndicatorSelection; 2],
        default_constant: f64,
    ) -> Self {
        let default_label = |selection: &IndicatorSelection| {
            snapshot
                .catalog()
                .get(selection.value())
                .map(IndicatorDefinition::default_option_label)
                .unwrap_or_default()
                .to_owned()
        };
        Self {
            candle_type: snapshot.default_candle_label().to_owned(),
            selected_option_1: default_label(&indicators[0]),
            selected_option_2: default_label(&indicators[1]),
            constant_1: default_constant,
            constant_2: default_constant,
            bot_operation: BotOperation::Open,
        }
    }

    #[must_use]
    pub fn selected_option(&self, slot: IndicatorSlot) -> &str {
        match slot {
            IndicatorSlot::First => &self.selected_option_1,
            IndicatorSlot::Second => &self.selected_option_2,
        }
    }

    #[must_use]
    pub fn constant(&self, slot: IndicatorSlot) -> f64 {
        match slot {
            IndicatorSlot::First => self.constant_1,
            IndicatorSlot::Second => self.constant_2,
        }
    }

    fn selected_option_mut(&mut self, slot: IndicatorSlot) -> &mut String {
        match slot {
            IndicatorSlot::First => &mut self.selected_option_1,
            IndicatorSlot::Second => &mut self.selected_option_2,
        }
    }
}

/// Fields of the basic record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasicSettings {
    pub cross_close: bool,
    pub interval: String,
    pub quantity: f64,
    pub symbol: String,
}

impl BasicSettings {
    #[must_use]
    pub fn new(interval: impl Into<String>, quantity: f64, symbol: impl Into<String>) -> Self {
        Self {
            cross_close: false,
            interval: interval.into(),
            quantity,
            symbol: symbol.into(),
        }
    }

    #[must_use]
    pub fn with_cross_close(mut self, cross_close: bool) -> Self {
        self.cross_close = cross_close;
        self
    }
}

/// Full configuration of one bot instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleSet {
    pub basic: BasicSettings,
    pub indicators: [IndicatorSelection; 2],
    pub long: Vec<TradeSetting>,
    pub short: Vec<TradeSetting>,
}

impl RuleSet {
    /// Rule set without any trade settings.
    #[must_use]
    pub fn new(basic: BasicSettings, indicators: [IndicatorSelection; 2]) -> Self {
        Self {
            basic,
            indicators,
            long: Vec::new(),
            short: Vec::new(),
        }
    }

    /// Starting state of the editor: first selectable indicator, `None` in the
    /// second slot, one long and one short setting.
    #[must_use]
    pub fn default_for(
        snapshot: &LocaleSnapshot,
        basic: BasicSettings,
        default_constant: f64,
    ) -> Self {
        let first = snapshot
            .catalog()
            .get(snapshot.catalog().first_selectable().value())
            .map_or_else(IndicatorSelection::none, IndicatorSelection::new);
        let mut rule_set = Self::new(basic, [first, IndicatorSelection::none()]);
        rule_set.add_setting(Position::Long, snapshot, default_constant);
        rule_set.add_setting(Position::Short, snapshot, default_constant);
        rule_set
    }

    #[must_use]
    pub fn settings(&self, position: Position) -> &[TradeSetting] {
        match position {
            Position::Long => &self.long,
            Position::Short => &self.short,
        }
    }

    pub fn settings_mut(&mut self, position: Position) -> &mut Vec<TradeSetting> {
        match position {
            Position::Long => &mut self.long,
            Position::Short => &mut self.short,
        }
    }

    #[must_use]
    pub fn indicator(&self, slot: IndicatorSlot) -> &IndicatorSelection {
        &self.indicators[slot.index()]
    }

    pub fn indicator_mut(&mut self, slot: IndicatorSlot) -> &mut IndicatorSelection {
        &mut self.indicators[slot.index()]
    }

    /// Both slots reference the same indicator kind.
    #[must_use]
    pub fn has_repeated_indicator(&self) -> bool {
        self.indicators[0].kind() == self.indicators[1].kind()
    }

    /// Appends a default setting and returns its index.
    pub fn add_setting(
        &mut self,
        position: Position,
        snapshot: &LocaleSnapshot,
        default_constant: f64,
    ) -> usize {
        let setting = TradeSetting::for_indicators(snapshot, &self.indicators, default_constant);
        let settings = self.settings_mut(position);
        settings.push(setting);
        settings.len() - 1
    }

    pub fn remove_setting(&mut self, position: Position, index: usize) -> Option<TradeSetting> {
        let settings = self.settings_mut(position);
        (index < settings.len()).then(|| settings.remove(index))
    }

    /// Installs a fresh selection of `kind` in `slot`.
    ///
    /// Settings whose option for that slot is not valid for the new indicator
    /// are reset to its first option.
    pub fn select_indicator(
        &mut self,
        slot: IndicatorSlot,
        kind: IndicatorKind,
        snapshot: &LocaleSnapshot,
    ) -> RuleResult<()> {
        let definition = snapshot.catalog().definition(kind)?;
        self.indicators[slot.index()] = IndicatorSelection::new(definition);

        let vocabulary = snapshot.vocabulary();
        for setting in self.long.iter_mut().chain(self.short.iter_mut()) {
            let option = setting.selected_option_mut(slot);
            let keyword = vocabulary.to_keyword(option.as_str()).keyword();
            if !definition.supports_keyword(keyword) {
                *option = definition.default_option_label().to_owned();
            }
        }
        Ok(())
    }

    /// Translates stored labels from `from`'s locale into `to`'s locale.
    ///
    /// Labels unknown to `from` are kept as they are.
    pub fn relabel(&mut self, from: &LocaleSnapshot, to: &LocaleSnapshot) {
        let translate = |table: VocabularyTable, label: &mut String| {
            let lookup = from.vocabulary().lookup_keyword(table, label.as_str());
            if !lookup.is_mapped() {
                return;
            }
            if let Some(translated) = to.vocabulary().lookup_label(table, lookup.keyword()) {
                *label = translated.to_owned();
            }
        };
        for setting in self.long.iter_mut().chain(self.short.iter_mut()) {
            translate(VocabularyTable::Candle, &mut setting.candle_type);
            translate(VocabularyTable::Comparison, &mut setting.selected_option_1);
            translate(VocabularyTable::Comparison, &mut setting.selected_option_2);
        }
    }
}
