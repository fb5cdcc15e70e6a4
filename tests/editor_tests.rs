use std::sync::Arc;

use autocoin_rules::api::{InstanceOperation, InstanceStore, MemoryInstanceStore, RuleEditor};
use autocoin_rules::codec::{CodecWarning, encode_blob};
use autocoin_rules::core::{
    ArgKey, IndicatorKind, IndicatorSlot, Locale, LocaleSnapshot, Position, VocabularyProvider,
    VocabularyTable,
};
use autocoin_rules::{CodecConfig, DecodeStatus, RuleError, RuleResult};
use serde_json::{Value, json};

fn editor() -> RuleEditor<MemoryInstanceStore> {
    RuleEditor::with_builtin(MemoryInstanceStore::new(), CodecConfig::default()).expect("editor")
}

/// Provider that only knows English and Korean.
struct PartialProvider;

impl VocabularyProvider for PartialProvider {
    fn rebuild(&self, locale: Locale) -> RuleResult<Arc<LocaleSnapshot>> {
        match locale {
            Locale::En | Locale::Ko => Ok(Arc::new(LocaleSnapshot::builtin(locale)?)),
            other => Err(RuleError::InvalidData(format!("no labels for `{other}`"))),
        }
    }
}

/// Store whose backend is unreachable.
struct OfflineStore;

impl InstanceStore for OfflineStore {
    fn read_blob(&self, _instance_id: &str) -> RuleResult<Option<String>> {
        Err(RuleError::Store("backend unreachable".to_owned()))
    }

    fn write_blob(&mut self, _instance_id: &str, _blob: &str) -> RuleResult<()> {
        Err(RuleError::Store("backend unreachable".to_owned()))
    }
}

#[test]
fn new_editor_starts_from_default_rule_set() {
    let editor = editor();
    let rule_set = editor.rule_set();
    assert_eq!(rule_set.long.len(), 1);
    assert_eq!(rule_set.short.len(), 1);
    assert_eq!(
        rule_set.indicator(IndicatorSlot::First).kind(),
        IndicatorKind::BollingerBands
    );
    assert_eq!(
        rule_set.indicator(IndicatorSlot::Second).kind(),
        IndicatorKind::None
    );
    assert_eq!(rule_set.long[0].candle_type, "last");
    assert_eq!(rule_set.long[0].selected_option_1, "upper line surpassed");
    assert_eq!(rule_set.long[0].selected_option_2, "no condition");
    assert_eq!(editor.locale(), Locale::En);
}

#[test]
fn add_and_remove_settings() {
    let mut editor = editor();
    assert_eq!(editor.add_setting(Position::Long), 1);
    assert_eq!(editor.add_setting(Position::Long), 2);
    assert_eq!(editor.rule_set().long.len(), 3);

    assert!(editor.remove_setting(Position::Short, 0).is_some());
    assert!(editor.remove_setting(Position::Short, 0).is_none());
    assert!(editor.rule_set().short.is_empty());
}

#[test]
fn selecting_indicator_resets_unsupported_options() {
    let mut editor = editor();
    editor
        .select_indicator(IndicatorSlot::First, IndicatorKind::Rsi)
        .expect("select rsi");
    assert_eq!(editor.rule_set().long[0].selected_option_1, "above constant");

    editor.rule_set_mut().long[0].selected_option_1 = "below constant".to_owned();
    editor
        .select_indicator(IndicatorSlot::First, IndicatorKind::Cci)
        .expect("select cci");
    assert_eq!(editor.rule_set().long[0].selected_option_1, "below constant");
}

#[test]
fn indicator_args_are_validated_and_normalized() {
    let mut editor = editor();
    editor
        .select_indicator(IndicatorSlot::First, IndicatorKind::Rsi)
        .expect("select rsi");

    editor
        .set_indicator_arg(IndicatorSlot::First, ArgKey::new(0), "21")
        .expect("override");
    let rsi = editor.rule_set().indicator(IndicatorSlot::First);
    assert_eq!(rsi.override_value(ArgKey::new(0)), Some("21"));

    editor
        .set_indicator_arg(IndicatorSlot::First, ArgKey::new(0), "14")
        .expect("reset");
    assert!(!editor.rule_set().indicator(IndicatorSlot::First).has_overrides());

    assert!(matches!(
        editor.set_indicator_arg(IndicatorSlot::First, ArgKey::new(1), "3"),
        Err(RuleError::InvalidData(_))
    ));
    assert!(
        editor
            .set_indicator_arg(IndicatorSlot::Second, ArgKey::new(0), "3")
            .is_err()
    );
}

#[test]
fn save_then_load_restores_rule_set() {
    let mut editor = editor();
    editor
        .select_indicator(IndicatorSlot::Second, IndicatorKind::Macd)
        .expect("select macd");
    editor.add_setting(Position::Short);
    editor.rule_set_mut().basic.symbol = "ETHUSDT".to_owned();
    let saved = editor.rule_set().clone();

    let encoded = editor.save("bot-1").expect("save");
    assert_eq!(editor.store().blob("bot-1"), Some(encoded.payload.as_str()));
    assert_eq!(editor.store().write_count, 1);

    let store = editor.into_store();
    let mut reloaded =
        RuleEditor::with_builtin(store, CodecConfig::default()).expect("second editor");
    let outcome = reloaded.load("bot-1").expect("load");
    assert_eq!(outcome.status, DecodeStatus::Decoded);
    assert!(outcome.warnings.is_empty());
    assert_eq!(reloaded.rule_set(), &saved);
}

#[test]
fn loading_unknown_instance_yields_empty_status() {
    let mut editor = editor();
    editor.add_setting(Position::Long);
    let outcome = editor.load("missing").expect("load");
    assert_eq!(outcome.status, DecodeStatus::Empty);
    assert_eq!(editor.rule_set(), &editor.codec().default_rule_set());
}

#[test]
fn loading_corrupt_blob_reports_invalid() {
    let store = MemoryInstanceStore::new().with_blob("bot-1", "@@@@");
    let mut editor = RuleEditor::with_builtin(store, CodecConfig::default()).expect("editor");
    let outcome = editor.load("bot-1").expect("load");
    assert!(matches!(outcome.status, DecodeStatus::Invalid { .. }));
    assert_eq!(editor.rule_set().long.len(), 1);
}

#[test]
fn store_failures_are_errors() {
    let mut editor =
        RuleEditor::with_builtin(OfflineStore, CodecConfig::default()).expect("editor");
    assert!(matches!(editor.load("bot-1"), Err(RuleError::Store(_))));
    assert!(matches!(editor.save("bot-1"), Err(RuleError::Store(_))));
}

#[test]
fn locale_switch_relabels_settings() {
    let mut editor = editor();
    editor
        .select_indicator(IndicatorSlot::First, IndicatorKind::Rsi)
        .expect("select rsi");
    let before = editor.codec().encode(editor.rule_set()).expect("encode").payload;

    editor.set_locale(Locale::Ko).expect("switch");
    assert_eq!(editor.locale(), Locale::Ko);
    assert_eq!(editor.rule_set().long[0].candle_type, "현재가");
    assert_eq!(editor.rule_set().long[0].selected_option_1, "상수 초과");
    assert_eq!(editor.rule_set().long[0].selected_option_2, "조건 없음");

    let after = editor.codec().encode(editor.rule_set()).expect("encode").payload;
    assert_eq!(before, after);
}

#[test]
fn failed_locale_switch_keeps_previous_state() {
    let store = MemoryInstanceStore::new();
    let mut editor =
        RuleEditor::new(store, PartialProvider, CodecConfig::default()).expect("editor");
    let before = editor.rule_set().clone();
    assert!(editor.set_locale(Locale::Ja).is_err());
    assert_eq!(editor.locale(), Locale::En);
    assert_eq!(editor.rule_set(), &before);

    editor.set_locale(Locale::Ko).expect("korean");
    assert_eq!(editor.snapshot().locale(), Locale::Ko);
}

#[test]
fn post_request_embeds_current_payload() {
    let editor = editor();
    let request = editor.post_request("bot-9", "breakout").expect("request");
    let encoded = editor.codec().encode(editor.rule_set()).expect("encode");
    assert_eq!(request.operation, InstanceOperation::Post);
    assert_eq!(request.instance_id, "bot-9");
    assert_eq!(request.name.as_deref(), Some("breakout"));
    assert_eq!(request.data, Some(encoded.payload));
}

#[test]
fn unmapped_selections_are_saved_as_first_options() {
    let document = json!([
        {"id": 0, "output": 1, "contents": {
            "cross_close": false, "interval": "1h", "quantity": 1, "symbol": "BTCUSDT",
            "index": [{"RSI": {}}, {"None": {}}]
        }},
        {"id": 1, "output": 0, "contents": {
            "position": "long", "candle_type": "median", "num_of_conds": 2,
            "cond_1": {"operation": "RSI.0.legacy_kw", "const": 61},
            "cond_2": {"operation": "None.0.none"},
            "operation": "open"
        }},
    ]);
    let store = MemoryInstanceStore::new().with_blob("bot-1", encode_blob(&document.to_string()));
    let mut editor = RuleEditor::with_builtin(store, CodecConfig::default()).expect("editor");

    let outcome = editor.load("bot-1").expect("load");
    assert_eq!(outcome.status, DecodeStatus::Decoded);
    assert_eq!(editor.rule_set().long[0].selected_option_1, "");
    assert_eq!(editor.rule_set().long[0].candle_type, "");

    let saved = editor.save("bot-1").expect("save");
    let doc: Value = serde_json::from_str(&saved.json).expect("json");
    assert_eq!(doc[1]["contents"]["candle_type"], "last");
    assert_eq!(
        doc[1]["contents"]["cond_1"],
        json!({"operation": "RSI.0.constant_high", "const": 61})
    );
    assert_eq!(
        saved.warnings,
        vec![
            CodecWarning::EmptySelection {
                table: VocabularyTable::Candle,
                label: "last".to_owned(),
            },
            CodecWarning::EmptySelection {
                table: VocabularyTable::Comparison,
                label: "above constant".to_owned(),
            },
        ]
    );
}
