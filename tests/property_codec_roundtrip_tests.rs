use autocoin_rules::codec::encode_blob;
use autocoin_rules::core::{
    ArgKey, BasicSettings, BotOperation, BuiltinVocabularyProvider, IndicatorKind,
    IndicatorSelection, IndicatorSlot, Locale, LocaleSnapshot, RuleSet, TradeSetting,
    VocabularyProvider,
};
use autocoin_rules::{CodecConfig, DecodeStatus, RuleCodec};
use proptest::prelude::*;
use serde_json::{Value, json};

type SettingSpec = (usize, usize, usize, i32, i32, bool);

fn codec_for(locale_index: usize) -> RuleCodec {
    let locale = Locale::ALL[locale_index % Locale::ALL.len()];
    let snapshot = BuiltinVocabularyProvider.rebuild(locale).expect("snapshot");
    RuleCodec::new(snapshot, CodecConfig::default()).expect("codec")
}

fn selection(
    snapshot: &LocaleSnapshot,
    kind_index: usize,
    arg_seed: Option<u8>,
) -> IndicatorSelection {
    let kind = IndicatorKind::ALL[kind_index % IndicatorKind::ALL.len()];
    let definition = snapshot.catalog().definition(kind).expect("definition");
    let mut selection = IndicatorSelection::new(definition);
    if let Some(seed) = arg_seed.filter(|_| definition.arg_count() > 0) {
        let key = ArgKey::new(usize::from(seed) % definition.arg_count());
        // Catalog defaults never reach 100, so this is always a real override.
        selection
            .set_override(key, (100 + u32::from(seed)).to_string())
            .expect("override");
    }
    selection
}

fn trade_setting(
    snapshot: &LocaleSnapshot,
    indicators: &[IndicatorSelection; 2],
    spec: SettingSpec,
) -> TradeSetting {
    let (candle, option_1, option_2, constant_1, constant_2, close) = spec;
    let catalog = snapshot.catalog();
    let def_1 = catalog.definition(indicators[0].kind()).expect("first");
    let def_2 = catalog.definition(indicators[1].kind()).expect("second");
    let constant = |show: bool, raw: i32| if show { f64::from(raw) / 4.0 } else { 20.0 };
    TradeSetting {
        candle_type: snapshot
            .vocabulary()
            .candle_labels()
            .nth(candle % 4)
            .expect("candle label")
            .to_owned(),
        selected_option_1: def_1.options[option_1 % def_1.options.len()].label.to_owned(),
        selected_option_2: def_2.options[option_2 % def_2.options.len()].label.to_owned(),
        constant_1: constant(def_1.show_constant, constant_1),
        constant_2: constant(def_2.show_constant, constant_2),
        bot_operation: if close { BotOperation::Close } else { BotOperation::Open },
    }
}

#[allow(clippy::too_many_arguments)]
fn rule_set(
    codec: &RuleCodec,
    first: usize,
    second: usize,
    arg_seed: Option<u8>,
    quantity_cents: u32,
    cross_close: bool,
    long: &[SettingSpec],
    short: &[SettingSpec],
) -> RuleSet {
    let snapshot = codec.snapshot();
    let indicators = [
        selection(snapshot, first, arg_seed),
        selection(snapshot, second, None),
    ];
    let basic = BasicSettings::new("30m", f64::from(quantity_cents) / 100.0, "BTCUSDT")
        .with_cross_close(cross_close);
    let mut rule_set = RuleSet::new(basic, indicators);
    rule_set.long = long
        .iter()
        .map(|spec| trade_setting(snapshot, &rule_set.indicators, *spec))
        .collect();
    rule_set.short = short
        .iter()
        .map(|spec| trade_setting(snapshot, &rule_set.indicators, *spec))
        .collect();
    rule_set
}

fn setting_spec() -> impl Strategy<Value = SettingSpec> {
    (
        0usize..4,
        0usize..8,
        0usize..8,
        -400i32..400,
        -400i32..400,
        any::<bool>(),
    )
}

fn settings_side() -> impl Strategy<Value = Vec<SettingSpec>> {
    prop::collection::vec(setting_spec(), 0..=4)
}

fn document(json: &str) -> Vec<Value> {
    serde_json::from_str(json).expect("json array")
}

proptest! {
    #[test]
    fn decode_restores_encoded_rule_set(
        locale in 0usize..4,
        first in 0usize..15,
        second in 0usize..15,
        arg_seed in prop::option::of(any::<u8>()),
        quantity_cents in 0u32..1_000_000,
        cross_close in any::<bool>(),
        long in settings_side(),
        short in settings_side()
    ) {
        let codec = codec_for(locale);
        let original = rule_set(&codec, first, second, arg_seed, quantity_cents, cross_close, &long, &short);

        let encoded = codec.encode(&original).expect("encode");
        prop_assert!(encoded.warnings.is_empty());

        let outcome = codec.decode(&encoded.payload);
        prop_assert_eq!(&outcome.status, &DecodeStatus::Decoded);
        prop_assert!(outcome.warnings.is_empty());
        prop_assert_eq!(outcome.rule_set, original);
    }

    #[test]
    fn encoding_is_deterministic_and_locale_independent(
        locale in 1usize..4,
        first in 0usize..15,
        second in 0usize..15,
        long in settings_side(),
        short in settings_side()
    ) {
        let english = codec_for(0);
        let localized = codec_for(locale);
        let en_rule_set = rule_set(&english, first, second, None, 150, false, &long, &short);
        let local_rule_set = rule_set(&localized, first, second, None, 150, false, &long, &short);

        let first_pass = english.encode(&en_rule_set).expect("first");
        let second_pass = english.encode(&en_rule_set).expect("second");
        prop_assert_eq!(&first_pass.payload, &second_pass.payload);

        let local = localized.encode(&local_rule_set).expect("localized");
        prop_assert_eq!(first_pass.payload, local.payload);
    }

    #[test]
    fn index_segment_disambiguates_only_repeated_indicators(
        first in 0usize..15,
        second in 0usize..15,
        long in prop::collection::vec(setting_spec(), 1..=4)
    ) {
        let codec = codec_for(0);
        let rule_set = rule_set(&codec, first, second, None, 100, false, &long, &[]);
        let repeated = rule_set.has_repeated_indicator();
        let doc = document(&codec.encode(&rule_set).expect("encode").json);

        for element in &doc[1..] {
            let op_1 = element["contents"]["cond_1"]["operation"].as_str().expect("op 1");
            let op_2 = element["contents"]["cond_2"]["operation"].as_str().expect("op 2");
            let index_1 = op_1.split('.').nth(1).expect("index 1");
            let index_2 = op_2.split('.').nth(1).expect("index 2");
            prop_assert_eq!(index_1, "0");
            prop_assert_eq!(index_2, if repeated { "1" } else { "0" });
            let indicator_1 = rule_set.indicator(IndicatorSlot::First).value();
            let prefix_1 = format!("{indicator_1}.");
            prop_assert!(op_1.starts_with(&prefix_1));
        }
    }

    #[test]
    fn constant_present_only_for_threshold_indicators(
        first in 0usize..15,
        second in 0usize..15,
        short in prop::collection::vec(setting_spec(), 1..=4)
    ) {
        let codec = codec_for(0);
        let rule_set = rule_set(&codec, first, second, None, 100, false, &[], &short);
        let doc = document(&codec.encode(&rule_set).expect("encode").json);

        for element in &doc[1..] {
            for (slot, field) in IndicatorSlot::BOTH.into_iter().zip(["cond_1", "cond_2"]) {
                let shows = rule_set.indicator(slot).kind().show_constant();
                let condition = element["contents"][field].as_object().expect("condition");
                prop_assert_eq!(condition.contains_key("const"), shows);
            }
        }
    }

    #[test]
    fn decoder_caps_each_side(
        long_count in 0usize..10,
        short_count in 0usize..10
    ) {
        let codec = codec_for(0);
        let mut elements = vec![json!({
            "id": 0,
            "output": 1,
            "contents": {"index": [{"RSI": {}}, {"None": {}}]}
        })];
        let setting = |position: &str, constant: usize| json!({
            "id": 1,
            "output": 0,
            "contents": {
                "position": position,
                "candle_type": "last",
                "cond_1": {"operation": "RSI.0.constant_high", "const": constant},
                "cond_2": {"operation": "None.0.none"},
                "operation": "open"
            }
        });
        elements.extend((0..long_count).map(|i| setting("long", 10 + i)));
        elements.extend((0..short_count).map(|i| setting("short", 50 + i)));
        let payload = encode_blob(&Value::Array(elements).to_string());

        let outcome = codec.decode(&payload);
        let constants = |settings: &[TradeSetting]| {
            settings.iter().map(|setting| setting.constant_1).collect::<Vec<_>>()
        };
        let expected_long: Vec<f64> = (0..long_count.min(4)).map(|i| (10 + i) as f64).collect();
        let expected_short: Vec<f64> = (0..short_count.min(4)).map(|i| (50 + i) as f64).collect();
        prop_assert_eq!(constants(&outcome.rule_set.long), expected_long);
        prop_assert_eq!(constants(&outcome.rule_set.short), expected_short);
        let truncations = usize::from(long_count > 4) + usize::from(short_count > 4);
        prop_assert_eq!(outcome.warnings.len(), truncations);
    }
}
