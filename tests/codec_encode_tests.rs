use autocoin_rules::codec::{CodecWarning, decode_blob};
use autocoin_rules::core::{
    ArgKey, BasicSettings, BotOperation, BuiltinVocabularyProvider, IndicatorKind,
    IndicatorSelection, IndicatorSlot, Locale, RuleSet, TradeSetting, VocabularyProvider,
    VocabularyTable,
};
use autocoin_rules::{CodecConfig, RuleCodec, RuleError};
use serde_json::{Value, json};

fn codec(locale: Locale) -> RuleCodec {
    let snapshot = BuiltinVocabularyProvider.rebuild(locale).expect("snapshot");
    RuleCodec::new(snapshot, CodecConfig::default()).expect("codec")
}

fn selection(codec: &RuleCodec, value: &str) -> IndicatorSelection {
    IndicatorSelection::new(codec.snapshot().catalog().get(value).expect("catalog entry"))
}

fn setting(candle: &str, option_1: &str, option_2: &str, constant_1: f64) -> TradeSetting {
    TradeSetting {
        candle_type: candle.to_owned(),
        selected_option_1: option_1.to_owned(),
        selected_option_2: option_2.to_owned(),
        constant_1,
        constant_2: 20.0,
        bot_operation: BotOperation::Open,
    }
}

fn rsi_long_rule_set(codec: &RuleCodec) -> RuleSet {
    let mut rule_set = RuleSet::new(
        BasicSettings::new("15m", 0.1, "BTC"),
        [selection(codec, "RSI"), IndicatorSelection::none()],
    );
    rule_set
        .long
        .push(setting("last", "above constant", "no condition", 70.0));
    rule_set
}

fn document(json: &str) -> Vec<Value> {
    serde_json::from_str(json).expect("json array")
}

#[test]
fn rsi_long_only_rule_set_matches_backend_document() {
    let codec = codec(Locale::En);
    let encoded = codec.encode(&rsi_long_rule_set(&codec)).expect("encode");

    let expected = concat!(
        r#"[{"id":0,"output":1,"contents":{"cross_close":false,"interval":"15m","quantity":0.1,"symbol":"BTC","#,
        r#""index":[{"RSI":{"arg1":"14"}},{"None":{}}]}},"#,
        r#"{"id":1,"output":2,"contents":{"position":"long","candle_type":"last","num_of_conds":2,"#,
        r#""cond_1":{"operation":"RSI.0.constant_high","const":70},"cond_2":{"operation":"None.0.none"},"#,
        r#""operation":"open"}}]"#
    );
    assert_eq!(encoded.json, expected);
    assert_eq!(decode_blob(&encoded.payload).expect("blob"), expected);
    assert!(encoded.warnings.is_empty());
    assert_eq!(encoded.chain.len(), 2);
}

#[test]
fn labels_of_any_locale_produce_the_same_payload() {
    let en = codec(Locale::En);
    let ko = codec(Locale::Ko);

    let mut ko_rule_set = rsi_long_rule_set(&ko);
    ko_rule_set.long[0] = setting("현재가", "상수 초과", "조건 없음", 70.0);

    let en_payload = en.encode(&rsi_long_rule_set(&en)).expect("en").payload;
    let ko_payload = ko.encode(&ko_rule_set).expect("ko").payload;
    assert_eq!(en_payload, ko_payload);
}

#[test]
fn repeated_indicator_uses_slot_index() {
    let codec = codec(Locale::En);
    let mut rule_set = RuleSet::new(
        BasicSettings::new("1h", 1.0, "ETHUSDT"),
        [selection(&codec, "RSI"), selection(&codec, "RSI")],
    );
    rule_set
        .long
        .push(setting("last", "above constant", "below constant", 70.0));

    let encoded = codec.encode(&rule_set).expect("encode");
    let doc = document(&encoded.json);
    let contents = &doc[1]["contents"];
    assert_eq!(contents["cond_1"]["operation"], "RSI.0.constant_high");
    assert_eq!(contents["cond_2"]["operation"], "RSI.1.constant_low");
}

#[test]
fn distinct_indicators_always_use_index_zero() {
    let codec = codec(Locale::En);
    let mut rule_set = RuleSet::new(
        BasicSettings::new("1h", 1.0, "ETHUSDT"),
        [selection(&codec, "EMA"), selection(&codec, "MACD")],
    );
    rule_set
        .short
        .push(setting("high", "price above line", "golden cross", 20.0));

    let encoded = codec.encode(&rule_set).expect("encode");
    let doc = document(&encoded.json);
    let contents = &doc[1]["contents"];
    assert_eq!(contents["position"], "short");
    assert_eq!(contents["candle_type"], "high");
    assert_eq!(contents["cond_1"], json!({"operation": "EMA.0.price_above"}));
    assert_eq!(contents["cond_2"], json!({"operation": "MACD.0.golden_cross"}));
    assert_eq!(doc[1]["output"], 0);
}

#[test]
fn fractional_constants_keep_their_fraction() {
    let codec = codec(Locale::En);
    let mut rule_set = rsi_long_rule_set(&codec);
    rule_set.long[0].constant_1 = 30.5;

    let encoded = codec.encode(&rule_set).expect("encode");
    assert!(encoded.json.contains(r#""const":30.5"#));
}

#[test]
fn overrides_replace_only_their_argument() {
    let codec = codec(Locale::En);
    let macd = selection(&codec, "MACD")
        .with_override(ArgKey::new(1), "30")
        .expect("override");
    let rule_set = RuleSet::new(
        BasicSettings::new("4h", 2.0, "BTCUSDT"),
        [macd, IndicatorSelection::none()],
    );

    let encoded = codec.encode(&rule_set).expect("encode");
    let doc = document(&encoded.json);
    assert_eq!(
        doc[0]["contents"]["index"][0],
        json!({"MACD": {"arg1": "12", "arg2": "30", "arg3": "9"}})
    );
    assert_eq!(doc[0]["contents"]["quantity"], 2);
    assert_eq!(doc.len(), 1);
}

#[test]
fn empty_rule_set_keeps_root_pointer() {
    let codec = codec(Locale::En);
    let rule_set = RuleSet::new(
        BasicSettings::new("15m", 0.0, "BTC"),
        [IndicatorSelection::none(), IndicatorSelection::none()],
    );
    let encoded = codec.encode(&rule_set).expect("encode");
    let doc = document(&encoded.json);
    assert_eq!(doc.len(), 1);
    assert_eq!(doc[0]["id"], 0);
    assert_eq!(doc[0]["output"], 1);
}

#[test]
fn unmapped_label_is_written_through_with_warning() {
    let codec = codec(Locale::En);
    let mut rule_set = rsi_long_rule_set(&codec);
    rule_set.long[0].selected_option_1 = "sideways".to_owned();

    let encoded = codec.encode(&rule_set).expect("encode");
    let doc = document(&encoded.json);
    assert_eq!(doc[1]["contents"]["cond_1"]["operation"], "RSI.0.sideways");
    assert_eq!(
        encoded.warnings,
        vec![CodecWarning::UnmappedLabel {
            table: VocabularyTable::Comparison,
            label: "sideways".to_owned(),
        }]
    );
}

#[test]
fn non_finite_numbers_are_rejected() {
    let codec = codec(Locale::En);
    let mut rule_set = rsi_long_rule_set(&codec);
    rule_set.long[0].constant_1 = f64::NAN;
    assert!(matches!(
        codec.encode(&rule_set),
        Err(RuleError::InvalidData(_))
    ));

    let mut rule_set = rsi_long_rule_set(&codec);
    rule_set.basic.quantity = f64::INFINITY;
    assert!(matches!(
        codec.encode(&rule_set),
        Err(RuleError::InvalidData(_))
    ));
}

#[test]
fn non_finite_constant_is_ignored_when_not_shown() {
    let codec = codec(Locale::En);
    let mut rule_set = rsi_long_rule_set(&codec);
    rule_set.long[0].constant_2 = f64::NAN;
    assert!(codec.encode(&rule_set).is_ok());
}

#[test]
fn encoding_is_deterministic() {
    let codec = codec(Locale::Zh);
    let mut rule_set = codec.default_rule_set();
    rule_set
        .select_indicator(IndicatorSlot::Second, IndicatorKind::Adx, codec.snapshot())
        .expect("select adx");
    let first = codec.encode(&rule_set).expect("first");
    let second = codec.encode(&rule_set).expect("second");
    assert_eq!(first, second);
}

#[test]
fn document_elements_follow_chain_order() {
    let codec = codec(Locale::En);
    let mut rule_set = rsi_long_rule_set(&codec);
    rule_set
        .short
        .push(setting("low", "below constant", "no condition", 30.0));
    rule_set
        .long
        .push(setting("open", "crossed above constant", "no condition", 50.0));

    let (elements, warnings) = codec.encode_document(&rule_set).expect("document");
    assert!(warnings.is_empty());
    let json = serde_json::to_value(&elements).expect("serialize");
    let pointers: Vec<(u64, u64, String)> = json
        .as_array()
        .expect("array")
        .iter()
        .skip(1)
        .map(|element| {
            (
                element["id"].as_u64().expect("id"),
                element["output"].as_u64().expect("output"),
                element["contents"]["position"]
                    .as_str()
                    .expect("position")
                    .to_owned(),
            )
        })
        .collect();
    assert_eq!(
        pointers,
        vec![
            (1, 2, "long".to_owned()),
            (2, 3, "long".to_owned()),
            (3, 0, "short".to_owned()),
        ]
    );
}
